//! Table formatting utilities for CLI output.

use comfy_table::{presets, ContentArrangement, Table};
use streamfmt::catalog::{Preset, PropertyInfo, Snippet};
use streamfmt::Namespace;

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header);
    table
}

/// Format catalog properties as a table, one row per property.
pub fn format_properties_table(rows: &[(Namespace, &PropertyInfo)]) -> Table {
    let mut table = new_table(vec!["Property", "Description"]);
    for (namespace, info) in rows {
        table.add_row(vec![
            format!("{namespace}.{}", info.name),
            info.description.to_string(),
        ]);
    }
    table
}

/// Format built-in presets as a table.
pub fn format_presets_table(presets: &[Preset]) -> Table {
    let mut table = new_table(vec!["Id", "Name", "Description"]);
    for preset in presets {
        table.add_row(vec![preset.id, preset.name, preset.description]);
    }
    table
}

/// Format built-in snippets as a table.
pub fn format_snippets_table(snippets: &[Snippet]) -> Table {
    let mut table = new_table(vec!["Id", "Template", "Description"]);
    for snippet in snippets {
        table.add_row(vec![snippet.id, snippet.template, snippet.description]);
    }
    table
}
