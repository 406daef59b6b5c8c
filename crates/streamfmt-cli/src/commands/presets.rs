//! Implementation of the `streamfmt presets` command.

use serde::Serialize;
use streamfmt::catalog::{preset, PRESETS, SNIPPETS};

use crate::output::json::print_json;
use crate::output::table::{format_presets_table, format_snippets_table};

/// Arguments for the presets command.
#[derive(Debug, clap::Args)]
pub struct PresetsArgs {
    /// Print one preset as a `custom:` definition string
    #[arg(long, value_name = "ID")]
    pub show: Option<String>,

    /// List the single-property snippets instead of presets
    #[arg(long, conflicts_with = "show")]
    pub snippets: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for a preset.
#[derive(Serialize)]
pub struct PresetEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub definition: String,
}

/// JSON output for a snippet.
#[derive(Serialize)]
pub struct SnippetEntry {
    pub id: &'static str,
    pub template: &'static str,
    pub description: &'static str,
}

/// Run the presets command.
pub fn run_presets(args: PresetsArgs) -> miette::Result<i32> {
    if let Some(id) = &args.show {
        let Some(found) = preset(id) else {
            let known: Vec<&str> = PRESETS.iter().map(|p| p.id).collect();
            eprintln!("unknown preset '{}' (available: {})", id, known.join(", "));
            return Ok(exitcode::USAGE);
        };
        println!("{}", found.definition().to_custom_string());
        return Ok(exitcode::OK);
    }

    if args.snippets {
        if args.json {
            let entries: Vec<SnippetEntry> = SNIPPETS
                .iter()
                .map(|s| SnippetEntry {
                    id: s.id,
                    template: s.template,
                    description: s.description,
                })
                .collect();
            print_json(&entries)?;
        } else {
            println!("{}", format_snippets_table(SNIPPETS));
        }
        return Ok(exitcode::OK);
    }

    if args.json {
        let entries: Vec<PresetEntry> = PRESETS
            .iter()
            .map(|p| PresetEntry {
                id: p.id,
                name: p.name,
                description: p.description,
                definition: p.definition().to_custom_string(),
            })
            .collect();
        print_json(&entries)?;
    } else {
        println!("{}", format_presets_table(PRESETS));
    }
    Ok(exitcode::OK)
}
