//! Implementation of the `streamfmt properties` command.

use serde::Serialize;
use streamfmt::catalog::properties;
use streamfmt::Namespace;

use crate::output::json::print_json;
use crate::output::table::format_properties_table;

/// Arguments for the properties command.
#[derive(Debug, clap::Args)]
pub struct PropertiesArgs {
    /// Only list properties of this namespace (stream, provider, addon)
    #[arg(short, long)]
    pub namespace: Option<Namespace>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for a documented property.
#[derive(Serialize)]
pub struct PropertyEntry {
    pub namespace: Namespace,
    pub name: &'static str,
    pub description: &'static str,
}

/// Run the properties command.
pub fn run_properties(args: PropertiesArgs) -> miette::Result<i32> {
    let namespaces = match args.namespace {
        Some(namespace) => vec![namespace],
        None => Namespace::ALL.to_vec(),
    };
    let rows: Vec<_> = namespaces
        .into_iter()
        .flat_map(|namespace| properties(namespace).iter().map(move |info| (namespace, info)))
        .collect();

    if args.json {
        let entries: Vec<PropertyEntry> = rows
            .iter()
            .map(|(namespace, info)| PropertyEntry {
                namespace: *namespace,
                name: info.name,
                description: info.description,
            })
            .collect();
        print_json(&entries)?;
    } else {
        println!("{}", format_properties_table(&rows));
    }
    Ok(exitcode::OK)
}
