//! JSON output for `--json` modes.

use serde::Serialize;

/// Print a value to stdout as pretty JSON.
pub fn print_json(value: &impl Serialize) -> miette::Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| miette::miette!("JSON serialization failed: {}", e))?;
    println!("{}", json);
    Ok(())
}
