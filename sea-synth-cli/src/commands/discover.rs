use sea_synth::{Catalog, Discovery};
use std::error::Error;

use crate::{DiscoverArgs, get_config};

pub fn run_discover_command(args: DiscoverArgs) -> Result<(), Box<dyn Error>> {
    let config = get_config(args.config.as_deref())?;
    let catalog_path = config.catalog_path(args.catalog)?;
    let catalog = Catalog::from_json_file(&catalog_path)?;

    let discovery = Discovery::discover(&catalog.columns, &config.query.candidates());
    for line in discovery_lines(&discovery) {
        println!("{line}");
    }

    Ok(())
}

fn discovery_lines(discovery: &Discovery) -> Vec<String> {
    let mut lines = vec!["Detected tables and columns:".to_owned()];
    for (table, columns) in discovery.tables.iter() {
        lines.push(format!(" - {table}: {}", columns.join(", ")));
    }

    lines.push(String::new());
    if discovery.is_complete() {
        lines.push("All required key fields detected:".to_owned());
        for (field, detected) in discovery.detected.iter() {
            lines.push(format!(
                " - {field}: {}.{} (alias: {})",
                detected.table, detected.column, detected.alias
            ));
        }
    } else {
        lines.push(format!(
            "Warning: could not find all required fields: {}",
            discovery.missing.join(", ")
        ));
    }
    lines
}
