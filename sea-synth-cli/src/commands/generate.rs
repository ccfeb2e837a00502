use sea_synth::{Catalog, QueryGenerator};
use std::error::Error;

use crate::{GenerateArgs, get_config};

pub fn run_generate_command(args: GenerateArgs) -> Result<(), Box<dyn Error>> {
    let config = get_config(args.config.as_deref())?;
    let catalog_path = config.catalog_path(args.catalog)?;
    let query_path = config.query_path(args.output);
    let report_path = config.report_path(args.report);

    let catalog = Catalog::from_json_file(&catalog_path)?;
    println!(
        "Loaded {} columns and {} foreign keys from {}",
        catalog.columns.len(),
        catalog.foreign_keys.len(),
        catalog_path.display()
    );

    let generator = QueryGenerator::new(config.query).strict(args.strict);
    let resolution = generator.resolve(&catalog)?;

    let report = resolution.report();
    report.write_to(&report_path)?;
    println!("Schema report written to {}", report_path.display());
    if !report.is_clean() {
        println!(
            "Some fields or joins could not be resolved, see {}",
            report_path.display()
        );
    }

    let query = resolution.synthesize()?;
    query.write_to(&query_path)?;
    println!("SQL query written to {}", query_path.display());

    Ok(())
}
