use std::path::Path;
use std::{error::Error, fs};

use crate::{CONFIG_FILE, ConfigSubcommands};

const CONFIG_TEMPLATE: &str = include_str!("../../template/sea-synth.toml");

pub fn run_config_command(command: ConfigSubcommands) -> Result<(), Box<dyn Error>> {
    match command {
        ConfigSubcommands::Init { force } => run_config_init(force),
    }
}

fn run_config_init(force: bool) -> Result<(), Box<dyn Error>> {
    let config_path = Path::new(CONFIG_FILE);
    write_config_template(config_path, force)?;

    println!("Job file created at {}", config_path.display());
    Ok(())
}

pub fn write_config_template(config_path: &Path, force: bool) -> Result<(), Box<dyn Error>> {
    if config_path.exists() && !force {
        return Err(Box::new(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            "A sea-synth.toml file already exists, use --force to rewrite it",
        )));
    }

    fs::write(config_path, CONFIG_TEMPLATE)?;
    Ok(())
}
