use sea_synth::QueryConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::{error::Error, fs};

pub const CONFIG_FILE: &str = "sea-synth.toml";

/// Content of a `sea-synth.toml` job file
#[derive(Debug, Deserialize)]
pub struct Config {
    pub query: QueryConfig,
    #[serde(default)]
    pub catalog: CatalogSource,
    #[serde(default)]
    pub output: OutputPaths,
    /// Directory holding the job file; relative paths are resolved against it
    #[serde(skip)]
    pub dir: PathBuf,
}

#[derive(Debug, Default, Deserialize)]
pub struct CatalogSource {
    pub snapshot: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
pub struct OutputPaths {
    #[serde(default = "default_query_path")]
    pub query: PathBuf,
    #[serde(default = "default_report_path")]
    pub report: PathBuf,
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self {
            query: default_query_path(),
            report: default_report_path(),
        }
    }
}

fn default_query_path() -> PathBuf {
    PathBuf::from("invoice_query.sql")
}

fn default_report_path() -> PathBuf {
    PathBuf::from("debug_schema.json")
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self, Box<dyn Error>> {
        Ok(toml::from_str(content)?)
    }

    /// Snapshot given on the command line, or the one named in the job file
    pub fn catalog_path(&self, arg: Option<PathBuf>) -> Result<PathBuf, Box<dyn Error>> {
        match (arg, &self.catalog.snapshot) {
            (Some(path), _) => Ok(path),
            (None, Some(path)) => Ok(self.dir.join(path)),
            (None, None) => Err(
                "No catalog snapshot, use `--catalog` or set `catalog.snapshot` in the job file"
                    .into(),
            ),
        }
    }

    pub fn query_path(&self, arg: Option<PathBuf>) -> PathBuf {
        arg.unwrap_or_else(|| self.dir.join(&self.output.query))
    }

    pub fn report_path(&self, arg: Option<PathBuf>) -> PathBuf {
        arg.unwrap_or_else(|| self.dir.join(&self.output.report))
    }
}

/// Load the job file at `path`, or the one found by [`find_config_file`]
pub fn get_config(path: Option<&Path>) -> Result<Config, Box<dyn Error>> {
    let config_path = match path {
        Some(path) => path.to_path_buf(),
        None => find_config_file()?,
    };

    let file_content = fs::read_to_string(&config_path)?;
    let mut config = Config::from_toml_str(&file_content)?;
    config.dir = config_path
        .parent()
        .unwrap_or(Path::new("."))
        .to_path_buf();
    Ok(config)
}

/// The job file is expected to be in the current directory or a parent directory
pub fn find_config_file() -> Result<PathBuf, Box<dyn Error>> {
    let current_dir = std::env::current_dir()?;
    find_config_file_from(&current_dir)
}

pub fn find_config_file_from(dir: &Path) -> Result<PathBuf, Box<dyn Error>> {
    let config_path = dir.join(CONFIG_FILE);
    if config_path.exists() {
        return Ok(config_path);
    }
    if let Some(parent_dir) = dir.parent() {
        let config_path = parent_dir.join(CONFIG_FILE);
        if config_path.exists() {
            return Ok(config_path);
        }
    }
    Err(Box::new(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        "SeaSynth job file not found, use `sea-synth config init` to create one",
    )))
}
