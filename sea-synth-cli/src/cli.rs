use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "sea-synth",
    version,
    author,
    about = "Locate business fields in a live schema and synthesize the join query",
    arg_required_else_help = true
)]
pub struct Cli {
    #[arg(global = true, short = 'v', long, help = "Show debug messages")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, PartialEq, Eq, Debug)]
pub enum Commands {
    #[command(
        about = "Resolve the configured fields and joins, then write the query and the schema report"
    )]
    Generate(GenerateArgs),

    #[command(about = "Detect the configured fields by candidate column names across all tables")]
    Discover(DiscoverArgs),

    #[command(about = "Job file related commands", arg_required_else_help = true)]
    Config {
        #[command(subcommand)]
        command: ConfigSubcommands,
    },
}

#[derive(Args, PartialEq, Eq, Debug)]
pub struct GenerateArgs {
    #[arg(
        short = 'c',
        long,
        env = "SEA_SYNTH_CONFIG",
        help = "Job file, defaults to `sea-synth.toml` in the current or parent directory"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        env = "SEA_SYNTH_CATALOG",
        help = "Json snapshot of the schema catalog, overrides `catalog.snapshot`"
    )]
    pub catalog: Option<PathBuf>,

    #[arg(short = 'o', long, help = "Query output file, overrides `output.query`")]
    pub output: Option<PathBuf>,

    #[arg(long, help = "Schema report output file, overrides `output.report`")]
    pub report: Option<PathBuf>,

    #[arg(long, help = "Fail when a field or a join cannot be resolved")]
    pub strict: bool,
}

#[derive(Args, PartialEq, Eq, Debug)]
pub struct DiscoverArgs {
    #[arg(
        short = 'c',
        long,
        env = "SEA_SYNTH_CONFIG",
        help = "Job file, defaults to `sea-synth.toml` in the current or parent directory"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        env = "SEA_SYNTH_CATALOG",
        help = "Json snapshot of the schema catalog, overrides `catalog.snapshot`"
    )]
    pub catalog: Option<PathBuf>,
}

#[derive(Subcommand, PartialEq, Eq, Debug)]
pub enum ConfigSubcommands {
    #[command(about = "Create a `sea-synth.toml` job file in the current directory")]
    Init {
        #[arg(long, help = "Overwrite an existing job file")]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_generate() {
        let cli = Cli::parse_from([
            "sea-synth",
            "generate",
            "--config",
            "jobs/invoice.toml",
            "--catalog",
            "catalog.json",
            "-o",
            "out.sql",
            "--strict",
        ]);

        assert!(!cli.verbose);
        assert_eq!(
            cli.command,
            Commands::Generate(GenerateArgs {
                config: Some("jobs/invoice.toml".into()),
                catalog: Some("catalog.json".into()),
                output: Some("out.sql".into()),
                report: None,
                strict: true,
            })
        );
    }

    #[test]
    fn verbose_after_subcommand() {
        let cli = Cli::parse_from(["sea-synth", "discover", "--catalog", "catalog.json", "-v"]);

        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Discover(_)));
    }

    #[test]
    fn parse_config_init() {
        let cli = Cli::parse_from(["sea-synth", "config", "init", "--force"]);

        assert_eq!(
            cli.command,
            Commands::Config {
                command: ConfigSubcommands::Init { force: true }
            }
        );
    }
}
