use clap::Parser;
use dotenvy::dotenv;
use sea_synth_cli::{
    Cli, Commands, handle_error, init_tracing, run_config_command, run_discover_command,
    run_generate_command,
};

fn main() {
    dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Generate(args) => run_generate_command(args).unwrap_or_else(handle_error),
        Commands::Discover(args) => run_discover_command(args).unwrap_or_else(handle_error),
        Commands::Config { command } => run_config_command(command).unwrap_or_else(handle_error),
    }
}
