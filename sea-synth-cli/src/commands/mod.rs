use std::fmt::Display;
use tracing_subscriber::{EnvFilter, prelude::*};

pub mod config;
pub mod discover;
pub mod generate;

pub use config::*;
pub use discover::*;
pub use generate::*;

pub fn handle_error<E>(error: E)
where
    E: Display,
{
    eprintln!("{error}");
    ::std::process::exit(1);
}

/// Debug output of every crate when `verbose`, otherwise the info messages of
/// the synthesizer without decoration
pub fn init_tracing(verbose: bool) {
    if verbose {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    } else {
        let filter_layer = EnvFilter::new("sea_synth=info");
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_level(false)
            .without_time();

        let _ = tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer)
            .try_init();
    }
}
