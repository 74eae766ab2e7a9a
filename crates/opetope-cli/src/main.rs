//! Opetope CLI: the `opetope` command.

mod cli;
mod commands;
mod config;
mod support;
mod syntax;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = support::load_config_or_exit(cli.config.as_deref());

    match cli.command {
        Commands::Eval { expr, file, render } => commands::eval::run(expr, file, render, &config),

        Commands::Tex { expr, no_contexts } => commands::tex::run(expr, no_contexts, &config),

        Commands::Example { name, list, render } => {
            commands::example::run(name, list, render, &config)
        }
    }
}

/// Logs go to stderr so that stdout stays parseable. `OPETOPE_LOG` takes
/// an `EnvFilter` directive, e.g. `OPETOPE_LOG=opetope_kernel::rules=trace`.
fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false)
                .without_time(),
        )
        .with(EnvFilter::try_from_env("OPETOPE_LOG").unwrap_or_else(|_| EnvFilter::new(fallback)))
        .init();
}
