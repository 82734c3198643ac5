//! BondVar CLI - Portfolio VaR and DV01 for weighted bond-index baskets.
//!
//! # Usage
//!
//! ```bash
//! # VaR at 99% and 95%, both methods, standard ICE BofA basket
//! bondvar --storage ./storage var
//!
//! # Historical VaR only, from a long-format series file
//! bondvar --data series.csv var --method historical --confidence 97.5
//!
//! # DV01 per instrument as CSV
//! bondvar --data series.csv --format csv dv01
//!
//! # All weighting scenarios of a config file
//! bondvar --config bondvar.toml --storage ./storage scenarios
//!
//! # Write the standard configuration
//! bondvar config init bondvar.toml
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};
use commands::Context;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let ctx = Context {
        format: cli.format,
        quiet: cli.quiet,
        input: cli.input,
    };

    // Execute command
    match cli.command {
        Commands::Var(args) => commands::var::execute(args, &ctx)?,
        Commands::Dv01(args) => commands::dv01::execute(args, &ctx)?,
        Commands::Table(args) => commands::table::execute(args, &ctx)?,
        Commands::Scenarios(args) => commands::scenarios::execute(args, &ctx)?,
        Commands::Config(args) => commands::config::execute(args, &ctx)?,
    }

    Ok(())
}

/// Logs go to stderr so stdout stays parseable.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}
