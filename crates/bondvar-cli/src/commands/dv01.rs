//! DV01 command implementation.
//!
//! Computes finite-difference DV01 for each instrument and shows the rows
//! on which every instrument has a usable value.

use anyhow::Result;
use clap::Args;

use crate::cli::OutputFormat;
use crate::commands::{Context, RiskOverrides};
use crate::error::CliError;
use crate::output::{format_csv_value, format_value, print_header, print_json, Grid};

/// Arguments for the dv01 command.
#[derive(Args, Debug)]
pub struct Dv01Args {
    /// Cover only the first N instruments
    #[arg(long)]
    pub limit: Option<usize>,

    /// Omit the per-date rows and show only the averages
    #[arg(long)]
    pub summary: bool,

    #[command(flatten)]
    pub overrides: RiskOverrides,
}

/// Execute the dv01 command.
pub fn execute(args: Dv01Args, ctx: &Context) -> Result<()> {
    let mut config = ctx.load_config()?;
    args.overrides.apply(&mut config)?;
    if let Some(limit) = args.limit {
        if limit == 0 {
            return Err(CliError::InvalidArgument("--limit must be positive".to_string()).into());
        }
        config.risk.dv01_instrument_limit = Some(limit);
    }

    let mut portfolio = ctx.hydrated_portfolio(&config)?;
    let summary = portfolio.dv01_summary()?;

    if ctx.format == OutputFormat::Json {
        return print_json(&summary);
    }

    let csv = ctx.format == OutputFormat::Csv;
    let cell = |v: Option<f64>| if csv { format_csv_value(v) } else { format_value(v, 4) };

    let mut headers = vec!["date".to_string()];
    headers.extend(summary.instruments.iter().cloned());
    let mut grid = Grid::new(headers);

    if !args.summary {
        for row in &summary.rows {
            let mut cells = vec![row.date.to_string()];
            cells.extend(row.values.iter().map(|v| cell(Some(*v))));
            grid.push(cells);
        }
    }
    if !csv {
        let mut cells = vec!["average".to_string()];
        cells.extend(summary.averages.iter().map(|v| cell(*v)));
        grid.push(cells);
    }

    if ctx.show_headers() {
        print_header(&format!(
            "DV01: {} ({} of {} rows usable)",
            portfolio.name(),
            summary.rows.len(),
            portfolio.cached_table().map_or(0, |t| t.len())
        ));
    }
    grid.print(ctx.format)
}
