//! Table command implementation.
//!
//! Shows the combined metrics table: the portfolio aggregates, or every
//! column of one instrument.

use anyhow::Result;
use clap::Args;

use bondvar_core::{Column, CombinedTable};

use crate::cli::OutputFormat;
use crate::commands::{Context, RiskOverrides};
use crate::error::CliError;
use crate::output::{format_csv_value, format_value, print_header, Grid};

/// Arguments for the table command.
#[derive(Args, Debug)]
pub struct TableArgs {
    /// Show this instrument's columns instead of the aggregates
    #[arg(short, long)]
    pub instrument: Option<String>,

    /// Only the last N rows
    #[arg(long)]
    pub tail: Option<usize>,

    /// Include the DV01 column (instrument view)
    #[arg(long)]
    pub dv01: bool,

    #[command(flatten)]
    pub overrides: RiskOverrides,
}

/// Execute the table command.
pub fn execute(args: TableArgs, ctx: &Context) -> Result<()> {
    let mut config = ctx.load_config()?;
    args.overrides.apply(&mut config)?;

    let mut portfolio = ctx.hydrated_portfolio(&config)?;
    let portfolio_name = portfolio.name().to_string();
    if args.dv01 {
        portfolio.calc_portfolio_dv01()?;
    }
    let table = portfolio.combined_table()?;

    let (headers, columns) = match &args.instrument {
        Some(name) => instrument_columns(table, name, args.dv01)?,
        None => (
            vec!["total_weighted_return".to_string(), "total_weighted_px".to_string()],
            vec![
                table.total_weighted_return().to_vec(),
                table.total_weighted_px().to_vec(),
            ],
        ),
    };

    let csv = ctx.format == OutputFormat::Csv;
    let mut grid = Grid::new(std::iter::once("date".to_string()).chain(headers).collect());
    let skip = args.tail.map_or(0, |n| table.len().saturating_sub(n));
    for (i, date) in table.dates().iter().enumerate().skip(skip) {
        let mut cells = vec![date.to_string()];
        cells.extend(columns.iter().map(|col| {
            if csv {
                format_csv_value(col[i])
            } else {
                format_value(col[i], 6)
            }
        }));
        grid.push(cells);
    }

    if ctx.show_headers() {
        let title = match &args.instrument {
            Some(name) => format!("{name} ({} rows)", table.len()),
            None => format!(
                "{portfolio_name} ({} rows, {})",
                table.len(),
                table.missing_policy()
            ),
        };
        print_header(&title);
    }
    grid.print(ctx.format)
}

fn instrument_columns(
    table: &CombinedTable,
    name: &str,
    with_dv01: bool,
) -> Result<(Vec<String>, Vec<Vec<Option<f64>>>)> {
    if table.instrument(name).is_none() {
        let known: Vec<&str> = table.instrument_names().collect();
        return Err(CliError::InvalidArgument(format!(
            "unknown instrument '{name}' (known: {})",
            known.join(", ")
        ))
        .into());
    }

    let mut headers = Vec::new();
    let mut columns = Vec::new();
    for column in Column::ALL {
        if column == Column::Dv01 && !with_dv01 {
            continue;
        }
        headers.push(column.as_str().to_string());
        columns.push(table.column(name, column)?);
    }
    Ok((headers, columns))
}
