//! CLI error types.

use std::path::PathBuf;

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Neither `--data` nor `--storage` was given.
    #[error("No data source. Pass --data <series.csv> or --storage <dir>.")]
    NoDataSource,

    /// A series source could not be opened.
    #[error("Cannot open data source {}: {message}", .path.display())]
    DataSource {
        /// File or directory given.
        path: PathBuf,
        /// Underlying error message.
        message: String,
    },

    /// A command-line value is unusable.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An output file already exists.
    #[error("{} already exists. Use --force to overwrite.", .0.display())]
    AlreadyExists(PathBuf),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
