//! Errors raised while loading the price dataset.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to turn a CSV file into a [`PriceTable`](crate::PriceTable).
///
/// Every variant is fatal at startup; the caller reports it and exits.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be opened or read
    #[error("failed to open dataset {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The header row lacks one of the required columns
    #[error("dataset {} is missing required column `{column}`", .path.display())]
    MissingColumn { path: PathBuf, column: &'static str },

    /// A row could not be parsed (bad number, bad date, wrong field count)
    #[error("failed to parse dataset {} at line {line}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        line: u64,
        #[source]
        source: csv::Error,
    },

    /// The file is blank, or has a valid header but no records
    #[error("dataset {} contains no records", .path.display())]
    Empty { path: PathBuf },
}
