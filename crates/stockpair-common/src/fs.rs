use crate::error::LoadError;
use crate::table::PriceTable;
use std::path::Path;
use tracing::{debug, error};

/// Reads a `.csv` price dataset from `path` without blocking the runtime
/// on file I/O.
///
/// ```rust,no_run
/// # async fn run() -> Result<(), stockpair_common::LoadError> {
/// let table = stockpair_common::fs::read_table("data/stock_prices.csv").await?;
/// # Ok(())
/// # }
/// ```
pub async fn read_table(path: impl AsRef<Path>) -> Result<PriceTable, LoadError> {
    let path = path.as_ref();
    debug!("reading dataset {}", path.display());

    let bytes = tokio::fs::read(path).await.map_err(|source| {
        error!("failed to read dataset at {}: {source}", path.display());
        LoadError::Open {
            path: path.to_path_buf(),
            source,
        }
    })?;

    PriceTable::from_reader(bytes.as_slice(), path)
}
