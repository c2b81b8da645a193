use crate::error::LoadError;
use crate::schema::PriceRecord;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::io;
use std::path::Path;
use tracing::{debug, error, info, trace};

/// Columns the header row must name; any others are ignored.
pub const REQUIRED_COLUMNS: [&str; 7] = ["symbol", "date", "open", "high", "low", "close", "volume"];

/// The whole dataset, held in memory and never mutated after construction.
///
/// Row order is file order. Alongside the rows the table keeps an index of
/// `symbol -> year -> row positions`, so a (symbol, year) lookup never
/// rescans the rows.
#[derive(Debug, Clone, Default)]
pub struct PriceTable {
    records: Vec<PriceRecord>,
    index: HashMap<String, BTreeMap<i32, Vec<usize>>>,
    symbols: Vec<String>,
    years: Vec<i32>,
}

impl PriceTable {
    pub fn new(records: Vec<PriceRecord>) -> Self {
        let mut index: HashMap<String, BTreeMap<i32, Vec<usize>>> = HashMap::new();
        let mut years = BTreeSet::new();

        for (position, record) in records.iter().enumerate() {
            index
                .entry(record.symbol.clone())
                .or_default()
                .entry(record.year())
                .or_default()
                .push(position);
            years.insert(record.year());
        }

        let mut symbols: Vec<String> = index.keys().cloned().collect();
        symbols.sort();

        Self {
            records,
            index,
            symbols,
            years: years.into_iter().collect(),
        }
    }

    /// Reads the CSV file at `path`.
    ///
    /// ```rust,no_run
    /// let table = stockpair_common::PriceTable::load("data/stock_prices.csv")?;
    /// # Ok::<(), stockpair_common::LoadError>(())
    /// ```
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| {
            error!("failed to open dataset at {}: {source}", path.display());
            LoadError::Open {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Self::from_reader(file, path)
    }

    /// Parses CSV from any reader; `path` only labels errors and logs.
    pub fn from_reader<R: io::Read>(reader: R, path: &Path) -> Result<Self, LoadError> {
        let time = std::time::Instant::now();
        let parse_error = |source: csv::Error| LoadError::Parse {
            path: path.to_path_buf(),
            line: source.position().map_or(0, |pos| pos.line()),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        // check the header row before touching any record
        let headers = reader.headers().map_err(parse_error)?.clone();
        if headers.is_empty() {
            error!("dataset {} is empty", path.display());
            return Err(LoadError::Empty {
                path: path.to_path_buf(),
            });
        }
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|header| header == column) {
                error!("dataset {} has no `{column}` column", path.display());
                return Err(LoadError::MissingColumn {
                    path: path.to_path_buf(),
                    column,
                });
            }
        }
        trace!("dataset header: {headers:?}");

        let records = reader
            .deserialize::<PriceRecord>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| {
                let e = parse_error(e);
                error!("{e}");
                e
            })?;

        if records.is_empty() {
            error!("dataset {} contains no records", path.display());
            return Err(LoadError::Empty {
                path: path.to_path_buf(),
            });
        }

        let table = Self::new(records);
        info!(
            "Loaded {} rows ({} symbols, years {:?}..={:?}) from {}",
            table.len(),
            table.symbols.len(),
            table.years.first(),
            table.years.last(),
            path.display(),
        );
        debug!(
            "dataset parsed & indexed. Elapsed time: {} ms",
            time.elapsed().as_millis()
        );

        Ok(table)
    }

    pub fn records(&self) -> &[PriceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Unique symbols, sorted lexicographically.
    pub fn distinct_symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Unique calendar years of the `date` column, ascending.
    pub fn distinct_years(&self) -> &[i32] {
        &self.years
    }

    pub fn contains_symbol(&self, symbol: &str) -> bool {
        self.index.contains_key(symbol)
    }

    /// Positions (ascending) of the rows for `symbol` dated within `year`.
    pub(crate) fn positions(&self, symbol: &str, year: i32) -> &[usize] {
        self.index
            .get(symbol)
            .and_then(|years| years.get(&year))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CSV: &str = "\
symbol,date,open,high,low,close,volume
MSFT,2016-01-04,54.3,54.8,53.4,54.8,53778000
AAPL,2016-01-04,100.0,105.0,95.0,102.0,1000
AAPL,2017-01-03,115.8,116.3,114.8,116.1,28781900
";

    fn from_str(csv: &str) -> Result<PriceTable, LoadError> {
        PriceTable::from_reader(csv.as_bytes(), Path::new("test.csv"))
    }

    #[test]
    fn loads_rows_in_file_order() {
        let table = from_str(CSV).unwrap();
        let symbols: Vec<&str> = table.records().iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(symbols, ["MSFT", "AAPL", "AAPL"]);
        assert_eq!(table.records()[1].volume, 1000);
    }

    #[test]
    fn distinct_symbols_are_sorted_and_deduplicated() {
        let table = from_str(CSV).unwrap();
        assert_eq!(table.distinct_symbols(), ["AAPL", "MSFT"]);
        assert!(table.contains_symbol("AAPL"));
        assert!(!table.contains_symbol("aapl"));
    }

    #[test]
    fn distinct_years_are_ascending() {
        let table = from_str(CSV).unwrap();
        assert_eq!(table.distinct_years(), [2016, 2017]);
    }

    #[test]
    fn accepts_reordered_and_extra_columns() {
        let csv = "\
date,symbol,exchange,open,close,low,high,volume
2016-01-05,GOOG,NASDAQ,730.0,742.6,721.0,743.0,2163600.0
";
        let table = from_str(csv).unwrap();
        let record = &table.records()[0];
        assert_eq!(record.symbol, "GOOG");
        assert_eq!(record.high, 743.0);
        assert_eq!(record.volume, 2_163_600);
    }

    #[test]
    fn missing_column_is_reported_by_name() {
        let csv = "symbol,date,open,high,low,close\nAAPL,2016-01-04,1,2,0.5,1.5\n";
        match from_str(csv) {
            Err(LoadError::MissingColumn { column, .. }) => assert_eq!(column, "volume"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn bad_date_is_a_parse_error_with_line() {
        let csv = "\
symbol,date,open,high,low,close,volume
AAPL,2016-01-04,1,2,0.5,1.5,10
AAPL,04/01/2016,1,2,0.5,1.5,10
";
        match from_str(csv) {
            Err(LoadError::Parse { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected Parse, got {other:?}"),
        }
    }

    #[test]
    fn short_row_is_a_parse_error() {
        let csv = "symbol,date,open,high,low,close,volume\nAAPL,2016-01-04,1,2\n";
        assert!(matches!(from_str(csv), Err(LoadError::Parse { .. })));
    }

    #[test]
    fn zero_byte_file_is_empty() {
        assert!(matches!(from_str(""), Err(LoadError::Empty { .. })));
    }

    #[test]
    fn header_only_file_is_empty() {
        let csv = "symbol,date,open,high,low,close,volume\n";
        assert!(matches!(from_str(csv), Err(LoadError::Empty { .. })));
    }

    #[test]
    fn load_reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CSV.as_bytes()).unwrap();
        let table = PriceTable::load(file.path()).unwrap();
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn load_of_missing_file_is_an_open_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = PriceTable::load(dir.path().join("nope.csv"));
        assert!(matches!(result, Err(LoadError::Open { .. })));
    }
}
