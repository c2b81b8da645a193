use crate::schema::PriceRecord;
use crate::table::PriceTable;
use chrono::NaiveDate;
use tracing::trace;

/// The rows of one (symbol, year) pair, in table order, with the mean price
/// of each row at the same position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredSeries<'a> {
    records: Vec<&'a PriceRecord>,
    means: Vec<f64>,
}

impl<'a> FilteredSeries<'a> {
    pub fn records(&self) -> &[&'a PriceRecord] {
        &self.records
    }

    pub fn means(&self) -> &[f64] {
        &self.means
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.records.iter().map(|record| record.date)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> FromIterator<&'a PriceRecord> for FilteredSeries<'a> {
    fn from_iter<I: IntoIterator<Item = &'a PriceRecord>>(iter: I) -> Self {
        let records: Vec<&PriceRecord> = iter.into_iter().collect();
        let means = records.iter().map(|record| record.mean_price()).collect();
        Self { records, means }
    }
}

/// Selects every row whose symbol equals `symbol` (case-sensitive) and whose
/// date falls in `year`.
///
/// An unknown symbol or year is not an error; it yields an empty series.
pub fn filter<'a>(table: &'a PriceTable, symbol: &str, year: i32) -> FilteredSeries<'a> {
    let records = table.records();
    let series: FilteredSeries = table
        .positions(symbol, year)
        .iter()
        .map(|&position| &records[position])
        .collect();
    trace!("[{symbol}] {year}: {} rows", series.len());
    series
}
