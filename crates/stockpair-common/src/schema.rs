use crate::de::{de_date, de_volume};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

///////////////////////////////////////////////////////////////////////////////////////////////////////
//
// Dataset rows
//
///////////////////////////////////////////////////////////////////////////////////////////////////////

/// One daily price row of the dataset, as below:
///
/// ```csv
/// symbol,date,open,high,low,close,volume
/// AAPL,2016-01-04,100.0,105.0,95.0,102.0,1000
/// ```
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct PriceRecord {
    pub symbol: String,
    #[serde(deserialize_with = "de_date")]
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(deserialize_with = "de_volume")]
    pub volume: i64,
}

impl PriceRecord {
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// Arithmetic mean of the day's high and low.
    pub fn mean_price(&self) -> f64 {
        (self.high + self.low) / 2.0
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////////
//
// User selection
//
///////////////////////////////////////////////////////////////////////////////////////////////////////

/// What the chart area shows.
#[derive(Deserialize, Serialize, Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ChartMode {
    /// Candlesticks plus the mean price line of each symbol
    #[default]
    #[serde(rename = "open-close")]
    Price,

    /// Traded volume line of each symbol
    #[serde(rename = "volume")]
    Volume,
}

impl ChartMode {
    pub const ALL: [ChartMode; 2] = [ChartMode::Price, ChartMode::Volume];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartMode::Price => "open-close",
            ChartMode::Volume => "volume",
        }
    }
}

impl fmt::Display for ChartMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown chart mode {0:?}, expected \"open-close\" or \"volume\"")]
pub struct UnknownChartMode(pub String);

impl FromStr for ChartMode {
    type Err = UnknownChartMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open-close" => Ok(ChartMode::Price),
            "volume" => Ok(ChartMode::Volume),
            other => Err(UnknownChartMode(other.to_string())),
        }
    }
}

/// The four values held by the page's widgets.
///
/// Serialized field names double as the query parameters of `/api/figure`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub symbol_a: String,
    pub symbol_b: String,
    pub year: i32,
    pub mode: ChartMode,
}
