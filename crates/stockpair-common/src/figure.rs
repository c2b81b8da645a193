//! Declarative chart description built from two filtered series.
//!
//! The serialized form follows plotly.js conventions, so the page hands
//! `data` and `layout` straight to `Plotly.react`:
//!
//! ```json
//! {
//!     "data": [
//!         { "type": "candlestick", "x": ["2016-01-04"], "open": [100.0], ... },
//!         { "type": "scatter", "name": "Mean price of AAPL", "mode": "lines", ... }
//!     ],
//!     "layout": { "title": { "text": "Candlestick Plot" }, "width": 1500, ... }
//! }
//! ```

use crate::query::FilteredSeries;
use crate::schema::ChartMode;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const PRICE_TITLE: &str = "Candlestick Plot";
pub const VOLUME_TITLE: &str = "Volume Plot";
pub const Y_AXIS_TITLE: &str = "Stock Price";
pub const WIDTH: u32 = 1500;
pub const HEIGHT: u32 = 1000;
pub const BACKGROUND: &str = "LightSteelBlue";
pub const FIRST_LINE_COLOR: &str = "blue";

///////////////////////////////////////////////////////////////////////////////////////////////////////
//
// Figure
//
///////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct FigureSpec {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

#[cfg(test)]
impl FigureSpec {
    pub(crate) fn title(&self) -> &str {
        &self.layout.title.text
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Candlestick(Candlestick),
    Scatter(Scatter),
}

#[cfg(test)]
impl Trace {
    pub(crate) fn name(&self) -> Option<&str> {
        match self {
            Trace::Candlestick(_) => None,
            Trace::Scatter(scatter) => Some(&scatter.name),
        }
    }

    /// Number of points plotted.
    pub(crate) fn len(&self) -> usize {
        match self {
            Trace::Candlestick(candles) => candles.x.len(),
            Trace::Scatter(scatter) => scatter.x.len(),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Open/high/low/close per date.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Candlestick {
    pub x: Vec<NaiveDate>,
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
    pub showlegend: bool,
}

/// A line series.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Scatter {
    pub x: Vec<NaiveDate>,
    pub y: Vec<f64>,
    pub name: String,
    pub mode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<LineStyle>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct LineStyle {
    pub color: String,
}

// -------------------------------------------------------------------------------------------------

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Layout {
    pub title: Title,
    pub yaxis: Axis,
    pub autosize: bool,
    pub width: u32,
    pub height: u32,
    pub margin: Margin,
    pub paper_bgcolor: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Title {
    pub text: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Axis {
    pub title: Title,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Margin {
    pub l: u32,
    pub r: u32,
    pub b: u32,
    pub t: u32,
    pub pad: u32,
}

impl Layout {
    fn new(title: &str) -> Self {
        Self {
            title: Title {
                text: title.to_string(),
            },
            yaxis: Axis {
                title: Title {
                    text: Y_AXIS_TITLE.to_string(),
                },
            },
            autosize: true,
            width: WIDTH,
            height: HEIGHT,
            margin: Margin {
                l: 50,
                r: 50,
                b: 100,
                t: 100,
                pad: 4,
            },
            paper_bgcolor: BACKGROUND.to_string(),
        }
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////////
//
// Builder
//
///////////////////////////////////////////////////////////////////////////////////////////////////////

/// Builds the comparison chart of `series_a` against `series_b`.
///
/// Empty series still produce their traces, with empty arrays.
pub fn build(
    series_a: &FilteredSeries,
    series_b: &FilteredSeries,
    symbol_a: &str,
    symbol_b: &str,
    mode: ChartMode,
) -> FigureSpec {
    match mode {
        ChartMode::Price => FigureSpec {
            data: vec![
                candlestick(series_a),
                candlestick(series_b),
                line(
                    series_a,
                    series_a.means().to_vec(),
                    format!("Mean price of {symbol_a}"),
                    Some(FIRST_LINE_COLOR),
                ),
                line(
                    series_b,
                    series_b.means().to_vec(),
                    format!("Mean price of {symbol_b}"),
                    None,
                ),
            ],
            layout: Layout::new(PRICE_TITLE),
        },
        ChartMode::Volume => FigureSpec {
            data: vec![
                line(
                    series_a,
                    volumes(series_a),
                    format!("Volume of {symbol_a}"),
                    Some(FIRST_LINE_COLOR),
                ),
                line(
                    series_b,
                    volumes(series_b),
                    format!("Volume of {symbol_b}"),
                    None,
                ),
            ],
            layout: Layout::new(VOLUME_TITLE),
        },
    }
}

fn candlestick(series: &FilteredSeries) -> Trace {
    let records = series.records();
    Trace::Candlestick(Candlestick {
        x: series.dates().collect(),
        open: records.iter().map(|r| r.open).collect(),
        high: records.iter().map(|r| r.high).collect(),
        low: records.iter().map(|r| r.low).collect(),
        close: records.iter().map(|r| r.close).collect(),
        showlegend: false,
    })
}

fn line(series: &FilteredSeries, y: Vec<f64>, name: String, color: Option<&str>) -> Trace {
    Trace::Scatter(Scatter {
        x: series.dates().collect(),
        y,
        name,
        mode: "lines".to_string(),
        line: color.map(|color| LineStyle {
            color: color.to_string(),
        }),
    })
}

fn volumes(series: &FilteredSeries) -> Vec<f64> {
    series
        .records()
        .iter()
        .map(|record| record.volume as f64)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::filter;
    use crate::schema::PriceRecord;
    use crate::table::PriceTable;

    fn table() -> PriceTable {
        let day = |d: u32| NaiveDate::from_ymd_opt(2016, 1, d).unwrap();
        PriceTable::new(vec![
            PriceRecord {
                symbol: "AAPL".to_string(),
                date: day(4),
                open: 100.0,
                high: 105.0,
                low: 95.0,
                close: 102.0,
                volume: 1000,
            },
            PriceRecord {
                symbol: "MSFT".to_string(),
                date: day(5),
                open: 54.3,
                high: 54.8,
                low: 53.4,
                close: 54.8,
                volume: 53_778_000,
            },
        ])
    }

    #[test]
    fn price_mode_has_two_candlesticks_and_two_mean_lines() {
        let table = table();
        let (a, b) = (filter(&table, "AAPL", 2016), filter(&table, "MSFT", 2016));
        let figure = build(&a, &b, "AAPL", "MSFT", ChartMode::Price);

        assert_eq!(figure.title(), PRICE_TITLE);
        assert_eq!(figure.data.len(), 4);
        assert!(matches!(figure.data[0], Trace::Candlestick(_)));
        assert!(matches!(figure.data[1], Trace::Candlestick(_)));
        assert_eq!(figure.data[2].name(), Some("Mean price of AAPL"));
        assert_eq!(figure.data[3].name(), Some("Mean price of MSFT"));

        let Trace::Candlestick(candles) = &figure.data[0] else {
            panic!("expected a candlestick trace");
        };
        assert!(!candles.showlegend);
        assert_eq!(candles.open, [100.0]);
        assert_eq!(candles.close, [102.0]);
    }

    #[test]
    fn mean_lines_use_their_own_dates() {
        let table = table();
        let (a, b) = (filter(&table, "AAPL", 2016), filter(&table, "MSFT", 2016));
        let figure = build(&a, &b, "AAPL", "MSFT", ChartMode::Price);

        let (Trace::Scatter(mean_a), Trace::Scatter(mean_b)) = (&figure.data[2], &figure.data[3])
        else {
            panic!("expected two line traces");
        };
        assert_eq!(mean_a.x, [NaiveDate::from_ymd_opt(2016, 1, 4).unwrap()]);
        assert_eq!(mean_a.y, [100.0]);
        assert_eq!(mean_b.x, [NaiveDate::from_ymd_opt(2016, 1, 5).unwrap()]);
        assert_eq!(mean_a.line.as_ref().map(|l| l.color.as_str()), Some("blue"));
        assert!(mean_b.line.is_none());
    }

    #[test]
    fn volume_mode_has_one_point_per_record() {
        let table = table();
        let (a, b) = (filter(&table, "AAPL", 2016), filter(&table, "MSFT", 2016));
        let figure = build(&a, &b, "AAPL", "MSFT", ChartMode::Volume);

        assert_eq!(figure.title(), VOLUME_TITLE);
        assert_eq!(figure.data.len(), 2);
        assert!(figure.data.iter().all(|t| matches!(t, Trace::Scatter(_))));
        assert!(figure.data.iter().all(|t| t.len() == 1));
        assert_eq!(figure.data[0].name(), Some("Volume of AAPL"));
        assert_eq!(figure.data[1].name(), Some("Volume of MSFT"));

        let Trace::Scatter(volume_b) = &figure.data[1] else {
            panic!("expected a line trace");
        };
        assert_eq!(volume_b.y, [53_778_000.0]);
    }

    #[test]
    fn empty_series_keep_their_traces() {
        let table = table();
        let (a, b) = (filter(&table, "AAPL", 2020), filter(&table, "NOPE", 2016));

        let price = build(&a, &b, "AAPL", "NOPE", ChartMode::Price);
        assert_eq!(price.data.len(), 4);
        assert!(price.data.iter().all(Trace::is_empty));

        let volume = build(&a, &b, "AAPL", "NOPE", ChartMode::Volume);
        assert_eq!(volume.data.len(), 2);
        assert!(volume.data.iter().all(Trace::is_empty));
    }

    #[test]
    fn layout_is_fixed_across_modes() {
        let table = table();
        let a = filter(&table, "AAPL", 2016);
        for mode in ChartMode::ALL {
            let layout = build(&a, &a, "AAPL", "AAPL", mode).layout;
            assert_eq!(layout.yaxis.title.text, Y_AXIS_TITLE);
            assert_eq!((layout.width, layout.height), (1500, 1000));
            assert_eq!(
                layout.margin,
                Margin {
                    l: 50,
                    r: 50,
                    b: 100,
                    t: 100,
                    pad: 4
                }
            );
            assert_eq!(layout.paper_bgcolor, BACKGROUND);
        }
    }

    #[test]
    fn identical_inputs_build_identical_figures() {
        let table = table();
        let (a, b) = (filter(&table, "AAPL", 2016), filter(&table, "MSFT", 2016));
        for mode in ChartMode::ALL {
            assert_eq!(
                build(&a, &b, "AAPL", "MSFT", mode),
                build(&a, &b, "AAPL", "MSFT", mode)
            );
        }
    }

    #[test]
    fn serializes_in_plotly_shape() {
        let table = table();
        let a = filter(&table, "AAPL", 2016);
        let json = serde_json::to_value(build(&a, &a, "AAPL", "AAPL", ChartMode::Price)).unwrap();

        assert_eq!(json["data"][0]["type"], "candlestick");
        assert_eq!(json["data"][0]["x"][0], "2016-01-04");
        assert_eq!(json["data"][2]["type"], "scatter");
        assert_eq!(json["data"][2]["line"]["color"], "blue");
        assert!(json["data"][3].get("line").is_none());
        assert_eq!(json["layout"]["title"]["text"], "Candlestick Plot");
        assert_eq!(json["layout"]["margin"]["pad"], 4);
    }
}
