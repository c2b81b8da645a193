use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

/// Format of the `date` column, e.g., `2016-01-04`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Transform a date String (= "2016-01-04") into a `NaiveDate`.
pub fn de_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|e| {
        serde::de::Error::custom(format!(
            "invalid date {value:?}, expected format YYYY-MM-DD: {e}"
        ))
    })
}

/// Market data dumps often write volume as a float, as below:
///
/// ```text
/// 2163600.0
/// ```
///
/// `de_volume` accepts both that and a plain integer, but rejects anything
/// with a fractional part.
pub fn de_volume<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    let value = value.trim();

    // if it's an integer, then Ok()
    if let Ok(int) = value.parse::<i64>() {
        return Ok(int);
    }

    // else it must be an integral float within i64 range
    match value.parse::<f64>() {
        Ok(float)
            if float.is_finite()
                && float.fract() == 0.0
                && float >= i64::MIN as f64
                && float < i64::MAX as f64 =>
        {
            Ok(float as i64)
        }
        _ => Err(serde::de::Error::custom(format!(
            "invalid volume {value:?}, expected a whole number"
        ))),
    }
}
