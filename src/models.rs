use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// One bar: a category label and its percentage value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryDatum {
    pub label: String,
    /// Percentage in `[0, 100]`. Malformed input is carried as `NaN`, which JSON
    /// writes as `null`.
    #[serde(deserialize_with = "lenient_value")]
    pub value: f64,
}

impl CategoryDatum {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Accepts a number, a numeric string, or `null`/non-numeric text as `NaN`.
fn lenient_value<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(v)) => v,
        Some(Raw::Text(s)) => parse_value(&s),
        None => f64::NAN,
    })
}

/// One observation of the time series (monthly resolution).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeSeriesDatum {
    /// First day of the observed month.
    pub date: NaiveDate,
    /// `None` marks a missing observation; the line breaks there.
    pub rate: Option<f64>,
}

impl TimeSeriesDatum {
    /// Rate usable for drawing (`None` for missing or NaN).
    pub fn defined_rate(&self) -> Option<f64> {
        self.rate.filter(|r| !r.is_nan())
    }
}

/// Which chart the view shell has mounted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartKind {
    #[default]
    Bar,
    Line,
}

/// Parse a rate cell. Empty or non-numeric text is a missing observation.
pub fn parse_rate(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Parse a percentage cell. No validation: anything unparsable becomes `NaN`.
pub fn parse_value(s: &str) -> f64 {
    s.trim().parse::<f64>().unwrap_or(f64::NAN)
}

/// Parse a month label such as `"Jan 1969"` into the first day of that month.
pub fn parse_month(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("1 {}", s.trim()), "%d %b %Y").ok()
}

/// Inverse of [`parse_month`].
pub fn format_month(date: NaiveDate) -> String {
    date.format("%b %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_labels_parse_to_first_of_month() {
        let d = parse_month("Jan 1969").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(1969, 1, 1).unwrap());
        assert_eq!(format_month(d), "Jan 1969");
        assert!(parse_month("Janvier 1969").is_none());
        assert!(parse_month("").is_none());
    }

    #[test]
    fn rates_and_values() {
        assert_eq!(parse_rate(" 3.4 "), Some(3.4));
        assert_eq!(parse_rate(""), None);
        assert_eq!(parse_rate("n/a"), None);
        assert_eq!(parse_rate("NaN"), None);
        assert_eq!(parse_value("78.9"), 78.9);
        assert!(parse_value("lots").is_nan());
    }

    #[test]
    fn json_values_are_read_leniently() {
        let rows: Vec<CategoryDatum> = serde_json::from_str(
            r#"[{"label":"a","value":1.5},{"label":"b","value":"2"},
                {"label":"c","value":null},{"label":"d","value":"lots"}]"#,
        )
        .unwrap();
        assert_eq!(rows[0].value, 1.5);
        assert_eq!(rows[1].value, 2.0);
        assert!(rows[2].value.is_nan());
        assert!(rows[3].value.is_nan());
    }
}
