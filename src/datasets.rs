//! Built-in datasets.
//!
//! Both tables are embedded at build time and never loaded from disk or the network.
//! [`crate::storage`] can read replacements from CSV for the CLI.

use crate::error::DatasetError;
use crate::models::{CategoryDatum, TimeSeriesDatum, parse_month, parse_rate};

/// Stack Overflow Developer Survey 2018, "most loved" languages (percent).
const LANGUAGES: [(&str, f64); 10] = [
    ("Rust", 78.9),
    ("Kotlin", 75.1),
    ("Python", 68.0),
    ("TypeScript", 67.0),
    ("Go", 65.6),
    ("Swift", 65.1),
    ("JavaScript", 61.9),
    ("C#", 60.4),
    ("F#", 59.6),
    ("Clojure", 59.6),
];

/// U.S. civilian unemployment rate (percent), January of each year 1969-2019.
const UNEMPLOYMENT: [(&str, &str); 51] = [
    ("Jan 1969", "3.4"),
    ("Jan 1970", "3.9"),
    ("Jan 1971", "5.9"),
    ("Jan 1972", "5.8"),
    ("Jan 1973", "4.9"),
    ("Jan 1974", "5.1"),
    ("Jan 1975", "8.1"),
    ("Jan 1976", "7.9"),
    ("Jan 1977", "7.5"),
    ("Jan 1978", "6.4"),
    ("Jan 1979", "5.9"),
    ("Jan 1980", "6.3"),
    ("Jan 1981", "7.5"),
    ("Jan 1982", "8.6"),
    ("Jan 1983", "10.4"),
    ("Jan 1984", "8.0"),
    ("Jan 1985", "7.3"),
    ("Jan 1986", "6.7"),
    ("Jan 1987", "6.6"),
    ("Jan 1988", "5.7"),
    ("Jan 1989", "5.4"),
    ("Jan 1990", "5.4"),
    ("Jan 1991", "6.4"),
    ("Jan 1992", "7.3"),
    ("Jan 1993", "7.3"),
    ("Jan 1994", "6.6"),
    ("Jan 1995", "5.6"),
    ("Jan 1996", "5.6"),
    ("Jan 1997", "5.3"),
    ("Jan 1998", "4.6"),
    ("Jan 1999", "4.3"),
    ("Jan 2000", "4.0"),
    ("Jan 2001", "4.2"),
    ("Jan 2002", "5.7"),
    ("Jan 2003", "5.8"),
    ("Jan 2004", "5.7"),
    ("Jan 2005", "5.3"),
    ("Jan 2006", "4.7"),
    ("Jan 2007", "4.6"),
    ("Jan 2008", "5.0"),
    ("Jan 2009", "7.8"),
    ("Jan 2010", "9.8"),
    ("Jan 2011", "9.1"),
    ("Jan 2012", "8.3"),
    ("Jan 2013", "8.0"),
    ("Jan 2014", "6.6"),
    ("Jan 2015", "5.7"),
    ("Jan 2016", "4.9"),
    ("Jan 2017", "4.7"),
    ("Jan 2018", "4.1"),
    ("Jan 2019", "4.0"),
];

/// The bar chart dataset, in bar order.
pub fn languages() -> Vec<CategoryDatum> {
    LANGUAGES
        .iter()
        .map(|(label, value)| CategoryDatum::new(*label, *value))
        .collect()
}

/// The line chart dataset, in chronological order.
pub fn unemployment() -> Result<Vec<TimeSeriesDatum>, DatasetError> {
    parse_series(UNEMPLOYMENT.iter().copied())
}

/// Turn `("Jan 1969", "3.4")` rows into data points.
///
/// A bad month label is an error; a bad rate is a missing observation.
pub fn parse_series<'a, I>(rows: I) -> Result<Vec<TimeSeriesDatum>, DatasetError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    rows.into_iter()
        .map(|(month, rate)| {
            let date =
                parse_month(month).ok_or_else(|| DatasetError::InvalidMonth(month.to_string()))?;
            Ok(TimeSeriesDatum {
                date,
                rate: parse_rate(rate),
            })
        })
        .collect()
}

/// Position of `label` in `data`.
pub fn position_of(data: &[CategoryDatum], label: &str) -> Result<usize, DatasetError> {
    data.iter()
        .position(|d| d.label == label)
        .ok_or_else(|| DatasetError::UnknownCategory(label.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_series_is_chronological_and_complete() {
        let series = unemployment().unwrap();
        assert_eq!(series.len(), 51);
        assert!(series.windows(2).all(|w| w[0].date < w[1].date));
        assert!(series.iter().all(|p| p.defined_rate().is_some()));
    }

    #[test]
    fn bad_rate_is_missing_bad_month_is_error() {
        let s = parse_series([("Feb 2000", ""), ("Mar 2000", "4.1")]).unwrap();
        assert_eq!(s[0].rate, None);
        assert_eq!(s[1].rate, Some(4.1));
        let e = parse_series([("2000-02", "4.0")]).unwrap_err();
        assert!(matches!(e, DatasetError::InvalidMonth(_)));
    }

    #[test]
    fn lookup_by_label() {
        let data = languages();
        assert_eq!(position_of(&data, "Rust").unwrap(), 0);
        assert_eq!(position_of(&data, "Clojure").unwrap(), 9);
        assert!(position_of(&data, "COBOL").is_err());
    }
}
