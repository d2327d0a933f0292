//! Centered moving average over the monthly series.

use std::{fmt, str::FromStr};

use miette::Diagnostic;
use thiserror::Error;
use time::Date;

use crate::monthly::{AggregatedRecord, TemperatureField};

#[derive(Debug, Error, Diagnostic, PartialEq)]
pub enum TrendError {
    #[error("Invalid window: {0}")]
    #[diagnostic(
        code(weather_trend::trend::invalid_window),
        help("the window must be a positive whole number of months")
    )]
    InvalidWindow(String),
    #[error("Unknown trend selection: {0}")]
    #[diagnostic(
        code(weather_trend::trend::unknown_selection),
        help("expected one of None, Actual, Average, Record")
    )]
    UnknownSelection(String),
}

/// Number of points averaged around each position. Always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Window(usize);

impl Window {
    pub const DEFAULT: Window = Window(5);

    pub fn new(size: usize) -> Result<Self, TrendError> {
        if size == 0 {
            return Err(TrendError::InvalidWindow(String::from("0")));
        }
        Ok(Self(size))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for Window {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for Window {
    type Error = TrendError;

    fn try_from(size: i64) -> Result<Self, Self::Error> {
        usize::try_from(size)
            .map_err(|_| TrendError::InvalidWindow(size.to_string()))
            .and_then(Self::new)
    }
}

impl TryFrom<f64> for Window {
    type Error = TrendError;

    fn try_from(size: f64) -> Result<Self, Self::Error> {
        if !size.is_finite() || size.fract() != 0.0 || size < 1.0 || size >= usize::MAX as f64 {
            return Err(TrendError::InvalidWindow(size.to_string()));
        }
        Self::new(size as usize)
    }
}

impl FromStr for Window {
    type Err = TrendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let size: usize = s
            .trim()
            .parse()
            .map_err(|_| TrendError::InvalidWindow(s.to_string()))?;
        Self::new(size)
    }
}

/// Which temperature series, if any, gets a trend overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TrendSelection {
    #[default]
    None,
    Actual,
    Average,
    Record,
}

impl TrendSelection {
    pub const ALL: [TrendSelection; 4] = [Self::None, Self::Actual, Self::Average, Self::Record];

    pub fn field(self) -> Option<TemperatureField> {
        match self {
            Self::None => None,
            Self::Actual => Some(TemperatureField::Actual),
            Self::Average => Some(TemperatureField::Average),
            Self::Record => Some(TemperatureField::Record),
        }
    }

    pub fn label(self) -> &'static str {
        match self.field() {
            Some(field) => field.label(),
            None => "None",
        }
    }
}

impl FromStr for TrendSelection {
    type Err = TrendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|selection| selection.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TrendError::UnknownSelection(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendPoint {
    pub date: Date,
    pub value: f64,
}

/// Smooth `field` over `records` with a centered moving average.
///
/// The window for position `i` covers `[i - w/2, i + ceil(w/2))`, clamped to
/// the sequence, so windows near the ends hold fewer points.
pub fn smooth(
    records: &[AggregatedRecord],
    field: TemperatureField,
    window: Window,
) -> Vec<TrendPoint> {
    let before = window.get() / 2;
    let after = window.get().div_ceil(2);

    records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let start = i.saturating_sub(before);
            let end = i.saturating_add(after).min(records.len());
            let neighbours = &records[start..end];
            let sum: f64 = neighbours.iter().map(|r| field.value(r)).sum();

            TrendPoint {
                date: record.date,
                value: sum / neighbours.len() as f64,
            }
        })
        .collect()
}

/// Recompute the trend overlay for `selection`.
///
/// `None` means the overlay should be hidden.
pub fn trend_for(
    records: &[AggregatedRecord],
    selection: TrendSelection,
    window: Window,
) -> Option<Vec<TrendPoint>> {
    let Some(field) = selection.field() else {
        log::debug!("trend overlay hidden");
        return None;
    };

    log::debug!(
        "smoothing {} months of {} temperature with window {window}",
        records.len(),
        field.label()
    );
    Some(smooth(records, field, window))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::{Duration, Month};

    fn series(values: &[f64]) -> Vec<AggregatedRecord> {
        let start = Date::from_calendar_date(2014, Month::January, 1).unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, &value)| AggregatedRecord {
                date: start + Duration::days(31 * i as i64),
                actual_temp: value,
                historical_temp: value * 2.0,
                record_temp: value + 100.0,
            })
            .collect()
    }

    fn values(points: &[TrendPoint]) -> Vec<f64> {
        points.iter().map(|point| point.value).collect()
    }

    #[test]
    fn window_of_five() {
        let records = series(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        let trend = smooth(&records, TemperatureField::Actual, Window::DEFAULT);

        assert_eq!(trend.len(), records.len());
        // Clamped at the start: indices 0..=2.
        assert_eq!(trend[0].value, 2.0);
        assert_eq!(trend[1].value, 2.5);
        // Interior: the five nearest points.
        assert_eq!(trend[2].value, 3.0);
        assert_eq!(trend[4].value, 5.0);
        // Clamped at the end: indices 5..=7.
        assert_eq!(trend[7].value, 7.0);

        for (point, record) in trend.iter().zip(&records) {
            assert_eq!(point.date, record.date);
        }
    }

    #[test]
    fn even_window_leans_backwards() {
        let records = series(&[0.0, 4.0, 8.0, 12.0, 16.0]);
        // w = 4 covers [i - 2, i + 2).
        let trend = smooth(&records, TemperatureField::Actual, Window::new(4).unwrap());
        assert_eq!(values(&trend), vec![2.0, 4.0, 6.0, 10.0, 12.0]);
    }

    #[test]
    fn window_of_one_is_identity() {
        let records = series(&[3.0, -1.0, 7.5]);
        let trend = smooth(&records, TemperatureField::Record, Window::new(1).unwrap());
        assert_eq!(values(&trend), vec![103.0, 99.0, 107.5]);
    }

    #[test]
    fn window_larger_than_series() {
        let records = series(&[1.0, 2.0, 3.0]);
        let trend = smooth(&records, TemperatureField::Average, Window::new(50).unwrap());
        assert_eq!(values(&trend), vec![4.0, 4.0, 4.0]);
    }

    #[test]
    fn empty_series() {
        assert!(smooth(&[], TemperatureField::Actual, Window::DEFAULT).is_empty());
        assert_eq!(
            trend_for(&[], TrendSelection::Record, Window::DEFAULT),
            Some(Vec::new())
        );
    }

    #[test]
    fn idempotent() {
        let records = series(&[5.0, 1.0, 9.0, 2.0, 8.0, 3.0]);
        let first = smooth(&records, TemperatureField::Actual, Window::new(3).unwrap());
        let second = smooth(&records, TemperatureField::Actual, Window::new(3).unwrap());
        assert_eq!(first, second);
    }

    #[test]
    fn no_smoothing_hides_the_overlay() {
        let records = series(&[1.0, 2.0, 3.0]);
        assert_eq!(trend_for(&records, TrendSelection::None, Window::DEFAULT), None);

        let trend = trend_for(&records, TrendSelection::Average, Window::new(3).unwrap()).unwrap();
        assert_eq!(values(&trend), vec![3.0, 4.0, 5.0]);
    }

    #[test]
    fn invalid_windows() {
        assert!(matches!(Window::new(0), Err(TrendError::InvalidWindow(_))));
        assert!(matches!(Window::try_from(-3i64), Err(TrendError::InvalidWindow(_))));
        assert!(matches!(Window::try_from(0i64), Err(TrendError::InvalidWindow(_))));
        assert!(matches!(Window::try_from(2.5), Err(TrendError::InvalidWindow(_))));
        assert!(matches!(Window::try_from(f64::NAN), Err(TrendError::InvalidWindow(_))));
        assert!(matches!(
            Window::try_from(usize::MAX as f64),
            Err(TrendError::InvalidWindow(_))
        ));
        assert!(matches!("3.0".parse::<Window>(), Err(TrendError::InvalidWindow(_))));
        assert!(matches!("-1".parse::<Window>(), Err(TrendError::InvalidWindow(_))));

        assert_eq!(Window::try_from(3.0).unwrap().get(), 3);
        assert_eq!(Window::try_from(7i64).unwrap().get(), 7);
        assert_eq!(" 5 ".parse::<Window>().unwrap(), Window::default());
    }

    #[test]
    fn selection_labels() {
        assert_eq!("none".parse::<TrendSelection>().unwrap(), TrendSelection::None);
        assert_eq!("Actual".parse::<TrendSelection>().unwrap(), TrendSelection::Actual);
        assert_eq!(" AVERAGE ".parse::<TrendSelection>().unwrap(), TrendSelection::Average);
        assert_eq!("record".parse::<TrendSelection>().unwrap(), TrendSelection::Record);
        assert_eq!(
            "Humidity".parse::<TrendSelection>(),
            Err(TrendError::UnknownSelection(String::from("Humidity")))
        );
    }
}
