//! Dropdown label to precipitation field routing.

use std::str::FromStr;

use miette::Diagnostic;
use thiserror::Error;

use crate::{config::Color, record::RawRecord};

/// Dropdown vocabulary, in display order.
pub const ROUTE_OPTIONS: [&str; 4] = [
    "Record Precipitation",
    "Actual Precipitation",
    "Average Precipitation",
    "None",
];

#[derive(Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Unknown selection: `{0}`")]
    #[diagnostic(
        code(weather_trend::selection::unknown_selection),
        help("expected one of: Record Precipitation, Actual Precipitation, Average Precipitation, None")
    )]
    UnknownSelection(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrecipitationField {
    Record,
    Actual,
    Average,
}

impl PrecipitationField {
    pub const ALL: [PrecipitationField; 3] = [Self::Record, Self::Actual, Self::Average];

    pub fn value(self, record: &RawRecord) -> f64 {
        match self {
            Self::Record => record.record_precipitation,
            Self::Actual => record.actual_precipitation,
            Self::Average => record.average_precipitation,
        }
    }

    /// Column name in the input dataset.
    pub fn column(self) -> &'static str {
        match self {
            Self::Record => "record_precipitation",
            Self::Actual => "actual_precipitation",
            Self::Average => "average_precipitation",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Record => "Record Precipitation",
            Self::Actual => "Actual Precipitation",
            Self::Average => "Average Precipitation",
        }
    }

    pub fn color(self) -> Color {
        match self {
            Self::Record => Color::LightBlue,
            Self::Actual => Color::DodgerBlue,
            Self::Average => Color::DarkBlue,
        }
    }

    pub fn route(self) -> Route {
        Route {
            field: self,
            color: self.color(),
        }
    }
}

impl FromStr for PrecipitationField {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.label() == s)
            .ok_or_else(|| SelectionError::UnknownSelection(s.to_string()))
    }
}

/// Field and bar colour for a dropdown selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Route {
    pub field: PrecipitationField,
    pub color: Color,
}

impl Route {
    pub fn column(&self) -> &'static str {
        self.field.column()
    }
}

/// Map a dropdown label to the field and colour to render.
///
/// `Ok(None)` means "None" was picked and nothing should be drawn. Labels
/// outside [`ROUTE_OPTIONS`] are an error, never a fallback.
pub fn route(label: &str) -> Result<Option<Route>, SelectionError> {
    if label == "None" {
        return Ok(None);
    }

    let route = label.parse::<PrecipitationField>()?.route();
    log::debug!("`{label}` routed to {} in {}", route.column(), route.color);
    Ok(Some(route))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::record;

    #[test]
    fn known_labels() {
        let record_route = route("Record Precipitation").unwrap().unwrap();
        assert_eq!(record_route.column(), "record_precipitation");
        assert_eq!(record_route.color.name(), "lightblue");

        let actual = route("Actual Precipitation").unwrap().unwrap();
        assert_eq!(actual.column(), "actual_precipitation");
        assert_eq!(actual.color.name(), "dodgerblue");

        let average = route("Average Precipitation").unwrap().unwrap();
        assert_eq!(average.column(), "average_precipitation");
        assert_eq!(average.color.name(), "darkblue");
    }

    #[test]
    fn none_is_no_selection() {
        assert_eq!(route("None"), Ok(None));
    }

    #[test]
    fn unknown_labels_fail_closed() {
        for label in ["", "Precipitation", "record precipitation", "Snowfall"] {
            assert_eq!(
                route(label),
                Err(SelectionError::UnknownSelection(label.to_string()))
            );
        }
    }

    #[test]
    fn every_option_routes() {
        for label in ROUTE_OPTIONS {
            assert!(route(label).is_ok(), "{label}");
        }
    }

    #[test]
    fn field_accessor() {
        let mut day = record(2014, 7, 1, (0.0, 0.0, 0.0));
        day.record_precipitation = 2.17;
        day.actual_precipitation = 0.5;
        day.average_precipitation = 0.12;

        assert_eq!(PrecipitationField::Record.value(&day), 2.17);
        assert_eq!(PrecipitationField::Actual.value(&day), 0.5);
        assert_eq!(PrecipitationField::Average.value(&day), 0.12);
    }
}
