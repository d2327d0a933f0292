//! Derived chart series for a CSV of daily weather observations.
//!
//! The crate never draws anything. It parses the dataset, reduces it to one
//! record per month, smooths a selected temperature series and maps dropdown
//! labels to precipitation fields. A renderer (see `demos/`) consumes the
//! results.

use std::{ops::Range, str::FromStr};

use miette::Diagnostic;
use thiserror::Error;
use time::Date;

pub mod config;
pub mod domain;
pub mod ingest;
pub mod monthly;
pub mod record;
pub mod selection;
pub mod trend;

pub use config::{ChartConfig, Color, ConfigError, Margin};
pub use ingest::{parse_records, IngestError};
pub use monthly::{aggregate_monthly, AggregatedRecord, TemperatureField};
pub use record::RawRecord;
pub use selection::{route, PrecipitationField, Route, SelectionError, ROUTE_OPTIONS};
pub use trend::{smooth, trend_for, TrendError, TrendPoint, TrendSelection, Window};

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Ingest(#[from] IngestError),
    #[error(transparent)]
    #[diagnostic(transparent)]
    Trend(#[from] TrendError),
    #[error(transparent)]
    #[diagnostic(transparent)]
    Selection(#[from] SelectionError),
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

/// A parsed weather dataset.
///
/// Records keep the order of the input file. Nothing here is global: callers
/// hold the dataset and pass it to whatever needs it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub records: Vec<RawRecord>,
}

impl FromStr for Dataset {
    type Err = IngestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self {
            records: parse_records(s)?,
        })
    }
}

impl Dataset {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first_date(&self) -> Option<Date> {
        self.records.first().map(|record| record.date)
    }

    pub fn last_date(&self) -> Option<Date> {
        self.records.last().map(|record| record.date)
    }

    /// One averaged record per year-month, in first-seen order.
    pub fn monthly(&self) -> Vec<AggregatedRecord> {
        aggregate_monthly(&self.records)
    }

    pub fn precipitation_domain(&self, field: PrecipitationField) -> Option<Range<f64>> {
        domain::precipitation_domain(&self.records, field)
    }

    pub fn month_labels(&self) -> Vec<&'static str> {
        domain::month_labels(&self.records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
date,actual_mean_temp,actual_min_temp,actual_max_temp,average_min_temp,average_max_temp,record_min_temp,record_max_temp,record_min_temp_year,record_max_temp_year,actual_precipitation,average_precipitation,record_precipitation
2014-7-1,81,72,89,68,86,56,100,1901,1949,0.00,0.12,2.17
2014-7-2,80,71,89,68,86,56,102,1901,1966,0.20,0.12,1.41
2014-8-1,78,69,87,67,85,53,98,1956,1933,0.07,0.12,1.35
";

    #[test]
    fn dataset_from_str() {
        let dataset: Dataset = CSV.parse().unwrap();
        assert_eq!(dataset.records.len(), 3);
        assert_eq!(dataset.month_labels(), vec!["July", "August"]);

        let monthly = dataset.monthly();
        assert_eq!(monthly.len(), 2);
        assert_eq!(monthly[0].record_temp, 101.0);

        let domain = dataset
            .precipitation_domain(PrecipitationField::Record)
            .unwrap();
        assert_eq!(domain, 0.0..2.17);
    }

    #[test]
    fn empty_dataset_is_valid() {
        let dataset: Dataset = "date,actual_max_temp,average_max_temp,record_max_temp,record_precipitation,actual_precipitation,average_precipitation\n"
            .parse()
            .unwrap();
        assert!(dataset.is_empty());
        assert!(dataset.monthly().is_empty());
        assert_eq!(dataset.first_date(), None);
        assert_eq!(dataset.precipitation_domain(PrecipitationField::Actual), None);
    }

    #[test]
    fn errors_convert_into_crate_error() {
        let err: Error = "nope".parse::<Dataset>().unwrap_err().into();
        assert!(matches!(err, Error::Ingest(IngestError::MissingColumn(_))));
    }
}
