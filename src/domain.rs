//! Axis domains for the two charts.

use std::ops::Range;

use time::Date;

use crate::{monthly::AggregatedRecord, record::RawRecord, selection::PrecipitationField};

/// Padding, in degrees, added around the record temperatures.
pub const TEMPERATURE_PADDING: f64 = 5.0;

/// Y domain of the temperature chart: the record temperature range padded on
/// both sides.
pub fn temperature_domain(records: &[AggregatedRecord]) -> Option<Range<f64>> {
    let min = records
        .iter()
        .map(|record| record.record_temp)
        .min_by(f64::total_cmp)?;
    let max = records
        .iter()
        .map(|record| record.record_temp)
        .max_by(f64::total_cmp)?;

    Some(min - TEMPERATURE_PADDING..max + TEMPERATURE_PADDING)
}

/// Y domain of the precipitation chart, always anchored at zero.
pub fn precipitation_domain(
    records: &[RawRecord],
    field: PrecipitationField,
) -> Option<Range<f64>> {
    let max = records
        .iter()
        .map(|record| field.value(record))
        .max_by(f64::total_cmp)?;

    Some(0.0..max)
}

pub fn date_extent(records: &[AggregatedRecord]) -> Option<Range<Date>> {
    let first = records.iter().map(|record| record.date).min()?;
    let last = records.iter().map(|record| record.date).max()?;
    Some(first..last)
}

/// Distinct month labels in first-seen order, the band domain of the bar
/// chart. Months of different years share a band.
pub fn month_labels(records: &[RawRecord]) -> Vec<&'static str> {
    let mut labels: Vec<&'static str> = Vec::new();
    for record in records {
        if !labels.contains(&record.month_label) {
            labels.push(record.month_label);
        }
    }
    labels
}
