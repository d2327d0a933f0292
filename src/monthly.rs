use std::collections::HashMap;

use time::{Date, Duration, Month};

use crate::record::RawRecord;

/// Mean temperatures of one calendar month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregatedRecord {
    /// First day of the month.
    pub date: Date,

    pub actual_temp: f64,
    pub historical_temp: f64,
    pub record_temp: f64,
}

/// Which temperature of an [`AggregatedRecord`] to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemperatureField {
    Actual,
    Average,
    Record,
}

impl TemperatureField {
    pub const ALL: [TemperatureField; 3] = [Self::Actual, Self::Average, Self::Record];

    pub fn value(self, record: &AggregatedRecord) -> f64 {
        match self {
            Self::Actual => record.actual_temp,
            Self::Average => record.historical_temp,
            Self::Record => record.record_temp,
        }
    }

    /// Legend label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Actual => "Actual",
            Self::Average => "Average",
            Self::Record => "Record",
        }
    }
}

#[derive(Debug)]
struct MonthSum {
    date: Date,
    count: usize,
    actual: f64,
    average: f64,
    record: f64,
}

impl MonthSum {
    fn mean(&self) -> AggregatedRecord {
        let count = self.count as f64;
        AggregatedRecord {
            date: self.date,
            actual_temp: self.actual / count,
            historical_temp: self.average / count,
            record_temp: self.record / count,
        }
    }
}

fn first_of_month(date: Date) -> Date {
    date - Duration::days(i64::from(date.day()) - 1)
}

/// Reduce daily records to one mean record per calendar month.
///
/// Months come out in the order they first appear in `records`. Months with
/// no records are simply absent.
pub fn aggregate_monthly(records: &[RawRecord]) -> Vec<AggregatedRecord> {
    let mut index: HashMap<(i32, Month), usize> = HashMap::new();
    let mut sums: Vec<MonthSum> = Vec::new();

    for record in records {
        let slot = *index.entry(record.year_month()).or_insert_with(|| {
            sums.push(MonthSum {
                date: first_of_month(record.date),
                count: 0,
                actual: 0.0,
                average: 0.0,
                record: 0.0,
            });
            sums.len() - 1
        });

        let sum = &mut sums[slot];
        sum.count += 1;
        sum.actual += record.actual_max_temp;
        sum.average += record.average_max_temp;
        sum.record += record.record_max_temp;
    }

    log::debug!(
        "aggregated {} records into {} months",
        records.len(),
        sums.len()
    );
    sums.iter().map(MonthSum::mean).collect()
}
