use time::{Date, Month};

/// One row of the input dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub date: Date,

    pub actual_max_temp: f64,
    pub average_max_temp: f64,
    pub record_max_temp: f64,

    /// Full English name of the month of `date`, used as the bar chart band.
    pub month_label: &'static str,

    pub record_precipitation: f64,
    pub actual_precipitation: f64,
    pub average_precipitation: f64,
}

impl RawRecord {
    /// Key used to group records of the same calendar month.
    pub fn year_month(&self) -> (i32, Month) {
        (self.date.year(), self.date.month())
    }
}

pub fn month_name(month: Month) -> &'static str {
    match month {
        Month::January => "January",
        Month::February => "February",
        Month::March => "March",
        Month::April => "April",
        Month::May => "May",
        Month::June => "June",
        Month::July => "July",
        Month::August => "August",
        Month::September => "September",
        Month::October => "October",
        Month::November => "November",
        Month::December => "December",
    }
}

#[cfg(test)]
pub(crate) fn record(year: i32, month: u8, day: u8, temps: (f64, f64, f64)) -> RawRecord {
    let date = Date::from_calendar_date(year, Month::try_from(month).unwrap(), day).unwrap();
    RawRecord {
        date,
        actual_max_temp: temps.0,
        average_max_temp: temps.1,
        record_max_temp: temps.2,
        month_label: month_name(date.month()),
        record_precipitation: 0.0,
        actual_precipitation: 0.0,
        average_precipitation: 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_month_ignores_day() {
        let a = record(2014, 7, 1, (0.0, 0.0, 0.0));
        let b = record(2014, 7, 31, (0.0, 0.0, 0.0));
        let c = record(2015, 7, 1, (0.0, 0.0, 0.0));
        assert_eq!(a.year_month(), b.year_month());
        assert_ne!(a.year_month(), c.year_month());
        assert_eq!(a.month_label, "July");
    }
}
