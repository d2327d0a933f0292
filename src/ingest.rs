//! CSV ingestion.
//!
//! Every field is run through a small lexer so that a value is either a date,
//! a number or garbage. Garbage in a numeric column is a hard error: the
//! aggregator never sees NaN.

use csv::StringRecord;
use logos::Logos;
use miette::Diagnostic;
use thiserror::Error;
use time::{Date, Month};

use crate::record::{month_name, RawRecord};

#[derive(Logos, Debug, PartialEq)]
#[logos(skip r#"[ \t\r"]+"#)]
enum Token {
    #[regex(r"[0-9]{4}-[0-9]{1,2}-[0-9]{1,2}")]
    Date,
    #[regex(r"[-+]?([0-9]+(\.[0-9]*)?|\.[0-9]+)")]
    Number,
    #[regex("[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,
}

#[derive(Debug, Error, Diagnostic)]
pub enum IngestError {
    #[error("Failed to read CSV")]
    #[diagnostic(code(weather_trend::ingest::csv))]
    Csv(#[from] csv::Error),
    #[error("Missing header")]
    #[diagnostic(
        code(weather_trend::ingest::missing_header),
        help("the first non-empty line must name the columns")
    )]
    MissingHeader,
    #[error("Missing column `{0}`")]
    #[diagnostic(code(weather_trend::ingest::missing_column))]
    MissingColumn(&'static str),
    #[error("Line {line}: expected {expected} fields, found {found}")]
    #[diagnostic(code(weather_trend::ingest::field_count))]
    FieldCount {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("Line {line}: malformed value `{value}` in column `{column}`")]
    #[diagnostic(
        code(weather_trend::ingest::malformed_record),
        help("dates are `YYYY-M-D`, every other required column must be a finite number")
    )]
    MalformedRecord {
        line: usize,
        column: &'static str,
        value: String,
    },
    #[error("Line {line}: invalid date `{value}`")]
    #[diagnostic(code(weather_trend::ingest::invalid_date))]
    InvalidDate {
        line: usize,
        value: String,
        #[source]
        source: time::error::ComponentRange,
    },
}

/// Position of every required column in the header.
#[derive(Debug, Clone, Copy)]
struct Columns {
    count: usize,
    date: usize,
    actual_max_temp: usize,
    average_max_temp: usize,
    record_max_temp: usize,
    record_precipitation: usize,
    actual_precipitation: usize,
    average_precipitation: usize,
}

impl Columns {
    fn parse(headers: &StringRecord) -> Result<Self, IngestError> {
        let names: Vec<&str> = headers
            .iter()
            .map(|name| name.trim_start_matches('\u{feff}').trim())
            .collect();
        if names.iter().all(|name| name.is_empty()) {
            return Err(IngestError::MissingHeader);
        }

        let find = |column: &'static str| {
            names
                .iter()
                .position(|name| *name == column)
                .ok_or(IngestError::MissingColumn(column))
        };

        Ok(Self {
            count: names.len(),
            date: find("date")?,
            actual_max_temp: find("actual_max_temp")?,
            average_max_temp: find("average_max_temp")?,
            record_max_temp: find("record_max_temp")?,
            record_precipitation: find("record_precipitation")?,
            actual_precipitation: find("actual_precipitation")?,
            average_precipitation: find("average_precipitation")?,
        })
    }
}

/// Lex a single field, which must hold exactly one token.
fn lex_field(field: &str) -> Option<(Token, &str)> {
    let mut lexer = Token::lexer(field);
    let token = lexer.next()?.ok()?;
    let slice = lexer.slice();
    match lexer.next() {
        None => Some((token, slice)),
        Some(_) => None,
    }
}

fn parse_number(line: usize, column: &'static str, field: &str) -> Result<f64, IngestError> {
    let malformed = || IngestError::MalformedRecord {
        line,
        column,
        value: field.to_string(),
    };

    match lex_field(field) {
        Some((Token::Number, slice)) => slice
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(malformed),
        _ => Err(malformed()),
    }
}

fn parse_date(line: usize, field: &str) -> Result<Date, IngestError> {
    let malformed = || IngestError::MalformedRecord {
        line,
        column: "date",
        value: field.to_string(),
    };

    let slice = match lex_field(field) {
        Some((Token::Date, slice)) => slice,
        _ => return Err(malformed()),
    };

    let mut parts = slice.split('-');
    let (Some(year), Some(month), Some(day)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(malformed());
    };
    let year: i32 = year.parse().map_err(|_| malformed())?;
    let month: u8 = month.parse().map_err(|_| malformed())?;
    let day: u8 = day.parse().map_err(|_| malformed())?;

    let invalid = |source| IngestError::InvalidDate {
        line,
        value: field.to_string(),
        source,
    };
    let month = Month::try_from(month).map_err(invalid)?;
    Date::from_calendar_date(year, month, day).map_err(invalid)
}

fn parse_row(
    line: usize,
    columns: &Columns,
    row: &StringRecord,
) -> Result<RawRecord, IngestError> {
    if row.len() != columns.count {
        return Err(IngestError::FieldCount {
            line,
            expected: columns.count,
            found: row.len(),
        });
    }

    let number = |column: &'static str, index: usize| parse_number(line, column, &row[index]);

    let date = parse_date(line, &row[columns.date])?;

    Ok(RawRecord {
        date,
        actual_max_temp: number("actual_max_temp", columns.actual_max_temp)?,
        average_max_temp: number("average_max_temp", columns.average_max_temp)?,
        record_max_temp: number("record_max_temp", columns.record_max_temp)?,
        month_label: month_name(date.month()),
        record_precipitation: number("record_precipitation", columns.record_precipitation)?,
        actual_precipitation: number("actual_precipitation", columns.actual_precipitation)?,
        average_precipitation: number("average_precipitation", columns.average_precipitation)?,
    })
}

/// Parse CSV text into records, in file order.
///
/// Line numbers in errors are 1-based and count the header and blank lines.
pub fn parse_records(input: &str) -> Result<Vec<RawRecord>, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input.as_bytes());

    let columns = Columns::parse(reader.headers()?)?;

    let mut records: Vec<RawRecord> = Vec::new();
    for (idx, row) in reader.records().enumerate() {
        let row = row?;
        if row.iter().all(str::is_empty) {
            continue;
        }
        // Fall back to counting from the line after the header.
        let line = row
            .position()
            .and_then(|position| usize::try_from(position.line()).ok())
            .unwrap_or(idx + 2);
        let record = parse_row(line, &columns, &row)?;

        if let Some(previous) = records.last() {
            if previous.date > record.date {
                log::warn!(
                    "line {line}: {} comes before {}, monthly output will follow file order",
                    record.date,
                    previous.date
                );
            }
        }
        log::trace!("line {line}: parsed record for {}", record.date);
        records.push(record);
    }

    log::debug!("parsed {} records", records.len());
    Ok(records)
}
