use std::str::FromStr;

use miette::{miette, IntoDiagnostic, Result};
use weather_trend::{smooth, Dataset, TemperatureField, Window};

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let file = args.next().ok_or_else(|| miette!("Missing filename"))?;
    let window = match args.next() {
        Some(window) => Window::from_str(&window)?,
        None => Window::DEFAULT,
    };

    println!("opening {file}");
    let dataset = Dataset::from_str(&std::fs::read_to_string(&file).into_diagnostic()?)?;
    let monthly = dataset.monthly();

    if monthly.is_empty() {
        println!("no records");
        return Ok(());
    }

    let trends: Vec<_> = TemperatureField::ALL
        .into_iter()
        .map(|field| smooth(&monthly, field, window))
        .collect();

    println!(
        "{:<10} {:>8} {:>8} {:>8}   trend (window {window})",
        "month", "actual", "average", "record"
    );
    for (i, month) in monthly.iter().enumerate() {
        println!(
            "{:<10} {:>8.1} {:>8.1} {:>8.1}   {:>6.1} {:>6.1} {:>6.1}",
            month.date,
            month.actual_temp,
            month.historical_temp,
            month.record_temp,
            trends[0][i].value,
            trends[1][i].value,
            trends[2][i].value,
        );
    }

    Ok(())
}
