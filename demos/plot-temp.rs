use std::str::FromStr;

use chrono::NaiveDate;
use miette::{miette, IntoDiagnostic, Result};
use plotters::prelude::*;
use plotters::style::Color as _;
use weather_trend::{
    domain, trend_for, ChartConfig, Color, Dataset, TemperatureField, TrendSelection, Window,
};

fn rgb(color: Color) -> RGBColor {
    let (r, g, b) = color.rgb();
    RGBColor(r, g, b)
}

fn naive(date: time::Date) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(date.year(), date.month() as u32, date.day() as u32)
}

/// Usage: plot-temp <weather.csv> [None|Actual|Average|Record] [window]
fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let input = args.next().ok_or_else(|| miette!("Missing filename"))?;
    let selection = TrendSelection::from_str(args.next().as_deref().unwrap_or("None"))?;
    let config = ChartConfig {
        trend_window: match args.next() {
            Some(window) => Window::from_str(&window)?,
            None => Window::DEFAULT,
        },
        ..ChartConfig::default()
    };
    config.validate()?;

    println!("opening {input}");
    let output = format!("{input}.temp.png");
    let dataset = Dataset::from_str(&std::fs::read_to_string(&input).into_diagnostic()?)?;
    let monthly = dataset.monthly();

    let (Some(dates), Some(temperatures)) = (
        domain::date_extent(&monthly),
        domain::temperature_domain(&monthly),
    ) else {
        println!("nothing to plot");
        return Ok(());
    };
    let (Some(first), Some(last)) = (naive(dates.start), naive(dates.end)) else {
        return Err(miette!("dates out of range: {dates:?}"));
    };

    let root = BitMapBackend::new(&output, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE).into_diagnostic()?;
    let mut chart = ChartBuilder::on(&root)
        .caption("Monthly maximum temperature", ("sans-serif", 24).into_font())
        .margin_top(config.margin.top)
        .margin_right(config.margin.right)
        .x_label_area_size(config.margin.bottom)
        .y_label_area_size(config.margin.left)
        .build_cartesian_2d(first..last, temperatures)
        .into_diagnostic()?;

    chart
        .configure_mesh()
        .x_label_formatter(&|date: &NaiveDate| date.format("%b").to_string())
        .y_desc("Temperature")
        .draw()
        .into_diagnostic()?;

    let lines = [
        (TemperatureField::Actual, config.actual_color),
        (TemperatureField::Average, config.historical_color),
        (TemperatureField::Record, config.record_color),
    ];
    for (field, color) in lines {
        let color = rgb(color);
        chart
            .draw_series(LineSeries::new(
                monthly
                    .iter()
                    .filter_map(|month| Some((naive(month.date)?, field.value(month)))),
                color.stroke_width(2),
            ))
            .into_diagnostic()?
            .label(field.label())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    if let Some(trend) = trend_for(&monthly, selection, config.trend_window) {
        chart
            .draw_series(LineSeries::new(
                trend
                    .iter()
                    .filter_map(|point| Some((naive(point.date)?, point.value))),
                BLACK.stroke_width(1),
            ))
            .into_diagnostic()?
            .label(format!("{} trend", selection.label()))
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLACK));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .into_diagnostic()?;

    root.present().into_diagnostic()?;
    println!("wrote {output}");
    Ok(())
}
