use std::str::FromStr;

use miette::{miette, IntoDiagnostic, Result};
use plotters::prelude::*;
use weather_trend::{route, ChartConfig, Dataset};

/// Usage: plot-rain <weather.csv> ["Record Precipitation"|"Actual Precipitation"|"Average Precipitation"|None]
fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let input = args.next().ok_or_else(|| miette!("Missing filename"))?;
    let label = args
        .next()
        .unwrap_or_else(|| String::from("Record Precipitation"));
    let Some(selected) = route(&label)? else {
        println!("nothing selected");
        return Ok(());
    };

    let config = ChartConfig::default();
    config.validate()?;

    println!("opening {input}");
    let output = format!("{input}.rain.png");
    let dataset = Dataset::from_str(&std::fs::read_to_string(&input).into_diagnostic()?)?;

    let labels = dataset.month_labels();
    let Some(amounts) = dataset.precipitation_domain(selected.field) else {
        println!("nothing to plot");
        return Ok(());
    };
    let top = if amounts.end > 0.0 { amounts.end } else { 1.0 };

    let root = BitMapBackend::new(&output, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE).into_diagnostic()?;
    let mut chart = ChartBuilder::on(&root)
        .caption(selected.field.label(), ("sans-serif", 24).into_font())
        .margin_top(config.margin.top)
        .margin_right(config.margin.right)
        .x_label_area_size(config.margin.bottom)
        .y_label_area_size(config.margin.left)
        .build_cartesian_2d((0..labels.len()).into_segmented(), 0.0..top)
        .into_diagnostic()?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Month")
        .y_desc(selected.field.label())
        .x_label_formatter(&|segment: &SegmentValue<usize>| match segment {
            SegmentValue::CenterOf(i) => labels
                .get(*i)
                .map(|label| label.to_string())
                .unwrap_or_default(),
            _ => String::new(),
        })
        .draw()
        .into_diagnostic()?;

    let (r, g, b) = selected.color.rgb();
    let style = RGBColor(r, g, b).filled();
    chart
        .draw_series(dataset.records.iter().filter_map(|record| {
            let band = labels.iter().position(|l| *l == record.month_label)?;
            let mut bar = Rectangle::new(
                [
                    (SegmentValue::Exact(band), selected.field.value(record)),
                    (SegmentValue::Exact(band + 1), 0.0),
                ],
                style,
            );
            bar.set_margin(0, 0, 5, 5);
            Some(bar)
        }))
        .into_diagnostic()?;

    root.present().into_diagnostic()?;
    println!("wrote {output}");
    Ok(())
}
