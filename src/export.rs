//! CSV export of a scenario and its projection.

use crate::engine::{Inputs, Results, YearResult};
use crate::fields::FieldKey;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

pub const TITLE: &str = "Market Entry Calculator";
pub const TRAILER: &str = "Powered by Pricing4Scale.com";

pub fn export_file_name(date: NaiveDate) -> String {
    format!("market-entry-calculator-{}.csv", date.format("%Y-%m-%d"))
}

/// Render the export document. Figures are written raw; only ROI is
/// rounded, to one fractional digit.
pub fn render_csv(inputs: &Inputs, results: &Results, date: NaiveDate) -> Result<String> {
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    wtr.write_record([TITLE])?;
    wtr.write_record(["Generated".to_string(), date.format("%Y-%m-%d").to_string()])?;

    wtr.write_record(["INPUTS"])?;
    wtr.write_record(["Field", "Value"])?;
    for key in FieldKey::ALL {
        wtr.write_record([key.label().to_string(), key.value_text(inputs)])?;
        if key == FieldKey::OtherCosts {
            wtr.write_record([
                "Total Entry Investment".to_string(),
                raw(results.entry_investment),
            ])?;
        }
    }

    wtr.write_record(["RESULTS"])?;
    wtr.write_record(["Metric", "Year 1", "Year 2", "Year 3"])?;
    let years = results.years();
    let metrics: [(&str, fn(&YearResult) -> f64); 5] = [
        ("Customers", |y| y.customers),
        ("Revenue", |y| y.revenue),
        ("Total Costs", |y| y.costs),
        ("Contribution Margin", |y| y.margin),
        ("Cumulative Profit", |y| y.cumulative_profit),
    ];
    for (label, metric) in metrics {
        let mut row = vec![label.to_string()];
        row.extend(years.iter().map(|y| raw(metric(*y))));
        wtr.write_record(&row)?;
    }

    wtr.write_record(["Entry Investment".to_string(), raw(results.entry_investment)])?;
    wtr.write_record(["Breakeven Year", results.breakeven.label()])?;
    wtr.write_record([
        "3-Year Cumulative Profit".to_string(),
        raw(results.three_year_cumulative_profit),
    ])?;
    wtr.write_record(["ROI (%)".to_string(), format!("{:.1}", results.roi_pct)])?;
    wtr.write_record(["Decision", results.decision.label()])?;
    wtr.write_record(["Confidence", results.confidence.label()])?;
    wtr.write_record([TRAILER])?;

    wtr.flush().context("Failed to flush CSV export")?;
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    String::from_utf8(bytes).context("CSV export is not valid UTF-8")
}

/// Write the export into `dir` and return the file path.
pub fn write_export(
    dir: &Path,
    inputs: &Inputs,
    results: &Results,
    date: NaiveDate,
) -> Result<PathBuf> {
    let body = render_csv(inputs, results, date)?;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory: {}", dir.display()))?;
    let path = dir.join(export_file_name(date));
    std::fs::write(&path, body)
        .with_context(|| format!("Failed to write export file: {}", path.display()))?;
    tracing::info!(path = %path.display(), decision = results.decision.label(), "scenario exported");
    Ok(path)
}

fn raw(value: f64) -> String {
    value.to_string()
}
