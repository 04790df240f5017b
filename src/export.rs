//! One CSV row per calculation, appended to a file.

use std::{fs::OpenOptions, path::PathBuf};

use bon::Builder;
use chrono::{DateTime, Local};
use csv::WriterBuilder;
use serde::Serialize;

use crate::{estimator::EstimateResult, prelude::*};

const NOT_SPECIFIED: &str = "Not specified";

/// Context of a calculation that is not part of the estimator input.
#[derive(Builder)]
pub struct ExportMeta {
    #[builder(default = Local::now())]
    timestamp: DateTime<Local>,

    #[builder(default = NOT_SPECIFIED.to_owned(), into)]
    asset_type: String,

    #[builder(default, into)]
    notes: String,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct ExportRow {
    #[serde(rename = "Timestamp")]
    pub timestamp: String,

    #[serde(rename = "Asset Type")]
    pub asset_type: String,

    #[serde(rename = "Capacity (kW)")]
    pub capacity: f64,

    #[serde(rename = "Hours/Day")]
    pub hours_per_day: f64,

    #[serde(rename = "Flexibility Window")]
    pub window: String,

    #[serde(rename = "Baseline Rate (p/kWh)")]
    pub baseline_rate: f64,

    #[serde(rename = "Peak Rate (p/kWh)")]
    pub peak_rate: f64,

    #[serde(rename = "Participation Low (%)")]
    pub participation_low: f64,

    #[serde(rename = "Participation High (%)")]
    pub participation_high: f64,

    #[serde(rename = "Cost Savings Low (£)")]
    pub cost_savings_low: String,

    #[serde(rename = "Cost Savings High (£)")]
    pub cost_savings_high: String,

    #[serde(rename = "Incentive Low (£)")]
    pub incentive_low: String,

    #[serde(rename = "Incentive High (£)")]
    pub incentive_high: String,

    #[serde(rename = "Total Value Low (£)")]
    pub total_low: String,

    #[serde(rename = "Total Value High (£)")]
    pub total_high: String,

    #[serde(rename = "CO2 Savings (kg/year)")]
    pub co2_savings: String,

    #[serde(rename = "Selected Services")]
    pub services: String,

    #[serde(rename = "Notes")]
    pub notes: String,
}

impl ExportRow {
    pub fn new(result: &EstimateResult, meta: ExportMeta) -> Self {
        let input = &result.input;
        let money = |value: f64| format!("{value:.2}");
        let incentives = result.incentives;
        let total = result.total_value();
        Self {
            timestamp: meta.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            asset_type: meta.asset_type,
            capacity: input.capacity.0,
            hours_per_day: input.hours_per_day.0,
            window: input
                .window
                .map_or_else(|| NOT_SPECIFIED.to_owned(), |window| window.to_string()),
            baseline_rate: input.baseline_rate.0,
            peak_rate: input.peak_rate.0,
            participation_low: input.participation.low.0,
            participation_high: input.participation.high.0,
            cost_savings_low: money(result.cost_savings.low.0),
            cost_savings_high: money(result.cost_savings.high.0),
            incentive_low: incentives.map(|it| money(it.low.0)).unwrap_or_default(),
            incentive_high: incentives.map(|it| money(it.high.0)).unwrap_or_default(),
            total_low: money(total.low.0),
            total_high: money(total.high.0),
            co2_savings: result
                .co2_savings
                .map(|co2_savings| format!("{:.2}", co2_savings.high.0))
                .unwrap_or_default(),
            services: input
                .incentives
                .as_ref()
                .map(|incentives| incentives.services.join("; "))
                .unwrap_or_default(),
            notes: meta.notes,
        }
    }
}

/// Appends rows to a CSV file, writing the header only into a new or empty file.
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[instrument(skip_all, fields(path = %self.path.display()))]
    pub fn append(&self, row: &ExportRow) -> Result {
        let is_empty = std::fs::metadata(&self.path).map_or(true, |metadata| metadata.len() == 0);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("failed to open `{}`", self.path.display()))?;
        let mut writer = WriterBuilder::new().has_headers(is_empty).from_writer(file);
        writer.serialize(row).context("failed to write the row")?;
        writer.flush()?;
        info!(with_header = is_empty, "exported");
        Ok(())
    }
}
