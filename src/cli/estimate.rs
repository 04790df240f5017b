use std::path::PathBuf;

use chrono::NaiveTime;
use clap::Parser;

use crate::{
    assumptions::Assumptions,
    compatibility::CompatibilityIndex,
    estimator::{Bounds, EmissionFactors, EstimateInput, FlexibilityWindow, IncentiveInput},
    export::{CsvSink, ExportMeta, ExportRow},
    prelude::*,
    quantity::{
        emissions::KilogramsPerKilowattHour,
        power::Kilowatts,
        price::{PencePerKilowattHour, PoundsPerKilowattHour},
        ratios::Percentage,
        time::Hours,
    },
    tables::build_estimate_table,
};

/// Unset options fall back to the assumptions.
#[derive(Parser)]
pub struct EstimateArgs {
    /// TOML file overriding the default assumptions.
    #[clap(long = "assumptions", env = "ESTIMATOR_ASSUMPTIONS_PATH")]
    pub assumptions: Option<PathBuf>,

    /// Shiftable capacity in kilowatts.
    #[clap(long = "capacity-kilowatts", env = "CAPACITY_KILOWATTS")]
    pub capacity: Kilowatts,

    /// Flexibility hours per day.
    #[clap(long = "hours-per-day", env = "HOURS_PER_DAY")]
    pub hours_per_day: Hours,

    #[clap(long = "peak-rate-pence-per-kwh", env = "PEAK_RATE_PENCE_PER_KWH")]
    pub peak_rate: Option<PencePerKilowattHour>,

    /// Off-peak or average tariff.
    #[clap(long = "baseline-rate-pence-per-kwh", env = "BASELINE_RATE_PENCE_PER_KWH")]
    pub baseline_rate: Option<PencePerKilowattHour>,

    #[clap(long = "participation-low-percent")]
    pub participation_low: Option<Percentage>,

    #[clap(long = "participation-high-percent")]
    pub participation_high: Option<Percentage>,

    #[clap(flatten)]
    pub incentives: IncentiveArgs,

    #[clap(flatten)]
    pub co2: Co2Args,

    #[clap(flatten)]
    pub window: WindowArgs,

    #[clap(flatten)]
    pub export: ExportArgs,
}

#[derive(Parser)]
pub struct IncentiveArgs {
    /// Estimate the incentives of these services, averaging their indicative rates.
    #[clap(long = "service", value_delimiter = ',')]
    pub services: Vec<String>,

    /// Estimate the incentives at this rate instead of the per-service ones.
    #[clap(long = "incentive-rate-pounds-per-kwh")]
    pub rate: Option<PoundsPerKilowattHour>,

    #[clap(long = "availability-hours-low")]
    pub availability_hours_low: Option<Hours>,

    #[clap(long = "availability-hours-high")]
    pub availability_hours_high: Option<Hours>,
}

#[derive(Parser)]
pub struct Co2Args {
    /// Estimate the avoided emissions too.
    #[clap(long = "co2")]
    pub is_enabled: bool,

    #[clap(long = "peak-emission-factor", requires = "is_enabled")]
    pub peak_factor: Option<KilogramsPerKilowattHour>,

    #[clap(long = "off-peak-emission-factor", requires = "is_enabled")]
    pub off_peak_factor: Option<KilogramsPerKilowattHour>,
}

#[derive(Parser)]
pub struct WindowArgs {
    /// Earliest start of the shifted consumption, for example `16:00`.
    #[clap(long = "window-start", value_parser = parse_time, requires = "end")]
    pub start: Option<NaiveTime>,

    /// Latest finish of the shifted consumption.
    #[clap(long = "window-end", value_parser = parse_time, requires = "start")]
    pub end: Option<NaiveTime>,
}

#[derive(Parser)]
pub struct ExportArgs {
    /// Append the calculation to this CSV file.
    #[clap(long = "export", env = "EXPORT_PATH")]
    pub path: Option<PathBuf>,

    #[clap(long = "asset-type", requires = "path")]
    pub asset_type: Option<String>,

    #[clap(long = "notes", requires = "path")]
    pub notes: Option<String>,
}

fn parse_time(text: &str) -> Result<NaiveTime, chrono::ParseError> {
    NaiveTime::parse_from_str(text, "%H:%M")
}

impl EstimateArgs {
    /// Merge the options with the assumptions.
    ///
    /// Selected services are resolved through the index, so an unknown one is rejected.
    pub fn to_input(
        &self,
        index: &CompatibilityIndex,
        assumptions: &Assumptions,
    ) -> Result<EstimateInput> {
        let incentives = self.incentives.to_input(index, assumptions)?;
        let emission_factors = self.co2.is_enabled.then(|| EmissionFactors {
            peak: self.co2.peak_factor.unwrap_or(assumptions.peak_emission_factor),
            off_peak: self.co2.off_peak_factor.unwrap_or(assumptions.off_peak_emission_factor),
        });
        let window = self.window.start.zip(self.window.end).map(|(start, end)| {
            let window = FlexibilityWindow { start, end };
            if window.wraps_midnight() {
                warn!(%window, "the flexibility window wraps around midnight");
            } else if window.is_empty() {
                warn!(%window, "the flexibility window is empty");
            }
            window
        });
        Ok(EstimateInput::builder()
            .capacity(self.capacity)
            .hours_per_day(self.hours_per_day)
            .peak_rate(self.peak_rate.unwrap_or(assumptions.peak_rate))
            .baseline_rate(self.baseline_rate.unwrap_or(assumptions.baseline_rate))
            .participation(Bounds::new(
                self.participation_low.unwrap_or(assumptions.participation_low),
                self.participation_high.unwrap_or(assumptions.participation_high),
            ))
            .maybe_incentives(incentives)
            .maybe_emission_factors(emission_factors)
            .maybe_window(window)
            .build())
    }
}

impl IncentiveArgs {
    /// Incentives are requested by selecting a service or by setting the rate.
    fn to_input(
        &self,
        index: &CompatibilityIndex,
        assumptions: &Assumptions,
    ) -> Result<Option<IncentiveInput>> {
        if self.services.is_empty() && self.rate.is_none() {
            return Ok(None);
        }
        let services = self
            .services
            .iter()
            .map(|service| index.resolve(service))
            .collect::<Result<Vec<_>, _>>()?;
        let rate = match self.rate {
            Some(rate) => rate,
            None => assumptions
                .incentive_rates
                .mean_rate(&services)
                .context("no services selected for the incentive rate")?,
        };
        info!(%rate, n_services = services.len(), "incentive rate");
        Ok(Some(IncentiveInput {
            availability_hours: Bounds::new(
                self.availability_hours_low.unwrap_or(assumptions.availability_hours_low),
                self.availability_hours_high.unwrap_or(assumptions.availability_hours_high),
            ),
            rate,
            services: services.into_iter().map(|service| service.name.clone()).collect(),
        }))
    }
}

#[instrument(skip_all, fields(capacity = %args.capacity, hours_per_day = %args.hours_per_day))]
pub fn estimate(index: &CompatibilityIndex, args: &EstimateArgs) -> Result {
    let assumptions = Assumptions::load(args.assumptions.as_deref())?;
    let input = args.to_input(index, &assumptions)?;
    let result = input.estimate().context("the estimate was rejected")?;
    println!("{}", build_estimate_table(&result));

    if let Some(path) = &args.export.path {
        let meta = ExportMeta::builder()
            .maybe_asset_type(args.export.asset_type.clone())
            .maybe_notes(args.export.notes.clone())
            .build();
        CsvSink::new(path).append(&ExportRow::new(&result, meta))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::{
        cli::{Args, Command},
        dataset,
    };

    // language=JSON
    const DATASET: &str = r#"
        {
            "services": ["Dynamic Containment (DC)", "Dynamic Moderation (DM)", "Capacity Market (CM)"],
            "compatibility": {},
            "technical_requirements": {}
        }
    "#;

    fn parse(extra: &[&str]) -> Result<EstimateArgs> {
        let args = ["flexstack", "estimate", "--capacity-kilowatts", "100", "--hours-per-day", "4"];
        let args = Args::try_parse_from(args.iter().chain(extra).copied())?;
        match args.command {
            Command::Estimate(args) => Ok(*args),
            _ => bail!("expected `estimate`"),
        }
    }

    fn index() -> Result<CompatibilityIndex> {
        Ok(CompatibilityIndex::try_from_raw(dataset::parse(DATASET)?)?)
    }

    #[test]
    fn test_defaults_from_assumptions() -> Result {
        let input = parse(&[])?.to_input(&index()?, &Assumptions::default())?;
        assert_abs_diff_eq!(input.peak_rate.0, 35.0);
        assert_abs_diff_eq!(input.participation.high.0, 80.0);
        assert!(input.incentives.is_none());
        assert!(input.emission_factors.is_none());
        assert!(input.window.is_none());
        Ok(())
    }

    #[test]
    fn test_incentives_from_services() -> Result {
        let input = parse(&["--service", "DC,dm", "--co2", "--peak-emission-factor", "0.3"])?
            .to_input(&index()?, &Assumptions::default())?;
        let incentives = input.incentives.unwrap();
        assert_eq!(incentives.services, ["Dynamic Containment (DC)", "Dynamic Moderation (DM)"]);
        assert_abs_diff_eq!(incentives.rate.0, 0.0175, epsilon = 1e-12);
        assert_abs_diff_eq!(incentives.availability_hours.low.0, 2000.0);
        let factors = input.emission_factors.unwrap();
        assert_abs_diff_eq!(factors.peak.0, 0.3);
        assert_abs_diff_eq!(factors.off_peak.0, 0.15);
        Ok(())
    }

    #[test]
    fn test_unknown_service_is_rejected() -> Result {
        let args = parse(&["--service", "Ghost"])?;
        assert!(args.to_input(&index()?, &Assumptions::default()).is_err());
        Ok(())
    }

    #[test]
    fn test_window_wrapping_and_empty() -> Result {
        let input = parse(&["--window-start", "22:00", "--window-end", "02:00"])?
            .to_input(&index()?, &Assumptions::default())?;
        assert!(input.window.unwrap().wraps_midnight());

        let input = parse(&["--window-start", "18:00", "--window-end", "18:00"])?
            .to_input(&index()?, &Assumptions::default())?;
        let window = input.window.unwrap();
        assert!(window.is_empty());
        assert!(!window.wraps_midnight());
        Ok(())
    }

    #[test]
    fn test_window() -> Result {
        let input = parse(&["--window-start", "16:00", "--window-end", "19:30"])?
            .to_input(&index()?, &Assumptions::default())?;
        assert_eq!(input.window.unwrap().to_string(), "16:00-19:30");
        assert!(!input.window.unwrap().wraps_midnight());
        assert!(parse(&["--window-start", "16:00"]).is_err());
        assert!(parse(&["--window-start", "4pm", "--window-end", "19:30"]).is_err());
        Ok(())
    }
}
