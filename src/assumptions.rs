//! Editable defaults behind the estimator inputs.

use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::{
    compatibility::Service,
    prelude::*,
    quantity::{
        emissions::KilogramsPerKilowattHour,
        price::{PencePerKilowattHour, PoundsPerKilowattHour},
        ratios::Percentage,
        time::Hours,
    },
};

#[must_use]
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Assumptions {
    /// Typical UK commercial peak.
    #[serde(rename = "peak_rate_pence_per_kwh")]
    pub peak_rate: PencePerKilowattHour,

    /// Typical UK commercial off-peak.
    #[serde(rename = "baseline_rate_pence_per_kwh")]
    pub baseline_rate: PencePerKilowattHour,

    #[serde(rename = "participation_low_percent")]
    pub participation_low: Percentage,

    #[serde(rename = "participation_high_percent")]
    pub participation_high: Percentage,

    /// UK grid at peak hours.
    #[serde(rename = "peak_emission_factor_kg_per_kwh")]
    pub peak_emission_factor: KilogramsPerKilowattHour,

    /// UK grid off-peak, with more renewables.
    #[serde(rename = "off_peak_emission_factor_kg_per_kwh")]
    pub off_peak_emission_factor: KilogramsPerKilowattHour,

    pub availability_hours_low: Hours,
    pub availability_hours_high: Hours,

    pub incentive_rates: IncentiveRates,
}

impl Default for Assumptions {
    fn default() -> Self {
        Self {
            peak_rate: PencePerKilowattHour(35.0),
            baseline_rate: PencePerKilowattHour(15.0),
            participation_low: Percentage(30.0),
            participation_high: Percentage(80.0),
            peak_emission_factor: KilogramsPerKilowattHour(0.25),
            off_peak_emission_factor: KilogramsPerKilowattHour(0.15),
            availability_hours_low: Hours(2000.0),
            availability_hours_high: Hours(4000.0),
            incentive_rates: IncentiveRates::default(),
        }
    }
}

impl Assumptions {
    /// Read the overrides, or fall back to the defaults when no path is given.
    #[instrument(skip_all)]
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::read_from(path),
            None => Ok(Self::default()),
        }
    }

    fn read_from(path: &Path) -> Result<Self> {
        info!(path = %path.display(), "reading the assumptions…");
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read `{}`", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("failed to parse `{}`", path.display()))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

/// Indicative availability rates per service, from recent auction results.
#[must_use]
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IncentiveRates {
    /// Rate for a service missing from the table.
    #[serde(rename = "fallback_pounds_per_kwh")]
    pub fallback: PoundsPerKilowattHour,

    /// Service name to £ per kW per hour of availability.
    pub services: IndexMap<String, PoundsPerKilowattHour>,
}

impl Default for IncentiveRates {
    fn default() -> Self {
        let services = [
            ("Dynamic Containment (DC)", 0.020),
            ("Dynamic Moderation (DM)", 0.015),
            ("Dynamic Regulation (DR)", 0.018),
            ("Demand Flexibility Service (DFS)", 0.50),
            ("Peak load reduction (PR)", 0.010),
            ("Balancing Reserve (BR)", 0.012),
            ("Quick Reserve (QR)", 0.015),
            ("Static Firm Frequency Response (SFFR)", 0.010),
        ]
        .into_iter()
        .map(|(name, rate)| (name.to_owned(), PoundsPerKilowattHour(rate)))
        .collect();
        Self { fallback: PoundsPerKilowattHour(0.005), services }
    }
}

impl IncentiveRates {
    /// Rate of a resolved service, keyed in the table by its name or abbreviation.
    pub fn rate_of(&self, service: &Service) -> PoundsPerKilowattHour {
        self.services
            .iter()
            .find(|(key, _)| service.is_called(key))
            .map_or(self.fallback, |(_, rate)| *rate)
    }

    /// Mean rate over the selected services, [`None`] when nothing is selected.
    pub fn mean_rate(&self, services: &[&Service]) -> Option<PoundsPerKilowattHour> {
        if services.is_empty() {
            return None;
        }
        #[expect(clippy::cast_precision_loss)]
        let n_services = services.len() as f64;
        let total: PoundsPerKilowattHour =
            services.iter().map(|service| self.rate_of(service)).sum();
        Some(total / n_services)
    }
}
