use std::fmt::{Display, Formatter};

use bon::Builder;
use chrono::NaiveTime;

use crate::{
    error::InputError,
    estimator::{
        EstimateResult,
        bounds::Bounds,
        estimate_co2_savings,
        estimate_cost_savings,
        estimate_incentives,
    },
    quantity::{
        emissions::KilogramsPerKilowattHour,
        power::Kilowatts,
        price::{PencePerKilowattHour, PoundsPerKilowattHour},
        ratios::Percentage,
        time::Hours,
    },
};

/// Everything a single calculation request needs.
#[derive(Clone, Debug, Builder)]
pub struct EstimateInput {
    /// Shiftable capacity.
    pub capacity: Kilowatts,

    /// Flexibility hours per day.
    pub hours_per_day: Hours,

    pub peak_rate: PencePerKilowattHour,

    /// Off-peak or average tariff.
    pub baseline_rate: PencePerKilowattHour,

    pub participation: Bounds<Percentage>,

    /// Requested only when the asset may qualify for flexibility programmes.
    pub incentives: Option<IncentiveInput>,

    /// Requested only when the CO₂ estimate is wanted.
    pub emission_factors: Option<EmissionFactors>,

    /// Echoed to the export, not used in the calculation.
    pub window: Option<FlexibilityWindow>,
}

#[derive(Clone, Debug)]
pub struct IncentiveInput {
    /// Hours per year available for dispatch.
    pub availability_hours: Bounds<Hours>,

    pub rate: PoundsPerKilowattHour,

    /// Services the rate was derived from, if any.
    pub services: Vec<String>,
}

#[derive(Copy, Clone, Debug)]
pub struct EmissionFactors {
    pub peak: KilogramsPerKilowattHour,
    pub off_peak: KilogramsPerKilowattHour,
}

/// Earliest start and latest finish of the shifted consumption.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct FlexibilityWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl FlexibilityWindow {
    /// The window ends on the next day.
    pub fn wraps_midnight(self) -> bool {
        self.end < self.start
    }

    pub fn is_empty(self) -> bool {
        self.end == self.start
    }
}

impl Display for FlexibilityWindow {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start.format("%H:%M"), self.end.format("%H:%M"))
    }
}

impl EstimateInput {
    pub fn estimate(&self) -> Result<EstimateResult, InputError> {
        let cost_savings = estimate_cost_savings(
            self.capacity,
            self.hours_per_day,
            self.peak_rate,
            self.baseline_rate,
            self.participation,
        )?;
        let incentives = self
            .incentives
            .as_ref()
            .map(|incentives| {
                estimate_incentives(
                    self.capacity,
                    incentives.availability_hours,
                    incentives.rate,
                    self.participation,
                )
            })
            .transpose()?;
        let co2_savings = self
            .emission_factors
            .map(|factors| {
                estimate_co2_savings(self.capacity, self.hours_per_day, factors.peak, factors.off_peak)
            })
            .transpose()?;
        Ok(EstimateResult { input: self.clone(), cost_savings, incentives, co2_savings })
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn input() -> EstimateInput {
        EstimateInput::builder()
            .capacity(Kilowatts(100.0))
            .hours_per_day(Hours(4.0))
            .peak_rate(PencePerKilowattHour(35.0))
            .baseline_rate(PencePerKilowattHour(15.0))
            .participation(Bounds::new(Percentage(30.0), Percentage(80.0)))
            .build()
    }

    #[test]
    fn test_cost_only() -> Result<(), InputError> {
        let result = input().estimate()?;
        assert_abs_diff_eq!(result.cost_savings.low.0, 8760.0, epsilon = 1e-6);
        assert!(result.incentives.is_none());
        assert!(result.co2_savings.is_none());
        assert_abs_diff_eq!(result.input.capacity.0, 100.0);
        Ok(())
    }

    #[test]
    fn test_all_metrics() -> Result<(), InputError> {
        let mut input = input();
        input.incentives = Some(IncentiveInput {
            availability_hours: Bounds::new(Hours(2000.0), Hours(4000.0)),
            rate: PoundsPerKilowattHour(0.02),
            services: vec!["Dynamic Containment (DC)".to_owned()],
        });
        input.emission_factors = Some(EmissionFactors {
            peak: KilogramsPerKilowattHour(0.25),
            off_peak: KilogramsPerKilowattHour(0.15),
        });
        let result = input.estimate()?;
        let incentives = result.incentives.unwrap();
        assert_abs_diff_eq!(incentives.high.0, 6400.0, epsilon = 1e-9);
        assert_abs_diff_eq!(result.co2_savings.unwrap().high.0, 14_600.0, epsilon = 1e-6);
        assert_abs_diff_eq!(result.total_value().low.0, 8760.0 + 1200.0, epsilon = 1e-6);
        Ok(())
    }

    #[test]
    fn test_rejects_invalid_incentives() {
        let mut input = input();
        input.incentives = Some(IncentiveInput {
            availability_hours: Bounds::new(Hours(2000.0), Hours(10_000.0)),
            rate: PoundsPerKilowattHour(0.02),
            services: Vec::new(),
        });
        let result = input.estimate();
        assert!(matches!(result, Err(InputError::OutOfRange { field: "availability hours high", .. })));
    }

    #[test]
    fn test_window_display() {
        let window = FlexibilityWindow {
            start: NaiveTime::from_hms_opt(16, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(19, 30, 0).unwrap(),
        };
        assert_eq!(window.to_string(), "16:00-19:30");
    }
}
