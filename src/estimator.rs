//! Indicative annual value of flexibility, as low/high ranges.
//!
//! Every function here is pure: same inputs, same outputs.

mod bounds;
mod input;
mod result;
mod validate;

pub use self::{
    bounds::Bounds,
    input::{EmissionFactors, EstimateInput, FlexibilityWindow, IncentiveInput},
    result::EstimateResult,
};
use crate::{
    error::InputError,
    prelude::*,
    quantity::{
        currency::Pounds,
        emissions::{Kilograms, KilogramsPerKilowattHour},
        power::Kilowatts,
        price::{PencePerKilowattHour, PoundsPerKilowattHour},
        ratios::Percentage,
        time::Hours,
    },
};

pub const DAYS_PER_YEAR: f64 = 365.0;

/// Annual savings from moving consumption out of the peak.
///
/// `capacity × hours per day × (peak − baseline) × participation × 365`, evaluated at the low
/// and at the high participation. A negative differential is not an error and yields negative
/// savings.
pub fn estimate_cost_savings(
    capacity: Kilowatts,
    hours_per_day: Hours,
    peak_rate: PencePerKilowattHour,
    baseline_rate: PencePerKilowattHour,
    participation: Bounds<Percentage>,
) -> Result<Bounds<Pounds>, InputError> {
    let capacity = validate::capacity(capacity)?;
    let hours_per_day = validate::hours_per_day(hours_per_day)?;
    validate::finite("peak rate", peak_rate.0)?;
    validate::finite("baseline rate", baseline_rate.0)?;
    let participation = validate::participation(participation)?;

    let differential = peak_rate - baseline_rate;
    if differential < PencePerKilowattHour::ZERO {
        warn!(%peak_rate, %baseline_rate, "the peak rate is below the baseline rate");
    }
    warn_if_unordered(participation);

    let daily_energy = capacity * hours_per_day;
    Ok(participation.map(|participation| {
        Pounds::from(daily_energy * differential * participation.to_ratio() * DAYS_PER_YEAR)
    }))
}

/// Potential annual incentive revenue.
///
/// `capacity × availability hours × rate × participation`. The low end combines the low
/// availability with the low participation, and the high end both highs, so the two
/// uncertainties always compound in the same direction rather than forming a true interval.
pub fn estimate_incentives(
    capacity: Kilowatts,
    availability_hours: Bounds<Hours>,
    rate: PoundsPerKilowattHour,
    participation: Bounds<Percentage>,
) -> Result<Bounds<Pounds>, InputError> {
    let capacity = validate::capacity(capacity)?;
    validate::within("availability hours low", availability_hours.low.0, 0.0, Hours::PER_YEAR.0)?;
    validate::within("availability hours high", availability_hours.high.0, 0.0, Hours::PER_YEAR.0)?;
    validate::non_negative("incentive rate", rate.0)?;
    let participation = validate::participation(participation)?;

    if !availability_hours.is_ordered() {
        warn!(
            low = %availability_hours.low,
            high = %availability_hours.high,
            "low availability is above the high one",
        );
    }
    warn_if_unordered(participation);

    Ok(availability_hours
        .zip(participation)
        .map(|(hours, participation)| capacity * hours * rate * participation.to_ratio()))
}

/// Annual CO₂ avoided by shifting from the peak to the off-peak.
///
/// `capacity × hours per day × (peak factor − off-peak factor) × 365`. There is no
/// participation axis, so the range is flat.
pub fn estimate_co2_savings(
    capacity: Kilowatts,
    hours_per_day: Hours,
    peak_factor: KilogramsPerKilowattHour,
    off_peak_factor: KilogramsPerKilowattHour,
) -> Result<Bounds<Kilograms>, InputError> {
    let capacity = validate::capacity(capacity)?;
    let hours_per_day = validate::hours_per_day(hours_per_day)?;
    validate::finite("peak emission factor", peak_factor.0)?;
    validate::finite("off-peak emission factor", off_peak_factor.0)?;

    let differential = peak_factor - off_peak_factor;
    if differential < KilogramsPerKilowattHour::ZERO {
        warn!(%peak_factor, %off_peak_factor, "the peak is cleaner than the off-peak");
    }
    Ok(Bounds::flat(capacity * hours_per_day * differential * DAYS_PER_YEAR))
}

fn warn_if_unordered(participation: Bounds<Percentage>) {
    if !participation.is_ordered() {
        warn!(
            low = %participation.low,
            high = %participation.high,
            "low participation is above the high one",
        );
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn participation(low: f64, high: f64) -> Bounds<Percentage> {
        Bounds::new(Percentage(low), Percentage(high))
    }

    #[test]
    fn test_cost_savings() -> Result {
        let savings = estimate_cost_savings(
            Kilowatts(100.0),
            Hours(4.0),
            PencePerKilowattHour(35.0),
            PencePerKilowattHour(15.0),
            participation(30.0, 80.0),
        )?;
        // 400 kWh × 20 p/kWh × 365 = £29 200 at full participation:
        assert_abs_diff_eq!(savings.low.0, 8760.0, epsilon = 1e-6);
        assert_abs_diff_eq!(savings.high.0, 23_360.0, epsilon = 1e-6);
        assert!(savings.is_ordered());
        Ok(())
    }

    #[test]
    fn test_cost_savings_negative_differential() -> Result {
        let savings = estimate_cost_savings(
            Kilowatts(10.0),
            Hours(2.0),
            PencePerKilowattHour(10.0),
            PencePerKilowattHour(15.0),
            participation(50.0, 100.0),
        )?;
        assert_abs_diff_eq!(savings.low.0, -182.5, epsilon = 1e-9);
        assert_abs_diff_eq!(savings.high.0, -365.0, epsilon = 1e-9);
        Ok(())
    }

    #[test]
    fn test_cost_savings_rejects_bad_input() {
        let estimate = |capacity, hours, low, high| {
            estimate_cost_savings(
                Kilowatts(capacity),
                Hours(hours),
                PencePerKilowattHour(35.0),
                PencePerKilowattHour(15.0),
                participation(low, high),
            )
        };
        assert!(matches!(estimate(-1.0, 4.0, 30.0, 80.0), Err(InputError::Negative { .. })));
        assert!(matches!(estimate(f64::NAN, 4.0, 30.0, 80.0), Err(InputError::NonFinite { .. })));
        assert!(matches!(estimate(100.0, 25.0, 30.0, 80.0), Err(InputError::OutOfRange { .. })));
        assert!(matches!(estimate(100.0, 4.0, -5.0, 80.0), Err(InputError::OutOfRange { .. })));
        assert!(matches!(estimate(100.0, 4.0, 30.0, 120.0), Err(InputError::OutOfRange { .. })));
    }

    #[test]
    fn test_cost_savings_rejects_non_finite_rate() {
        let result = estimate_cost_savings(
            Kilowatts(1.0),
            Hours(1.0),
            PencePerKilowattHour(f64::INFINITY),
            PencePerKilowattHour(15.0),
            participation(30.0, 80.0),
        );
        assert_eq!(result, Err(InputError::NonFinite { field: "peak rate" }));
    }

    #[test]
    fn test_unordered_participation_is_not_rejected() -> Result {
        let savings = estimate_cost_savings(
            Kilowatts(1.0),
            Hours(1.0),
            PencePerKilowattHour(20.0),
            PencePerKilowattHour(10.0),
            participation(80.0, 30.0),
        )?;
        assert!(savings.low > savings.high);
        Ok(())
    }

    #[test]
    fn test_ordered_participation_gives_ordered_bounds() -> Result {
        let participations = [(0.0, 0.0), (0.0, 100.0), (30.0, 80.0), (50.0, 50.0), (99.0, 100.0)];
        for (low, high) in participations {
            for differential in [0.0, 0.5, 20.0, 75.0] {
                let savings = estimate_cost_savings(
                    Kilowatts(250.0),
                    Hours(3.5),
                    PencePerKilowattHour(10.0 + differential),
                    PencePerKilowattHour(10.0),
                    participation(low, high),
                )?;
                assert!(savings.is_ordered(), "{low}..{high} at {differential} p/kWh: {savings}");
            }
            for (hours_low, hours_high) in [(0.0, 0.0), (2000.0, 4000.0), (8760.0, 8760.0)] {
                let incentives = estimate_incentives(
                    Kilowatts(250.0),
                    Bounds::new(Hours(hours_low), Hours(hours_high)),
                    PoundsPerKilowattHour(0.015),
                    participation(low, high),
                )?;
                assert!(incentives.is_ordered(), "{low}..{high} over {hours_low}..{hours_high} h");
            }
        }
        Ok(())
    }

    #[test]
    fn test_incentives() -> Result {
        let incentives = estimate_incentives(
            Kilowatts(100.0),
            Bounds::new(Hours(2000.0), Hours(4000.0)),
            PoundsPerKilowattHour(0.02),
            participation(30.0, 80.0),
        )?;
        assert_abs_diff_eq!(incentives.low.0, 1200.0, epsilon = 1e-9);
        assert_abs_diff_eq!(incentives.high.0, 6400.0, epsilon = 1e-9);
        Ok(())
    }

    #[test]
    fn test_incentives_rejects_bad_input() {
        let estimate = |hours_low, hours_high, rate| {
            estimate_incentives(
                Kilowatts(100.0),
                Bounds::new(Hours(hours_low), Hours(hours_high)),
                PoundsPerKilowattHour(rate),
                participation(30.0, 80.0),
            )
        };
        assert!(matches!(estimate(-1.0, 4000.0, 0.02), Err(InputError::OutOfRange { .. })));
        assert!(matches!(estimate(100.0, 9000.0, 0.02), Err(InputError::OutOfRange { .. })));
        assert!(matches!(estimate(100.0, 4000.0, -0.02), Err(InputError::Negative { .. })));
    }

    #[test]
    fn test_co2_savings() -> Result {
        let co2 = estimate_co2_savings(
            Kilowatts(100.0),
            Hours(4.0),
            KilogramsPerKilowattHour(0.25),
            KilogramsPerKilowattHour(0.15),
        )?;
        assert_abs_diff_eq!(co2.low.0, 14_600.0, epsilon = 1e-6);
        assert!(co2.is_flat());
        Ok(())
    }

    #[test]
    fn test_co2_savings_rejects_hours() {
        let result = estimate_co2_savings(
            Kilowatts(100.0),
            Hours(48.0),
            KilogramsPerKilowattHour(0.25),
            KilogramsPerKilowattHour(0.15),
        );
        assert!(matches!(result, Err(InputError::OutOfRange { field: "hours per day", .. })));
    }

    #[test]
    fn test_deterministic() -> Result {
        let estimate = || {
            estimate_cost_savings(
                Kilowatts(123.4),
                Hours(5.5),
                PencePerKilowattHour(31.7),
                PencePerKilowattHour(12.2),
                participation(25.0, 75.0),
            )
        };
        assert_eq!(estimate()?, estimate()?);
        Ok(())
    }
}
