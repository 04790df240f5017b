use crate::{
    error::InputError,
    estimator::bounds::Bounds,
    quantity::{power::Kilowatts, ratios::Percentage, time::Hours},
};

pub fn finite(field: &'static str, value: f64) -> Result<f64, InputError> {
    if value.is_finite() { Ok(value) } else { Err(InputError::NonFinite { field }) }
}

pub fn non_negative(field: &'static str, value: f64) -> Result<f64, InputError> {
    if finite(field, value)? < 0.0 { Err(InputError::Negative { field, value }) } else { Ok(value) }
}

pub fn within(field: &'static str, value: f64, min: f64, max: f64) -> Result<f64, InputError> {
    if (min..=max).contains(&finite(field, value)?) {
        Ok(value)
    } else {
        Err(InputError::OutOfRange { field, value, min, max })
    }
}

pub fn capacity(capacity: Kilowatts) -> Result<Kilowatts, InputError> {
    non_negative("capacity", capacity.0).map(Kilowatts)
}

pub fn hours_per_day(hours: Hours) -> Result<Hours, InputError> {
    within("hours per day", hours.0, 0.0, Hours::PER_DAY.0).map(Hours)
}

pub fn participation(participation: Bounds<Percentage>) -> Result<Bounds<Percentage>, InputError> {
    within("participation low", participation.low.0, 0.0, Percentage::HUNDRED.0)?;
    within("participation high", participation.high.0, 0.0, Percentage::HUNDRED.0)?;
    Ok(participation)
}
