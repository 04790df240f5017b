use crate::quantity::{
    currency::{Pence, Pounds},
    energy::KilowattHours,
};

quantity!(
    /// Retail tariff, pence per kilowatt-hour.
    PencePerKilowattHour, via: f64, suffix: "p/kWh", precision: 1
);

quantity!(
    /// Incentive rate, pounds per kilowatt per hour of availability.
    PoundsPerKilowattHour, via: f64, suffix: "£/kWh", precision: 3
);

implement_mul!(KilowattHours, PencePerKilowattHour, Pence);
implement_mul!(KilowattHours, PoundsPerKilowattHour, Pounds);
