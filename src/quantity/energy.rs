use crate::quantity::{power::Kilowatts, time::Hours};

quantity!(KilowattHours, via: f64, suffix: "kWh", precision: 0);

implement_mul!(Kilowatts, Hours, KilowattHours);
