use crate::quantity::energy::KilowattHours;

quantity!(
    /// Grid carbon intensity.
    KilogramsPerKilowattHour, via: f64, suffix: "kg/kWh", precision: 2
);

quantity!(
    /// Mass of CO₂.
    Kilograms, via: f64, suffix: "kg", precision: 0
);

implement_mul!(KilowattHours, KilogramsPerKilowattHour, Kilograms);

impl Kilograms {
    pub const fn to_tonnes(self) -> f64 {
        self.0 / 1000.0
    }
}
