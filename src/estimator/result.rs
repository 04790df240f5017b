use crate::{
    estimator::{bounds::Bounds, input::EstimateInput},
    quantity::{currency::Pounds, emissions::Kilograms},
};

/// Outcome of one calculation, with the inputs it was computed from.
#[derive(Clone, Debug)]
pub struct EstimateResult {
    pub input: EstimateInput,
    pub cost_savings: Bounds<Pounds>,

    /// Present when incentives were requested.
    pub incentives: Option<Bounds<Pounds>>,

    /// Present when the CO₂ estimate was requested.
    pub co2_savings: Option<Bounds<Kilograms>>,
}

impl EstimateResult {
    /// Cost savings plus potential incentives.
    pub fn total_value(&self) -> Bounds<Pounds> {
        self.incentives.map_or(self.cost_savings, |incentives| self.cost_savings + incentives)
    }
}
