quantity!(Pence, via: f64, suffix: "p", precision: 0);
quantity!(Pounds, via: f64, prefix: "£", precision: 2);

impl From<Pence> for Pounds {
    fn from(pence: Pence) -> Self {
        Self(pence.0 / 100.0)
    }
}
