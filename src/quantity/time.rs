quantity!(Hours, via: f64, suffix: "h", precision: 1);

impl Hours {
    pub const PER_DAY: Self = Self(24.0);

    /// Non-leap year.
    pub const PER_YEAR: Self = Self(8760.0);
}
