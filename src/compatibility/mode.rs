use std::fmt::{Display, Formatter};

/// How the same asset takes part in two services.
#[derive(Debug, Hash, clap::ValueEnum, enumset::EnumSetType)]
pub enum StackingMode {
    /// Same capacity, same time, same direction.
    #[value(name = "co-delivery", alias = "codelivery")]
    CoDelivery,

    /// Capacity divided between the services at the same time.
    Splitting,

    /// The same capacity switched between the services at different times.
    Jumping,
}

impl StackingMode {
    /// Parse the key used for the mode in the dataset.
    pub fn from_dataset_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().replace(['-', '_', ' '], "").as_str() {
            "codelivery" => Some(Self::CoDelivery),
            "splitting" => Some(Self::Splitting),
            "jumping" => Some(Self::Jumping),
            _ => None,
        }
    }

    pub const fn summary(self) -> &'static str {
        match self {
            Self::CoDelivery => "same MW, same time, same direction",
            Self::Splitting => "different MW, same asset, same time",
            Self::Jumping => "same asset, different times",
        }
    }
}

impl Display for StackingMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CoDelivery => write!(f, "Co-delivery"),
            Self::Splitting => write!(f, "Splitting"),
            Self::Jumping => write!(f, "Jumping"),
        }
    }
}
