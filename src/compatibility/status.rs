use std::fmt::{Display, Formatter};

use comfy_table::Color;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum CompatibilityStatus {
    /// The services may be stacked.
    Yes,

    /// The services may not be stacked.
    No,

    /// Not yet assessed.
    NoData,

    /// The combination makes no sense, for example a service paired with itself.
    NotApplicable,
}

impl CompatibilityStatus {
    /// Derive the status from the free-text value stored in the dataset.
    ///
    /// Values look like `Explicit Yes – …`, `Explicit No – …`, `No Data` or `N/A`.
    /// Anything else is not yet assessed.
    pub fn from_text(text: &str) -> Self {
        let text = text.trim().to_lowercase();
        if text.contains("explicit yes") {
            Self::Yes
        } else if text.contains("explicit no") {
            Self::No
        } else if text.contains("n/a") || text.contains("not applicable") {
            Self::NotApplicable
        } else {
            Self::NoData
        }
    }

    pub const fn badge(self) -> &'static str {
        match self {
            Self::Yes => "✅",
            Self::No => "❌",
            Self::NoData => "❓",
            Self::NotApplicable => "⚠️",
        }
    }

    pub const fn color(self) -> Color {
        match self {
            Self::Yes => Color::Green,
            Self::No => Color::Red,
            Self::NoData => Color::DarkYellow,
            Self::NotApplicable => Color::Reset,
        }
    }
}

impl Display for CompatibilityStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Yes => write!(f, "Compatible"),
            Self::No => write!(f, "Incompatible"),
            Self::NoData => write!(f, "Not yet assessed"),
            Self::NotApplicable => write!(f, "Not applicable"),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CompatibilityRecord {
    pub status: CompatibilityStatus,
    pub explanation: Option<String>,
}

impl CompatibilityRecord {
    pub const NO_DATA: Self = Self { status: CompatibilityStatus::NoData, explanation: None };

    pub const NOT_APPLICABLE: Self =
        Self { status: CompatibilityStatus::NotApplicable, explanation: None };

    /// Build the record from the dataset value, keeping the text as the explanation.
    pub fn from_value(value: Option<String>) -> Self {
        match value.map(|value| value.trim().to_owned()).filter(|value| !value.is_empty()) {
            Some(text) => Self { status: CompatibilityStatus::from_text(&text), explanation: Some(text) },
            None => Self::NO_DATA,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text() {
        assert_eq!(
            CompatibilityStatus::from_text("Explicit Yes - can be co-delivered"),
            CompatibilityStatus::Yes,
        );
        assert_eq!(
            CompatibilityStatus::from_text("Explicit No - exclusivity clause"),
            CompatibilityStatus::No,
        );
        assert_eq!(CompatibilityStatus::from_text("No Data"), CompatibilityStatus::NoData);
        assert_eq!(CompatibilityStatus::from_text("N/A"), CompatibilityStatus::NotApplicable);
        assert_eq!(CompatibilityStatus::from_text("maybe"), CompatibilityStatus::NoData);
    }

    #[test]
    fn test_unrecognised_text_is_no_data() {
        for text in ["Not yet assessed", "None stated", "Not assessed by the DSO", "Yes, probably"] {
            assert_eq!(CompatibilityStatus::from_text(text), CompatibilityStatus::NoData, "{text}");
        }
    }

    #[test]
    fn test_from_value_empty() {
        assert_eq!(CompatibilityRecord::from_value(None), CompatibilityRecord::NO_DATA);
        assert_eq!(CompatibilityRecord::from_value(Some("  ".into())), CompatibilityRecord::NO_DATA);
    }

    #[test]
    fn test_from_value_keeps_explanation() {
        let record = CompatibilityRecord::from_value(Some("Explicit No - same MW".into()));
        assert_eq!(record.status, CompatibilityStatus::No);
        assert_eq!(record.explanation.as_deref(), Some("Explicit No - same MW"));
    }
}
