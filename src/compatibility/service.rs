use std::fmt::{Display, Formatter};

/// Position of the service in the catalog.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, derive_more::Display)]
#[must_use]
pub struct ServiceId(pub u16);

impl ServiceId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Service {
    pub id: ServiceId,

    /// Canonical name, for example `Dynamic Containment (DC)`.
    pub name: String,

    pub abbreviation: Option<String>,
}

impl Service {
    /// Abbreviation in the trailing parentheses: `Dynamic Containment (DC)` → `DC`.
    ///
    /// Qualifiers with spaces, like `(week ahead)`, are not abbreviations.
    pub fn abbreviation_in_name(name: &str) -> Option<&str> {
        let (_, tail) = name.trim_end().strip_suffix(')')?.rsplit_once('(')?;
        let tail = tail.trim();
        (!tail.is_empty() && !tail.contains(char::is_whitespace)).then_some(tail)
    }

    /// The name or the abbreviation matches, ignoring case and surrounding whitespace.
    pub fn is_called(&self, alias: &str) -> bool {
        let alias = alias.trim();
        self.name.eq_ignore_ascii_case(alias)
            || self.abbreviation.as_deref().is_some_and(|it| it.eq_ignore_ascii_case(alias))
    }
}

impl Display for Service {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Unordered pair of distinct services.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[must_use]
pub struct ServicePair(ServiceId, ServiceId);

impl ServicePair {
    /// Returns [`None`] when both sides are the same service.
    pub fn new(lhs: ServiceId, rhs: ServiceId) -> Option<Self> {
        match lhs.cmp(&rhs) {
            std::cmp::Ordering::Less => Some(Self(lhs, rhs)),
            std::cmp::Ordering::Greater => Some(Self(rhs, lhs)),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub const fn first(self) -> ServiceId {
        self.0
    }

    pub const fn second(self) -> ServiceId {
        self.1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_is_order_independent() {
        assert_eq!(
            ServicePair::new(ServiceId(3), ServiceId(1)),
            ServicePair::new(ServiceId(1), ServiceId(3)),
        );
    }

    #[test]
    fn test_abbreviation_in_name() {
        assert_eq!(Service::abbreviation_in_name("Quick Reserve (QR)"), Some("QR"));
        assert_eq!(Service::abbreviation_in_name("Operational Utilisation (OU) (week ahead)"), None);
        assert_eq!(Service::abbreviation_in_name("Wholesale"), None);
        assert_eq!(Service::abbreviation_in_name("Empty ()"), None);
    }

    #[test]
    fn test_is_called() {
        let service = Service {
            id: ServiceId(0),
            name: "Dynamic Containment (DC)".to_owned(),
            abbreviation: Some("DC".to_owned()),
        };
        assert!(service.is_called(" dynamic containment (dc)"));
        assert!(service.is_called("dc"));
        assert!(!service.is_called("DM"));
    }

    #[test]
    fn test_pair_with_itself() {
        assert_eq!(ServicePair::new(ServiceId(2), ServiceId(2)), None);
    }
}
