use std::collections::{HashMap, hash_map::Entry};

use crate::{compatibility::service::ServiceId, error::InputError, prelude::*};

/// Alias table normalising user-facing names to catalog identifiers.
///
/// Matching is case-insensitive and ignores surrounding whitespace.
#[derive(Default)]
pub struct ServiceResolver(HashMap<String, ServiceId>);

impl ServiceResolver {
    fn normalize(alias: &str) -> String {
        alias.trim().to_lowercase()
    }

    /// Register an alias, keeping the earlier registration on a clash.
    pub fn insert(&mut self, alias: &str, id: ServiceId) {
        let key = Self::normalize(alias);
        if key.is_empty() {
            return;
        }
        match self.0.entry(key) {
            Entry::Vacant(entry) => {
                entry.insert(id);
            }
            Entry::Occupied(entry) if *entry.get() != id => {
                debug!(alias, kept = %entry.get(), ignored = %id, "ambiguous alias");
            }
            Entry::Occupied(_) => {}
        }
    }

    pub fn get(&self, alias: &str) -> Option<ServiceId> {
        self.0.get(&Self::normalize(alias)).copied()
    }

    pub fn resolve(&self, alias: &str) -> Result<ServiceId, InputError> {
        self.get(alias).ok_or_else(|| InputError::UnknownService(alias.to_owned()))
    }
}
