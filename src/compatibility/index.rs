use std::collections::{HashMap, hash_map::Entry};

use enumset::EnumSet;
use itertools::Itertools;

use crate::{
    compatibility::{
        mode::StackingMode,
        requirements::TechnicalRequirements,
        resolver::ServiceResolver,
        service::{Service, ServiceId, ServicePair},
        status::CompatibilityRecord,
    },
    dataset::{Metadata, RawDataset, RawRecord},
    error::{DataLoadError, InputError},
    prelude::*,
};

/// Immutable compatibility lookup over the revenue stacking dataset.
///
/// Built once and shared by reference; nothing mutates it after construction.
pub struct CompatibilityIndex {
    metadata: Metadata,
    services: Vec<Service>,
    resolver: ServiceResolver,
    records: HashMap<(StackingMode, ServicePair), CompatibilityRecord>,
    requirements: HashMap<ServiceId, TechnicalRequirements>,
}

/// Compatibility of one unordered pair under one mode.
#[derive(Debug)]
pub struct PairRecord<'a> {
    pub first: &'a Service,
    pub second: &'a Service,
    pub mode: StackingMode,
    pub record: &'a CompatibilityRecord,
}

/// Square grid of records, rows and columns in the order the services were asked for.
pub struct Matrix<'a> {
    pub mode: StackingMode,
    pub services: Vec<&'a Service>,

    /// `cells[row][column]`.
    pub cells: Vec<Vec<&'a CompatibilityRecord>>,
}

impl CompatibilityIndex {
    #[instrument(skip_all)]
    pub fn try_from_raw(raw: RawDataset) -> Result<Self, DataLoadError> {
        let RawDataset {
            metadata,
            services: raw_services,
            service_abbreviations,
            compatibility,
            technical_requirements,
            service_name_mapping,
        } = raw;

        let mut services = Vec::with_capacity(raw_services.len());
        let mut resolver = ServiceResolver::default();

        // Canonical names first, so that no alias can shadow one.
        for (index, raw_service) in raw_services.iter().enumerate() {
            let name = raw_service.name().trim();
            if resolver.get(name).is_some() {
                return Err(DataLoadError::DuplicateService(name.to_owned()));
            }
            let id = u16::try_from(index)
                .map(ServiceId)
                .map_err(|_| DataLoadError::TooManyServices(raw_services.len()))?;
            resolver.insert(name, id);
            let abbreviation = raw_service
                .abbreviation()
                .or_else(|| service_abbreviations.get(name).map(String::as_str))
                .map(str::trim)
                .filter(|abbreviation| !abbreviation.is_empty())
                .or_else(|| Service::abbreviation_in_name(name))
                .map(str::to_owned);
            services.push(Service { id, name: name.to_owned(), abbreviation });
        }
        for service in &services {
            if let Some(abbreviation) = &service.abbreviation {
                resolver.insert(abbreviation, service.id);
            }
        }
        for service in &services {
            if let Some(mapped) = service_name_mapping.get(&service.name) {
                resolver.insert(mapped, service.id);
            }
        }

        let mut records = HashMap::new();
        for (mode_key, table) in compatibility {
            let Some(mode) = StackingMode::from_dataset_key(&mode_key) else {
                warn!(mode = %mode_key, "skipping an unknown stacking mode");
                continue;
            };
            let resolve = |name: &str| {
                resolver.get(name).ok_or_else(|| DataLoadError::UnknownService {
                    mode: mode_key.clone(),
                    name: name.to_owned(),
                })
            };
            for (first_name, row) in table {
                let first = resolve(&first_name)?;
                for (second_name, raw_record) in row {
                    let second = resolve(&second_name)?;
                    let Some(pair) = ServicePair::new(first, second) else {
                        continue;
                    };
                    let record = CompatibilityRecord::from_value(
                        raw_record.and_then(RawRecord::into_value),
                    );
                    match records.entry((mode, pair)) {
                        Entry::Vacant(entry) => {
                            entry.insert(record);
                        }
                        Entry::Occupied(entry) if *entry.get() != record => {
                            warn!(
                                %mode,
                                first = %first_name,
                                second = %second_name,
                                kept = ?entry.get().status,
                                ignored = ?record.status,
                                "conflicting compatibility for the reversed pair",
                            );
                        }
                        Entry::Occupied(_) => {}
                    }
                }
            }
        }

        let mut requirements = HashMap::new();
        for (key, fields) in &technical_requirements {
            match resolver.get(key) {
                Some(id) => {
                    requirements
                        .entry(id)
                        .or_insert_with(|| TechnicalRequirements::from_fields(fields));
                }
                None => {
                    debug!(%key, "technical requirements for a service outside the catalog");
                }
            }
        }

        let n_records = records.keys().counts_by(|(mode, _)| *mode);
        for mode in EnumSet::<StackingMode>::all() {
            info!(%mode, n_records = n_records.get(&mode).copied().unwrap_or_default(), "indexed");
        }
        info!(
            n_services = services.len(),
            n_records = records.len(),
            n_requirements = requirements.len(),
            "indexed the dataset",
        );
        Ok(Self { metadata, services, resolver, records, requirements })
    }

    pub const fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// The full catalog in dataset order.
    pub fn list_services(&self) -> &[Service] {
        &self.services
    }

    pub fn service(&self, id: ServiceId) -> &Service {
        &self.services[id.index()]
    }

    /// Normalise a name, abbreviation or alias to the catalog entry.
    pub fn resolve(&self, name: &str) -> Result<&Service, InputError> {
        self.resolver.resolve(name).map(|id| self.service(id))
    }

    /// Look up already resolved services.
    ///
    /// A service paired with itself is always not applicable. Missing entries are not yet assessed.
    pub fn lookup(
        &self,
        lhs: ServiceId,
        rhs: ServiceId,
        mode: StackingMode,
    ) -> &CompatibilityRecord {
        const NOT_APPLICABLE: &CompatibilityRecord = &CompatibilityRecord::NOT_APPLICABLE;
        const NO_DATA: &CompatibilityRecord = &CompatibilityRecord::NO_DATA;

        ServicePair::new(lhs, rhs)
            .map_or(NOT_APPLICABLE, |pair| self.records.get(&(mode, pair)).unwrap_or(NO_DATA))
    }

    pub fn get_compatibility(
        &self,
        lhs: &str,
        rhs: &str,
        mode: StackingMode,
    ) -> Result<&CompatibilityRecord, InputError> {
        let lhs = self.resolver.resolve(lhs)?;
        let rhs = self.resolver.resolve(rhs)?;
        Ok(self.lookup(lhs, rhs, mode))
    }

    /// Compatibility of the pair under every mode.
    pub fn check_pair(&self, lhs: &str, rhs: &str) -> Result<Vec<PairRecord<'_>>, InputError> {
        let first = self.resolve(lhs)?;
        let second = self.resolve(rhs)?;
        Ok(EnumSet::<StackingMode>::all()
            .iter()
            .map(|mode| PairRecord {
                first,
                second,
                mode,
                record: self.lookup(first.id, second.id, mode),
            })
            .collect())
    }

    /// Compatibility of every unordered pair drawn from the services.
    ///
    /// Duplicates, including aliases of the same service, count once.
    pub fn check_multiple<S: AsRef<str>>(
        &self,
        services: &[S],
        mode: StackingMode,
    ) -> Result<Vec<PairRecord<'_>>, InputError> {
        let services = self.resolve_distinct(services)?;
        if services.len() < 2 {
            return Err(InputError::TooFewServices { distinct: services.len() });
        }
        Ok(services
            .into_iter()
            .tuple_combinations()
            .map(|(first, second)| PairRecord {
                first,
                second,
                mode,
                record: self.lookup(first.id, second.id, mode),
            })
            .collect())
    }

    pub fn matrix<S: AsRef<str>>(
        &self,
        services: &[S],
        mode: StackingMode,
    ) -> Result<Matrix<'_>, InputError> {
        let services = self.resolve_distinct(services)?;
        let cells = services
            .iter()
            .map(|row| services.iter().map(|column| self.lookup(row.id, column.id, mode)).collect())
            .collect();
        Ok(Matrix { mode, services, cells })
    }

    /// Technical requirements of the service.
    ///
    /// [`None`] means that there are none, or that the service is unknown.
    pub fn get_technical_requirements(&self, service: &str) -> Option<&TechnicalRequirements> {
        self.resolver.get(service).and_then(|id| self.requirements.get(&id))
    }

    fn resolve_distinct<S: AsRef<str>>(&self, services: &[S]) -> Result<Vec<&Service>, InputError> {
        let services = services
            .iter()
            .map(|name| self.resolve(name.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(services.into_iter().unique_by(|service| service.id).collect())
    }
}
