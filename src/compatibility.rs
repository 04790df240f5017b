mod index;
mod mode;
mod requirements;
mod resolver;
mod service;
mod status;

pub use self::{
    index::{CompatibilityIndex, Matrix, PairRecord},
    mode::StackingMode,
    requirements::TechnicalRequirements,
    service::{Service, ServiceId},
    status::{CompatibilityRecord, CompatibilityStatus},
};
