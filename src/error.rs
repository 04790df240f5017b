use std::path::PathBuf;

use thiserror::Error;

/// The dataset could not be turned into an index.
///
/// Fatal: there is no partially loaded index.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("failed to read the dataset from `{path}`")]
    Io {
        path: PathBuf,

        #[source]
        source: std::io::Error,
    },

    #[error("the dataset is malformed: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("the dataset is missing the required top-level key `{0}`")]
    MissingKey(&'static str),

    #[error("the dataset lists {0} services, more than can be indexed")]
    TooManyServices(usize),

    #[error("the dataset lists service `{0}` more than once")]
    DuplicateService(String),

    #[error("{mode} compatibility refers to unknown service `{name}`")]
    UnknownService { mode: String, name: String },
}

/// The caller passed something the index or the estimator cannot work with.
#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("unknown service `{0}`")]
    UnknownService(String),

    #[error("at least two distinct services are needed, got {distinct}")]
    TooFewServices { distinct: usize },

    #[error("`{field}` must be a finite number")]
    NonFinite { field: &'static str },

    #[error("`{field}` must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("`{field}` must be within {min}..={max}, got {value}")]
    OutOfRange { field: &'static str, value: f64, min: f64, max: f64 },
}
