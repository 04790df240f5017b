mod raw;

use std::{
    cell::OnceCell,
    path::{Path, PathBuf},
};

pub use self::raw::{Metadata, RawDataset, RawRecord};
use crate::{compatibility::CompatibilityIndex, error::DataLoadError, prelude::*};

const REQUIRED_KEYS: [&str; 3] = ["services", "compatibility", "technical_requirements"];

/// Parse the dataset text, checking the required top-level keys first.
pub fn parse(text: &str) -> Result<RawDataset, DataLoadError> {
    let document: serde_json::Value = serde_json::from_str(text)?;
    if let Some(key) = REQUIRED_KEYS.into_iter().find(|key| document.get(key).is_none()) {
        return Err(DataLoadError::MissingKey(key));
    }
    Ok(serde_json::from_value(document)?)
}

/// Owns the dataset location and loads the index at most once.
pub struct Dataset {
    path: PathBuf,
    index: OnceCell<CompatibilityIndex>,
}

impl Dataset {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), index: OnceCell::new() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the index on the first call, then return the same one.
    ///
    /// A failed load is not cached.
    pub fn load(&self) -> Result<&CompatibilityIndex, DataLoadError> {
        if let Some(index) = self.index.get() {
            return Ok(index);
        }
        let index = Self::read(&self.path)?;
        Ok(self.index.get_or_init(|| index))
    }

    #[instrument(skip_all, fields(path = %path.display()))]
    fn read(path: &Path) -> Result<CompatibilityIndex, DataLoadError> {
        info!("loading the dataset…");
        let text = std::fs::read_to_string(path)
            .map_err(|source| DataLoadError::Io { path: path.to_path_buf(), source })?;
        CompatibilityIndex::try_from_raw(parse(&text)?)
    }
}
