//! On-disk layout of the revenue stacking dataset.
//!
//! The layout is owned upstream, so everything except the required keys is optional.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_with::serde_as;

#[serde_as]
#[derive(Deserialize)]
pub struct RawDataset {
    #[serde_as(as = "serde_with::DefaultOnNull")]
    #[serde(default)]
    pub metadata: Metadata,

    pub services: Vec<RawService>,

    /// Service name to its abbreviation.
    #[serde_as(as = "serde_with::DefaultOnNull")]
    #[serde(default)]
    pub service_abbreviations: IndexMap<String, String>,

    /// Mode, then the first service, then the second service.
    pub compatibility: IndexMap<String, IndexMap<String, IndexMap<String, Option<RawRecord>>>>,

    /// Requirements keyed by the mapped service name.
    pub technical_requirements: IndexMap<String, IndexMap<String, serde_json::Value>>,

    /// Service name to its technical requirements key.
    #[serde_as(as = "serde_with::DefaultOnNull")]
    #[serde(default)]
    pub service_name_mapping: IndexMap<String, String>,
}

/// Free-form dataset description: title, version, source, date.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Metadata(pub IndexMap<String, serde_json::Value>);

impl Metadata {
    /// Render the field as text, whatever JSON type it has.
    pub fn get(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            serde_json::Value::Null => None,
            serde_json::Value::String(text) => Some(text.clone()),
            other => Some(other.to_string()),
        }
    }

    pub fn title(&self) -> Option<String> {
        self.get("title")
    }

    pub fn version(&self) -> Option<String> {
        self.get("version")
    }

    pub fn source(&self) -> Option<String> {
        self.get("source")
    }

    pub fn date(&self) -> Option<String> {
        self.get("date")
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
pub enum RawService {
    Name(String),
    Descriptor {
        name: String,

        #[serde(default)]
        abbreviation: Option<String>,
    },
}

impl RawService {
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) | Self::Descriptor { name, .. } => name,
        }
    }

    pub fn abbreviation(&self) -> Option<&str> {
        match self {
            Self::Name(_) => None,
            Self::Descriptor { abbreviation, .. } => abbreviation.as_deref(),
        }
    }
}

/// Compatibility cell: either `{"value": …, "color": …}` or the bare value.
#[derive(Deserialize)]
#[serde(untagged)]
pub enum RawRecord {
    Text(String),
    Entry {
        #[serde(default)]
        value: Option<String>,
    },
}

impl RawRecord {
    pub fn into_value(self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text),
            Self::Entry { value } => value,
        }
    }
}
