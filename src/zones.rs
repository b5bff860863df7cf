//! Static zone descriptions, keyed by the identifier carried by each map region.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Shown for any zone the table doesn't know about.
pub const FALLBACK_DESCRIPTION: &str = "No information available.";

/// Text shown in the zone modal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneInfo {
    pub description: String,
    #[serde(default)]
    pub contact: String,
}

impl ZoneInfo {
    pub fn fallback() -> Self {
        Self {
            description: FALLBACK_DESCRIPTION.to_owned(),
            contact: String::new(),
        }
    }
}

/// One entry of a zone table file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneRecord {
    /// Zone identifier, matching the `zone:<id>` element id in the map SVG
    pub id: String,
    pub description: String,
    /// Phone number or office to reach; may be empty
    #[serde(default)]
    pub contact: String,
}

/// Errors that can occur when loading a zone table.
#[derive(Error, Debug)]
pub enum ZoneTableError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse RON zone table: {0}")]
    ParseRon(#[from] ron::de::SpannedError),
    #[error("failed to parse JSON zone table: {0}")]
    ParseJson(#[from] serde_json::Error),
    #[error("zone '{0}' is listed more than once")]
    DuplicateZone(String),
    #[error("unsupported zone table format '{0}' (expected .ron or .json)")]
    UnsupportedFormat(String),
}

/// Immutable lookup from zone identifier to [`ZoneInfo`].
#[derive(Debug, Clone)]
pub struct ZoneTable {
    zones: HashMap<String, ZoneInfo>,
    fallback: ZoneInfo,
}

impl Default for ZoneTable {
    fn default() -> Self {
        Self {
            zones: HashMap::new(),
            fallback: ZoneInfo::fallback(),
        }
    }
}

impl ZoneTable {
    /// Builds a table, rejecting repeated identifiers.
    pub fn from_records(records: Vec<ZoneRecord>) -> Result<Self, ZoneTableError> {
        let mut zones = HashMap::with_capacity(records.len());
        for record in records {
            let info = ZoneInfo {
                description: record.description,
                contact: record.contact,
            };
            if zones.insert(record.id.clone(), info).is_some() {
                return Err(ZoneTableError::DuplicateZone(record.id));
            }
        }
        Ok(Self {
            zones,
            ..Self::default()
        })
    }

    pub fn from_ron_str(source: &str) -> Result<Self, ZoneTableError> {
        let records: Vec<ZoneRecord> = ron::from_str(source)?;
        Self::from_records(records)
    }

    pub fn from_json_str(source: &str) -> Result<Self, ZoneTableError> {
        let records: Vec<ZoneRecord> = serde_json::from_str(source)?;
        Self::from_records(records)
    }

    /// Loads a `.ron` or `.json` table from disk, picking the parser by extension.
    pub fn load(path: &Path) -> Result<Self, ZoneTableError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let source = std::fs::read_to_string(path).map_err(|source| ZoneTableError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        match extension.as_str() {
            "ron" => Self::from_ron_str(&source),
            "json" => Self::from_json_str(&source),
            other => Err(ZoneTableError::UnsupportedFormat(other.to_owned())),
        }
    }

    /// Returns the record for `id`, or the fixed fallback record.
    pub fn lookup(&self, id: &str) -> &ZoneInfo {
        self.zones.get(id).unwrap_or(&self.fallback)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.zones.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}
