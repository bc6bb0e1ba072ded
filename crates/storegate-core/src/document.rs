use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// One entry of a remote `versions` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionRecord {
    pub version: String,
    #[serde(default)]
    pub force_update: bool,
    /// Legacy documents only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_discontinued: Option<bool>,
}

impl VersionRecord {
    #[must_use]
    pub fn new(version: impl Into<String>, force_update: bool) -> Self {
        Self {
            version: version.into(),
            force_update,
            is_discontinued: None,
        }
    }

    /// Whether `version` follows `MAJOR.MINOR.PATCH[+BUILD]`.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        semver::Version::parse(&self.version).is_ok()
    }

    #[must_use]
    pub fn is_discontinued(&self) -> bool {
        self.is_discontinued.unwrap_or(false)
    }
}

/// The schema a document was authored in. A document is never mixed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionSchema {
    /// Each record carries its own `forceUpdate` flag.
    Simplified { versions: Vec<VersionRecord> },
    /// A plain version list paired with a separate discontinued list.
    Legacy {
        versions: Vec<VersionRecord>,
        discontinued_versions: Vec<String>,
    },
}

impl VersionSchema {
    #[must_use]
    pub fn versions(&self) -> &[VersionRecord] {
        match self {
            Self::Simplified { versions } | Self::Legacy { versions, .. } => versions,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Simplified { .. } => "simplified",
            Self::Legacy { .. } => "legacy",
        }
    }
}

/// Remote document for one platform key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformDocument {
    pub schema: VersionSchema,
    pub android_id: Option<String>,
    pub ios_id: Option<String>,
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("platform document is not a JSON object")]
    NotAnObject,
    #[error("platform document field `{field}` is malformed: {source}")]
    InvalidField {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LegacyEntry {
    Record(VersionRecord),
    Plain(String),
}

impl From<LegacyEntry> for VersionRecord {
    fn from(entry: LegacyEntry) -> Self {
        match entry {
            LegacyEntry::Record(record) => record,
            LegacyEntry::Plain(version) => VersionRecord::new(version, false),
        }
    }
}

impl PlatformDocument {
    /// Classify and parse a raw document snapshot.
    ///
    /// A `versions` list is simplified when any record carries an explicit
    /// `forceUpdate` key, or when the document shows no legacy marker: a
    /// `discontinuedVersions` key, a plain-string entry or an
    /// `isDiscontinued` field. Legacy fields are then ignored. Anything else,
    /// including a document without `versions`, is read as the legacy
    /// schema.
    ///
    /// # Errors
    /// Returns an error when the snapshot is not an object, or when
    /// `versions` / `discontinuedVersions` do not have a list shape.
    pub fn from_value(value: &Value) -> Result<Self, DocumentError> {
        let fields = value.as_object().ok_or(DocumentError::NotAnObject)?;

        let schema = match fields.get("versions") {
            Some(raw) if is_simplified(fields, raw) => VersionSchema::Simplified {
                versions: Vec::<VersionRecord>::deserialize(raw).map_err(|source| {
                    DocumentError::InvalidField {
                        field: "versions",
                        source,
                    }
                })?,
            },
            raw => {
                let versions = match raw {
                    None | Some(Value::Null) => Vec::new(),
                    Some(raw) => Vec::<LegacyEntry>::deserialize(raw)
                        .map_err(|source| DocumentError::InvalidField {
                            field: "versions",
                            source,
                        })?
                        .into_iter()
                        .map(VersionRecord::from)
                        .collect(),
                };
                let discontinued_versions = match fields.get("discontinuedVersions") {
                    None | Some(Value::Null) => Vec::new(),
                    Some(raw) => Vec::<String>::deserialize(raw).map_err(|source| {
                        DocumentError::InvalidField {
                            field: "discontinuedVersions",
                            source,
                        }
                    })?,
                };
                VersionSchema::Legacy {
                    versions,
                    discontinued_versions,
                }
            }
        };

        Ok(Self {
            schema,
            android_id: store_id(fields, "androidId"),
            ios_id: store_id(fields, "iosId"),
        })
    }

    #[must_use]
    pub fn versions(&self) -> &[VersionRecord] {
        self.schema.versions()
    }

    /// Records whose version string does not parse as `MAJOR.MINOR.PATCH[+BUILD]`.
    pub fn malformed_versions(&self) -> impl Iterator<Item = &VersionRecord> {
        self.versions()
            .iter()
            .filter(|record| !record.is_well_formed())
    }
}

fn is_simplified(fields: &Map<String, Value>, raw: &Value) -> bool {
    let Some(entries) = raw.as_array() else {
        return false;
    };
    let has_key = |key: &str| {
        entries
            .iter()
            .any(|entry| entry.as_object().is_some_and(|o| o.contains_key(key)))
    };
    if has_key("forceUpdate") {
        return true;
    }

    let legacy_marker = fields
        .get("discontinuedVersions")
        .is_some_and(|value| !value.is_null())
        || entries.iter().any(Value::is_string)
        || has_key("isDiscontinued");
    !legacy_marker
}

// Store IDs are sometimes saved as numbers (App Store IDs are numeric).
fn store_id(fields: &Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key)? {
        Value::String(id) if !id.trim().is_empty() => Some(id.trim().to_string()),
        Value::Number(id) => id.as_u64().map(|id| id.to_string()),
        _ => None,
    }
}
