use std::path::PathBuf;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PackageInfoError {
    #[error("failed to read package manifest {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse package manifest {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("package version is empty")]
    EmptyVersion,
}

/// Source of the installed application's version string.
#[async_trait]
pub trait PackageInfo: Send + Sync {
    /// `MAJOR.MINOR.PATCH` with an optional `+BUILD` suffix.
    async fn version(&self) -> Result<String, PackageInfoError>;
}

/// A version known at construction time, e.g. `env!("CARGO_PKG_VERSION")`.
#[derive(Debug, Clone)]
pub struct StaticPackageInfo {
    version: String,
}

impl StaticPackageInfo {
    #[must_use]
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
        }
    }
}

#[async_trait]
impl PackageInfo for StaticPackageInfo {
    async fn version(&self) -> Result<String, PackageInfoError> {
        let version = self.version.trim();
        if version.is_empty() {
            return Err(PackageInfoError::EmptyVersion);
        }
        Ok(version.to_string())
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Manifest {
    version: String,
    #[serde(default)]
    build_number: Option<String>,
}

/// Reads `{"version": "1.2.3", "buildNumber": "4"}` from a bundled manifest.
#[derive(Debug, Clone)]
pub struct ManifestPackageInfo {
    path: PathBuf,
}

impl ManifestPackageInfo {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl PackageInfo for ManifestPackageInfo {
    async fn version(&self) -> Result<String, PackageInfoError> {
        let contents =
            tokio::fs::read_to_string(&self.path)
                .await
                .map_err(|source| PackageInfoError::Read {
                    path: self.path.clone(),
                    source,
                })?;
        let manifest: Manifest =
            serde_json::from_str(&contents).map_err(|source| PackageInfoError::Parse {
                path: self.path.clone(),
                source,
            })?;

        let version = manifest.version.trim();
        if version.is_empty() {
            return Err(PackageInfoError::EmptyVersion);
        }

        Ok(match manifest.build_number.as_deref().map(str::trim) {
            Some(build) if !build.is_empty() && !version.contains('+') => {
                format!("{version}+{build}")
            }
            _ => version.to_string(),
        })
    }
}
