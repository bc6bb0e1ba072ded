use storegate_core::DocumentError;
use storegate_platform::{LaunchError, PackageInfoError};
use storegate_store::StoreError;
use thiserror::Error;

/// Failures that escape [`crate::UpdateManager::check_for_update`].
///
/// Only the final launch step can fail; everything before it degrades to
/// "no dialog".
#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("could not open store page {url}")]
    Launch {
        url: String,
        #[source]
        source: LaunchError,
    },
}

/// Failures absorbed by the check and reported through the log.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("failed to read installed version: {0}")]
    PackageInfo(#[from] PackageInfoError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("malformed document {key}: {source}")]
    Document {
        key: String,
        #[source]
        source: DocumentError,
    },
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid update settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("update settings collection must not be empty")]
    EmptyCollection,
}
