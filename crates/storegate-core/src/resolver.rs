use log::debug;

use crate::document::{PlatformDocument, VersionRecord, VersionSchema};
use crate::version::{base_version, matches_record};

/// Whether to show an update dialog, and whether it may be dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateDecision {
    pub should_show: bool,
    /// Meaningless when `should_show` is false.
    pub is_force_update: bool,
}

impl UpdateDecision {
    #[must_use]
    pub const fn hidden() -> Self {
        Self {
            should_show: false,
            is_force_update: false,
        }
    }

    #[must_use]
    pub const fn show(is_force_update: bool) -> Self {
        Self {
            should_show: true,
            is_force_update,
        }
    }
}

/// Decide whether `installed` needs an update notice according to `document`.
///
/// Both schemas scan records in document order and stop at the first
/// decisive record; no semantic version ordering is applied.
#[must_use]
pub fn resolve(installed: &str, document: &PlatformDocument) -> UpdateDecision {
    let decision = match &document.schema {
        VersionSchema::Simplified { versions } => resolve_simplified(installed, versions),
        VersionSchema::Legacy {
            versions,
            discontinued_versions,
        } => resolve_legacy(installed, versions, discontinued_versions),
    };

    debug!(
        "Resolved {} document for installed version {installed}: show={}, force={}",
        document.schema.name(),
        decision.should_show,
        decision.is_force_update
    );

    decision
}

fn resolve_simplified(installed: &str, versions: &[VersionRecord]) -> UpdateDecision {
    versions
        .iter()
        .find(|record| matches_record(installed, &record.version))
        .map_or(UpdateDecision::hidden(), |record| {
            UpdateDecision::show(record.force_update)
        })
}

fn resolve_legacy(
    installed: &str,
    versions: &[VersionRecord],
    discontinued_versions: &[String],
) -> UpdateDecision {
    let discontinued = discontinued_versions.iter().any(|v| v == installed)
        || versions
            .iter()
            .any(|record| record.is_discontinued() && record.version == installed);
    if discontinued {
        return UpdateDecision::show(true);
    }

    let installed_base = base_version(installed);
    versions
        .iter()
        .find(|record| base_version(&record.version) != installed_base)
        .map_or(UpdateDecision::hidden(), |record| {
            UpdateDecision::show(record.force_update)
        })
}
