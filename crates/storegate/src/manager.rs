use std::sync::Arc;

use log::{debug, info, warn};
use serde_json::{Value, json};
use storegate_core::{PlatformDocument, UpdateDecision, resolve};
use storegate_platform::{
    HostPlatform, PackageInfo, Platform, PlatformDetector, StoreIds, SystemUrlLauncher,
    UrlLauncher, store_url,
};
use storegate_store::{DocumentKey, DocumentStore, StoreError};

use crate::context::{AlwaysMounted, UiContext};
use crate::dialog::{ConsoleDialog, DialogChoice, DialogPresenter, DialogRequest};
use crate::error::{CheckError, UpdateError};
use crate::settings::UpdateSettings;

/// Version written by [`UpdateManager::seed_sample_documents`].
pub const SAMPLE_VERSION: &str = "0.0.1+1";

/// How a single check ended. Every variant returns the manager to idle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// No document exists for the detected platform.
    NotConfigured,
    /// The version or document could not be read; see the log.
    Unavailable,
    UpToDate,
    Skipped(SkipReason),
    Dismissed,
    /// The presenter answered "later" to a dialog that cannot be dismissed.
    Ignored,
    /// The presenter closed without an answer.
    Unanswered,
    Launched { url: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    ContextLost,
    NoUiRoot,
}

/// Result of the fetch and resolve steps, before any UI is involved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub platform: Platform,
    pub installed_version: String,
    pub decision: UpdateDecision,
    pub remote_ids: StoreIds,
}

/// Document written to both platform keys by the auto-setup step.
#[must_use]
pub fn sample_document() -> Value {
    json!({
        "versions": [
            { "version": SAMPLE_VERSION, "forceUpdate": true }
        ]
    })
}

/// Checks the remote store and drives the update dialog.
///
/// Cloning is cheap; concurrent checks on clones are not coordinated.
#[derive(Clone)]
pub struct UpdateManager {
    store: Arc<dyn DocumentStore>,
    package_info: Arc<dyn PackageInfo>,
    platform: Arc<dyn PlatformDetector>,
    presenter: Arc<dyn DialogPresenter>,
    launcher: Arc<dyn UrlLauncher>,
    context: Arc<dyn UiContext>,
    settings: UpdateSettings,
}

pub struct UpdateManagerBuilder {
    store: Arc<dyn DocumentStore>,
    package_info: Arc<dyn PackageInfo>,
    platform: Option<Arc<dyn PlatformDetector>>,
    presenter: Option<Arc<dyn DialogPresenter>>,
    launcher: Option<Arc<dyn UrlLauncher>>,
    context: Option<Arc<dyn UiContext>>,
    settings: UpdateSettings,
}

impl UpdateManagerBuilder {
    #[must_use]
    pub fn settings(mut self, settings: UpdateSettings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn platform(mut self, platform: impl PlatformDetector + 'static) -> Self {
        self.platform = Some(Arc::new(platform));
        self
    }

    #[must_use]
    pub fn presenter(mut self, presenter: Arc<dyn DialogPresenter>) -> Self {
        self.presenter = Some(presenter);
        self
    }

    #[must_use]
    pub fn launcher(mut self, launcher: Arc<dyn UrlLauncher>) -> Self {
        self.launcher = Some(launcher);
        self
    }

    #[must_use]
    pub fn context(mut self, context: impl UiContext + 'static) -> Self {
        self.context = Some(Arc::new(context));
        self
    }

    /// Unset collaborators default to host platform detection, the system
    /// URL launcher, a console prompt on stdio and an always-mounted context.
    #[must_use]
    pub fn build(self) -> UpdateManager {
        UpdateManager {
            store: self.store,
            package_info: self.package_info,
            platform: self.platform.unwrap_or_else(|| Arc::new(HostPlatform)),
            presenter: self
                .presenter
                .unwrap_or_else(|| Arc::new(ConsoleDialog::stdio())),
            launcher: self
                .launcher
                .unwrap_or_else(|| Arc::new(SystemUrlLauncher)),
            context: self.context.unwrap_or_else(|| Arc::new(AlwaysMounted)),
            settings: self.settings,
        }
    }
}

impl UpdateManager {
    pub fn builder(
        store: Arc<dyn DocumentStore>,
        package_info: Arc<dyn PackageInfo>,
    ) -> UpdateManagerBuilder {
        UpdateManagerBuilder {
            store,
            package_info,
            platform: None,
            presenter: None,
            launcher: None,
            context: None,
            settings: UpdateSettings::default(),
        }
    }

    #[must_use]
    pub fn settings(&self) -> &UpdateSettings {
        &self.settings
    }

    fn document_key(&self, platform: Platform) -> DocumentKey {
        DocumentKey::new(&self.settings.collection, platform.document_key())
    }

    /// Overwrite both platform documents with [`sample_document`].
    ///
    /// This replaces any existing data without merging.
    ///
    /// # Errors
    /// Returns the first store write failure.
    pub async fn seed_sample_documents(&self) -> Result<(), StoreError> {
        warn!(
            "Overwriting update documents in `{}` with sample data; disable auto-setup after the first run",
            self.settings.collection
        );

        for platform in Platform::ALL {
            let key = self.document_key(platform);
            self.store.set(&key, sample_document()).await?;
            debug!("Wrote sample update document {key}");
        }

        Ok(())
    }

    /// Fetch the installed version and platform document and resolve them.
    ///
    /// `Ok(None)` means the platform has no document.
    ///
    /// # Errors
    /// Returns an error when the version cannot be read, the store request
    /// fails, or the document is malformed.
    pub async fn evaluate(&self) -> Result<Option<Evaluation>, CheckError> {
        let installed_version = self.package_info.version().await?;
        let platform = self.platform.detect();
        let key = self.document_key(platform);

        debug!("Checking {key} for installed version {installed_version}");

        let Some(snapshot) = self.store.get(&key).await? else {
            return Ok(None);
        };

        let document =
            PlatformDocument::from_value(&snapshot).map_err(|source| CheckError::Document {
                key: key.to_string(),
                source,
            })?;

        for record in document.malformed_versions() {
            warn!(
                "Document {key} lists `{}`, which is not MAJOR.MINOR.PATCH[+BUILD]",
                record.version
            );
        }

        let decision = resolve(&installed_version, &document);

        Ok(Some(Evaluation {
            platform,
            installed_version,
            decision,
            remote_ids: StoreIds {
                android_id: document.android_id,
                ios_id: document.ios_id,
            },
        }))
    }

    /// Run one full check: optional auto-setup, fetch, resolve, dialog and
    /// store launch.
    ///
    /// # Errors
    /// Only a failure to open the store page is returned. Store, document
    /// and version-read failures are logged and reported as
    /// [`CheckOutcome::Unavailable`].
    pub async fn check_for_update(&self) -> Result<CheckOutcome, UpdateError> {
        if self.settings.auto_setup
            && let Err(error) = self.seed_sample_documents().await
        {
            warn!("Auto-setup failed, continuing with the update check: {error}");
        }

        let evaluation = match self.evaluate().await {
            Ok(Some(evaluation)) => evaluation,
            Ok(None) => {
                info!("No update document for this platform, skipping update check");
                return Ok(CheckOutcome::NotConfigured);
            }
            Err(error) => {
                warn!("Update check failed: {error}");
                return Ok(CheckOutcome::Unavailable);
            }
        };

        let decision = evaluation.decision;
        if !decision.should_show {
            debug!("Installed version {} is current", evaluation.installed_version);
            return Ok(CheckOutcome::UpToDate);
        }

        if !self.context.is_mounted() {
            debug!("UI context is gone, not showing update dialog");
            return Ok(CheckOutcome::Skipped(SkipReason::ContextLost));
        }
        if !self.presenter.is_available() {
            debug!("No UI root available for the update dialog");
            return Ok(CheckOutcome::Skipped(SkipReason::NoUiRoot));
        }

        info!(
            "Showing {} update dialog for version {}",
            if decision.is_force_update {
                "mandatory"
            } else {
                "optional"
            },
            evaluation.installed_version
        );

        let request = DialogRequest {
            is_force_update: decision.is_force_update,
            app_name: self.settings.app_name.clone(),
            texts: self.settings.texts.clone(),
            show_later_button: self.settings.show_later_button,
        };
        let dismissible = request.can_dismiss();

        match self.presenter.present(request).await {
            DialogChoice::Later if dismissible => {
                debug!("Update dialog dismissed");
                Ok(CheckOutcome::Dismissed)
            }
            DialogChoice::Later => {
                warn!("Presenter dismissed an update dialog that does not allow it");
                Ok(CheckOutcome::Ignored)
            }
            DialogChoice::Closed => {
                warn!("Update dialog closed without an answer");
                Ok(CheckOutcome::Unanswered)
            }
            DialogChoice::Update => {
                let url = store_url(
                    evaluation.platform,
                    &evaluation.remote_ids,
                    &self.settings.store_ids(),
                );
                info!("Opening store page {url}");
                self.launcher
                    .open(&url)
                    .await
                    .map_err(|source| UpdateError::Launch {
                        url: url.clone(),
                        source,
                    })?;
                Ok(CheckOutcome::Launched { url })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use storegate_core::VersionSchema;

    use super::*;

    #[test]
    fn sample_document_is_a_mandatory_simplified_entry() {
        let document =
            PlatformDocument::from_value(&sample_document()).expect("sample document parses");

        assert!(matches!(document.schema, VersionSchema::Simplified { .. }));
        assert_eq!(resolve(SAMPLE_VERSION, &document), UpdateDecision::show(true));
        assert_eq!(document.malformed_versions().count(), 0);
    }
}
