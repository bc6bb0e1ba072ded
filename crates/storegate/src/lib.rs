//! Remote-configured update prompts.
//!
//! [`UpdateManager`] reads the installed version, fetches the document for
//! the current platform from a [`DocumentStore`], resolves whether an update
//! dialog is due, and hands the dialog to a [`DialogPresenter`]. Every
//! collaborator is injected, so the whole flow runs against in-memory fakes
//! in tests.

mod context;
mod dialog;
mod error;
pub mod logging;
mod manager;
mod settings;

pub use context::{AlwaysMounted, MountFlag, UiContext};
pub use dialog::{ConsoleDialog, DialogChoice, DialogPresenter, DialogRequest, FnDialog};
pub use error::{CheckError, SettingsError, UpdateError};
pub use manager::{
    CheckOutcome, Evaluation, SAMPLE_VERSION, SkipReason, UpdateManager, UpdateManagerBuilder,
    sample_document,
};
pub use settings::{DEFAULT_COLLECTION, DialogTexts, UpdateSettings};

pub use storegate_core::{
    DocumentError, PlatformDocument, UpdateDecision, VersionRecord, VersionSchema, resolve,
};
pub use storegate_platform::{
    FixedPlatform, HostPlatform, LaunchError, ManifestPackageInfo, PackageInfo, PackageInfoError,
    Platform, PlatformDetector, StaticPackageInfo, StoreIds, SystemUrlLauncher, UrlLauncher,
};
pub use storegate_store::{DocumentKey, DocumentStore, HttpDocumentStore, MemoryStore, StoreError};
