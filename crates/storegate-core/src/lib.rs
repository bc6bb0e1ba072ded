//! Version decision engine for storegate.
//!
//! This crate holds the logic that is independent of any transport or UI:
//! - The remote document model and its two schemas.
//! - Base/build splitting of `MAJOR.MINOR.PATCH[+BUILD]` strings.
//! - The resolver that turns an installed version and a document into an
//!   [`UpdateDecision`].

mod document;
mod resolver;
mod version;

/// Remote document model, schema classification and parse errors.
pub use document::{DocumentError, PlatformDocument, VersionRecord, VersionSchema};
/// Update decision type and the pure resolver.
pub use resolver::{UpdateDecision, resolve};
/// Helpers for the `+BUILD` suffix of version strings.
pub use version::{base_version, build_suffix, matches_record};
