mod launcher;
mod package;
mod platform;
mod store_url;

pub use launcher::{LaunchError, SystemUrlLauncher, UrlLauncher};
pub use package::{ManifestPackageInfo, PackageInfo, PackageInfoError, StaticPackageInfo};
pub use platform::{FixedPlatform, HostPlatform, Platform, PlatformDetector};
pub use store_url::{PLACEHOLDER_ANDROID_ID, PLACEHOLDER_IOS_ID, StoreIds, store_url};
