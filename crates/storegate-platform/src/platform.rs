use std::fmt;

/// The two store platforms a document can be addressed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Android,
    Ios,
}

impl Platform {
    pub const ALL: [Platform; 2] = [Platform::Android, Platform::Ios];

    /// Document key used in the remote store.
    #[must_use]
    pub fn document_key(self) -> &'static str {
        match self {
            Platform::Android => "Android",
            Platform::Ios => "Ios",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.document_key())
    }
}

pub trait PlatformDetector: Send + Sync {
    fn detect(&self) -> Platform;
}

/// Detects the platform from the compilation target.
///
/// Apple targets map to [`Platform::Ios`]; every other target is treated as
/// [`Platform::Android`].
#[derive(Debug, Clone, Copy, Default)]
pub struct HostPlatform;

impl PlatformDetector for HostPlatform {
    fn detect(&self) -> Platform {
        if cfg!(any(target_os = "ios", target_os = "macos")) {
            Platform::Ios
        } else {
            Platform::Android
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedPlatform(pub Platform);

impl PlatformDetector for FixedPlatform {
    fn detect(&self) -> Platform {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_keys_match_remote_layout() {
        assert_eq!(Platform::Android.document_key(), "Android");
        assert_eq!(Platform::Ios.document_key(), "Ios");
        assert_eq!(Platform::Ios.to_string(), "Ios");
    }

    #[test]
    fn fixed_platform_reports_its_value() {
        assert_eq!(FixedPlatform(Platform::Ios).detect(), Platform::Ios);
        assert_eq!(FixedPlatform(Platform::Android).detect(), Platform::Android);
    }

    #[test]
    fn host_platform_follows_target() {
        let expected = if cfg!(any(target_os = "ios", target_os = "macos")) {
            Platform::Ios
        } else {
            Platform::Android
        };
        assert_eq!(HostPlatform.detect(), expected);
    }
}
