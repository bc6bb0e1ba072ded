use crate::platform::Platform;

pub const PLACEHOLDER_ANDROID_ID: &str = "com.example.app";
pub const PLACEHOLDER_IOS_ID: &str = "000000000";

/// Store identifiers from one configuration source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreIds {
    pub android_id: Option<String>,
    pub ios_id: Option<String>,
}

impl StoreIds {
    fn for_platform(&self, platform: Platform) -> Option<&str> {
        let id = match platform {
            Platform::Android => self.android_id.as_deref(),
            Platform::Ios => self.ios_id.as_deref(),
        };
        id.map(str::trim).filter(|id| !id.is_empty())
    }
}

/// Build the store listing URL for `platform`.
///
/// `remote` (IDs carried by the fetched document) wins over `local`
/// (IDs configured by the caller); the placeholder is used when neither has one.
#[must_use]
pub fn store_url(platform: Platform, remote: &StoreIds, local: &StoreIds) -> String {
    let id = remote
        .for_platform(platform)
        .or_else(|| local.for_platform(platform));

    match platform {
        Platform::Android => format!(
            "https://play.google.com/store/apps/details?id={}",
            id.unwrap_or(PLACEHOLDER_ANDROID_ID)
        ),
        Platform::Ios => {
            let id = id.unwrap_or(PLACEHOLDER_IOS_ID);
            let id = id.strip_prefix("id").unwrap_or(id);
            format!("https://apps.apple.com/app/id{id}")
        }
    }
}
