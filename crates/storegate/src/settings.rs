use serde::{Deserialize, Serialize};
use storegate_platform::StoreIds;

use crate::error::SettingsError;

pub const DEFAULT_COLLECTION: &str = "AppUpdateManager";

/// Caller-supplied configuration for an [`crate::UpdateManager`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettings {
    #[serde(default = "default_collection")]
    pub collection: String,

    #[serde(default)]
    pub app_name: Option<String>,

    /// Used only when the remote document carries no `androidId`.
    #[serde(default)]
    pub android_id: Option<String>,

    /// Used only when the remote document carries no `iosId`.
    #[serde(default)]
    pub ios_id: Option<String>,

    #[serde(default = "default_true")]
    pub show_later_button: bool,

    /// Overwrites both platform documents with sample data on every check.
    /// Turn off after the first successful run.
    #[serde(default)]
    pub auto_setup: bool,

    #[serde(default)]
    pub texts: DialogTexts,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DialogTexts {
    pub title: String,
    /// `{app}` is replaced with the app name.
    pub message: String,
    pub force_message: String,
    pub update_label: String,
    pub later_label: String,
}

fn default_collection() -> String {
    DEFAULT_COLLECTION.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for UpdateSettings {
    fn default() -> Self {
        Self {
            collection: default_collection(),
            app_name: None,
            android_id: None,
            ios_id: None,
            show_later_button: true,
            auto_setup: false,
            texts: DialogTexts::default(),
        }
    }
}

impl Default for DialogTexts {
    fn default() -> Self {
        Self {
            title: "Update available".to_string(),
            message: "A new version of {app} is available. Update now to get the latest \
                      features and fixes."
                .to_string(),
            force_message: "This version of {app} is no longer supported. Please update to \
                            continue."
                .to_string(),
            update_label: "Update".to_string(),
            later_label: "Later".to_string(),
        }
    }
}

impl DialogTexts {
    #[must_use]
    pub fn message_for(&self, is_force_update: bool, app_name: Option<&str>) -> String {
        let template = if is_force_update {
            &self.force_message
        } else {
            &self.message
        };
        template.replace("{app}", app_name.unwrap_or("this app"))
    }
}

impl UpdateSettings {
    /// Parse settings from JSON; missing fields take their defaults.
    ///
    /// # Errors
    /// Returns an error when `json` is not a valid settings object.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        if settings.collection.trim().is_empty() {
            return Err(SettingsError::EmptyCollection);
        }
        Ok(settings)
    }

    #[must_use]
    pub fn store_ids(&self) -> StoreIds {
        StoreIds {
            android_id: self.android_id.clone(),
            ios_id: self.ios_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_yields_defaults() {
        let settings = UpdateSettings::from_json("{}").expect("empty object is valid");

        assert_eq!(settings, UpdateSettings::default());
        assert_eq!(settings.collection, "AppUpdateManager");
        assert!(settings.show_later_button);
        assert!(!settings.auto_setup);
    }

    #[test]
    fn camel_case_fields_are_read() {
        let settings = UpdateSettings::from_json(
            r#"{
                "appName": "Acme",
                "androidId": "com.acme.app",
                "iosId": "123",
                "showLaterButton": false,
                "autoSetup": true,
                "texts": { "title": "New release" }
            }"#,
        )
        .expect("settings parse");

        assert_eq!(settings.app_name.as_deref(), Some("Acme"));
        assert!(!settings.show_later_button);
        assert!(settings.auto_setup);
        assert_eq!(settings.texts.title, "New release");
        assert_eq!(settings.texts.update_label, "Update");
        assert_eq!(
            settings.store_ids(),
            StoreIds {
                android_id: Some("com.acme.app".to_string()),
                ios_id: Some("123".to_string()),
            }
        );
    }

    #[test]
    fn blank_collection_is_rejected() {
        let result = UpdateSettings::from_json(r#"{ "collection": " " }"#);
        assert!(matches!(result, Err(SettingsError::EmptyCollection)));
    }

    #[test]
    fn invalid_json_is_rejected() {
        let result = UpdateSettings::from_json(r#"{ "showLaterButton": "yes" }"#);
        assert!(matches!(result, Err(SettingsError::Parse(_))));
    }

    #[test]
    fn message_substitutes_app_name() {
        let texts = DialogTexts::default();

        assert!(texts.message_for(false, Some("Acme")).contains("new version of Acme"));
        assert!(
            texts
                .message_for(true, None)
                .starts_with("This version of this app is no longer supported")
        );
    }
}
