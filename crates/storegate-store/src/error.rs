use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Document store {stage} failed for {key}: {details}")]
    Transport {
        key: String,
        stage: StoreStage,
        details: String,
    },

    #[error("Document store returned HTTP {status} for {key}{body_snippet}")]
    HttpStatus {
        key: String,
        status: u16,
        body_snippet: String,
    },

    #[error("Document {key} is not a JSON object")]
    NotAnObject { key: String },

    #[error("Document store backend error: {0}")]
    Backend(String),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreStage {
    #[error("request")]
    Request,
    #[error("response parse")]
    ResponseParse,
}

impl StoreError {
    pub fn request(key: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Transport {
            key: key.into(),
            stage: StoreStage::Request,
            details: details.into(),
        }
    }

    pub fn request_from<E>(key: impl Into<String>, error: E) -> Self
    where
        E: std::fmt::Display,
    {
        Self::request(key, error.to_string())
    }

    pub fn parse(key: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Transport {
            key: key.into(),
            stage: StoreStage::ResponseParse,
            details: details.into(),
        }
    }

    pub fn parse_from<E>(key: impl Into<String>, error: E) -> Self
    where
        E: std::fmt::Display,
    {
        Self::parse(key, error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{StoreError, StoreStage};

    #[test]
    fn transport_helpers_set_expected_stage() {
        let request = StoreError::request("AppUpdateManager/Android", "connection reset");
        assert!(matches!(
            request,
            StoreError::Transport {
                stage: StoreStage::Request,
                ..
            }
        ));

        let parse = StoreError::parse_from("AppUpdateManager/Ios", "expected value at line 1");
        assert!(matches!(
            parse,
            StoreError::Transport {
                stage: StoreStage::ResponseParse,
                ref details,
                ..
            } if details == "expected value at line 1"
        ));
    }

    #[test]
    fn http_status_display_includes_snippet() {
        let error = StoreError::HttpStatus {
            key: "AppUpdateManager/Android".to_string(),
            status: 503,
            body_snippet: ": unavailable".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "Document store returned HTTP 503 for AppUpdateManager/Android: unavailable"
        );
    }
}
