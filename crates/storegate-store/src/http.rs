use async_trait::async_trait;
use log::debug;
use serde_json::Value;

use crate::error::StoreError;
use crate::traits::{DocumentKey, DocumentStore};

const USER_AGENT: &str = "storegate";
const STATUS_NOT_FOUND: u16 = 404;

/// Document store reached over a plain REST interface.
///
/// Documents live at `{base_url}/{collection}/{document}`: `GET` returns the
/// JSON object (or 404 when absent) and `PUT` replaces it.
#[derive(Debug, Clone)]
pub struct HttpDocumentStore {
    client: reqwest::Client,
    base_url: String,
    bearer_token: Option<String>,
}

impl HttpDocumentStore {
    /// Timeouts are whatever `client` was built with.
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            bearer_token: None,
        }
    }

    #[must_use]
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    #[must_use]
    pub fn document_url(&self, key: &DocumentKey) -> String {
        format!("{}/{}/{}", self.base_url, key.collection, key.document)
    }

    fn request(&self, method: reqwest::Method, key: &DocumentKey) -> reqwest::RequestBuilder {
        let builder = self
            .client
            .request(method, self.document_url(key))
            .header("User-Agent", USER_AGENT);
        match &self.bearer_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

#[async_trait]
impl DocumentStore for HttpDocumentStore {
    async fn get(&self, key: &DocumentKey) -> Result<Option<Value>, StoreError> {
        debug!("Fetching document {key}");

        let response = self
            .request(reqwest::Method::GET, key)
            .send()
            .await
            .map_err(|e| StoreError::request_from(key.to_string(), e))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| StoreError::parse_from(key.to_string(), e))?;

        snapshot_from_response(key, status, &body)
    }

    async fn set(&self, key: &DocumentKey, fields: Value) -> Result<(), StoreError> {
        ensure_object(key, &fields)?;

        debug!("Overwriting document {key}");

        let response = self
            .request(reqwest::Method::PUT, key)
            .json(&fields)
            .send()
            .await
            .map_err(|e| StoreError::request_from(key.to_string(), e))?;

        let status = response.status().as_u16();
        if is_success(status) {
            return Ok(());
        }
        // The status is the error; a body that fails to download only loses the snippet.
        let body = response.text().await.unwrap_or_default();
        write_result(key, status, &body)
    }
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

fn ensure_object(key: &DocumentKey, fields: &Value) -> Result<(), StoreError> {
    if fields.is_object() {
        Ok(())
    } else {
        Err(StoreError::NotAnObject {
            key: key.to_string(),
        })
    }
}

fn write_result(key: &DocumentKey, status: u16, body: &str) -> Result<(), StoreError> {
    if is_success(status) {
        return Ok(());
    }
    Err(StoreError::HttpStatus {
        key: key.to_string(),
        status,
        body_snippet: response_snippet(body, 160),
    })
}

fn snapshot_from_response(
    key: &DocumentKey,
    status: u16,
    body: &str,
) -> Result<Option<Value>, StoreError> {
    if status == STATUS_NOT_FOUND {
        return Ok(None);
    }

    if !is_success(status) {
        return Err(StoreError::HttpStatus {
            key: key.to_string(),
            status,
            body_snippet: response_snippet(body, 160),
        });
    }

    let value: Value =
        serde_json::from_str(body).map_err(|e| StoreError::parse_from(key.to_string(), e))?;

    match value {
        Value::Null => Ok(None),
        Value::Object(_) => Ok(Some(value)),
        _ => Err(StoreError::NotAnObject {
            key: key.to_string(),
        }),
    }
}

fn response_snippet(body: &str, max_chars: usize) -> String {
    let snippet: String = body.chars().take(max_chars).collect();
    if snippet.is_empty() {
        String::new()
    } else {
        format!(": {snippet}")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn key() -> DocumentKey {
        DocumentKey::new("AppUpdateManager", "Android")
    }

    #[test]
    fn document_url_joins_base_collection_and_key() {
        let store = HttpDocumentStore::new(reqwest::Client::new(), "https://docs.example.com/v1/");

        assert_eq!(
            store.document_url(&key()),
            "https://docs.example.com/v1/AppUpdateManager/Android"
        );
    }

    #[test]
    fn not_found_maps_to_missing_document() {
        assert_eq!(snapshot_from_response(&key(), 404, "not here"), Ok(None));
    }

    #[test]
    fn null_body_maps_to_missing_document() {
        assert_eq!(snapshot_from_response(&key(), 200, "null"), Ok(None));
    }

    #[test]
    fn object_body_is_returned() {
        let snapshot = snapshot_from_response(&key(), 200, r#"{"versions":[]}"#)
            .expect("object body parses");

        assert_eq!(snapshot, Some(json!({ "versions": [] })));
    }

    #[test]
    fn non_object_body_is_rejected() {
        assert_eq!(
            snapshot_from_response(&key(), 200, "[1, 2]"),
            Err(StoreError::NotAnObject {
                key: "AppUpdateManager/Android".to_string()
            })
        );
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let result = snapshot_from_response(&key(), 200, "<html>");

        assert!(matches!(
            result,
            Err(StoreError::Transport {
                stage: crate::StoreStage::ResponseParse,
                ..
            })
        ));
    }

    #[test]
    fn server_error_carries_status_and_snippet() {
        let result = snapshot_from_response(&key(), 500, "internal failure");

        assert_eq!(
            result,
            Err(StoreError::HttpStatus {
                key: "AppUpdateManager/Android".to_string(),
                status: 500,
                body_snippet: ": internal failure".to_string(),
            })
        );
    }

    #[test]
    fn successful_write_statuses_are_accepted() {
        assert_eq!(write_result(&key(), 200, ""), Ok(()));
        assert_eq!(write_result(&key(), 204, ""), Ok(()));
    }

    #[test]
    fn rejected_write_carries_status_and_snippet() {
        assert_eq!(
            write_result(&key(), 403, "missing permission"),
            Err(StoreError::HttpStatus {
                key: "AppUpdateManager/Android".to_string(),
                status: 403,
                body_snippet: ": missing permission".to_string(),
            })
        );
        assert_eq!(
            write_result(&key(), 404, ""),
            Err(StoreError::HttpStatus {
                key: "AppUpdateManager/Android".to_string(),
                status: 404,
                body_snippet: String::new(),
            })
        );
    }

    #[tokio::test]
    async fn set_rejects_non_object_before_sending() {
        // Nothing listens on this address; the check runs before any request.
        let store = HttpDocumentStore::new(reqwest::Client::new(), "http://127.0.0.1:9");

        let result = store.set(&key(), json!(["1.0.0"])).await;

        assert_eq!(
            result,
            Err(StoreError::NotAnObject {
                key: "AppUpdateManager/Android".to_string()
            })
        );
        assert_eq!(ensure_object(&key(), &json!({ "versions": [] })), Ok(()));
    }

    #[test]
    fn response_snippet_truncates_and_handles_empty_body() {
        assert_eq!(response_snippet("", 10), "");
        assert_eq!(response_snippet("abcdefghijkl", 4), ": abcd");
    }
}
