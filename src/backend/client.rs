//! RecognitionClient - talks to the face registration/recognition backend.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::error::{BackendError, ValidationError};
use super::types::{
    DeleteRequest, DeleteResponse, ListResponse, PersonRow, PersonSummary, PersonsResponse,
    RecognitionMatch, RecognizeRequest, RecognizeResponse, RegisterRequest, STATUS_SUCCESS,
};
use crate::camera::StillFrame;

/// The environment variable that overrides the backend URL.
pub const BACKEND_URL_ENV: &str = "FACECHECK_BACKEND_URL";

/// Default backend location (a locally running service).
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";

/// Default connection timeout (10 seconds).
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Longest slice of an unparseable body quoted in an error.
const MAX_BODY_EXCERPT: usize = 200;

/// Trim and check the registration fields.
///
/// # Returns
/// The trimmed `(id, name)` pair.
pub fn validate_registration(id: &str, name: &str) -> Result<(String, String), ValidationError> {
    let id = id.trim();
    let name = name.trim();
    if id.is_empty() || name.is_empty() {
        return Err(ValidationError::MissingIdOrName);
    }
    Ok((id.to_string(), name.to_string()))
}

/// Client for the backend's register/recognize/list/persons/delete endpoints.
#[derive(Debug, Clone)]
pub struct RecognitionClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl RecognitionClient {
    /// Create a client for the URL in `FACECHECK_BACKEND_URL`, or the
    /// default local URL when unset.
    pub fn new() -> Result<Self, BackendError> {
        let base_url =
            std::env::var(BACKEND_URL_ENV).unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string());
        Self::with_base_url(base_url)
    }

    /// Create a client for an explicit backend URL, with no request timeout.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, BackendError> {
        Self::with_timeout(base_url, None)
    }

    /// Create a client with an optional whole-request timeout.
    ///
    /// Without a timeout a hung backend leaves the caller waiting.
    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, BackendError> {
        let base_url = base_url.into();
        let trimmed = base_url.trim().trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(BackendError::InvalidUrl(base_url));
        }

        let mut builder = reqwest::Client::builder().connect_timeout(DEFAULT_CONNECT_TIMEOUT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        Ok(Self {
            base_url: trimmed.to_string(),
            http_client,
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Register (or update) a person with one face image.
    ///
    /// The fields are validated before any request is made.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Validation` if `id` or `name` is blank,
    /// `BackendError::Remote` if the backend rejects the registration,
    /// or `BackendError::HttpError` if the request fails.
    pub async fn register(
        &self,
        id: &str,
        name: &str,
        frame: &StillFrame,
    ) -> Result<(), BackendError> {
        let (id, name) = validate_registration(id, name)?;
        let image = frame.to_data_url();
        let body = RegisterRequest {
            id: &id,
            name: &name,
            image: &image,
        };

        log::info!(
            "Registering '{}' (id {}) with {}x{} image",
            name,
            id,
            frame.width(),
            frame.height()
        );
        self.post("register", &body).await?;
        Ok(())
    }

    /// Match one face image against the enrolled persons.
    ///
    /// An empty vector means the backend found no match.
    pub async fn recognize(
        &self,
        frame: &StillFrame,
    ) -> Result<Vec<RecognitionMatch>, BackendError> {
        let image = frame.to_data_url();
        let value = self
            .post("recognize", &RecognizeRequest { image: &image })
            .await?;
        let response: RecognizeResponse = decode_payload(value)?;
        log::info!("Recognition returned {} match(es)", response.matches.len());
        Ok(response.matches)
    }

    /// Identifier/name pairs of every enrolled person.
    pub async fn list_persons(&self) -> Result<Vec<PersonSummary>, BackendError> {
        let value = self.get("list").await?;
        let response: ListResponse = decode_payload(value)?;
        Ok(response.persons)
    }

    /// Name and enrolled-image count of every enrolled person.
    pub async fn person_table(&self) -> Result<Vec<PersonRow>, BackendError> {
        let value = self.get("persons").await?;
        let response: PersonsResponse = decode_payload(value)?;
        Ok(response.persons)
    }

    /// Delete a person by identifier.
    ///
    /// # Returns
    ///
    /// The backend's confirmation message (empty if it sent none).
    pub async fn delete_person(&self, id: &str) -> Result<String, BackendError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(ValidationError::NoSelection.into());
        }
        log::info!("Deleting person {}", id);
        let value = self.post("delete", &DeleteRequest { id }).await?;
        let response: DeleteResponse = decode_payload(value)?;
        Ok(response.message.unwrap_or_default())
    }

    async fn post<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<Value, BackendError> {
        let url = self.endpoint(path);
        log::debug!("POST {}", url);
        let response = self.http_client.post(&url).json(body).send().await?;
        read_envelope(response).await
    }

    async fn get(&self, path: &str) -> Result<Value, BackendError> {
        let url = self.endpoint(path);
        log::debug!("GET {}", url);
        let response = self.http_client.get(&url).send().await?;
        read_envelope(response).await
    }
}

/// Parse the `{status, message, ...}` envelope.
///
/// The body is read whatever the HTTP status, since the backend reports
/// failures as JSON with 4xx/5xx codes.
async fn read_envelope(response: reqwest::Response) -> Result<Value, BackendError> {
    let http_status = response.status().as_u16();
    let body = response.text().await?;

    let value: Value = serde_json::from_str(&body).map_err(|_| BackendError::InvalidResponse {
        status: http_status,
        detail: format!("body is not JSON: {}", excerpt(&body)),
    })?;

    let status = value
        .get("status")
        .and_then(Value::as_str)
        .ok_or_else(|| BackendError::InvalidResponse {
            status: http_status,
            detail: "missing 'status' field".to_string(),
        })?;

    if status != STATUS_SUCCESS {
        let message = value
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("Backend reported status '{}'", status));
        log::warn!("Backend returned status '{}': {}", status, message);
        return Err(BackendError::Remote {
            status: status.to_string(),
            message,
        });
    }

    Ok(value)
}

fn decode_payload<T: DeserializeOwned>(value: Value) -> Result<T, BackendError> {
    serde_json::from_value(value).map_err(|e| BackendError::InvalidResponse {
        status: 200,
        detail: e.to_string(),
    })
}

fn excerpt(body: &str) -> String {
    let trimmed = body.trim();
    match trimmed.char_indices().nth(MAX_BODY_EXCERPT) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_base_url_trims_trailing_slash() {
        let client = RecognitionClient::with_base_url("http://localhost:5000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(client.endpoint("list"), "http://localhost:5000/list");
    }

    #[test]
    fn test_with_base_url_rejects_non_http() {
        let result = RecognitionClient::with_base_url("ftp://example.com");
        assert!(matches!(result, Err(BackendError::InvalidUrl(_))));
    }

    #[test]
    fn test_validate_registration_trims() {
        let (id, name) = validate_registration("  12 ", " Alice\t").unwrap();
        assert_eq!(id, "12");
        assert_eq!(name, "Alice");
    }

    #[test]
    fn test_validate_registration_rejects_blank() {
        assert_eq!(
            validate_registration("", "Alice"),
            Err(ValidationError::MissingIdOrName)
        );
        assert_eq!(
            validate_registration("12", "   "),
            Err(ValidationError::MissingIdOrName)
        );
    }

    #[test]
    fn test_excerpt_truncates_long_bodies() {
        let body = "x".repeat(500);
        let short = excerpt(&body);
        assert_eq!(short.len(), MAX_BODY_EXCERPT + 3);
        assert!(short.ends_with("..."));
        assert_eq!(excerpt("  <html>  "), "<html>");
    }
}
