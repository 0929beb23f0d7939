//! Request and response bodies for the recognition backend.

use serde::{Deserialize, Deserializer, Serialize};

/// Status value the backend uses for a successful call.
pub const STATUS_SUCCESS: &str = "success";

#[derive(Debug, Serialize)]
pub(crate) struct RegisterRequest<'a> {
    pub id: &'a str,
    pub name: &'a str,
    /// Still frame as a `data:image/jpeg;base64,...` URL
    pub image: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct RecognizeRequest<'a> {
    pub image: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct DeleteRequest<'a> {
    pub id: &'a str,
}

/// One candidate returned by `/recognize`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecognitionMatch {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    /// Confidence in [0, 1]
    pub similarity: f64,
}

/// Identifier/name pair from `/list`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PersonSummary {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
}

/// Row of the full person table from `/persons`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PersonRow {
    pub name: String,
    #[serde(default)]
    pub image_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RecognizeResponse {
    #[serde(default)]
    pub matches: Vec<RecognitionMatch>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListResponse {
    #[serde(default)]
    pub persons: Vec<PersonSummary>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PersonsResponse {
    #[serde(default)]
    pub persons: Vec<PersonRow>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DeleteResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Person IDs are strings on the wire, but some backends send numbers.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Number(serde_json::Number),
    }

    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(s) => s,
        StringOrNumber::Number(n) => n.to_string(),
    })
}
