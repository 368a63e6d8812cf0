use super::{RenderError, StackTrace};
use serde::{Deserialize, Serialize};
use serde_json::Value;

//===========================
// region:      --- JsonApiError, JsonApiResponse

/// JSONAPI error object. All five members are always present; `detail` may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonApiError {
    pub id: String,
    pub code: String,
    pub status: String,
    pub title: String,
    pub detail: String,
}

/// JSONAPI error document: `{"errors": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonApiResponse {
    pub errors: Vec<JsonApiError>,
}

// endregion:   --- JsonApiError, JsonApiResponse

//===========================
// region:      --- ErrorRecord

/// Decoded form of the flat JSON rendering of an [`Error`](super::Error).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ErrorRecord {
    pub id: String,
    pub class: String,
    pub details: String,
    pub internal_error: String,
    pub internal_details: Value,
    pub stack_trace: Option<StackTrace>,
    pub status: u16,
}

// endregion:   --- ErrorRecord

//===========================
// region:      --- ErrorType

/// Common surface of a single [`Error`](super::Error) and an [`Errors`](super::Errors)
/// collection, so request handlers can return either.
pub trait ErrorType {
    /// HTTP status to respond with.
    fn status(&self) -> u16;

    /// Flat debug rendering, including internal fields.
    fn as_json(&self) -> Result<String, RenderError>;

    /// End-user rendering.
    fn as_jsonapi_response(&self) -> JsonApiResponse;
}

// endregion:   --- ErrorType
