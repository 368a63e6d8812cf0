use super::{Error, ErrorType, JsonApiResponse, RenderError};
use serde_json::Value;

/// Status used for an empty [`Errors`] collection.
pub const EMPTY_ERRORS_STATUS: u16 = 500;

/// All errors accumulated while handling one request, in insertion order.
///
/// The first error added is the primary one: its status is the status of the collection.
#[derive(Debug, Default)]
pub struct Errors(Vec<Error>);

impl Errors {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    pub fn add_error(&mut self, err: Error) -> &mut Self {
        self.0.push(err);
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<&Error> {
        self.0.first()
    }

    pub fn get(&self, index: usize) -> Option<&Error> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Error> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<Error> {
        self.0
    }

    /// Status of the first error, if any.
    pub fn first_status(&self) -> Option<u16> {
        self.0.first().map(Error::status)
    }

    pub fn as_jsonapi_response(&self) -> JsonApiResponse {
        JsonApiResponse {
            errors: self.0.iter().map(Error::as_jsonapi_error).collect(),
        }
    }

    /// JSON array with the flat rendering of every error.
    pub fn as_json(&self) -> Result<String, RenderError> {
        let docs = self
            .0
            .iter()
            .map(Error::as_json_value)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Value::Array(docs).to_string())
    }
}

impl ErrorType for Errors {
    /// Status of the first error, or [`EMPTY_ERRORS_STATUS`] when there are none.
    fn status(&self) -> u16 {
        self.first_status().unwrap_or(EMPTY_ERRORS_STATUS)
    }

    fn as_json(&self) -> Result<String, RenderError> {
        Errors::as_json(self)
    }

    fn as_jsonapi_response(&self) -> JsonApiResponse {
        Errors::as_jsonapi_response(self)
    }
}

impl ErrorType for Error {
    fn status(&self) -> u16 {
        Error::status(self)
    }

    fn as_json(&self) -> Result<String, RenderError> {
        Error::as_json(self)
    }

    fn as_jsonapi_response(&self) -> JsonApiResponse {
        JsonApiResponse {
            errors: vec![self.as_jsonapi_error()],
        }
    }
}

impl From<Error> for Errors {
    fn from(err: Error) -> Self {
        Self(vec![err])
    }
}

impl From<Vec<Error>> for Errors {
    fn from(errs: Vec<Error>) -> Self {
        Self(errs)
    }
}

impl FromIterator<Error> for Errors {
    fn from_iter<I: IntoIterator<Item = Error>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Error> for Errors {
    fn extend<I: IntoIterator<Item = Error>>(&mut self, iter: I) {
        self.0.extend(iter)
    }
}

impl IntoIterator for Errors {
    type Item = Error;
    type IntoIter = std::vec::IntoIter<Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Errors {
    type Item = &'a Error;
    type IntoIter = std::slice::Iter<'a, Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
