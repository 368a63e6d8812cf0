use super::{
    cause::BoxCause, ErrorClass, InternalCause, JsonApiError, Metadata, RenderError, StackTrace,
};
use crate::config;
use serde::{
    ser::{self, SerializeStruct},
    Serialize,
};
use serde_json::Value;
use std::{
    error::Error as StdError,
    fmt::{Debug, Display},
};

//===========================
// region:      --- Error

/// One occurrence of an [`ErrorClass`].
///
/// Built by a class factory and refined with the `with_*` methods, which consume and return
/// the value. Once the error is rendered or handed to an [`Errors`](super::Errors) collection
/// only shared access remains.
pub struct Error {
    class: &'static ErrorClass,
    id: String,
    details: String,
    status: u16,
    metadata: Metadata,
    internal_error: String,
    internal_details: Option<BoxCause>,
    internal_metadata: Metadata,
    stack_trace: Option<StackTrace>,
}

impl Error {
    pub(super) fn new(
        class: &'static ErrorClass,
        details: String,
        stack_trace: Option<StackTrace>,
    ) -> Self {
        let id = config::current().id_generator().generate_id();
        log::trace!("new error {id} of class {}", class.name());
        Self {
            class,
            id,
            details: details_or_title(class, details),
            status: class.status(),
            metadata: Metadata::new(),
            internal_error: String::new(),
            internal_details: None,
            internal_metadata: Metadata::new(),
            stack_trace,
        }
    }
}

fn details_or_title(class: &ErrorClass, details: String) -> String {
    if details.is_empty() {
        class.title().to_owned()
    } else {
        details
    }
}

// endregion:   --- Error

//===========================
// region:      --- Builder methods

impl Error {
    /// Replaces the public details. An empty string restores the class title.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = details_or_title(self.class, details.into());
        self
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_metadata_entry(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn with_internal_metadata(mut self, metadata: Metadata) -> Self {
        self.internal_metadata = metadata;
        self
    }

    pub fn with_internal_metadata_entry(
        mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.internal_metadata.insert(key.into(), value.into());
        self
    }

    /// Stores `cause` as the internal details and derives `internal_error` from it.
    /// See [`InternalCause`] for how the summary is chosen.
    pub fn with_internal(mut self, cause: impl InternalCause) -> Self {
        let cause = BoxCause::new(cause);
        self.internal_error = cause.summary();
        self.internal_details = Some(cause);
        self
    }
}

// endregion:   --- Builder methods

//===========================
// region:      --- Getter methods

impl Error {
    pub fn class(&self) -> &'static ErrorClass {
        self.class
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn details(&self) -> &str {
        &self.details
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn internal_error(&self) -> &str {
        &self.internal_error
    }

    pub fn has_internal_details(&self) -> bool {
        self.internal_details.is_some()
    }

    /// The value given to [`Self::with_internal`], if it has type `T`.
    pub fn internal_details_ref<T: InternalCause>(&self) -> Option<&T> {
        self.internal_details.as_ref()?.downcast_ref::<T>()
    }

    pub fn internal_metadata(&self) -> &Metadata {
        &self.internal_metadata
    }

    pub fn stack_trace(&self) -> Option<&StackTrace> {
        self.stack_trace.as_ref()
    }
}

// endregion:   --- Getter methods

//===========================
// region:      --- Rendering

impl Error {
    /// Flat document for operators and debug channels. Includes internal fields.
    pub fn as_json(&self) -> Result<String, RenderError> {
        serde_json::to_string(self).map_err(|source| self.encode_error(source))
    }

    pub fn as_json_value(&self) -> Result<Value, RenderError> {
        serde_json::to_value(self).map_err(|source| self.encode_error(source))
    }

    /// End-user safe JSONAPI error object. Never includes internal fields.
    pub fn as_jsonapi_error(&self) -> JsonApiError {
        JsonApiError {
            id: self.id.clone(),
            code: self.class.code().to_owned(),
            status: self.status.to_string(),
            title: self.class.title().to_owned(),
            detail: self.details.clone(),
        }
    }

    fn encode_error(&self, source: serde_json::Error) -> RenderError {
        RenderError::Encode {
            id: self.id.clone(),
            source,
        }
    }
}

impl Serialize for Error {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let internal_details = match &self.internal_details {
            Some(cause) => cause
                .to_json()
                .map_err(<S::Error as ser::Error>::custom)?,
            None => Value::Null,
        };

        let mut state = serializer.serialize_struct("Error", 7)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("class", self.class.code())?;
        state.serialize_field("details", &self.details)?;
        state.serialize_field("internal_error", &self.internal_error)?;
        state.serialize_field("internal_details", &internal_details)?;
        state.serialize_field("stack_trace", &self.stack_trace)?;
        state.serialize_field("status", &self.status)?;
        state.end()
    }
}

// endregion:   --- Rendering

//===========================
// region:      --- Formatting

#[derive(Debug)]
#[allow(unused)]
struct ErrorDevProxy<'a> {
    class: &'a str,
    id: &'a str,
    details: &'a str,
    status: u16,
    metadata: &'a Metadata,
    internal_error: &'a str,
    internal_details: &'a Option<BoxCause>,
    internal_metadata: &'a Metadata,
    stack_trace: &'a Option<StackTrace>,
}

#[derive(Debug)]
#[allow(unused)]
struct ErrorProdProxy<'a> {
    class: &'a str,
    id: &'a str,
    details: &'a str,
    status: u16,
}

impl Error {
    fn dev_proxy(&self) -> ErrorDevProxy {
        ErrorDevProxy {
            class: self.class.name(),
            id: &self.id,
            details: &self.details,
            status: self.status,
            metadata: &self.metadata,
            internal_error: &self.internal_error,
            internal_details: &self.internal_details,
            internal_metadata: &self.internal_metadata,
            stack_trace: &self.stack_trace,
        }
    }

    fn prod_proxy(&self) -> ErrorProdProxy {
        ErrorProdProxy {
            class: self.class.name(),
            id: &self.id,
            details: &self.details,
            status: self.status,
        }
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if cfg!(debug_assertions) {
            self.dev_proxy().fmt(f)
        } else {
            self.prod_proxy().fmt(f)
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.class.code(), self.details)
    }
}

impl StdError for Error {}

// endregion:   --- Formatting
