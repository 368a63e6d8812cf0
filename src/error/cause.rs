//! Shapes accepted as the internal cause of an [`Error`](super::Error).
//!
//! A cause can expose an error message, a plain string conversion, or neither. The
//! `internal_error` summary is taken from the first of those that is available, falling
//! back to the [`Debug`] rendering of the value.

use super::utils::error_recursive_msg;
use serde::Serialize;
use serde_json::Value;
use std::{
    any::Any,
    error::Error as StdError,
    fmt::{Debug, Display},
    sync::Arc,
};

//===========================
// region:      --- InternalCause

pub trait InternalCause: Debug + Send + Sync + 'static {
    /// Error-message capability.
    fn message(&self) -> Option<String> {
        None
    }

    /// String-conversion capability, consulted when there is no error message.
    fn display(&self) -> Option<String> {
        None
    }

    /// JSON form used for `internal_details` in the flat rendering.
    fn to_json(&self) -> serde_json::Result<Value>;
}

/// Summary of `cause` as stored in `internal_error`.
pub fn internal_error_of<T: InternalCause + ?Sized>(cause: &T) -> String {
    cause
        .message()
        .or_else(|| cause.display())
        .unwrap_or_else(|| format!("{cause:?}"))
}

// endregion:   --- InternalCause

//===========================
// region:      --- Plain values

impl InternalCause for String {
    fn display(&self) -> Option<String> {
        Some(self.clone())
    }

    fn to_json(&self) -> serde_json::Result<Value> {
        Ok(Value::String(self.clone()))
    }
}

impl InternalCause for &'static str {
    fn display(&self) -> Option<String> {
        Some((*self).to_owned())
    }

    fn to_json(&self) -> serde_json::Result<Value> {
        Ok(Value::String((*self).to_owned()))
    }
}

impl InternalCause for Value {
    fn display(&self) -> Option<String> {
        match self {
            Value::String(txt) => Some(txt.clone()),
            other => Some(other.to_string()),
        }
    }

    fn to_json(&self) -> serde_json::Result<Value> {
        Ok(self.clone())
    }
}

impl<T: InternalCause> InternalCause for Arc<T> {
    fn message(&self) -> Option<String> {
        self.as_ref().message()
    }

    fn display(&self) -> Option<String> {
        self.as_ref().display()
    }

    fn to_json(&self) -> serde_json::Result<Value> {
        self.as_ref().to_json()
    }
}

// endregion:   --- Plain values

//===========================
// region:      --- Library errors

impl InternalCause for anyhow::Error {
    fn message(&self) -> Option<String> {
        Some(self.to_string())
    }

    fn to_json(&self) -> serde_json::Result<Value> {
        Ok(Value::String(format!("{self:#}")))
    }
}

impl InternalCause for std::io::Error {
    fn message(&self) -> Option<String> {
        Some(self.to_string())
    }

    fn to_json(&self) -> serde_json::Result<Value> {
        Ok(Value::String(error_recursive_msg(self)))
    }
}

// endregion:   --- Library errors

//===========================
// region:      --- Wrappers

/// Any [`std::error::Error`]. Details render as the recursive message of its source chain.
#[derive(Debug)]
pub struct ErrorCause<E>(pub E);

impl<E: StdError + Send + Sync + 'static> InternalCause for ErrorCause<E> {
    fn message(&self) -> Option<String> {
        Some(self.0.to_string())
    }

    fn to_json(&self) -> serde_json::Result<Value> {
        Ok(Value::String(error_recursive_msg(&self.0)))
    }
}

/// A serializable [`std::error::Error`]. Details keep the structure of the error.
#[derive(Debug)]
pub struct SerErrorCause<E>(pub E);

impl<E: StdError + Serialize + Send + Sync + 'static> InternalCause for SerErrorCause<E> {
    fn message(&self) -> Option<String> {
        Some(self.0.to_string())
    }

    fn to_json(&self) -> serde_json::Result<Value> {
        serde_json::to_value(&self.0)
    }
}

/// A value that only knows how to turn itself into a string.
#[derive(Debug)]
pub struct DisplayCause<T>(pub T);

impl<T: Display + Debug + Send + Sync + 'static> InternalCause for DisplayCause<T> {
    fn display(&self) -> Option<String> {
        Some(self.0.to_string())
    }

    fn to_json(&self) -> serde_json::Result<Value> {
        Ok(Value::String(self.0.to_string()))
    }
}

/// Arbitrary serializable data with no message of its own.
#[derive(Debug)]
pub struct ValueCause<T>(pub T);

impl<T: Serialize + Debug + Send + Sync + 'static> InternalCause for ValueCause<T> {
    fn to_json(&self) -> serde_json::Result<Value> {
        serde_json::to_value(&self.0)
    }
}

// endregion:   --- Wrappers

//===========================
// region:      --- BoxCause

trait CausePriv: InternalCause {
    fn as_any(&self) -> &dyn Any;
}

impl<T: InternalCause> CausePriv for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Type-erased cause that still allows access to the original value.
#[derive(Debug)]
pub(crate) struct BoxCause(Box<dyn CausePriv>);

impl BoxCause {
    pub(crate) fn new(inner: impl InternalCause) -> Self {
        Self(Box::new(inner))
    }

    pub(crate) fn summary(&self) -> String {
        internal_error_of(self.0.as_ref())
    }

    pub(crate) fn to_json(&self) -> serde_json::Result<Value> {
        self.0.to_json()
    }

    pub(crate) fn downcast_ref<T: InternalCause>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref::<T>()
    }
}

// endregion:   --- BoxCause
