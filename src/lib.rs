//! Registered error classes for HTTP services.
//!
//! A service declares its [`ErrorClass`]es as statics, registers them at startup, and builds
//! [`Error`] values from them at the point of failure. Errors render either as a flat JSON
//! document for operators (internal fields included) or as a JSONAPI error response for end
//! users, and can be forwarded to an external [`Reporter`](report::Reporter).

pub mod config;
pub mod error;
pub mod report;
pub mod web;

mod static_state;
pub use static_state::*;

pub use error::{Error, ErrorClass, ErrorType, Errors};
