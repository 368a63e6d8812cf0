//===========================
// region:      --- modules

mod cause;
mod class;
mod common;
mod errors;
mod instance;
mod jsonapi;
mod prereq;
pub mod registry;
mod stack;
mod utils;

// endregion:   --- modules

//===========================
// region:      --- flattened

pub use cause::{
    internal_error_of, DisplayCause, ErrorCause, InternalCause, SerErrorCause, ValueCause,
};
pub use class::*;
pub use common::*;
pub use errors::*;
pub use instance::*;
pub use jsonapi::*;
pub use prereq::*;
pub use registry::{Registry, RegistryBuilder};
pub use stack::*;
pub use utils::*;

// endregion:   --- flattened
