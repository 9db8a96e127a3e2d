//! Public API surface of the combat runtime.
mod errors;

pub use errors::{RepositoryError, Result, ServiceError};
