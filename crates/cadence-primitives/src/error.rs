//! Common error types for primitives

use thiserror::Error;
use crate::key::KeyError;
use crate::resource::ResourceError;

/// Primitive parsing error
#[derive(Debug, Error)]
pub enum PrimitiveError {
    /// Resource error
    #[error("resource error: {0}")]
    Resource(#[from] ResourceError),

    /// Classical key error
    #[error("classical key error: {0}")]
    Key(#[from] KeyError),
}
