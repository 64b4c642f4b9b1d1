//! # cadence-primitives
//!
//! Identity types shared by the Cadence scheduling engine.
//!
//! This crate provides the resources operations are bound to and the
//! classical keys that order operations beyond resource contention.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod key;
mod resource;

pub use error::PrimitiveError;
pub use key::{ClassicalKey, KeyError};
pub use resource::{Resource, ResourceError};
