//! Core types for Slimedit: tags, editable tag trees, and errors.
//!
//! This crate provides:
//! - [`Tag`] - The recursive value type for structured world data
//! - [`TagKind`] - Kind descriptors and wire type ids
//! - [`TagTree`] - Arena-backed trees with owner back-references
//! - [`NodeId`] / [`Owner`] - Node handles and parent links
//! - [`Error`] - Rich error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod kind;
pub mod node;
pub mod tree;
pub mod value;

pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use kind::TagKind;
pub use node::{NodeId, Owner};
pub use tree::TagTree;
pub use value::{Compound, Tag, parse_scalar};
