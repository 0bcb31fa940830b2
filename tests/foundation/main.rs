//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: Tag, TagKind, TagTree, and Error.

mod errors;
mod tags;
mod tree;
