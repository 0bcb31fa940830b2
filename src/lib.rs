//! Slimedit - Slime Region Format world editor
//!
//! This crate re-exports all layers of the Slimedit system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: slimedit_runtime    — REPL, CLI
//! Layer 2: slimedit_world      — SRF container layout, World load/save
//! Layer 1: slimedit_codec      — NBT + zstd section codec
//! Layer 0: slimedit_foundation — Core types (Tag, TagTree, Error)
//! ```

pub use slimedit_codec as codec;
pub use slimedit_foundation as foundation;
pub use slimedit_runtime as runtime;
pub use slimedit_world as world;
