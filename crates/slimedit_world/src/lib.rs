//! Slime Region Format worlds for Slimedit.
//!
//! This crate provides:
//! - [`WorldData`] - Everything stored in a world file
//! - [`read_world`] / [`write_world`] - The container layout over any stream
//! - [`World`] - A source file with load, reload, and save-as-copy
//! - [`WorldConfig`] - Edited-copy naming, compression, strictness
//!
//! Chunk and map payloads are carried through as opaque compressed blocks.
//! Tile entities, entities, and extra settings are decoded into editable
//! [`TagTree`](slimedit_foundation::TagTree)s and re-encoded on save.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod data;
pub mod format;
pub mod reader;
pub mod world;
pub mod writer;

use std::path::Path;

pub use config::WorldConfig;
pub use data::{OpaqueBlock, WorldData};
pub use format::{ENTITIES_KEY, FORMAT_VERSION, MAGIC, TILES_KEY};
pub use reader::{read_file, read_world};
pub use world::{LoadState, World};
pub use writer::{EncodedSections, encode_sections, write_file, write_world};

use slimedit_foundation::Result;

/// Reads a world file with the default configuration.
///
/// # Errors
///
/// See [`read_world`].
pub fn load_world(path: impl AsRef<Path>) -> Result<WorldData> {
    read_file(path.as_ref(), &WorldConfig::default())
}

/// Writes a world file at the default compression level.
///
/// # Errors
///
/// See [`write_world`].
pub fn save_world(data: &WorldData, path: impl AsRef<Path>) -> Result<()> {
    write_file(path.as_ref(), data, slimedit_codec::DEFAULT_LEVEL)
}
