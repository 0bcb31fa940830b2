//! Section codec for Slimedit.
//!
//! Turns a root [`Compound`](slimedit_foundation::Compound) into a
//! compressed byte block and back:
//! - [`nbt`] - NBT wire format via `quartz_nbt`
//! - [`compression`] - zstd with exact, externally stored lengths
//! - [`section`] - the two combined, as stored in a world file

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod compression;
pub mod nbt;
pub mod section;

pub use compression::DEFAULT_LEVEL;
pub use section::{EncodedSection, decode, encode};
