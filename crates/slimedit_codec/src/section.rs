//! Compressed structured sections.
//!
//! A section is one root compound, written as NBT and then compressed. The
//! uncompressed length travels next to the compressed bytes.

use log::debug;
use slimedit_foundation::{Compound, Error, ErrorKind, Result};

use crate::{compression, nbt};

/// A compound after encoding, ready to be written into a container.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedSection {
    /// Length of the NBT document before compression.
    pub uncompressed_len: u32,
    /// The compressed NBT document.
    pub data: Vec<u8>,
}

/// Encodes and compresses a compound.
///
/// # Errors
///
/// Returns `MalformedTag` if the compound cannot be written as NBT and
/// `InvalidLayout` if the document is too large to describe in the format.
pub fn encode(compound: &Compound, level: i32) -> Result<EncodedSection> {
    let raw = nbt::encode(compound)?;
    let uncompressed_len = i32::try_from(raw.len())
        .ok()
        .and_then(|len| u32::try_from(len).ok())
        .ok_or_else(|| {
            Error::new(ErrorKind::InvalidLayout(format!(
                "section of {} bytes exceeds the format limit",
                raw.len()
            )))
        })?;
    let data = compression::compress(&raw, level)?;
    debug!(
        "encoded section: {} entries, {uncompressed_len} bytes raw, {} bytes compressed",
        compound.len(),
        data.len()
    );
    Ok(EncodedSection {
        uncompressed_len,
        data,
    })
}

/// Decompresses and decodes a section.
///
/// # Errors
///
/// Returns `Decompression` if the data does not expand to exactly
/// `uncompressed_len` bytes, `MalformedTag` if the result is not valid NBT,
/// and `UnexpectedRootKind` if its root is not a compound.
pub fn decode(data: &[u8], uncompressed_len: u32) -> Result<Compound> {
    let raw = compression::decompress(data, uncompressed_len)?;
    let compound = nbt::decode(&raw)?;
    debug!(
        "decoded section: {} entries from {} bytes compressed",
        compound.len(),
        data.len()
    );
    Ok(compound)
}
