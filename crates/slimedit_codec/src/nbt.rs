//! Conversion between [`Tag`] and the NBT binary wire format.
//!
//! The wire work is done by `quartz_nbt`; this module maps its tag model
//! onto ours and classifies its failures.

// NBT byte arrays are signed on the wire and unsigned in our model.
#![allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]

use std::io::Cursor;

use log::debug;
use quartz_nbt::io::{Flavor, read_nbt, write_nbt};
use quartz_nbt::{NbtCompound, NbtList, NbtTag};
use slimedit_foundation::{Compound, Error, ErrorKind, Result, Tag, TagKind};

/// Writes a compound as an uncompressed NBT document with an empty root name.
///
/// # Errors
///
/// Returns `MalformedTag` if a list mixes element kinds or the writer fails.
pub fn encode(compound: &Compound) -> Result<Vec<u8>> {
    let root = to_nbt_compound(compound)?;
    let mut bytes = Vec::new();
    write_nbt(&mut bytes, Some(""), &root, Flavor::Uncompressed)
        .map_err(|e| Error::malformed_tag(e.to_string()))?;
    Ok(bytes)
}

/// Reads an uncompressed NBT document whose root must be a compound.
///
/// # Errors
///
/// Returns `MalformedTag` for an empty, truncated, or unparseable stream or
/// a long array, and `UnexpectedRootKind` if the root is not a compound.
pub fn decode(bytes: &[u8]) -> Result<Compound> {
    let Some(&root_id) = bytes.first() else {
        return Err(Error::malformed_tag("empty section"));
    };
    if root_id != TagKind::Compound.id() {
        return Err(match TagKind::from_id(root_id) {
            Some(kind) => Error::new(ErrorKind::UnexpectedRootKind(kind)),
            None => Error::malformed_tag(format!("unrecognized root type id {root_id}")),
        });
    }

    let mut cursor = Cursor::new(bytes);
    let (root, _name) = read_nbt(&mut cursor, Flavor::Uncompressed)
        .map_err(|e| Error::malformed_tag(e.to_string()))?;

    let consumed = cursor.position();
    if consumed < bytes.len() as u64 {
        debug!(
            "ignoring {} trailing bytes after section root",
            bytes.len() as u64 - consumed
        );
    }

    from_nbt_compound(&root)
}

fn to_nbt_compound(compound: &Compound) -> Result<NbtCompound> {
    let mut out = NbtCompound::new();
    for (key, value) in compound.iter() {
        out.insert(key.clone(), to_nbt(value)?);
    }
    Ok(out)
}

fn to_nbt(tag: &Tag) -> Result<NbtTag> {
    Ok(match tag {
        Tag::Byte(n) => NbtTag::Byte(*n),
        Tag::Short(n) => NbtTag::Short(*n),
        Tag::Int(n) => NbtTag::Int(*n),
        Tag::Long(n) => NbtTag::Long(*n),
        Tag::Float(n) => NbtTag::Float(*n),
        Tag::Double(n) => NbtTag::Double(*n),
        Tag::ByteArray(bytes) => NbtTag::ByteArray(bytes.iter().map(|b| *b as i8).collect()),
        Tag::IntArray(ints) => NbtTag::IntArray(ints.clone()),
        Tag::String(s) => NbtTag::String(s.clone()),
        Tag::List(items) => {
            if let Err((first, other)) = Tag::list_element_kind(items) {
                return Err(Error::malformed_tag(format!(
                    "list mixes {first} and {other} elements"
                )));
            }
            let mut list = NbtList::new();
            for item in items {
                list.push(to_nbt(item)?);
            }
            NbtTag::List(list)
        }
        Tag::Compound(compound) => NbtTag::Compound(to_nbt_compound(compound)?),
    })
}

fn from_nbt_compound(compound: &NbtCompound) -> Result<Compound> {
    compound
        .inner()
        .iter()
        .map(|(key, value)| Ok((key.clone(), from_nbt(value)?)))
        .collect()
}

fn from_nbt(tag: &NbtTag) -> Result<Tag> {
    Ok(match tag {
        NbtTag::Byte(n) => Tag::Byte(*n),
        NbtTag::Short(n) => Tag::Short(*n),
        NbtTag::Int(n) => Tag::Int(*n),
        NbtTag::Long(n) => Tag::Long(*n),
        NbtTag::Float(n) => Tag::Float(*n),
        NbtTag::Double(n) => Tag::Double(*n),
        NbtTag::ByteArray(bytes) => Tag::ByteArray(bytes.iter().map(|b| *b as u8).collect()),
        NbtTag::IntArray(ints) => Tag::IntArray(ints.clone()),
        NbtTag::LongArray(_) => return Err(Error::malformed_tag("long arrays are not supported")),
        NbtTag::String(s) => Tag::String(s.clone()),
        NbtTag::List(list) => Tag::List(list.iter().map(from_nbt).collect::<Result<_>>()?),
        NbtTag::Compound(compound) => Tag::Compound(from_nbt_compound(compound)?),
    })
}
