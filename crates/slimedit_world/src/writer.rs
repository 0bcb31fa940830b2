//! Writing the SRF layout.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use byteorder::{BigEndian, WriteBytesExt};
use log::info;
use slimedit_codec::{EncodedSection, section};
use slimedit_foundation::{Error, ErrorKind, Result};

use crate::data::WorldData;
use crate::format::{FORMAT_VERSION, MAGIC, section_name};

fn write_err(err: std::io::Error) -> Error {
    Error::write(&err)
}

/// The structured sections of a world, already encoded.
#[derive(Clone, Debug)]
pub struct EncodedSections {
    /// The tile-entity section.
    pub tile_entities: EncodedSection,
    /// The entity section, if the world has one.
    pub entities: Option<EncodedSection>,
    /// The extra section.
    pub extra: EncodedSection,
}

/// Encodes every structured section of a world.
///
/// Edits made to the section trees since load are reflected here.
///
/// # Errors
///
/// Returns the first section encoding error, tagged with its section.
pub fn encode_sections(data: &WorldData, level: i32) -> Result<EncodedSections> {
    let tile_entities = section::encode(&data.tile_entities.to_compound(), level)
        .map_err(|e| e.in_section(section_name::TILE_ENTITIES))?;
    let entities = if data.has_entities {
        Some(
            section::encode(&data.entities.to_compound(), level)
                .map_err(|e| e.in_section(section_name::ENTITIES))?,
        )
    } else {
        None
    };
    let extra = section::encode(&data.extra.to_compound(), level)
        .map_err(|e| e.in_section(section_name::EXTRA))?;
    Ok(EncodedSections {
        tile_entities,
        entities,
        extra,
    })
}

/// Checks the invariants the layout relies on.
///
/// # Errors
///
/// Returns `InvalidLayout` if the bitmask length does not match the
/// extents, or a block is too large to describe.
pub fn validate(data: &WorldData) -> Result<()> {
    let expected = data.expected_bitmask_len();
    if data.chunk_bitmask.len() != expected {
        return Err(Error::new(ErrorKind::InvalidLayout(format!(
            "chunk bitmask is {} bytes, {}x{} chunks need {expected}",
            data.chunk_bitmask.len(),
            data.width,
            data.depth
        ))));
    }
    for (name, block) in [
        (section_name::CHUNKS, &data.chunks),
        (section_name::MAPS, &data.maps),
    ] {
        to_i32(block.data.len()).map_err(|e| e.in_section(name))?;
        to_i32(block.uncompressed_len as usize).map_err(|e| e.in_section(name))?;
    }
    Ok(())
}

fn to_i32(len: usize) -> Result<i32> {
    i32::try_from(len).map_err(|_| {
        Error::new(ErrorKind::InvalidLayout(format!(
            "{len} bytes exceeds the format limit"
        )))
    })
}

/// Writes a world into a byte stream, encoding its sections first.
///
/// # Errors
///
/// Returns `InvalidLayout` or a section encoding error before anything is
/// written, and `WriteError` if the stream fails.
pub fn write_world<W: Write>(writer: &mut W, data: &WorldData, level: i32) -> Result<()> {
    validate(data)?;
    let sections = encode_sections(data, level)?;
    write_encoded(writer, data, &sections)
}

/// Writes a world whose sections have already been encoded.
///
/// # Errors
///
/// Returns `InvalidLayout` if a size does not fit the format, and
/// `WriteError` if the stream fails.
pub fn write_encoded<W: Write>(
    writer: &mut W,
    data: &WorldData,
    sections: &EncodedSections,
) -> Result<()> {
    writer.write_all(&MAGIC).map_err(write_err)?;
    writer.write_u8(FORMAT_VERSION).map_err(write_err)?;
    writer.write_u8(data.world_version).map_err(write_err)?;

    writer.write_i16::<BigEndian>(data.min_x).map_err(write_err)?;
    writer.write_i16::<BigEndian>(data.min_z).map_err(write_err)?;
    writer.write_u16::<BigEndian>(data.width).map_err(write_err)?;
    writer.write_u16::<BigEndian>(data.depth).map_err(write_err)?;

    writer.write_all(&data.chunk_bitmask).map_err(write_err)?;

    write_block(writer, data.chunks.uncompressed_len, &data.chunks.data)?;

    write_section(writer, &sections.tile_entities)?;

    match &sections.entities {
        Some(entities) => {
            writer.write_u8(1).map_err(write_err)?;
            write_section(writer, entities)?;
        }
        None => writer.write_u8(0).map_err(write_err)?,
    }

    write_section(writer, &sections.extra)?;

    write_block(writer, data.maps.uncompressed_len, &data.maps.data)
}

fn write_section<W: Write>(writer: &mut W, section: &EncodedSection) -> Result<()> {
    write_block(writer, section.uncompressed_len, &section.data)
}

/// Writes the compressed size, then the uncompressed size, then the bytes.
fn write_block<W: Write>(writer: &mut W, uncompressed_len: u32, data: &[u8]) -> Result<()> {
    writer
        .write_i32::<BigEndian>(to_i32(data.len())?)
        .map_err(write_err)?;
    writer
        .write_i32::<BigEndian>(to_i32(uncompressed_len as usize)?)
        .map_err(write_err)?;
    writer.write_all(data).map_err(write_err)
}

/// Writes a world to a file.
///
/// Sections are encoded before the file is created, so an encoding failure
/// leaves nothing behind. A failure while writing may leave a partial file.
///
/// # Errors
///
/// See [`write_world`]; every error carries the file path.
pub fn write_file(path: &Path, data: &WorldData, level: i32) -> Result<()> {
    validate(data).map_err(|e| e.at_path(path))?;
    let sections = encode_sections(data, level).map_err(|e| e.at_path(path))?;

    let file = File::create(path).map_err(|e| write_err(e).at_path(path))?;
    let mut writer = BufWriter::new(file);
    write_encoded(&mut writer, data, &sections).map_err(|e| e.at_path(path))?;
    writer.flush().map_err(|e| write_err(e).at_path(path))?;

    info!(
        "saved world to {} ({} tile entities, {} entities)",
        path.display(),
        data.tile_entity_count(),
        data.entity_count()
    );
    Ok(())
}
