//! Reading the SRF layout.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use byteorder::{BigEndian, ReadBytesExt};
use log::{debug, info, warn};
use slimedit_codec::section;
use slimedit_foundation::{Error, ErrorKind, Result, TagTree};

use crate::config::WorldConfig;
use crate::data::{OpaqueBlock, WorldData};
use crate::format::{ENTITIES_KEY, FORMAT_VERSION, MAGIC, TILES_KEY, bitmask_len, section_name};

fn io(err: std::io::Error) -> Error {
    Error::io(&err)
}

/// Reads a world from a file.
///
/// The file handle is closed on every return path.
///
/// # Errors
///
/// See [`read_world`]; every error carries the file path.
pub fn read_file(path: &Path, config: &WorldConfig) -> Result<WorldData> {
    let file = File::open(path).map_err(|e| io(e).at_path(path))?;
    let mut reader = BufReader::new(file);
    let data = read_world(&mut reader, config).map_err(|e| e.at_path(path))?;
    info!(
        "loaded world {} ({}x{} chunks, {} tile entities, {} entities)",
        path.display(),
        data.width,
        data.depth,
        data.tile_entity_count(),
        data.entity_count()
    );
    Ok(data)
}

/// Reads a world from a byte stream.
///
/// # Errors
///
/// - `InvalidHeader` if the stream does not start with the SRF magic
/// - `UnsupportedVersion` if the format version is not supported
/// - `InvalidLayout` if a size field is negative
/// - `Io` if the stream ends early
/// - `Decompression`, `MalformedTag`, or `UnexpectedRootKind` if the extra
///   section cannot be decoded, or if an optional section cannot be decoded
///   under [`WorldConfig::strict_sections`]
pub fn read_world<R: Read>(reader: &mut R, config: &WorldConfig) -> Result<WorldData> {
    let mut magic = Vec::with_capacity(MAGIC.len());
    reader
        .by_ref()
        .take(MAGIC.len() as u64)
        .read_to_end(&mut magic)
        .map_err(io)?;
    if magic != MAGIC {
        return Err(Error::new(ErrorKind::InvalidHeader { found: magic }));
    }

    let version = reader.read_u8().map_err(io)?;
    if version != FORMAT_VERSION {
        return Err(Error::new(ErrorKind::UnsupportedVersion {
            found: version,
            expected: FORMAT_VERSION,
        }));
    }

    let world_version = reader.read_u8().map_err(io)?;
    let min_x = reader.read_i16::<BigEndian>().map_err(io)?;
    let min_z = reader.read_i16::<BigEndian>().map_err(io)?;
    let width = reader.read_u16::<BigEndian>().map_err(io)?;
    let depth = reader.read_u16::<BigEndian>().map_err(io)?;
    debug!("header: world version {world_version}, origin ({min_x}, {min_z}), {width}x{depth}");

    let chunk_bitmask = read_bytes(reader, bitmask_len(width, depth))?;

    let chunks = read_block(reader).map_err(|e| e.in_section(section_name::CHUNKS))?;

    let tile_entities = read_optional_section(
        reader,
        config,
        section_name::TILE_ENTITIES,
        TILES_KEY,
    )?;

    let has_entities = reader.read_u8().map_err(io)? != 0;
    let entities = if has_entities {
        read_optional_section(reader, config, section_name::ENTITIES, ENTITIES_KEY)?
    } else {
        TagTree::wrapped_list(ENTITIES_KEY)
    };

    let extra = read_block(reader)
        .and_then(|block| section::decode(&block.data, block.uncompressed_len))
        .map_err(|e| e.in_section(section_name::EXTRA))?;

    let maps = read_block(reader).map_err(|e| e.in_section(section_name::MAPS))?;

    Ok(WorldData {
        world_version,
        min_x,
        min_z,
        width,
        depth,
        chunk_bitmask,
        chunks,
        tile_entities,
        has_entities,
        entities,
        extra: TagTree::new(extra),
        maps,
    })
}

/// Reads a section that falls back to `{key: []}` when it cannot be decoded.
///
/// Read failures are always fatal; only decode failures degrade.
fn read_optional_section<R: Read>(
    reader: &mut R,
    config: &WorldConfig,
    name: &'static str,
    key: &str,
) -> Result<TagTree> {
    let block = read_block(reader).map_err(|e| e.in_section(name))?;
    match section::decode(&block.data, block.uncompressed_len) {
        Ok(compound) => Ok(TagTree::new(compound)),
        Err(e) if e.is_section_decode() && !config.strict_sections => {
            warn!("section {name} could not be decoded, using an empty list: {e}");
            Ok(TagTree::wrapped_list(key))
        }
        Err(e) => Err(e.in_section(name)),
    }
}

/// Reads a size pair followed by that many compressed bytes.
fn read_block<R: Read>(reader: &mut R) -> Result<OpaqueBlock> {
    let compressed_len = read_len(reader, "compressed size")?;
    let uncompressed_len = read_len(reader, "uncompressed size")?;
    let data = read_bytes(reader, compressed_len as usize)?;
    Ok(OpaqueBlock::new(uncompressed_len, data))
}

fn read_len<R: Read>(reader: &mut R, what: &str) -> Result<u32> {
    let value = reader.read_i32::<BigEndian>().map_err(io)?;
    u32::try_from(value)
        .map_err(|_| Error::new(ErrorKind::InvalidLayout(format!("negative {what}: {value}"))))
}

/// Reads exactly `len` bytes without trusting `len` for the allocation.
fn read_bytes<R: Read>(reader: &mut R, len: usize) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    reader
        .by_ref()
        .take(len as u64)
        .read_to_end(&mut bytes)
        .map_err(io)?;
    if bytes.len() != len {
        return Err(Error::new(ErrorKind::Io(format!(
            "unexpected end of file: wanted {len} bytes, got {}",
            bytes.len()
        ))));
    }
    Ok(bytes)
}
