//! Container-level checks: header, bitmask, entities flag, damaged sections

use proptest::prelude::*;
use slimedit_codec::section;
use slimedit_foundation::{Compound, ErrorKind, Tag, TagTree};
use slimedit_world::{ENTITIES_KEY, TILES_KEY, WorldConfig, WorldData, read_world, write_world};

fn encode(data: &WorldData) -> Vec<u8> {
    let mut bytes = Vec::new();
    write_world(&mut bytes, data, 3).unwrap();
    bytes
}

fn small_world(width: u16, depth: u16) -> WorldData {
    let mut data = WorldData::new(2, 0, 0, width, depth);
    data.extra = TagTree::new(Compound::new().with("gamemode", "adventure"));
    data
}

/// Offset of the tile-entity block in a world with no chunk data.
fn tiles_offset(data: &WorldData) -> usize {
    // magic, version, world version, 4 x 16-bit, bitmask, empty chunk block
    2 + 1 + 1 + 8 + data.chunk_bitmask.len() + 8
}

// =============================================================================
// Header and version
// =============================================================================

proptest! {
    #[test]
    fn wrong_magic_is_always_rejected(
        magic in any::<[u8; 2]>().prop_filter("not the SRF magic", |m| *m != [0xB1, 0x0B]),
        rest in prop::collection::vec(any::<u8>(), 0..64),
    ) {
        let mut bytes = magic.to_vec();
        bytes.extend(rest);
        let err = read_world(&mut bytes.as_slice(), &WorldConfig::default()).unwrap_err();
        let is_header = matches!(err.kind, ErrorKind::InvalidHeader { .. });
        prop_assert!(is_header);
    }

    #[test]
    fn other_versions_are_always_rejected(version in any::<u8>().prop_filter("not 9", |v| *v != 9)) {
        let mut bytes = encode(&small_world(1, 1));
        bytes[2] = version;
        let err = read_world(&mut bytes.as_slice(), &WorldConfig::default()).unwrap_err();
        let is_version = matches!(err.kind, ErrorKind::UnsupportedVersion { found, .. } if found == version);
        prop_assert!(is_version);
    }
}

// =============================================================================
// Bitmask
// =============================================================================

#[test]
fn two_by_two_needs_one_byte() {
    let data = small_world(2, 2);
    let bytes = encode(&data);
    let decoded = read_world(&mut bytes.as_slice(), &WorldConfig::default()).unwrap();
    assert_eq!(decoded.chunk_bitmask.len(), 1);
}

#[test]
fn three_by_three_needs_two_bytes() {
    let mut data = small_world(3, 3);
    data.chunk_bitmask = vec![0xFF, 0x80];
    let bytes = encode(&data);
    let decoded = read_world(&mut bytes.as_slice(), &WorldConfig::default()).unwrap();
    assert_eq!(decoded.chunk_bitmask, vec![0xFF, 0x80]);
}

#[test]
fn wrong_bitmask_length_is_not_written() {
    let mut data = small_world(3, 3);
    data.chunk_bitmask.push(0);
    let mut bytes = Vec::new();
    let err = write_world(&mut bytes, &data, 3).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidLayout(_)));
}

// =============================================================================
// Entities flag
// =============================================================================

#[test]
fn absent_entities_occupy_no_bytes() {
    let data = small_world(1, 1);
    let bytes = encode(&data);

    let tiles = section::encode(&data.tile_entities.to_compound(), 3).unwrap();
    let extra = section::encode(&data.extra.to_compound(), 3).unwrap();
    let expected = tiles_offset(&data) + 8 + tiles.data.len() + 1 + 8 + extra.data.len() + 8;
    assert_eq!(bytes.len(), expected);
    assert_eq!(bytes[tiles_offset(&data) + 8 + tiles.data.len()], 0);
}

#[test]
fn absent_entities_load_as_empty_list() {
    let bytes = encode(&small_world(1, 1));
    let decoded = read_world(&mut bytes.as_slice(), &WorldConfig::default()).unwrap();
    assert!(!decoded.has_entities);
    assert_eq!(decoded.entity_count(), 0);
    assert_eq!(decoded.entities, TagTree::wrapped_list(ENTITIES_KEY));
}

// =============================================================================
// Damaged sections
// =============================================================================

fn corrupt_tiles(data: &WorldData) -> Vec<u8> {
    let mut bytes = encode(data);
    // First byte of the compressed tile-entity payload.
    bytes[tiles_offset(data) + 8] ^= 0xFF;
    bytes
}

#[test]
fn corrupt_tiles_fall_back_by_default() {
    let mut data = small_world(1, 1);
    data.tile_entities = TagTree::new(
        Compound::new().with(TILES_KEY, Tag::List(vec![Tag::Compound(Compound::new())])),
    );
    let bytes = corrupt_tiles(&data);
    let decoded = read_world(&mut bytes.as_slice(), &WorldConfig::default()).unwrap();
    assert_eq!(decoded.tile_entities, TagTree::wrapped_list(TILES_KEY));
    assert_eq!(decoded.extra, data.extra);
}

#[test]
fn corrupt_tiles_fail_when_strict() {
    let bytes = corrupt_tiles(&small_world(1, 1));
    let err = read_world(&mut bytes.as_slice(), &WorldConfig::strict()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Decompression(_)));
}

#[test]
fn corrupt_extra_is_fatal() {
    let data = small_world(1, 1);
    let mut bytes = encode(&data);
    let tiles = section::encode(&data.tile_entities.to_compound(), 3).unwrap();
    let extra_data = tiles_offset(&data) + 8 + tiles.data.len() + 1 + 8;
    bytes[extra_data] ^= 0xFF;

    let err = read_world(&mut bytes.as_slice(), &WorldConfig::default()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Decompression(_)));
    assert_eq!(err.context.unwrap().section, Some("extra"));
}
