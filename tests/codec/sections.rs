//! Integration tests for compressed sections

use slimedit_codec::{DEFAULT_LEVEL, compression, decode, encode, nbt};
use slimedit_foundation::{Compound, ErrorKind, Tag};

fn entities(count: i32) -> Compound {
    let list = (0..count)
        .map(|i| {
            Tag::Compound(
                Compound::new()
                    .with("id", "minecraft:armor_stand")
                    .with("Pos", Tag::List(vec![Tag::Double(f64::from(i)), Tag::Double(64.0), Tag::Double(0.5)])),
            )
        })
        .collect();
    Compound::new().with("entities", Tag::List(list))
}

#[test]
fn sections_round_trip() {
    let compound = entities(20);
    let section = encode(&compound, DEFAULT_LEVEL).unwrap();
    assert!(section.data.len() < section.uncompressed_len as usize);
    assert_eq!(decode(&section.data, section.uncompressed_len).unwrap(), compound);
}

#[test]
fn level_does_not_change_the_document() {
    let compound = entities(5);
    let fast = encode(&compound, 1).unwrap();
    let small = encode(&compound, 19).unwrap();
    assert_eq!(fast.uncompressed_len, small.uncompressed_len);
    assert_eq!(decode(&small.data, small.uncompressed_len).unwrap(), compound);
}

#[test]
fn decompression_mismatch_never_truncates_or_pads() {
    let section = encode(&entities(3), DEFAULT_LEVEL).unwrap();
    for declared in [0, 1, section.uncompressed_len - 1, section.uncompressed_len + 1] {
        let err = decode(&section.data, declared).unwrap_err();
        assert!(
            matches!(err.kind, ErrorKind::Decompression(_)),
            "declared {declared}: {err}"
        );
    }
}

#[test]
fn corrupt_stream_is_a_decompression_error() {
    let mut section = encode(&entities(3), DEFAULT_LEVEL).unwrap();
    section.data[0] ^= 0xFF;
    let err = decode(&section.data, section.uncompressed_len).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Decompression(_)));
}

#[test]
fn compressed_garbage_nbt_is_malformed() {
    let garbage = [0x0A, 0x00, 0x00, 0x63];
    let data = compression::compress(&garbage, DEFAULT_LEVEL).unwrap();
    let err = decode(&data, 4).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MalformedTag(_)));
}

#[test]
fn empty_compound_is_four_bytes() {
    let section = encode(&Compound::new(), DEFAULT_LEVEL).unwrap();
    assert_eq!(section.uncompressed_len, 4);
    assert_eq!(nbt::encode(&Compound::new()).unwrap().len(), 4);
}
