//! Round-trip properties of the container

use proptest::prelude::*;
use slimedit_codec::compression;
use slimedit_foundation::{Compound, Tag, TagTree};
use slimedit_world::{
    ENTITIES_KEY, OpaqueBlock, TILES_KEY, WorldConfig, WorldData, read_world, write_world,
};

fn opaque() -> impl Strategy<Value = OpaqueBlock> {
    prop::collection::vec(any::<u8>(), 0..64).prop_map(|raw| {
        if raw.is_empty() {
            OpaqueBlock::default()
        } else {
            let data = compression::compress(&raw, 1).unwrap();
            OpaqueBlock::new(u32::try_from(raw.len()).unwrap(), data)
        }
    })
}

fn entry() -> impl Strategy<Value = Tag> {
    (any::<i32>(), "[a-z:_]{1,20}", any::<i8>()).prop_map(|(x, id, flag)| {
        Tag::Compound(
            Compound::new()
                .with("id", id)
                .with("x", x)
                .with("flag", Tag::Byte(flag)),
        )
    })
}

fn wrapped(key: &'static str) -> impl Strategy<Value = TagTree> {
    prop::collection::vec(entry(), 0..6)
        .prop_map(move |items| TagTree::new(Compound::new().with(key, Tag::List(items))))
}

fn world() -> impl Strategy<Value = WorldData> {
    (
        (any::<u8>(), any::<i16>(), any::<i16>(), 0u16..12, 0u16..12),
        opaque(),
        wrapped(TILES_KEY),
        prop::option::of(wrapped(ENTITIES_KEY)),
        prop::collection::vec(("[a-z]{1,6}", any::<i64>()), 0..5),
        opaque(),
        any::<u8>(),
    )
        .prop_map(
            |((version, min_x, min_z, width, depth), chunks, tiles, entities, extra, maps, fill)| {
                let mut data = WorldData::new(version, min_x, min_z, width, depth);
                data.chunk_bitmask.fill(fill);
                data.chunks = chunks;
                data.tile_entities = tiles;
                if let Some(entities) = entities {
                    data.has_entities = true;
                    data.entities = entities;
                }
                data.extra = TagTree::new(
                    extra
                        .into_iter()
                        .map(|(k, v)| (k, Tag::Long(v)))
                        .collect(),
                );
                data.maps = maps;
                data
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn load_of_save_is_identity(data in world()) {
        let mut bytes = Vec::new();
        write_world(&mut bytes, &data, 3).unwrap();
        let decoded = read_world(&mut bytes.as_slice(), &WorldConfig::strict()).unwrap();

        prop_assert_eq!(decoded.chunk_bitmask.len(), data.expected_bitmask_len());
        prop_assert_eq!(&decoded.chunks, &data.chunks);
        prop_assert_eq!(&decoded.maps, &data.maps);
        prop_assert_eq!(decoded, data);
    }

    #[test]
    fn saving_twice_gives_the_same_bytes(data in world()) {
        let mut first = Vec::new();
        write_world(&mut first, &data, 3).unwrap();
        let decoded = read_world(&mut first.as_slice(), &WorldConfig::default()).unwrap();
        let mut second = Vec::new();
        write_world(&mut second, &decoded, 3).unwrap();
        prop_assert_eq!(first, second);
    }
}
