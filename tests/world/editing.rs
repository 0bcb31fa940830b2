//! Editing a world on disk through `World`

use slimedit_foundation::{Compound, ErrorKind, Tag, TagTree};
use slimedit_world::{TILES_KEY, World, WorldConfig, WorldData, load_world, save_world};

fn furnace(x: i32, burn: i16) -> Tag {
    Tag::Compound(
        Compound::new()
            .with("id", "minecraft:furnace")
            .with("x", x)
            .with("BurnTime", Tag::Short(burn)),
    )
}

fn write_source(dir: &std::path::Path) -> std::path::PathBuf {
    let mut data = WorldData::new(3, -4, -4, 8, 8);
    data.tile_entities = TagTree::new(
        Compound::new().with(TILES_KEY, Tag::List(vec![furnace(0, 0), furnace(1, -1), furnace(2, 5)])),
    );
    data.extra = TagTree::new(Compound::new().with("owner", "alex"));
    let path = dir.join("factory.slime");
    save_world(&data, &path).unwrap();
    path
}

#[test]
fn edit_save_and_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(dir.path());
    let before = std::fs::read(&source).unwrap();

    let mut world = World::open(&source);
    world.load().unwrap();
    {
        let data = world.data_mut().unwrap();
        let list = data.tile_entity_list().unwrap();
        let burning = data.tile_entities.element(list, 1).unwrap();
        let burn = data.tile_entities.child(burning, "BurnTime").unwrap();
        assert_eq!(data.tile_entities.display_value(burn).unwrap(), "65535");
        data.tile_entities.set_scalar(burn, Tag::Short(200)).unwrap();

        let first = data.tile_entities.element(list, 0).unwrap();
        assert!(data.tile_entities.delete(first));
    }
    let saved = world.save().unwrap();

    assert_eq!(std::fs::read(&source).unwrap(), before);
    assert_eq!(saved.file_name().unwrap(), "factory_edited.slime");

    let edited = load_world(&saved).unwrap();
    assert_eq!(edited.tile_entity_count(), 2);
    let burn = edited.tile_entities.resolve("tiles/0/BurnTime").unwrap();
    assert_eq!(edited.tile_entities.get(burn).unwrap(), Tag::Short(200));
    assert_eq!(edited.extra, world.data().unwrap().extra);
}

#[test]
fn custom_suffix_and_level() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(dir.path());
    let config = WorldConfig::default()
        .with_edited_suffix(".v2")
        .with_compression_level(19);

    let mut world = World::with_config(&source, config);
    world.load().unwrap();
    let saved = world.save().unwrap();
    assert_eq!(saved, dir.path().join("factory.v2.slime"));
    assert_eq!(load_world(&saved).unwrap(), *world.data().unwrap());
}

#[test]
fn reload_after_failed_save_keeps_working() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(dir.path());
    let mut world = World::open(&source);
    world.load().unwrap();

    let err = world.save_to(&source).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::WriteError(_)));

    world.reload().unwrap();
    assert_eq!(world.data().unwrap().tile_entity_count(), 3);
}

#[test]
fn name_is_the_file_stem() {
    let world = World::open("/srv/worlds/factory.slime");
    assert_eq!(world.name(), "factory");
}
