//! Integration tests for TagTree editing
//!
//! Tests navigation, in-place scalar edits, and deletion through owners.

use proptest::prelude::*;
use slimedit_foundation::{Compound, ErrorKind, Owner, Tag, TagKind, TagTree};

fn sign(text: &str) -> Tag {
    Tag::Compound(
        Compound::new()
            .with("id", "minecraft:sign")
            .with("Text1", text)
            .with("GlowingText", Tag::Byte(0)),
    )
}

fn tiles(count: usize) -> TagTree {
    let items = (0..count).map(|i| sign(&format!("line {i}"))).collect();
    TagTree::new(Compound::new().with("tiles", Tag::List(items)))
}

// =============================================================================
// Navigation
// =============================================================================

#[test]
fn paths_and_names() {
    let tree = tiles(3);
    let text = tree.resolve("tiles/[2]/Text1").unwrap();
    assert_eq!(tree.name(text).unwrap(), "Text1");
    assert_eq!(tree.path(text).unwrap(), "tiles/2/Text1");
    assert_eq!(tree.display_text(text).unwrap(), "(String) Text1: line 2");

    let sign = tree.parent(text).unwrap();
    assert_eq!(tree.name(sign).unwrap(), "[2]");
    assert_eq!(tree.kind(sign).unwrap(), TagKind::Compound);
}

#[test]
fn owners_point_back() {
    let tree = tiles(1);
    let list = tree.child(tree.root(), "tiles").unwrap();
    let first = tree.element(list, 0).unwrap();
    assert!(matches!(tree.owner(first).unwrap(), Owner::List { parent } if *parent == list));
    assert!(tree.owner(tree.root()).unwrap().is_none());
}

// =============================================================================
// Editing
// =============================================================================

#[test]
fn set_scalar_is_visible_in_export() {
    let mut tree = tiles(2);
    let glow = tree.resolve("tiles/1/GlowingText").unwrap();
    tree.set_scalar(glow, Tag::Byte(1)).unwrap();

    let exported = tree.to_compound();
    let list = exported.get("tiles").unwrap().as_list().unwrap();
    let second = list[1].as_compound().unwrap();
    assert_eq!(second.get("GlowingText"), Some(&Tag::Byte(1)));
}

#[test]
fn set_scalar_rejects_other_kinds() {
    let mut tree = tiles(1);
    let glow = tree.resolve("tiles/0/GlowingText").unwrap();
    let err = tree.set_scalar(glow, Tag::Int(1)).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::TypeMismatch {
            expected: TagKind::Byte,
            actual: TagKind::Int
        }
    ));
    assert_eq!(tree.get(glow).unwrap(), Tag::Byte(0));
}

#[test]
fn delete_removes_from_owner_once() {
    let mut tree = tiles(3);
    let list = tree.resolve("tiles").unwrap();
    let middle = tree.element(list, 1).unwrap();

    assert!(tree.delete(middle));
    assert!(!tree.delete(middle));
    assert_eq!(tree.len(list).unwrap(), 2);
    assert!(!tree.children(list).unwrap().contains(&middle));
    assert!(!tree.is_attached(middle));
}

#[test]
fn identical_siblings_are_told_apart() {
    let mut tree = TagTree::new(
        Compound::new().with("tiles", Tag::List(vec![sign("same"), sign("same")])),
    );
    let list = tree.resolve("tiles").unwrap();
    let second = tree.element(list, 1).unwrap();
    let first = tree.element(list, 0).unwrap();

    assert!(tree.delete(second));
    assert_eq!(tree.children(list).unwrap(), vec![first]);
}

#[test]
fn root_cannot_be_deleted() {
    let mut tree = tiles(1);
    let root = tree.root();
    assert!(!tree.delete(root));
}

proptest! {
    #[test]
    fn delete_is_idempotent(count in 1usize..8, pick in 0usize..8) {
        let mut tree = tiles(count);
        let list = tree.resolve("tiles").unwrap();
        let target = tree.element(list, pick % count).unwrap();

        prop_assert!(tree.delete(target));
        prop_assert!(!tree.delete(target));
        prop_assert_eq!(tree.len(list).unwrap(), count - 1);
        prop_assert!(!tree.children(list).unwrap().contains(&target));
    }
}
