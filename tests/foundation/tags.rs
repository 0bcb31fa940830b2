//! Integration tests for Tag values and kinds

use proptest::prelude::*;
use slimedit_foundation::{Compound, Tag, TagKind, parse_scalar};

// =============================================================================
// Display
// =============================================================================

#[test]
fn masked_display() {
    assert_eq!(Tag::Byte(-1).display_value(), "255");
    assert_eq!(Tag::Short(-1).display_value(), "65535");
    assert_eq!(Tag::Int(-1).display_value(), "-1");
}

#[test]
fn kind_names_and_ids() {
    assert_eq!(TagKind::Compound.id(), 10);
    assert_eq!(TagKind::IntArray.id(), 11);
    assert_eq!(TagKind::from_id(9), Some(TagKind::List));
    assert_eq!(TagKind::Double.to_string(), "Double");
}

#[test]
fn scalar_kinds() {
    let scalars: Vec<_> = TagKind::ALL.into_iter().filter(|k| k.is_scalar()).collect();
    assert_eq!(
        scalars,
        vec![
            TagKind::Byte,
            TagKind::Short,
            TagKind::Int,
            TagKind::Long,
            TagKind::Float,
            TagKind::Double,
            TagKind::String,
        ]
    );
}

// =============================================================================
// Parsing
// =============================================================================

#[test]
fn parse_accepts_unsigned_byte_and_short() {
    assert_eq!(parse_scalar(TagKind::Byte, "255"), Some(Tag::Byte(-1)));
    assert_eq!(parse_scalar(TagKind::Byte, "-128"), Some(Tag::Byte(-128)));
    assert_eq!(parse_scalar(TagKind::Short, "65535"), Some(Tag::Short(-1)));
    assert_eq!(parse_scalar(TagKind::Byte, "256"), None);
}

#[test]
fn parse_rejects_garbage_and_containers() {
    assert_eq!(parse_scalar(TagKind::Int, "12x"), None);
    assert_eq!(parse_scalar(TagKind::Long, ""), None);
    assert_eq!(parse_scalar(TagKind::Compound, "{}"), None);
    assert_eq!(parse_scalar(TagKind::ByteArray, "1"), None);
}

#[test]
fn parse_floats() {
    assert_eq!(parse_scalar(TagKind::Float, "1.5"), Some(Tag::Float(1.5)));
    assert_eq!(parse_scalar(TagKind::Double, "-0.25"), Some(Tag::Double(-0.25)));
}

// =============================================================================
// Compounds
// =============================================================================

#[test]
fn compound_keeps_insertion_order() {
    let mut compound = Compound::new().with("z", 1).with("a", 2).with("m", 3);
    let keys: Vec<_> = compound.keys().cloned().collect();
    assert_eq!(keys, vec!["z", "a", "m"]);

    compound.remove("a");
    compound.insert("b", 4);
    let keys: Vec<_> = compound.keys().cloned().collect();
    assert_eq!(keys, vec!["z", "m", "b"]);
}

proptest! {
    #[test]
    fn int_display_parses_back(n in any::<i32>()) {
        let tag = Tag::Int(n);
        prop_assert_eq!(parse_scalar(TagKind::Int, &tag.display_value()), Some(tag));
    }

    #[test]
    fn float_display_parses_back(x in any::<f32>().prop_filter("finite", |x| x.is_finite())) {
        let tag = Tag::Float(x);
        prop_assert_eq!(parse_scalar(TagKind::Float, &tag.display_value()), Some(tag));
    }
}
