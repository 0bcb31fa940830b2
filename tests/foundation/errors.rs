//! Integration tests for Error types
//!
//! Tests error construction, display, and context.

use std::path::PathBuf;

use slimedit_foundation::{Error, ErrorContext, ErrorKind, NodeId, TagKind};

// =============================================================================
// Error Display
// =============================================================================

#[test]
fn version_error_names_both_versions() {
    let err = Error::new(ErrorKind::UnsupportedVersion {
        found: 8,
        expected: 9,
    });
    let msg = err.to_string();
    assert!(msg.contains('8'));
    assert!(msg.contains('9'));
}

#[test]
fn node_not_found_names_the_node() {
    let err = Error::node_not_found(NodeId::new(17));
    assert!(matches!(err.kind, ErrorKind::NodeNotFound(_)));
    assert!(err.to_string().contains("17"));
}

#[test]
fn root_kind_error_names_the_kind() {
    let err = Error::new(ErrorKind::UnexpectedRootKind(TagKind::List));
    assert!(err.to_string().contains("List"));
}

// =============================================================================
// Error Context
// =============================================================================

#[test]
fn context_display() {
    assert_eq!(
        ErrorContext::new().with_section("tile_entities").to_string(),
        "in section tile_entities"
    );
    assert_eq!(
        ErrorContext::new().with_path("a.slime").to_string(),
        "at a.slime"
    );
}

#[test]
fn context_accumulates() {
    let err = Error::decompression("short by 3 bytes")
        .in_section("entities")
        .at_path("worlds/hub.slime");
    let ctx = err.context.as_ref().unwrap();
    assert_eq!(ctx.section, Some("entities"));
    assert_eq!(ctx.path, Some(PathBuf::from("worlds/hub.slime")));
    assert_eq!(
        err.to_string(),
        "decompression failed: short by 3 bytes (in section entities of worlds/hub.slime)"
    );
}

#[test]
fn errors_are_std_errors() {
    fn takes_error(_: &dyn std::error::Error) {}
    takes_error(&Error::new(ErrorKind::NotLoaded));
}
