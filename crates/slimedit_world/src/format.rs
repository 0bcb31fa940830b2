//! Constants of the Slime Region Format layout.
//!
//! All multi-byte fields are big-endian. Field order:
//!
//! ```text
//! magic          2 bytes   B1 0B
//! format version u8        must be 9
//! world version  u8        opaque
//! min x, min z   i16, i16
//! width, depth   u16, u16
//! chunk bitmask  ceil(width * depth / 8) bytes
//! chunks         i32 compressed size, i32 uncompressed size, data
//! tile entities  i32 compressed size, i32 uncompressed size, data
//! entities       bool, then the same triple only if true
//! extra          i32 compressed size, i32 uncompressed size, data
//! maps           i32 compressed size, i32 uncompressed size, data
//! ```

/// Magic bytes at the start of every SRF file.
pub const MAGIC: [u8; 2] = [0xB1, 0x0B];

/// The only supported container format version.
pub const FORMAT_VERSION: u8 = 9;

/// Key of the list inside the tile-entity section.
pub const TILES_KEY: &str = "tiles";

/// Key of the list inside the entity section.
pub const ENTITIES_KEY: &str = "entities";

/// Section names used in logs and error context.
pub mod section_name {
    /// The opaque chunk block.
    pub const CHUNKS: &str = "chunks";
    /// The tile-entity section.
    pub const TILE_ENTITIES: &str = "tile_entities";
    /// The entity section.
    pub const ENTITIES: &str = "entities";
    /// The extra settings section.
    pub const EXTRA: &str = "extra";
    /// The opaque map block.
    pub const MAPS: &str = "maps";
}

/// Returns the number of bitmask bytes for a chunk grid: one bit per cell,
/// rounded up to whole bytes.
#[must_use]
pub fn bitmask_len(width: u16, depth: u16) -> usize {
    (usize::from(width) * usize::from(depth)).div_ceil(8)
}
