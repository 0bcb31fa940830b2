//! The in-memory world record.

use std::fmt;

use slimedit_foundation::{NodeId, TagTree};

use crate::format::{ENTITIES_KEY, TILES_KEY, bitmask_len};

/// A compressed block carried through unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OpaqueBlock {
    /// Declared length of the data once decompressed.
    pub uncompressed_len: u32,
    /// The compressed bytes, exactly as read.
    pub data: Vec<u8>,
}

impl OpaqueBlock {
    /// Creates a block from its declared length and compressed bytes.
    #[must_use]
    pub fn new(uncompressed_len: u32, data: Vec<u8>) -> Self {
        Self {
            uncompressed_len,
            data,
        }
    }
}

/// Everything stored in a Slime world file.
///
/// The format version is not stored; it is always
/// [`FORMAT_VERSION`](crate::format::FORMAT_VERSION).
#[derive(Clone, Debug, PartialEq)]
pub struct WorldData {
    /// Game version byte, passed through unchanged.
    pub world_version: u8,
    /// Lowest chunk x coordinate.
    pub min_x: i16,
    /// Lowest chunk z coordinate.
    pub min_z: i16,
    /// Chunk-grid extent along x.
    pub width: u16,
    /// Chunk-grid extent along z.
    pub depth: u16,
    /// One presence bit per chunk cell.
    pub chunk_bitmask: Vec<u8>,
    /// Compressed chunk payload.
    pub chunks: OpaqueBlock,
    /// Tile entities, wrapped as `{"tiles": [...]}`.
    pub tile_entities: TagTree,
    /// Whether the entity section is present in the file.
    pub has_entities: bool,
    /// Entities, wrapped as `{"entities": [...]}`. Empty when absent.
    pub entities: TagTree,
    /// Free-form world settings.
    pub extra: TagTree,
    /// Compressed map images.
    pub maps: OpaqueBlock,
}

impl WorldData {
    /// Creates an empty world covering the given chunk grid.
    ///
    /// The bitmask is zeroed, payloads are empty, and every section holds
    /// its default empty shape.
    #[must_use]
    pub fn new(world_version: u8, min_x: i16, min_z: i16, width: u16, depth: u16) -> Self {
        Self {
            world_version,
            min_x,
            min_z,
            width,
            depth,
            chunk_bitmask: vec![0; bitmask_len(width, depth)],
            chunks: OpaqueBlock::default(),
            tile_entities: TagTree::wrapped_list(TILES_KEY),
            has_entities: false,
            entities: TagTree::wrapped_list(ENTITIES_KEY),
            extra: TagTree::default(),
            maps: OpaqueBlock::default(),
        }
    }

    /// Returns the bitmask length this world's extents require.
    #[must_use]
    pub fn expected_bitmask_len(&self) -> usize {
        bitmask_len(self.width, self.depth)
    }

    /// Returns the list node holding the tile entities.
    #[must_use]
    pub fn tile_entity_list(&self) -> Option<NodeId> {
        self.tile_entities
            .child(self.tile_entities.root(), TILES_KEY)
    }

    /// Returns the list node holding the entities.
    #[must_use]
    pub fn entity_list(&self) -> Option<NodeId> {
        self.entities.child(self.entities.root(), ENTITIES_KEY)
    }

    /// Returns the number of tile entities.
    #[must_use]
    pub fn tile_entity_count(&self) -> usize {
        self.tile_entity_list()
            .and_then(|list| self.tile_entities.len(list).ok())
            .unwrap_or(0)
    }

    /// Returns the number of entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entity_list()
            .and_then(|list| self.entities.len(list).ok())
            .unwrap_or(0)
    }
}

impl fmt::Display for WorldData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SlimeWorldData {{")?;
        writeln!(f, "\tworldVersion: {}", self.world_version)?;
        writeln!(f, "\tminX: {}", self.min_x)?;
        writeln!(f, "\tminZ: {}", self.min_z)?;
        writeln!(f, "\twidth: {}", self.width)?;
        writeln!(f, "\tdepth: {}", self.depth)?;
        write!(f, "\tchunkBitmask ({} bytes): {{", self.chunk_bitmask.len())?;
        for (i, byte) in self.chunk_bitmask.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{byte:x}")?;
        }
        writeln!(f, "}}")?;
        writeln!(
            f,
            "\tchunks: {} bytes compressed, {} bytes uncompressed",
            self.chunks.data.len(),
            self.chunks.uncompressed_len
        )?;
        writeln!(f, "\ttileEntities: {} entries", self.tile_entity_count())?;
        writeln!(f, "\thasEntities: {}", self.has_entities)?;
        if self.has_entities {
            writeln!(f, "\tentities: {} entries", self.entity_count())?;
        }
        let extra_len = self.extra.len(self.extra.root()).unwrap_or(0);
        writeln!(f, "\textra: {extra_len} entries")?;
        writeln!(
            f,
            "\tworldMaps: {} bytes compressed, {} bytes uncompressed",
            self.maps.data.len(),
            self.maps.uncompressed_len
        )?;
        write!(f, "}}")
    }
}
