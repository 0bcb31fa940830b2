//! Node handles and owner back-references for [`crate::TagTree`].

use std::fmt;

/// Handle to a node inside a [`crate::TagTree`].
///
/// Handles are plain indices. A tree never frees a node, so a handle stays
/// valid for as long as the tree that issued it.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    /// Index into the tree's node arena.
    pub index: u32,
}

impl NodeId {
    /// Creates a node handle from a raw arena index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self { index }
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.index)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index)
    }
}

/// A child's link to the container that owns it.
///
/// This is a back-reference only; the container's child collection is the
/// sole owner.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Owner {
    /// The node is a root, or has been detached.
    None,
    /// The node is an element of a list.
    List {
        /// The owning list node.
        parent: NodeId,
    },
    /// The node is an entry of a compound.
    Compound {
        /// The owning compound node.
        parent: NodeId,
        /// The key the node is stored under.
        key: String,
    },
}

impl Owner {
    /// Returns the owning node, if any.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        match self {
            Self::None => None,
            Self::List { parent } | Self::Compound { parent, .. } => Some(*parent),
        }
    }

    /// Returns true if the node has no owner.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}
