//! Editable tag trees with parent back-references.
//!
//! A [`TagTree`] holds one section's root compound in an arena. Every node
//! knows its owning container through an [`Owner`] link, so a node picked
//! out of a flat selection can remove itself without the caller walking
//! the tree to find its parent.

// Node counts are bounded by section sizes, which are bounded by u32.
#![allow(clippy::cast_possible_truncation)]

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::kind::TagKind;
use crate::node::{NodeId, Owner};
use crate::value::{Compound, Tag};

#[derive(Clone, Debug)]
enum Body {
    /// Scalars and arrays. Never holds a list or compound.
    Leaf(Tag),
    List(Vec<NodeId>),
    Compound(IndexMap<String, NodeId>),
}

#[derive(Clone, Debug)]
struct Node {
    body: Body,
    owner: Owner,
}

impl Node {
    fn kind(&self) -> TagKind {
        match &self.body {
            Body::Leaf(tag) => tag.kind(),
            Body::List(_) => TagKind::List,
            Body::Compound(_) => TagKind::Compound,
        }
    }
}

/// An editable tree of tags rooted at a compound.
///
/// Containers own their children; children point back at their container
/// through [`Owner`]. Deleting a node detaches it from its owner and leaves
/// it readable as a detached root. Nodes are never freed while the tree is
/// alive.
#[derive(Clone, Debug)]
pub struct TagTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Default for TagTree {
    fn default() -> Self {
        Self::new(Compound::new())
    }
}

/// Trees are equal when their attached contents are equal.
impl PartialEq for TagTree {
    fn eq(&self, other: &Self) -> bool {
        self.to_compound() == other.to_compound()
    }
}

impl TagTree {
    /// Builds a tree from a root compound.
    #[must_use]
    pub fn new(root: Compound) -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            root: NodeId::new(0),
        };
        tree.root = tree.alloc(Tag::Compound(root), Owner::None);
        tree
    }

    /// Builds a tree holding a single list under `key`.
    ///
    /// This is the shape of the tile-entity and entity sections.
    #[must_use]
    pub fn wrapped_list(key: &str) -> Self {
        Self::new(Compound::new().with(key, Tag::List(Vec::new())))
    }

    fn alloc(&mut self, tag: Tag, owner: Owner) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        match tag {
            Tag::List(items) => {
                self.nodes.push(Node {
                    body: Body::List(Vec::new()),
                    owner,
                });
                let children: Vec<NodeId> = items
                    .into_iter()
                    .map(|item| self.alloc(item, Owner::List { parent: id }))
                    .collect();
                self.nodes[id.index as usize].body = Body::List(children);
            }
            Tag::Compound(compound) => {
                self.nodes.push(Node {
                    body: Body::Compound(IndexMap::new()),
                    owner,
                });
                let entries: IndexMap<String, NodeId> = compound
                    .into_iter()
                    .map(|(key, value)| {
                        let child = self.alloc(
                            value,
                            Owner::Compound {
                                parent: id,
                                key: key.clone(),
                            },
                        );
                        (key, child)
                    })
                    .collect();
                self.nodes[id.index as usize].body = Body::Compound(entries);
            }
            leaf => self.nodes.push(Node {
                body: Body::Leaf(leaf),
                owner,
            }),
        }
        id
    }

    fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes
            .get(id.index as usize)
            .ok_or_else(|| Error::node_not_found(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes
            .get_mut(id.index as usize)
            .ok_or_else(|| Error::node_not_found(id))
    }

    /// Returns the root compound's handle.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Returns the number of nodes ever allocated, detached ones included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Reads the current value of a node and its subtree.
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` if the handle was not issued by this tree.
    pub fn get(&self, id: NodeId) -> Result<Tag> {
        self.node(id)?;
        Ok(self.materialize(id))
    }

    fn materialize(&self, id: NodeId) -> Tag {
        match &self.nodes[id.index as usize].body {
            Body::Leaf(tag) => tag.clone(),
            Body::List(children) => {
                Tag::List(children.iter().map(|child| self.materialize(*child)).collect())
            }
            Body::Compound(entries) => Tag::Compound(self.materialize_entries(entries)),
        }
    }

    fn materialize_entries(&self, entries: &IndexMap<String, NodeId>) -> Compound {
        entries
            .iter()
            .map(|(key, child)| (key.clone(), self.materialize(*child)))
            .collect()
    }

    /// Rebuilds the root compound from the attached nodes.
    ///
    /// Detached nodes are not part of the result.
    #[must_use]
    pub fn to_compound(&self) -> Compound {
        match &self.nodes[self.root.index as usize].body {
            Body::Compound(entries) => self.materialize_entries(entries),
            Body::Leaf(_) | Body::List(_) => Compound::new(),
        }
    }

    /// Returns the kind of a node.
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` if the handle was not issued by this tree.
    pub fn kind(&self, id: NodeId) -> Result<TagKind> {
        Ok(self.node(id)?.kind())
    }

    /// Returns the owner link of a node.
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` if the handle was not issued by this tree.
    pub fn owner(&self, id: NodeId) -> Result<&Owner> {
        Ok(&self.node(id)?.owner)
    }

    /// Returns the container that owns a node, if any.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).ok().and_then(|node| node.owner.parent())
    }

    /// Returns true if the node is reachable from the root.
    #[must_use]
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut current = id;
        loop {
            if current == self.root {
                return true;
            }
            match self.parent(current) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    /// Returns the children of a container in order.
    ///
    /// Leaves have no children.
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` if the handle was not issued by this tree.
    pub fn children(&self, id: NodeId) -> Result<Vec<NodeId>> {
        Ok(match &self.node(id)?.body {
            Body::Leaf(_) => Vec::new(),
            Body::List(children) => children.clone(),
            Body::Compound(entries) => entries.values().copied().collect(),
        })
    }

    /// Returns the number of children of a container, or elements of an array.
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` if the handle was not issued by this tree.
    pub fn len(&self, id: NodeId) -> Result<usize> {
        Ok(match &self.node(id)?.body {
            Body::Leaf(Tag::ByteArray(bytes)) => bytes.len(),
            Body::Leaf(Tag::IntArray(ints)) => ints.len(),
            Body::Leaf(_) => 0,
            Body::List(children) => children.len(),
            Body::Compound(entries) => entries.len(),
        })
    }

    /// Looks up a compound entry by key.
    #[must_use]
    pub fn child(&self, id: NodeId, key: &str) -> Option<NodeId> {
        match &self.node(id).ok()?.body {
            Body::Compound(entries) => entries.get(key).copied(),
            Body::Leaf(_) | Body::List(_) => None,
        }
    }

    /// Looks up a list element by position.
    #[must_use]
    pub fn element(&self, id: NodeId, index: usize) -> Option<NodeId> {
        match &self.node(id).ok()?.body {
            Body::List(children) => children.get(index).copied(),
            Body::Leaf(_) | Body::Compound(_) => None,
        }
    }

    /// Returns the label of a node within its owner.
    ///
    /// Compound entries are named by key, list elements by their current
    /// position as `[i]`, and roots by the empty string.
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` if the handle was not issued by this tree.
    pub fn name(&self, id: NodeId) -> Result<String> {
        Ok(match &self.node(id)?.owner {
            Owner::None => String::new(),
            Owner::Compound { key, .. } => key.clone(),
            Owner::List { parent } => match &self.nodes[parent.index as usize].body {
                Body::List(children) => match children.iter().position(|child| *child == id) {
                    Some(index) => format!("[{index}]"),
                    None => "[?]".to_string(),
                },
                Body::Leaf(_) | Body::Compound(_) => "[?]".to_string(),
            },
        })
    }

    /// Returns the `/`-separated path from the root to a node.
    ///
    /// A detached node's path starts at its detached root.
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` if the handle was not issued by this tree.
    pub fn path(&self, id: NodeId) -> Result<String> {
        let mut segments = Vec::new();
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            let name = self.name(current)?;
            segments.push(
                name.strip_prefix('[')
                    .and_then(|s| s.strip_suffix(']'))
                    .map_or(name.clone(), str::to_string),
            );
            current = parent;
        }
        segments.reverse();
        Ok(segments.join("/"))
    }

    /// Resolves a `/`-separated path from the root.
    ///
    /// Compound segments are keys; list segments are indices, written
    /// either `3` or `[3]`. Empty segments are ignored.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<NodeId> {
        self.resolve_from(self.root, path)
    }

    /// Resolves a `/`-separated path from any node.
    #[must_use]
    pub fn resolve_from(&self, start: NodeId, path: &str) -> Option<NodeId> {
        self.node(start).ok()?;
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .try_fold(start, |current, segment| self.step(current, segment))
    }

    fn step(&self, id: NodeId, segment: &str) -> Option<NodeId> {
        match &self.nodes[id.index as usize].body {
            Body::Compound(entries) => entries.get(segment).copied(),
            Body::List(children) => {
                let index = segment
                    .strip_prefix('[')
                    .and_then(|s| s.strip_suffix(']'))
                    .unwrap_or(segment);
                children.get(index.parse::<usize>().ok()?).copied()
            }
            Body::Leaf(_) => None,
        }
    }

    /// Replaces the value of a scalar leaf in place.
    ///
    /// The new value is visible to the next [`get`](Self::get) or display
    /// call. On failure the tree is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns `TypeMismatch` if the node is not a scalar kind or `value`
    /// has a different kind, and `NodeNotFound` for a foreign handle.
    pub fn set_scalar(&mut self, id: NodeId, value: Tag) -> Result<()> {
        let node = self.node_mut(id)?;
        let expected = node.kind();
        if !expected.is_scalar() || value.kind() != expected {
            return Err(Error::type_mismatch(expected, value.kind()));
        }
        node.body = Body::Leaf(value);
        Ok(())
    }

    /// Removes a node from its owning container.
    ///
    /// List owners drop the first element with this exact handle, so
    /// duplicate-valued siblings are left alone. Compound owners drop the
    /// entry by key, if it still refers to this node.
    ///
    /// Returns `false` without changing anything if the node is a root,
    /// already detached, or not from this tree.
    pub fn delete(&mut self, id: NodeId) -> bool {
        let Ok(node) = self.node(id) else {
            return false;
        };
        let removed = match node.owner.clone() {
            Owner::None => false,
            Owner::List { parent } => match &mut self.nodes[parent.index as usize].body {
                Body::List(children) => match children.iter().position(|child| *child == id) {
                    Some(position) => {
                        children.remove(position);
                        true
                    }
                    None => false,
                },
                Body::Leaf(_) | Body::Compound(_) => false,
            },
            Owner::Compound { parent, key } => match &mut self.nodes[parent.index as usize].body
            {
                Body::Compound(entries) if entries.get(&key) == Some(&id) => {
                    entries.shift_remove(&key);
                    true
                }
                Body::Leaf(_) | Body::List(_) | Body::Compound(_) => false,
            },
        };
        if removed {
            self.nodes[id.index as usize].owner = Owner::None;
        }
        removed
    }

    /// Formats a node's value the way an editor row shows it.
    ///
    /// See [`Tag::display_value`].
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` if the handle was not issued by this tree.
    pub fn display_value(&self, id: NodeId) -> Result<String> {
        Ok(match &self.node(id)?.body {
            Body::Leaf(tag) => tag.display_value(),
            Body::List(children) => format!("{} entries", children.len()),
            Body::Compound(entries) => format!("{} entries", entries.len()),
        })
    }

    /// Formats a full editor row for a node.
    ///
    /// Scalars render as `(Kind) name: value`; containers and arrays as
    /// `name (count)`.
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` if the handle was not issued by this tree.
    pub fn display_text(&self, id: NodeId) -> Result<String> {
        let kind = self.kind(id)?;
        let name = self.name(id)?;
        if kind.is_scalar() {
            Ok(format!("({kind}) {name}: {}", self.display_value(id)?))
        } else {
            Ok(format!("{name} ({})", self.len(id)?))
        }
    }
}
