//! Core tag value type for all structured world data.

use std::fmt;

use indexmap::IndexMap;

use crate::kind::TagKind;

/// A typed unit of structured data.
///
/// Tags are plain owned values. Lists and compounds own their children
/// outright; for in-place editing with parent links see [`crate::TagTree`].
#[derive(Clone, Debug, PartialEq)]
pub enum Tag {
    /// 8-bit signed integer.
    Byte(i8),
    /// 16-bit signed integer.
    Short(i16),
    /// 32-bit signed integer.
    Int(i32),
    /// 64-bit signed integer.
    Long(i64),
    /// 32-bit float.
    Float(f32),
    /// 64-bit float.
    Double(f64),
    /// Raw bytes.
    ByteArray(Vec<u8>),
    /// Array of 32-bit signed integers.
    IntArray(Vec<i32>),
    /// UTF-8 string.
    String(String),
    /// Ordered list; every element has the same kind.
    List(Vec<Tag>),
    /// Ordered mapping of unique names to tags.
    Compound(Compound),
}

impl Tag {
    /// Returns the kind of this tag.
    #[must_use]
    pub const fn kind(&self) -> TagKind {
        match self {
            Self::Byte(_) => TagKind::Byte,
            Self::Short(_) => TagKind::Short,
            Self::Int(_) => TagKind::Int,
            Self::Long(_) => TagKind::Long,
            Self::Float(_) => TagKind::Float,
            Self::Double(_) => TagKind::Double,
            Self::ByteArray(_) => TagKind::ByteArray,
            Self::IntArray(_) => TagKind::IntArray,
            Self::String(_) => TagKind::String,
            Self::List(_) => TagKind::List,
            Self::Compound(_) => TagKind::Compound,
        }
    }

    /// Returns true if this tag can be replaced in place by a single value.
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        self.kind().is_scalar()
    }

    /// Formats the value the way an editor row shows it.
    ///
    /// Byte and Short render their unsigned two's-complement form, so a
    /// `Byte(-1)` shows as `255`. Every other number renders signed.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub fn display_value(&self) -> String {
        match self {
            Self::Byte(n) => (*n as u8).to_string(),
            Self::Short(n) => (*n as u16).to_string(),
            Self::Int(n) => n.to_string(),
            Self::Long(n) => n.to_string(),
            Self::Float(n) => n.to_string(),
            Self::Double(n) => n.to_string(),
            Self::ByteArray(bytes) => format!("{} bytes", bytes.len()),
            Self::IntArray(ints) => format!("{} ints", ints.len()),
            Self::String(s) => s.clone(),
            Self::List(items) => format!("{} entries", items.len()),
            Self::Compound(compound) => format!("{} entries", compound.len()),
        }
    }

    /// Attempts to extract a compound reference.
    #[must_use]
    pub const fn as_compound(&self) -> Option<&Compound> {
        match self {
            Self::Compound(c) => Some(c),
            _ => None,
        }
    }

    /// Attempts to extract a list reference.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Tag]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Attempts to extract a string reference.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to extract any integer kind, widened to `i64`.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Byte(n) => Some(i64::from(*n)),
            Self::Short(n) => Some(i64::from(*n)),
            Self::Int(n) => Some(i64::from(*n)),
            Self::Long(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to extract either float kind, widened to `f64`.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(n) => Some(f64::from(*n)),
            Self::Double(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the kind shared by every list element, if the list is homogeneous.
    ///
    /// An empty list is homogeneous with no element kind.
    #[must_use]
    pub fn list_element_kind(items: &[Tag]) -> Result<Option<TagKind>, (TagKind, TagKind)> {
        let Some(first) = items.first() else {
            return Ok(None);
        };
        let kind = first.kind();
        match items.iter().find(|item| item.kind() != kind) {
            Some(other) => Err((kind, other.kind())),
            None => Ok(Some(kind)),
        }
    }
}

/// Converts user-supplied text into a tag of the given scalar kind.
///
/// Integer kinds parse their signed form. Byte and Short also accept the
/// unsigned form produced by [`Tag::display_value`]. Strings are taken
/// verbatim. Returns `None` if the text does not parse or `kind` is not a
/// scalar kind; never panics.
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub fn parse_scalar(kind: TagKind, text: &str) -> Option<Tag> {
    match kind {
        TagKind::Byte => text
            .parse::<i8>()
            .ok()
            .or_else(|| text.parse::<u8>().ok().map(|n| n as i8))
            .map(Tag::Byte),
        TagKind::Short => text
            .parse::<i16>()
            .ok()
            .or_else(|| text.parse::<u16>().ok().map(|n| n as i16))
            .map(Tag::Short),
        TagKind::Int => text.parse().ok().map(Tag::Int),
        TagKind::Long => text.parse().ok().map(Tag::Long),
        TagKind::Float => text.parse().ok().map(Tag::Float),
        TagKind::Double => text.parse().ok().map(Tag::Double),
        TagKind::String => Some(Tag::String(text.to_owned())),
        TagKind::ByteArray | TagKind::IntArray | TagKind::List | TagKind::Compound => None,
    }
}

/// An ordered mapping of unique names to tags.
///
/// Keeps insertion order so that a saved section lists its keys in the
/// order they were loaded.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Compound(IndexMap<String, Tag>);

impl Compound {
    /// Creates an empty compound.
    #[must_use]
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Adds an entry and returns the compound, for building literals.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Tag>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts an entry, returning the value it replaced.
    ///
    /// A replaced key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Tag>) -> Option<Tag> {
        self.0.insert(key.into(), value.into())
    }

    /// Removes an entry, preserving the order of the rest.
    pub fn remove(&mut self, key: &str) -> Option<Tag> {
        self.0.shift_remove(key)
    }

    /// Returns the tag stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Tag> {
        self.0.get(key)
    }

    /// Returns a mutable reference to the tag stored under `key`.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Tag> {
        self.0.get_mut(key)
    }

    /// Returns true if `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over entries in order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Tag)> {
        self.0.iter()
    }

    /// Iterates over keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }
}

impl FromIterator<(String, Tag)> for Compound {
    fn from_iter<I: IntoIterator<Item = (String, Tag)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Compound {
    type Item = (String, Tag);
    type IntoIter = indexmap::map::IntoIter<String, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Byte(n) => write!(f, "{n}b"),
            Self::Short(n) => write!(f, "{n}s"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Long(n) => write!(f, "{n}L"),
            Self::Float(n) => write!(f, "{n}f"),
            Self::Double(n) => write!(f, "{n}d"),
            Self::ByteArray(bytes) => {
                write!(f, "[B;")?;
                for (i, b) in bytes.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{b}b")?;
                }
                write!(f, "]")
            }
            Self::IntArray(ints) => {
                write!(f, "[I;")?;
                for (i, n) in ints.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{n}")?;
                }
                write!(f, "]")
            }
            Self::String(s) => write!(f, "{s:?}"),
            Self::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Self::Compound(compound) => write!(f, "{compound}"),
        }
    }
}

impl fmt::Display for Compound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            let bare = !key.is_empty()
                && key
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '+'));
            if bare {
                write!(f, "{key}:{value}")?;
            } else {
                write!(f, "{key:?}:{value}")?;
            }
        }
        write!(f, "}}")
    }
}

// Convenience From implementations

impl From<i8> for Tag {
    fn from(n: i8) -> Self {
        Self::Byte(n)
    }
}

impl From<i16> for Tag {
    fn from(n: i16) -> Self {
        Self::Short(n)
    }
}

impl From<i32> for Tag {
    fn from(n: i32) -> Self {
        Self::Int(n)
    }
}

impl From<i64> for Tag {
    fn from(n: i64) -> Self {
        Self::Long(n)
    }
}

impl From<f32> for Tag {
    fn from(n: f32) -> Self {
        Self::Float(n)
    }
}

impl From<f64> for Tag {
    fn from(n: f64) -> Self {
        Self::Double(n)
    }
}

impl From<&str> for Tag {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for Tag {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Vec<Tag>> for Tag {
    fn from(items: Vec<Tag>) -> Self {
        Self::List(items)
    }
}

impl From<Compound> for Tag {
    fn from(compound: Compound) -> Self {
        Self::Compound(compound)
    }
}
