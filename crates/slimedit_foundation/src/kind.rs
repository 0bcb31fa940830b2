//! Tag kind descriptors.

use std::fmt;

use crate::value::{Tag, parse_scalar};

/// The kind of a [`Tag`], without its payload.
///
/// The discriminants match the NBT wire type ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TagKind {
    /// 8-bit signed integer.
    Byte,
    /// 16-bit signed integer.
    Short,
    /// 32-bit signed integer.
    Int,
    /// 64-bit signed integer.
    Long,
    /// 32-bit float.
    Float,
    /// 64-bit float.
    Double,
    /// Raw byte array.
    ByteArray,
    /// UTF-8 string.
    String,
    /// Homogeneous list of tags.
    List,
    /// Ordered mapping of names to tags.
    Compound,
    /// Array of 32-bit signed integers.
    IntArray,
}

impl TagKind {
    /// Every kind, in wire id order.
    pub const ALL: [TagKind; 11] = [
        Self::Byte,
        Self::Short,
        Self::Int,
        Self::Long,
        Self::Float,
        Self::Double,
        Self::ByteArray,
        Self::String,
        Self::List,
        Self::Compound,
        Self::IntArray,
    ];

    /// Returns the NBT wire type id for this kind.
    #[must_use]
    pub const fn id(self) -> u8 {
        match self {
            Self::Byte => 1,
            Self::Short => 2,
            Self::Int => 3,
            Self::Long => 4,
            Self::Float => 5,
            Self::Double => 6,
            Self::ByteArray => 7,
            Self::String => 8,
            Self::List => 9,
            Self::Compound => 10,
            Self::IntArray => 11,
        }
    }

    /// Looks up a kind by its NBT wire type id.
    #[must_use]
    pub const fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Self::Byte),
            2 => Some(Self::Short),
            3 => Some(Self::Int),
            4 => Some(Self::Long),
            5 => Some(Self::Float),
            6 => Some(Self::Double),
            7 => Some(Self::ByteArray),
            8 => Some(Self::String),
            9 => Some(Self::List),
            10 => Some(Self::Compound),
            11 => Some(Self::IntArray),
            _ => None,
        }
    }

    /// Friendly name used in display text.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Byte => "Byte",
            Self::Short => "Short",
            Self::Int => "Int",
            Self::Long => "Long",
            Self::Float => "Float",
            Self::Double => "Double",
            Self::ByteArray => "ByteArray",
            Self::String => "String",
            Self::List => "List",
            Self::Compound => "Compound",
            Self::IntArray => "IntArray",
        }
    }

    /// Returns true for kinds that can be edited in place with a single value.
    #[must_use]
    pub const fn is_scalar(self) -> bool {
        matches!(
            self,
            Self::Byte
                | Self::Short
                | Self::Int
                | Self::Long
                | Self::Float
                | Self::Double
                | Self::String
        )
    }

    /// Returns true for kinds that own child tags.
    #[must_use]
    pub const fn is_container(self) -> bool {
        matches!(self, Self::List | Self::Compound)
    }

    /// Parses user-supplied text into a tag of this kind.
    ///
    /// See [`parse_scalar`].
    #[must_use]
    pub fn parse(self, text: &str) -> Option<Tag> {
        parse_scalar(self, text)
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
