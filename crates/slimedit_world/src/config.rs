//! Configuration for loading and saving worlds.

use slimedit_codec::DEFAULT_LEVEL;

/// Configuration for a [`crate::World`].
///
/// Controls where edited copies are written and how strictly optional
/// sections are decoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorldConfig {
    /// Appended to the source file stem to name the edited copy.
    pub edited_suffix: String,

    /// Extension of the edited copy, without the dot.
    pub extension: String,

    /// zstd level used when re-encoding sections.
    pub compression_level: i32,

    /// Fail the load when the tile-entity or entity section cannot be
    /// decoded, instead of substituting an empty list.
    pub strict_sections: bool,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            edited_suffix: "_edited".to_string(),
            extension: "slime".to_string(),
            compression_level: DEFAULT_LEVEL,
            strict_sections: false,
        }
    }
}

impl WorldConfig {
    /// Creates a configuration that refuses to degrade damaged sections.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            strict_sections: true,
            ..Self::default()
        }
    }

    /// Builder method to set the edited-file suffix.
    #[must_use]
    pub fn with_edited_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.edited_suffix = suffix.into();
        self
    }

    /// Builder method to set the edited-file extension.
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Builder method to set the compression level.
    #[must_use]
    pub fn with_compression_level(mut self, level: i32) -> Self {
        self.compression_level = level;
        self
    }

    /// Builder method to enable/disable strict section decoding.
    #[must_use]
    pub fn with_strict_sections(mut self, strict: bool) -> Self {
        self.strict_sections = strict;
        self
    }
}
