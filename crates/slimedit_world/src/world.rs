//! The world container: a source file plus its loaded record.

use std::path::{Path, PathBuf};

use log::debug;
use slimedit_foundation::{Error, ErrorKind, Result};

use crate::config::WorldConfig;
use crate::data::WorldData;
use crate::{reader, writer};

/// Load state of a [`World`].
#[derive(Clone, Debug, Default)]
pub enum LoadState {
    /// Nothing has been read yet, or the last load failed.
    #[default]
    Unloaded,
    /// The record is in memory.
    Loaded(Box<WorldData>),
}

/// A Slime world file and, once loaded, its contents.
///
/// Loading reads the whole file into memory; nothing stays open. Saving
/// never touches the source file: it writes a sibling named by
/// [`edited_path`](Self::edited_path).
#[derive(Clone, Debug)]
pub struct World {
    path: PathBuf,
    config: WorldConfig,
    state: LoadState,
}

impl World {
    /// Creates an unloaded container for a file with the default config.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::with_config(path, WorldConfig::default())
    }

    /// Creates an unloaded container for a file.
    #[must_use]
    pub fn with_config(path: impl Into<PathBuf>, config: WorldConfig) -> Self {
        Self {
            path: path.into(),
            config,
            state: LoadState::Unloaded,
        }
    }

    /// Returns the source file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the world name: the source file name without extension.
    #[must_use]
    pub fn name(&self) -> String {
        self.path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Returns the load state.
    #[must_use]
    pub const fn state(&self) -> &LoadState {
        &self.state
    }

    /// Returns true once a load has succeeded.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        matches!(self.state, LoadState::Loaded(_))
    }

    /// Reads the source file.
    ///
    /// Does nothing if the world is already loaded. On failure the world
    /// stays unloaded and keeps no partial data.
    ///
    /// # Errors
    ///
    /// See [`reader::read_world`].
    pub fn load(&mut self) -> Result<()> {
        if self.is_loaded() {
            debug!("world {} already loaded", self.path.display());
            return Ok(());
        }
        let data = reader::read_file(&self.path, &self.config)?;
        self.state = LoadState::Loaded(Box::new(data));
        Ok(())
    }

    /// Discards the loaded record and reads the source file again.
    ///
    /// Unsaved edits are lost. If the read fails, the previous record is
    /// kept.
    ///
    /// # Errors
    ///
    /// See [`reader::read_world`].
    pub fn reload(&mut self) -> Result<()> {
        let data = reader::read_file(&self.path, &self.config)?;
        self.state = LoadState::Loaded(Box::new(data));
        Ok(())
    }

    /// Returns the loaded record.
    ///
    /// # Errors
    ///
    /// Returns `NotLoaded` before a successful load.
    pub fn data(&self) -> Result<&WorldData> {
        match &self.state {
            LoadState::Loaded(data) => Ok(data),
            LoadState::Unloaded => Err(Error::new(ErrorKind::NotLoaded)),
        }
    }

    /// Returns the loaded record for editing.
    ///
    /// # Errors
    ///
    /// Returns `NotLoaded` before a successful load.
    pub fn data_mut(&mut self) -> Result<&mut WorldData> {
        match &mut self.state {
            LoadState::Loaded(data) => Ok(data),
            LoadState::Unloaded => Err(Error::new(ErrorKind::NotLoaded)),
        }
    }

    /// Consumes the container, returning the loaded record.
    ///
    /// # Errors
    ///
    /// Returns `NotLoaded` before a successful load.
    pub fn into_data(self) -> Result<WorldData> {
        match self.state {
            LoadState::Loaded(data) => Ok(*data),
            LoadState::Unloaded => Err(Error::new(ErrorKind::NotLoaded)),
        }
    }

    /// Returns the path [`save`](Self::save) writes to:
    /// `<dir>/<stem><suffix>.<extension>` next to the source file.
    #[must_use]
    pub fn edited_path(&self) -> PathBuf {
        let mut file_name = format!("{}{}", self.name(), self.config.edited_suffix);
        if !self.config.extension.is_empty() {
            file_name.push('.');
            file_name.push_str(&self.config.extension);
        }
        match self.path.parent() {
            Some(dir) => dir.join(file_name),
            None => PathBuf::from(file_name),
        }
    }

    /// Writes the loaded record to [`edited_path`](Self::edited_path).
    ///
    /// Returns the path written. The source file and the in-memory record
    /// are untouched whether or not the save succeeds.
    ///
    /// # Errors
    ///
    /// Returns `NotLoaded` before a successful load, `WriteError` if the
    /// destination cannot be written or is the source file, and any
    /// section encoding error.
    pub fn save(&self) -> Result<PathBuf> {
        let path = self.edited_path();
        self.save_to(&path)?;
        Ok(path)
    }

    /// Writes the loaded record to any path other than the source file.
    ///
    /// # Errors
    ///
    /// See [`save`](Self::save).
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let data = self.data()?;
        if self.is_source(path) {
            return Err(Error::new(ErrorKind::WriteError(
                "refusing to overwrite the source file".to_string(),
            ))
            .at_path(path));
        }
        writer::write_file(path, data, self.config.compression_level)
    }

    fn is_source(&self, path: &Path) -> bool {
        if path == self.path {
            return true;
        }
        match (path.canonicalize(), self.path.canonicalize()) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}
