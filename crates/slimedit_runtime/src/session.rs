//! Session state for the REPL.
//!
//! The session owns the open [`World`] and executes parsed commands
//! against it, returning the lines to print.

use log::debug;
use slimedit_foundation::{Error, ErrorKind, NodeId, Result, TagKind, TagTree, parse_scalar};
use slimedit_world::{World, WorldData};

use crate::command::{Command, HELP, NodePath, Section};

/// What the REPL should do after a command.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Print these lines and read the next command.
    Continue(Vec<String>),
    /// Leave the loop.
    Quit,
}

impl Outcome {
    fn lines(lines: impl IntoIterator<Item = String>) -> Self {
        Self::Continue(lines.into_iter().collect())
    }

    fn line(line: impl Into<String>) -> Self {
        Self::Continue(vec![line.into()])
    }
}

/// An editing session over one world.
pub struct Session {
    world: World,
}

impl Session {
    /// Creates a session. The world is loaded on first use if it is not
    /// already.
    #[must_use]
    pub const fn new(world: World) -> Self {
        Self { world }
    }

    /// Returns the world.
    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// Returns the world for editing.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Executes one command.
    ///
    /// # Errors
    ///
    /// Returns any load, lookup, parse, or save error. A failed command
    /// leaves the loaded data as it was.
    pub fn execute(&mut self, command: &Command) -> Result<Outcome> {
        debug!("executing {command:?}");
        match command {
            Command::Help => Ok(Outcome::lines(HELP.lines().map(str::to_string))),
            Command::Quit => Ok(Outcome::Quit),
            Command::Reload => {
                self.world.reload()?;
                Ok(Outcome::line(format!("reloaded {}", self.world.path().display())))
            }
            Command::Save => {
                self.world.load()?;
                let path = self.world.save()?;
                Ok(Outcome::line(format!("saved to {}", path.display())))
            }
            Command::Info => {
                let data = self.data()?;
                Ok(Outcome::lines(data.to_string().lines().map(str::to_string)))
            }
            Command::List(None) => self.list_sections(),
            Command::List(Some(path)) => self.list(path),
            Command::Get(path) => self.get(path),
            Command::Set(path, value) => self.set(path, value),
            Command::Remove(paths) => self.remove(paths),
        }
    }

    fn data(&mut self) -> Result<&WorldData> {
        self.world.load()?;
        self.world.data()
    }

    fn list_sections(&mut self) -> Result<Outcome> {
        let data = self.data()?;
        let mut lines = vec![format!("tiles ({})", data.tile_entity_count())];
        if data.has_entities {
            lines.push(format!("entities ({})", data.entity_count()));
        } else {
            lines.push("entities (absent)".to_string());
        }
        lines.push(format!("extra ({})", data.extra.len(data.extra.root())?));
        Ok(Outcome::Continue(lines))
    }

    fn list(&mut self, path: &NodePath) -> Result<Outcome> {
        let data = self.data()?;
        let (tree, id) = resolve(data, path)?;
        if !tree.kind(id)?.is_container() {
            return Ok(Outcome::line(tree.display_text(id)?));
        }
        let lines = tree
            .children(id)?
            .into_iter()
            .map(|child| tree.display_text(child))
            .collect::<Result<Vec<_>>>()?;
        Ok(Outcome::Continue(lines))
    }

    fn get(&mut self, path: &NodePath) -> Result<Outcome> {
        let data = self.data()?;
        let (tree, id) = resolve(data, path)?;
        let kind = tree.kind(id)?;
        let mut lines = vec![tree.display_text(id)?];
        if !kind.is_scalar() {
            lines.push(tree.get(id)?.to_string());
        }
        Ok(Outcome::Continue(lines))
    }

    fn set(&mut self, path: &NodePath, text: &str) -> Result<Outcome> {
        self.world.load()?;
        let data = self.world.data_mut()?;
        let (tree, id) = resolve_mut(data, path)?;
        let kind = tree.kind(id)?;
        if !kind.is_scalar() {
            return Err(Error::new(ErrorKind::InvalidCommand(format!(
                "{path} is a {kind}; only numbers and strings can be set"
            ))));
        }
        // Strings are taken verbatim; numbers tolerate surrounding spaces.
        let text = if kind == TagKind::String { text } else { text.trim() };
        let value = parse_scalar(kind, text).ok_or_else(|| {
            Error::new(ErrorKind::InvalidValue {
                kind,
                text: text.to_string(),
            })
        })?;
        tree.set_scalar(id, value)?;
        Ok(Outcome::line(tree.display_text(id)?))
    }

    fn remove(&mut self, paths: &[NodePath]) -> Result<Outcome> {
        self.world.load()?;
        let data = self.world.data_mut()?;

        // Resolve everything before the first delete shifts list indices.
        let mut targets = Vec::with_capacity(paths.len());
        for path in paths {
            if path.is_section() {
                return Err(Error::new(ErrorKind::InvalidCommand(format!(
                    "cannot remove the whole {} section",
                    path.section.name()
                ))));
            }
            let (_, id) = resolve(data, path)?;
            targets.push((path.section, id));
        }

        let mut removed = 0;
        for (section, id) in targets {
            if section_tree_mut(data, section).delete(id) {
                removed += 1;
            }
        }
        Ok(Outcome::line(format!(
            "removed {removed} node{}",
            if removed == 1 { "" } else { "s" }
        )))
    }
}

fn section_tree(data: &WorldData, section: Section) -> &TagTree {
    match section {
        Section::Tiles => &data.tile_entities,
        Section::Entities => &data.entities,
        Section::Extra => &data.extra,
    }
}

fn section_tree_mut(data: &mut WorldData, section: Section) -> &mut TagTree {
    match section {
        Section::Tiles => &mut data.tile_entities,
        Section::Entities => &mut data.entities,
        Section::Extra => &mut data.extra,
    }
}

/// Returns the node paths in a section start from.
fn section_base(data: &WorldData, section: Section) -> Result<NodeId> {
    let base = match section {
        Section::Tiles => data.tile_entity_list(),
        Section::Entities => data.entity_list(),
        Section::Extra => Some(data.extra.root()),
    };
    base.ok_or_else(|| Error::path_not_found(section.name()))
}

fn resolve<'a>(data: &'a WorldData, path: &NodePath) -> Result<(&'a TagTree, NodeId)> {
    let base = section_base(data, path.section)?;
    let tree = section_tree(data, path.section);
    let id = tree
        .resolve_from(base, &path.path)
        .ok_or_else(|| Error::path_not_found(path.to_string()))?;
    Ok((tree, id))
}

fn resolve_mut<'a>(data: &'a mut WorldData, path: &NodePath) -> Result<(&'a mut TagTree, NodeId)> {
    let (_, id) = resolve(data, path)?;
    Ok((section_tree_mut(data, path.section), id))
}
