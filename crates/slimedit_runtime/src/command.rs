//! Editor command parsing.

use std::fmt;
use std::str::FromStr;

use slimedit_foundation::{Error, ErrorKind, Result};

/// Command names, in the order `help` lists them.
pub const COMMANDS: [&str; 9] = [
    "info", "ls", "get", "set", "rm", "save", "reload", "help", "quit",
];

/// Section names accepted at the start of a node path.
pub const SECTIONS: [&str; 3] = ["tiles", "entities", "extra"];

/// A structured section of a world.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    /// Tile entities. Paths start inside the `tiles` list.
    Tiles,
    /// Entities. Paths start inside the `entities` list.
    Entities,
    /// Extra settings. Paths start at the root compound.
    Extra,
}

impl Section {
    /// Returns the name used in paths.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Tiles => "tiles",
            Self::Entities => "entities",
            Self::Extra => "extra",
        }
    }
}

impl FromStr for Section {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "tiles" => Ok(Self::Tiles),
            "entities" => Ok(Self::Entities),
            "extra" => Ok(Self::Extra),
            other => Err(Error::new(ErrorKind::InvalidCommand(format!(
                "unknown section '{other}' (expected one of: {})",
                SECTIONS.join(", ")
            )))),
        }
    }
}

/// A section plus a `/`-separated path inside it.
///
/// `tiles/0/x` names field `x` of the first tile entity; a bare `extra`
/// names the section itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodePath {
    /// The section the path starts in.
    pub section: Section,
    /// The path relative to the section, possibly empty.
    pub path: String,
}

impl NodePath {
    /// Returns true if the path names the section itself.
    #[must_use]
    pub fn is_section(&self) -> bool {
        self.path.split('/').all(str::is_empty)
    }
}

impl FromStr for NodePath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (section, path) = s.split_once('/').unwrap_or((s, ""));
        Ok(Self {
            section: section.parse()?,
            path: path.to_string(),
        })
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            f.write_str(self.section.name())
        } else {
            write!(f, "{}/{}", self.section.name(), self.path)
        }
    }
}

/// A parsed editor command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Print the world summary.
    Info,
    /// List the children of a node, or the sections when no path is given.
    List(Option<NodePath>),
    /// Print one node.
    Get(NodePath),
    /// Replace a scalar's value, parsed from text.
    Set(NodePath, String),
    /// Delete nodes from their containers.
    Remove(Vec<NodePath>),
    /// Write the edited copy.
    Save,
    /// Discard edits and read the source again.
    Reload,
    /// Print command help.
    Help,
    /// Leave the editor.
    Quit,
}

fn usage(text: &str) -> Error {
    Error::new(ErrorKind::InvalidCommand(format!("usage: {text}")))
}

impl Command {
    /// Parses one input line.
    ///
    /// Returns `Ok(None)` for a blank line. The value of `set` is the rest
    /// of the line after the path and one separator, taken verbatim, so
    /// strings may be empty or contain leading and trailing spaces.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCommand` for unknown commands, wrong argument
    /// counts, and unknown sections.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim_end_matches(['\n', '\r']).trim_start();
        if line.trim_end().is_empty() {
            return Ok(None);
        }
        let (name, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(name, rest)| (name, rest.trim_start()));
        let args: Vec<&str> = rest.split_whitespace().collect();

        let command = match name {
            "info" => Self::Info,
            "ls" => match args.as_slice() {
                [] => Self::List(None),
                [path] => Self::List(Some(path.parse()?)),
                _ => return Err(usage("ls [SECTION[/PATH]]")),
            },
            "get" => match args.as_slice() {
                [path] => Self::Get(path.parse()?),
                _ => return Err(usage("get SECTION/PATH")),
            },
            "set" => {
                let (path, value) = rest
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| usage("set SECTION/PATH VALUE"))?;
                Self::Set(path.parse()?, value.to_string())
            }
            "rm" => {
                if args.is_empty() {
                    return Err(usage("rm SECTION/PATH..."));
                }
                Self::Remove(
                    args.iter()
                        .map(|path| path.parse())
                        .collect::<Result<Vec<_>>>()?,
                )
            }
            "save" => Self::Save,
            "reload" => Self::Reload,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => {
                return Err(Error::new(ErrorKind::InvalidCommand(format!(
                    "unknown command '{other}' (try 'help')"
                ))));
            }
        };
        Ok(Some(command))
    }
}

/// One line per command, for `help`.
pub const HELP: &str = "\
info                     show the world summary
ls [SECTION[/PATH]]      list the children of a node
get SECTION/PATH         show one node
set SECTION/PATH VALUE   change a number or string
rm SECTION/PATH...       delete nodes
save                     write the edited copy
reload                   discard edits and read the file again
help                     show this text
quit                     leave

sections: tiles, entities, extra   e.g. tiles/0/x, extra/spawn";
