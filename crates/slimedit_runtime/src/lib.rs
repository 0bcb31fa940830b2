//! REPL and CLI for Slimedit.
//!
//! This crate provides:
//! - [`Repl`] - Interactive read-eval-print loop over a world
//! - [`Session`] - Command execution against a loaded [`World`](slimedit_world::World)
//! - [`Command`] - The editor command language

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod command;
pub mod editor;
pub mod repl;
pub mod session;

pub use command::{Command, NodePath, Section};
pub use editor::{LineEditor, ReadResult, ReaderEditor, RustylineEditor};
pub use repl::{Repl, print_error};
pub use session::{Outcome, Session};
