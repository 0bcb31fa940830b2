//! The main REPL implementation.

use std::io::{self, Write};

use slimedit_foundation::{Error, Result};

use crate::command::Command;
use crate::editor::{LineEditor, ReadResult, RustylineEditor};
use crate::session::{Outcome, Session};

/// The interactive REPL.
pub struct Repl<E: LineEditor = RustylineEditor> {
    /// The line editor for input.
    editor: E,

    /// The world being edited.
    session: Session,

    /// Whether to show the welcome banner.
    show_banner: bool,

    /// Primary prompt.
    prompt: String,

    /// Commands that failed so far.
    failures: usize,
}

impl Repl<RustylineEditor> {
    /// Creates a new REPL with the default rustyline editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize.
    pub fn new(session: Session) -> Result<Self> {
        let editor = RustylineEditor::new()?;
        Ok(Self::with_editor(editor, session))
    }
}

impl<E: LineEditor> Repl<E> {
    /// Creates a new REPL with the given editor.
    pub fn with_editor(editor: E, session: Session) -> Self {
        Self {
            editor,
            session,
            show_banner: true,
            prompt: "slime> ".to_string(),
            failures: 0,
        }
    }

    /// Disables the welcome banner.
    #[must_use]
    pub fn without_banner(mut self) -> Self {
        self.show_banner = false;
        self
    }

    /// Sets the primary prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Returns a reference to the session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Returns the number of commands that have failed.
    #[must_use]
    pub const fn failures(&self) -> usize {
        self.failures
    }

    /// Runs the REPL loop until `quit` or end of input.
    ///
    /// A failing command prints its error and the loop continues.
    ///
    /// # Errors
    ///
    /// Returns an error only if reading input fails.
    pub fn run(&mut self) -> Result<()> {
        if self.show_banner {
            self.print_banner();
        }

        while self.read_eval_print()? {}
        Ok(())
    }

    /// Executes one read-eval-print iteration.
    ///
    /// Returns `Ok(true)` to continue, `Ok(false)` to exit.
    fn read_eval_print(&mut self) -> Result<bool> {
        let line = match self.editor.read_line(&self.prompt)? {
            ReadResult::Line(line) => line,
            ReadResult::Interrupted => return Ok(true),
            ReadResult::Eof => return Ok(false),
        };
        if line.trim().is_empty() {
            return Ok(true);
        }
        self.editor.add_history(&line);

        match self.eval(&line) {
            Ok(Outcome::Continue(lines)) => {
                for line in lines {
                    println!("{line}");
                }
                Ok(true)
            }
            Ok(Outcome::Quit) => Ok(false),
            Err(e) => {
                self.failures += 1;
                print_error(&e);
                Ok(true)
            }
        }
    }

    /// Parses and executes one line.
    ///
    /// # Errors
    ///
    /// Returns any parse or execution error.
    pub fn eval(&mut self, line: &str) -> Result<Outcome> {
        match Command::parse(line)? {
            Some(command) => self.session.execute(&command),
            None => Ok(Outcome::Continue(Vec::new())),
        }
    }

    /// Prints the welcome banner.
    fn print_banner(&self) {
        let world = self.session.world();
        println!("\x1b[1;36mslimedit\x1b[0m v{}", env!("CARGO_PKG_VERSION"));
        println!("Editing {} ({})", world.name(), world.path().display());
        println!("Type 'help' for commands. Use Ctrl+D to exit.\n");

        let _ = io::stdout().flush();
    }
}

/// Prints an error to stderr.
pub fn print_error(error: &Error) {
    eprintln!("\x1b[31mError: {error}\x1b[0m");
}
