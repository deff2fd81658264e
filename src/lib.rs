//! devcli-term - an in-memory shell that simulates the devcli developer tool
//!
//! The emulator parses typed input, resolves paths against a read-only
//! virtual filesystem, runs a fixed set of builtins and produces output
//! with color markers. Nothing touches the host filesystem or spawns
//! processes.
//!
//! # Builtins
//!
//! | Command | Action |
//! |---------|--------|
//! | help | List commands |
//! | clear | Clear the scrollback |
//! | ls, cd, pwd, cat | Browse the virtual filesystem |
//! | echo, whoami, date | Small utilities |
//! | devcli | The simulated tool (`--help`, `--version`) |
//!
//! # Embedding
//!
//! ```
//! use devcli_term::{Terminal, TerminalKey};
//!
//! let mut term = Terminal::new();
//! term.open();
//! for ch in "pwd".chars() {
//!     term.handle_key(TerminalKey::Char(ch));
//! }
//! term.handle_key(TerminalKey::Enter);
//! assert_eq!(term.renderable_lines()[1].text(), "/home/user");
//! ```

pub mod config;
pub mod core;
pub mod terminal;
pub mod ui;

pub use crate::core::ansi::{decode, ColorTag, Span};
pub use crate::core::commands::{execute, CommandError, CommandResult, Output};
pub use crate::core::fs::{FsEntry, VirtualFs};
pub use crate::core::path::resolve;
pub use crate::core::session::{RecallState, ScrollbackEntry, Session};
pub use crate::terminal::{RenderLine, Terminal, TerminalKey};
