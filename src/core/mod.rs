//! Core emulator components.
//!
//! - **fs**: read-only virtual filesystem
//! - **path**: path resolution against a working directory
//! - **commands**: builtin command table and dispatcher
//! - **session**: working directory, scrollback and history recall
//! - **ansi**: color marker decoding for rendered output
//!
//! # Architecture
//!
//! ```text
//! Session
//! ├── cwd / scrollback / draft / recall cursor
//! └── commands::execute
//!     ├── path::resolve
//!     └── VirtualFs (process-wide, immutable)
//! ```

pub mod ansi;
pub mod commands;
pub mod fs;
pub mod path;
pub mod session;
