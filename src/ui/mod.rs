//! User interface rendering and input handling.
//!
//! - **renderer**: paints render lines with crossterm
//! - **keymapper**: keyboard events to emulator key actions

pub mod keymapper;
pub mod renderer;

pub use keymapper::*;
pub use renderer::*;
