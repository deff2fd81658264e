//! Host-facing terminal widget
//!
//! Wraps an optional [`Session`]: opening creates a fresh one, closing drops it.
//! The host feeds keys in and paints [`RenderLine`]s out.

use tracing::info;

use crate::core::ansi::{self, ColorTag, Span};
use crate::core::commands::{CommandResult, USERNAME};
use crate::core::session::Session;

/// Host name shown in the prompt
pub const HOSTNAME: &str = "devcli";

/// Emulator-level key actions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TerminalKey {
    Char(char),
    Backspace,
    Enter,
    Up,
    Down,
    Tab,
    ClearScreen,
    Close,
}

/// One painted row
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderLine {
    pub spans: Vec<Span>,
}

impl RenderLine {
    pub fn new(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    /// Concatenated text of all spans
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// The embedded terminal
#[derive(Default)]
pub struct Terminal {
    session: Option<Session>,
}

impl Terminal {
    pub fn new() -> Self {
        Self { session: None }
    }

    /// Open with a fresh session. Reopening an open terminal keeps its session.
    pub fn open(&mut self) {
        if self.session.is_none() {
            info!("terminal opened");
            self.session = Some(Session::new());
        }
    }

    pub fn close(&mut self) {
        if self.session.take().is_some() {
            info!("terminal closed");
        }
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Run the current draft
    pub fn submit(&mut self) -> Option<CommandResult> {
        self.session.as_mut()?.submit()
    }

    /// Feed one key. Ignored while closed.
    pub fn handle_key(&mut self, key: TerminalKey) {
        if key == TerminalKey::Close {
            self.close();
            return;
        }
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match key {
            TerminalKey::Char(ch) => session.insert_char(ch),
            TerminalKey::Backspace => session.backspace(),
            TerminalKey::Enter => {
                session.submit();
            }
            TerminalKey::Up => session.recall_older(),
            TerminalKey::Down => session.recall_newer(),
            TerminalKey::Tab => session.complete(),
            TerminalKey::ClearScreen => session.clear_screen(),
            TerminalKey::Close => {}
        }
    }

    /// Scrollback followed by the live prompt. Empty while closed.
    pub fn renderable_lines(&self) -> Vec<RenderLine> {
        let Some(session) = self.session.as_ref() else {
            return Vec::new();
        };

        let mut lines = Vec::new();
        for entry in session.scrollback() {
            lines.push(prompt_line(&entry.cwd_at_execution, &entry.input_line));
            for output in &entry.output_lines {
                let mut spans = ansi::decode(output);
                if entry.is_error {
                    for span in &mut spans {
                        span.color.get_or_insert(ColorTag::Red);
                    }
                }
                lines.push(RenderLine::new(spans));
            }
        }
        lines.push(prompt_line(session.cwd(), session.draft()));
        lines
    }

    /// Greeting shown while the scrollback is empty
    pub fn welcome_banner() -> Vec<RenderLine> {
        [
            format!("DevCLI Interactive Terminal v{}", env!("CARGO_PKG_VERSION")),
            "Type 'help' for available commands or explore the filesystem.".to_string(),
            "Tip: Tab completes commands, Up/Down recall history, Ctrl+L clears.".to_string(),
        ]
        .into_iter()
        .map(|text| RenderLine::new(vec![Span::new(text, Some(ColorTag::Dim))]))
        .collect()
    }
}

fn prompt_line(cwd: &str, input: &str) -> RenderLine {
    let mut spans = vec![
        Span::new(format!("{}@{}", USERNAME, HOSTNAME), Some(ColorTag::Green)),
        Span::plain(":"),
        Span::new(cwd, Some(ColorTag::Blue)),
        Span::plain("$ "),
    ];
    if !input.is_empty() {
        spans.push(Span::plain(input));
    }
    RenderLine::new(spans)
}
