//! Session management
//!
//! One open terminal: working directory, scrollback, draft input and the
//! history recall cursor. All transitions are synchronous.

use tracing::debug;

use super::commands::{self, CommandResult, Output, HOME};
use super::fs::VirtualFs;

/// A command that ran, as shown in the scrollback
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrollbackEntry {
    pub input_line: String,
    pub output_lines: Vec<String>,
    pub is_error: bool,
    pub cwd_at_execution: String,
}

/// History recall state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RecallState {
    #[default]
    Idle,
    /// Depth from the newest entry (0 = most recent)
    Recalling(usize),
}

/// A terminal session
pub struct Session {
    cwd: String,
    scrollback: Vec<ScrollbackEntry>,
    recall: RecallState,
    draft: String,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create a session on the built-in filesystem
    pub fn new() -> Self {
        Self {
            cwd: HOME.to_string(),
            scrollback: Vec::new(),
            recall: RecallState::Idle,
            draft: String::new(),
        }
    }

    pub fn cwd(&self) -> &str {
        &self.cwd
    }

    pub fn scrollback(&self) -> &[ScrollbackEntry] {
        &self.scrollback
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn recall_state(&self) -> RecallState {
        self.recall
    }

    pub fn insert_char(&mut self, ch: char) {
        self.draft.push(ch);
    }

    pub fn backspace(&mut self) {
        self.draft.pop();
    }

    pub fn set_draft(&mut self, text: &str) {
        self.draft = text.to_string();
    }

    /// Run the draft (Enter). Returns the command result, if anything ran.
    pub fn submit(&mut self) -> Option<CommandResult> {
        let input = std::mem::take(&mut self.draft);
        self.recall = RecallState::Idle;

        let result = commands::execute(&input, &self.cwd, VirtualFs::global())?;

        match &result.output {
            Output::Clear => self.scrollback.clear(),
            Output::Lines(lines) => self.scrollback.push(ScrollbackEntry {
                input_line: input,
                output_lines: lines.clone(),
                is_error: result.is_error,
                cwd_at_execution: self.cwd.clone(),
            }),
        }

        if let Some(new_cwd) = &result.new_cwd {
            debug!("cwd {} -> {}", self.cwd, new_cwd);
            self.cwd = new_cwd.clone();
        }

        Some(result)
    }

    /// Inputs that can be recalled, oldest first. Failed commands are skipped.
    fn recall_inputs(&self) -> Vec<&str> {
        self.scrollback
            .iter()
            .filter(|entry| !entry.is_error)
            .map(|entry| entry.input_line.as_str())
            .collect()
    }

    /// Step to an older input (Up). Stops at the oldest entry.
    pub fn recall_older(&mut self) {
        let len = self.recall_inputs().len();
        if len == 0 {
            return;
        }
        let depth = match self.recall {
            RecallState::Idle => 0,
            RecallState::Recalling(depth) => (depth + 1).min(len - 1),
        };
        self.recall_at(depth);
    }

    /// Step to a newer input (Down). Past the newest, the draft is cleared.
    pub fn recall_newer(&mut self) {
        match self.recall {
            RecallState::Idle => {}
            RecallState::Recalling(0) => {
                self.recall = RecallState::Idle;
                self.draft.clear();
            }
            RecallState::Recalling(depth) => self.recall_at(depth - 1),
        }
    }

    fn recall_at(&mut self, depth: usize) {
        let inputs = self.recall_inputs();
        let recalled = inputs
            .len()
            .checked_sub(depth + 1)
            .and_then(|idx| inputs.get(idx))
            .map(|input| input.to_string());
        match recalled {
            Some(input) => {
                self.draft = input;
                self.recall = RecallState::Recalling(depth);
            }
            None => self.recall = RecallState::Idle,
        }
    }

    /// Complete the draft to the first matching command name (Tab)
    pub fn complete(&mut self) {
        if let Some(name) = commands::complete(self.draft.trim()) {
            self.draft = format!("{} ", name);
        }
    }

    /// Empty the scrollback without running anything (Ctrl+L)
    pub fn clear_screen(&mut self) {
        self.scrollback.clear();
        self.recall = RecallState::Idle;
    }
}
