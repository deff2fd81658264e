//! Terminal renderer using crossterm
//!
//! Paints the emulator's render lines onto the real console.

use std::io::{self, Write};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::{Attribute, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{
        self, Clear, ClearType, DisableLineWrap, EnableLineWrap, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use unicode_width::UnicodeWidthStr;

use crate::config::ColorScheme;
use crate::terminal::RenderLine;

/// Terminal renderer
pub struct Renderer {
    scheme: ColorScheme,
    /// Whether the terminal has been initialized
    initialized: bool,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self::with_color_scheme(ColorScheme::default())
    }

    pub fn with_color_scheme(scheme: ColorScheme) -> Self {
        Self {
            scheme,
            initialized: false,
        }
    }

    /// Get terminal size
    pub fn size() -> io::Result<(u16, u16)> {
        terminal::size()
    }

    /// Initialize the terminal for rendering
    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            DisableLineWrap,
            Clear(ClearType::All),
            MoveTo(0, 0)
        )?;
        self.initialized = true;
        Ok(())
    }

    /// Cleanup the terminal
    pub fn cleanup(&mut self) -> io::Result<()> {
        if !self.initialized {
            return Ok(());
        }
        self.initialized = false;

        let mut stdout = io::stdout();
        let _ = execute!(stdout, ResetColor, SetAttribute(Attribute::Reset));
        let _ = execute!(stdout, Show, EnableLineWrap, LeaveAlternateScreen);
        let _ = stdout.flush();

        terminal::disable_raw_mode()
    }

    /// Render the tail of `lines` that fits the window. The last line is the
    /// live prompt and gets the cursor.
    pub fn render(&mut self, lines: &[RenderLine]) -> io::Result<()> {
        let (cols, rows) = Self::size()?;
        let stdout = io::stdout();
        let mut stdout = io::BufWriter::new(stdout.lock());
        self.render_to(&mut stdout, lines, cols, rows)?;
        stdout.flush()
    }

    fn render_to<W: Write>(
        &self,
        out: &mut W,
        lines: &[RenderLine],
        cols: u16,
        rows: u16,
    ) -> io::Result<()> {
        let visible = visible_tail(lines, rows as usize);

        queue!(out, Hide, Clear(ClearType::All))?;
        for (row, line) in visible.iter().enumerate() {
            queue!(out, MoveTo(0, row as u16))?;
            for span in &line.spans {
                let color = self.scheme.color_for(span.color).to_crossterm();
                queue!(out, SetForegroundColor(color), Print(&span.text))?;
            }
        }
        queue!(out, ResetColor)?;

        if let Some(prompt) = visible.last() {
            let col = cursor_column(prompt, cols);
            let row = (visible.len() - 1) as u16;
            queue!(out, MoveTo(col, row), Show)?;
        }
        Ok(())
    }
}

fn visible_tail(lines: &[RenderLine], rows: usize) -> &[RenderLine] {
    let start = lines.len().saturating_sub(rows.max(1));
    &lines[start..]
}

/// Display column just past the line's text, clamped to the window
fn cursor_column(line: &RenderLine, cols: u16) -> u16 {
    let width = UnicodeWidthStr::width(line.text().as_str());
    width.min(cols.saturating_sub(1) as usize) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ansi::Span;

    fn line(text: &str) -> RenderLine {
        RenderLine::new(vec![Span::plain(text)])
    }

    #[test]
    fn test_visible_tail() {
        let lines: Vec<RenderLine> = (0..5).map(|i| line(&i.to_string())).collect();
        let tail = visible_tail(&lines, 3);
        assert_eq!(tail.len(), 3);
        assert_eq!(tail[0].text(), "2");
        assert_eq!(visible_tail(&lines, 10).len(), 5);
        assert_eq!(visible_tail(&lines, 0).len(), 1);
    }

    #[test]
    fn test_cursor_column_uses_display_width() {
        assert_eq!(cursor_column(&line("$ ls"), 80), 4);
        assert_eq!(cursor_column(&line("$ 日本"), 80), 6);
        assert_eq!(cursor_column(&line("a long prompt"), 5), 4);
    }

    #[test]
    fn test_render_writes_span_text() {
        let renderer = Renderer::new();
        let mut out = Vec::new();
        renderer
            .render_to(&mut out, &[line("hello"), line("$ ")], 80, 24)
            .unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("hello"));
        assert!(text.contains("$ "));
    }

    #[test]
    fn test_render_places_cursor_after_prompt_text() {
        let renderer = Renderer::new();
        let mut out = Vec::new();
        renderer
            .render_to(&mut out, &[line("hello"), line("$ 日本")], 80, 24)
            .unwrap();
        let text = String::from_utf8_lossy(&out);
        // Row 2, column 7 (1-based): after "$ " plus two wide chars
        assert!(text.ends_with("\x1b[2;7H\x1b[?25h"));
    }
}
