//! SGR color marker decoder
//!
//! Splits a line of command output on `ESC [ <n> m` markers into colored spans.
//! Only the small palette the builtins emit is recognized; every other
//! code resets to the default color.

/// Marker for directory entries
pub const BLUE: &str = "\x1b[34m";
/// Marker for dotfiles
pub const DIM: &str = "\x1b[90m";
pub const RESET: &str = "\x1b[0m";

/// Palette entries a span can carry
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorTag {
    Blue,
    Dim,
    Green,
    Red,
    Yellow,
}

impl ColorTag {
    /// Map an SGR code to a palette entry (`None` = default color)
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            34 => Some(ColorTag::Blue),
            90 => Some(ColorTag::Dim),
            32 => Some(ColorTag::Green),
            31 => Some(ColorTag::Red),
            33 => Some(ColorTag::Yellow),
            _ => None,
        }
    }
}

/// A run of text drawn in one color
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub color: Option<ColorTag>,
}

impl Span {
    pub fn new(text: impl Into<String>, color: Option<ColorTag>) -> Self {
        Self {
            text: text.into(),
            color,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, None)
    }
}

/// Wrap `text` in a color marker and a reset
pub fn paint(marker: &str, text: &str) -> String {
    format!("{}{}{}", marker, text, RESET)
}

/// Decode one line into spans. Color state does not carry across calls.
pub fn decode(line: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut color = None;
    let mut text = String::new();
    let mut rest = line;

    while let Some(pos) = rest.find('\x1b') {
        text.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match parse_marker(tail) {
            Some((code, len)) => {
                flush(&mut spans, &mut text, color);
                color = ColorTag::from_code(code);
                rest = &tail[len..];
            }
            None => {
                // Not a marker: keep the ESC as literal text
                text.push('\x1b');
                rest = &tail[1..];
            }
        }
    }
    text.push_str(rest);
    flush(&mut spans, &mut text, color);
    spans
}

/// Plain text of a line with all markers removed
pub fn strip(line: &str) -> String {
    decode(line).into_iter().map(|s| s.text).collect()
}

fn flush(spans: &mut Vec<Span>, text: &mut String, color: Option<ColorTag>) {
    if !text.is_empty() {
        spans.push(Span::new(std::mem::take(text), color));
    }
}

/// Parse `ESC [ digits m` at the start of `s`, returning (code, byte length).
fn parse_marker(s: &str) -> Option<(u16, usize)> {
    let body = s.strip_prefix("\x1b[")?;
    let digits = body.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 || body.as_bytes().get(digits) != Some(&b'm') {
        return None;
    }
    // Overlong codes saturate and fall through to reset
    let code = body[..digits].parse::<u16>().unwrap_or(u16::MAX);
    Some((code, 2 + digits + 1))
}
