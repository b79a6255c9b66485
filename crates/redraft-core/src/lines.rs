//! Line segmentation with absolute offsets.
//!
//! This is the single source of truth for offset-to-line mapping: the diff
//! builder maps line indices to byte ranges through it, and the renderer
//! splits previews with it.

/// One line of a text, carrying its absolute start offset. `text` includes
/// the line terminator, except possibly for the final line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<'a> {
    start: usize,
    text: &'a str,
}

impl<'a> Line<'a> {
    pub fn start(&self) -> usize {
        self.start
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Byte offset one past the end of the line (terminator included).
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }

    /// The raw line text, terminator included.
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// The line text with its terminator stripped.
    pub fn content(&self) -> &'a str {
        self.text
            .strip_suffix("\r\n")
            .or_else(|| self.text.strip_suffix('\n'))
            .or_else(|| self.text.strip_suffix('\r'))
            .unwrap_or(self.text)
    }
}

/// Split `text` into ordered lines. A `\r\n` pair ends a line with a
/// two-byte terminator; a lone `\r` or `\n` ends a line with a one-byte
/// terminator. The final run with no trailing terminator is its own line.
/// An empty input yields exactly one zero-length line.
pub fn segment_lines(text: &str) -> Vec<Line<'_>> {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\r' => {
                let term = if bytes.get(i + 1) == Some(&b'\n') { 2 } else { 1 };
                lines.push(Line {
                    start,
                    text: &text[start..i + term],
                });
                i += term;
                start = i;
            }
            b'\n' => {
                lines.push(Line {
                    start,
                    text: &text[start..i + 1],
                });
                i += 1;
                start = i;
            }
            _ => i += 1,
        }
    }
    if start < text.len() {
        lines.push(Line {
            start,
            text: &text[start..],
        });
    }
    if text.is_empty() {
        lines.push(Line { start: 0, text: "" });
    }
    lines
}
