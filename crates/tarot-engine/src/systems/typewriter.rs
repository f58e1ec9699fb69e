//! Typewriter text: wraps a paragraph into lines and reveals it one
//! character at a time.
//!
//! The engine only tracks reveal state. It never plays sounds itself;
//! `tick` reports each keystroke so the owning screen can decide whether a
//! key click is due.

use crate::core::rng::Rng;

/// Column width used when wrapping reading paragraphs.
pub const DEFAULT_WRAP_COLUMNS: usize = 35;

/// Measures the rendered width of a line of text.
pub trait TextMeasure {
    fn line_width(&self, line: &str) -> f32;
}

/// Fixed-advance font metrics: every glyph is `size * spacing` wide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphMetrics {
    /// Font size in canvas units.
    pub size: f32,
    /// Horizontal advance as a fraction of the font size.
    pub spacing: f32,
}

impl Default for GlyphMetrics {
    fn default() -> Self {
        Self {
            size: 24.0,
            spacing: 0.55,
        }
    }
}

impl TextMeasure for GlyphMetrics {
    fn line_width(&self, line: &str) -> f32 {
        line.chars().count() as f32 * self.size * self.spacing
    }
}

/// Split text into paragraphs on newlines, drop blank ones, and wrap each
/// at `columns`. Wrapped lines inside a paragraph are joined with `\n`.
pub fn wrap_paragraphs(text: &str, columns: usize) -> Vec<String> {
    text.split('\n')
        .map(|p| wrap_line(p, columns))
        .filter(|lines| !lines.is_empty())
        .map(|lines| lines.join("\n"))
        .collect()
}

/// Wrapped lines of one paragraph. Existing line breaks are kept, blank
/// lines are dropped.
pub fn wrap_lines(paragraph: &str, columns: usize) -> Vec<String> {
    paragraph
        .split('\n')
        .flat_map(|line| wrap_line(line, columns))
        .collect()
}

/// Greedy word wrap. Words longer than `columns` are split.
fn wrap_line(line: &str, columns: usize) -> Vec<String> {
    let columns = columns.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in line.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > columns {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let chars: Vec<char> = word.chars().collect();
            let mut chunks = chars.chunks(columns).peekable();
            while let Some(chunk) = chunks.next() {
                let piece: String = chunk.iter().collect();
                if chunks.peek().is_some() {
                    lines.push(piece);
                } else {
                    current_len = chunk.len();
                    current = piece;
                }
            }
            continue;
        }

        if current.is_empty() {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= columns {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
            current_len = word_len;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// One revealed character, reported by `Typewriter::tick`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keystroke {
    /// Line the character belongs to.
    pub line: usize,
    /// 1-based position of the character within its line.
    pub position: usize,
}

/// A line as it should be drawn right now.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleLine<'a> {
    pub index: usize,
    pub text: &'a str,
    /// Width of the full line, measured once when the text was set.
    pub width: f32,
}

#[derive(Debug, Clone)]
pub struct Typewriter {
    typing_speed: f32,
    columns: usize,
    source: Option<String>,
    lines: Vec<String>,
    line_chars: Vec<usize>,
    widths: Vec<f32>,
    line: usize,
    revealed: usize,
    timer: f32,
    complete: bool,
}

impl Typewriter {
    /// `typing_speed` is the interval between characters, in seconds.
    pub fn new(typing_speed: f32, columns: usize) -> Self {
        Self {
            typing_speed: typing_speed.max(0.0),
            columns,
            source: None,
            lines: Vec::new(),
            line_chars: Vec::new(),
            widths: Vec::new(),
            line: 0,
            revealed: 0,
            timer: 0.0,
            complete: false,
        }
    }

    /// Like `new`, with the interval jittered by up to 5% either way.
    pub fn with_jitter(base_speed: f32, columns: usize, rng: &mut Rng) -> Self {
        Self::new(base_speed * rng.range_f32(0.95, 1.05), columns)
    }

    /// Show `paragraph`. Setting the paragraph already shown is a no-op, so
    /// callers may do it every frame. Returns true when typing restarted.
    pub fn set_text(&mut self, paragraph: &str, measure: &dyn TextMeasure) -> bool {
        if self.source.as_deref() == Some(paragraph) {
            return false;
        }

        self.lines = wrap_lines(paragraph, self.columns);
        self.line_chars = self.lines.iter().map(|l| l.chars().count()).collect();
        self.widths = self.lines.iter().map(|l| measure.line_width(l)).collect();
        self.source = Some(paragraph.to_string());
        self.line = 0;
        self.revealed = 0;
        self.timer = 0.0;
        self.complete = self.lines.is_empty();
        log::debug!("Typewriter set: {} lines", self.lines.len());
        true
    }

    /// Advance the reveal timer. Reveals at most one character per call.
    pub fn tick(&mut self, dt: f32) -> Option<Keystroke> {
        if self.complete || self.source.is_none() {
            return None;
        }

        self.timer += dt.max(0.0);
        if self.timer < self.typing_speed {
            return None;
        }
        self.timer = 0.0;

        self.revealed += 1;
        let stroke = Keystroke {
            line: self.line,
            position: self.revealed,
        };

        if self.revealed >= self.line_chars[self.line] {
            if self.line + 1 < self.lines.len() {
                self.line += 1;
                self.revealed = 0;
            } else {
                self.complete = true;
            }
        }

        Some(stroke)
    }

    /// Lines to draw: earlier lines in full, the current line up to the
    /// revealed character, nothing after it.
    pub fn visible_lines(&self) -> Vec<VisibleLine<'_>> {
        let mut visible = Vec::with_capacity(self.line + 1);
        for (index, text) in self.lines.iter().enumerate() {
            let shown = if self.complete || index < self.line {
                text.as_str()
            } else if index == self.line {
                prefix_chars(text, self.revealed)
            } else {
                break;
            };
            visible.push(VisibleLine {
                index,
                text: shown,
                width: self.widths[index],
            });
        }
        visible
    }

    /// Everything revealed so far, lines joined with `\n`.
    pub fn displayed_text(&self) -> String {
        self.visible_lines()
            .iter()
            .map(|l| l.text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn line_index(&self) -> usize {
        self.line
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn typing_speed(&self) -> f32 {
        self.typing_speed
    }

    /// Paragraph currently shown, if any.
    pub fn text(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Forget the paragraph. The next `set_text` starts from scratch.
    pub fn reset(&mut self) {
        self.source = None;
        self.lines.clear();
        self.line_chars.clear();
        self.widths.clear();
        self.line = 0;
        self.revealed = 0;
        self.timer = 0.0;
        self.complete = false;
    }
}

fn prefix_chars(text: &str, count: usize) -> &str {
    match text.char_indices().nth(count) {
        Some((byte, _)) => &text[..byte],
        None => text,
    }
}
