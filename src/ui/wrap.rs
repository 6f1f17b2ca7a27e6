//! Text wrapping for viewport content.
//!
//! Content is pre-wrapped to the viewport width so that each generated
//! [`Line`] is exactly one terminal row; the scroll math in
//! [`Viewport`](crate::domain::Viewport) depends on that.

use ratatui::{
    style::Style,
    text::{Line, Span},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

fn spans_width(spans: &[Span<'_>]) -> usize {
    spans.iter().map(|s| s.content.width()).sum()
}

/// Split styled text into alternating whitespace / non-whitespace tokens.
fn tokenize(spans: Vec<Span<'static>>) -> Vec<(String, Style, bool)> {
    let mut tokens = Vec::new();
    for span in spans {
        let mut current = String::new();
        let mut current_ws: Option<bool> = None;
        for c in span.content.chars() {
            let ws = c.is_whitespace();
            if current_ws.is_some_and(|prev| prev != ws) {
                tokens.push((std::mem::take(&mut current), span.style, !ws));
            }
            current.push(c);
            current_ws = Some(ws);
        }
        if let Some(ws) = current_ws {
            tokens.push((current, span.style, ws));
        }
    }
    tokens
}

struct LineBuilder {
    lines: Vec<Line<'static>>,
    spans: Vec<Span<'static>>,
    width: usize,
    limit: usize,
    continuation: Vec<Span<'static>>,
    continuation_limit: usize,
}

impl LineBuilder {
    fn push(&mut self, text: String, style: Style, width: usize) {
        self.spans.push(Span::styled(text, style));
        self.width += width;
    }

    fn has_content(&self) -> bool {
        self.width > 0
    }

    fn break_line(&mut self) {
        let finished = std::mem::replace(&mut self.spans, self.continuation.clone());
        self.lines.push(Line::from(finished));
        self.width = 0;
        self.limit = self.continuation_limit;
    }

    /// Place a word wider than a whole line, character by character.
    fn push_broken(&mut self, word: &str, style: Style) {
        let mut chunk = String::new();
        for c in word.chars() {
            let cw = c.width().unwrap_or(0);
            if self.width + cw > self.limit && self.has_content() {
                if !chunk.is_empty() {
                    self.spans.push(Span::styled(std::mem::take(&mut chunk), style));
                }
                self.break_line();
            }
            chunk.push(c);
            // Width is tracked per character; the chunk span is added without
            // counting it again.
            self.width += cw;
        }
        if !chunk.is_empty() {
            self.spans.push(Span::styled(chunk, style));
        }
    }
}

/// Wrap `content` to `max_width` columns.
///
/// The first row starts with `prefix`; every continuation row starts with
/// `indent`. Breaks prefer whitespace; words longer than a row are split.
/// Whitespace at the start of continuation rows is dropped.
pub fn wrap_spans(
    content: Vec<Span<'static>>,
    prefix: Vec<Span<'static>>,
    indent: Vec<Span<'static>>,
    max_width: usize,
) -> Vec<Line<'static>> {
    let limit = max_width.saturating_sub(spans_width(&prefix));
    let continuation_limit = max_width.saturating_sub(spans_width(&indent));

    if limit == 0 || continuation_limit == 0 {
        let mut spans = prefix;
        spans.extend(content);
        return vec![Line::from(spans)];
    }

    let mut builder = LineBuilder {
        lines: Vec::new(),
        spans: prefix,
        width: 0,
        limit,
        continuation: indent,
        continuation_limit,
    };
    let mut first_row = true;

    for (text, style, is_space) in tokenize(content) {
        let width = text.width();
        if is_space {
            if !builder.has_content() && !first_row {
                continue;
            }
            if builder.width + width <= builder.limit {
                builder.push(text, style, width);
            } else {
                builder.break_line();
                first_row = false;
            }
            continue;
        }

        if builder.width + width <= builder.limit {
            builder.push(text, style, width);
        } else if width <= builder.continuation_limit {
            builder.break_line();
            first_row = false;
            builder.push(text, style, width);
        } else {
            let before = builder.lines.len();
            builder.push_broken(&text, style);
            if builder.lines.len() > before {
                first_row = false;
            }
        }
    }

    let LineBuilder {
        mut lines, spans, ..
    } = builder;
    lines.push(Line::from(spans));
    lines
}

/// Convenience wrapper for unstyled text with no prefix.
pub fn wrap_plain(text: &str, style: Style, max_width: usize) -> Vec<Line<'static>> {
    wrap_spans(
        vec![Span::styled(text.to_string(), style)],
        Vec::new(),
        Vec::new(),
        max_width,
    )
}
