//! Minimal markup for message bodies.
//!
//! Only two constructs are recognized: fenced code blocks (lines between
//! ```` ``` ```` fences) and `<command>` blocks. Command tags are replaced by
//! a `$ ` marker and the command text is highlighted; everything else is
//! plain text.

use ratatui::text::Span;

use crate::commands::{CLOSE_TAG, OPEN_TAG};
use crate::ui::theme::Theme;

const COMMAND_MARKER: &str = "$ ";

/// Split `text` into logical lines of styled spans.
pub fn style_body(text: &str, theme: &Theme) -> Vec<Vec<Span<'static>>> {
    let mut lines = Vec::new();
    let mut in_code = false;
    let mut in_command = false;

    for raw in text.lines() {
        if !in_command && raw.trim_start().starts_with("```") {
            in_code = !in_code;
            lines.push(vec![Span::styled(raw.to_string(), theme.fence)]);
            continue;
        }

        let base = if in_code { theme.code } else { theme.text };
        let mut spans = Vec::new();
        let mut rest = raw;

        while !rest.is_empty() {
            if in_command {
                match rest.find(CLOSE_TAG) {
                    Some(end) => {
                        push_span(&mut spans, &rest[..end], theme.command);
                        rest = &rest[end + CLOSE_TAG.len()..];
                        in_command = false;
                    }
                    None => {
                        push_span(&mut spans, rest, theme.command);
                        rest = "";
                    }
                }
            } else {
                match rest.find(OPEN_TAG) {
                    Some(start) => {
                        push_span(&mut spans, &rest[..start], base);
                        spans.push(Span::styled(COMMAND_MARKER, theme.command));
                        rest = rest[start + OPEN_TAG.len()..].trim_start();
                        in_command = true;
                    }
                    None => {
                        push_span(&mut spans, rest, base);
                        rest = "";
                    }
                }
            }
        }

        lines.push(spans);
    }

    if lines.is_empty() {
        lines.push(Vec::new());
    }
    lines
}

fn push_span(spans: &mut Vec<Span<'static>>, text: &str, style: ratatui::style::Style) {
    if !text.is_empty() {
        spans.push(Span::styled(text.to_string(), style));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flatten(lines: &[Vec<Span<'static>>]) -> Vec<String> {
        lines
            .iter()
            .map(|spans| spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_command_tags_replaced_by_marker() {
        let theme = Theme::default();
        let lines = style_body("Run <command>ls -la</command> now", &theme);
        assert_eq!(flatten(&lines), vec!["Run $ ls -la now"]);
        let command_span = lines[0].iter().find(|s| s.content == "ls -la").unwrap();
        assert_eq!(command_span.style, theme.command);
    }

    #[test]
    fn test_multiline_command_stays_highlighted() {
        let theme = Theme::default();
        let lines = style_body("<command>\nfor f in *; do\necho $f\ndone\n</command>\nafter", &theme);
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[1][0].style, theme.command);
        assert_eq!(lines[5][0].style, theme.text);
    }

    #[test]
    fn test_fenced_code_is_styled() {
        let theme = Theme::default();
        let lines = style_body("before\n```bash\necho hi\n```\nafter", &theme);
        assert_eq!(lines[1][0].style, theme.fence);
        assert_eq!(lines[2][0].style, theme.code);
        assert_eq!(lines[4][0].style, theme.text);
    }

    #[test]
    fn test_blank_lines_preserved() {
        let theme = Theme::default();
        let lines = style_body("a\n\nb", &theme);
        assert_eq!(lines.len(), 3);
        assert!(lines[1].is_empty());
    }
}
