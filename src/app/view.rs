//! Viewport content generation.
//!
//! Turns the engine state into pre-wrapped lines for the active mode and
//! records the row where each selectable item starts, so selection moves
//! can keep it on screen.

use chrono::Local;
use ratatui::text::{Line, Span};

use super::prompts::HELP_TEXT;
use super::{App, Mode};
use crate::models::{Conversation, Message, Role};
use crate::ui::helpers::truncate_to_width;
use crate::ui::markup::style_body;
use crate::ui::theme::Theme;
use crate::ui::wrap::{wrap_plain, wrap_spans};

const BODY_INDENT: &str = "  ";
const HISTORY_HEADER_ROWS: usize = 2;

pub(super) struct Content {
    pub lines: Vec<Line<'static>>,
    /// Starting row of each message (transcript) or list entry
    pub anchors: Vec<usize>,
}

pub(super) fn build(app: &App) -> Content {
    let width = app.viewport.width() as usize;
    let theme = &app.theme;
    match &app.mode {
        Mode::Normal => transcript(&app.conversation, None, theme, width),
        Mode::Editing { cursor } => transcript(&app.conversation, Some(*cursor), theme, width),
        Mode::History { items, selected } => history(items, *selected, theme, width),
        Mode::CommandSelect { commands, selected, .. } => command_list(commands, *selected, theme, width),
        Mode::Help => help(theme, width),
    }
}

fn transcript(
    conversation: &Conversation,
    selected: Option<usize>,
    theme: &Theme,
    width: usize,
) -> Content {
    let mut lines = Vec::new();
    let mut anchors = vec![0];

    if !conversation.messages.iter().any(|m| m.role != Role::System) {
        for text in [
            "Ask for something you want done in the shell.",
            "",
            "Commands in replies can be run with Ctrl+X. Press F1 for help.",
        ] {
            lines.extend(wrap_plain(text, theme.dim, width));
        }
        return Content { lines, anchors };
    }

    for (index, message) in conversation.messages.iter().enumerate().skip(1) {
        anchors.push(lines.len());
        let is_selected = selected == Some(index);
        lines.extend(message_lines(message, is_selected, theme, width));
        if is_selected {
            lines.extend(wrap_plain(instruction(message.role), theme.instruction, width));
        }
        lines.push(Line::default());
    }

    Content { lines, anchors }
}

fn instruction(role: Role) -> &'static str {
    match role {
        Role::User => "  Enter: edit in $EDITOR (later messages are discarded)  c: copy  Esc: back",
        _ => "  x: run a command  c: copy  j/k: move  Esc: back",
    }
}

fn message_lines(message: &Message, selected: bool, theme: &Theme, width: usize) -> Vec<Line<'static>> {
    let label_style = match (selected, message.role) {
        (true, _) => theme.selected_label,
        (false, Role::User) => theme.user_label,
        (false, _) => theme.assistant_label,
    };
    let time = message.timestamp.with_timezone(&Local).format("%H:%M").to_string();

    let mut lines = vec![Line::from(vec![
        Span::styled(format!(" {} ", message.role.label()), label_style),
        Span::styled(format!(" {}", time), theme.dim),
    ])];

    for spans in style_body(&message.content, theme) {
        let wrapped = wrap_spans(
            spans,
            vec![Span::raw(BODY_INDENT)],
            vec![Span::raw(BODY_INDENT)],
            width,
        );
        if selected {
            lines.extend(wrapped.into_iter().map(|line| line.patch_style(theme.selected)));
        } else {
            lines.extend(wrapped);
        }
    }
    lines
}

fn history(items: &[Conversation], selected: usize, theme: &Theme, width: usize) -> Content {
    let mut lines = vec![
        Line::from(Span::styled("Saved conversations", theme.heading)),
        Line::default(),
    ];
    let mut anchors = Vec::with_capacity(items.len());

    if items.is_empty() {
        lines.push(Line::from(Span::styled("No saved conversations.", theme.dim)));
        return Content { lines, anchors };
    }

    for (i, conversation) in items.iter().enumerate() {
        anchors.push(HISTORY_HEADER_ROWS + i);
        let is_selected = i == selected;
        let marker = if is_selected { "▸ " } else { "  " };
        let date = conversation
            .created_at
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M")
            .to_string();
        let summary = if conversation.summary.is_empty() {
            "(empty)".to_string()
        } else {
            conversation.summary.clone()
        };
        let used = marker.chars().count() + date.len() + 2;
        let summary = truncate_to_width(&summary, width.saturating_sub(used));

        let line = Line::from(vec![
            Span::raw(marker),
            Span::styled(date, theme.dim),
            Span::raw("  "),
            Span::styled(summary, theme.text),
        ]);
        lines.push(if is_selected {
            line.patch_style(theme.selected)
        } else {
            line
        });
    }

    Content { lines, anchors }
}

fn command_list(commands: &[String], selected: usize, theme: &Theme, width: usize) -> Content {
    let mut lines = vec![
        Line::from(Span::styled("Choose a command to run", theme.heading)),
        Line::default(),
    ];
    let mut anchors = Vec::with_capacity(commands.len());

    for (i, command) in commands.iter().enumerate() {
        anchors.push(lines.len());
        let number = format!("{}. ", i + 1);
        let indent = " ".repeat(number.len());
        let is_selected = i == selected;

        for (row, text) in command.lines().enumerate() {
            let prefix = if row == 0 { number.clone() } else { indent.clone() };
            let wrapped = wrap_spans(
                vec![Span::styled(text.to_string(), theme.command)],
                vec![Span::styled(prefix, theme.dim)],
                vec![Span::raw(indent.clone())],
                width,
            );
            if is_selected {
                lines.extend(wrapped.into_iter().map(|line| line.patch_style(theme.selected)));
            } else {
                lines.extend(wrapped);
            }
        }
    }

    lines.push(Line::default());
    lines.extend(wrap_plain(
        "Enter or 1-9: run  c: copy  Esc: cancel",
        theme.instruction,
        width,
    ));

    Content { lines, anchors }
}

fn help(theme: &Theme, width: usize) -> Content {
    let mut lines = Vec::new();
    for (i, text) in HELP_TEXT.lines().enumerate() {
        let style = if i == 0 || (!text.is_empty() && !text.starts_with(' ')) {
            theme.heading
        } else {
            theme.text
        };
        lines.extend(wrap_plain(text, style, width));
    }
    Content {
        lines,
        anchors: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(content: &Content) -> Vec<String> {
        content.lines.iter().map(|l| l.to_string()).collect()
    }

    fn sample() -> Conversation {
        let mut c = Conversation::new("system");
        c.push(Message::user("list files"));
        c.push(Message::assistant("Try <command>ls -la</command>"));
        c
    }

    #[test]
    fn test_empty_transcript_shows_welcome() {
        let content = transcript(&Conversation::new("system"), None, &Theme::default(), 60);
        assert!(rows(&content)[0].contains("Ask for something"));
        assert_eq!(content.anchors, vec![0]);
    }

    #[test]
    fn test_transcript_anchors_per_message() {
        let content = transcript(&sample(), None, &Theme::default(), 60);
        assert_eq!(content.anchors.len(), 3);
        let rows = rows(&content);
        assert!(rows[content.anchors[1]].contains("You"));
        assert!(rows[content.anchors[2]].contains("Assistant"));
        assert!(rows.iter().any(|r| r.contains("$ ls -la")));
    }

    #[test]
    fn test_selected_message_has_instruction() {
        let theme = Theme::default();
        let content = transcript(&sample(), Some(1), &theme, 100);
        let rows = rows(&content);
        assert!(rows.iter().any(|r| r.contains("Enter: edit")));
        assert!(!rows.iter().any(|r| r.contains("x: run a command")));
        assert_eq!(content.lines[content.anchors[1] + 1].style, theme.selected);
    }

    #[test]
    fn test_history_anchors_after_header() {
        let items = vec![Conversation::new("a"), Conversation::new("b")];
        let content = history(&items, 1, &Theme::default(), 60);
        assert_eq!(content.anchors, vec![2, 3]);
        assert!(rows(&content)[3].starts_with("▸ "));
    }

    #[test]
    fn test_empty_history_message() {
        let content = history(&[], 0, &Theme::default(), 60);
        assert!(content.anchors.is_empty());
        assert!(rows(&content).iter().any(|r| r == "No saved conversations."));
    }

    #[test]
    fn test_command_list_numbers_entries() {
        let commands = vec!["ls -la".to_string(), "pwd".to_string()];
        let content = command_list(&commands, 0, &Theme::default(), 60);
        let rows = rows(&content);
        assert_eq!(rows[content.anchors[0]], "1. ls -la");
        assert_eq!(rows[content.anchors[1]], "2. pwd");
    }

    #[test]
    fn test_help_lists_keys() {
        let content = help(&Theme::default(), 80);
        assert!(rows(&content).iter().any(|r| r.contains("Ctrl+X")));
    }
}
