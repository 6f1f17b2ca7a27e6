//! UI rendering for gpt-term
//!
//! The screen is a single column:
//! - Title row with the mode and conversation summary
//! - Scroll indicator, viewport body, scroll indicator
//! - Separator and prompt input
//! - Status row (spinner, error or notice) and key hints
//!
//! The body is drawn straight from [`Viewport::visible_lines`]; all wrapping
//! happened when the engine regenerated its content.
//!
//! [`Viewport::visible_lines`]: crate::domain::Viewport::visible_lines

pub mod helpers;
pub mod markup;
pub mod theme;
pub mod wrap;

use ratatui::{
    layout::{Constraint, Layout, Margin, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, Mode, MARGIN_COLUMNS};
use crate::widgets::InputBoxWidget;
use helpers::{spinner_frame, truncate_to_width};

/// Render the whole screen.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area().inner(Margin {
        horizontal: MARGIN_COLUMNS / 2,
        vertical: 0,
    });

    let [title, up, body, down, separator, input, status, hints] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    render_title(frame, app, title);
    render_indicators(frame, app, up, down);
    frame.render_widget(Paragraph::new(app.viewport.visible_lines().to_vec()), body);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "─".repeat(separator.width as usize),
            app.theme.dim,
        ))),
        separator,
    );
    frame.render_widget(
        InputBoxWidget::new(&app.input, &app.theme, app.mode.is_normal()),
        input,
    );
    render_status(frame, app, status);
    render_hints(frame, app, hints);
}

fn render_title(frame: &mut Frame, app: &App, area: Rect) {
    let summary = if app.conversation.summary.is_empty() {
        "New chat"
    } else {
        app.conversation.summary.as_str()
    };
    let head = format!("gpt-term · {} · ", app.mode.name());
    let room = (area.width as usize).saturating_sub(head.chars().count());
    let line = Line::from(vec![
        Span::styled(head, app.theme.title),
        Span::styled(truncate_to_width(summary, room), app.theme.dim),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_indicators(frame: &mut Frame, app: &App, up: Rect, down: Rect) {
    if app.viewport.can_scroll_up() {
        frame.render_widget(
            Paragraph::new(Span::styled("▲ more above", app.theme.indicator)),
            up,
        );
    }
    if app.viewport.can_scroll_down() {
        frame.render_widget(
            Paragraph::new(Span::styled("▼ more below", app.theme.indicator)),
            down,
        );
    }
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let line = if app.is_loading() {
        Line::from(vec![
            Span::styled(spinner_frame(app.tick_count), theme.spinner),
            Span::styled(" Loading...", theme.dim),
        ])
    } else if app.running_commands() > 0 {
        Line::from(vec![
            Span::styled(spinner_frame(app.tick_count), theme.spinner),
            Span::styled(" Running command...", theme.dim),
        ])
    } else if let Some(err) = &app.last_error {
        let hint = err.category().recovery_hint();
        let room = (area.width as usize).saturating_sub(hint.chars().count() + 3);
        Line::from(vec![
            Span::styled(truncate_to_width(&err.user_message(), room), theme.error),
            Span::styled(format!(" ({})", hint), theme.dim),
        ])
    } else if let Some(notice) = &app.notice {
        Line::from(Span::styled(
            truncate_to_width(notice, area.width as usize),
            theme.notice,
        ))
    } else {
        Line::default()
    };
    frame.render_widget(Paragraph::new(line), area);
}

/// Key hints for the active mode, most important first; the row is cut
/// where it stops fitting.
pub fn mode_hints(mode: &Mode) -> &'static [(&'static str, &'static str)] {
    match mode {
        Mode::Normal => &[
            ("Enter", "send"),
            ("Ctrl+X", "run"),
            ("Ctrl+K", "edit"),
            ("F1", "help"),
            ("Ctrl+C", "quit"),
            ("Ctrl+R", "history"),
            ("Ctrl+N", "new"),
        ],
        Mode::Editing { .. } => &[
            ("Enter", "edit (drops later messages)"),
            ("Esc", "back"),
            ("j/k", "move"),
            ("x", "run"),
            ("c", "copy"),
        ],
        Mode::History { .. } => &[("↑/↓", "select"), ("Enter", "open"), ("Esc", "back")],
        Mode::CommandSelect { .. } => &[
            ("↑/↓", "select"),
            ("1-9", "run"),
            ("Enter", "run"),
            ("c", "copy"),
            ("Esc", "cancel"),
        ],
        Mode::Help => &[("any key", "close")],
    }
}

fn render_hints(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = Vec::new();
    let mut width = 0;
    for (key, action) in mode_hints(&app.mode) {
        let entry = key.chars().count() + action.chars().count() + 3;
        if width + entry > area.width as usize {
            break;
        }
        width += entry;
        spans.push(Span::styled(*key, app.theme.title));
        spans.push(Span::styled(format!(" {}  ", action), app.theme.hint));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
