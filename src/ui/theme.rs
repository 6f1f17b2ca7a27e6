//! Color theme for the gpt-term UI.
//!
//! A [`Theme`] is built once at startup and handed to the engine, which uses
//! it both when generating viewport content and when drawing the chrome.

use ratatui::style::{Color, Modifier, Style};

/// Accent used for the title and the assistant label
pub const COLOR_ACCENT: Color = Color::Rgb(205, 120, 80);

/// User label and prompt
pub const COLOR_USER: Color = Color::Cyan;

/// Command blocks inside assistant replies
pub const COLOR_COMMAND: Color = Color::LightGreen;

/// Fenced code blocks
pub const COLOR_CODE: Color = Color::Rgb(190, 190, 210);

/// Dim text for hints, separators and inactive chrome
pub const COLOR_DIM: Color = Color::DarkGray;

/// Selection highlight background
pub const COLOR_SELECTED_BG: Color = Color::Rgb(45, 45, 70);

pub const COLOR_ERROR: Color = Color::LightRed;

pub const COLOR_NOTICE: Color = Color::LightGreen;

/// Resolved styles for every element the UI draws.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub title: Style,
    pub user_label: Style,
    pub assistant_label: Style,
    pub text: Style,
    pub command: Style,
    pub code: Style,
    pub fence: Style,
    pub selected: Style,
    pub selected_label: Style,
    pub instruction: Style,
    pub heading: Style,
    pub dim: Style,
    pub indicator: Style,
    pub prompt: Style,
    pub input: Style,
    pub placeholder: Style,
    pub cursor: Style,
    pub spinner: Style,
    pub error: Style,
    pub notice: Style,
    pub hint: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            title: Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD),
            user_label: Style::default().fg(COLOR_USER).add_modifier(Modifier::BOLD),
            assistant_label: Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD),
            text: Style::default().fg(Color::White),
            command: Style::default().fg(COLOR_COMMAND).add_modifier(Modifier::BOLD),
            code: Style::default().fg(COLOR_CODE),
            fence: Style::default().fg(COLOR_DIM),
            selected: Style::default().fg(Color::White).bg(COLOR_SELECTED_BG),
            selected_label: Style::default()
                .fg(Color::Black)
                .bg(COLOR_USER)
                .add_modifier(Modifier::BOLD),
            instruction: Style::default().fg(COLOR_DIM).add_modifier(Modifier::ITALIC),
            heading: Style::default().add_modifier(Modifier::BOLD),
            dim: Style::default().fg(COLOR_DIM),
            indicator: Style::default().fg(COLOR_DIM),
            prompt: Style::default().fg(COLOR_USER),
            input: Style::default().fg(Color::White),
            placeholder: Style::default().fg(COLOR_DIM),
            cursor: Style::default().fg(Color::Black).bg(Color::White),
            spinner: Style::default().fg(COLOR_ACCENT),
            error: Style::default().fg(COLOR_ERROR),
            notice: Style::default().fg(COLOR_NOTICE),
            hint: Style::default().fg(COLOR_DIM),
        }
    }
}

impl Theme {
    /// Theme with no colors or modifiers, for terminals without color
    /// support (`NO_COLOR`). Selection stays visible through reversal.
    pub fn monochrome() -> Self {
        let plain = Style::default();
        let reversed = Style::default().add_modifier(Modifier::REVERSED);
        Self {
            title: plain,
            user_label: plain,
            assistant_label: plain,
            text: plain,
            command: plain,
            code: plain,
            fence: plain,
            selected: reversed,
            selected_label: reversed,
            instruction: plain,
            heading: plain,
            dim: plain,
            indicator: plain,
            prompt: plain,
            input: plain,
            placeholder: plain,
            cursor: reversed,
            spinner: plain,
            error: plain,
            notice: plain,
            hint: plain,
        }
    }

    /// Pick a theme from the environment.
    pub fn from_env() -> Self {
        match std::env::var_os("NO_COLOR") {
            Some(v) if !v.is_empty() => Self::monochrome(),
            _ => Self::default(),
        }
    }
}
