use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use crate::ui::theme::Theme;

/// Placeholder shown while the prompt is empty.
pub const PLACEHOLDER: &str = "What do you want to ask?";
const PROMPT: &str = "> ";

/// A single-line text input with cursor handling and horizontal scrolling.
///
/// The cursor is a character index, so multi-byte input (accents, emoji)
/// never splits a UTF-8 sequence.
#[derive(Debug, Clone, Default)]
pub struct InputBox {
    content: String,
    /// Cursor position in characters
    cursor_position: usize,
}

impl InputBox {
    pub fn new() -> Self {
        Self::default()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len())
    }

    /// Insert a character at the cursor
    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor_position);
        self.content.insert(at, c);
        self.cursor_position += 1;
    }

    /// Insert pasted text at the cursor. Newlines become spaces.
    pub fn insert_str(&mut self, text: &str) {
        for c in text.chars() {
            match c {
                '\r' => {}
                '\n' | '\t' => self.insert_char(' '),
                c => self.insert_char(c),
            }
        }
    }

    /// Delete the character under the cursor (Delete key)
    pub fn delete_char(&mut self) {
        if self.cursor_position < self.len() {
            let at = self.byte_index(self.cursor_position);
            self.content.remove(at);
        }
    }

    /// Delete the character before the cursor (Backspace key)
    pub fn backspace(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            let at = self.byte_index(self.cursor_position);
            self.content.remove(at);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.len() {
            self.cursor_position += 1;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor_position = self.len();
    }

    pub fn get_content(&self) -> &str {
        &self.content
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor_position = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.content.chars().count()
    }

    /// First visible character so the cursor fits in `visible_width` cells.
    fn scroll_offset(&self, visible_width: usize) -> usize {
        if visible_width == 0 {
            return 0;
        }
        // Leave one cell for the cursor block
        (self.cursor_position + 1).saturating_sub(visible_width)
    }

    /// Render on a single row: prompt, visible text, and cursor block.
    pub fn render_line(&self, area: Rect, buf: &mut Buffer, theme: &Theme, focused: bool) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let prompt_width = PROMPT.len() as u16;
        buf.set_string(area.x, area.y, PROMPT, theme.prompt);
        if area.width <= prompt_width {
            return;
        }
        let text_x = area.x + prompt_width;
        let inner_width = (area.width - prompt_width) as usize;

        if self.content.is_empty() {
            let placeholder: String = PLACEHOLDER.chars().take(inner_width).collect();
            buf.set_string(text_x, area.y, placeholder, theme.placeholder);
        } else {
            let scroll_offset = self.scroll_offset(inner_width);
            let visible: String = self
                .content
                .chars()
                .skip(scroll_offset)
                .take(inner_width)
                .collect();
            buf.set_stringn(text_x, area.y, visible, inner_width, theme.input);
        }

        if focused {
            let scroll_offset = self.scroll_offset(inner_width);
            let cursor_x = (self.cursor_position - scroll_offset) as u16;
            if (cursor_x as usize) < inner_width {
                let cursor_char = self
                    .content
                    .chars()
                    .nth(self.cursor_position)
                    .unwrap_or(' ');
                buf.set_string(
                    text_x + cursor_x,
                    area.y,
                    cursor_char.to_string(),
                    theme.cursor,
                );
            }
        }
    }
}

/// A renderable wrapper for InputBox that implements the Widget trait
pub struct InputBoxWidget<'a> {
    input_box: &'a InputBox,
    theme: &'a Theme,
    focused: bool,
}

impl<'a> InputBoxWidget<'a> {
    pub fn new(input_box: &'a InputBox, theme: &'a Theme, focused: bool) -> Self {
        Self {
            input_box,
            theme,
            focused,
        }
    }
}

impl Widget for InputBoxWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.input_box
            .render_line(area, buf, self.theme, self.focused);
    }
}
