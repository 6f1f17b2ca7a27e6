//! Terminal event dispatch.
//!
//! Global keys are checked first and bypass the mode tables. After that only
//! the active mode's table runs; anything it does not recognize is ignored.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};

use super::{App, Mode, SCROLL_STEP};

impl App {
    /// Handle one terminal event.
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Paste(text) => self.handle_paste(&text),
            Event::Resize(width, height) => self.set_terminal_size(width, height),
            _ => {}
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        self.notice = None;
        self.mark_dirty();

        let before = self.mode.name();

        if !self.handle_global_key(key) {
            match self.mode {
                Mode::Normal => self.handle_normal_key(key),
                Mode::Editing { .. } => self.handle_editing_key(key),
                Mode::History { .. } => self.handle_history_key(key),
                Mode::CommandSelect { .. } => self.handle_command_key(key),
                Mode::Help => self.enter_normal(),
            }
        }

        let after = self.mode.name();
        if before != after {
            tracing::debug!(from = before, to = after, code = ?key.code, "mode changed");
        }
    }

    /// Keys accepted in every mode. Returns true if the key was consumed.
    fn handle_global_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Char('c') if ctrl => self.quit(),
            KeyCode::Char('n') if ctrl => self.new_chat(),
            KeyCode::Char('x') if ctrl || alt => self.execute(),
            KeyCode::Char('j') | KeyCode::Char('k') if ctrl => self.enter_editing(),
            KeyCode::Char('l') if ctrl => self.cycle_conversation(),
            // Most terminals send Ctrl+H as Backspace; F1 is the reliable key.
            KeyCode::Char('h') if ctrl => self.show_help(),
            KeyCode::F(1) => self.show_help(),
            _ => return false,
        }
        true
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('j') | KeyCode::Char('k') if alt => self.enter_editing(),
            KeyCode::Char('r') if ctrl => self.enter_history(),
            KeyCode::Char('a') if ctrl => self.input.move_cursor_home(),
            KeyCode::Char('e') if ctrl => self.input.move_cursor_end(),
            KeyCode::Char(c) if !ctrl && !alt => self.input.insert_char(c),
            KeyCode::Backspace => self.input.backspace(),
            KeyCode::Delete => self.input.delete_char(),
            KeyCode::Left => self.input.move_cursor_left(),
            KeyCode::Right => self.input.move_cursor_right(),
            KeyCode::Enter => self.send(),
            KeyCode::Up => {
                self.viewport.scroll_by(-SCROLL_STEP);
            }
            KeyCode::Down => {
                self.viewport.scroll_by(SCROLL_STEP);
            }
            KeyCode::PageUp => {
                self.viewport.scroll_by(-(self.viewport.half_page() as isize));
            }
            KeyCode::PageDown => {
                self.viewport.scroll_by(self.viewport.half_page() as isize);
            }
            KeyCode::Home => self.viewport.goto_top(),
            KeyCode::End => self.viewport.goto_bottom(),
            KeyCode::Esc => self.quit(),
            _ => {}
        }
    }

    fn handle_editing_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('k') => self.move_edit_cursor(-1),
            KeyCode::Char('j') => self.move_edit_cursor(1),
            KeyCode::Up => {
                self.viewport.scroll_by(-SCROLL_STEP);
            }
            KeyCode::Down => {
                self.viewport.scroll_by(SCROLL_STEP);
            }
            KeyCode::Enter => self.edit_selected(),
            KeyCode::Char('x') => self.execute(),
            KeyCode::Char('c') => self.copy_selected_message(),
            KeyCode::Esc => self.enter_normal(),
            _ => {}
        }
    }

    fn handle_history_key(&mut self, key: KeyEvent) {
        let page = self.viewport.height().max(1) as isize;
        match key.code {
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::PageUp => self.move_selection(-page),
            KeyCode::PageDown => self.move_selection(page),
            KeyCode::Home => self.move_selection(isize::MIN),
            KeyCode::End => self.move_selection(isize::MAX),
            KeyCode::Enter => self.select_history_entry(),
            KeyCode::Esc => self.enter_normal(),
            _ => {}
        }
    }

    fn handle_command_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::Char(c @ '1'..='9') => {
                let index = (c as usize) - ('1' as usize);
                self.run_command(index);
            }
            KeyCode::Enter => {
                if let Mode::CommandSelect { selected, .. } = self.mode {
                    self.run_command(selected);
                }
            }
            KeyCode::Char('c') => self.copy_selected_command(),
            KeyCode::Esc => self.enter_normal(),
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let delta = match mouse.kind {
            MouseEventKind::ScrollUp => -1,
            MouseEventKind::ScrollDown => 1,
            _ => return,
        };
        if matches!(self.mode, Mode::History { .. }) {
            self.move_selection(delta);
        } else {
            self.viewport.scroll_by(delta * SCROLL_STEP);
        }
        self.mark_dirty();
    }

    fn handle_paste(&mut self, text: &str) {
        if self.mode.is_normal() {
            self.input.insert_str(text);
            self.mark_dirty();
        }
    }
}
