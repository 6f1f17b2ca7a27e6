//! Viewport state over pre-wrapped content.
//!
//! This module provides [`Viewport`], which owns the rendered lines of
//! whatever the current mode displays and a vertical offset into them. Every
//! buffer line is exactly one terminal row, so all offset math is in rows.
//!
//! Offsets count from the top and always stay in `[0, max_offset()]` where
//! `max_offset() = max(0, total - height)`. A viewport that has not been
//! sized yet (height 0) ignores every scroll request.

use ratatui::text::Line;

/// Bias used when bringing a selected message into view.
pub const MESSAGE_BIAS: f32 = 0.25;
/// Bias used when bringing a history entry into view.
pub const HISTORY_BIAS: f32 = 0.5;

/// Visible window (offset + size) into the current content.
#[derive(Debug, Clone, Default)]
pub struct Viewport {
    lines: Vec<Line<'static>>,
    offset: usize,
    width: u16,
    height: u16,
}

/// Offset to keep after content is regenerated: `prev` if still reachable,
/// otherwise the new maximum.
pub fn preserve_across_regeneration(prev: usize, new_total: usize, height: u16) -> usize {
    prev.min(new_total.saturating_sub(height as usize))
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn total(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> &[Line<'static>] {
        &self.lines
    }

    /// Lines currently inside the window.
    pub fn visible_lines(&self) -> &[Line<'static>] {
        let start = self.offset.min(self.lines.len());
        let end = (start + self.height as usize).min(self.lines.len());
        &self.lines[start..end]
    }

    pub fn max_offset(&self) -> usize {
        self.lines.len().saturating_sub(self.height as usize)
    }

    pub fn is_sized(&self) -> bool {
        self.height > 0
    }

    /// Resize the window. Returns true if the width changed, meaning the
    /// content has to be re-wrapped.
    pub fn set_size(&mut self, width: u16, height: u16) -> bool {
        let width_changed = self.width != width;
        self.width = width;
        self.height = height;
        self.offset = preserve_across_regeneration(self.offset, self.lines.len(), height);
        width_changed
    }

    /// Replace the content, keeping the previous offset when it is still valid.
    pub fn set_content(&mut self, lines: Vec<Line<'static>>) {
        self.lines = lines;
        self.offset = preserve_across_regeneration(self.offset, self.lines.len(), self.height);
    }

    /// Move the window by `delta` rows (negative is up). Returns true if the
    /// offset changed.
    pub fn scroll_by(&mut self, delta: isize) -> bool {
        if !self.is_sized() {
            return false;
        }
        let before = self.offset;
        let target = if delta.is_negative() {
            self.offset.saturating_sub(delta.unsigned_abs())
        } else {
            self.offset.saturating_add(delta as usize)
        };
        self.offset = target.min(self.max_offset());
        self.offset != before
    }

    pub fn goto_top(&mut self) {
        if self.is_sized() {
            self.offset = 0;
        }
    }

    pub fn goto_bottom(&mut self) {
        if self.is_sized() {
            self.offset = self.max_offset();
        }
    }

    /// Scroll so `target` sits `floor(height * bias)` rows below the top of
    /// the window, clamped to the valid range.
    pub fn ensure_visible(&mut self, target: usize, bias: f32) {
        if !self.is_sized() {
            return;
        }
        let lead = (self.height as f32 * bias).floor() as usize;
        self.offset = target.saturating_sub(lead).min(self.max_offset());
    }

    pub fn can_scroll_up(&self) -> bool {
        self.offset > 0
    }

    pub fn can_scroll_down(&self) -> bool {
        self.offset < self.max_offset()
    }

    /// Half the window height, used for page movement.
    pub fn half_page(&self) -> usize {
        (self.height as usize / 2).max(1)
    }
}
