#[cfg(test)]
#[path = "scroll_test.rs"]
mod tests;

use ratatui::widgets::ScrollbarState;

/// Tracks how far the conversation has been scrolled. Position counts rows
/// from the top of the rendered bubble list.
#[derive(Default)]
pub struct Scroll {
    list_length: u16,
    viewport_length: u16,
    pub position: u16,
    pub scrollbar_state: ScrollbarState,
}

impl Scroll {
    fn max_position(&self) -> u16 {
        return self.list_length.saturating_sub(self.viewport_length);
    }

    /// Page moves cover most of the viewport, keeping two rows of overlap.
    fn page_size(&self) -> u16 {
        return self.viewport_length.saturating_sub(2).max(1);
    }

    fn sync_scrollbar(&mut self) {
        self.scrollbar_state = self.scrollbar_state.position(self.position as usize);
    }

    pub fn is_at_bottom(&self) -> bool {
        return self.position >= self.max_position();
    }

    pub fn up(&mut self) {
        self.up_by(1);
    }

    pub fn up_page(&mut self) {
        self.up_by(self.page_size());
    }

    fn up_by(&mut self, rows: u16) {
        self.position = self.position.saturating_sub(rows);
        self.sync_scrollbar();
    }

    pub fn down(&mut self) {
        self.down_by(1);
    }

    pub fn down_page(&mut self) {
        self.down_by(self.page_size());
    }

    fn down_by(&mut self, rows: u16) {
        self.position = self.position.saturating_add(rows).min(self.max_position());
        self.sync_scrollbar();
    }

    pub fn last(&mut self) {
        self.position = self.max_position();
        self.sync_scrollbar();
    }

    pub fn set_state(&mut self, list_length: u16, viewport_length: u16) {
        self.list_length = list_length;
        self.viewport_length = viewport_length;
        self.position = self.position.min(self.max_position());
        self.scrollbar_state = self
            .scrollbar_state
            .content_length(list_length as usize)
            .viewport_content_length(viewport_length as usize);
        self.sync_scrollbar();
    }
}
