use chrono::Utc;
use insights_core::{
    Config, DashboardConfig, DashboardSummary, InteractionDraft, InteractionType, Session, Tag,
};
use ratatui::layout::Rect;
use tracing::{debug, info};

/// Number of tag chips per row in the form.
pub const TAG_COLUMNS: usize = 2;

pub const SUBMIT_SUCCESS: &str = "Customer interaction logged successfully!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    CustomerName,
    InteractionType,
    Description,
    Tags,
}

impl FormField {
    const ORDER: [FormField; 4] = [
        FormField::CustomerName,
        FormField::InteractionType,
        FormField::Description,
        FormField::Tags,
    ];

    pub fn next(self) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    pub fn is_text(self) -> bool {
        matches!(self, FormField::CustomerName | FormField::Description)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Blocking message shown over the form until any key is pressed.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// Single-line text field with a cursor measured in characters.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    pub value: String,
    pub cursor: usize,
}

impl TextInput {
    pub fn insert(&mut self, c: char) {
        let byte_pos = char_to_byte_index(&self.value, self.cursor);
        self.value.insert(byte_pos, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let byte_pos = char_to_byte_index(&self.value, self.cursor);
            self.value.remove(byte_pos);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.value.chars().count() {
            let byte_pos = char_to_byte_index(&self.value, self.cursor);
            self.value.remove(byte_pos);
        }
    }

    pub fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.value.chars().count());
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.value.chars().count();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }
}

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

pub struct App {
    pub should_quit: bool,
    pub focus: FormField,

    // Form state
    pub customer_name: TextInput,
    pub interaction_type: InteractionType,
    pub description: TextInput,
    pub tag_cursor: usize,
    pub available_tags: Vec<Tag>,

    pub notice: Option<Notice>,

    // Data
    pub session: Session,
    pub summary: DashboardSummary,
    pub dashboard_config: DashboardConfig,

    // Tag chip areas for mouse hit-testing (updated during render)
    pub tag_areas: Vec<(Rect, usize)>,
}

impl App {
    pub fn new(config: &Config) -> Self {
        Self {
            should_quit: false,
            focus: FormField::CustomerName,
            customer_name: TextInput::default(),
            interaction_type: InteractionType::default(),
            description: TextInput::default(),
            tag_cursor: 0,
            available_tags: Tag::all(),
            notice: None,
            session: Session::new(),
            summary: DashboardSummary::empty(),
            dashboard_config: config.dashboard(),
            tag_areas: Vec::new(),
        }
    }

    /// Recompute every dashboard view from the current records.
    pub fn refresh_dashboard(&mut self) {
        self.summary = self.session.summary(Utc::now(), &self.dashboard_config);
    }

    /// Weekly counts age with the clock, so ticks refresh a non-empty dashboard.
    pub fn on_tick(&mut self) {
        if self.summary.total > 0 {
            self.refresh_dashboard();
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn active_input(&mut self) -> Option<&mut TextInput> {
        match self.focus {
            FormField::CustomerName => Some(&mut self.customer_name),
            FormField::Description => Some(&mut self.description),
            _ => None,
        }
    }

    pub fn is_tag_selected(&self, idx: usize) -> bool {
        self.available_tags
            .get(idx)
            .map(|tag| self.session.selection().contains(tag))
            .unwrap_or(false)
    }

    pub fn toggle_tag(&mut self, idx: usize) {
        if let Some(tag) = self.available_tags.get(idx).cloned() {
            self.tag_cursor = idx;
            self.session.toggle_tag(tag);
        }
    }

    pub fn toggle_focused_tag(&mut self) {
        self.toggle_tag(self.tag_cursor);
    }

    pub fn tag_left(&mut self) {
        self.tag_cursor = self.tag_cursor.saturating_sub(1);
    }

    pub fn tag_right(&mut self) {
        let last = self.available_tags.len().saturating_sub(1);
        self.tag_cursor = (self.tag_cursor + 1).min(last);
    }

    pub fn tag_up(&mut self) {
        self.tag_cursor = self.tag_cursor.saturating_sub(TAG_COLUMNS);
    }

    pub fn tag_down(&mut self) {
        if self.tag_cursor + TAG_COLUMNS < self.available_tags.len() {
            self.tag_cursor += TAG_COLUMNS;
        }
    }

    pub fn submit(&mut self) {
        let draft = InteractionDraft::new(
            self.customer_name.value.clone(),
            self.interaction_type,
            self.description.value.clone(),
        );

        match self.session.submit(draft).map(|record| record.id) {
            Ok(id) => {
                debug!(id, "resetting form after submission");
                self.reset_form();
                self.refresh_dashboard();
                self.notice = Some(Notice {
                    kind: NoticeKind::Success,
                    message: SUBMIT_SUCCESS.to_string(),
                });
            }
            Err(e) => {
                self.notice = Some(Notice {
                    kind: NoticeKind::Error,
                    message: e.to_string(),
                });
            }
        }
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    fn reset_form(&mut self) {
        self.customer_name.clear();
        self.description.clear();
        self.interaction_type = InteractionType::default();
        self.tag_cursor = 0;
        self.focus = FormField::CustomerName;
    }

    pub fn log_session(&self) {
        info!(records = self.session.records().len(), "session ended");
        match self.session.to_json() {
            Ok(json) => debug!(snapshot = %json, "session snapshot"),
            Err(e) => debug!(error = %e, "could not serialize session"),
        }
    }
}
