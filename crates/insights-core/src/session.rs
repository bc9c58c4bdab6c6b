//! Session-scoped state: the interaction store plus the form's tag selection.
//!
//! `Session` is the only write path into the store. Front ends toggle tags and
//! submit drafts through it, then rebuild the dashboard from `records()`.

use anyhow::Result;
use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::dashboard::{DashboardConfig, DashboardSummary};
use crate::error::ValidationError;
use crate::record::{InteractionDraft, InteractionRecord};
use crate::selection::SelectionState;
use crate::store::InteractionStore;
use crate::tag::Tag;

#[derive(Debug, Clone, Default)]
pub struct Session {
    store: InteractionStore,
    selection: SelectionState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_tag(&mut self, tag: Tag) -> bool {
        self.selection.toggle(tag)
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn records(&self) -> &[InteractionRecord] {
        self.store.records()
    }

    pub fn submit(&mut self, draft: InteractionDraft) -> Result<&InteractionRecord, ValidationError> {
        self.submit_at(draft, Utc::now())
    }

    /// Log an interaction with the current selection as its tags.
    ///
    /// Fails without touching the store or the selection when no tag is
    /// selected. On success the selection is cleared.
    pub fn submit_at(
        &mut self,
        draft: InteractionDraft,
        now: DateTime<Utc>,
    ) -> Result<&InteractionRecord, ValidationError> {
        if self.selection.is_empty() {
            warn!("submission rejected: no issue category selected");
            return Err(ValidationError::NoTagsSelected);
        }

        let tags = self.selection.tags().to_vec();
        self.selection.clear();
        let record = self.store.append(draft, tags, now);
        info!(
            id = record.id,
            interaction_type = ?record.interaction_type,
            tags = record.tags.len(),
            "customer interaction logged"
        );
        Ok(record)
    }

    pub fn summary(&self, now: DateTime<Utc>, config: &DashboardConfig) -> DashboardSummary {
        DashboardSummary::build(self.store.records(), now, config)
    }

    /// Pretty JSON dump of every logged record.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self.store.records())?)
    }
}
