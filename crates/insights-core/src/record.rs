use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::tag::{InteractionType, Tag};

/// A logged customer interaction. Records are never modified after they are
/// appended to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionRecord {
    pub id: u64,
    pub customer_name: String,
    pub interaction_type: InteractionType,
    pub description: String,
    pub tags: Vec<Tag>,
    #[serde(rename = "date")]
    pub created_at: DateTime<Utc>,
}

/// The free-text part of the form, before tags and identity are attached.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionDraft {
    pub customer_name: String,
    pub interaction_type: InteractionType,
    pub description: String,
}

impl InteractionDraft {
    pub fn new(
        customer_name: impl Into<String>,
        interaction_type: InteractionType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            customer_name: customer_name.into(),
            interaction_type,
            description: description.into(),
        }
    }
}
