//! Append-only, in-memory interaction log.

use chrono::{DateTime, Utc};

use crate::record::{InteractionDraft, InteractionRecord};
use crate::tag::Tag;

#[derive(Debug, Clone, Default)]
pub struct InteractionStore {
    records: Vec<InteractionRecord>,
}

impl InteractionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from the draft and append it. The id comes from the
    /// creation time in milliseconds, bumped past the last id so ids stay
    /// strictly increasing.
    pub(crate) fn append(
        &mut self,
        draft: InteractionDraft,
        tags: Vec<Tag>,
        created_at: DateTime<Utc>,
    ) -> &InteractionRecord {
        let id = self.next_id(created_at);
        self.records.push(InteractionRecord {
            id,
            customer_name: draft.customer_name,
            interaction_type: draft.interaction_type,
            description: draft.description,
            tags,
            created_at,
        });
        &self.records[self.records.len() - 1]
    }

    fn next_id(&self, created_at: DateTime<Utc>) -> u64 {
        let millis = u64::try_from(created_at.timestamp_millis()).unwrap_or(0);
        match self.records.last() {
            Some(last) if millis <= last.id => last.id + 1,
            _ => millis,
        }
    }

    pub fn records(&self) -> &[InteractionRecord] {
        &self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn draft(name: &str) -> InteractionDraft {
        InteractionDraft {
            customer_name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_id_comes_from_timestamp() {
        let mut store = InteractionStore::new();
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let record = store.append(draft("Ada"), vec![Tag::Billing], at);
        assert_eq!(record.id, at.timestamp_millis() as u64);
    }

    #[test]
    fn test_ids_strictly_increase_within_same_millisecond() {
        let mut store = InteractionStore::new();
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let first = store.append(draft("a"), vec![Tag::Billing], at).id;
        let second = store.append(draft("b"), vec![Tag::Billing], at).id;
        let third = store
            .append(draft("c"), vec![Tag::Billing], at - Duration::seconds(5))
            .id;
        assert!(first < second);
        assert!(second < third);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut store = InteractionStore::new();
        let at = Utc::now();
        for name in ["one", "two", "three"] {
            store.append(draft(name), vec![Tag::Other], at);
        }
        let names: Vec<&str> = store
            .records()
            .iter()
            .map(|r| r.customer_name.as_str())
            .collect();
        assert_eq!(names, vec!["one", "two", "three"]);
    }
}
