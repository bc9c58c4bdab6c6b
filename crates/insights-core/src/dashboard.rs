//! Dashboard aggregation over the interaction log.
//!
//! Everything here is a pure function of the records and the evaluation time.
//! Front ends rebuild a [`DashboardSummary`] after every submission and render
//! it; nothing is updated incrementally.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::record::InteractionRecord;
use crate::tag::{InteractionType, Tag};

pub const TOP_ISSUE_PLACEHOLDER: &str = "N/A";
pub const NO_ISSUES_PLACEHOLDER: &str = "No data yet - Start logging customer interactions!";
pub const NO_RECENT_PLACEHOLDER: &str = "No recent cases";

const HIGH_PRIORITY_ABOVE: f64 = 30.0;
const MEDIUM_PRIORITY_ABOVE: f64 = 15.0;

/// Tuning knobs for the dashboard views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub recent_limit: usize,
    pub preview_chars: usize,
    pub weekly_window_days: i64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            recent_limit: 5,
            preview_chars: 100,
            weekly_window_days: 7,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Classify a share of all cases, in percent.
    pub fn classify(percentage: f64) -> Self {
        if percentage > HIGH_PRIORITY_ABOVE {
            Priority::High
        } else if percentage > MEDIUM_PRIORITY_ABOVE {
            Priority::Medium
        } else {
            Priority::Low
        }
    }

    pub fn badge(&self) -> &'static str {
        match self {
            Priority::High => "HIGH PRIORITY",
            Priority::Medium => "MEDIUM PRIORITY",
            Priority::Low => "LOW PRIORITY",
        }
    }
}

/// One row of the priority-ranked issue list.
#[derive(Debug, Clone, PartialEq)]
pub struct IssuePriority {
    pub tag: Tag,
    pub count: usize,
    /// Share of all records carrying this tag, rounded to one decimal.
    pub percentage: f64,
    pub priority: Priority,
}

impl IssuePriority {
    pub fn percentage_label(&self) -> String {
        format!("{:.1}%", self.percentage)
    }

    pub fn cases_label(&self) -> String {
        format!("{} cases ({})", self.count, self.percentage_label())
    }
}

/// One entry of the recent-cases feed.
#[derive(Debug, Clone, PartialEq)]
pub struct RecentCase {
    pub id: u64,
    pub customer_name: String,
    pub interaction_type: InteractionType,
    pub created_at: DateTime<Utc>,
    pub preview: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub total: usize,
    pub this_week: usize,
    pub top_issue: Option<Tag>,
    pub priorities: Vec<IssuePriority>,
    pub recent: Vec<RecentCase>,
}

impl DashboardSummary {
    pub fn build(records: &[InteractionRecord], now: DateTime<Utc>, config: &DashboardConfig) -> Self {
        let frequency = tag_frequency(records);
        let total = total_count(records);
        Self {
            total,
            this_week: weekly_count(records, now, config.weekly_window_days),
            top_issue: top_issue(&frequency),
            priorities: priority_list(&frequency, total),
            recent: recent_cases(records, config.recent_limit, config.preview_chars),
        }
    }

    pub fn empty() -> Self {
        Self {
            total: 0,
            this_week: 0,
            top_issue: None,
            priorities: Vec::new(),
            recent: Vec::new(),
        }
    }

    pub fn top_issue_label(&self) -> &str {
        self.top_issue
            .as_ref()
            .map(|tag| tag.display_name())
            .unwrap_or(TOP_ISSUE_PLACEHOLDER)
    }
}

pub fn total_count(records: &[InteractionRecord]) -> usize {
    records.len()
}

/// Records created strictly after `now - window_days`. A non-positive window
/// counts nothing; a window reaching past the earliest representable time
/// counts everything.
pub fn weekly_count(records: &[InteractionRecord], now: DateTime<Utc>, window_days: i64) -> usize {
    if window_days <= 0 {
        return 0;
    }
    let cutoff = Duration::try_days(window_days).and_then(|window| now.checked_sub_signed(window));
    match cutoff {
        Some(cutoff) => records.iter().filter(|r| r.created_at > cutoff).count(),
        None => records.len(),
    }
}

/// Per-tag record counts, in order of first appearance.
pub fn tag_frequency(records: &[InteractionRecord]) -> Vec<(Tag, usize)> {
    let mut counts: Vec<(Tag, usize)> = Vec::new();
    let mut index: HashMap<&Tag, usize> = HashMap::new();

    for record in records {
        for tag in &record.tags {
            match index.get(tag) {
                Some(&i) => counts[i].1 += 1,
                None => {
                    index.insert(tag, counts.len());
                    counts.push((tag.clone(), 1));
                }
            }
        }
    }

    counts
}

/// Most frequent tag. Ties go to the tag that appeared first.
pub fn top_issue(frequency: &[(Tag, usize)]) -> Option<Tag> {
    let mut best: Option<&(Tag, usize)> = None;
    for entry in frequency {
        if best.map_or(true, |b| entry.1 > b.1) {
            best = Some(entry);
        }
    }
    best.map(|(tag, _)| tag.clone())
}

/// Issues ranked by count, highest first. Equal counts keep appearance order.
pub fn priority_list(frequency: &[(Tag, usize)], total: usize) -> Vec<IssuePriority> {
    if total == 0 {
        return Vec::new();
    }

    let mut ranked: Vec<&(Tag, usize)> = frequency.iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    ranked
        .into_iter()
        .map(|(tag, count)| {
            let percentage = round_one_decimal(*count as f64 / total as f64 * 100.0);
            IssuePriority {
                tag: tag.clone(),
                count: *count,
                percentage,
                priority: Priority::classify(percentage),
            }
        })
        .collect()
}

/// The last `limit` records, newest first.
pub fn recent_cases(records: &[InteractionRecord], limit: usize, preview_chars: usize) -> Vec<RecentCase> {
    records
        .iter()
        .rev()
        .take(limit)
        .map(|r| RecentCase {
            id: r.id,
            customer_name: r.customer_name.clone(),
            interaction_type: r.interaction_type,
            created_at: r.created_at,
            preview: truncate_description(&r.description, preview_chars),
        })
        .collect()
}

/// Keep the first `max_chars` characters, appending "..." when anything was cut.
pub fn truncate_description(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}

/// Round the exact binary value to one decimal, exact ties going up.
///
/// `{:.1}` already rounds the exact value but breaks ties to even. An f64 sits
/// exactly halfway between two tenths only when `value * 4` is an odd integer
/// (0.25, 0.75, 1.25, ...), so those are rounded up by hand.
fn round_one_decimal(value: f64) -> f64 {
    let quarters = value * 4.0;
    if quarters.fract() == 0.0 && quarters.abs() % 2.0 == 1.0 {
        return (value * 10.0).ceil() / 10.0;
    }
    format!("{:.1}", value).parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 9, 30, 0).unwrap()
    }

    fn record(id: u64, tags: &[Tag], created_at: DateTime<Utc>) -> InteractionRecord {
        InteractionRecord {
            id,
            customer_name: format!("R{}", id),
            interaction_type: InteractionType::Phone,
            description: format!("case {}", id),
            tags: tags.to_vec(),
            created_at,
        }
    }

    #[test]
    fn test_empty_dashboard() {
        let summary = DashboardSummary::build(&[], now(), &DashboardConfig::default());
        assert_eq!(summary, DashboardSummary::empty());
        assert_eq!(summary.top_issue_label(), "N/A");
    }

    #[test]
    fn test_weekly_window_is_trailing_seven_days() {
        let records = vec![
            record(1, &[Tag::Billing], now() - Duration::days(8)),
            record(2, &[Tag::Billing], now() - Duration::days(6)),
            record(3, &[Tag::Billing], now()),
        ];
        assert_eq!(weekly_count(&records, now(), 7), 2);
    }

    #[test]
    fn test_weekly_window_boundary_is_exclusive() {
        let records = vec![record(1, &[Tag::Billing], now() - Duration::days(7))];
        assert_eq!(weekly_count(&records, now(), 7), 0);
    }

    #[test]
    fn test_tag_frequency_sums_to_tag_occurrences() {
        let records = vec![
            record(1, &[Tag::Billing, Tag::Technical], now()),
            record(2, &[Tag::Technical], now()),
            record(3, &[Tag::Ui, Tag::Billing, Tag::parse("refunds")], now()),
        ];
        let frequency = tag_frequency(&records);
        let counted: usize = frequency.iter().map(|(_, c)| c).sum();
        let occurrences: usize = records.iter().map(|r| r.tags.len()).sum();
        assert_eq!(counted, occurrences);
        assert_eq!(
            frequency,
            vec![
                (Tag::Billing, 2),
                (Tag::Technical, 2),
                (Tag::Ui, 1),
                (Tag::Custom("refunds".to_string()), 1),
            ]
        );
    }

    #[test]
    fn test_top_issue_tie_goes_to_first_seen() {
        let records = vec![
            record(1, &[Tag::Performance], now()),
            record(2, &[Tag::Account], now()),
            record(3, &[Tag::Account, Tag::Performance], now()),
        ];
        let frequency = tag_frequency(&records);
        assert_eq!(top_issue(&frequency), Some(Tag::Performance));
    }

    #[test]
    fn test_top_issue_picks_maximum() {
        let frequency = vec![(Tag::Ui, 1), (Tag::Feature, 3), (Tag::Other, 2)];
        assert_eq!(top_issue(&frequency), Some(Tag::Feature));
        assert_eq!(top_issue(&[]), None);
    }

    #[test]
    fn test_priority_classification() {
        let mut records: Vec<InteractionRecord> =
            (1..=4).map(|i| record(i, &[Tag::Billing], now())).collect();
        records.push(record(5, &[Tag::Technical], now()));

        let frequency = tag_frequency(&records);
        let priorities = priority_list(&frequency, records.len());
        assert_eq!(priorities.len(), 2);

        assert_eq!(priorities[0].tag, Tag::Billing);
        assert_eq!(priorities[0].percentage, 80.0);
        assert_eq!(priorities[0].priority, Priority::High);
        assert_eq!(priorities[0].cases_label(), "4 cases (80.0%)");

        assert_eq!(priorities[1].tag, Tag::Technical);
        assert_eq!(priorities[1].percentage, 20.0);
        assert_eq!(priorities[1].priority, Priority::Medium);
    }

    #[test]
    fn test_priority_thresholds_are_strict() {
        assert_eq!(Priority::classify(30.0), Priority::Medium);
        assert_eq!(Priority::classify(30.1), Priority::High);
        assert_eq!(Priority::classify(15.0), Priority::Low);
        assert_eq!(Priority::classify(15.1), Priority::Medium);
    }

    #[test]
    fn test_priority_list_is_stable_for_equal_counts() {
        let frequency = vec![(Tag::Ui, 1), (Tag::Feature, 2), (Tag::Account, 1), (Tag::Other, 2)];
        let priorities = priority_list(&frequency, 6);
        let order: Vec<Tag> = priorities.into_iter().map(|p| p.tag).collect();
        assert_eq!(order, vec![Tag::Feature, Tag::Other, Tag::Ui, Tag::Account]);
    }

    #[test]
    fn test_percentage_rounds_to_one_decimal() {
        let frequency = vec![(Tag::Billing, 1)];
        let priorities = priority_list(&frequency, 3);
        assert_eq!(priorities[0].percentage, 33.3);
        assert_eq!(priorities[0].percentage_label(), "33.3%");
        assert_eq!(priorities[0].priority, Priority::High);
    }

    #[test]
    fn test_rounding_uses_exact_value_at_thresholds() {
        // 601 / 2000 * 100 is 30.049999999999997, just under the halfway point
        let high_edge = priority_list(&[(Tag::Billing, 601)], 2000);
        assert_eq!(high_edge[0].percentage_label(), "30.0%");
        assert_eq!(high_edge[0].priority, Priority::Medium);

        let medium_edge = priority_list(&[(Tag::Billing, 301)], 2000);
        assert_eq!(medium_edge[0].percentage_label(), "15.0%");
        assert_eq!(medium_edge[0].priority, Priority::Low);
    }

    #[test]
    fn test_exact_ties_round_up() {
        let quarter = priority_list(&[(Tag::Ui, 1)], 400);
        assert_eq!(quarter[0].percentage_label(), "0.3%");
        assert_eq!(round_one_decimal(0.25), 0.3);
        assert_eq!(round_one_decimal(2.75), 2.8);
        assert_eq!(round_one_decimal(12.5), 12.5);
    }

    #[test]
    fn test_weekly_count_survives_extreme_windows() {
        let records = vec![
            record(1, &[Tag::Billing], now() - Duration::days(3000)),
            record(2, &[Tag::Billing], now() + Duration::days(1)),
        ];
        assert_eq!(weekly_count(&records, now(), 100_000_000), 2);
        assert_eq!(weekly_count(&records, now(), i64::MAX), 2);
        assert_eq!(weekly_count(&records, now(), -5), 0);
        assert_eq!(weekly_count(&records, now(), 0), 0);
    }

    #[test]
    fn test_recent_feed_is_last_five_newest_first() {
        let records: Vec<InteractionRecord> =
            (1..=7).map(|i| record(i, &[Tag::Other], now())).collect();
        let recent = recent_cases(&records, 5, 100);
        let ids: Vec<u64> = recent.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![7, 6, 5, 4, 3]);
    }

    #[test]
    fn test_recent_feed_shorter_than_limit() {
        let records = vec![record(1, &[Tag::Other], now()), record(2, &[Tag::Other], now())];
        let ids: Vec<u64> = recent_cases(&records, 5, 100).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_truncate_description() {
        let exact = "a".repeat(100);
        assert_eq!(truncate_description(&exact, 100), exact);

        let long = "b".repeat(101);
        let cut = truncate_description(&long, 100);
        assert_eq!(cut, format!("{}...", "b".repeat(100)));
    }

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        let text = "é".repeat(5);
        assert_eq!(truncate_description(&text, 3), "ééé...");
        assert_eq!(truncate_description("", 3), "");
    }

    #[test]
    fn test_summary_uses_config() {
        let records: Vec<InteractionRecord> = (1..=4)
            .map(|i| record(i, &[Tag::Documentation], now() - Duration::days(i as i64)))
            .collect();
        let config = DashboardConfig {
            recent_limit: 2,
            preview_chars: 4,
            weekly_window_days: 2,
        };
        let summary = DashboardSummary::build(&records, now(), &config);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.this_week, 1);
        assert_eq!(summary.recent.len(), 2);
        assert_eq!(summary.recent[0].preview, "case...");
        assert_eq!(summary.top_issue_label(), "Documentation");
    }
}
