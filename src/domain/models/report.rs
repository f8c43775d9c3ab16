// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::listing::ListingKind;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// What happened to a single scraped record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ItemOutcome {
    Created { id: i32 },
    Updated { id: i32 },
    Skipped { reason: String },
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemReport {
    pub label: String,
    #[serde(flatten)]
    pub outcome: ItemOutcome,
    /// Non fatal problems such as a failed image download
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Result of one adapter run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceReport {
    pub source: String,
    pub kind: ListingKind,
    pub items: Vec<ItemReport>,
    pub unavailable_pages: Vec<String>,
}

impl SourceReport {
    pub fn new(source: &str, kind: ListingKind) -> Self {
        Self {
            source: source.to_string(),
            kind,
            items: Vec::new(),
            unavailable_pages: Vec::new(),
        }
    }

    fn count(&self, pred: impl Fn(&ItemOutcome) -> bool) -> usize {
        self.items.iter().filter(|item| pred(&item.outcome)).count()
    }

    pub fn created(&self) -> usize {
        self.count(|o| matches!(o, ItemOutcome::Created { .. }))
    }

    pub fn updated(&self) -> usize {
        self.count(|o| matches!(o, ItemOutcome::Updated { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, ItemOutcome::Skipped { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, ItemOutcome::Failed { .. }))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunTotals {
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
    pub unavailable_pages: usize,
}

/// Aggregate of every source touched by a scrape run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub totals: RunTotals,
    pub sources: Vec<SourceReport>,
}

impl RunReport {
    pub fn start() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            totals: RunTotals::default(),
            sources: Vec::new(),
        }
    }

    pub fn push(&mut self, source: SourceReport) {
        self.totals.created += source.created();
        self.totals.updated += source.updated();
        self.totals.skipped += source.skipped();
        self.totals.failed += source.failed();
        self.totals.unavailable_pages += source.unavailable_pages.len();
        self.sources.push(source);
    }

    pub fn finish(mut self) -> Self {
        self.finished_at = Some(Utc::now());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(outcome: ItemOutcome) -> ItemReport {
        ItemReport {
            label: "x".to_string(),
            outcome,
            warnings: vec![],
        }
    }

    #[test]
    fn test_totals_accumulate_across_sources() {
        let mut first = SourceReport::new("yelp", ListingKind::Restaurant);
        first.items.push(item(ItemOutcome::Created { id: 1 }));
        first.items.push(item(ItemOutcome::Failed {
            reason: "boom".to_string(),
        }));
        let mut second = SourceReport::new("eventbrite", ListingKind::Event);
        second.items.push(item(ItemOutcome::Updated { id: 3 }));
        second.unavailable_pages.push("https://example.com".to_string());

        let mut report = RunReport::start();
        report.push(first);
        report.push(second);
        let report = report.finish();

        assert_eq!(report.totals.created, 1);
        assert_eq!(report.totals.updated, 1);
        assert_eq!(report.totals.failed, 1);
        assert_eq!(report.totals.unavailable_pages, 1);
        assert!(report.finished_at.is_some());
    }

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        let value = serde_json::to_value(item(ItemOutcome::Skipped {
            reason: "missing name".to_string(),
        }))
        .unwrap();

        assert_eq!(value["status"], "skipped");
        assert_eq!(value["reason"], "missing name");
        assert!(value.get("warnings").is_none());
    }
}
