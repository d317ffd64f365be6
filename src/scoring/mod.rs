//! Multi-factor priority scoring.
//!
//! Each sub-score lives in its own module and is bounded to `[0, 100]`; the
//! priority is their fixed convex combination.

pub mod credibility;
pub mod geography;
pub mod recency;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{ClassificationResult, Document};

pub use credibility::source_credibility;
pub use geography::geographic_importance;
pub use recency::recency_score;

pub const CREDIBILITY_WEIGHT: f64 = 0.30;
pub const RECENCY_WEIGHT: f64 = 0.25;
pub const RELEVANCE_WEIGHT: f64 = 0.30;
pub const GEOGRAPHY_WEIGHT: f64 = 0.15;

/// Total keyword hits at which relevance saturates.
pub const RELEVANCE_SATURATION: usize = 10;

pub fn relevance_score(total_matches: usize) -> f64 {
    total_matches.min(RELEVANCE_SATURATION) as f64 * 100.0 / RELEVANCE_SATURATION as f64
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriorityBreakdown {
    pub credibility: f64,
    pub recency: f64,
    pub relevance: f64,
    pub geography: f64,
}

impl PriorityBreakdown {
    pub fn combined(&self) -> f64 {
        let weighted = self.credibility * CREDIBILITY_WEIGHT
            + self.recency * RECENCY_WEIGHT
            + self.relevance * RELEVANCE_WEIGHT
            + self.geography * GEOGRAPHY_WEIGHT;
        weighted.clamp(0.0, 100.0)
    }
}

/// Scores documents against the live clock, or a pinned reference time when
/// replaying stored batches.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriorityScorer {
    reference_time: Option<DateTime<Utc>>,
}

impl PriorityScorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(reference_time: DateTime<Utc>) -> Self {
        Self {
            reference_time: Some(reference_time),
        }
    }

    pub fn score(&self, document: &Document, classification: &ClassificationResult) -> f64 {
        self.breakdown(document, classification).combined()
    }

    pub fn breakdown(&self, document: &Document, classification: &ClassificationResult) -> PriorityBreakdown {
        let now = self.reference_time.unwrap_or_else(Utc::now);
        PriorityBreakdown {
            credibility: source_credibility(&document.source),
            recency: recency_score(document.published_at.as_deref(), now),
            relevance: relevance_score(classification.match_counts.total),
            geography: geographic_importance(&document.content),
        }
    }
}
