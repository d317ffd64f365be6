use std::collections::BTreeMap;

use chrono::Utc;

use crate::domain::{BatchSummary, Category, CategoryCounts, HighPriorityEntry, ScoredDocument};

/// Documents scoring strictly above this are listed as high priority.
pub const HIGH_PRIORITY_THRESHOLD: f64 = 70.0;

pub fn summarize(documents: &[ScoredDocument]) -> BatchSummary {
    let mut category_counts = CategoryCounts::zeroed();
    let mut score_totals: BTreeMap<Category, f64> =
        Category::ALL.into_iter().map(|c| (c, 0.0)).collect();
    let mut high_priority_articles = Vec::new();

    for scored in documents {
        let classification = &scored.classification;
        category_counts.increment(classification.primary_category);

        for (category, score) in &classification.category_scores {
            *score_totals.entry(*category).or_insert(0.0) += score;
        }

        if scored.priority_score > HIGH_PRIORITY_THRESHOLD {
            high_priority_articles.push(HighPriorityEntry {
                title: scored.document.title.clone(),
                source: scored.document.source.clone(),
                primary_category: classification.primary_category,
                priority_score: scored.priority_score,
            });
        }
    }

    let total_articles = documents.len();
    let average_scores = score_totals
        .into_iter()
        .map(|(category, total)| {
            let average = if total_articles == 0 {
                0.0
            } else {
                total / total_articles as f64
            };
            (category, average)
        })
        .collect();

    BatchSummary {
        total_articles,
        category_counts,
        average_scores,
        high_priority_articles,
        timestamp: Utc::now(),
    }
}
