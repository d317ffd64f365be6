pub mod keywords;
pub mod stopwords;
pub mod timeseries;

use chrono::NaiveDate;

use crate::domain::{Category, ScoredDocument, TrendReport, TrendSummary};

pub use keywords::{document_tags, extract_keywords, CATEGORY_KEYWORD_LIMIT, DEFAULT_KEYWORD_LIMIT};
pub use timeseries::{build_time_series, TrendWindow, MAX_WINDOW_DAYS};

use keywords::KeywordCounter;
use timeseries::daily_counts;

/// Cross-document aggregation over an already classified batch.
#[derive(Debug, Clone, Copy)]
pub struct TrendAggregator {
    keyword_limit: usize,
}

impl Default for TrendAggregator {
    fn default() -> Self {
        Self::new(CATEGORY_KEYWORD_LIMIT)
    }
}

impl TrendAggregator {
    pub fn new(keyword_limit: usize) -> Self {
        Self { keyword_limit }
    }

    pub fn aggregate(&self, documents: &[ScoredDocument], window_days: u32, today: NaiveDate) -> TrendReport {
        let time_series = build_time_series(documents, TrendWindow::ending(today, window_days));

        let category_trends = Category::ALL
            .into_iter()
            .map(|category| {
                let members: Vec<&ScoredDocument> = documents
                    .iter()
                    .filter(|scored| scored.primary_category() == Some(category))
                    .collect();

                let mut counter = KeywordCounter::new();
                for scored in &members {
                    for sentence in scored.classification.sentences(category) {
                        counter.add_text(sentence);
                    }
                }

                let average_priority_score = if members.is_empty() {
                    0.0
                } else {
                    members.iter().map(|s| s.priority_score).sum::<f64>() / members.len() as f64
                };

                let summary = TrendSummary {
                    category,
                    article_count: members.len(),
                    top_keywords: counter.top(self.keyword_limit),
                    average_priority_score,
                    daily_counts: daily_counts(&time_series, category),
                };
                (category, summary)
            })
            .collect();

        tracing::debug!(
            target: "trends",
            documents = documents.len(),
            window_days,
            %today,
            "trend report built"
        );

        TrendReport {
            category_trends,
            time_series,
        }
    }
}
