use std::{collections::BTreeMap, fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::document::Document;

/// Label used wherever a document matched no taxonomy keyword.
pub const UNCATEGORIZED: &str = "uncategorized";

/// Thematic categories of the taxonomy.
///
/// Declaration order is the taxonomy order: it drives tie-breaking between
/// equally scored categories and the iteration order of every map keyed by
/// `Category`. Reordering variants changes previously computed rankings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    InternalConflict,
    ExternalConflict,
    EconomicIndicators,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::InternalConflict,
        Category::ExternalConflict,
        Category::EconomicIndicators,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::InternalConflict => "internal_conflict",
            Category::ExternalConflict => "external_conflict",
            Category::EconomicIndicators => "economic_indicators",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == value)
            .ok_or_else(|| UnknownCategory(value.to_string()))
    }
}

/// Serializes `Option<Category>` as the category name or `"uncategorized"`.
pub mod primary_label {
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    use super::{Category, UNCATEGORIZED};

    pub fn serialize<S: Serializer>(value: &Option<Category>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(category) => category.serialize(serializer),
            None => serializer.serialize_str(UNCATEGORIZED),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Category>, D::Error> {
        let label = String::deserialize(deserializer)?;
        if label == UNCATEGORIZED {
            return Ok(None);
        }
        label.parse::<Category>().map(Some).map_err(de::Error::custom)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchCounts {
    #[serde(flatten)]
    pub by_category: BTreeMap<Category, usize>,
    pub total: usize,
}

impl MatchCounts {
    pub fn get(&self, category: Category) -> usize {
        self.by_category.get(&category).copied().unwrap_or(0)
    }
}

/// Per-document evidence produced by the pattern categorizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    #[serde(with = "primary_label")]
    pub primary_category: Option<Category>,
    pub secondary_category: Option<Category>,
    /// Relative share of matches per category; sums to 100 when anything matched.
    pub category_scores: BTreeMap<Category, f64>,
    pub match_counts: MatchCounts,
    pub relevant_sentences: BTreeMap<Category, Vec<String>>,
}

impl ClassificationResult {
    pub fn score(&self, category: Category) -> f64 {
        self.category_scores.get(&category).copied().unwrap_or(0.0)
    }

    pub fn sentences(&self, category: Category) -> &[String] {
        self.relevant_sentences
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_uncategorized(&self) -> bool {
        self.primary_category.is_none()
    }
}

/// A document augmented with its classification and priority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredDocument {
    #[serde(flatten)]
    pub document: Document,
    pub classification: ClassificationResult,
    pub priority_score: f64,
}

impl ScoredDocument {
    pub fn primary_category(&self) -> Option<Category> {
        self.classification.primary_category
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryCounts {
    #[serde(flatten)]
    pub by_category: BTreeMap<Category, usize>,
    pub uncategorized: usize,
}

impl CategoryCounts {
    pub fn zeroed() -> Self {
        Self {
            by_category: Category::ALL.into_iter().map(|c| (c, 0)).collect(),
            uncategorized: 0,
        }
    }

    pub fn increment(&mut self, category: Option<Category>) {
        match category {
            Some(category) => *self.by_category.entry(category).or_insert(0) += 1,
            None => self.uncategorized += 1,
        }
    }

    pub fn get(&self, category: Option<Category>) -> usize {
        match category {
            Some(category) => self.by_category.get(&category).copied().unwrap_or(0),
            None => self.uncategorized,
        }
    }

    pub fn total(&self) -> usize {
        self.by_category.values().sum::<usize>() + self.uncategorized
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighPriorityEntry {
    pub title: String,
    pub source: String,
    #[serde(with = "primary_label")]
    pub primary_category: Option<Category>,
    pub priority_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total_articles: usize,
    pub category_counts: CategoryCounts,
    pub average_scores: BTreeMap<Category, f64>,
    pub high_priority_articles: Vec<HighPriorityEntry>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSummary {
    pub category: Category,
    pub article_count: usize,
    pub top_keywords: Vec<String>,
    pub average_priority_score: f64,
    pub daily_counts: Vec<DailyCount>,
}

/// Contiguous daily document counts, one slot per calendar day of the window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    pub dates: Vec<NaiveDate>,
    #[serde(flatten)]
    pub by_category: BTreeMap<Category, Vec<u32>>,
    pub total: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendReport {
    pub category_trends: BTreeMap<Category, TrendSummary>,
    pub time_series: TimeSeries,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_order_follows_declaration() {
        let mut shuffled = vec![
            Category::EconomicIndicators,
            Category::InternalConflict,
            Category::ExternalConflict,
        ];
        shuffled.sort();
        assert_eq!(shuffled, Category::ALL.to_vec());
    }

    #[test]
    fn category_parses_from_its_label() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().ok(), Some(category));
        }
        assert!("uncategorized".parse::<Category>().is_err());
    }

    #[test]
    fn classification_serializes_uncategorized_label() {
        let result = ClassificationResult {
            primary_category: None,
            secondary_category: None,
            category_scores: Category::ALL.into_iter().map(|c| (c, 0.0)).collect(),
            match_counts: MatchCounts::default(),
            relevant_sentences: BTreeMap::new(),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["primary_category"], "uncategorized");
        assert_eq!(json["category_scores"]["economic_indicators"], 0.0);
        assert_eq!(json["match_counts"]["total"], 0);

        let back: ClassificationResult = serde_json::from_value(json).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn category_counts_track_uncategorized_separately() {
        let mut counts = CategoryCounts::zeroed();
        counts.increment(Some(Category::ExternalConflict));
        counts.increment(None);
        counts.increment(None);
        assert_eq!(counts.get(Some(Category::ExternalConflict)), 1);
        assert_eq!(counts.get(None), 2);
        assert_eq!(counts.total(), 3);

        let json = serde_json::to_value(&counts).unwrap();
        assert_eq!(json["uncategorized"], 2);
        assert_eq!(json["internal_conflict"], 0);
    }
}
