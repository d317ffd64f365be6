pub mod dates;
pub mod document;
pub mod types;

pub use document::{Document, IngestError, IngestedBatch};
pub use types::{
    BatchSummary, Category, CategoryCounts, ClassificationResult, DailyCount, HighPriorityEntry,
    MatchCounts, ScoredDocument, TimeSeries, TrendReport, TrendSummary, UNCATEGORIZED,
};
