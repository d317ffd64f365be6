pub mod patterns;
pub mod summary;
pub mod taxonomy;

use rayon::prelude::*;

use crate::{
    domain::{Document, ScoredDocument},
    scoring::PriorityScorer,
};

pub use patterns::{PatternCategorizer, TaxonomyError};
pub use summary::{summarize, HIGH_PRIORITY_THRESHOLD};
pub use taxonomy::{CategoryDefinition, TAXONOMY};

/// Categorizer and scorer applied together over documents.
#[derive(Debug, Clone)]
pub struct Classifier {
    categorizer: PatternCategorizer,
    scorer: PriorityScorer,
}

impl Classifier {
    /// Classifier over the built-in taxonomy, scoring against the live clock.
    pub fn new() -> Result<Self, TaxonomyError> {
        Ok(Self::with_parts(
            PatternCategorizer::new(TAXONOMY)?,
            PriorityScorer::new(),
        ))
    }

    pub fn with_parts(categorizer: PatternCategorizer, scorer: PriorityScorer) -> Self {
        Self { categorizer, scorer }
    }

    pub fn categorizer(&self) -> &PatternCategorizer {
        &self.categorizer
    }

    pub fn scorer(&self) -> &PriorityScorer {
        &self.scorer
    }

    pub fn classify_document(&self, document: &Document) -> ScoredDocument {
        let classification = self.categorizer.classify(&document.classification_text());
        let priority_score = self.scorer.score(document, &classification);
        ScoredDocument {
            document: document.clone(),
            classification,
            priority_score,
        }
    }

    /// Classifies documents in parallel, then orders them by priority.
    ///
    /// The sort is stable: equal priorities keep their input order.
    pub fn classify_batch(&self, documents: &[Document]) -> Vec<ScoredDocument> {
        let mut scored: Vec<ScoredDocument> = documents
            .par_iter()
            .map(|document| self.classify_document(document))
            .collect();
        scored.sort_by(|a, b| b.priority_score.total_cmp(&a.priority_score));

        tracing::debug!(
            target: "classifier",
            total = scored.len(),
            uncategorized = scored.iter().filter(|s| s.classification.is_uncategorized()).count(),
            "batch classified"
        );
        scored
    }
}
