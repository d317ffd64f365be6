use std::collections::BTreeMap;

use regex::Regex;
use thiserror::Error;
use unicode_segmentation::UnicodeSegmentation;

use crate::domain::{Category, ClassificationResult, MatchCounts};

use super::taxonomy::CategoryDefinition;

#[derive(Debug, Error)]
pub enum TaxonomyError {
    #[error("category {category} has an empty keyword")]
    EmptyKeyword { category: Category },
    #[error("category {category} is declared out of taxonomy order")]
    OutOfOrder { category: Category },
    #[error("keyword `{keyword}` does not compile: {source}")]
    Pattern {
        keyword: String,
        #[source]
        source: regex::Error,
    },
}

#[derive(Debug, Clone)]
struct PatternSet {
    category: Category,
    patterns: Vec<Regex>,
}

impl PatternSet {
    fn count_matches(&self, lowered: &str) -> usize {
        self.patterns
            .iter()
            .map(|pattern| pattern.find_iter(lowered).count())
            .sum()
    }

    fn matches(&self, sentence: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.is_match(sentence))
    }
}

/// Keyword/phrase matcher over a fixed taxonomy.
///
/// Patterns are compiled once in [`PatternCategorizer::new`] and only read
/// afterwards, so one instance can be shared across worker threads.
#[derive(Debug, Clone)]
pub struct PatternCategorizer {
    sets: Vec<PatternSet>,
}

impl PatternCategorizer {
    pub fn new(taxonomy: &[CategoryDefinition]) -> Result<Self, TaxonomyError> {
        let mut sets: Vec<PatternSet> = Vec::with_capacity(taxonomy.len());
        for definition in taxonomy {
            if sets.last().is_some_and(|prev| prev.category >= definition.category) {
                return Err(TaxonomyError::OutOfOrder {
                    category: definition.category,
                });
            }
            let patterns = definition
                .keywords
                .iter()
                .map(|keyword| compile_keyword(definition.category, keyword))
                .collect::<Result<Vec<_>, _>>()?;
            sets.push(PatternSet {
                category: definition.category,
                patterns,
            });
        }
        Ok(Self { sets })
    }

    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.sets.iter().map(|set| set.category)
    }

    pub fn classify(&self, text: &str) -> ClassificationResult {
        let lowered = text.to_lowercase();

        let by_category: BTreeMap<Category, usize> = self
            .sets
            .iter()
            .map(|set| (set.category, set.count_matches(&lowered)))
            .collect();
        let total: usize = by_category.values().sum();

        let category_scores: BTreeMap<Category, f64> = by_category
            .iter()
            .map(|(category, count)| {
                let share = if total > 0 {
                    *count as f64 / total as f64 * 100.0
                } else {
                    0.0
                };
                (*category, share)
            })
            .collect();

        let (primary_category, secondary_category) = self.rank(&category_scores);

        ClassificationResult {
            primary_category,
            secondary_category,
            category_scores,
            match_counts: MatchCounts { by_category, total },
            relevant_sentences: self.relevant_sentences(text),
        }
    }

    /// Highest and second-highest scoring categories. The sort is stable over
    /// taxonomy order, so ties go to the category declared first.
    fn rank(&self, scores: &BTreeMap<Category, f64>) -> (Option<Category>, Option<Category>) {
        let mut ranked: Vec<(Category, f64)> = self
            .sets
            .iter()
            .map(|set| (set.category, scores.get(&set.category).copied().unwrap_or(0.0)))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        let mut positive = ranked.into_iter().filter(|(_, score)| *score > 0.0);
        let primary = positive.next().map(|(category, _)| category);
        let secondary = positive.next().map(|(category, _)| category);
        (primary, secondary)
    }

    fn relevant_sentences(&self, text: &str) -> BTreeMap<Category, Vec<String>> {
        // Segment before lower-casing: sentence boundaries rely on the
        // capital letter that follows a full stop.
        let sentences: Vec<String> = text
            .unicode_sentences()
            .map(|sentence| sentence.trim().to_lowercase())
            .filter(|sentence| !sentence.is_empty())
            .collect();

        self.sets
            .iter()
            .map(|set| {
                let matching = sentences
                    .iter()
                    .filter(|sentence| set.matches(sentence))
                    .cloned()
                    .collect();
                (set.category, matching)
            })
            .collect()
    }
}

fn compile_keyword(category: Category, keyword: &str) -> Result<Regex, TaxonomyError> {
    let keyword = keyword.trim().to_lowercase();
    if keyword.is_empty() {
        return Err(TaxonomyError::EmptyKeyword { category });
    }

    let escaped = regex::escape(&keyword);
    let pattern = if keyword.contains(char::is_whitespace) {
        format!(r"(?i)\b{escaped}\b")
    } else {
        format!(r"(?i)\b{escaped}[a-zA-Z]*\b")
    };
    Regex::new(&pattern).map_err(|source| TaxonomyError::Pattern { keyword, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::taxonomy::TAXONOMY;

    fn categorizer() -> PatternCategorizer {
        PatternCategorizer::new(TAXONOMY).unwrap()
    }

    #[test]
    fn counts_every_occurrence() {
        let result = categorizer().classify("inflation inflation inflation");
        assert_eq!(result.match_counts.get(Category::EconomicIndicators), 3);
        assert_eq!(result.match_counts.total, 3);
        assert_eq!(result.primary_category, Some(Category::EconomicIndicators));
        assert_eq!(result.secondary_category, None);
        assert!((result.score(Category::EconomicIndicators) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn single_words_match_letter_suffixes_only() {
        let c = categorizer();
        assert_eq!(c.classify("Protesters gathered").match_counts.total, 1);
        assert_eq!(c.classify("TARIFFS were raised").match_counts.total, 1);
        assert_eq!(c.classify("protest123 and protest_x").match_counts.total, 0);
        assert_eq!(c.classify("antiprotest").match_counts.total, 0);
    }

    #[test]
    fn phrases_match_exact_sequence() {
        let c = categorizer();
        assert_eq!(c.classify("The Interest Rate moved").match_counts.total, 1);
        assert_eq!(c.classify("interest rates moved").match_counts.total, 0);
        assert_eq!(c.classify("a trade war and a currency war").match_counts.total, 2);
    }

    #[test]
    fn scores_are_relative_shares() {
        let result = categorizer().classify("A tariff dispute, a tariff hike and inflation.");
        assert_eq!(result.match_counts.get(Category::ExternalConflict), 2);
        assert_eq!(result.match_counts.get(Category::EconomicIndicators), 1);
        let sum: f64 = result.category_scores.values().sum();
        assert!((sum - 100.0).abs() < 1e-9);
        assert_eq!(result.primary_category, Some(Category::ExternalConflict));
        assert_eq!(result.secondary_category, Some(Category::EconomicIndicators));
    }

    #[test]
    fn ties_go_to_first_declared_category() {
        let result = categorizer().classify("inflation and a protest and a tariff");
        assert_eq!(result.primary_category, Some(Category::InternalConflict));
        assert_eq!(result.secondary_category, Some(Category::ExternalConflict));
    }

    #[test]
    fn no_matches_is_uncategorized_with_zero_scores() {
        let result = categorizer().classify("");
        assert!(result.is_uncategorized());
        assert_eq!(result.secondary_category, None);
        assert_eq!(result.match_counts.total, 0);
        assert!(result.category_scores.values().all(|score| *score == 0.0));
        assert!(result.relevant_sentences.values().all(Vec::is_empty));
    }

    #[test]
    fn extracts_sentences_once_per_category_in_order() {
        let text = "Inflation rose again. Protests spread in the capital. \
                    The central bank cut the interest rate amid inflation fears.";
        let result = categorizer().classify(text);
        assert_eq!(
            result.sentences(Category::EconomicIndicators),
            &[
                "inflation rose again.".to_string(),
                "the central bank cut the interest rate amid inflation fears.".to_string(),
            ]
        );
        assert_eq!(
            result.sentences(Category::InternalConflict),
            &["protests spread in the capital.".to_string()]
        );
        assert!(result.sentences(Category::ExternalConflict).is_empty());
    }

    #[test]
    fn abbreviations_do_not_end_a_sentence() {
        let result = categorizer().classify("The U.S. economy slowed on weak GDP. Inflation rose.");
        assert_eq!(
            result.sentences(Category::EconomicIndicators),
            &[
                "the u.s. economy slowed on weak gdp.".to_string(),
                "inflation rose.".to_string(),
            ]
        );
    }

    #[test]
    fn classify_is_idempotent() {
        let c = categorizer();
        let text = "Tariff talks stall. Unemployment climbs.";
        assert_eq!(c.classify(text), c.classify(text));
    }

    #[test]
    fn rejects_out_of_order_taxonomy() {
        let reversed = [TAXONOMY[1], TAXONOMY[0]];
        assert!(matches!(
            PatternCategorizer::new(&reversed),
            Err(TaxonomyError::OutOfOrder { .. })
        ));
    }

    #[test]
    fn rejects_empty_keyword() {
        let broken = [CategoryDefinition {
            category: Category::InternalConflict,
            keywords: &["  "],
        }];
        assert!(matches!(
            PatternCategorizer::new(&broken),
            Err(TaxonomyError::EmptyKeyword { .. })
        ));
    }
}
