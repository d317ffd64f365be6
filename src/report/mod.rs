//! Structured daily report handed to the summarization collaborator.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    config::ReportConfig,
    domain::{BatchSummary, Category, CategoryCounts, ScoredDocument},
};

/// Classified output of one ingestion batch, already priority-ordered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedStreams {
    pub classified_articles: Vec<ScoredDocument>,
    pub classified_twitter: Vec<ScoredDocument>,
    pub classified_analyst: Vec<ScoredDocument>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    pub total_articles: usize,
    pub category_distribution: CategoryCounts,
    pub average_scores: BTreeMap<Category, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleBrief {
    pub title: String,
    pub source: String,
    pub priority_score: f64,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingTopic {
    pub sentence: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    pub article_title: String,
    pub source: String,
    pub priority_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalystInsight {
    pub title: String,
    pub content: String,
    pub analyst: Option<String>,
    pub priority_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyReport {
    pub date: NaiveDate,
    pub summary_statistics: SummaryStatistics,
    pub top_articles: BTreeMap<Category, Vec<ArticleBrief>>,
    pub trending_topics: Vec<TrendingTopic>,
    pub analyst_insights: Vec<AnalystInsight>,
}

/// Highest-priority documents whose primary category is `category`.
pub fn top_documents_by_category(
    documents: &[ScoredDocument],
    category: Category,
    limit: usize,
) -> Vec<&ScoredDocument> {
    let mut matching: Vec<&ScoredDocument> = documents
        .iter()
        .filter(|scored| scored.primary_category() == Some(category))
        .collect();
    matching.sort_by(|a, b| b.priority_score.total_cmp(&a.priority_score));
    matching.truncate(limit);
    matching
}

/// Relevant sentences ranked by the priority of the document they came from.
///
/// With a category, only that category's sentences of documents filed under
/// it are used; without one, every sentence of every document is a candidate.
pub fn trending_topics(
    documents: &[ScoredDocument],
    category: Option<Category>,
    limit: usize,
) -> Vec<TrendingTopic> {
    let mut topics: Vec<TrendingTopic> = Vec::new();
    for scored in documents {
        let sentences = scored.classification.relevant_sentences.iter();
        for (sentence_category, sentences) in sentences {
            let wanted = match category {
                Some(filter) => filter == *sentence_category && scored.primary_category() == Some(filter),
                None => true,
            };
            if !wanted {
                continue;
            }
            topics.extend(sentences.iter().map(|sentence| TrendingTopic {
                sentence: sentence.clone(),
                category: category.is_none().then_some(*sentence_category),
                article_title: scored.document.title.clone(),
                source: scored.document.source.clone(),
                priority_score: scored.priority_score,
            }));
        }
    }
    topics.sort_by(|a, b| b.priority_score.total_cmp(&a.priority_score));
    topics.truncate(limit);
    topics
}

pub fn build_daily_report(
    streams: &ClassifiedStreams,
    article_summary: &BatchSummary,
    config: &ReportConfig,
    date: NaiveDate,
) -> DailyReport {
    let top_articles = Category::ALL
        .into_iter()
        .map(|category| {
            let briefs = top_documents_by_category(&streams.classified_articles, category, config.top_articles)
                .into_iter()
                .map(|scored| ArticleBrief {
                    title: scored.document.title.clone(),
                    source: scored.document.source.clone(),
                    priority_score: scored.priority_score,
                    url: scored.document.url.clone(),
                })
                .collect();
            (category, briefs)
        })
        .collect();

    let analyst_insights = streams
        .classified_analyst
        .iter()
        .take(config.analyst_insights)
        .map(|scored| AnalystInsight {
            title: scored.document.title.clone(),
            content: scored.document.content.clone(),
            analyst: scored.document.author.clone(),
            priority_score: scored.priority_score,
        })
        .collect();

    DailyReport {
        date,
        summary_statistics: SummaryStatistics {
            total_articles: article_summary.total_articles,
            category_distribution: article_summary.category_counts.clone(),
            average_scores: article_summary.average_scores.clone(),
        },
        top_articles,
        trending_topics: trending_topics(&streams.classified_articles, None, config.trending_topics),
        analyst_insights,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::{
        classifier::{summarize, Classifier, PatternCategorizer, TAXONOMY},
        domain::Document,
        scoring::PriorityScorer,
    };

    fn classifier() -> Classifier {
        let now = Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap();
        Classifier::with_parts(PatternCategorizer::new(TAXONOMY).unwrap(), PriorityScorer::at(now))
    }

    fn streams() -> ClassifiedStreams {
        let classifier = classifier();
        let mut analyst = Document::new("Rates outlook", "The central bank will hold.", "Analyst Desk");
        analyst.author = Some("J. Doe".to_string());
        ClassifiedStreams {
            classified_articles: classifier.classify_batch(&[
                Document::new("Tariff fight", "A new tariff hits China. Trade war fears grow.", "Reuters"),
                Document::new("Capital unrest", "Protests spread.", "Some Blog"),
                Document::new("Tariff note", "Tariff talk.", "Some Blog"),
                Document::new("Nothing", "Weather was mild.", "Some Blog"),
            ]),
            classified_twitter: Vec::new(),
            classified_analyst: classifier.classify_batch(&[analyst]),
        }
    }

    #[test]
    fn top_documents_filter_and_rank() {
        let streams = streams();
        let top = top_documents_by_category(&streams.classified_articles, Category::ExternalConflict, 5);
        let titles: Vec<&str> = top.iter().map(|s| s.document.title.as_str()).collect();
        assert_eq!(titles, vec!["Tariff fight", "Tariff note"]);

        let limited = top_documents_by_category(&streams.classified_articles, Category::ExternalConflict, 1);
        assert_eq!(limited.len(), 1);
    }

    #[test]
    fn trending_topics_rank_sentences_by_priority() {
        let streams = streams();
        let all = trending_topics(&streams.classified_articles, None, 10);
        assert_eq!(all[0].article_title, "Tariff fight");
        assert!(all.iter().all(|t| t.category.is_some()));
        assert!(all.windows(2).all(|w| w[0].priority_score >= w[1].priority_score));

        let internal = trending_topics(&streams.classified_articles, Some(Category::InternalConflict), 10);
        assert_eq!(internal.len(), 1);
        assert_eq!(internal[0].sentence, "capital unrest protests spread.");
        assert_eq!(internal[0].category, None);
    }

    #[test]
    fn daily_report_collects_sections() {
        let streams = streams();
        let summary = summarize(&streams.classified_articles);
        let date = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        let report = build_daily_report(&streams, &summary, &ReportConfig::default(), date);

        assert_eq!(report.date, date);
        assert_eq!(report.summary_statistics.total_articles, 4);
        assert_eq!(report.summary_statistics.category_distribution.get(None), 1);
        assert_eq!(report.top_articles[&Category::ExternalConflict].len(), 2);
        assert!(report.top_articles[&Category::EconomicIndicators].is_empty());
        assert_eq!(report.analyst_insights.len(), 1);
        assert_eq!(report.analyst_insights[0].analyst.as_deref(), Some("J. Doe"));

        let json = serde_json::to_value(&report).unwrap();
        assert!(json["top_articles"]["external_conflict"].is_array());
        assert_eq!(json["summary_statistics"]["category_distribution"]["uncategorized"], 1);
    }
}
