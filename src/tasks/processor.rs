use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::{
    classifier::{summarize, Classifier},
    config::AppConfig,
    domain::{BatchSummary, IngestedBatch, TrendReport},
    infrastructure::{directories::ResolvedPaths, shutdown::StopListener},
    report::{build_daily_report, ClassifiedStreams, DailyReport},
    trends::TrendAggregator,
};

#[derive(Debug, Clone, Serialize)]
pub struct StreamSummaries {
    pub articles: BatchSummary,
    pub twitter: BatchSummary,
    pub analyst: BatchSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassificationMetadata {
    pub classification_time: DateTime<Utc>,
    pub source_file: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassificationOutput {
    #[serde(flatten)]
    pub streams: ClassifiedStreams,
    pub summaries: StreamSummaries,
    pub metadata: ClassificationMetadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendAnalysis {
    #[serde(flatten)]
    pub report: TrendReport,
    pub timestamp: DateTime<Utc>,
}

/// Files written for one processed batch.
#[derive(Debug, Clone)]
pub struct ProcessingOutcome {
    pub documents: usize,
    pub high_priority: usize,
    pub classification_path: PathBuf,
    pub trends_path: PathBuf,
    pub report_path: PathBuf,
}

pub struct BatchProcessor {
    classifier: Arc<Classifier>,
    trends: TrendAggregator,
    config: Arc<AppConfig>,
    paths: ResolvedPaths,
}

impl BatchProcessor {
    pub fn new(classifier: Arc<Classifier>, config: Arc<AppConfig>, paths: ResolvedPaths) -> Self {
        Self {
            classifier,
            trends: TrendAggregator::new(config.trends.keyword_limit),
            config,
            paths,
        }
    }

    /// Processes files in order until done or stopped. A failing file is
    /// logged and skipped.
    pub async fn run(&self, files: &[String], stop: &mut StopListener) -> Vec<ProcessingOutcome> {
        let mut outcomes = Vec::with_capacity(files.len());
        for file in files {
            if stop.is_stopped() {
                tracing::info!(target: "processor", remaining = files.len() - outcomes.len(), "stop requested; skipping remaining files");
                break;
            }

            let result = tokio::select! {
                res = self.process_file(Path::new(file)) => res,
                _ = stop.stopped() => {
                    tracing::info!(target: "processor", file = %file, "stop requested while processing; abandoning file");
                    break;
                }
            };

            match result {
                Ok(outcome) => {
                    tracing::info!(
                        target: "processor",
                        file = %file,
                        documents = outcome.documents,
                        high_priority = outcome.high_priority,
                        report = %outcome.report_path.display(),
                        "batch processed"
                    );
                    outcomes.push(outcome);
                }
                Err(err) => {
                    tracing::error!(target: "processor", file = %file, error = %format!("{err:#}"), "failed to process batch");
                }
            }
        }
        outcomes
    }

    pub async fn process_file(&self, path: &Path) -> Result<ProcessingOutcome> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;
        let batch = IngestedBatch::from_json(&raw)
            .with_context(|| format!("invalid ingestion batch {}", path.display()))?;
        tracing::info!(
            target: "processor",
            file = %path.display(),
            articles = batch.articles.len(),
            twitter = batch.twitter_commentary.len(),
            analyst = batch.analyst_commentary.len(),
            "classifying batch"
        );

        let streams = self.classify_streams(batch).await?;
        let now = Utc::now();
        let today = self.config.today();

        let summaries = StreamSummaries {
            articles: summarize(&streams.classified_articles),
            twitter: summarize(&streams.classified_twitter),
            analyst: summarize(&streams.classified_analyst),
        };
        let trends = self.trends.aggregate(
            &streams.classified_articles,
            self.config.trends.window_days,
            today,
        );
        let report = build_daily_report(&streams, &summaries.articles, &self.config.report, today);

        let documents = streams.classified_articles.len()
            + streams.classified_twitter.len()
            + streams.classified_analyst.len();
        let high_priority = summaries.articles.high_priority_articles.len()
            + summaries.twitter.high_priority_articles.len()
            + summaries.analyst.high_priority_articles.len();

        let stamp = now.with_timezone(&self.config.tz()).format("%Y%m%d_%H%M%S").to_string();
        let output = ClassificationOutput {
            streams,
            summaries,
            metadata: ClassificationMetadata {
                classification_time: now,
                source_file: path.display().to_string(),
            },
        };

        let classification_path = self
            .write_json(&format!("classification_results_{stamp}.json"), &output)
            .await?;
        let trends_path = self
            .write_json(
                &format!("trend_analysis_{stamp}.json"),
                &TrendAnalysis {
                    report: trends,
                    timestamp: now,
                },
            )
            .await?;
        let report_path = self.write_report(&report, today).await?;

        Ok(ProcessingOutcome {
            documents,
            high_priority,
            classification_path,
            trends_path,
            report_path,
        })
    }

    async fn classify_streams(&self, batch: IngestedBatch) -> Result<ClassifiedStreams> {
        let classifier = self.classifier.clone();
        let streams = tokio::task::spawn_blocking(move || ClassifiedStreams {
            classified_articles: classifier.classify_batch(&batch.articles),
            classified_twitter: classifier.classify_batch(&batch.twitter_commentary),
            classified_analyst: classifier.classify_batch(&batch.analyst_commentary),
        })
        .await
        .context("classification worker failed")?;
        Ok(streams)
    }

    async fn write_report(&self, report: &DailyReport, today: NaiveDate) -> Result<PathBuf> {
        self.write_json(&format!("daily_report_{}.json", today.format("%Y%m%d")), report)
            .await
    }

    async fn write_json<T: Serialize>(&self, name: &str, value: &T) -> Result<PathBuf> {
        let path = self.paths.output_file(name);
        let body = serde_json::to_vec_pretty(value)?;
        tokio::fs::write(&path, body)
            .await
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::debug!(target: "processor", path = %path.display(), "output written");
        Ok(path)
    }
}
