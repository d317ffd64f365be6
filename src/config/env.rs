use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub directories: DirectoryConfig,
    pub logging: LoggingConfig,
    pub timezone: String,
    pub trends: TrendConfig,
    pub report: ReportConfig,
    pub ingest_files: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    pub logs_dir: String,
    pub output_dir: String,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone)]
pub struct TrendConfig {
    pub window_days: u32,
    pub keyword_limit: usize,
}

#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub top_articles: usize,
    pub trending_topics: usize,
    pub analyst_insights: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_articles: 5,
            trending_topics: 5,
            analyst_insights: 5,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

impl AppConfig {
    /// Configured zone, falling back to UTC when the name is unknown.
    pub fn tz(&self) -> Tz {
        self.timezone.parse().unwrap_or_else(|_| {
            tracing::warn!(target: "config", timezone = %self.timezone, "unknown timezone; using UTC");
            Tz::UTC
        })
    }

    /// Today's calendar date in the configured zone.
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.tz()).date_naive()
    }
}
