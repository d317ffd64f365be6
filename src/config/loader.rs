use std::{env, str::FromStr};

use super::env::{AppConfig, ConfigError, DirectoryConfig, LoggingConfig, ReportConfig, TrendConfig};
use crate::trends::MAX_WINDOW_DAYS;

pub fn load_config() -> Result<AppConfig, ConfigError> {
    AppConfig::from_env()
}

impl AppConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let directories = DirectoryConfig {
            logs_dir: env::var("LOGS_DIR").unwrap_or_else(|_| "logs".to_string()),
            output_dir: env::var("OUTPUT_DIR").unwrap_or_else(|_| "output".to_string()),
        };

        let logging = LoggingConfig {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        };

        let timezone = env::var("ENGINE_TIMEZONE").unwrap_or_else(|_| "UTC".to_string());

        let trends = TrendConfig {
            window_days: parse_at_most("TREND_WINDOW_DAYS", 30, MAX_WINDOW_DAYS)?,
            keyword_limit: parse_or("TREND_KEYWORD_LIMIT", 20)?,
        };

        let defaults = ReportConfig::default();
        let report = ReportConfig {
            top_articles: parse_or("REPORT_TOP_ARTICLES", defaults.top_articles)?,
            trending_topics: parse_or("REPORT_TRENDING_TOPICS", defaults.trending_topics)?,
            analyst_insights: parse_or("REPORT_ANALYST_INSIGHTS", defaults.analyst_insights)?,
        };

        let ingest_files = env::var("INGEST_FILES")
            .map(|value| split_list(&value))
            .unwrap_or_default();

        Ok(Self {
            directories,
            logging,
            timezone,
            trends,
            report,
            ingest_files,
        })
    }
}

fn parse_or<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { key, value }),
        _ => Ok(default),
    }
}

fn parse_at_most(key: &'static str, default: u32, max: u32) -> Result<u32, ConfigError> {
    let value = parse_or(key, default)?;
    if value > max {
        return Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
        });
    }
    Ok(value)
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(';')
        .map(|part| part.trim().to_string())
        .filter(|part| !part.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_semicolon_lists() {
        assert_eq!(
            split_list(" a.json ; ;b.json;"),
            vec!["a.json".to_string(), "b.json".to_string()]
        );
        assert!(split_list("").is_empty());
    }

    #[test]
    fn parse_or_uses_default_and_rejects_garbage() {
        assert_eq!(parse_or::<u32>("MTE_TEST_UNSET_KEY", 30).unwrap(), 30);

        env::set_var("MTE_TEST_BAD_WINDOW", "thirty");
        assert!(matches!(
            parse_or::<u32>("MTE_TEST_BAD_WINDOW", 30),
            Err(ConfigError::Invalid { key: "MTE_TEST_BAD_WINDOW", .. })
        ));

        env::set_var("MTE_TEST_GOOD_WINDOW", " 14 ");
        assert_eq!(parse_or::<u32>("MTE_TEST_GOOD_WINDOW", 30).unwrap(), 14);
    }

    #[test]
    fn window_above_the_cap_is_rejected() {
        env::set_var("MTE_TEST_HUGE_WINDOW", "200000000");
        assert!(matches!(
            parse_at_most("MTE_TEST_HUGE_WINDOW", 30, MAX_WINDOW_DAYS),
            Err(ConfigError::Invalid { key: "MTE_TEST_HUGE_WINDOW", .. })
        ));

        env::set_var("MTE_TEST_MAX_WINDOW", MAX_WINDOW_DAYS.to_string());
        assert_eq!(
            parse_at_most("MTE_TEST_MAX_WINDOW", 30, MAX_WINDOW_DAYS).unwrap(),
            MAX_WINDOW_DAYS
        );
    }
}
