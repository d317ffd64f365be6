use chrono::{Days, NaiveDate};

use crate::domain::{dates::published_date, Category, DailyCount, ScoredDocument, TimeSeries};

/// Longest window the engine buckets, roughly ten years.
pub const MAX_WINDOW_DAYS: u32 = 3650;

/// Inclusive day range `[today - window_days, today]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl TrendWindow {
    /// Window ending on `today`. Lengths above [`MAX_WINDOW_DAYS`] are capped
    /// and the start never goes before the earliest representable date.
    pub fn ending(today: NaiveDate, window_days: u32) -> Self {
        let days = window_days.min(MAX_WINDOW_DAYS);
        if days < window_days {
            tracing::warn!(target: "trends", requested = window_days, used = days, "trend window capped");
        }
        Self {
            start: today
                .checked_sub_days(Days::new(u64::from(days)))
                .unwrap_or(NaiveDate::MIN),
            end: today,
        }
    }

    pub fn day_count(&self) -> usize {
        (self.end - self.start).num_days() as usize + 1
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.start.iter_days().take(self.day_count()).collect()
    }

    pub fn slot(&self, date: NaiveDate) -> Option<usize> {
        if date < self.start || date > self.end {
            return None;
        }
        Some((date - self.start).num_days() as usize)
    }
}

/// Buckets documents by publication day and primary category.
///
/// Documents without a parseable date, or dated outside the window, are left
/// out of the series.
pub fn build_time_series(documents: &[ScoredDocument], window: TrendWindow) -> TimeSeries {
    let len = window.day_count();
    let mut series = TimeSeries {
        dates: window.dates(),
        by_category: Category::ALL.into_iter().map(|c| (c, vec![0; len])).collect(),
        total: vec![0; len],
    };

    let mut skipped = 0usize;
    for scored in documents {
        let slot = scored
            .document
            .published_at
            .as_deref()
            .and_then(published_date)
            .and_then(|date| window.slot(date));
        let Some(slot) = slot else {
            skipped += 1;
            continue;
        };

        if let Some(category) = scored.primary_category() {
            if let Some(counts) = series.by_category.get_mut(&category) {
                counts[slot] += 1;
            }
        }
        series.total[slot] += 1;
    }

    if skipped > 0 {
        tracing::debug!(
            target: "trends",
            skipped,
            start = %window.start,
            end = %window.end,
            "documents outside the trend window or undated"
        );
    }
    series
}

pub fn daily_counts(series: &TimeSeries, category: Category) -> Vec<DailyCount> {
    let counts = series.by_category.get(&category);
    series
        .dates
        .iter()
        .enumerate()
        .map(|(slot, date)| DailyCount {
            date: *date,
            count: counts.and_then(|c| c.get(slot)).copied().unwrap_or(0),
        })
        .collect()
}
