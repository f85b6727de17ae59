//! Analytics module for watchlens
//!
//! Turns normalized watch records into the aggregate views of the report:
//! - Keyword frequency (word cloud)
//! - Monthly and hourly distributions
//! - Top channels
//! - Duration distribution (modeled)
//! - Summary totals
//!
//! Every aggregator is a pure function of the record slice. Nothing is
//! cached between calls, so the same input always yields the same output
//! and the aggregators can run in any order or on separate threads.
//!
//! ## Usage
//!
//! ```rust
//! use watchlens_core::analytics::{compute_watch_analytics, AnalyticsOptions};
//! use watchlens_core::WatchRecord;
//!
//! let records = vec![
//!     WatchRecord::new("Watched Rust in 100 Seconds")
//!         .with_time("2024-03-15T14:22:31.123Z")
//!         .with_entity("Fireship"),
//! ];
//! let analytics = compute_watch_analytics(&records, &AnalyticsOptions::default());
//! assert_eq!(analytics.hourly[14].count, 1);
//! assert_eq!(analytics.top_entities[0].name, "Fireship");
//! ```

pub mod duration;
pub mod entities;
pub mod keywords;
pub mod summary;
pub mod temporal;

pub use duration::{
    DurationBucket, DurationCategory, DurationEstimate, DurationMethod, DurationModel,
    VolumeModel, DURATION_CATEGORIES,
};
pub use entities::{top_entities, EntityRank, DEFAULT_TOP_ENTITIES};
pub use keywords::{
    keyword_frequency, KeywordCount, StopWords, DEFAULT_KEYWORD_THRESHOLD, DEFAULT_MAX_KEYWORDS,
};
pub use summary::SummaryStats;
pub use temporal::{hourly_buckets, monthly_buckets, HourBucket, MonthBucket};

use serde::Serialize;

use crate::error::Result;
use crate::ingest::normalize_export;
use crate::types::{TimeZonePolicy, WatchRecord};

/// Tunables for [`compute_watch_analytics`].
#[derive(Debug, Clone)]
pub struct AnalyticsOptions {
    /// Keywords must appear in more than this many titles
    pub keyword_threshold: u32,
    /// Number of keywords to keep
    pub max_keywords: usize,
    /// Number of channels to keep
    pub top_entities: usize,
    /// Tokens never counted as keywords
    pub stop_words: StopWords,
    /// Zone for monthly/hourly bucketing
    pub timezone: TimeZonePolicy,
}

impl Default for AnalyticsOptions {
    fn default() -> Self {
        Self {
            keyword_threshold: DEFAULT_KEYWORD_THRESHOLD,
            max_keywords: DEFAULT_MAX_KEYWORDS,
            top_entities: DEFAULT_TOP_ENTITIES,
            stop_words: StopWords::builtin(),
            timezone: TimeZonePolicy::Utc,
        }
    }
}

/// Complete analytics for one watch history.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchAnalytics {
    pub summary: SummaryStats,
    pub keywords: Vec<KeywordCount>,
    pub monthly: Vec<MonthBucket>,
    /// Exactly 24 entries, hour 0 first
    pub hourly: Vec<HourBucket>,
    pub top_entities: Vec<EntityRank>,
    pub duration_buckets: Vec<DurationBucket>,
    /// Modeled average video length in seconds
    pub average_duration: f64,
    pub duration: DurationEstimate,
}

impl WatchAnalytics {
    /// Normalize a parsed export and run the pipeline.
    ///
    /// Fails only if `value` is not an array.
    pub fn from_json(value: &serde_json::Value, options: &AnalyticsOptions) -> Result<Self> {
        let records = normalize_export(value)?;
        Ok(compute_watch_analytics(&records, options))
    }

    /// Value of the top keyword, 0 when there are none.
    pub fn top_keyword_value(&self) -> u32 {
        self.keywords.first().map(|k| k.value).unwrap_or(0)
    }
}

/// Run every aggregator over `records` with the default duration model.
pub fn compute_watch_analytics(
    records: &[WatchRecord],
    options: &AnalyticsOptions,
) -> WatchAnalytics {
    compute_with_model(records, options, &VolumeModel)
}

/// Run every aggregator, taking durations from `model`.
pub fn compute_with_model(
    records: &[WatchRecord],
    options: &AnalyticsOptions,
    model: &dyn DurationModel,
) -> WatchAnalytics {
    tracing::debug!(
        records = records.len(),
        timezone = %options.timezone,
        "Computing watch analytics"
    );

    let keywords = keyword_frequency(
        records,
        &options.stop_words,
        options.keyword_threshold,
        options.max_keywords,
    )
    .collect();

    let hourly_counts = temporal::hourly_distribution(records, options.timezone);
    let summary = SummaryStats::compute(records, &hourly_counts);
    let duration = model.estimate(records);

    WatchAnalytics {
        summary,
        keywords,
        monthly: monthly_buckets(records, options.timezone),
        hourly: hourly_buckets(records, options.timezone),
        top_entities: top_entities(records, options.top_entities),
        duration_buckets: duration.buckets.clone(),
        average_duration: duration.average_secs,
        duration,
    }
}
