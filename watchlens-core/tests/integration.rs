//! Integration tests for the watchlens ingestion and analytics pipeline
//!
//! These tests use fixture files in `tests/fixtures/` to verify the
//! end-to-end flow from a takeout export on disk to the final analytics.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use watchlens_core::analytics::{compute_watch_analytics, AnalyticsOptions, WatchAnalytics};
use watchlens_core::ingest::{self, EXPORT_FILE_NAME};
use watchlens_core::{Error, TimeZonePolicy, WatchRecord};

/// Get the path to a fixture file
fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn takeout_records() -> Vec<WatchRecord> {
    let exports =
        ingest::discover_exports(&fixture_path("takeout")).expect("discovery should succeed");
    ingest::load_exports(&exports).expect("load should succeed")
}

fn takeout_analytics(options: &AnalyticsOptions) -> WatchAnalytics {
    compute_watch_analytics(&takeout_records(), options)
}

const WORDS: &[&str] = &[
    "rust", "tokio", "async", "the", "video", "2024", "cats", "go", "borrow", "checker",
    "official", "traits", "macros", "serde", "a", "compiler",
];

fn generated_history(seed: u64, len: usize) -> Vec<WatchRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len)
        .map(|_| {
            let words = rng.gen_range(1..=6);
            let title: Vec<&str> = (0..words)
                .map(|_| WORDS[rng.gen_range(0..WORDS.len())])
                .collect();
            let mut record = WatchRecord::new(format!("Watched {}", title.join(" ")));
            if rng.gen_bool(0.75) {
                record = record.with_time(format!(
                    "{}-{:02}-{:02}T{:02}:{:02}:00Z",
                    rng.gen_range(2020..=2024),
                    rng.gen_range(1..=12),
                    rng.gen_range(1..=28),
                    rng.gen_range(0..24),
                    rng.gen_range(0..60)
                ));
            }
            if rng.gen_bool(0.8) {
                record = record.with_entity(format!("Channel {}", rng.gen_range(0..40)));
            }
            record
        })
        .collect()
}

// ============================================
// Ingestion
// ============================================

#[test]
fn test_discover_and_load_takeout() {
    let exports = ingest::discover_exports(&fixture_path("takeout")).unwrap();
    assert_eq!(exports.len(), 1);
    assert!(exports[0].ends_with(EXPORT_FILE_NAME));

    let records = takeout_records();
    // 9 entries, one without a title
    assert_eq!(records.len(), 8);
    assert!(records.iter().all(|r| !r.title.is_empty()));
}

#[test]
fn test_load_rejects_non_array_export() {
    let err = ingest::load_export(&fixture_path("not-an-array.json")).unwrap_err();
    match err {
        Error::InvalidShape { expected, found } => {
            assert_eq!(expected, "array of watch-history entries");
            assert_eq!(found, "object");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_empty_export() {
    let records = ingest::load_export(&fixture_path("empty.json")).unwrap();
    let analytics = compute_watch_analytics(&records, &AnalyticsOptions::default());

    assert_eq!(analytics.summary.total_records, 0);
    assert!(analytics.keywords.is_empty());
    assert_eq!(analytics.hourly.len(), 24);
    assert!(analytics.top_entities.is_empty());
    assert!(analytics.duration_buckets.iter().all(|b| b.count == 0));
    assert_eq!(analytics.average_duration, 0.0);
}

// ============================================
// Analytics over the fixture
// ============================================

#[test]
fn test_takeout_keywords() {
    let analytics = takeout_analytics(&AnalyticsOptions::default());
    let keywords: Vec<_> = analytics
        .keywords
        .iter()
        .map(|k| (k.text.as_str(), k.value))
        .collect();
    assert_eq!(keywords, vec![("rust", 5), ("async", 3)]);
}

#[test]
fn test_takeout_monthly_utc() {
    let analytics = takeout_analytics(&AnalyticsOptions::default());
    let months: Vec<_> = analytics
        .monthly
        .iter()
        .map(|m| (m.label.as_str(), m.count))
        .collect();
    assert_eq!(
        months,
        vec![("Dec 2023", 1), ("Jan 2024", 2), ("Feb 2024", 3)]
    );
}

#[test]
fn test_takeout_monthly_with_offset() {
    let options = AnalyticsOptions {
        timezone: "+01:00".parse::<TimeZonePolicy>().unwrap(),
        ..Default::default()
    };
    let analytics = takeout_analytics(&options);
    let months: Vec<_> = analytics
        .monthly
        .iter()
        .map(|m| (m.label.as_str(), m.count))
        .collect();
    assert_eq!(months, vec![("Jan 2024", 3), ("Feb 2024", 3)]);
}

#[test]
fn test_takeout_hourly_and_summary() {
    let analytics = takeout_analytics(&AnalyticsOptions::default());

    assert_eq!(analytics.hourly[14].count, 3);
    assert_eq!(analytics.hourly[21].count, 1);
    assert_eq!(analytics.hourly[9].count, 1);
    assert_eq!(analytics.hourly[23].count, 1);
    assert_eq!(analytics.hourly.iter().map(|h| h.count).sum::<u64>(), 6);

    let summary = &analytics.summary;
    assert_eq!(summary.total_records, 8);
    assert_eq!(summary.dated_records, 6);
    assert_eq!(summary.days_spanned, 51);
    assert_eq!(summary.peak_hour, Some(14));
    assert_eq!(summary.unique_entities, 4);
    assert!((summary.average_per_day - 8.0 / 51.0).abs() < 1e-9);
}

#[test]
fn test_takeout_top_entities() {
    let analytics = takeout_analytics(&AnalyticsOptions::default());
    let names: Vec<_> = analytics
        .top_entities
        .iter()
        .map(|e| (e.name.as_str(), e.count))
        .collect();
    assert_eq!(
        names,
        vec![
            ("Let's Get Rusty", 2),
            ("Jon Gjengset", 2),
            ("No Boilerplate", 2),
            ("Babish Culinary Universe", 1),
        ]
    );
}

#[test]
fn test_takeout_duration_estimate() {
    let analytics = takeout_analytics(&AnalyticsOptions::default());
    let counts: Vec<_> = analytics.duration_buckets.iter().map(|b| b.count).collect();
    assert_eq!(counts, vec![1, 2, 2, 1, 1, 1]);
    assert!(analytics.duration.is_estimate());
    // 30 + 2*180 + 2*450 + 1200 + 2700 + 7200 = 12390 over 8 records
    assert_eq!(analytics.duration.estimated_total_secs, 12_390);
    assert!((analytics.average_duration - 12_390.0 / 8.0).abs() < 1e-9);
}

// ============================================
// Scenarios
// ============================================

#[test]
fn test_hour_fourteen_scenario() {
    let mut records: Vec<_> = (0..5)
        .map(|i| {
            WatchRecord::new("Watched clip").with_time(format!("2024-06-1{}T14:30:00Z", i))
        })
        .collect();
    records.extend((0..5).map(|_| WatchRecord::new("Watched clip")));

    let analytics = compute_watch_analytics(&records, &AnalyticsOptions::default());
    assert_eq!(analytics.hourly[14].count, 5);
    assert_eq!(analytics.hourly.iter().map(|h| h.count).sum::<u64>(), 5);
    assert_eq!(analytics.summary.total_records, 10);
}

#[test]
fn test_sixteen_entities_scenario() {
    let records: Vec<_> = (0..16)
        .map(|i| WatchRecord::new("Watched clip").with_entity(format!("Creator {}", i)))
        .collect();

    let analytics = compute_watch_analytics(&records, &AnalyticsOptions::default());
    assert_eq!(analytics.top_entities.len(), 15);
    assert!(analytics.top_entities.iter().all(|e| e.count == 1));
    assert!(!analytics.top_entities.iter().any(|e| e.name == "Creator 15"));
}

// ============================================
// Properties over generated histories
// ============================================

#[test]
fn test_properties_hold_for_generated_histories() {
    let options = AnalyticsOptions::default();

    for seed in 0..25u64 {
        let len = (seed * 37 % 400) as usize;
        let records = generated_history(seed, len);
        let analytics = compute_watch_analytics(&records, &options);

        // Duration buckets account for every record
        let bucketed: u64 = analytics.duration_buckets.iter().map(|b| b.count).sum();
        assert_eq!(bucketed, records.len() as u64, "seed {}", seed);
        if records.len() >= 6 {
            assert!(analytics.duration_buckets.iter().all(|b| b.count >= 1));
        }

        // Hourly is always 24 ordered buckets
        assert_eq!(analytics.hourly.len(), 24);
        for (i, bucket) in analytics.hourly.iter().enumerate() {
            assert_eq!(bucket.hour as usize, i);
        }

        // Keywords are ranked and filtered
        for pair in analytics.keywords.windows(2) {
            assert!(pair[0].value >= pair[1].value, "seed {}", seed);
        }
        for keyword in &analytics.keywords {
            assert!(keyword.value > options.keyword_threshold);
            assert!(keyword.text.chars().count() > 2);
            assert!(!keyword.text.chars().all(|c| c.is_ascii_digit()));
            assert!(!options.stop_words.contains(&keyword.text));
        }

        // Entities are ranked and truncated
        assert!(analytics.top_entities.len() <= 15);
        for pair in analytics.top_entities.windows(2) {
            assert!(pair[0].count >= pair[1].count);
        }
        let with_entity = records.iter().filter(|r| r.primary_entity().is_some()).count() as u64;
        assert!(analytics.top_entities.iter().map(|e| e.count).sum::<u64>() <= with_entity);

        // Months are chronological
        for pair in analytics.monthly.windows(2) {
            assert!((pair[0].year, pair[0].month) < (pair[1].year, pair[1].month));
        }
        let dated = records.iter().filter(|r| r.watched_at().is_some()).count() as u64;
        assert_eq!(analytics.monthly.iter().map(|m| m.count).sum::<u64>(), dated);

        // Idempotence
        assert_eq!(analytics, compute_watch_analytics(&records, &options));
    }
}

#[test]
fn test_json_output_round_trips_through_serde() {
    let analytics = takeout_analytics(&AnalyticsOptions::default());
    let json = serde_json::to_string(&analytics).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["hourly"].as_array().unwrap().len(), 24);
    assert_eq!(value["keywords"][0]["text"], "rust");
    assert_eq!(value["monthly"][0]["label"], "Dec 2023");
    assert_eq!(value["durationBuckets"][5]["label"], "1 hr+");
    assert_eq!(value["summary"]["firstWatched"], "2023-12-31T23:59:59Z");
}
