//! Overview numbers for the top of the report.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;

use crate::types::WatchRecord;

/// Totals and span of a watch history.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    /// Records after normalization
    pub total_records: u64,
    /// Records with a usable timestamp
    pub dated_records: u64,
    pub first_watched: Option<DateTime<Utc>>,
    pub last_watched: Option<DateTime<Utc>>,
    /// Whole days between first and last watch, at least 1
    pub days_spanned: u64,
    /// `total_records / days_spanned`
    pub average_per_day: f64,
    /// Hour of day with the most records; earliest hour wins ties
    pub peak_hour: Option<u8>,
    /// Distinct primary entity names
    pub unique_entities: u64,
}

impl SummaryStats {
    /// Compute the summary. `hourly` is the distribution already computed
    /// for the same records.
    pub fn compute(records: &[WatchRecord], hourly: &[u64; 24]) -> Self {
        let mut dated_records = 0u64;
        let mut first: Option<DateTime<Utc>> = None;
        let mut last: Option<DateTime<Utc>> = None;

        for ts in records.iter().filter_map(WatchRecord::watched_at) {
            dated_records += 1;
            first = Some(first.map_or(ts, |current| current.min(ts)));
            last = Some(last.map_or(ts, |current| current.max(ts)));
        }

        let days_spanned = match (first, last) {
            (Some(start), Some(end)) => days_between(start, end),
            _ => 1,
        };

        let total_records = records.len() as u64;
        let average_per_day = total_records as f64 / days_spanned as f64;

        let peak_hour = hourly
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0)
            .max_by(|(ha, a), (hb, b)| a.cmp(b).then(hb.cmp(ha)))
            .map(|(hour, _)| hour as u8);

        let unique_entities = records
            .iter()
            .filter_map(WatchRecord::primary_entity)
            .collect::<HashSet<_>>()
            .len() as u64;

        Self {
            total_records,
            dated_records,
            first_watched: first,
            last_watched: last,
            days_spanned,
            average_per_day,
            peak_hour,
            unique_entities,
        }
    }

    /// Format the peak hour for display (e.g., "2pm-3pm").
    pub fn format_peak_hour(&self) -> Option<String> {
        let hour = self.peak_hour? as u32;
        let next_hour = (hour + 1) % 24;

        let format_hour = |h: u32| -> String {
            match h {
                0 => "12am".to_string(),
                1..=11 => format!("{}am", h),
                12 => "12pm".to_string(),
                _ => format!("{}pm", h - 12),
            }
        };

        Some(format!("{}-{}", format_hour(hour), format_hour(next_hour)))
    }
}

/// Days between two instants, rounded up, never less than 1.
fn days_between(start: DateTime<Utc>, end: DateTime<Utc>) -> u64 {
    const DAY_MS: i64 = 24 * 60 * 60 * 1000;
    let ms = end.signed_duration_since(start).num_milliseconds().max(0);
    let days = (ms + DAY_MS - 1) / DAY_MS;
    days.max(1) as u64
}
