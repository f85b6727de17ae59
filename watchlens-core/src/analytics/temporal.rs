//! Monthly and hourly watch distributions.

use chrono::{Datelike, NaiveDate, Timelike};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::types::{TimeZonePolicy, WatchRecord};

/// Records watched in one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthBucket {
    /// e.g. "Jan 2024"
    pub label: String,
    pub year: i32,
    /// 1-12
    pub month: u32,
    pub count: u64,
}

/// Records watched during one hour of the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourBucket {
    /// 0-23
    pub hour: u8,
    /// e.g. "14:00"
    pub label: String,
    pub count: u64,
}

/// Count records per calendar month, oldest month first.
///
/// Records without a usable timestamp are skipped.
pub fn monthly_buckets(records: &[WatchRecord], tz: TimeZonePolicy) -> Vec<MonthBucket> {
    // (year, month) keys sort chronologically, not by label.
    let mut months: BTreeMap<(i32, u32), u64> = BTreeMap::new();

    for ts in records.iter().filter_map(WatchRecord::watched_at) {
        let civil = tz.civil(ts);
        *months.entry((civil.year(), civil.month())).or_insert(0) += 1;
    }

    months
        .into_iter()
        .map(|((year, month), count)| MonthBucket {
            label: month_label(year, month),
            year,
            month,
            count,
        })
        .collect()
}

/// Raw per-hour counts, index = hour of day.
pub fn hourly_distribution(records: &[WatchRecord], tz: TimeZonePolicy) -> [u64; 24] {
    let mut hours = [0u64; 24];
    for ts in records.iter().filter_map(WatchRecord::watched_at) {
        hours[tz.civil(ts).hour() as usize] += 1;
    }
    hours
}

/// Count records per hour of day. Always returns 24 buckets, hour 0 first.
pub fn hourly_buckets(records: &[WatchRecord], tz: TimeZonePolicy) -> Vec<HourBucket> {
    hourly_distribution(records, tz)
        .iter()
        .enumerate()
        .map(|(hour, &count)| HourBucket {
            hour: hour as u8,
            label: format!("{}:00", hour),
            count,
        })
        .collect()
}

fn month_label(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|date| date.format("%b %Y").to_string())
        .unwrap_or_else(|| format!("{:02} {}", month, year))
}
