//! Watch duration distribution.
//!
//! Exports do not carry a per-video duration, so the shipped
//! [`VolumeModel`] spreads the record count over six duration ranges using
//! a fixed empirical split. Everything it produces is a modeled estimate,
//! and [`DurationEstimate::method`] says so.
//!
//! A source that knows real durations can implement [`DurationModel`] and
//! replace the volume model without touching the other aggregators.

use serde::Serialize;

use crate::types::WatchRecord;

/// Representative length used for the open-ended "1 hr+" range.
pub const OPEN_ENDED_CEILING_SECS: u64 = 7200;

/// One fixed duration range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationCategory {
    pub label: &'static str,
    /// Inclusive lower bound in seconds
    pub min_secs: u64,
    /// Exclusive upper bound in seconds, `None` for the open-ended range
    pub max_secs: Option<u64>,
    /// Share of all records, in percent
    pub share_pct: u64,
}

impl DurationCategory {
    /// Length used when turning a count into seconds.
    ///
    /// Midpoint for bounded ranges, [`OPEN_ENDED_CEILING_SECS`] otherwise.
    pub fn representative_secs(&self) -> u64 {
        match self.max_secs {
            Some(max) => (self.min_secs + max) / 2,
            None => OPEN_ENDED_CEILING_SECS,
        }
    }
}

/// The six ranges, shortest first. Shares sum to 100.
pub const DURATION_CATEGORIES: [DurationCategory; 6] = [
    DurationCategory {
        label: "Under 1 min",
        min_secs: 0,
        max_secs: Some(60),
        share_pct: 15,
    },
    DurationCategory {
        label: "1-5 min",
        min_secs: 60,
        max_secs: Some(300),
        share_pct: 35,
    },
    DurationCategory {
        label: "5-10 min",
        min_secs: 300,
        max_secs: Some(600),
        share_pct: 25,
    },
    DurationCategory {
        label: "10-30 min",
        min_secs: 600,
        max_secs: Some(1800),
        share_pct: 15,
    },
    DurationCategory {
        label: "30 min-1 hr",
        min_secs: 1800,
        max_secs: Some(3600),
        share_pct: 7,
    },
    DurationCategory {
        label: "1 hr+",
        min_secs: 3600,
        max_secs: None,
        share_pct: 3,
    },
];

/// How the durations were obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationMethod {
    /// Modeled from record volume with a fixed split; not observed
    VolumeModel,
    /// Measured from per-record durations
    Measured,
}

/// Records falling into one duration range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DurationBucket {
    pub label: String,
    /// `[min, max]` in seconds; `max` is `null` for the open-ended range
    pub range_seconds: (u64, Option<u64>),
    pub count: u64,
}

/// Duration distribution plus derived totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DurationEstimate {
    pub buckets: Vec<DurationBucket>,
    pub estimated_total_secs: u64,
    pub average_secs: f64,
    pub method: DurationMethod,
}

impl DurationEstimate {
    /// Build an estimate from per-category counts.
    pub fn from_counts(counts: [u64; 6], method: DurationMethod) -> Self {
        let buckets: Vec<DurationBucket> = DURATION_CATEGORIES
            .iter()
            .zip(counts)
            .map(|(category, count)| DurationBucket {
                label: category.label.to_string(),
                range_seconds: (category.min_secs, category.max_secs),
                count,
            })
            .collect();

        let estimated_total_secs: u64 = DURATION_CATEGORIES
            .iter()
            .zip(counts)
            .map(|(category, count)| count * category.representative_secs())
            .sum();

        let total: u64 = counts.iter().sum();
        let average_secs = if total == 0 {
            0.0
        } else {
            estimated_total_secs as f64 / total as f64
        };

        Self {
            buckets,
            estimated_total_secs,
            average_secs,
            method,
        }
    }

    /// Number of records spread across the buckets.
    pub fn total_count(&self) -> u64 {
        self.buckets.iter().map(|b| b.count).sum()
    }

    /// Whether the numbers are modeled rather than observed.
    pub fn is_estimate(&self) -> bool {
        self.method == DurationMethod::VolumeModel
    }
}

/// Source of a duration distribution for a set of records.
pub trait DurationModel: Send + Sync {
    fn estimate(&self, records: &[WatchRecord]) -> DurationEstimate;
}

/// Spreads the record count over [`DURATION_CATEGORIES`] by their shares.
#[derive(Debug, Clone, Copy, Default)]
pub struct VolumeModel;

impl DurationModel for VolumeModel {
    fn estimate(&self, records: &[WatchRecord]) -> DurationEstimate {
        DurationEstimate::from_counts(
            allocate(records.len() as u64),
            DurationMethod::VolumeModel,
        )
    }
}

/// Split `total` over the categories by share.
///
/// Each share is floored. When `total` covers every category, each gets at
/// least 1. The counts are then reconciled so they sum to `total` exactly:
/// a shortfall goes to the largest fractional remainders among categories
/// not raised to 1 (earliest first on ties), and a surplus is taken from
/// the largest category.
pub fn allocate(total: u64) -> [u64; 6] {
    let mut counts = [0u64; 6];
    if total == 0 {
        return counts;
    }

    let mut remainders = [0u64; 6];
    for (i, category) in DURATION_CATEGORIES.iter().enumerate() {
        let scaled = total * category.share_pct;
        counts[i] = scaled / 100;
        remainders[i] = scaled % 100;
    }

    let mut raised = [false; 6];
    if total >= DURATION_CATEGORIES.len() as u64 {
        for (count, raised) in counts.iter_mut().zip(raised.iter_mut()) {
            if *count == 0 {
                *count = 1;
                *raised = true;
            }
        }
    }

    let assigned: u64 = counts.iter().sum();

    if assigned < total {
        let mut order: Vec<usize> = (0..counts.len()).filter(|&i| !raised[i]).collect();
        order.sort_by(|&a, &b| remainders[b].cmp(&remainders[a]));
        for &i in order.iter().cycle().take((total - assigned) as usize) {
            counts[i] += 1;
        }
    } else {
        for _ in 0..(assigned - total) {
            let largest = (0..counts.len())
                .max_by(|&a, &b| counts[a].cmp(&counts[b]).then(b.cmp(&a)))
                .unwrap_or(0);
            counts[largest] -= 1;
        }
    }

    counts
}
