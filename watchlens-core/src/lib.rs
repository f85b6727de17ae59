//! # watchlens-core
//!
//! Core library for watchlens - analytics over a watch-history export.
//!
//! This library provides:
//! - Domain types for watch records
//! - Export discovery, loading and normalization
//! - The analytics pipeline (keywords, months, hours, channels, durations)
//! - Configuration management
//! - Logging infrastructure
//!
//! ## Architecture
//!
//! Data flows through three layers:
//! - **Raw:** the export file as produced by the takeout tool (untouched)
//! - **Normalized:** [`WatchRecord`]s with a guaranteed title
//! - **Derived:** [`WatchAnalytics`], recomputed on every call
//!
//! ## Example
//!
//! ```rust,no_run
//! use watchlens_core::{analytics, ingest, Config};
//! use std::path::Path;
//!
//! let config = Config::load().expect("failed to load config");
//! let records = ingest::load_export(Path::new("watch-history.json")).expect("failed to load");
//! let report = analytics::compute_watch_analytics(&records, &config.analytics.options());
//! println!("{} videos watched", report.summary.total_records);
//! ```

// Re-export commonly used items at the crate root
pub use analytics::{compute_watch_analytics, AnalyticsOptions, WatchAnalytics};
pub use config::Config;
pub use error::{Error, Result};
pub use types::*;

// Public modules
pub mod analytics;
pub mod config;
pub mod error;
pub mod format;
pub mod ingest;
pub mod logging;
pub mod types;
