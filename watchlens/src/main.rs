//! watchlens - Watch History Analytics CLI
//!
//! Summarize a takeout watch-history export: keywords, months, hours,
//! channels and an estimated duration breakdown.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use std::path::PathBuf;
use watchlens_core::analytics::{compute_watch_analytics, WatchAnalytics};
use watchlens_core::format::{bar, format_count, format_duration_secs};
use watchlens_core::{ingest, Config, TimeZonePolicy};

const BAR_WIDTH: usize = 30;

#[derive(Parser, Debug)]
#[command(name = "watchlens")]
#[command(about = "Watch history analytics for takeout exports")]
#[command(version)]
struct Args {
    /// Export files or unpacked takeout directories
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Export format (md = markdown, json = JSON)
    #[arg(long)]
    export: Option<String>,

    /// Zone for months and hours: utc, local or an offset like +05:30
    #[arg(long)]
    timezone: Option<String>,

    /// Number of channels to rank
    #[arg(long)]
    top_entities: Option<usize>,

    /// Number of keywords to show in the report
    #[arg(long, default_value_t = 20)]
    keywords: usize,

    /// Use this config file instead of the default one
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => Config::load().context("failed to load configuration")?,
    };
    let _log_guard = watchlens_core::logging::init(&config.logging).ok();

    let mut options = config.analytics.options();
    if let Some(tz) = &args.timezone {
        options.timezone = tz.parse::<TimeZonePolicy>()?;
    }
    if let Some(top) = args.top_entities {
        if top == 0 {
            anyhow::bail!("--top-entities must be at least 1");
        }
        options.top_entities = top;
    }

    let mut records = Vec::new();
    for path in &args.paths {
        let exports = ingest::discover_exports(path)
            .with_context(|| format!("failed to find exports in {}", path.display()))?;
        let loaded = ingest::load_exports(&exports)
            .with_context(|| format!("failed to load exports from {}", path.display()))?;
        records.extend(loaded);
    }

    tracing::info!(
        records = records.len(),
        timezone = %options.timezone,
        "Generating report"
    );

    let analytics = compute_watch_analytics(&records, &options);

    match args.export.as_deref() {
        Some("json") => print_json(&analytics)?,
        Some("md") => print_markdown(&analytics, args.keywords),
        Some(other) => anyhow::bail!("Unknown export format: {}. Use 'md' or 'json'", other),
        None => print_terminal(&analytics, args.keywords),
    }

    Ok(())
}

fn date_display(ts: Option<DateTime<Utc>>) -> String {
    ts.map(|t| t.format("%b %d, %Y").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn print_terminal(analytics: &WatchAnalytics, keyword_limit: usize) {
    let title = "YOUR WATCH HISTORY";

    // Header
    println!();
    println!("╭{}╮", "─".repeat(60));
    println!("│{:^60}│", title);
    println!("╰{}╯", "─".repeat(60));
    println!();

    let summary = &analytics.summary;
    if summary.total_records == 0 {
        println!("  No watch history found.");
        println!();
        return;
    }

    println!("SUMMARY");
    println!(
        "   Videos:   {:<12} Channels: {}",
        format_count(summary.total_records),
        format_count(summary.unique_entities)
    );
    println!(
        "   First:    {:<12} Last: {}",
        date_display(summary.first_watched),
        date_display(summary.last_watched)
    );
    println!(
        "   Per day:  {:<12} Over: {} day{}",
        format!("{:.1}", summary.average_per_day),
        summary.days_spanned,
        if summary.days_spanned == 1 { "" } else { "s" }
    );
    if let Some(peak) = summary.format_peak_hour() {
        println!("   Peak hour: {}", peak);
    }
    println!();

    if !analytics.keywords.is_empty() {
        println!("TOP KEYWORDS");
        let top = analytics.top_keyword_value();
        for keyword in analytics.keywords.iter().take(keyword_limit) {
            println!(
                "   {:<20} {:>6}  {}",
                keyword.text,
                keyword.value,
                bar(keyword.weight_against(top), BAR_WIDTH)
            );
        }
        println!();
    }

    if !analytics.monthly.is_empty() {
        println!("BY MONTH");
        let max = analytics.monthly.iter().map(|m| m.count).max().unwrap_or(0);
        for month in &analytics.monthly {
            println!(
                "   {:<10} {:>6}  {}",
                month.label,
                month.count,
                bar(fraction(month.count, max), BAR_WIDTH)
            );
        }
        println!();
    }

    println!("BY HOUR");
    let max = analytics.hourly.iter().map(|h| h.count).max().unwrap_or(0);
    for hour in &analytics.hourly {
        println!(
            "   {:>5} {:>6}  {}",
            hour.label,
            hour.count,
            bar(fraction(hour.count, max), BAR_WIDTH)
        );
    }
    println!();

    if !analytics.top_entities.is_empty() {
        println!("TOP CHANNELS");
        for (i, entity) in analytics.top_entities.iter().enumerate() {
            println!("   {:>2}. {:<36} {:>6}", i + 1, entity.name, entity.count);
        }
        println!();
    }

    println!("DURATION (estimated)");
    let max = analytics
        .duration_buckets
        .iter()
        .map(|b| b.count)
        .max()
        .unwrap_or(0);
    for bucket in &analytics.duration_buckets {
        println!(
            "   {:<12} {:>6}  {}",
            bucket.label,
            bucket.count,
            bar(fraction(bucket.count, max), BAR_WIDTH)
        );
    }
    println!(
        "   Average:  ~{}   Total: ~{}",
        format_duration_secs(analytics.average_duration),
        format_duration_secs(analytics.duration.estimated_total_secs as f64)
    );
    if analytics.duration.is_estimate() {
        println!("   Modeled from volume; exports carry no video lengths.");
    }
    println!();
}

fn print_markdown(analytics: &WatchAnalytics, keyword_limit: usize) {
    println!("# Watch History Report");
    println!();

    let summary = &analytics.summary;
    if summary.total_records == 0 {
        println!("*No watch history found.*");
        return;
    }

    // Summary table
    println!("## Summary");
    println!();
    println!("| Metric | Value |");
    println!("|--------|-------|");
    println!("| Videos | {} |", summary.total_records);
    println!("| Dated videos | {} |", summary.dated_records);
    println!("| Channels | {} |", summary.unique_entities);
    println!("| First watched | {} |", date_display(summary.first_watched));
    println!("| Last watched | {} |", date_display(summary.last_watched));
    println!("| Days spanned | {} |", summary.days_spanned);
    println!("| Videos per day | {:.1} |", summary.average_per_day);
    if let Some(peak) = summary.format_peak_hour() {
        println!("| Peak hour | {} |", peak);
    }
    println!();

    if !analytics.keywords.is_empty() {
        println!("## Top Keywords");
        println!();
        for (i, keyword) in analytics.keywords.iter().take(keyword_limit).enumerate() {
            println!("{}. **{}** - {} titles", i + 1, keyword.text, keyword.value);
        }
        println!();
    }

    if !analytics.monthly.is_empty() {
        println!("## By Month");
        println!();
        println!("| Month | Videos |");
        println!("|-------|--------|");
        for month in &analytics.monthly {
            println!("| {} | {} |", month.label, month.count);
        }
        println!();
    }

    println!("## By Hour");
    println!();
    println!("| Hour | Videos |");
    println!("|------|--------|");
    for hour in &analytics.hourly {
        println!("| {} | {} |", hour.label, hour.count);
    }
    println!();

    if !analytics.top_entities.is_empty() {
        println!("## Top Channels");
        println!();
        for (i, entity) in analytics.top_entities.iter().enumerate() {
            println!("{}. **{}** - {} videos", i + 1, entity.name, entity.count);
        }
        println!();
    }

    println!("## Duration (estimated)");
    println!();
    println!("| Length | Videos |");
    println!("|--------|--------|");
    for bucket in &analytics.duration_buckets {
        println!("| {} | {} |", bucket.label, bucket.count);
    }
    println!();
    println!(
        "- **Average length:** ~{}",
        format_duration_secs(analytics.average_duration)
    );
    println!(
        "- **Total watch time:** ~{}",
        format_duration_secs(analytics.duration.estimated_total_secs as f64)
    );
    if analytics.duration.is_estimate() {
        println!();
        println!("*Durations are modeled from viewing volume, not measured.*");
    }
    println!();

    println!("---");
    println!("*Generated by watchlens*");
}

fn print_json(analytics: &WatchAnalytics) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(analytics)?);
    Ok(())
}

fn fraction(count: u64, max: u64) -> f64 {
    if max == 0 {
        0.0
    } else {
        count as f64 / max as f64
    }
}
