//! Formatting helpers shared by report renderers.

/// Compact count for display (e.g., "1.2K", "3.4M").
pub fn format_count(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

/// Duration for display (e.g., "12m 45s", "312h 45m").
pub fn format_duration_secs(secs: f64) -> String {
    let total = secs.max(0.0).round() as u64;
    let hours = total / 3600;
    let mins = (total % 3600) / 60;
    let rem = total % 60;

    if hours > 0 {
        format!("{}h {}m", hours, mins)
    } else if mins > 0 {
        format!("{}m {}s", mins, rem)
    } else {
        format!("{}s", rem)
    }
}

/// Horizontal bar of `width` cells scaled by `fraction` (clamped to 0..=1).
pub fn bar(fraction: f64, width: usize) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * width as f64).round() as usize;
    "█".repeat(filled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_240), "1.2K");
        assert_eq!(format_count(3_400_000), "3.4M");
    }

    #[test]
    fn test_format_duration_secs() {
        assert_eq!(format_duration_secs(0.0), "0s");
        assert_eq!(format_duration_secs(765.0), "12m 45s");
        assert_eq!(format_duration_secs(3600.0 * 312.0 + 45.0 * 60.0), "312h 45m");
    }

    #[test]
    fn test_bar() {
        assert_eq!(bar(0.5, 10).chars().count(), 5);
        assert_eq!(bar(2.0, 4).chars().count(), 4);
        assert!(bar(0.0, 10).is_empty());
    }
}
