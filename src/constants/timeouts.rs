use std::time::Duration;

/// Delay between a member leaving and the emptiness check
pub const EMPTY_CHANNEL_GRACE_PERIOD: Duration = Duration::from_secs(10);

/// Interval of the reconciliation sweep over all tracked channels
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Format duration for display
pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();

    if total_secs < 60 {
        format!("{} second{}", total_secs, if total_secs == 1 { "" } else { "s" })
    } else if total_secs < 3600 {
        let mins = total_secs / 60;
        format!("{} minute{}", mins, if mins == 1 { "" } else { "s" })
    } else {
        let hours = total_secs / 3600;
        format!("{} hour{}", hours, if hours == 1 { "" } else { "s" })
    }
}
