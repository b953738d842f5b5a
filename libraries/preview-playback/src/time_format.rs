//! Playback time formatting

/// Maps a time in seconds to display text
pub trait TimeFormatter: Send {
    /// Format `seconds` for display
    fn format(&self, seconds: f64) -> String;
}

/// `M:SS` formatter
///
/// Fractional seconds are truncated; minutes are not wrapped into hours.
/// Non-finite or negative input renders as `0:00`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTimeFormatter;

impl TimeFormatter for DefaultTimeFormatter {
    fn format(&self, seconds: f64) -> String {
        let total = if seconds.is_finite() && seconds > 0.0 {
            seconds as u64
        } else {
            0
        };
        format!("{}:{:02}", total / 60, total % 60)
    }
}
