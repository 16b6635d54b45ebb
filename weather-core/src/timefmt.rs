use chrono::{DateTime, TimeZone};
use chrono_tz::Tz;

/// Formats epoch seconds in the forecast location's timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeFormatter {
    tz: Tz,
}

impl Default for TimeFormatter {
    fn default() -> Self {
        Self { tz: Tz::UTC }
    }
}

impl TimeFormatter {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// IANA name such as `America/Phoenix`. Unknown or empty names use UTC.
    pub fn for_timezone(name: &str) -> Self {
        match name.parse::<Tz>() {
            Ok(tz) => Self { tz },
            Err(_) => {
                if !name.is_empty() {
                    tracing::debug!(timezone = name, "unknown timezone, formatting in UTC");
                }
                Self::default()
            }
        }
    }

    fn at(&self, seconds: i64) -> Option<DateTime<Tz>> {
        self.tz.timestamp_opt(seconds, 0).single()
    }

    fn format(&self, seconds: i64, pattern: &str) -> String {
        self.at(seconds)
            .map(|dt| dt.format(pattern).to_string())
            .unwrap_or_default()
    }

    /// `July 14 at 12:06am MST`
    pub fn full(&self, seconds: i64) -> String {
        self.format(seconds, "%B %-d at %-I:%M%P %Z")
    }

    /// `July 14 (Monday)`
    pub fn date(&self, seconds: i64) -> String {
        self.format(seconds, "%B %-d (%A)")
    }

    /// `3:04pm MST`
    pub fn time(&self, seconds: i64) -> String {
        self.format(seconds, "%-I:%M%P %Z")
    }

    /// `3pm`, for chart axis labels.
    pub fn hour(&self, seconds: i64) -> String {
        self.format(seconds, "%-I%P")
    }
}
