use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};

/// Accepted timestamp formats, tried in order; the first match wins.
pub const TIMESTAMP_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y年%-m月%-d日 %H:%M",
    "%Y年%m月%d日 %H:%M",
];

/// Parse `raw` with the first matching format of [`TIMESTAMP_FORMATS`].
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

/// Display fields derived from an entry timestamp.
///
/// All fields are empty when the timestamp could not be parsed.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TimeLabel {
    /// Date, e.g. `2024年3月5日`.
    pub date: String,
    /// Weekday, e.g. `星期二`.
    pub weekday: String,
    /// Clock, `HH:MM`.
    pub clock: String,
    /// Year and month, e.g. `2024年3月`.
    pub year_month: String,
}

impl TimeLabel {
    /// Label for `raw`; empty when it does not parse.
    pub fn parse(raw: &str) -> Self {
        let Some(ts) = parse_timestamp(raw) else {
            tracing::debug!(raw, "unparsable entry timestamp");
            return Self::default();
        };
        Self {
            date: format!("{}年{}月{}日", ts.year(), ts.month(), ts.day()),
            weekday: weekday_label(ts.weekday()).to_string(),
            clock: format!("{:02}:{:02}", ts.hour(), ts.minute()),
            year_month: format!("{}年{}月", ts.year(), ts.month()),
        }
    }

    /// Whether the timestamp failed to parse.
    pub fn is_empty(&self) -> bool {
        self.date.is_empty()
    }

    /// Label fragments in render order (date, weekday, clock).
    pub fn fragments(&self) -> Vec<String> {
        if self.is_empty() {
            return Vec::new();
        }
        vec![self.date.clone(), self.weekday.clone(), self.clock.clone()]
    }

    /// Month key used for divider pages; `None` for unparsable timestamps.
    pub fn year_month(&self) -> Option<&str> {
        (!self.year_month.is_empty()).then_some(self.year_month.as_str())
    }
}

fn weekday_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "星期一",
        Weekday::Tue => "星期二",
        Weekday::Wed => "星期三",
        Weekday::Thu => "星期四",
        Weekday::Fri => "星期五",
        Weekday::Sat => "星期六",
        Weekday::Sun => "星期日",
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/time.rs"]
mod tests;
