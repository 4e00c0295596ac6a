use anyhow::Context;
use chrono::{DateTime, Duration, NaiveDate, Utc};

/// Today plus the 60 calendar days before it.
pub const CHART_WINDOW_DAYS: usize = 61;

/// Date a report is generated for. Calendar days are taken in UTC; an explicit `YYYY-MM-DD`
/// overrides the clock.
pub fn resolve_report_date(
    date_arg: Option<&str>,
    now_utc: DateTime<Utc>,
) -> anyhow::Result<NaiveDate> {
    match date_arg {
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .with_context(|| format!("invalid date {s:?}, expected YYYY-MM-DD")),
        None => Ok(now_utc.date_naive()),
    }
}

/// `len` consecutive calendar days, oldest first, ending on `end`.
pub fn trailing_window(end: NaiveDate, len: usize) -> Vec<NaiveDate> {
    (0..len)
        .rev()
        .map(|back| end - Duration::days(back as i64))
        .collect()
}
