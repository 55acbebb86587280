//! PDF date strings
//!
//! Parses the `D:YYYYMMDDHHmmSSOHH'mm'` form from the document-information
//! dictionary. Every component after the year is optional; missing ones take
//! their earliest value. A missing offset means UTC.

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
use regex::Regex;
use std::sync::LazyLock;

static PDF_DATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:D:)?(\d{4})(\d{2})?(\d{2})?(\d{2})?(\d{2})?(\d{2})?(?:([Zz])|([+\-])(\d{2})(?:'?(\d{2})'?)?)?$",
    )
    .unwrap()
});

/// Parse a PDF date string; `None` when it is malformed or out of range
pub fn parse_pdf_date(raw: &str) -> Option<DateTime<Utc>> {
    let caps = PDF_DATE_REGEX.captures(raw.trim())?;

    let number = |index: usize, default: u32| -> Option<u32> {
        match caps.get(index) {
            Some(m) => m.as_str().parse().ok(),
            None => Some(default),
        }
    };

    let year: i32 = caps.get(1)?.as_str().parse().ok()?;
    let month = number(2, 1)?;
    let day = number(3, 1)?;
    let hour = number(4, 0)?;
    let minute = number(5, 0)?;
    let second = number(6, 0)?;

    let naive = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, second)?;

    let offset_seconds = match caps.get(8) {
        Some(sign) => {
            let hours = number(9, 0)? as i32;
            let minutes = number(10, 0)? as i32;
            let magnitude = hours * 3600 + minutes * 60;
            if sign.as_str() == "-" {
                -magnitude
            } else {
                magnitude
            }
        }
        None => 0,
    };

    let offset = FixedOffset::east_opt(offset_seconds)?;
    offset
        .from_local_datetime(&naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Render a timestamp as `YYYY-MM-DD HH:MM:SS.sss` (UTC)
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S%.3f").to_string()
}
