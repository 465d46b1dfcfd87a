//! Calendar bucketing and the site's date formats.
//!
//! Archive buckets are keyed by the numeric `YYYY-MM` string so that plain
//! string ordering is chronological ordering; labels are French-locale month
//! names and exist only for display.

use time::{OffsetDateTime, format_description::FormatItem, macros::format_description};

const BANNER_DATE_FORMAT: &[FormatItem<'static>] =
    format_description!("[weekday repr:long], [month repr:long] [day padding:none], [year]");

const FRENCH_MONTHS: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

/// Sortable month bucket key, e.g. `2024-01`.
pub fn month_key(date: OffsetDateTime) -> String {
    format!("{:04}-{:02}", date.year(), u8::from(date.month()))
}

/// Display label for a month bucket, e.g. `janvier 2024`.
pub fn month_label(date: OffsetDateTime) -> String {
    format!("{} {}", french_month(date), date.year())
}

/// Long article date, e.g. `15 janvier 2024`.
pub fn long_date(date: OffsetDateTime) -> String {
    format!("{} {} {}", date.day(), french_month(date), date.year())
}

/// Banner header date, e.g. `Saturday, August 30, 2026`.
pub fn banner_date(now: OffsetDateTime) -> String {
    now.format(BANNER_DATE_FORMAT).expect("valid calendar date")
}

fn french_month(date: OffsetDateTime) -> &'static str {
    FRENCH_MONTHS[usize::from(u8::from(date.month())) - 1]
}
