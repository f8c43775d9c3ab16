// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! Field heuristics shared by the source adapters

use chrono::{Datelike, Duration, NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

static LONG_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"([A-Za-z]+ \d{1,2}, \d{4})").unwrap());
static US_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d{1,2}/\d{1,2}/\d{4})").unwrap());
static ISO_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d{4}-\d{1,2}-\d{1,2})").unwrap());
static CLOCK_TIME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,2}):(\d{2})\s*([AaPp][Mm])").unwrap());
static LOOSE_TIME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,2})(?::(\d{2}))?\s*([AaPp][Mm])").unwrap());
static MONTH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*").unwrap()
});
static DAY: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{1,2}").unwrap());
static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+(\.\d+)?)").unwrap());

/// First date in `text` written as `March 15, 2025`, `3/15/2025` or `2025-03-15`
///
/// Patterns are tried in that order and a match that is not a real date
/// falls through to the next pattern.
pub fn parse_event_date(text: &str) -> Option<NaiveDate> {
    let attempts: [(&'static Lazy<Regex>, &str); 3] = [
        (&LONG_DATE, "%B %d, %Y"),
        (&US_DATE, "%m/%d/%Y"),
        (&ISO_DATE, "%Y-%m-%d"),
    ];

    attempts.iter().find_map(|(pattern, format)| {
        let found = pattern.captures(text)?.get(1)?.as_str();
        NaiveDate::parse_from_str(found, format).ok()
    })
}

fn twelve_hour(hour: u32, minute: u32, meridiem: &str) -> Option<NaiveTime> {
    if !(1..=12).contains(&hour) {
        return None;
    }
    let pm = meridiem.eq_ignore_ascii_case("pm");
    let hour = match (hour, pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, true) => h + 12,
        (h, false) => h,
    };
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Time written as `7:30 PM`
pub fn parse_clock_time(text: &str) -> Option<NaiveTime> {
    let captures = CLOCK_TIME.captures(text)?;
    twelve_hour(
        captures.get(1)?.as_str().parse().ok()?,
        captures.get(2)?.as_str().parse().ok()?,
        captures.get(3)?.as_str(),
    )
}

/// Time written as `7:30 PM` or `7 PM`
pub fn parse_loose_time(text: &str) -> Option<NaiveTime> {
    let captures = LOOSE_TIME.captures(text)?;
    let minute = match captures.get(2) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };
    twelve_hour(
        captures.get(1)?.as_str().parse().ok()?,
        minute,
        captures.get(3)?.as_str(),
    )
}

/// Month name and day without a year, e.g. `Thu, Apr 15`
///
/// Resolves to the current year, or the next one when that date has
/// already passed.
pub fn parse_month_day(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    let month = MONTH.find(text)?.as_str();
    let day = DAY.find(text)?.as_str();
    let abbreviation = month.get(..3)?;

    let on = |year: i32| {
        NaiveDate::parse_from_str(&format!("{} {} {}", abbreviation, day, year), "%b %d %Y").ok()
    };
    let date = on(today.year())?;
    if date < today {
        on(today.year() + 1)
    } else {
        Some(date)
    }
}

/// Stand-in date between 1 and `max_days` days after `today`
pub fn placeholder_date(today: NaiveDate, max_days: i64) -> NaiveDate {
    today + Duration::days(rand::random_range(1..=max_days.max(1)))
}

/// Stand-in afternoon or evening time on the hour, `12:00 PM` being noon
pub fn placeholder_time() -> NaiveTime {
    let hour: u32 = rand::random_range(1..=12);
    twelve_hour(hour, 0, "pm").unwrap_or(NaiveTime::MIN)
}

/// Number of `$` signs in a price text, 2 when there are none
pub fn price_level(text: Option<&str>) -> i32 {
    let dollars = text.map(|t| t.matches('$').count()).unwrap_or(0);
    if dollars == 0 {
        2
    } else {
        dollars.min(4) as i32
    }
}

/// Star rating in an accessibility label such as `4.5 star rating`
pub fn rating_from_label(label: &str) -> f64 {
    NUMBER
        .captures(label)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .map(|rating| rating.clamp(0.0, 5.0))
        .unwrap_or(0.0)
}

/// All digits of `text` as a number, e.g. `$1,250/mo` becomes 1250
pub fn digits(text: &str) -> Option<i64> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}

const EVENT_TYPES: [(&str, &[&str]); 6] = [
    ("Concert", &["concert", "music", "live music", "performance", "band"]),
    ("Festival", &["festival", "fair", "celebration", "carnival"]),
    (
        "Workshop",
        &["workshop", "seminar", "class", "training", "learn", "education"],
    ),
    ("Sports", &["sports", "game", "match", "tournament", "athletic"]),
    ("Networking", &["networking", "business", "meetup", "professional"]),
    ("Food & Drink", &["food", "drink", "tasting", "culinary", "beer", "wine"]),
];

/// Event type guessed from keywords in the title and description
pub fn classify_event(title: &str, description: &str) -> &'static str {
    let text = format!("{} {}", title, description).to_lowercase();
    EVENT_TYPES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| text.contains(k)))
        .map(|(name, _)| *name)
        .unwrap_or("Community Event")
}
