// File: ./src/model/date.rs
// Turns the assorted start encodings calendar sources emit into calendar days.
//
// Two epoch conventions coexist on purpose:
//   - day matching reads numeric starts as MILLISECONDS since the epoch
//   - the time-of-day label on timed events reads them as SECONDS
// Both are kept until real feed data settles which unit was intended.
use crate::error::HomecalError;
use crate::model::event::Timestamp;
use anyhow::Result;
use chrono::format::{DelayedFormat, Item, StrftimeItems};
use chrono::{DateTime, Days, Locale, NaiveDate, NaiveDateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};

static EPOCH_MILLIS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{13}$").expect("valid epoch millis regex"));
static COMPACT_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{8}$").expect("valid compact date regex"));
static INTEGER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?\d+$").expect("valid integer regex"));

const GUESS_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y%m%dT%H%M%S",
];
const GUESS_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%B %d, %Y", "%b %d %Y"];

pub const DEFAULT_LOCALE: Locale = Locale::en_US;

fn default_weekday() -> String {
    "%A".to_string()
}
fn default_day_of_month() -> String {
    "%-d".to_string()
}
fn default_short_date() -> String {
    "%x".to_string()
}
fn default_time() -> String {
    "%-I:%M %P".to_string()
}

/// strftime patterns used for every human-facing date string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateFormats {
    #[serde(default = "default_weekday")]
    pub weekday: String,
    #[serde(default = "default_day_of_month")]
    pub day_of_month: String,
    /// Two events fall on the same day iff their short dates are equal.
    /// The default `%x` is the locale's own date representation.
    #[serde(default = "default_short_date")]
    pub short_date: String,
    #[serde(default = "default_time")]
    pub time: String,
}

impl Default for DateFormats {
    fn default() -> Self {
        Self {
            weekday: default_weekday(),
            day_of_month: default_day_of_month(),
            short_date: default_short_date(),
            time: default_time(),
        }
    }
}

impl DateFormats {
    /// Rejects any pattern chrono would fail on at format time.
    pub fn validate(&self) -> Result<()> {
        for (field, pattern) in [
            ("weekday", &self.weekday),
            ("day_of_month", &self.day_of_month),
            ("short_date", &self.short_date),
            ("time", &self.time),
        ] {
            if StrftimeItems::new(pattern).any(|item| item == Item::Error) {
                anyhow::bail!("Invalid date pattern for formats.{}: '{}'", field, pattern);
            }
        }
        Ok(())
    }
}

/// Parses names like `de_DE`, `de-DE` or `de_DE.UTF-8`.
pub fn parse_locale(name: &str) -> Result<Locale> {
    let cleaned = name
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .trim()
        .replace('-', "_");
    Locale::try_from(cleaned.as_str()).map_err(|_| anyhow::anyhow!("Unknown locale '{}'", name))
}

/// The operating system's locale, when it is one chrono knows.
pub fn system_locale() -> Option<Locale> {
    let name = sys_locale::get_locale()?;
    match parse_locale(&name) {
        Ok(locale) => Some(locale),
        Err(_) => {
            log::debug!("System locale '{}' has no date names, ignoring", name);
            None
        }
    }
}

/// Validated patterns plus the locale they are rendered in.
#[derive(Debug, Clone)]
pub struct DateStyle {
    formats: DateFormats,
    locale: Locale,
}

impl Default for DateStyle {
    fn default() -> Self {
        Self {
            formats: DateFormats::default(),
            locale: DEFAULT_LOCALE,
        }
    }
}

impl DateStyle {
    pub fn new(formats: DateFormats, locale: Locale) -> Result<Self> {
        formats.validate()?;
        Ok(Self { formats, locale })
    }

    pub fn formats(&self) -> &DateFormats {
        &self.formats
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    fn date(&self, date: NaiveDate, pattern: &str) -> String {
        render(
            date.format_localized(pattern, self.locale),
            pattern,
        )
    }

    /// Wall-clock time of `at` using the `time` pattern. Trailing blanks are
    /// trimmed for locales without an am/pm marker.
    pub fn time(&self, at: NaiveDateTime) -> String {
        let pattern = &self.formats.time;
        let delayed = DelayedFormat::new_with_locale(
            Some(at.date()),
            Some(at.time()),
            StrftimeItems::new_with_locale(pattern, self.locale),
            self.locale,
        );
        render(delayed, pattern).trim().to_string()
    }
}

/// Writes a delayed format without panicking. A pattern chrono cannot
/// handle yields an empty string and a warning.
fn render<I>(delayed: DelayedFormat<I>, pattern: &str) -> String
where
    DelayedFormat<I>: fmt::Display,
{
    let mut out = String::new();
    if write!(out, "{}", delayed).is_err() {
        log::warn!("Date pattern '{}' could not be rendered", pattern);
        out.clear();
    }
    out
}

/// A calendar day in the viewer's time zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayKey(NaiveDate);

impl DayKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Today, as seen from `tz`.
    pub fn today<Tz: TimeZone>(tz: &Tz) -> Self {
        Self(Utc::now().with_timezone(tz).date_naive())
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// `None` past the last representable date.
    pub fn add_days(&self, days: u64) -> Option<Self> {
        self.0.checked_add_days(Days::new(days)).map(Self)
    }

    pub fn weekday_name(&self, style: &DateStyle) -> String {
        style.date(self.0, &style.formats.weekday)
    }

    pub fn day_of_month(&self, style: &DateStyle) -> String {
        style.date(self.0, &style.formats.day_of_month)
    }

    pub fn short_date(&self, style: &DateStyle) -> String {
        style.date(self.0, &style.formats.short_date)
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Result of normalizing a start value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Normalized {
    pub day: DayKey,
    /// True when no strict format matched and the day is a best guess.
    pub guessed: bool,
}

/// Maps a start value onto the calendar day it falls on in `tz`.
///
/// Tried in order: 13-digit millisecond epoch, strict `YYYYMMDD`, then a
/// best-effort guess over common textual forms. JSON numbers are read as
/// millisecond epochs.
pub fn normalize<Tz: TimeZone>(raw: &Timestamp, tz: &Tz) -> Result<Normalized, HomecalError> {
    let invalid = || HomecalError::InvalidDate {
        raw: raw.to_string(),
    };

    let text = match raw {
        Timestamp::Number(ms) => {
            let day = day_from_millis(*ms, tz).ok_or_else(invalid)?;
            return Ok(Normalized {
                day,
                guessed: false,
            });
        }
        Timestamp::Text(s) => s.trim(),
    };

    if EPOCH_MILLIS_RE.is_match(text) {
        let ms: i64 = text.parse().map_err(|_| invalid())?;
        let day = day_from_millis(ms, tz).ok_or_else(invalid)?;
        return Ok(Normalized {
            day,
            guessed: false,
        });
    }

    if COMPACT_DATE_RE.is_match(text) {
        // Strict: a well-formed 8-digit string that is not a real date fails
        // here instead of falling through to the guesser.
        let date = NaiveDate::parse_from_str(text, "%Y%m%d").map_err(|_| invalid())?;
        return Ok(Normalized {
            day: DayKey(date),
            guessed: false,
        });
    }

    guess_day(text, tz)
        .map(|day| Normalized { day, guessed: true })
        .ok_or_else(invalid)
}

fn day_from_millis<Tz: TimeZone>(ms: i64, tz: &Tz) -> Option<DayKey> {
    DateTime::<Utc>::from_timestamp_millis(ms).map(|dt| DayKey(dt.with_timezone(tz).date_naive()))
}

fn guess_day<Tz: TimeZone>(text: &str, tz: &Tz) -> Option<DayKey> {
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(DayKey(dt.with_timezone(tz).date_naive()));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(DayKey(dt.with_timezone(tz).date_naive()));
    }

    // Zone-less forms are already local wall time.
    for fmt in GUESS_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(DayKey(dt.date()));
        }
    }
    for fmt in GUESS_DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(text, fmt) {
            return Some(DayKey(d));
        }
    }

    // Any other bare integer: treat like a numeric epoch in milliseconds.
    if INTEGER_RE.is_match(text) {
        let ms: i64 = text.parse().ok()?;
        return day_from_millis(ms, tz);
    }

    None
}

/// Local wall-clock time of a timed event, reading the start as SECONDS
/// since the epoch. Fractional seconds are accepted.
pub fn local_time_from_seconds<Tz: TimeZone>(
    raw: &Timestamp,
    tz: &Tz,
) -> Result<NaiveDateTime, HomecalError> {
    let invalid = || HomecalError::InvalidDate {
        raw: raw.to_string(),
    };

    let utc = match raw {
        Timestamp::Number(secs) => DateTime::<Utc>::from_timestamp(*secs, 0),
        Timestamp::Text(s) => {
            let s = s.trim();
            if let Ok(secs) = s.parse::<i64>() {
                DateTime::<Utc>::from_timestamp(secs, 0)
            } else {
                let secs: f64 = s.parse().map_err(|_| invalid())?;
                if !secs.is_finite() {
                    return Err(invalid());
                }
                DateTime::<Utc>::from_timestamp_millis((secs * 1000.0).round() as i64)
            }
        }
    };

    utc.map(|dt| dt.with_timezone(tz).naive_local())
        .ok_or_else(invalid)
}
