//! Departure-time token codec.
//!
//! Timetable times are recorded as 4-digit `HHMM` tokens whose hour may
//! run past 24 and up to 48: a route departing at 25:30 belongs
//! operationally to the previous day's schedule but executes at 01:30 the
//! next morning. This module parses, orders, formats, and projects those
//! tokens onto concrete calendar timestamps.

use std::cmp::Ordering;

use chrono::{Days, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A parsed departure-time token.
///
/// The literal hour is kept as recorded (0–48); callers that need the
/// wall-clock hour use [`DepartureTime::normalized_hour`] together with
/// [`DepartureTime::day_offset`]. Immutable once parsed.
///
/// # Example
///
/// ```
/// use fleet_billing::calculation::DepartureTime;
///
/// let time = DepartureTime::parse("2530").unwrap();
/// assert_eq!(time.hour(), 25);
/// assert_eq!(time.normalized_hour(), 1);
/// assert_eq!(time.day_offset(), 1);
/// assert_eq!(time.total_minutes(), 1530);
/// assert!(time.crosses_midnight());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartureTime {
    hour: u32,
    minute: u32,
}

/// Rendering modes for a departure time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeFormat {
    /// Literal `HH:MM` with the recorded (possibly overflowing) hour.
    Clock,
    /// Literal `H時MM分` with the recorded hour.
    KanjiClock,
    /// Wall-clock rendering: hour 24–48 becomes `翌H:MM` (next day);
    /// anything below 24 renders as `Clock` does.
    Display,
}

impl DepartureTime {
    /// Parses a 4-digit `HHMM` token.
    ///
    /// Returns `None` for malformed input: wrong length, non-digits,
    /// minute ≥ 60, or hour > 48. An out-of-range hour is rejected, never
    /// wrapped.
    ///
    /// # Examples
    ///
    /// ```
    /// use fleet_billing::calculation::DepartureTime;
    ///
    /// assert!(DepartureTime::parse("0800").is_some());
    /// assert!(DepartureTime::parse("2530").is_some());
    /// assert!(DepartureTime::parse("4900").is_none()); // hour > 48
    /// assert!(DepartureTime::parse("0860").is_none()); // minute >= 60
    /// assert!(DepartureTime::parse("800").is_none());  // wrong length
    /// assert!(DepartureTime::parse("08:0").is_none()); // non-digits
    /// ```
    pub fn parse(token: &str) -> Option<Self> {
        if token.len() != 4 || !token.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let hour: u32 = token[..2].parse().ok()?;
        let minute: u32 = token[2..].parse().ok()?;

        if hour > 48 || minute >= 60 {
            return None;
        }

        Some(Self { hour, minute })
    }

    /// Returns the literal recorded hour (0–48).
    pub fn hour(&self) -> u32 {
        self.hour
    }

    /// Returns the minute (0–59).
    pub fn minute(&self) -> u32 {
        self.minute
    }

    /// Returns the wall-clock hour (`hour % 24`).
    pub fn normalized_hour(&self) -> u32 {
        self.hour % 24
    }

    /// Returns how many days past the base date the time falls
    /// (`hour / 24`).
    pub fn day_offset(&self) -> u32 {
        self.hour / 24
    }

    /// Returns the total minutes since the base date's midnight
    /// (`hour * 60 + minute`). Monotonically comparable across overflowing
    /// and non-overflowing tokens.
    pub fn total_minutes(&self) -> u32 {
        self.hour * 60 + self.minute
    }

    /// Returns true when the recorded hour is 24 or later, i.e. the run
    /// executes after midnight relative to its dispatch date.
    pub fn crosses_midnight(&self) -> bool {
        self.hour >= 24
    }

    /// Reconstructs the 4-digit `HHMM` token.
    ///
    /// `parse` followed by `to_token` is the identity for every valid
    /// token.
    pub fn to_token(&self) -> String {
        format!("{:02}{:02}", self.hour, self.minute)
    }

    /// Renders the time in the requested format.
    ///
    /// Only [`TimeFormat::Display`] normalizes the hour; the other modes
    /// keep the literal hour because the literal hour is itself the
    /// user-facing encoding of "previous day's schedule, executes after
    /// midnight".
    ///
    /// # Examples
    ///
    /// ```
    /// use fleet_billing::calculation::{DepartureTime, TimeFormat};
    ///
    /// let time = DepartureTime::parse("2530").unwrap();
    /// assert_eq!(time.format(TimeFormat::Clock), "25:30");
    /// assert_eq!(time.format(TimeFormat::KanjiClock), "25時30分");
    /// assert_eq!(time.format(TimeFormat::Display), "翌1:30");
    /// ```
    pub fn format(&self, mode: TimeFormat) -> String {
        match mode {
            TimeFormat::Clock => format!("{:02}:{:02}", self.hour, self.minute),
            TimeFormat::KanjiClock => format!("{}時{:02}分", self.hour, self.minute),
            TimeFormat::Display => {
                if self.crosses_midnight() {
                    format!("翌{}:{:02}", self.hour - 24, self.minute)
                } else {
                    format!("{:02}:{:02}", self.hour, self.minute)
                }
            }
        }
    }

    /// Builds the concrete timestamp for this time on a base date: the
    /// base date plus [`DepartureTime::day_offset`] days, at
    /// `normalized_hour:minute`.
    ///
    /// Returns `None` only when the date arithmetic overflows chrono's
    /// representable range.
    ///
    /// # Examples
    ///
    /// ```
    /// use fleet_billing::calculation::DepartureTime;
    /// use chrono::NaiveDate;
    ///
    /// let base = NaiveDate::from_ymd_opt(2025, 10, 31).unwrap();
    /// let time = DepartureTime::parse("2530").unwrap();
    /// let datetime = time.to_datetime(base).unwrap();
    /// assert_eq!(datetime.to_string(), "2025-11-01 01:30:00");
    /// ```
    pub fn to_datetime(&self, base_date: NaiveDate) -> Option<NaiveDateTime> {
        base_date
            .checked_add_days(Days::new(u64::from(self.day_offset())))?
            .and_hms_opt(self.normalized_hour(), self.minute, 0)
    }
}

impl std::fmt::Display for DepartureTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.format(TimeFormat::Clock))
    }
}

/// Compares two raw departure tokens for ascending ordering of runs within
/// a day.
///
/// Tokens are ordered by [`DepartureTime::total_minutes`], so an hour-25
/// token sorts after an hour-23 token. A token that is absent or fails to
/// parse is treated as a sentinel maximum so it sorts last; two such
/// tokens compare equal, which keeps stable sorts stable.
///
/// # Examples
///
/// ```
/// use fleet_billing::calculation::compare_tokens;
/// use std::cmp::Ordering;
///
/// assert_eq!(compare_tokens(Some("0800"), Some("2530")), Ordering::Less);
/// assert_eq!(compare_tokens(Some("2400"), Some("2359")), Ordering::Greater);
/// assert_eq!(compare_tokens(None, Some("2359")), Ordering::Greater);
/// ```
pub fn compare_tokens(a: Option<&str>, b: Option<&str>) -> Ordering {
    sort_minutes(a).cmp(&sort_minutes(b))
}

/// Sort key for a raw token: total minutes, with unparseable/absent tokens
/// mapped to the maximum.
fn sort_minutes(token: Option<&str>) -> u32 {
    token
        .and_then(DepartureTime::parse)
        .map(|t| t.total_minutes())
        .unwrap_or(u32::MAX)
}
