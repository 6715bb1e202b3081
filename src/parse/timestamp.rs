//! `date(1)`-style timestamps as written by DAQInterface, e.g. `Mon Jan  1 00:00:30 CST 2024`.

use std::sync::OnceLock;

use chrono::{
    DurationRound, Local, Month, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Weekday,
};
use regex::Regex;

use crate::core::Stamp;

const PATTERN: &str = r"(?P<weekday>[A-Za-z]{3})\s+(?P<month>[A-Za-z]{3})\s+(?P<day>\d{1,2})\s+(?P<hour>\d{1,2}):(?P<minute>\d{2}):(?P<second>\d{2})\s+(?P<zone>[A-Za-z]+)\s+(?P<year>\d{4})";

static SEARCH_REGEX: OnceLock<Regex> = OnceLock::new();
static EXACT_REGEX: OnceLock<Regex> = OnceLock::new();

fn search_regex() -> &'static Regex {
    SEARCH_REGEX.get_or_init(|| Regex::new(&format!(r"\b{PATTERN}\b")).expect("Invalid timestamp Regex"))
}

fn exact_regex() -> &'static Regex {
    EXACT_REGEX.get_or_init(|| Regex::new(&format!(r"^{PATTERN}$")).expect("Invalid timestamp Regex"))
}

/// A calendar timestamp with its zone abbreviation kept as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timestamp {
    datetime: NaiveDateTime,
    zone: String,
}

impl Timestamp {
    /// Parse text that is exactly one timestamp.
    pub fn parse(text: &str) -> Option<Self> {
        exact_regex().captures(text).and_then(|caps| Self::from_captures(&caps))
    }

    /// First timestamp found anywhere in `line`.
    pub fn find(line: &str) -> Option<Self> {
        search_regex()
            .captures_iter(line)
            .find_map(|caps| Self::from_captures(&caps))
    }

    fn from_captures(caps: &regex::Captures<'_>) -> Option<Self> {
        caps["weekday"].parse::<Weekday>().ok()?;
        let month = caps["month"].parse::<Month>().ok()?;
        let date = NaiveDate::from_ymd_opt(
            caps["year"].parse().ok()?,
            month.number_from_month(),
            caps["day"].parse().ok()?,
        )?;
        let time = NaiveTime::from_hms_opt(
            caps["hour"].parse().ok()?,
            caps["minute"].parse().ok()?,
            caps["second"].parse().ok()?,
        )?;
        Some(Timestamp {
            datetime: date.and_time(time),
            zone: caps["zone"].to_string(),
        })
    }

    pub fn datetime(&self) -> NaiveDateTime {
        self.datetime
    }

    pub fn zone(&self) -> &str {
        &self.zone
    }

    /// Unix seconds with the wall-clock time read in the process's local zone.
    pub fn epoch(&self) -> Option<i64> {
        self.epoch_in(&Local)
    }

    /// Unix seconds with the wall-clock time read in `tz`; absent inside a DST gap.
    pub fn epoch_in<Tz: TimeZone>(&self, tz: &Tz) -> Option<i64> {
        tz.from_local_datetime(&self.datetime)
            .earliest()
            .map(|dt| dt.timestamp())
    }

    /// `MM/DD/YYYY HH:MM` with the seconds dropped.
    pub fn minute_label(&self) -> String {
        self.datetime
            .duration_trunc(TimeDelta::minutes(1))
            .unwrap_or(self.datetime)
            .format("%m/%d/%Y %H:%M")
            .to_string()
    }

    pub fn to_stamp(&self) -> Stamp {
        Stamp {
            epoch: self.epoch(),
            minute: self.minute_label(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike, Utc};

    use super::*;

    fn label(text: &str) -> String {
        Timestamp::parse(text).unwrap().minute_label()
    }

    #[test]
    fn test_seconds_are_dropped_not_rounded() {
        assert_eq!(label("Mon Jan 01 00:00:30 CST 2024"), "01/01/2024 00:00");
        assert_eq!(label("Mon Jan 01 00:00:59 CST 2024"), "01/01/2024 00:00");
    }

    #[test]
    fn test_no_rollover_at_day_end() {
        assert_eq!(label("Mon Jan 01 23:59:45 CST 2024"), "01/01/2024 23:59");
    }

    #[test]
    fn test_no_rollover_at_month_end() {
        assert_eq!(label("Wed Jan 31 23:59:59 CST 2024"), "01/31/2024 23:59");
        assert_eq!(label("Thu Feb 29 23:59:59 CST 2024"), "02/29/2024 23:59");
    }

    #[test]
    fn test_no_rollover_at_year_end() {
        assert_eq!(label("Tue Dec 31 23:59:59 CST 2024"), "12/31/2024 23:59");
    }

    #[test]
    fn test_space_padded_day() {
        let ts = Timestamp::parse("Mon Jan  1 09:05:00 CST 2024").unwrap();
        assert_eq!(ts.datetime().day(), 1);
        assert_eq!(ts.datetime().hour(), 9);
        assert_eq!(ts.zone(), "CST");
        assert_eq!(ts.minute_label(), "01/01/2024 09:05");
    }

    #[test]
    fn test_epoch_in_utc() {
        let ts = Timestamp::parse("Mon Jan 01 00:00:30 CST 2024").unwrap();
        assert_eq!(ts.epoch_in(&Utc), Some(1_704_067_230));
    }

    #[test]
    fn test_epoch_uses_local_zone() {
        let ts = Timestamp::parse("Mon Jun 03 12:00:00 CDT 2024").unwrap();
        let expected = Local
            .from_local_datetime(&ts.datetime())
            .earliest()
            .map(|dt| dt.timestamp());
        assert_eq!(ts.epoch(), expected);
    }

    #[test]
    fn test_parse_requires_exact_text() {
        assert!(Timestamp::parse("Mon Jan 01 00:00:30 CST 2024 trailing").is_none());
        assert!(Timestamp::parse("Mon Jan 01 00:00 CST 2024").is_none());
        assert!(Timestamp::parse("Mon Foo 01 00:00:30 CST 2024").is_none());
        assert!(Timestamp::parse("Mon Feb 30 00:00:30 CST 2024").is_none());
        assert!(Timestamp::parse("Mon Jan 01 24:00:00 CST 2024").is_none());
        assert!(Timestamp::parse("").is_none());
    }

    #[test]
    fn test_find_inside_line() {
        let line = "partition1: Tue Mar  5 14:22:09 CST 2024: START transition complete for run 1234";
        let ts = Timestamp::find(line).unwrap();
        assert_eq!(ts.minute_label(), "03/05/2024 14:22");
    }

    #[test]
    fn test_find_skips_invalid_candidates() {
        let line = "Mon Feb 30 00:00:00 CST 2024 then Tue Mar 05 01:02:03 CST 2024";
        assert_eq!(Timestamp::find(line).unwrap().minute_label(), "03/05/2024 01:02");
        assert!(Timestamp::find("no time here").is_none());
    }
}
