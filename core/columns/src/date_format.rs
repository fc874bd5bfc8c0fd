//! FILENAME: core/columns/src/date_format.rs
//! PURPOSE: Date parsing and pattern-based date/time formatting.
//! CONTEXT: Patterns use the single-character vocabulary of datatable
//! configs (`Y-m-d`, `d/m/Y H:i`, ...). A pattern is
//! tokenized once when a column is configured and rendered per cell.

use chrono::{
    DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone,
    Timelike,
};

use crate::value::CellValue;

// ============================================================================
// TOKENS
// ============================================================================

/// A parsed token from a date pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateToken {
    /// `d`: day of month, 2 digits
    Day2,
    /// `j`: day of month, no padding
    Day1,
    /// `D`: Mon..Sun
    DayNameShort,
    /// `l`: Monday..Sunday
    DayNameFull,
    /// `N`: ISO day of week, 1 (Monday) to 7 (Sunday)
    IsoWeekday,
    /// `S`: English ordinal suffix (st, nd, rd, th)
    OrdinalSuffix,
    /// `w`: day of week, 0 (Sunday) to 6 (Saturday)
    Weekday,
    /// `z`: day of year, starting at 0
    DayOfYear,
    /// `W`: ISO week number, 2 digits
    IsoWeek,
    /// `F`: January..December
    MonthNameFull,
    /// `m`: month, 2 digits
    Month2,
    /// `M`: Jan..Dec
    MonthNameShort,
    /// `n`: month, no padding
    Month1,
    /// `t`: days in the month
    DaysInMonth,
    /// `L`: 1 for a leap year, else 0
    LeapYear,
    /// `o`: ISO week-numbering year
    IsoYear,
    /// `Y`: full year
    Year4,
    /// `y`: 2-digit year
    Year2,
    /// `a`: am/pm
    AmPmLower,
    /// `A`: AM/PM
    AmPmUpper,
    /// `g`: 12-hour, no padding
    Hour12,
    /// `G`: 24-hour, no padding
    Hour24,
    /// `h`: 12-hour, 2 digits
    Hour12Padded,
    /// `H`: 24-hour, 2 digits
    Hour24Padded,
    /// `i`: minutes, 2 digits
    Minute,
    /// `s`: seconds, 2 digits
    Second,
    /// `u`: microseconds, 6 digits
    Micros,
    /// `v`: milliseconds, 3 digits
    Millis,
    /// `e` and `T`: zone name (`UTC` or the offset)
    ZoneName,
    /// `P`: offset with colon (+02:00)
    OffsetColon,
    /// `O`: offset without colon (+0200)
    Offset,
    /// `p`: like `P` but `Z` for UTC
    OffsetOrZ,
    /// `Z`: offset in seconds
    OffsetSeconds,
    /// `c`: ISO 8601 date
    Iso8601,
    /// `r`: RFC 2822 date
    Rfc2822,
    /// `U`: seconds since the Unix epoch
    Timestamp,
    /// Literal text (escaped or unrecognized characters)
    Literal(String),
}

/// A tokenized date pattern, keeping its source for display and export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePattern {
    source: String,
    tokens: Vec<DateToken>,
}

impl DatePattern {
    pub fn parse(source: &str) -> Self {
        DatePattern {
            source: source.to_string(),
            tokens: tokenize(source),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn tokens(&self) -> &[DateToken] {
        &self.tokens
    }

    pub fn format<Tz: TimeZone>(&self, dt: &DateTime<Tz>) -> String {
        let offset = dt.offset().fix();
        let local = dt.naive_local();
        render_tokens(&self.tokens, &local, offset, dt.timestamp())
    }
}

fn tokenize(pattern: &str) -> Vec<DateToken> {
    let mut tokens = Vec::new();
    let mut chars = pattern.chars();

    while let Some(c) = chars.next() {
        let token = match c {
            'd' => DateToken::Day2,
            'j' => DateToken::Day1,
            'D' => DateToken::DayNameShort,
            'l' => DateToken::DayNameFull,
            'N' => DateToken::IsoWeekday,
            'S' => DateToken::OrdinalSuffix,
            'w' => DateToken::Weekday,
            'z' => DateToken::DayOfYear,
            'W' => DateToken::IsoWeek,
            'F' => DateToken::MonthNameFull,
            'm' => DateToken::Month2,
            'M' => DateToken::MonthNameShort,
            'n' => DateToken::Month1,
            't' => DateToken::DaysInMonth,
            'L' => DateToken::LeapYear,
            'o' => DateToken::IsoYear,
            'Y' => DateToken::Year4,
            'y' => DateToken::Year2,
            'a' => DateToken::AmPmLower,
            'A' => DateToken::AmPmUpper,
            'g' => DateToken::Hour12,
            'G' => DateToken::Hour24,
            'h' => DateToken::Hour12Padded,
            'H' => DateToken::Hour24Padded,
            'i' => DateToken::Minute,
            's' => DateToken::Second,
            'u' => DateToken::Micros,
            'v' => DateToken::Millis,
            'e' | 'T' => DateToken::ZoneName,
            'P' => DateToken::OffsetColon,
            'O' => DateToken::Offset,
            'p' => DateToken::OffsetOrZ,
            'Z' => DateToken::OffsetSeconds,
            'c' => DateToken::Iso8601,
            'r' => DateToken::Rfc2822,
            'U' => DateToken::Timestamp,
            '\\' => match chars.next() {
                Some(escaped) => DateToken::Literal(escaped.to_string()),
                None => DateToken::Literal("\\".to_string()),
            },
            other => DateToken::Literal(other.to_string()),
        };

        // Merge adjacent literals
        if let (DateToken::Literal(next), Some(DateToken::Literal(prev))) =
            (&token, tokens.last_mut())
        {
            prev.push_str(next);
            continue;
        }
        tokens.push(token);
    }

    tokens
}

// ============================================================================
// RENDERING
// ============================================================================

fn render_tokens(
    tokens: &[DateToken],
    local: &NaiveDateTime,
    offset: FixedOffset,
    timestamp: i64,
) -> String {
    let mut result = String::new();
    let hour_12 = match local.hour() % 12 {
        0 => 12,
        h => h,
    };

    for token in tokens {
        match token {
            DateToken::Day2 => result.push_str(&format!("{:02}", local.day())),
            DateToken::Day1 => result.push_str(&local.day().to_string()),
            DateToken::DayNameShort => result.push_str(&local.format("%a").to_string()),
            DateToken::DayNameFull => result.push_str(&local.format("%A").to_string()),
            DateToken::IsoWeekday => {
                result.push_str(&local.weekday().number_from_monday().to_string())
            }
            DateToken::OrdinalSuffix => result.push_str(ordinal_suffix(local.day())),
            DateToken::Weekday => {
                result.push_str(&local.weekday().num_days_from_sunday().to_string())
            }
            DateToken::DayOfYear => result.push_str(&local.ordinal0().to_string()),
            DateToken::IsoWeek => result.push_str(&format!("{:02}", local.iso_week().week())),
            DateToken::MonthNameFull => result.push_str(&local.format("%B").to_string()),
            DateToken::Month2 => result.push_str(&format!("{:02}", local.month())),
            DateToken::MonthNameShort => result.push_str(&local.format("%b").to_string()),
            DateToken::Month1 => result.push_str(&local.month().to_string()),
            DateToken::DaysInMonth => {
                result.push_str(&days_in_month(local.year(), local.month()).to_string())
            }
            DateToken::LeapYear => {
                result.push(if is_leap_year(local.year()) { '1' } else { '0' })
            }
            DateToken::IsoYear => result.push_str(&local.iso_week().year().to_string()),
            DateToken::Year4 => result.push_str(&format!("{:04}", local.year())),
            DateToken::Year2 => {
                result.push_str(&format!("{:02}", local.year().rem_euclid(100)))
            }
            DateToken::AmPmLower => result.push_str(if local.hour() < 12 { "am" } else { "pm" }),
            DateToken::AmPmUpper => result.push_str(if local.hour() < 12 { "AM" } else { "PM" }),
            DateToken::Hour12 => result.push_str(&hour_12.to_string()),
            DateToken::Hour24 => result.push_str(&local.hour().to_string()),
            DateToken::Hour12Padded => result.push_str(&format!("{:02}", hour_12)),
            DateToken::Hour24Padded => result.push_str(&format!("{:02}", local.hour())),
            DateToken::Minute => result.push_str(&format!("{:02}", local.minute())),
            DateToken::Second => result.push_str(&format!("{:02}", local.second())),
            DateToken::Micros => {
                result.push_str(&format!("{:06}", local.nanosecond() % 1_000_000_000 / 1_000))
            }
            DateToken::Millis => result.push_str(&format!(
                "{:03}",
                local.nanosecond() % 1_000_000_000 / 1_000_000
            )),
            DateToken::ZoneName => {
                if offset.local_minus_utc() == 0 {
                    result.push_str("UTC");
                } else {
                    result.push_str(&format_offset(offset, true));
                }
            }
            DateToken::OffsetColon => result.push_str(&format_offset(offset, true)),
            DateToken::Offset => result.push_str(&format_offset(offset, false)),
            DateToken::OffsetOrZ => {
                if offset.local_minus_utc() == 0 {
                    result.push('Z');
                } else {
                    result.push_str(&format_offset(offset, true));
                }
            }
            DateToken::OffsetSeconds => result.push_str(&offset.local_minus_utc().to_string()),
            DateToken::Iso8601 => {
                result.push_str(&local.format("%Y-%m-%dT%H:%M:%S").to_string());
                result.push_str(&format_offset(offset, true));
            }
            DateToken::Rfc2822 => {
                result.push_str(&local.format("%a, %d %b %Y %H:%M:%S ").to_string());
                result.push_str(&format_offset(offset, false));
            }
            DateToken::Timestamp => result.push_str(&timestamp.to_string()),
            DateToken::Literal(s) => result.push_str(s),
        }
    }

    result
}

fn format_offset(offset: FixedOffset, colon: bool) -> String {
    let seconds = offset.local_minus_utc();
    let sign = if seconds < 0 { '-' } else { '+' };
    let abs = seconds.abs();
    let hours = abs / 3600;
    let minutes = (abs % 3600) / 60;
    if colon {
        format!("{}{:02}:{:02}", sign, hours, minutes)
    } else {
        format!("{}{:02}{:02}", sign, hours, minutes)
    }
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ if is_leap_year(year) => 29,
        _ => 28,
    }
}

// ============================================================================
// PARSING
// ============================================================================

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y", "%d.%m.%Y"];

const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M"];

/// Parse a raw cell value into a date/time.
///
/// Values without an offset are taken as UTC. Time-only text lands on the
/// Unix epoch date. Returns `None` for anything that is not a recognizable
/// date representation, including numbers and booleans.
pub fn parse_datetime(value: &CellValue) -> Option<DateTime<FixedOffset>> {
    let utc = FixedOffset::east_opt(0)?;

    match value {
        CellValue::DateTime(naive) => Some(utc.from_utc_datetime(naive)),
        CellValue::Text(text) => parse_text(text.trim(), utc),
        _ => None,
    }
}

fn parse_text(text: &str, utc: FixedOffset) -> Option<DateTime<FixedOffset>> {
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Some(dt);
    }

    let midnight = NaiveTime::from_hms_opt(0, 0, 0)?;
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1)?;

    let naive = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
                .map(|date| date.and_time(midnight))
        })
        .or_else(|| {
            TIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveTime::parse_from_str(text, fmt).ok())
                .map(|time| epoch.and_time(time))
        })?;

    Some(utc.from_utc_datetime(&naive))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(text: &str) -> DateTime<FixedOffset> {
        parse_datetime(&CellValue::text(text)).unwrap()
    }

    #[test]
    fn test_tokenize_merges_literals() {
        let pattern = DatePattern::parse("Y-m-d");
        assert_eq!(
            pattern.tokens(),
            &[
                DateToken::Year4,
                DateToken::Literal("-".to_string()),
                DateToken::Month2,
                DateToken::Literal("-".to_string()),
                DateToken::Day2,
            ]
        );
    }

    #[test]
    fn test_tokenize_escape() {
        let pattern = DatePattern::parse("\\Y\\e\\a\\r: Y");
        assert_eq!(pattern.tokens()[0], DateToken::Literal("Year: ".to_string()));
        assert_eq!(pattern.tokens()[1], DateToken::Year4);
    }

    #[test]
    fn test_format_basic_patterns() {
        let dt = at("2024-01-15T10:00:00");
        assert_eq!(DatePattern::parse("Y-m-d").format(&dt), "2024-01-15");
        assert_eq!(DatePattern::parse("Y/m/d").format(&dt), "2024/01/15");
        assert_eq!(DatePattern::parse("d/m/Y").format(&dt), "15/01/2024");
        assert_eq!(DatePattern::parse("D, d M Y").format(&dt), "Mon, 15 Jan 2024");
        assert_eq!(DatePattern::parse("l jS F y").format(&dt), "Monday 15th January 24");
    }

    #[test]
    fn test_format_time_tokens() {
        let dt = at("2024-03-05 00:07:09.123456");
        assert_eq!(DatePattern::parse("H:i:s").format(&dt), "00:07:09");
        assert_eq!(DatePattern::parse("g:i a").format(&dt), "12:07 am");
        assert_eq!(DatePattern::parse("h A").format(&dt), "12 AM");
        assert_eq!(DatePattern::parse("G").format(&dt), "0");
        assert_eq!(DatePattern::parse("v u").format(&dt), "123 123456");

        let afternoon = at("2024-03-05 15:30:00");
        assert_eq!(DatePattern::parse("g:i A").format(&afternoon), "3:30 PM");
    }

    #[test]
    fn test_format_calendar_tokens() {
        let dt = at("2024-02-10");
        assert_eq!(DatePattern::parse("t L").format(&dt), "29 1");
        assert_eq!(DatePattern::parse("N w z").format(&dt), "6 6 40");
        assert_eq!(DatePattern::parse("W o").format(&dt), "06 2024");
        assert_eq!(DatePattern::parse("n/j").format(&dt), "2/10");
    }

    #[test]
    fn test_ordinal_suffix() {
        assert_eq!(ordinal_suffix(1), "st");
        assert_eq!(ordinal_suffix(2), "nd");
        assert_eq!(ordinal_suffix(3), "rd");
        assert_eq!(ordinal_suffix(11), "th");
        assert_eq!(ordinal_suffix(12), "th");
        assert_eq!(ordinal_suffix(13), "th");
        assert_eq!(ordinal_suffix(21), "st");
        assert_eq!(ordinal_suffix(22), "nd");
    }

    #[test]
    fn test_format_offsets() {
        let utc = at("2024-01-15T10:00:00Z");
        assert_eq!(DatePattern::parse("e P O p Z").format(&utc), "UTC +00:00 +0000 Z 0");
        assert_eq!(DatePattern::parse("c").format(&utc), "2024-01-15T10:00:00+00:00");
        assert_eq!(DatePattern::parse("U").format(&utc), "1705312800");

        let shifted = at("2024-01-15T10:00:00+02:00");
        assert_eq!(DatePattern::parse("H:i T").format(&shifted), "10:00 +02:00");
        assert_eq!(
            DatePattern::parse("r").format(&shifted),
            "Mon, 15 Jan 2024 10:00:00 +0200"
        );
        assert_eq!(DatePattern::parse("Z").format(&shifted), "7200");
    }

    #[test]
    fn test_parse_accepted_shapes() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        for text in [
            "2024-01-15",
            "2024/01/15",
            "01/15/2024",
            "15-01-2024",
            "15.01.2024",
            "2024-01-15 10:00",
            "2024-01-15T10:00:00.5",
            " 2024-01-15 10:00:00 ",
            "2024-01-15 10:00:00+01:00",
        ] {
            assert_eq!(at(text).date_naive(), expected, "input {text:?}");
        }
    }

    #[test]
    fn test_parse_time_only_lands_on_epoch() {
        let dt = at("10:05:00");
        assert_eq!(dt.date_naive(), NaiveDate::from_ymd_opt(1970, 1, 1).unwrap());
        assert_eq!(DatePattern::parse("H:i").format(&dt), "10:05");
    }

    #[test]
    fn test_parse_rejects_non_dates() {
        assert!(parse_datetime(&CellValue::text("not a date")).is_none());
        assert!(parse_datetime(&CellValue::text("2024-13-45")).is_none());
        assert!(parse_datetime(&CellValue::Integer(20240115)).is_none());
        assert!(parse_datetime(&CellValue::Boolean(true)).is_none());
        assert!(parse_datetime(&CellValue::Empty).is_none());
    }

    #[test]
    fn test_parse_naive_datetime_value() {
        let naive = NaiveDate::from_ymd_opt(2023, 12, 31)
            .unwrap()
            .and_hms_opt(23, 59, 0)
            .unwrap();
        let dt = parse_datetime(&CellValue::DateTime(naive)).unwrap();
        assert_eq!(DatePattern::parse("Y-m-d H:i").format(&dt), "2023-12-31 23:59");
    }
}
