//! vCard date and time types (RFC 6350 §4.3).
//!
//! vCard dates support partial/truncated forms that iCalendar doesn't.

use std::fmt::Write as _;

use chrono::{Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// How date/time values are spelled on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// `19960415`, `102200`, `+0500`.
    Basic,
    /// `1996-04-15`, `10:22:00`, `+05:00`.
    Extended,
}

/// A vCard date value with optional truncation (RFC 6350 §4.3.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VCardDate {
    /// Full date (YYYY-MM-DD).
    Full(NaiveDate),
    /// Year and month only (YYYY-MM).
    YearMonth { year: i32, month: u32 },
    /// Year only (YYYY).
    Year(i32),
    /// Month only (--MM).
    Month(u32),
    /// Month and day, no year (--MM-DD).
    MonthDay { month: u32, day: u32 },
    /// Day only (---DD).
    Day(u32),
}

impl VCardDate {
    /// Returns the year if available.
    #[must_use]
    pub fn year(&self) -> Option<i32> {
        match self {
            Self::Full(d) => Some(d.year()),
            Self::YearMonth { year, .. } | Self::Year(year) => Some(*year),
            Self::Month(_) | Self::MonthDay { .. } | Self::Day(_) => None,
        }
    }

    pub(crate) fn write(&self, style: DateStyle, out: &mut String) {
        let extended = style == DateStyle::Extended;
        match self {
            Self::Full(d) if extended => {
                write!(out, "{}", d.format("%Y-%m-%d")).ok();
            }
            Self::Full(d) => {
                write!(out, "{}", d.format("%Y%m%d")).ok();
            }
            Self::YearMonth { year, month } => {
                write!(out, "{year:04}-{month:02}").ok();
            }
            Self::Year(year) => {
                write!(out, "{year:04}").ok();
            }
            Self::Month(month) => {
                write!(out, "--{month:02}").ok();
            }
            Self::MonthDay { month, day } if extended => {
                write!(out, "--{month:02}-{day:02}").ok();
            }
            Self::MonthDay { month, day } => {
                write!(out, "--{month:02}{day:02}").ok();
            }
            Self::Day(day) => {
                write!(out, "---{day:02}").ok();
            }
        }
    }
}

/// A vCard time value with optional truncation (RFC 6350 §4.3.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VCardTime {
    /// Full time (HH:MM:SS).
    Full(NaiveTime),
    /// Hour and minute only (HH:MM).
    HourMinute { hour: u32, minute: u32 },
    /// Hour only (HH).
    Hour(u32),
    /// Minute and second, no hour (-MM:SS).
    MinuteSecond { minute: u32, second: u32 },
    /// Minute only (-MM).
    Minute(u32),
    /// Second only (--SS).
    Second(u32),
}

impl VCardTime {
    pub(crate) fn write(&self, style: DateStyle, out: &mut String) {
        let sep = if style == DateStyle::Extended { ":" } else { "" };
        match self {
            Self::Full(t) => {
                write!(
                    out,
                    "{:02}{sep}{:02}{sep}{:02}",
                    t.hour(),
                    t.minute(),
                    t.second()
                )
                .ok();
            }
            Self::HourMinute { hour, minute } => {
                write!(out, "{hour:02}{sep}{minute:02}").ok();
            }
            Self::Hour(hour) => {
                write!(out, "{hour:02}").ok();
            }
            Self::MinuteSecond { minute, second } => {
                write!(out, "-{minute:02}{sep}{second:02}").ok();
            }
            Self::Minute(minute) => {
                write!(out, "-{minute:02}").ok();
            }
            Self::Second(second) => {
                write!(out, "--{second:02}").ok();
            }
        }
    }
}

/// Writes a UTC offset; zero is written as `Z`.
pub(crate) fn write_offset(offset: FixedOffset, style: DateStyle, out: &mut String) {
    let seconds = offset.local_minus_utc();
    if seconds == 0 {
        out.push('Z');
        return;
    }
    let sign = if seconds < 0 { '-' } else { '+' };
    let minutes = seconds.unsigned_abs() / 60;
    let sep = if style == DateStyle::Extended { ":" } else { "" };
    write!(out, "{sign}{:02}{sep}{:02}", minutes / 60, minutes % 60).ok();
}

/// Combined date and time, possibly partial (RFC 6350 §4.3.4).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateAndOrTime {
    /// Date only.
    Date(VCardDate),
    /// Date with time.
    DateTime {
        date: VCardDate,
        time: VCardTime,
        offset: Option<FixedOffset>,
    },
    /// Time only (leading `T` on the wire).
    Time {
        time: VCardTime,
        offset: Option<FixedOffset>,
    },
    /// Free text (`VALUE=text`, 4.0).
    Text(String),
}

impl DateAndOrTime {
    /// Formats the value; `Text` is returned unescaped.
    #[must_use]
    pub fn format(&self, style: DateStyle) -> String {
        let mut out = String::new();
        match self {
            Self::Date(date) => date.write(style, &mut out),
            Self::DateTime { date, time, offset } => {
                date.write(style, &mut out);
                out.push('T');
                time.write(style, &mut out);
                if let Some(offset) = offset {
                    write_offset(*offset, style, &mut out);
                }
            }
            Self::Time { time, offset } => {
                out.push('T');
                time.write(style, &mut out);
                if let Some(offset) = offset {
                    write_offset(*offset, style, &mut out);
                }
            }
            Self::Text(text) => out.push_str(text),
        }
        out
    }

    /// Returns whether the value is a date/time rather than free text.
    #[must_use]
    pub fn is_temporal(&self) -> bool {
        !matches!(self, Self::Text(_))
    }
}

/// A timestamp (REV property), optionally zoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp {
    pub datetime: NaiveDateTime,
    pub offset: Option<FixedOffset>,
}

impl Timestamp {
    /// A UTC timestamp.
    #[must_use]
    pub fn utc(datetime: NaiveDateTime) -> Self {
        Self {
            datetime,
            offset: FixedOffset::east_opt(0),
        }
    }

    #[must_use]
    pub fn format(&self, style: DateStyle) -> String {
        let mut out = String::new();
        VCardDate::Full(self.datetime.date()).write(style, &mut out);
        out.push('T');
        VCardTime::Full(self.datetime.time()).write(style, &mut out);
        if let Some(offset) = self.offset {
            write_offset(offset, style, &mut out);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    #[test]
    fn full_date_styles() {
        let value = DateAndOrTime::Date(VCardDate::Full(date(1996, 4, 15)));
        assert_eq!(value.format(DateStyle::Basic), "19960415");
        assert_eq!(value.format(DateStyle::Extended), "1996-04-15");
    }

    #[test]
    fn truncated_forms() {
        let month_day = DateAndOrTime::Date(VCardDate::MonthDay { month: 2, day: 3 });
        assert_eq!(month_day.format(DateStyle::Basic), "--0203");

        let time = DateAndOrTime::Time {
            time: VCardTime::MinuteSecond {
                minute: 5,
                second: 9,
            },
            offset: None,
        };
        assert_eq!(time.format(DateStyle::Extended), "T-05:09");
    }

    #[test]
    fn offsets() {
        let east = FixedOffset::east_opt(5 * 3600 + 30 * 60).expect("valid offset");
        let west = FixedOffset::west_opt(8 * 3600).expect("valid offset");
        let mut out = String::new();
        write_offset(east, DateStyle::Basic, &mut out);
        out.push(' ');
        write_offset(west, DateStyle::Extended, &mut out);
        out.push(' ');
        write_offset(FixedOffset::east_opt(0).expect("valid offset"), DateStyle::Basic, &mut out);
        assert_eq!(out, "+0530 -08:00 Z");
    }

    #[test]
    fn timestamp_utc() {
        let ts = Timestamp::utc(
            date(1995, 10, 31)
                .and_hms_opt(22, 27, 10)
                .expect("valid time"),
        );
        assert_eq!(ts.format(DateStyle::Basic), "19951031T222710Z");
    }
}
