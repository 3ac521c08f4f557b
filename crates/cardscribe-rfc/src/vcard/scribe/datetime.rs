//! Date and timestamp scribes (BDAY, ANNIVERSARY, DEATHDATE, REV) and the
//! date/time value parsers they share with TZ.
//!
//! Accepted forms follow RFC 6350 §4.3 including truncation (`--0415`,
//! `---15`, `T1022`), in both basic and extended spelling.

use chrono::{FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::Value as JsonValue;

use super::format::{HtmlElement, XmlValue};
use super::{ParseContext, Scribe, ScribeError, ScribeOutcome, WriteContext};
use crate::vcard::codec::{escape_text, unescape_text};
use crate::vcard::core::{
    DateAndOrTime, DateStyle, Timestamp, VCardDataType, VCardDate, VCardParameters,
    VCardProperty, VCardTime, VCardValue, VCardVersion, names,
};

const V4_ONLY: &[VCardVersion] = &[VCardVersion::V4_0];

/// 3.0 writes extended dates; 2.1 and 4.0 write basic ones.
pub(super) fn style_for(version: VCardVersion) -> DateStyle {
    match version {
        VCardVersion::V3_0 => DateStyle::Extended,
        VCardVersion::V2_1 | VCardVersion::V4_0 => DateStyle::Basic,
    }
}

fn invalid(kind: &str, s: &str) -> ScribeError {
    ScribeError::cannot_parse(format!("invalid {kind}: {s}"))
}

fn number(digits: &str, max: u32, kind: &str) -> Result<u32, ScribeError> {
    if digits.len() != 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(kind, digits));
    }
    digits
        .parse::<u32>()
        .ok()
        .filter(|n| *n <= max)
        .ok_or_else(|| invalid(kind, digits))
}

/// Drops `separator` and returns the remaining characters if all are ASCII
/// digits.
fn digits(s: &str, separator: char, kind: &str) -> Result<String, ScribeError> {
    let digits: String = s.chars().filter(|c| *c != separator).collect();
    if digits.bytes().all(|b| b.is_ascii_digit()) {
        Ok(digits)
    } else {
        Err(invalid(kind, s))
    }
}

fn year(digits: &str) -> Result<i32, ScribeError> {
    if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid("year", digits));
    }
    digits
        .parse()
        .map_err(|err| ScribeError::cannot_parse(format!("invalid year {digits}: {err}")))
}

fn full_date(y: &str, m: &str, d: &str) -> Result<VCardDate, ScribeError> {
    let year = year(y)?;
    let month = number(m, 12, "month")?;
    let day = number(d, 31, "day")?;
    NaiveDate::from_ymd_opt(year, month, day)
        .map(VCardDate::Full)
        .ok_or_else(|| invalid("date", &format!("{y}-{m}-{d}")))
}

/// Parses a possibly truncated date.
pub(super) fn parse_date(s: &str) -> Result<VCardDate, ScribeError> {
    if let Some(day) = s.strip_prefix("---") {
        return Ok(VCardDate::Day(number(day, 31, "day")?));
    }
    if let Some(rest) = s.strip_prefix("--") {
        let digits = digits(rest, '-', "date")?;
        return match digits.len() {
            2 => Ok(VCardDate::Month(number(&digits, 12, "month")?)),
            4 => Ok(VCardDate::MonthDay {
                month: number(&digits[..2], 12, "month")?,
                day: number(&digits[2..], 31, "day")?,
            }),
            _ => Err(invalid("date", s)),
        };
    }
    let parts: Vec<&str> = s.split('-').collect();
    match parts.as_slice() {
        [y, m, d] => full_date(y, m, d),
        [y, m] => Ok(VCardDate::YearMonth {
            year: year(y)?,
            month: number(m, 12, "month")?,
        }),
        [basic] if basic.len() == 8 && basic.bytes().all(|b| b.is_ascii_digit()) => {
            full_date(&basic[..4], &basic[4..6], &basic[6..])
        }
        [y] => Ok(VCardDate::Year(year(y)?)),
        _ => Err(invalid("date", s)),
    }
}

/// Parses a possibly truncated time without its offset.
fn parse_time(s: &str) -> Result<VCardTime, ScribeError> {
    // Fractional seconds are dropped.
    let s = s.split(['.', ',']).next().unwrap_or_default();
    if let Some(second) = s.strip_prefix("--") {
        return Ok(VCardTime::Second(number(second, 60, "second")?));
    }
    if let Some(rest) = s.strip_prefix('-') {
        let digits = digits(rest, ':', "time")?;
        return match digits.len() {
            2 => Ok(VCardTime::Minute(number(&digits, 59, "minute")?)),
            4 => Ok(VCardTime::MinuteSecond {
                minute: number(&digits[..2], 59, "minute")?,
                second: number(&digits[2..], 60, "second")?,
            }),
            _ => Err(invalid("time", s)),
        };
    }
    let digits = digits(s, ':', "time")?;
    match digits.len() {
        2 => Ok(VCardTime::Hour(number(&digits, 23, "hour")?)),
        4 => Ok(VCardTime::HourMinute {
            hour: number(&digits[..2], 23, "hour")?,
            minute: number(&digits[2..], 59, "minute")?,
        }),
        6 => {
            let hour = number(&digits[..2], 23, "hour")?;
            let minute = number(&digits[2..4], 59, "minute")?;
            let second = number(&digits[4..], 59, "second")?;
            NaiveTime::from_hms_opt(hour, minute, second)
                .map(VCardTime::Full)
                .ok_or_else(|| invalid("time", s))
        }
        _ => Err(invalid("time", s)),
    }
}

/// Parses a UTC offset: `Z`, `+05`, `-0500` or `-05:00`.
pub(super) fn parse_offset(s: &str) -> Result<FixedOffset, ScribeError> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("Z") {
        return FixedOffset::east_opt(0).ok_or_else(|| invalid("UTC offset", s));
    }
    let (sign, rest) = match s.as_bytes().first() {
        Some(b'+') => (1, &s[1..]),
        Some(b'-') => (-1, &s[1..]),
        _ => return Err(invalid("UTC offset", s)),
    };
    let digits = digits(rest, ':', "UTC offset")?;
    let (hours, minutes) = match digits.len() {
        2 => (number(&digits, 23, "UTC offset")?, 0),
        4 => (
            number(&digits[..2], 23, "UTC offset")?,
            number(&digits[2..], 59, "UTC offset")?,
        ),
        _ => return Err(invalid("UTC offset", s)),
    };
    let seconds = i32::try_from(hours * 3600 + minutes * 60)
        .map_err(|err| ScribeError::cannot_parse(format!("invalid UTC offset {s}: {err}")))?;
    FixedOffset::east_opt(sign * seconds).ok_or_else(|| invalid("UTC offset", s))
}

/// Splits a time from its trailing offset, if any.
fn split_offset(s: &str) -> Result<(&str, Option<FixedOffset>), ScribeError> {
    if let Some(time) = s.strip_suffix(['Z', 'z']) {
        return Ok((time, FixedOffset::east_opt(0)));
    }
    let leading = s.len() - s.trim_start_matches('-').len();
    match s[leading..].find(['+', '-']) {
        Some(index) => {
            let split = leading + index;
            Ok((&s[..split], Some(parse_offset(&s[split..])?)))
        }
        None => Ok((s, None)),
    }
}

/// Parses a `date-and-or-time` value (also covers `date`, `time` and
/// `date-time`).
pub(super) fn parse_date_and_or_time(s: &str) -> Result<DateAndOrTime, ScribeError> {
    let s = s.trim();
    if let Some(time) = s.strip_prefix(['T', 't']) {
        let (time, offset) = split_offset(time)?;
        return Ok(DateAndOrTime::Time {
            time: parse_time(time)?,
            offset,
        });
    }
    match s.split_once(['T', 't']) {
        Some((date, time)) => {
            let (time, offset) = split_offset(time)?;
            Ok(DateAndOrTime::DateTime {
                date: parse_date(date)?,
                time: parse_time(time)?,
                offset,
            })
        }
        None => Ok(DateAndOrTime::Date(parse_date(s)?)),
    }
}

/// Parses a timestamp. A bare full date reads as midnight.
pub(super) fn parse_timestamp(s: &str) -> Result<Timestamp, ScribeError> {
    let (date, time, offset) = match parse_date_and_or_time(s)? {
        DateAndOrTime::Date(VCardDate::Full(date)) => (date, NaiveTime::from_hms_opt(0, 0, 0), None),
        DateAndOrTime::DateTime {
            date: VCardDate::Full(date),
            time,
            offset,
        } => {
            let time = match time {
                VCardTime::Full(time) => Some(time),
                VCardTime::HourMinute { hour, minute } => NaiveTime::from_hms_opt(hour, minute, 0),
                VCardTime::Hour(hour) => NaiveTime::from_hms_opt(hour, 0, 0),
                VCardTime::MinuteSecond { .. } | VCardTime::Minute(_) | VCardTime::Second(_) => {
                    None
                }
            };
            (date, time, offset)
        }
        _ => return Err(invalid("timestamp", s)),
    };
    let time = time.ok_or_else(|| invalid("timestamp", s))?;
    Ok(Timestamp {
        datetime: NaiveDateTime::new(date, time),
        offset,
    })
}

fn xml_element_name(value: &DateAndOrTime) -> &'static str {
    match value {
        DateAndOrTime::Date(_) => "date",
        DateAndOrTime::DateTime { .. } => "date-time",
        DateAndOrTime::Time { .. } => "time",
        DateAndOrTime::Text(_) => "text",
    }
}

/// BDAY, ANNIVERSARY and DEATHDATE.
///
/// With `VALUE=text` (4.0) the value is free text such as "circa 1800".
#[derive(Debug, Clone)]
pub struct DateScribe {
    name: &'static str,
    versions: &'static [VCardVersion],
}

impl DateScribe {
    #[must_use]
    pub const fn birthday() -> Self {
        Self {
            name: names::BDAY,
            versions: &VCardVersion::ALL,
        }
    }

    #[must_use]
    pub const fn anniversary() -> Self {
        Self {
            name: names::ANNIVERSARY,
            versions: V4_ONLY,
        }
    }

    #[must_use]
    pub const fn deathdate() -> Self {
        Self {
            name: names::DEATHDATE,
            versions: V4_ONLY,
        }
    }

    fn value(property: &VCardProperty) -> Result<&DateAndOrTime, ScribeError> {
        property
            .value
            .as_date_and_or_time()
            .ok_or_else(|| ScribeError::wrong_type(property))
    }
}

impl Scribe for DateScribe {
    fn property_name(&self) -> &str {
        self.name
    }

    fn supported_versions(&self) -> &[VCardVersion] {
        self.versions
    }

    fn default_data_type(&self, version: VCardVersion) -> Option<VCardDataType> {
        match version {
            VCardVersion::V2_1 | VCardVersion::V3_0 => Some(VCardDataType::Date),
            VCardVersion::V4_0 => Some(VCardDataType::DateAndOrTime),
        }
    }

    fn data_type(&self, value: &VCardValue, version: VCardVersion) -> Option<VCardDataType> {
        match (value, version) {
            (VCardValue::DateAndOrTime(DateAndOrTime::Text(_)), _) => Some(VCardDataType::Text),
            (
                VCardValue::DateAndOrTime(DateAndOrTime::DateTime { .. }),
                VCardVersion::V3_0,
            ) => Some(VCardDataType::DateTime),
            _ => self.default_data_type(version),
        }
    }

    fn unmarshal_text(
        &self,
        raw: &str,
        data_type: Option<&VCardDataType>,
        _params: &mut VCardParameters,
        ctx: &mut ParseContext<'_>,
    ) -> ScribeOutcome<VCardValue> {
        if data_type == Some(&VCardDataType::Text) {
            let text = unescape_text(raw, ctx.policy());
            return ScribeOutcome::Done(VCardValue::DateAndOrTime(DateAndOrTime::Text(text)));
        }
        if raw.trim().is_empty() {
            return ScribeOutcome::skip("empty date value");
        }
        parse_date_and_or_time(raw)
            .map(VCardValue::DateAndOrTime)
            .into()
    }

    fn marshal_text(
        &self,
        property: &VCardProperty,
        ctx: &mut WriteContext<'_>,
    ) -> ScribeOutcome<String> {
        let policy = ctx.policy();
        let style = style_for(ctx.version);
        Self::value(property)
            .map(|value| match value {
                DateAndOrTime::Text(text) => escape_text(text, policy),
                temporal => temporal.format(style),
            })
            .into()
    }

    fn marshal_json(
        &self,
        property: &VCardProperty,
        _ctx: &mut WriteContext<'_>,
    ) -> ScribeOutcome<JsonValue> {
        Self::value(property)
            .map(|value| JsonValue::String(value.format(DateStyle::Extended)))
            .into()
    }

    fn unmarshal_json(
        &self,
        value: &JsonValue,
        data_type: Option<&VCardDataType>,
        _params: &mut VCardParameters,
        _ctx: &mut ParseContext<'_>,
    ) -> ScribeOutcome<VCardValue> {
        let Some(text) = value.as_str() else {
            return ScribeOutcome::Fail(ScribeError::cannot_parse("jCard date must be a string"));
        };
        if data_type == Some(&VCardDataType::Text) {
            return ScribeOutcome::Done(VCardValue::DateAndOrTime(DateAndOrTime::Text(
                text.to_string(),
            )));
        }
        parse_date_and_or_time(text)
            .map(VCardValue::DateAndOrTime)
            .into()
    }

    fn marshal_xml(
        &self,
        property: &VCardProperty,
        _ctx: &mut WriteContext<'_>,
    ) -> ScribeOutcome<XmlValue> {
        Self::value(property)
            .map(|value| XmlValue::single(xml_element_name(value), value.format(DateStyle::Basic)))
            .into()
    }

    fn unmarshal_xml(
        &self,
        element: &XmlValue,
        _params: &mut VCardParameters,
        _ctx: &mut ParseContext<'_>,
    ) -> ScribeOutcome<VCardValue> {
        if let Some(text) = element.first("text") {
            return ScribeOutcome::Done(VCardValue::DateAndOrTime(DateAndOrTime::Text(
                text.to_string(),
            )));
        }
        let value = ["date", "date-time", "time", "date-and-or-time"]
            .iter()
            .find_map(|name| element.first(name));
        match value {
            Some(value) => parse_date_and_or_time(value)
                .map(VCardValue::DateAndOrTime)
                .into(),
            None => ScribeOutcome::Fail(ScribeError::cannot_parse("no date element")),
        }
    }

    fn unmarshal_html(
        &self,
        element: &HtmlElement,
        _params: &mut VCardParameters,
        _ctx: &mut ParseContext<'_>,
    ) -> ScribeOutcome<VCardValue> {
        let value = element.value();
        if value.is_empty() {
            return ScribeOutcome::skip("empty hCard element");
        }
        parse_date_and_or_time(value)
            .map(VCardValue::DateAndOrTime)
            .into()
    }
}

/// REV: last revision timestamp.
#[derive(Debug, Clone, Copy)]
pub struct RevScribe;

impl RevScribe {
    fn timestamp(property: &VCardProperty) -> Result<&Timestamp, ScribeError> {
        match &property.value {
            VCardValue::Timestamp(ts) => Ok(ts),
            _ => Err(ScribeError::wrong_type(property)),
        }
    }
}

impl Scribe for RevScribe {
    fn property_name(&self) -> &str {
        names::REV
    }

    fn default_data_type(&self, version: VCardVersion) -> Option<VCardDataType> {
        match version {
            VCardVersion::V2_1 | VCardVersion::V3_0 => Some(VCardDataType::DateTime),
            VCardVersion::V4_0 => Some(VCardDataType::Timestamp),
        }
    }

    fn unmarshal_text(
        &self,
        raw: &str,
        _data_type: Option<&VCardDataType>,
        _params: &mut VCardParameters,
        _ctx: &mut ParseContext<'_>,
    ) -> ScribeOutcome<VCardValue> {
        if raw.trim().is_empty() {
            return ScribeOutcome::skip("empty timestamp");
        }
        parse_timestamp(raw).map(VCardValue::Timestamp).into()
    }

    fn marshal_text(
        &self,
        property: &VCardProperty,
        ctx: &mut WriteContext<'_>,
    ) -> ScribeOutcome<String> {
        let style = style_for(ctx.version);
        Self::timestamp(property).map(|ts| ts.format(style)).into()
    }

    fn marshal_json(
        &self,
        property: &VCardProperty,
        _ctx: &mut WriteContext<'_>,
    ) -> ScribeOutcome<JsonValue> {
        Self::timestamp(property)
            .map(|ts| JsonValue::String(ts.format(DateStyle::Extended)))
            .into()
    }

    fn unmarshal_json(
        &self,
        value: &JsonValue,
        _data_type: Option<&VCardDataType>,
        _params: &mut VCardParameters,
        _ctx: &mut ParseContext<'_>,
    ) -> ScribeOutcome<VCardValue> {
        match value.as_str() {
            Some(text) => parse_timestamp(text).map(VCardValue::Timestamp).into(),
            None => ScribeOutcome::Fail(ScribeError::cannot_parse("jCard REV must be a string")),
        }
    }

    fn marshal_xml(
        &self,
        property: &VCardProperty,
        _ctx: &mut WriteContext<'_>,
    ) -> ScribeOutcome<XmlValue> {
        Self::timestamp(property)
            .map(|ts| XmlValue::single("timestamp", ts.format(DateStyle::Basic)))
            .into()
    }

    fn unmarshal_xml(
        &self,
        element: &XmlValue,
        _params: &mut VCardParameters,
        _ctx: &mut ParseContext<'_>,
    ) -> ScribeOutcome<VCardValue> {
        match element.first("timestamp") {
            Some(text) => parse_timestamp(text).map(VCardValue::Timestamp).into(),
            None => ScribeOutcome::Fail(ScribeError::cannot_parse("no <timestamp> element")),
        }
    }

    fn unmarshal_html(
        &self,
        element: &HtmlElement,
        _params: &mut VCardParameters,
        _ctx: &mut ParseContext<'_>,
    ) -> ScribeOutcome<VCardValue> {
        parse_timestamp(element.value()).map(VCardValue::Timestamp).into()
    }
}
