//! 日期时间字段转换工具
//!
//! 处理字符串与 DateTime/Date/Time 之间的双向转换：
//! 指定格式时按 strftime 格式解析，未指定时按 ISO 8601 解析

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use rat_logger::warn;

use crate::error::MicroResult;
use crate::types::DataValue;

const ISO_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%:z";
const ISO_LOCAL_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
const ISO_DATE_FORMAT: &str = "%Y-%m-%d";
const ISO_TIME_FORMAT: &str = "%H:%M:%S%.f";

/// 带时区偏移的ISO 8601格式
const ISO_AWARE_FORMATS: [&str; 2] = [
    "%Y-%m-%dT%H:%M:%S%.f%z",  // 2024-01-15T14:30:00+0800
    "%Y-%m-%d %H:%M:%S%.f%z",  // 2024-01-15 14:30:00+08:00
];

/// 无时区的ISO 8601格式
const ISO_LOCAL_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",    // 2024-01-15T14:30:00.123
    "%Y-%m-%d %H:%M:%S%.f",    // 2024-01-15 14:30:00
    "%Y-%m-%dT%H:%M",          // 2024-01-15T14:30
    "%Y-%m-%d %H:%M",          // 2024-01-15 14:30
];

const ISO_TIME_FORMATS: [&str; 2] = [
    "%H:%M:%S%.f",             // 14:30:00.123
    "%H:%M",                   // 14:30
];

/// 检查 strftime 格式字符串是否有效
pub fn is_valid_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

pub fn iso_format_datetime(dt: &DateTime<FixedOffset>) -> String {
    dt.format(ISO_DATETIME_FORMAT).to_string()
}

pub fn iso_format_local_datetime(dt: &NaiveDateTime) -> String {
    dt.format(ISO_LOCAL_DATETIME_FORMAT).to_string()
}

pub fn iso_format_date(date: &NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

pub fn iso_format_time(time: &NaiveTime) -> String {
    time.format(ISO_TIME_FORMAT).to_string()
}

/// 按格式输出，格式中含有该值无法提供的字段时返回 None
fn try_format(rendered: impl std::fmt::Display) -> Option<String> {
    let mut out = String::new();
    write!(out, "{}", rendered).ok()?;
    Some(out)
}

/// 将日期时间类值按 serial_format 格式化，未指定格式时输出ISO 8601
///
/// 格式与值不兼容（例如对日期使用 `%H`）时回退为ISO格式并记录警告
pub fn format_temporal(value: &DataValue, serial_format: Option<&str>) -> Option<String> {
    let (formatted, iso) = match value {
        DataValue::DateTime(dt) => (
            serial_format.and_then(|f| try_format(dt.format(f))),
            iso_format_datetime(dt),
        ),
        DataValue::LocalDateTime(dt) => (
            serial_format.and_then(|f| try_format(dt.format(f))),
            iso_format_local_datetime(dt),
        ),
        DataValue::Date(d) => (
            serial_format.and_then(|f| try_format(d.format(f))),
            iso_format_date(d),
        ),
        DataValue::Time(t) => (
            serial_format.and_then(|f| try_format(t.format(f))),
            iso_format_time(t),
        ),
        _ => return None,
    };

    match (formatted, serial_format) {
        (Some(s), _) => Some(s),
        (None, Some(format)) => {
            warn!("序列化格式 '{}' 不适用于值 {}，回退为ISO格式", format, iso);
            Some(iso)
        }
        (None, None) => Some(iso),
    }
}

fn datetime_error(field: &str, raw: &str, kind: &str, format: &str, message: impl ToString) -> crate::error::MicroModelError {
    crate::quick_error!(
        conversion,
        field,
        format!("{:?}", raw),
        crate::i18n::tf(
            "error.invalid_datetime",
            &[("format", format), ("kind", kind), ("message", &message.to_string())],
        )
    )
}

/// 解析日期时间字符串
///
/// - 指定 `format`：含时区偏移时得到 `DataValue::DateTime`，否则为 `LocalDateTime`；
///   仅含日期的格式解析为当日零点
/// - 未指定：依次尝试 RFC3339、带偏移的ISO格式、本地ISO格式、纯日期
pub fn parse_datetime(field: &str, raw: &str, format: Option<&str>) -> MicroResult<DataValue> {
    let raw_trimmed = raw.trim();

    match format {
        Some(format) => {
            if let Ok(dt) = DateTime::parse_from_str(raw_trimmed, format) {
                return Ok(DataValue::DateTime(dt));
            }
            match NaiveDateTime::parse_from_str(raw_trimmed, format) {
                Ok(dt) => Ok(DataValue::LocalDateTime(dt)),
                Err(naive_err) => {
                    if let Ok(date) = NaiveDate::parse_from_str(raw_trimmed, format) {
                        if let Some(dt) = date.and_hms_opt(0, 0, 0) {
                            return Ok(DataValue::LocalDateTime(dt));
                        }
                    }
                    Err(datetime_error(field, raw, "datetime", format, naive_err))
                }
            }
        }
        None => {
            if let Ok(dt) = DateTime::parse_from_rfc3339(raw_trimmed) {
                return Ok(DataValue::DateTime(dt));
            }
            for candidate in &ISO_AWARE_FORMATS {
                if let Ok(dt) = DateTime::parse_from_str(raw_trimmed, candidate) {
                    return Ok(DataValue::DateTime(dt));
                }
            }
            for candidate in &ISO_LOCAL_FORMATS {
                if let Ok(dt) = NaiveDateTime::parse_from_str(raw_trimmed, candidate) {
                    return Ok(DataValue::LocalDateTime(dt));
                }
            }
            match NaiveDate::parse_from_str(raw_trimmed, ISO_DATE_FORMAT) {
                Ok(date) => date
                    .and_hms_opt(0, 0, 0)
                    .map(DataValue::LocalDateTime)
                    .ok_or_else(|| datetime_error(field, raw, "datetime", "ISO 8601", "invalid midnight")),
                Err(e) => Err(datetime_error(field, raw, "datetime", "ISO 8601", e)),
            }
        }
    }
}

/// 解析日期字符串；无法直接解析为日期时取日期时间的日期部分
pub fn parse_date(field: &str, raw: &str, format: Option<&str>) -> MicroResult<NaiveDate> {
    let raw_trimmed = raw.trim();
    let date_format = format.unwrap_or(ISO_DATE_FORMAT);

    if let Ok(date) = NaiveDate::parse_from_str(raw_trimmed, date_format) {
        return Ok(date);
    }

    match parse_datetime(field, raw, format) {
        Ok(DataValue::DateTime(dt)) => Ok(dt.date_naive()),
        Ok(DataValue::LocalDateTime(dt)) => Ok(dt.date()),
        Ok(_) => Err(datetime_error(field, raw, "date", date_format, "unexpected value")),
        Err(_) => {
            let message = NaiveDate::parse_from_str(raw_trimmed, date_format)
                .err()
                .map(|e| e.to_string())
                .unwrap_or_default();
            Err(datetime_error(field, raw, "date", date_format, message))
        }
    }
}

/// 解析时间字符串；无法直接解析为时间时取日期时间的时间部分
pub fn parse_time(field: &str, raw: &str, format: Option<&str>) -> MicroResult<NaiveTime> {
    let raw_trimmed = raw.trim();

    let direct = match format {
        Some(format) => NaiveTime::parse_from_str(raw_trimmed, format).ok(),
        None => ISO_TIME_FORMATS
            .iter()
            .find_map(|candidate| NaiveTime::parse_from_str(raw_trimmed, candidate).ok()),
    };
    if let Some(time) = direct {
        return Ok(time);
    }

    match parse_datetime(field, raw, format) {
        Ok(DataValue::DateTime(dt)) => Ok(dt.time()),
        Ok(DataValue::LocalDateTime(dt)) => Ok(dt.time()),
        _ => Err(datetime_error(
            field,
            raw,
            "time",
            format.unwrap_or("ISO 8601"),
            "input does not match",
        )),
    }
}
