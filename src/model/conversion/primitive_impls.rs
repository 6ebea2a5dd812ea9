//! 基础类型字段的转换实现
//!
//! Char、Integer、Float、Decimal、Boolean、UUID 字段的 `to_python` 方向

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use uuid::Uuid;

use crate::error::{MicroModelError, MicroResult};
use crate::types::DataValue;

/// 构造类型不匹配错误
pub(crate) fn type_mismatch(field: &str, value: &DataValue, expected: &str) -> MicroModelError {
    crate::quick_error!(
        conversion,
        field,
        value.to_json_value(),
        crate::i18n::tf(
            "error.type_mismatch",
            &[("expected", expected), ("actual", value.type_name())],
        )
    )
}

fn invalid_number(field: &str, value: &DataValue, expected: &str, message: impl ToString) -> MicroModelError {
    crate::quick_error!(
        conversion,
        field,
        value.to_json_value(),
        crate::i18n::tf(
            "error.invalid_number",
            &[("expected", expected), ("message", &message.to_string())],
        )
    )
}

fn integer_overflow(field: &str, value: &DataValue) -> MicroModelError {
    crate::quick_error!(
        conversion,
        field,
        value.to_json_value(),
        crate::i18n::t("error.integer_overflow")
    )
}

/// Char：字符串原样保留，标量转为文本形式
pub fn to_char(field: &str, value: DataValue) -> MicroResult<DataValue> {
    match value {
        DataValue::String(_) => Ok(value),
        DataValue::Json(serde_json::Value::String(s)) => Ok(DataValue::String(s)),
        DataValue::Bool(_)
        | DataValue::Int(_)
        | DataValue::UInt(_)
        | DataValue::Float(_)
        | DataValue::Decimal(_)
        | DataValue::Uuid(_)
        | DataValue::DateTime(_)
        | DataValue::LocalDateTime(_)
        | DataValue::Date(_)
        | DataValue::Time(_) => Ok(DataValue::String(value.to_string())),
        DataValue::Json(json) => to_char(field, DataValue::from(json)),
        other => Err(type_mismatch(field, &other, "string")),
    }
}

/// Integer：浮点数向零截断，字符串去除首尾空白后解析，布尔值为 0/1
pub fn to_integer(field: &str, value: DataValue) -> MicroResult<DataValue> {
    match value {
        DataValue::Int(_) => Ok(value),
        DataValue::UInt(u) => i64::try_from(u)
            .map(DataValue::Int)
            .map_err(|_| integer_overflow(field, &value)),
        DataValue::Float(f) => {
            let truncated = f.trunc();
            if !f.is_finite() || truncated < i64::MIN as f64 || truncated >= i64::MAX as f64 {
                return Err(integer_overflow(field, &value));
            }
            Ok(DataValue::Int(truncated as i64))
        }
        DataValue::Decimal(d) => d
            .trunc()
            .to_i64()
            .map(DataValue::Int)
            .ok_or_else(|| integer_overflow(field, &value)),
        DataValue::Bool(b) => Ok(DataValue::Int(i64::from(b))),
        DataValue::String(ref s) => s
            .trim()
            .parse::<i64>()
            .map(DataValue::Int)
            .map_err(|e| invalid_number(field, &value, "integer", e)),
        DataValue::Json(json) => to_integer(field, DataValue::from(json)),
        other => Err(type_mismatch(field, &other, "integer")),
    }
}

/// Float：接受任意有限数值、数字字符串与布尔值；`inf`、`NaN` 等非有限值被拒绝
pub fn to_float(field: &str, value: DataValue) -> MicroResult<DataValue> {
    match value {
        DataValue::Float(f) if !f.is_finite() => {
            Err(invalid_number(field, &value, "float", "non-finite float"))
        }
        DataValue::Float(_) => Ok(value),
        DataValue::Int(i) => Ok(DataValue::Float(i as f64)),
        DataValue::UInt(u) => Ok(DataValue::Float(u as f64)),
        DataValue::Decimal(d) => d
            .to_f64()
            .map(DataValue::Float)
            .ok_or_else(|| invalid_number(field, &value, "float", "decimal out of range")),
        DataValue::Bool(b) => Ok(DataValue::Float(if b { 1.0 } else { 0.0 })),
        DataValue::String(ref s) => match s.trim().parse::<f64>() {
            Ok(f) if f.is_finite() => Ok(DataValue::Float(f)),
            Ok(_) => Err(invalid_number(field, &value, "float", "non-finite float")),
            Err(e) => Err(invalid_number(field, &value, "float", e)),
        },
        DataValue::Json(json) => to_float(field, DataValue::from(json)),
        other => Err(type_mismatch(field, &other, "float")),
    }
}

fn parse_decimal_text(text: &str) -> Result<Decimal, rust_decimal::Error> {
    let text = text.trim();
    if text.contains(['e', 'E']) {
        Decimal::from_scientific(text)
    } else {
        Decimal::from_str_exact(text)
    }
}

/// Decimal：字符串按精确十进制解析，浮点数经由最短十进制表示解析
pub fn to_decimal(field: &str, value: DataValue) -> MicroResult<DataValue> {
    match value {
        DataValue::Decimal(_) => Ok(value),
        DataValue::Int(i) => Ok(DataValue::Decimal(Decimal::from(i))),
        DataValue::UInt(u) => Decimal::from_u64(u)
            .map(DataValue::Decimal)
            .ok_or_else(|| invalid_number(field, &value, "decimal", "out of range")),
        DataValue::Float(f) => {
            if !f.is_finite() {
                return Err(invalid_number(field, &value, "decimal", "non-finite float"));
            }
            // f64 的 Display 输出最短往返表示，等同于对 repr 取值
            parse_decimal_text(&f.to_string())
                .map(DataValue::Decimal)
                .map_err(|e| invalid_number(field, &value, "decimal", e))
        }
        DataValue::String(ref s) => parse_decimal_text(s)
            .map(DataValue::Decimal)
            .map_err(|e| invalid_number(field, &value, "decimal", e)),
        DataValue::Json(json) => to_decimal(field, DataValue::from(json)),
        other => Err(type_mismatch(field, &other, "decimal")),
    }
}

/// Boolean：字符串仅 `"true"`（忽略大小写与空白）为真，数值大于零为真，
/// 容器非空为真
pub fn to_boolean(field: &str, value: DataValue) -> MicroResult<DataValue> {
    let truthy = match value {
        DataValue::Bool(b) => b,
        DataValue::String(ref s) => s.trim().eq_ignore_ascii_case("true"),
        DataValue::Int(i) => i > 0,
        DataValue::UInt(u) => u > 0,
        DataValue::Float(f) => f != 0.0 && !f.is_nan(),
        DataValue::Decimal(d) => !d.is_zero(),
        DataValue::Array(ref arr) => !arr.is_empty(),
        DataValue::Object(ref obj) => !obj.is_empty(),
        DataValue::Json(json) => return to_boolean(field, DataValue::from(json)),
        DataValue::Null => false,
        DataValue::DateTime(_)
        | DataValue::LocalDateTime(_)
        | DataValue::Date(_)
        | DataValue::Time(_)
        | DataValue::Uuid(_)
        | DataValue::Model(_) => true,
    };
    Ok(DataValue::Bool(truthy))
}

/// UUID：接受连字符、无连字符、花括号与 URN 形式的文本
pub fn to_uuid(field: &str, value: DataValue) -> MicroResult<DataValue> {
    match value {
        DataValue::Uuid(_) => Ok(value),
        DataValue::String(ref s) => Uuid::from_str(s.trim())
            .map(DataValue::Uuid)
            .map_err(|e| {
                crate::quick_error!(
                    conversion,
                    field,
                    value.to_json_value(),
                    crate::i18n::tf("error.invalid_uuid", &[("message", &e.to_string())])
                )
            }),
        DataValue::Json(json) => to_uuid(field, DataValue::from(json)),
        other => Err(type_mismatch(field, &other, "uuid")),
    }
}
