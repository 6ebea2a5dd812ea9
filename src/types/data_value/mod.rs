use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::model::conversion::datetime_conversion::{
    iso_format_date, iso_format_datetime, iso_format_local_datetime, iso_format_time,
};
use crate::model::ModelInstance;

/// 通用数据值类型 - 模型字段在Rust侧的类型化表示
///
/// 原始JSON值按结构转换为 `Null/Bool/Int/UInt/Float/String/Array/Object`，
/// 字段的 `to_python` 再将其转换为字段声明的类型
#[derive(Debug, Clone, PartialEq)]
pub enum DataValue {
    /// 空值
    Null,
    /// 布尔值
    Bool(bool),
    /// 整数
    Int(i64),
    /// 无符号整数（超出i64范围的JSON整数）
    UInt(u64),
    /// 浮点数
    Float(f64),
    /// 精确十进制数
    Decimal(Decimal),
    /// 字符串
    String(String),
    /// 带时区偏移的日期时间
    DateTime(DateTime<FixedOffset>),
    /// 无时区的本地日期时间
    LocalDateTime(NaiveDateTime),
    /// 日期
    Date(NaiveDate),
    /// 时间
    Time(NaiveTime),
    /// UUID
    Uuid(Uuid),
    /// 未解析的任意JSON结构
    Json(serde_json::Value),
    /// 数组
    Array(Vec<DataValue>),
    /// 对象/字典
    Object(IndexMap<String, DataValue>),
    /// 嵌套模型实例
    Model(ModelInstance),
}

impl std::fmt::Display for DataValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataValue::Null => write!(f, "null"),
            DataValue::Bool(b) => write!(f, "{}", b),
            DataValue::Int(i) => write!(f, "{}", i),
            DataValue::UInt(u) => write!(f, "{}", u),
            DataValue::Float(fl) => write!(f, "{}", fl),
            DataValue::Decimal(d) => write!(f, "{}", d),
            DataValue::String(s) => write!(f, "{}", s),
            DataValue::DateTime(dt) => write!(f, "{}", iso_format_datetime(dt)),
            DataValue::LocalDateTime(dt) => write!(f, "{}", iso_format_local_datetime(dt)),
            DataValue::Date(d) => write!(f, "{}", iso_format_date(d)),
            DataValue::Time(t) => write!(f, "{}", iso_format_time(t)),
            DataValue::Uuid(uuid) => write!(f, "{}", uuid),
            DataValue::Json(json) => write!(f, "{}", json),
            DataValue::Array(_) | DataValue::Object(_) | DataValue::Model(_) => {
                write!(f, "{}", self.to_json_value())
            }
        }
    }
}

impl DataValue {
    /// 获取数据类型名称
    pub fn type_name(&self) -> &'static str {
        match self {
            DataValue::Null => "null",
            DataValue::Bool(_) => "boolean",
            DataValue::Int(_) => "integer",
            DataValue::UInt(_) => "unsigned_integer",
            DataValue::Float(_) => "float",
            DataValue::Decimal(_) => "decimal",
            DataValue::String(_) => "string",
            DataValue::DateTime(_) => "datetime",
            DataValue::LocalDateTime(_) => "datetime",
            DataValue::Date(_) => "date",
            DataValue::Time(_) => "time",
            DataValue::Uuid(_) => "uuid",
            DataValue::Json(_) => "json",
            DataValue::Array(_) => "array",
            DataValue::Object(_) => "object",
            DataValue::Model(_) => "model",
        }
    }

    /// 判断是否为空值
    pub fn is_null(&self) -> bool {
        matches!(self, DataValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            DataValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            DataValue::Int(i) => Some(*i),
            DataValue::UInt(u) => i64::try_from(*u).ok(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            DataValue::Float(f) => Some(*f),
            DataValue::Int(i) => Some(*i as f64),
            DataValue::UInt(u) => Some(*u as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DataValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            DataValue::Decimal(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            DataValue::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    pub fn as_local_datetime(&self) -> Option<&NaiveDateTime> {
        match self {
            DataValue::LocalDateTime(dt) => Some(dt),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            DataValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_time(&self) -> Option<NaiveTime> {
        match self {
            DataValue::Time(t) => Some(*t),
            _ => None,
        }
    }

    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            DataValue::Uuid(u) => Some(*u),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            DataValue::Json(j) => Some(j),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[DataValue]> {
        match self {
            DataValue::Array(arr) => Some(arr.as_slice()),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, DataValue>> {
        match self {
            DataValue::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_model(&self) -> Option<&ModelInstance> {
        match self {
            DataValue::Model(instance) => Some(instance),
            _ => None,
        }
    }

    /// 不依赖字段定义的通用JSON表示
    ///
    /// 字段感知的序列化请使用 `FieldDefinition::to_serial`
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            DataValue::Null => serde_json::Value::Null,
            DataValue::Bool(b) => serde_json::Value::Bool(*b),
            DataValue::Int(i) => serde_json::Value::Number(serde_json::Number::from(*i)),
            DataValue::UInt(u) => serde_json::Value::Number(serde_json::Number::from(*u)),
            DataValue::Float(f) => {
                serde_json::Number::from_f64(*f)
                    .map(serde_json::Value::Number)
                    .unwrap_or(serde_json::Value::Null)
            }
            DataValue::Decimal(d) => serde_json::Value::String(d.to_string()),
            DataValue::String(s) => serde_json::Value::String(s.clone()),
            DataValue::DateTime(dt) => serde_json::Value::String(iso_format_datetime(dt)),
            DataValue::LocalDateTime(dt) => {
                serde_json::Value::String(iso_format_local_datetime(dt))
            }
            DataValue::Date(d) => serde_json::Value::String(iso_format_date(d)),
            DataValue::Time(t) => serde_json::Value::String(iso_format_time(t)),
            DataValue::Uuid(u) => serde_json::Value::String(u.to_string()),
            DataValue::Json(j) => j.clone(),
            DataValue::Array(arr) => {
                serde_json::Value::Array(arr.iter().map(DataValue::to_json_value).collect())
            }
            DataValue::Object(obj) => {
                let json_object: serde_json::Map<String, serde_json::Value> = obj
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json_value()))
                    .collect();
                serde_json::Value::Object(json_object)
            }
            DataValue::Model(instance) => serde_json::Value::Object(instance.to_serial_dict()),
        }
    }

    /// 从 JSON 值按结构解析
    pub fn from_json_value(value: serde_json::Value) -> Self {
        json_value_to_data_value(value)
    }
}

impl From<bool> for DataValue {
    fn from(value: bool) -> Self {
        DataValue::Bool(value)
    }
}

impl From<i32> for DataValue {
    fn from(value: i32) -> Self {
        DataValue::Int(value as i64)
    }
}

impl From<i64> for DataValue {
    fn from(value: i64) -> Self {
        DataValue::Int(value)
    }
}

impl From<u64> for DataValue {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(i) => DataValue::Int(i),
            Err(_) => DataValue::UInt(value),
        }
    }
}

impl From<f32> for DataValue {
    fn from(value: f32) -> Self {
        DataValue::Float(value as f64)
    }
}

impl From<f64> for DataValue {
    fn from(value: f64) -> Self {
        DataValue::Float(value)
    }
}

impl From<Decimal> for DataValue {
    fn from(value: Decimal) -> Self {
        DataValue::Decimal(value)
    }
}

impl From<String> for DataValue {
    fn from(value: String) -> Self {
        DataValue::String(value)
    }
}

impl From<&str> for DataValue {
    fn from(value: &str) -> Self {
        DataValue::String(value.to_string())
    }
}

impl From<DateTime<FixedOffset>> for DataValue {
    fn from(value: DateTime<FixedOffset>) -> Self {
        DataValue::DateTime(value)
    }
}

impl From<DateTime<chrono::Utc>> for DataValue {
    fn from(value: DateTime<chrono::Utc>) -> Self {
        DataValue::DateTime(value.fixed_offset())
    }
}

impl From<NaiveDateTime> for DataValue {
    fn from(value: NaiveDateTime) -> Self {
        DataValue::LocalDateTime(value)
    }
}

impl From<NaiveDate> for DataValue {
    fn from(value: NaiveDate) -> Self {
        DataValue::Date(value)
    }
}

impl From<NaiveTime> for DataValue {
    fn from(value: NaiveTime) -> Self {
        DataValue::Time(value)
    }
}

impl From<Uuid> for DataValue {
    fn from(value: Uuid) -> Self {
        DataValue::Uuid(value)
    }
}

/// 原始JSON按结构转换；需要保留未解析JSON时请直接构造 `DataValue::Json`
impl From<serde_json::Value> for DataValue {
    fn from(value: serde_json::Value) -> Self {
        json_value_to_data_value(value)
    }
}

impl From<ModelInstance> for DataValue {
    fn from(value: ModelInstance) -> Self {
        DataValue::Model(value)
    }
}

impl<T: Into<DataValue>> From<Vec<T>> for DataValue {
    fn from(value: Vec<T>) -> Self {
        DataValue::Array(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<DataValue>> From<Option<T>> for DataValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(DataValue::Null)
    }
}

/// 将 serde_json::Value 按结构转换为对应的 DataValue 类型
/// 而不是简单包装为 DataValue::Json
pub fn json_value_to_data_value(value: serde_json::Value) -> DataValue {
    match value {
        serde_json::Value::Null => DataValue::Null,
        serde_json::Value::Bool(b) => DataValue::Bool(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                DataValue::Int(i)
            } else if let Some(u) = n.as_u64() {
                DataValue::UInt(u)
            } else if let Some(f) = n.as_f64() {
                DataValue::Float(f)
            } else {
                DataValue::Json(serde_json::Value::Number(n))
            }
        }
        serde_json::Value::String(s) => DataValue::String(s),
        serde_json::Value::Array(arr) => {
            // 递归转换数组元素为DataValue
            DataValue::Array(arr.into_iter().map(json_value_to_data_value).collect())
        }
        serde_json::Value::Object(obj) => {
            // 递归转换对象，保持键顺序
            let data_object: IndexMap<String, DataValue> = obj
                .into_iter()
                .map(|(k, v)| (k, json_value_to_data_value(v)))
                .collect();
            DataValue::Object(data_object)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_value_structural_conversion() {
        let value = DataValue::from(json!({
            "id": 7,
            "big": 18446744073709551615u64,
            "ratio": 0.5,
            "tags": ["a", null],
        }));

        let obj = value.as_object().expect("应为对象");
        assert_eq!(obj.get("id"), Some(&DataValue::Int(7)));
        assert_eq!(obj.get("big"), Some(&DataValue::UInt(u64::MAX)));
        assert_eq!(obj.get("ratio"), Some(&DataValue::Float(0.5)));
        assert_eq!(
            obj.get("tags"),
            Some(&DataValue::Array(vec![DataValue::from("a"), DataValue::Null]))
        );
        let keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["id", "big", "ratio", "tags"]);
    }

    #[test]
    fn test_generic_json_rendering() {
        let date = NaiveDate::from_ymd_opt(1906, 5, 11).unwrap();
        assert_eq!(DataValue::Date(date).to_json_value(), json!("1906-05-11"));
        assert_eq!(DataValue::Float(f64::NAN).to_json_value(), serde_json::Value::Null);
        assert_eq!(DataValue::from(Some(3)).to_json_value(), json!(3));
        assert_eq!(DataValue::from(None::<i64>), DataValue::Null);
    }

    #[test]
    fn test_accessors() {
        assert_eq!(DataValue::Int(3).as_f64(), Some(3.0));
        assert_eq!(DataValue::UInt(u64::MAX).as_i64(), None);
        assert_eq!(DataValue::from("x").as_str(), Some("x"));
        assert!(DataValue::Null.is_null());
        assert_eq!(DataValue::Bool(true).type_name(), "boolean");
    }
}
