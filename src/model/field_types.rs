//! 字段类型定义模块
//!
//! 定义模型字段的类型、来源键、默认值，以及字段的双向转换：
//! `to_python` 将原始值转换为类型化值，`to_serial` 将类型化值转换为JSON安全的值

use std::sync::Arc;

use rat_logger::debug;

use crate::error::MicroResult;
use crate::model::conversion::{self, primitive_impls::type_mismatch};
use crate::model::instance::ModelInstance;
use crate::model::schema::ModelSchema;
use crate::serializer::{SerializerConfig, UuidFormat};
use crate::types::DataValue;

/// 字段类型枚举
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    /// 字符串类型
    Char,
    /// 整数类型
    Integer,
    /// 浮点数类型
    Float,
    /// 精确十进制类型
    Decimal,
    /// 布尔类型
    Boolean,
    /// 日期时间类型
    DateTime {
        /// 解析格式（strftime），为空时按ISO 8601解析
        format: Option<String>,
        /// 序列化格式（strftime），为空时沿用 `format`，两者均为空时输出ISO 8601
        serial_format: Option<String>,
    },
    /// 日期类型
    Date {
        format: Option<String>,
        serial_format: Option<String>,
    },
    /// 时间类型
    Time {
        format: Option<String>,
        serial_format: Option<String>,
    },
    /// UUID类型
    Uuid,
    /// JSON类型，原样保留任意JSON结构
    Json,
    /// 嵌套模型
    Model {
        schema: Arc<ModelSchema>,
    },
    /// 嵌套模型列表
    ModelCollection {
        schema: Arc<ModelSchema>,
    },
    /// 同类字段列表
    FieldCollection {
        item: Box<FieldDefinition>,
    },
}

impl FieldType {
    /// 获取字段类型名称
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::Char => "char",
            FieldType::Integer => "integer",
            FieldType::Float => "float",
            FieldType::Decimal => "decimal",
            FieldType::Boolean => "boolean",
            FieldType::DateTime { .. } => "datetime",
            FieldType::Date { .. } => "date",
            FieldType::Time { .. } => "time",
            FieldType::Uuid => "uuid",
            FieldType::Json => "json",
            FieldType::Model { .. } => "model",
            FieldType::ModelCollection { .. } => "model_collection",
            FieldType::FieldCollection { .. } => "field_collection",
        }
    }
}

/// 字段定义
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefinition {
    /// 字段类型
    pub field_type: FieldType,
    /// 源数据中的键名，为空时使用字段名
    pub source: Option<String>,
    /// 源数据缺少该键时使用的默认值（同样经过 `to_python` 转换）
    pub default: Option<DataValue>,
    /// 字段描述
    pub description: Option<String>,
}

impl FieldDefinition {
    /// 创建新的字段定义
    pub fn new(field_type: FieldType) -> Self {
        Self {
            field_type,
            source: None,
            default: None,
            description: None,
        }
    }

    /// 设置源数据键名
    pub fn source(mut self, key: &str) -> Self {
        self.source = Some(key.to_string());
        self
    }

    /// 设置默认值
    pub fn with_default(mut self, value: impl Into<DataValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// 设置字段描述
    pub fn description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    /// 字段在源数据中的键名
    pub fn source_key<'a>(&'a self, name: &'a str) -> &'a str {
        self.source.as_deref().unwrap_or(name)
    }

    /// 将原始值转换为字段声明的类型
    ///
    /// `field` 用于错误信息中的字段路径。空值对任何类型都保持为空值；
    /// 已经是目标类型的值原样返回。
    pub fn to_python(&self, field: &str, raw: DataValue) -> MicroResult<DataValue> {
        if raw.is_null() {
            return Ok(DataValue::Null);
        }

        match &self.field_type {
            FieldType::Char => conversion::to_char(field, raw),
            FieldType::Integer => conversion::to_integer(field, raw),
            FieldType::Float => conversion::to_float(field, raw),
            FieldType::Decimal => conversion::to_decimal(field, raw),
            FieldType::Boolean => conversion::to_boolean(field, raw),
            FieldType::Uuid => conversion::to_uuid(field, raw),
            FieldType::DateTime { format, serial_format } => match raw {
                DataValue::DateTime(_) | DataValue::LocalDateTime(_) => Ok(raw),
                DataValue::Date(d) => d
                    .and_hms_opt(0, 0, 0)
                    .map(DataValue::LocalDateTime)
                    .ok_or_else(|| type_mismatch(field, &raw, "datetime")),
                DataValue::String(ref s) => {
                    parse_with_formats(field, s, format, serial_format, conversion::parse_datetime)
                }
                DataValue::Json(json) => self.to_python(field, DataValue::from(json)),
                other => Err(type_mismatch(field, &other, "datetime")),
            },
            FieldType::Date { format, serial_format } => match raw {
                DataValue::Date(_) => Ok(raw),
                DataValue::DateTime(dt) => Ok(DataValue::Date(dt.date_naive())),
                DataValue::LocalDateTime(dt) => Ok(DataValue::Date(dt.date())),
                DataValue::String(ref s) => {
                    parse_with_formats(field, s, format, serial_format, conversion::parse_date)
                        .map(DataValue::Date)
                }
                DataValue::Json(json) => self.to_python(field, DataValue::from(json)),
                other => Err(type_mismatch(field, &other, "date")),
            },
            FieldType::Time { format, serial_format } => match raw {
                DataValue::Time(_) => Ok(raw),
                DataValue::DateTime(dt) => Ok(DataValue::Time(dt.time())),
                DataValue::LocalDateTime(dt) => Ok(DataValue::Time(dt.time())),
                DataValue::String(ref s) => {
                    parse_with_formats(field, s, format, serial_format, conversion::parse_time)
                        .map(DataValue::Time)
                }
                DataValue::Json(json) => self.to_python(field, DataValue::from(json)),
                other => Err(type_mismatch(field, &other, "time")),
            },
            FieldType::Json => match raw {
                DataValue::Json(_) => Ok(raw),
                other => Ok(DataValue::Json(other.to_json_value())),
            },
            FieldType::Model { schema } => convert_model(schema, field, raw),
            FieldType::ModelCollection { schema } => match raw {
                DataValue::Array(items) => items
                    .into_iter()
                    .enumerate()
                    .map(|(index, item)| {
                        convert_model(schema, &format!("[{}]", index), item)
                            .map_err(|e| e.nested_under(field))
                    })
                    .collect::<MicroResult<Vec<_>>>()
                    .map(DataValue::Array),
                DataValue::Json(json) => self.to_python(field, DataValue::from(json)),
                other => Err(type_mismatch(field, &other, "array")),
            },
            FieldType::FieldCollection { item } => match raw {
                DataValue::Array(items) => items
                    .into_iter()
                    .enumerate()
                    .map(|(index, value)| {
                        item.item_to_python(&format!("[{}]", index), value)
                            .map_err(|e| e.nested_under(field))
                    })
                    .collect::<MicroResult<Vec<_>>>()
                    .map(DataValue::Array),
                DataValue::Json(json) => self.to_python(field, DataValue::from(json)),
                other => Err(type_mismatch(field, &other, "array")),
            },
        }
    }

    /// 列表元素转换：空元素使用元素字段的默认值
    fn item_to_python(&self, field: &str, value: DataValue) -> MicroResult<DataValue> {
        match (&value, &self.default) {
            (DataValue::Null, Some(default)) => self.to_python(field, default.clone()),
            _ => self.to_python(field, value),
        }
    }

    /// 将类型化值转换为JSON安全的值
    ///
    /// 值只会通过 `to_python` 进入模型，因此序列化总是成功；
    /// 与字段类型不对应的值按通用JSON表示输出
    ///
    /// 日期时间类值按 `serial_format` 输出，未指定时使用解析格式 `format`
    pub fn to_serial(&self, value: &DataValue, config: &SerializerConfig) -> serde_json::Value {
        if value.is_null() {
            return serde_json::Value::Null;
        }

        match (&self.field_type, value) {
            (
                FieldType::DateTime { format, serial_format }
                | FieldType::Date { format, serial_format }
                | FieldType::Time { format, serial_format },
                temporal,
            ) => conversion::format_temporal(temporal, serial_format.as_deref().or(format.as_deref()))
                .map(serde_json::Value::String)
                .unwrap_or_else(|| temporal.to_json_value()),
            (FieldType::Uuid, DataValue::Uuid(uuid)) => serde_json::Value::String(match config.uuid_format {
                UuidFormat::Hyphenated => uuid.hyphenated().to_string(),
                UuidFormat::Simple => uuid.simple().to_string(),
            }),
            (FieldType::Model { .. }, DataValue::Model(instance)) => {
                serde_json::Value::Object(instance.to_serial_dict_with(config))
            }
            (FieldType::ModelCollection { .. }, DataValue::Array(items)) => serde_json::Value::Array(
                items
                    .iter()
                    .map(|item| match item {
                        DataValue::Model(instance) => {
                            serde_json::Value::Object(instance.to_serial_dict_with(config))
                        }
                        other => other.to_json_value(),
                    })
                    .collect(),
            ),
            (FieldType::FieldCollection { item }, DataValue::Array(items)) => serde_json::Value::Array(
                items.iter().map(|value| item.to_serial(value, config)).collect(),
            ),
            (_, other) => other.to_json_value(),
        }
    }

    /// 检查字段定义自身是否有效（格式字符串）
    pub(crate) fn validate_definition(&self, model: &str, name: &str) -> MicroResult<()> {
        match &self.field_type {
            FieldType::DateTime { format, serial_format }
            | FieldType::Date { format, serial_format }
            | FieldType::Time { format, serial_format } => {
                for candidate in [format, serial_format].into_iter().flatten() {
                    if !conversion::is_valid_format(candidate) {
                        return Err(crate::quick_error!(
                            schema,
                            model,
                            crate::i18n::tf(
                                "error.invalid_format",
                                &[("name", name), ("format", candidate.as_str())],
                            )
                        ));
                    }
                }
                Ok(())
            }
            FieldType::FieldCollection { item } => item.validate_definition(model, name),
            _ => Ok(()),
        }
    }
}

/// 日期时间类文本解析：先按 `format`，失败后按 `serial_format`
///
/// 两者均未指定时按ISO 8601解析。两次都失败时返回按 `format` 解析的错误
fn parse_with_formats<T>(
    field: &str,
    raw: &str,
    format: &Option<String>,
    serial_format: &Option<String>,
    parse: impl Fn(&str, &str, Option<&str>) -> MicroResult<T>,
) -> MicroResult<T> {
    let first = parse(field, raw, format.as_deref());
    match (first, serial_format.as_deref()) {
        (Ok(value), _) => Ok(value),
        (Err(err), Some(serial)) if Some(serial) != format.as_deref() => {
            parse(field, raw, Some(serial)).map_err(|_| err)
        }
        (Err(err), _) => Err(err),
    }
}

/// 嵌套模型转换：属于同一模型元数据的实例原样保留，对象经由嵌套模型的 `from_dict` 构造
fn convert_model(schema: &Arc<ModelSchema>, field: &str, raw: DataValue) -> MicroResult<DataValue> {
    match raw {
        DataValue::Model(ref instance) => {
            if instance.is_instance_of(schema) {
                Ok(raw)
            } else {
                Err(crate::quick_error!(
                    conversion,
                    field,
                    instance.schema().name(),
                    crate::i18n::tf(
                        "error.model_mismatch",
                        &[("expected", schema.name()), ("actual", instance.schema().name())],
                    )
                ))
            }
        }
        DataValue::Object(map) => {
            debug!("构造嵌套模型 {} (字段: {})", schema.name(), field);
            ModelInstance::from_data_map(Arc::clone(schema), map)
                .map(DataValue::Model)
                .map_err(|e| e.nested_under(field))
        }
        DataValue::Json(json) => convert_model(schema, field, DataValue::from(json)),
        other => Err(type_mismatch(field, &other, "object")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::convenience::*;
    use serde_json::json;

    fn serial(def: &FieldDefinition, value: &DataValue) -> serde_json::Value {
        def.to_serial(value, &SerializerConfig::default())
    }

    /// to_python(to_serial(to_python(raw))) == to_python(raw)
    fn assert_round_trip(def: FieldDefinition, raw: serde_json::Value) {
        let parsed = def.to_python("f", DataValue::from(raw)).unwrap();
        let serialized = serial(&def, &parsed);
        let reparsed = def.to_python("f", DataValue::from(serialized)).unwrap();
        assert_eq!(reparsed, parsed);
    }

    #[test]
    fn test_scalar_round_trips() {
        assert_round_trip(char_field(), json!("hello"));
        assert_round_trip(integer_field(), json!("42"));
        assert_round_trip(float_field(), json!(2.75));
        assert_round_trip(decimal_field(), json!("19.990"));
        assert_round_trip(boolean_field(), json!("True"));
        assert_round_trip(uuid_field(), json!("67e5504410b1426f9247bb680e5fe0c8"));
        assert_round_trip(json_field(), json!({"nested": [1, 2, {"x": null}]}));
    }

    #[test]
    fn test_temporal_round_trips() {
        assert_round_trip(datetime_field(None, None), json!("2024-01-15T14:30:00.5+08:00"));
        assert_round_trip(
            datetime_field(Some("%a %b %d %H:%M:%S %z %Y"), Some("%a %b %d %H:%M:%S %z %Y")),
            json!("Mon May 17 15:05:47 +0000 2010"),
        );
        assert_round_trip(date_field(Some("%Y-%m-%d"), None), json!("1948-11-02"));
        assert_round_trip(time_field(None, None), json!("08:15:30"));
    }

    #[test]
    fn test_parse_format_is_reused_for_output() {
        let def = datetime_field(Some("%a %b %d %H:%M:%S %z %Y"), None);
        let value = def
            .to_python("created_at", DataValue::from("Mon May 17 15:05:47 +0000 2010"))
            .unwrap();
        assert_eq!(serial(&def, &value), json!("Mon May 17 15:05:47 +0000 2010"));

        assert_round_trip(def, json!("Mon May 17 15:05:47 +0000 2010"));
        assert_round_trip(date_field(Some("%m/%d/%Y"), None), json!("05/11/1906"));
        assert_round_trip(time_field(Some("%I:%M %p"), None), json!("02:15 PM"));
    }

    #[test]
    fn test_serial_format_output_is_readable() {
        assert_round_trip(date_field(Some("%Y-%m-%d"), Some("%m-%d-%Y")), json!("1906-05-11"));
        assert_round_trip(date_field(None, Some("%d.%m.%Y")), json!("1906-05-11"));
        assert_round_trip(time_field(Some("%H:%M:%S"), Some("%I:%M %p")), json!("14:15:00"));

        let def = date_field(Some("%Y-%m-%d"), Some("%m-%d-%Y"));
        let err = def.to_python("d", DataValue::from("11 May 1906")).unwrap_err();
        assert!(matches!(err, crate::error::MicroModelError::ConversionError { ref field, .. } if field == "d"));
    }

    #[test]
    fn test_nested_model_requires_same_schema() {
        let user = ModelSchema::builder("User")
            .field("name", char_field())
            .build_shared()
            .unwrap();
        let other_user = ModelSchema::builder("User")
            .field("handle", char_field())
            .build_shared()
            .unwrap();

        let instance = ModelInstance::new(Arc::clone(&other_user));
        let err = model_field(Arc::clone(&user))
            .to_python("user", DataValue::Model(instance.clone()))
            .unwrap_err();
        assert_eq!(err.field(), Some("user"));

        let accepted = model_field(other_user)
            .to_python("user", DataValue::Model(instance.clone()))
            .unwrap();
        assert_eq!(accepted, DataValue::Model(instance));
    }

    #[test]
    fn test_serial_format_output() {
        let def = date_field(Some("%Y-%m-%d"), Some("%m-%d-%Y"));
        let value = def.to_python("d", DataValue::from("1906-05-11")).unwrap();
        assert_eq!(serial(&def, &value), json!("05-11-1906"));
    }

    #[test]
    fn test_uuid_serial_forms() {
        let def = uuid_field();
        let value = def
            .to_python("id", DataValue::from("67e5504410b1426f9247bb680e5fe0c8"))
            .unwrap();
        assert_eq!(serial(&def, &value), json!("67e55044-10b1-426f-9247-bb680e5fe0c8"));

        let config = SerializerConfig {
            uuid_format: UuidFormat::Simple,
            ..SerializerConfig::default()
        };
        assert_eq!(def.to_serial(&value, &config), json!("67e5504410b1426f9247bb680e5fe0c8"));
    }

    #[test]
    fn test_null_passes_through_every_kind() {
        for def in [char_field(), integer_field(), uuid_field(), date_field(None, None)] {
            assert_eq!(def.to_python("f", DataValue::Null).unwrap(), DataValue::Null);
            assert_eq!(serial(&def, &DataValue::Null), serde_json::Value::Null);
        }
    }

    #[test]
    fn test_json_field_is_not_parsed() {
        let def = json_field();
        let value = def.to_python("f", DataValue::from("{\"a\": 1}")).unwrap();
        assert_eq!(value, DataValue::Json(json!("{\"a\": 1}")));
    }

    #[test]
    fn test_field_collection_paths_and_defaults() {
        let def = field_collection_field(date_field(Some("%Y-%m-%d"), Some("%m-%d-%Y")));
        let value = def
            .to_python("dates", DataValue::from(json!(["1906-05-11", "1970-01-01"])))
            .unwrap();
        assert_eq!(serial(&def, &value), json!(["05-11-1906", "01-01-1970"]));

        let err = def
            .to_python("dates", DataValue::from(json!(["1906-05-11", "soon"])))
            .unwrap_err();
        assert_eq!(err.field(), Some("dates[1]"));

        let def = field_collection_field(integer_field().with_default(0));
        let value = def.to_python("n", DataValue::from(json!([1, null]))).unwrap();
        assert_eq!(value, DataValue::Array(vec![DataValue::Int(1), DataValue::Int(0)]));

        assert!(def.to_python("n", DataValue::from("1,2")).is_err());
    }

    #[test]
    fn test_invalid_format_is_rejected() {
        let def = field_collection_field(datetime_field(Some("%Y-%Q"), None));
        let err = def.validate_definition("Broken", "stamps").unwrap_err();
        assert!(matches!(err, crate::error::MicroModelError::SchemaError { .. }));
    }
}
