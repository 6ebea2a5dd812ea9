//! 模型实例模块
//!
//! `ModelInstance` 保存共享的模型元数据、已填充的声明字段值，
//! 以及按插入顺序排列的动态字段

use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;
use rat_logger::debug;

use crate::codec;
use crate::error::MicroResult;
use crate::model::field_types::FieldDefinition;
use crate::model::schema::ModelSchema;
use crate::serializer::{OutputFormat, SerializerConfig};
use crate::types::{DataMap, DataValue, JsonMap};

/// 单个实例上动态添加的字段
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicField {
    pub definition: FieldDefinition,
    pub value: DataValue,
}

/// 模型实例
#[derive(Debug, Clone, PartialEq)]
pub struct ModelInstance {
    schema: Arc<ModelSchema>,
    values: HashMap<String, DataValue>,
    extra: IndexMap<String, DynamicField>,
}

impl ModelInstance {
    /// 创建空实例，所有字段均未填充
    pub fn new(schema: Arc<ModelSchema>) -> Self {
        Self {
            schema,
            values: HashMap::new(),
            extra: IndexMap::new(),
        }
    }

    /// 从JSON对象构造实例
    pub fn from_dict(schema: Arc<ModelSchema>, data: &JsonMap) -> MicroResult<Self> {
        let map: DataMap = data
            .iter()
            .map(|(key, value)| (key.clone(), DataValue::from(value.clone())))
            .collect();
        Self::from_data_map(schema, map)
    }

    /// 从JSON文本构造实例
    ///
    /// 文本格式错误或顶层不是对象时返回 `ParseError`
    pub fn from_json(schema: Arc<ModelSchema>, text: &str) -> MicroResult<Self> {
        let data = codec::decode(text)?;
        Self::from_dict(schema, &data)
    }

    /// 从原始值映射构造实例
    ///
    /// 每个声明字段按来源键查找：缺失时使用默认值（若有），否则保持未填充；
    /// 存在时经 `to_python` 转换。未声明的键被忽略。遇到第一个转换错误即返回，
    /// 不会产生部分填充的实例。
    pub fn from_data_map(schema: Arc<ModelSchema>, data: DataMap) -> MicroResult<Self> {
        let mut values = HashMap::with_capacity(schema.len());

        for (name, definition) in schema.fields() {
            let raw = match data.get(definition.source_key(name)) {
                Some(raw) => raw.clone(),
                None => match &definition.default {
                    Some(default) => default.clone(),
                    None => continue,
                },
            };
            let value = definition.to_python(name, raw)?;
            values.insert(name.to_string(), value);
        }

        crate::debug_log!("模型 {} 构造完成，填充字段 {} 个", schema.name(), values.len());

        Ok(Self {
            schema,
            values,
            extra: IndexMap::new(),
        })
    }

    /// 从 (字段名, 值) 序列构造实例
    ///
    /// 键为声明的字段名而非来源键；未声明的字段名返回 `UnknownField`
    pub fn from_values<K, V, I>(schema: Arc<ModelSchema>, values: I) -> MicroResult<Self>
    where
        K: Into<String>,
        V: Into<DataValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        let provided: DataMap = values
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();

        if let Some(unknown) = provided.keys().find(|key| !schema.contains(key)) {
            return Err(crate::quick_error!(unknown_field, schema.name(), unknown));
        }

        let mut converted = HashMap::with_capacity(schema.len());
        for (name, definition) in schema.fields() {
            let raw = match provided.get(name) {
                Some(raw) => raw.clone(),
                None => match &definition.default {
                    Some(default) => default.clone(),
                    None => continue,
                },
            };
            converted.insert(name.to_string(), definition.to_python(name, raw)?);
        }

        Ok(Self {
            schema,
            values: converted,
            extra: IndexMap::new(),
        })
    }

    pub fn schema(&self) -> &Arc<ModelSchema> {
        &self.schema
    }

    /// 获取字段值（声明字段或动态字段），未填充时返回 `None`
    pub fn get(&self, name: &str) -> Option<&DataValue> {
        self.values
            .get(name)
            .or_else(|| self.extra.get(name).map(|field| &field.value))
    }

    /// 设置字段值，经字段定义转换
    pub fn set(&mut self, name: &str, value: impl Into<DataValue>) -> MicroResult<()> {
        if let Some(definition) = self.schema.field(name) {
            let value = definition.to_python(name, value.into())?;
            self.values.insert(name.to_string(), value);
            return Ok(());
        }
        if let Some(field) = self.extra.get_mut(name) {
            field.value = field.definition.to_python(name, value.into())?;
            return Ok(());
        }
        Err(crate::quick_error!(unknown_field, self.schema.name(), name))
    }

    /// 清除字段值，返回原值。动态字段会被整体移除
    pub fn unset(&mut self, name: &str) -> Option<DataValue> {
        self.values
            .remove(name)
            .or_else(|| self.extra.shift_remove(name).map(|field| field.value))
    }

    /// 字段是否已填充
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name) || self.extra.contains_key(name)
    }

    /// 获取字段定义（声明字段优先）
    pub fn definition(&self, name: &str) -> Option<&FieldDefinition> {
        self.schema
            .field(name)
            .or_else(|| self.extra.get(name).map(|field| &field.definition))
    }

    /// 已填充字段名，声明字段按声明顺序在前，动态字段按添加顺序在后
    pub fn field_names(&self) -> Vec<&str> {
        self.schema
            .fields()
            .map(|(name, _)| name)
            .filter(|name| self.values.contains_key(*name))
            .chain(self.extra.keys().map(String::as_str))
            .collect()
    }

    /// 为当前实例动态添加字段
    ///
    /// 值经 `definition` 转换后保存，之后的 `to_dict`/`to_json` 会包含该字段。
    /// 与声明字段重名时返回 `SchemaError`；重复添加同名动态字段会替换原字段。
    pub fn add_field(
        &mut self,
        name: &str,
        value: impl Into<DataValue>,
        definition: FieldDefinition,
    ) -> MicroResult<()> {
        if name.is_empty() {
            return Err(crate::quick_error!(
                schema,
                self.schema.name(),
                crate::i18n::t("error.empty_field_name")
            ));
        }
        if self.schema.contains(name) {
            return Err(crate::quick_error!(
                schema,
                self.schema.name(),
                crate::i18n::tf("error.dynamic_field_conflict", &[("name", name)])
            ));
        }
        definition.validate_definition(self.schema.name(), name)?;

        let value = definition.to_python(name, value.into())?;
        debug!("模型 {} 添加动态字段: {}", self.schema.name(), name);
        self.extra
            .insert(name.to_string(), DynamicField { definition, value });
        Ok(())
    }

    /// 获取嵌套模型字段的实例
    pub fn get_nested(&self, name: &str) -> Option<&ModelInstance> {
        self.get(name).and_then(DataValue::as_model)
    }

    /// 获取嵌套模型列表字段的实例
    pub fn get_collection(&self, name: &str) -> Option<Vec<&ModelInstance>> {
        self.get(name)
            .and_then(DataValue::as_array)
            .map(|items| items.iter().filter_map(DataValue::as_model).collect())
    }

    /// 实例是否属于给定的模型元数据（同一 `Arc` 或内容相同）
    pub fn is_instance_of(&self, schema: &Arc<ModelSchema>) -> bool {
        Arc::ptr_eq(&self.schema, schema) || *self.schema == **schema
    }

    fn populated(&self) -> impl Iterator<Item = (&str, &FieldDefinition, &DataValue)> {
        let declared = self.schema.fields().filter_map(|(name, definition)| {
            self.values
                .get(name)
                .map(|value| (name, definition, value))
        });
        let dynamic = self
            .extra
            .iter()
            .map(|(name, field)| (name.as_str(), &field.definition, &field.value));
        declared.chain(dynamic)
    }

    /// 导出类型化值映射
    pub fn to_dict(&self) -> DataMap {
        self.populated()
            .map(|(name, _, value)| (name.to_string(), value.clone()))
            .collect()
    }

    /// 导出JSON安全的映射（默认序列化配置）
    pub fn to_serial_dict(&self) -> JsonMap {
        self.to_serial_dict_with(&SerializerConfig::default())
    }

    /// 按指定序列化配置导出JSON安全的映射
    pub fn to_serial_dict_with(&self, config: &SerializerConfig) -> JsonMap {
        self.populated()
            .map(|(name, definition, value)| (name.to_string(), definition.to_serial(value, config)))
            .collect()
    }

    /// 导出紧凑JSON文本
    pub fn to_json(&self) -> String {
        codec::encode(&self.to_serial_dict())
    }

    /// 按指定序列化配置导出JSON文本
    pub fn to_json_with(&self, config: &SerializerConfig) -> String {
        let map = self.to_serial_dict_with(config);
        match config.output_format {
            OutputFormat::Compact => codec::encode(&map),
            OutputFormat::Pretty => codec::encode_pretty(&map),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MicroModelError;
    use crate::model::convenience::*;
    use serde_json::json;

    fn person_schema() -> Arc<ModelSchema> {
        ModelSchema::builder("Person")
            .field("name", char_field().source("legal_name"))
            .field("age", integer_field())
            .field("active", boolean_field().with_default(true))
            .build_shared()
            .unwrap()
    }

    fn obj(value: serde_json::Value) -> JsonMap {
        match value {
            serde_json::Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_source_keys_and_defaults() {
        let person = ModelInstance::from_dict(
            person_schema(),
            &obj(json!({"legal_name": "Ada", "age": "36", "extra": 1})),
        )
        .unwrap();

        assert_eq!(person.get("name"), Some(&DataValue::from("Ada")));
        assert_eq!(person.get("age"), Some(&DataValue::Int(36)));
        assert_eq!(person.get("active"), Some(&DataValue::Bool(true)));
        assert!(!person.contains("extra"));
        assert_eq!(person.field_names(), vec!["name", "age", "active"]);
    }

    #[test]
    fn test_missing_keys_are_absent() {
        let person = ModelInstance::from_dict(person_schema(), &JsonMap::new()).unwrap();
        assert!(person.get("name").is_none());
        assert!(person.get("age").is_none());
        assert_eq!(person.to_serial_dict(), obj(json!({"active": true})));
    }

    #[test]
    fn test_conversion_failure_is_atomic() {
        let err = ModelInstance::from_dict(person_schema(), &obj(json!({"age": "old"}))).unwrap_err();
        assert!(matches!(err, MicroModelError::ConversionError { ref field, .. } if field == "age"));
    }

    #[test]
    fn test_set_and_unset() {
        let mut person = ModelInstance::new(person_schema());
        person.set("age", "41").unwrap();
        assert_eq!(person.get("age"), Some(&DataValue::Int(41)));
        assert_eq!(person.unset("age"), Some(DataValue::Int(41)));
        assert!(!person.contains("age"));

        let err = person.set("height", 180).unwrap_err();
        assert!(matches!(err, MicroModelError::UnknownField { .. }));
    }

    #[test]
    fn test_from_values_uses_field_names() {
        let person =
            ModelInstance::from_values(person_schema(), [("name", DataValue::from("Grace"))]).unwrap();
        assert_eq!(person.get("name"), Some(&DataValue::from("Grace")));

        let err = ModelInstance::from_values(person_schema(), [("legal_name", "Grace")]).unwrap_err();
        assert!(matches!(err, MicroModelError::UnknownField { ref field, .. } if field == "legal_name"));
    }

    #[test]
    fn test_dynamic_fields_follow_declared_ones() {
        let mut person =
            ModelInstance::from_dict(person_schema(), &obj(json!({"legal_name": "Ada"}))).unwrap();
        person.add_field("retweet_count", 44, integer_field()).unwrap();
        person.add_field("note", 1, char_field()).unwrap();
        person.add_field("retweet_count", "45", integer_field()).unwrap();

        assert_eq!(person.field_names(), vec!["name", "active", "retweet_count", "note"]);
        assert_eq!(person.to_dict()["retweet_count"], DataValue::Int(45));
        assert_eq!(person.to_dict()["note"], DataValue::from("1"));

        let err = person.add_field("age", 3, integer_field()).unwrap_err();
        assert!(matches!(err, MicroModelError::SchemaError { .. }));

        let sibling = ModelInstance::new(person_schema());
        assert!(!sibling.contains("retweet_count"));
    }

    #[test]
    fn test_add_field_rejects_empty_name() {
        let mut person = ModelInstance::new(person_schema());
        let err = person.add_field("", 1, integer_field()).unwrap_err();
        match err {
            MicroModelError::SchemaError { model, message } => {
                assert_eq!(model, "Person");
                assert_eq!(message, crate::i18n::t("error.empty_field_name"));
            }
            other => panic!("期望模型定义错误，实际为 {:?}", other),
        }
        assert!(person.field_names().is_empty());
    }

    #[test]
    fn test_is_instance_of_compares_schemas() {
        let schema = person_schema();
        let person = ModelInstance::new(Arc::clone(&schema));
        assert!(person.is_instance_of(&schema));
        assert!(person.is_instance_of(&person_schema()));

        let impostor = ModelSchema::builder("Person")
            .field("handle", char_field())
            .build_shared()
            .unwrap();
        assert!(!person.is_instance_of(&impostor));
    }

    #[test]
    fn test_to_json_is_compact() {
        let person =
            ModelInstance::from_dict(person_schema(), &obj(json!({"legal_name": "Ada", "age": 36})))
                .unwrap();
        assert_eq!(person.to_json(), r#"{"name":"Ada","age":36,"active":true}"#);
    }
}
