//! 模型元数据模块
//!
//! 模型的有序字段声明。元数据在定义模型时构建一次，之后只读，
//! 通过 `Arc` 在各实例间共享

use std::collections::HashMap;
use std::sync::Arc;

use rat_logger::debug;

use crate::error::MicroResult;
use crate::model::field_types::FieldDefinition;

/// 模型元数据
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSchema {
    /// 模型名称
    name: String,
    /// 按声明顺序排列的字段
    fields: Vec<(String, FieldDefinition)>,
    /// 字段名到 `fields` 下标的索引
    index: HashMap<String, usize>,
}

impl ModelSchema {
    /// 创建模型元数据构建器
    pub fn builder(name: &str) -> ModelSchemaBuilder {
        ModelSchemaBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 按声明顺序遍历字段
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldDefinition)> {
        self.fields.iter().map(|(name, def)| (name.as_str(), def))
    }

    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.index.get(name).map(|&i| &self.fields[i].1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// 模型元数据构建器
///
/// 字段按调用顺序登记，`build` 时检查字段名唯一与格式字符串有效
#[derive(Debug)]
pub struct ModelSchemaBuilder {
    name: String,
    fields: Vec<(String, FieldDefinition)>,
}

impl ModelSchemaBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            fields: Vec::new(),
        }
    }

    /// 继承另一个模型的全部字段（排在后续声明的字段之前）
    pub fn inherit(mut self, base: &ModelSchema) -> Self {
        self.fields.extend(base.fields.iter().cloned());
        self
    }

    /// 声明字段
    pub fn field(mut self, name: &str, definition: FieldDefinition) -> Self {
        self.fields.push((name.to_string(), definition));
        self
    }

    /// 构建模型元数据
    ///
    /// # 错误
    ///
    /// 字段名为空、重复，或日期时间格式字符串无效时返回 `SchemaError`
    pub fn build(self) -> MicroResult<ModelSchema> {
        let mut index = HashMap::with_capacity(self.fields.len());

        for (position, (name, definition)) in self.fields.iter().enumerate() {
            if name.is_empty() {
                return Err(crate::quick_error!(
                    schema,
                    self.name,
                    crate::i18n::t("error.empty_field_name")
                ));
            }
            if index.insert(name.clone(), position).is_some() {
                return Err(crate::quick_error!(
                    schema,
                    self.name,
                    crate::i18n::tf("error.duplicate_field", &[("name", name.as_str())])
                ));
            }
            definition.validate_definition(&self.name, name)?;
        }

        debug!("模型元数据构建完成: {} ({} 个字段)", self.name, self.fields.len());

        Ok(ModelSchema {
            name: self.name,
            fields: self.fields,
            index,
        })
    }

    /// 构建并包装为 `Arc`
    pub fn build_shared(self) -> MicroResult<Arc<ModelSchema>> {
        self.build().map(Arc::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MicroModelError;
    use crate::model::convenience::*;

    #[test]
    fn test_fields_keep_declaration_order() {
        let schema = ModelSchema::builder("Person")
            .field("legal_name", char_field())
            .field("aliases", field_collection_field(char_field()))
            .field("age", integer_field())
            .build()
            .unwrap();

        let names: Vec<&str> = schema.fields().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["legal_name", "aliases", "age"]);
        assert!(schema.contains("age"));
        assert_eq!(schema.len(), 3);
        assert_eq!(schema.field("age"), Some(&integer_field()));
    }

    #[test]
    fn test_duplicate_field_is_schema_error() {
        let err = ModelSchema::builder("Dupe")
            .field("name", char_field())
            .field("name", integer_field())
            .build()
            .unwrap_err();
        assert!(matches!(err, MicroModelError::SchemaError { ref model, .. } if model == "Dupe"));
    }

    #[test]
    fn test_inherited_duplicate_is_schema_error() {
        let base = ModelSchema::builder("Base")
            .field("id", integer_field())
            .build()
            .unwrap();
        let child = ModelSchema::builder("Child")
            .inherit(&base)
            .field("label", char_field())
            .build()
            .unwrap();
        let names: Vec<&str> = child.fields().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["id", "label"]);

        let clash = ModelSchema::builder("Clash")
            .inherit(&base)
            .field("id", char_field())
            .build();
        assert!(clash.is_err());
    }

    #[test]
    fn test_empty_name_and_bad_format() {
        assert!(ModelSchema::builder("Empty").field("", char_field()).build().is_err());
        assert!(
            ModelSchema::builder("BadFormat")
                .field("at", datetime_field(None, Some("%Q")))
                .build()
                .is_err()
        );
    }
}
