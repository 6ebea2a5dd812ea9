//! 模型便捷函数模块
//!
//! 提供创建各种字段类型的便捷函数

use std::sync::Arc;

use crate::model::field_types::{FieldDefinition, FieldType};
use crate::model::schema::ModelSchema;

fn format_option(format: Option<&str>) -> Option<String> {
    format.map(str::to_string)
}

/// 便捷函数：创建字符串字段
pub fn char_field() -> FieldDefinition {
    FieldDefinition::new(FieldType::Char)
}

/// 便捷函数：创建整数字段
pub fn integer_field() -> FieldDefinition {
    FieldDefinition::new(FieldType::Integer)
}

/// 便捷函数：创建浮点数字段
pub fn float_field() -> FieldDefinition {
    FieldDefinition::new(FieldType::Float)
}

/// 便捷函数：创建精确十进制字段
/// 序列化为保留小数位数的字符串
pub fn decimal_field() -> FieldDefinition {
    FieldDefinition::new(FieldType::Decimal)
}

/// 便捷函数：创建布尔字段
pub fn boolean_field() -> FieldDefinition {
    FieldDefinition::new(FieldType::Boolean)
}

/// 便捷函数：创建日期时间字段
///
/// `format` 为解析格式，`serial_format` 为序列化格式（均为 strftime），
/// 为空时使用 ISO 8601
pub fn datetime_field(format: Option<&str>, serial_format: Option<&str>) -> FieldDefinition {
    FieldDefinition::new(FieldType::DateTime {
        format: format_option(format),
        serial_format: format_option(serial_format),
    })
}

/// 便捷函数：创建日期字段
pub fn date_field(format: Option<&str>, serial_format: Option<&str>) -> FieldDefinition {
    FieldDefinition::new(FieldType::Date {
        format: format_option(format),
        serial_format: format_option(serial_format),
    })
}

/// 便捷函数：创建时间字段
pub fn time_field(format: Option<&str>, serial_format: Option<&str>) -> FieldDefinition {
    FieldDefinition::new(FieldType::Time {
        format: format_option(format),
        serial_format: format_option(serial_format),
    })
}

/// 便捷函数：创建UUID字段
pub fn uuid_field() -> FieldDefinition {
    FieldDefinition::new(FieldType::Uuid)
}

/// 便捷函数：创建JSON字段
/// 值原样保留，不做解析
pub fn json_field() -> FieldDefinition {
    FieldDefinition::new(FieldType::Json)
}

/// 便捷函数：创建嵌套模型字段
pub fn model_field(schema: Arc<ModelSchema>) -> FieldDefinition {
    FieldDefinition::new(FieldType::Model { schema })
}

/// 便捷函数：创建嵌套模型列表字段
pub fn model_collection_field(schema: Arc<ModelSchema>) -> FieldDefinition {
    FieldDefinition::new(FieldType::ModelCollection { schema })
}

/// 便捷函数：创建同类字段列表
/// 列表中的每个元素都按 `item` 的定义转换
pub fn field_collection_field(item: FieldDefinition) -> FieldDefinition {
    FieldDefinition::new(FieldType::FieldCollection {
        item: Box::new(item),
    })
}
