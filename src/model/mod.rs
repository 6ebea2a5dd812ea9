//! 模型定义系统模块
//!
//! 通过显式声明的字段元数据描述模型，在原始映射/JSON与类型化实例之间双向转换

pub mod convenience;
pub mod conversion;
pub mod field_types;
pub mod instance;
pub mod macros;
pub mod schema;
pub mod traits;

pub use convenience::*;
pub use field_types::{FieldDefinition, FieldType};
pub use instance::{DynamicField, ModelInstance};
pub use schema::{ModelSchema, ModelSchemaBuilder};
pub use traits::Model;
