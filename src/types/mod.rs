//! 通用数据类型定义
//!
//! 定义模型字段在Rust侧的类型化数据表示

pub mod data_value;

// 重新导出所有公共类型
pub use data_value::{DataValue, json_value_to_data_value};

/// 类型化字典（`to_dict` 的返回值），保持字段顺序
pub type DataMap = indexmap::IndexMap<String, DataValue>;

/// 原始/序列化形式的JSON对象
pub type JsonMap = serde_json::Map<String, serde_json::Value>;
