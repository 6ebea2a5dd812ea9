//! 数据转换模块
//!
//! 提供各字段类型 `to_python` 方向的转换实现，以及日期时间的解析与格式化

pub mod datetime_conversion;
pub mod primitive_impls;

pub use datetime_conversion::{format_temporal, is_valid_format, parse_date, parse_datetime, parse_time};
pub use primitive_impls::{to_boolean, to_char, to_decimal, to_float, to_integer, to_uuid};
