//! JSON文本编解码
//!
//! 顶层必须是JSON对象；键的顺序按插入顺序保留

use crate::error::MicroResult;
use crate::types::JsonMap;

/// 编码为紧凑JSON文本
pub fn encode(map: &JsonMap) -> String {
    serde_json::Value::Object(map.clone()).to_string()
}

/// 编码为带缩进的JSON文本
pub fn encode_pretty(map: &JsonMap) -> String {
    format!("{:#}", serde_json::Value::Object(map.clone()))
}

/// 解码JSON文本为对象
///
/// 文本格式错误或顶层不是对象时返回 `ParseError`
pub fn decode(text: &str) -> MicroResult<JsonMap> {
    let value: serde_json::Value = serde_json::from_str(text).map_err(|e| {
        crate::quick_error!(
            parse,
            crate::i18n::tf("error.json_parse", &[("message", &e.to_string())])
        )
    })?;

    match value {
        serde_json::Value::Object(map) => Ok(map),
        other => {
            let actual = match other {
                serde_json::Value::Null => "null",
                serde_json::Value::Bool(_) => "bool",
                serde_json::Value::Number(_) => "number",
                serde_json::Value::String(_) => "string",
                serde_json::Value::Array(_) => "array",
                serde_json::Value::Object(_) => "object",
            };
            Err(crate::quick_error!(
                parse,
                crate::i18n::tf("error.json_not_object", &[("actual", actual)])
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MicroModelError;

    #[test]
    fn test_decode_keeps_key_order() {
        let map = decode(r#"{"z": 1, "a": [true, null], "m": {"k": "v"}}"#).unwrap();
        let keys: Vec<&String> = map.keys().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
        assert_eq!(encode(&map), r#"{"z":1,"a":[true,null],"m":{"k":"v"}}"#);
    }

    #[test]
    fn test_decode_rejects_bad_input() {
        assert!(matches!(decode("{\"a\": "), Err(MicroModelError::ParseError { .. })));
        assert!(matches!(decode("[1, 2]"), Err(MicroModelError::ParseError { .. })));
        assert!(matches!(decode("\"text\""), Err(MicroModelError::ParseError { .. })));
    }

    #[test]
    fn test_encode_pretty_indents() {
        let map = decode(r#"{"a": 1}"#).unwrap();
        assert_eq!(encode_pretty(&map), "{\n  \"a\": 1\n}");
    }
}
