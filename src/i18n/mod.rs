//! 多语言错误消息模块
//!
//! 使用rat_embed_lang框架提供统一的错误消息多语言支持

use std::collections::HashMap;
use rat_embed_lang::register_translations;

/// 错误消息翻译注册器
pub struct ErrorMessageI18n;

impl ErrorMessageI18n {
    /// 注册所有错误消息翻译
    pub fn register_all_translations() {
        let mut translations = HashMap::new();

        // 类型不匹配
        let mut type_mismatch = HashMap::new();
        type_mismatch.insert("zh-CN".to_string(), "字段类型不匹配，期望{expected}，实际收到{actual}".to_string());
        type_mismatch.insert("en-US".to_string(), "Type mismatch, expected {expected} but got {actual}".to_string());
        type_mismatch.insert("ja-JP".to_string(), "型が一致しません。{expected} を期待しましたが {actual} を受け取りました".to_string());
        translations.insert("error.type_mismatch".to_string(), type_mismatch);

        // 数值解析失败
        let mut invalid_number = HashMap::new();
        invalid_number.insert("zh-CN".to_string(), "无法解析为{expected}: {message}".to_string());
        invalid_number.insert("en-US".to_string(), "Cannot parse as {expected}: {message}".to_string());
        invalid_number.insert("ja-JP".to_string(), "{expected} として解析できません: {message}".to_string());
        translations.insert("error.invalid_number".to_string(), invalid_number);

        // 整数超出范围
        let mut integer_overflow = HashMap::new();
        integer_overflow.insert("zh-CN".to_string(), "整数超出64位有符号整数范围".to_string());
        integer_overflow.insert("en-US".to_string(), "Integer is out of the signed 64-bit range".to_string());
        integer_overflow.insert("ja-JP".to_string(), "整数が64ビット符号付き整数の範囲外です".to_string());
        translations.insert("error.integer_overflow".to_string(), integer_overflow);

        // 日期时间解析失败
        let mut invalid_datetime = HashMap::new();
        invalid_datetime.insert("zh-CN".to_string(), "无法按格式 '{format}' 解析{kind}: {message}".to_string());
        invalid_datetime.insert("en-US".to_string(), "Cannot parse {kind} with format '{format}': {message}".to_string());
        invalid_datetime.insert("ja-JP".to_string(), "フォーマット '{format}' で{kind}を解析できません: {message}".to_string());
        translations.insert("error.invalid_datetime".to_string(), invalid_datetime);

        // UUID解析失败
        let mut invalid_uuid = HashMap::new();
        invalid_uuid.insert("zh-CN".to_string(), "无效的UUID格式: {message}".to_string());
        invalid_uuid.insert("en-US".to_string(), "Invalid UUID format: {message}".to_string());
        invalid_uuid.insert("ja-JP".to_string(), "無効なUUID形式: {message}".to_string());
        translations.insert("error.invalid_uuid".to_string(), invalid_uuid);

        // 嵌套模型不匹配
        let mut model_mismatch = HashMap::new();
        model_mismatch.insert("zh-CN".to_string(), "期望模型 '{expected}' 的实例，实际收到模型 '{actual}'".to_string());
        model_mismatch.insert("en-US".to_string(), "Expected an instance of model '{expected}' but got model '{actual}'".to_string());
        model_mismatch.insert("ja-JP".to_string(), "モデル '{expected}' のインスタンスを期待しましたが、モデル '{actual}' を受け取りました".to_string());
        translations.insert("error.model_mismatch".to_string(), model_mismatch);

        // 字段重名
        let mut duplicate_field = HashMap::new();
        duplicate_field.insert("zh-CN".to_string(), "字段名 '{name}' 重复".to_string());
        duplicate_field.insert("en-US".to_string(), "Field name '{name}' is duplicated".to_string());
        duplicate_field.insert("ja-JP".to_string(), "フィールド名 '{name}' が重複しています".to_string());
        translations.insert("error.duplicate_field".to_string(), duplicate_field);

        // 字段名为空
        let mut empty_field_name = HashMap::new();
        empty_field_name.insert("zh-CN".to_string(), "字段名不能为空".to_string());
        empty_field_name.insert("en-US".to_string(), "Field name must not be empty".to_string());
        empty_field_name.insert("ja-JP".to_string(), "フィールド名を空にすることはできません".to_string());
        translations.insert("error.empty_field_name".to_string(), empty_field_name);

        // 格式字符串无效
        let mut invalid_format = HashMap::new();
        invalid_format.insert("zh-CN".to_string(), "字段 '{name}' 的格式字符串 '{format}' 无效".to_string());
        invalid_format.insert("en-US".to_string(), "Format string '{format}' of field '{name}' is invalid".to_string());
        invalid_format.insert("ja-JP".to_string(), "フィールド '{name}' のフォーマット文字列 '{format}' が無効です".to_string());
        translations.insert("error.invalid_format".to_string(), invalid_format);

        // 动态字段与声明字段冲突
        let mut dynamic_field_conflict = HashMap::new();
        dynamic_field_conflict.insert("zh-CN".to_string(), "动态字段 '{name}' 与模型声明的字段冲突".to_string());
        dynamic_field_conflict.insert("en-US".to_string(), "Dynamic field '{name}' conflicts with a declared field".to_string());
        dynamic_field_conflict.insert("ja-JP".to_string(), "動的フィールド '{name}' が宣言済みフィールドと競合しています".to_string());
        translations.insert("error.dynamic_field_conflict".to_string(), dynamic_field_conflict);

        // JSON相关错误
        let mut json_parse_failed = HashMap::new();
        json_parse_failed.insert("zh-CN".to_string(), "解析JSON字符串失败: {message}".to_string());
        json_parse_failed.insert("en-US".to_string(), "Failed to parse JSON string: {message}".to_string());
        json_parse_failed.insert("ja-JP".to_string(), "JSON文字列の解析失敗: {message}".to_string());
        translations.insert("error.json_parse".to_string(), json_parse_failed);

        let mut json_not_object = HashMap::new();
        json_not_object.insert("zh-CN".to_string(), "JSON顶层必须是对象，实际为{actual}".to_string());
        json_not_object.insert("en-US".to_string(), "Top-level JSON must be an object, got {actual}".to_string());
        json_not_object.insert("ja-JP".to_string(), "JSONのトップレベルはオブジェクトである必要があります（実際: {actual}）".to_string());
        translations.insert("error.json_not_object".to_string(), json_not_object);

        // 注册所有翻译
        register_translations(translations);
    }

    /// 初始化错误消息多语言支持
    pub fn init() {
        Self::register_all_translations();

        // 从环境变量获取语言设置，默认为zh-CN
        let lang = std::env::var("RAT_LANG")
            .or_else(|_| std::env::var("LANG"))
            .unwrap_or_else(|_| "zh-CN".to_string());

        // 标准化语言代码
        use rat_embed_lang::normalize_language_code;
        let normalized_lang = normalize_language_code(&lang);
        set_language(&normalized_lang);
    }
}


/// 重新导出rat_embed_lang的核心函数
pub use rat_embed_lang::{t, tf, set_language, current_language};
