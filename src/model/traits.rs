//! Model trait 定义模块
//!
//! 定义用户模型类型的核心接口。用户类型包装一个 `ModelInstance`，
//! 模型元数据由实现者提供（通常由 `define_model!` 生成并缓存）

use std::sync::Arc;

use crate::error::MicroResult;
use crate::model::field_types::FieldDefinition;
use crate::model::instance::ModelInstance;
use crate::model::schema::ModelSchema;
use crate::types::{DataMap, DataValue, JsonMap};

/// 模型特征
///
/// 实现者只需提供元数据与实例的包装/拆包，其余操作均委托给内部实例。
/// 模型类型上定义的普通方法不会出现在 `to_dict` 的输出中。
pub trait Model: Sized {
    /// 获取模型元数据
    fn schema() -> MicroResult<Arc<ModelSchema>>;

    /// 由实例构造模型（实例的元数据应与 `schema()` 一致）
    fn from_instance(instance: ModelInstance) -> Self;

    fn instance(&self) -> &ModelInstance;

    fn instance_mut(&mut self) -> &mut ModelInstance;

    /// 创建空模型
    fn new() -> MicroResult<Self> {
        Ok(Self::from_instance(ModelInstance::new(Self::schema()?)))
    }

    /// 从JSON对象构造模型
    fn from_dict(data: &JsonMap) -> MicroResult<Self> {
        ModelInstance::from_dict(Self::schema()?, data).map(Self::from_instance)
    }

    /// 从JSON文本构造模型
    fn from_json(text: &str) -> MicroResult<Self> {
        ModelInstance::from_json(Self::schema()?, text).map(Self::from_instance)
    }

    /// 从 (字段名, 值) 序列构造模型
    fn from_values<K, V, I>(values: I) -> MicroResult<Self>
    where
        K: Into<String>,
        V: Into<DataValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        ModelInstance::from_values(Self::schema()?, values).map(Self::from_instance)
    }

    fn to_dict(&self) -> DataMap {
        self.instance().to_dict()
    }

    fn to_serial_dict(&self) -> JsonMap {
        self.instance().to_serial_dict()
    }

    fn to_json(&self) -> String {
        self.instance().to_json()
    }

    fn get(&self, name: &str) -> Option<&DataValue> {
        self.instance().get(name)
    }

    fn set(&mut self, name: &str, value: impl Into<DataValue>) -> MicroResult<()> {
        self.instance_mut().set(name, value)
    }

    fn add_field(
        &mut self,
        name: &str,
        value: impl Into<DataValue>,
        definition: FieldDefinition,
    ) -> MicroResult<()> {
        self.instance_mut().add_field(name, value, definition)
    }

    /// 以模型类型 `M` 查看嵌套模型字段
    ///
    /// 字段未填充、为空值或嵌套模型不是 `M` 时返回 `None`
    fn related<M: Model>(&self, name: &str) -> Option<M> {
        let expected = M::schema().ok()?;
        self.instance()
            .get_nested(name)
            .filter(|nested| nested.is_instance_of(&expected))
            .map(|nested| M::from_instance(nested.clone()))
    }

    /// 以模型类型 `M` 查看嵌套模型列表字段
    fn related_collection<M: Model>(&self, name: &str) -> Option<Vec<M>> {
        let expected = M::schema().ok()?;
        let items = self.instance().get_collection(name)?;
        Some(
            items
                .into_iter()
                .filter(|nested| nested.is_instance_of(&expected))
                .map(|nested| M::from_instance(nested.clone()))
                .collect(),
        )
    }
}
