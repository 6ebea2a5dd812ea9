//! 模型相关的宏定义
//!
//! 提供便捷的宏来定义模型

/// 便捷宏：定义模型
///
/// 生成包装 `ModelInstance` 的模型类型并实现 `Model`。模型元数据在首次调用
/// `schema()` 时构建并缓存，构建失败的错误同样被缓存。
///
/// ```ignore
/// define_model! {
///     pub struct Tweet {
///         id: integer_field(),
///         text: char_field(),
///         created_at: datetime_field(Some("%a %b %d %H:%M:%S %z %Y"), None),
///         user: model_field(TwitterUser::schema()?),
///     }
/// }
/// ```
///
/// 使用 `extends` 继承另一个模型的字段：
///
/// ```ignore
/// define_model! {
///     pub struct Employee extends Person {
///         salary: decimal_field(),
///     }
/// }
/// ```
///
/// 嵌套字段不能引用正在定义的模型本身
#[macro_export]
macro_rules! define_model {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident $(extends $base:ty)? {
            $(
                $field:ident: $field_def:expr
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        $vis struct $name {
            inner: $crate::model::ModelInstance,
        }

        impl $crate::model::traits::Model for $name {
            fn schema() -> $crate::error::MicroResult<std::sync::Arc<$crate::model::ModelSchema>> {
                static SCHEMA: $crate::once_cell::sync::OnceCell<
                    $crate::error::MicroResult<std::sync::Arc<$crate::model::ModelSchema>>,
                > = $crate::once_cell::sync::OnceCell::new();

                SCHEMA
                    .get_or_init(|| {
                        (|| -> $crate::error::MicroResult<std::sync::Arc<$crate::model::ModelSchema>> {
                            #[allow(unused_imports)]
                            use $crate::model::traits::Model as _;

                            #[allow(unused_mut)]
                            let mut builder = $crate::model::ModelSchema::builder(stringify!($name));
                            $(
                                builder = builder.inherit(&*<$base as $crate::model::traits::Model>::schema()?);
                            )?
                            $(
                                builder = builder.field(stringify!($field), $field_def);
                            )*
                            let schema = builder.build_shared()?;
                            $crate::debug_log!("模型元数据已缓存: {}", stringify!($name));
                            Ok(schema)
                        })()
                    })
                    .clone()
            }

            fn from_instance(instance: $crate::model::ModelInstance) -> Self {
                Self { inner: instance }
            }

            fn instance(&self) -> &$crate::model::ModelInstance {
                &self.inner
            }

            fn instance_mut(&mut self) -> &mut $crate::model::ModelInstance {
                &mut self.inner
            }
        }

        impl From<$name> for $crate::types::DataValue {
            fn from(model: $name) -> Self {
                $crate::types::DataValue::Model(model.inner)
            }
        }
    };
}
