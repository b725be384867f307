use serde::{Deserialize, Deserializer};

pub mod native;
pub mod request;

/// 显式的 JSON `null` 按缺省值处理，与字段缺失一致
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
