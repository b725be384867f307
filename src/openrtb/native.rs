use serde::{Deserialize, Serialize};

use super::null_as_default;

/// Native 1.x 图片资源类型：主图
pub const IMAGE_ASSET_TYPE_MAIN: i64 = 3;

/// imp.native.request 解析后的 native 请求（只关心 assets）
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct NativeRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ver: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub assets: Vec<Asset>,
}

/// 每个 asset 中 title/img/video/data 只应出现一个
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Asset {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<i8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img: Option<ImageAsset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ImageAsset {
    #[serde(default, rename = "type", deserialize_with = "null_as_default")]
    pub kind: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub w: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub h: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub wmin: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hmin: i64,
}

impl ImageAsset {
    pub fn is_main(&self) -> bool {
        self.kind == IMAGE_ASSET_TYPE_MAIN
    }
}
