use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::null_as_default;

/// OpenRTB BidRequest 结构体，
/// 只保留 HuaweiAds 适配需要读取的字段，其它字段反序列化时忽略。
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct BidRequest {
    pub id: String,

    /// 广告展示请求列表
    #[serde(default, deserialize_with = "null_as_default")]
    pub imp: Vec<Imp>,

    /// 应用信息
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app: Option<App>,

    /// 设备信息
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<Device>,

    /// 用户信息（ext 中携带设备 ID 与 GDPR consent）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,

    /// 隐私法规信息
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regs: Option<Regs>,

    // 其它简单字段
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tmax: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cur: Option<Vec<String>>,
}

/// Imp 表示 imp 数组中单个广告展示请求，banner/native/video/audio 只应出现一个
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Imp {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bidfloor: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner: Option<Banner>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<Video>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<Audio>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native: Option<Native>,
    /// `{"bidder": {...}}`，bidder 内为媒体在华为侧的鉴权信息
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ext: Option<Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Banner {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub w: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h: Option<i64>,
    /// 可选尺寸列表
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub format: Vec<Format>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Format {
    #[serde(default, deserialize_with = "null_as_default")]
    pub w: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub h: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Video {
    #[serde(default, deserialize_with = "null_as_default")]
    pub mimes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minduration: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maxduration: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocols: Option<Vec<i32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub w: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h: Option<i64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Audio {
    #[serde(default, deserialize_with = "null_as_default")]
    pub mimes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minduration: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maxduration: Option<i64>,
}

/// Native 对象，request 字段是 JSON 编码的 native 请求字符串
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Native {
    #[serde(default, deserialize_with = "null_as_default")]
    pub request: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ver: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct App {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// 包名，HuaweiAds 要求必填
    #[serde(default, deserialize_with = "null_as_default")]
    pub bundle: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ver: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Content {
    #[serde(default, deserialize_with = "null_as_default")]
    pub language: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Device {
    #[serde(default, deserialize_with = "null_as_default")]
    pub ua: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo: Option<Geo>,
    /// Do Not Track，1 表示不允许追踪
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dnt: Option<i8>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ip: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub devicetype: Option<i32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub make: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub model: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub os: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub osv: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub h: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub w: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pxratio: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub language: String,
    /// 形如 "460-00"
    #[serde(default, deserialize_with = "null_as_default")]
    pub mccmnc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connectiontype: Option<i32>,
    /// 广告标识（Android 上即 GAID）
    #[serde(default, deserialize_with = "null_as_default")]
    pub ifa: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Geo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lastfix: Option<i64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo: Option<Geo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ext: Option<Value>,
}

impl User {
    /// user.ext 存在且不是 JSON null
    pub fn ext(&self) -> Option<&Value> {
        self.ext.as_ref().filter(|v| !v.is_null())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Regs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coppa: Option<i8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ext: Option<Value>,
}
