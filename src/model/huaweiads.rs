// src/model/huaweiads.rs

use serde::{Deserialize, Serialize};

/// HuaweiAds ADX 接口版本
pub const HUAWEI_ADX_API_VERSION: &str = "3.4";

fn is_zero_i32(v: &i32) -> bool {
    *v == 0
}

fn is_zero_i64(v: &i64) -> bool {
    *v == 0
}

fn is_zero_f32(v: &f32) -> bool {
    *v == 0.0
}

/// **发往 HuaweiAds 的请求体**
///
/// 各子文档由 `bidding` 下的构建函数分别产出，最后由 engine 一次性组装，组装后不再修改。
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct HuaweiAdsRequest {
    pub version: String,
    /// 顺序与 BidRequest.imp 一致
    pub multislot: Vec<AdSlot30>,
    pub app: App,
    pub device: Device,
    pub network: Network,
    pub regs: Regs,
    pub geo: Geo,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub consent: String,
    #[serde(
        rename = "clientAdRequestId",
        default,
        skip_serializing_if = "String::is_empty"
    )]
    pub client_ad_request_id: String,
}

/// 广告位描述，一个 imp 对应一个
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct AdSlot30 {
    pub slotid: String,
    pub adtype: i32,
    pub test: i32,
    #[serde(rename = "totalDuration", default, skip_serializing_if = "is_zero_i32")]
    pub total_duration: i32,
    #[serde(default, skip_serializing_if = "is_zero_i32")]
    pub orientation: i32,
    #[serde(default, skip_serializing_if = "is_zero_i64")]
    pub w: i64,
    #[serde(default, skip_serializing_if = "is_zero_i64")]
    pub h: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub format: Vec<Format>,
    #[serde(
        rename = "detailedCreativeTypeList",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub detailed_creative_type_list: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Format {
    #[serde(default, skip_serializing_if = "is_zero_i64")]
    pub w: i64,
    #[serde(default, skip_serializing_if = "is_zero_i64")]
    pub h: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct App {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default)]
    pub pkgname: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub lang: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub country: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Device {
    #[serde(rename = "type", default, skip_serializing_if = "is_zero_i32")]
    pub kind: i32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub useragent: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub os: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub maker: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub model: String,
    #[serde(default, skip_serializing_if = "is_zero_i32")]
    pub width: i32,
    #[serde(default, skip_serializing_if = "is_zero_i32")]
    pub height: i32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub language: String,
    #[serde(rename = "buildVersion", default, skip_serializing_if = "String::is_empty")]
    pub build_version: String,
    #[serde(default, skip_serializing_if = "is_zero_i32")]
    pub dpi: i32,
    #[serde(default, skip_serializing_if = "is_zero_f32")]
    pub pxratio: f32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub imei: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub oaid: String,
    #[serde(rename = "isTrackingEnabled", default, skip_serializing_if = "String::is_empty")]
    pub is_tracking_enabled: String,
    #[serde(rename = "emuiVer", default, skip_serializing_if = "String::is_empty")]
    pub emui_ver: String,
    #[serde(rename = "localeCountry", default)]
    pub locale_country: String,
    #[serde(rename = "belongCountry", default)]
    pub belong_country: String,
    #[serde(rename = "gaidTrackingEnabled", default, skip_serializing_if = "String::is_empty")]
    pub gaid_tracking_enabled: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub gaid: String,
    #[serde(rename = "clientTime", default)]
    pub client_time: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ip: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Network {
    #[serde(rename = "type", default)]
    pub kind: i32,
    #[serde(default, skip_serializing_if = "is_zero_i32")]
    pub carrier: i32,
    #[serde(rename = "cellInfo", default, skip_serializing_if = "Vec::is_empty")]
    pub cell_info: Vec<CellInfo>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct CellInfo {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub mcc: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub mnc: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Regs {
    #[serde(default, skip_serializing_if = "is_zero_i32")]
    pub coppa: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Geo {
    #[serde(default, skip_serializing_if = "is_zero_f32")]
    pub lon: f32,
    #[serde(default, skip_serializing_if = "is_zero_f32")]
    pub lat: f32,
    #[serde(default, skip_serializing_if = "is_zero_i32")]
    pub accuracy: i32,
    #[serde(default, skip_serializing_if = "is_zero_i32")]
    pub lastfix: i32,
}
