// src/bidding/device.rs

use chrono::{DateTime, FixedOffset};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use tracing::warn;

use crate::error::AdapterError;
use crate::model::huaweiads::{App, CellInfo, Device, Geo, Network, Regs};
use crate::openrtb::null_as_default;
use crate::openrtb::request::BidRequest;

const DEFAULT_MODEL_NAME: &str = "HUAWEI";
const DEFAULT_APP_LANGUAGE: &str = "en";
const DEFAULT_UNKNOWN_NETWORK_TYPE: i32 = 0;

/// clientTime 格式：2006-01-02 15:04:05.000+0800
const CLIENT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

// 只接受 ASCII 数字，regex 的 `\d` 会匹配其它 Unicode 数字
static CLIENT_TIME_WITH_ZONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2}:[0-9]{2}\.[0-9]{3}[+-][0-9]{4}$").expect("valid clientTime regex")
});

static CLIENT_TIME_WITHOUT_ZONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2}:[0-9]{2}\.[0-9]{3}$").expect("valid clientTime regex")
});

/// user.ext 中的设备 ID，媒体侧通过 `TargetingParams.addUserData("oaid", ...)` 传入
#[derive(Deserialize, Debug, Default)]
struct ExtUserDataHuaweiAds {
    #[serde(default, deserialize_with = "null_as_default")]
    data: ExtUserDataDeviceId,
}

#[derive(Deserialize, Debug, Default)]
struct ExtUserDataDeviceId {
    #[serde(default, deserialize_with = "null_as_default")]
    imei: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    oaid: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    gaid: Vec<String>,
    #[serde(rename = "clientTime", default, deserialize_with = "null_as_default")]
    client_time: Vec<String>,
}

/// user.ext 中的 GDPR consent
#[derive(Deserialize, Debug, Default)]
struct ExtUser {
    #[serde(default, deserialize_with = "null_as_default")]
    consent: String,
}

#[derive(Debug, Default, PartialEq, Eq)]
struct DeviceIds {
    oaid: String,
    gaid: String,
    imei: String,
    client_time: String,
}

/// **构造 app 信息**，存在 app 对象时 bundle 必填
pub fn build_app(request: &BidRequest, country_code: &str) -> Result<App, AdapterError> {
    let mut app = App {
        country: country_code.to_string(),
        ..Default::default()
    };
    if let Some(rtb_app) = &request.app {
        if rtb_app.bundle.is_empty() {
            return Err(AdapterError::AppBundleMissing);
        }
        let lang = rtb_app
            .content
            .as_ref()
            .map(|c| c.language.as_str())
            .filter(|l| !l.is_empty())
            .unwrap_or(DEFAULT_APP_LANGUAGE);
        app = App {
            version: rtb_app.ver.clone(),
            name: rtb_app.name.clone(),
            pkgname: rtb_app.bundle.clone(),
            lang: lang.to_string(),
            ..app
        };
    }
    Ok(app)
}

/// **构造 device 信息**
///
/// 设备 ID 取自 user.ext.data；user.ext 缺失时必须有 device.ifa（作为 gaid）。
/// isTrackingEnabled / gaidTrackingEnabled = 1 - dnt，只在对应 ID 存在时下发。
pub fn build_device(
    request: &BidRequest,
    country_code: &str,
    now: DateTime<FixedOffset>,
) -> Result<Device, AdapterError> {
    let mut device = Device {
        locale_country: country_code.to_string(),
        belong_country: country_code.to_string(),
        ..Default::default()
    };
    if let Some(rtb_device) = &request.device {
        device = Device {
            kind: rtb_device.devicetype.unwrap_or_default(),
            useragent: rtb_device.ua.clone(),
            os: rtb_device.os.clone(),
            version: rtb_device.osv.clone(),
            maker: rtb_device.make.clone(),
            model: if rtb_device.model.is_empty() {
                DEFAULT_MODEL_NAME.to_string()
            } else {
                rtb_device.model.clone()
            },
            height: rtb_device.h as i32,
            width: rtb_device.w as i32,
            language: rtb_device.language.clone(),
            pxratio: rtb_device.pxratio.unwrap_or_default() as f32,
            ip: rtb_device.ip.clone(),
            ..device
        };
    }

    let ifa = request.device.as_ref().map(|d| d.ifa.as_str()).unwrap_or_default();
    let ids = device_ids(request, ifa, now)?;

    let dnt = request.device.as_ref().and_then(|d| d.dnt);
    let tracking = |id: &str| match dnt {
        Some(dnt) if !id.is_empty() => (1 - i32::from(dnt)).to_string(),
        _ => String::new(),
    };

    Ok(Device {
        is_tracking_enabled: tracking(&ids.oaid),
        gaid_tracking_enabled: tracking(&ids.gaid),
        oaid: ids.oaid,
        gaid: ids.gaid,
        imei: ids.imei,
        client_time: ids.client_time,
        ..device
    })
}

fn device_ids(request: &BidRequest, ifa: &str, now: DateTime<FixedOffset>) -> Result<DeviceIds, AdapterError> {
    let Some(ext) = request.user.as_ref().and_then(|u| u.ext()) else {
        if ifa.is_empty() {
            return Err(AdapterError::NoDeviceIdentifier(
                "user.ext is nil and device.ifa is not specified",
            ));
        }
        return Ok(DeviceIds {
            gaid: ifa.to_string(),
            ..Default::default()
        });
    };

    let ext: ExtUserDataHuaweiAds =
        serde_json::from_value(ext.clone()).map_err(|e| AdapterError::MalformedUserExt(e.to_string()))?;
    let data = ext.data;
    if data.oaid.is_empty() && data.gaid.is_empty() && data.imei.is_empty() {
        return Err(AdapterError::NoDeviceIdentifier("imei, oaid, gaid are all empty"));
    }

    Ok(DeviceIds {
        oaid: data.oaid.first().cloned().unwrap_or_default(),
        gaid: data.gaid.first().cloned().unwrap_or_else(|| ifa.to_string()),
        imei: data.imei.first().cloned().unwrap_or_default(),
        client_time: data
            .client_time
            .first()
            .map(|t| format_client_time(t, now))
            .unwrap_or_default(),
    })
}

/// **规范化 clientTime**
///
/// 已带时区的原样返回；缺时区的补上本地时区；其它情况用当前时间重新生成。
pub fn format_client_time(client_time: &str, now: DateTime<FixedOffset>) -> String {
    let zone = now.format("%z").to_string();
    if CLIENT_TIME_WITH_ZONE.is_match(client_time) {
        return client_time.to_string();
    }
    if CLIENT_TIME_WITHOUT_ZONE.is_match(client_time) {
        return format!("{}{}", client_time, zone);
    }
    if !client_time.is_empty() {
        warn!(client_time, "malformed clientTime, regenerated from local time");
    }
    format!("{}{}", now.format(CLIENT_TIME_FORMAT), zone)
}

/// 运营商：中国移动 2，中国联通 1，中国电信 3，其它 99
fn carrier_of(mcc_mnc: &str) -> i32 {
    match mcc_mnc {
        "46000" | "46002" | "46007" => 2,
        "46001" | "46006" => 1,
        "46003" | "46005" | "46011" => 3,
        _ => 99,
    }
}

/// 构造 network 信息（连接类型、运营商、基站信息）
pub fn build_network(request: &BidRequest) -> Network {
    let Some(device) = &request.device else {
        return Network::default();
    };
    let kind = device.connectiontype.unwrap_or(DEFAULT_UNKNOWN_NETWORK_TYPE);
    // "460-00" 才有基站信息，单段或空串只保留连接类型
    let parts: Vec<&str> = device.mccmnc.split('-').collect();
    if parts.len() < 2 {
        return Network {
            kind,
            ..Default::default()
        };
    }
    Network {
        kind,
        carrier: carrier_of(&format!("{}{}", parts[0], parts[1])),
        cell_info: vec![CellInfo {
            mcc: parts[0].to_string(),
            mnc: parts[1].to_string(),
        }],
    }
}

pub fn build_regs(request: &BidRequest) -> Regs {
    match request.regs.as_ref().map(|r| r.coppa.unwrap_or_default()) {
        Some(coppa) if coppa >= 0 => Regs {
            coppa: i32::from(coppa),
        },
        _ => Regs::default(),
    }
}

pub fn build_geo(request: &BidRequest) -> Geo {
    let Some(geo) = request.device.as_ref().and_then(|d| d.geo.as_ref()) else {
        return Geo::default();
    };
    Geo {
        lon: geo.lon.unwrap_or_default() as f32,
        lat: geo.lat.unwrap_or_default() as f32,
        accuracy: geo.accuracy.unwrap_or_default() as i32,
        lastfix: geo.lastfix.unwrap_or_default() as i32,
    }
}

/// GDPR consent，user.ext 解析失败时不下发
pub fn build_consent(request: &BidRequest) -> String {
    let Some(ext) = request.user.as_ref().and_then(|u| u.ext()) else {
        return String::new();
    };
    match serde_json::from_value::<ExtUser>(ext.clone()) {
        Ok(ext_user) => ext_user.consent,
        Err(e) => {
            warn!(error = %e, "failed to parse user.ext consent, skipped");
            String::new()
        }
    }
}
