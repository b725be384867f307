use chrono::{DateTime, FixedOffset, Local};
use http::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use http::Method;
use serde_json::{json, Map, Value};
use tracing::{info, warn};

use crate::bidding::adslot::build_ad_slot;
use crate::bidding::auth::digest_authorization;
use crate::bidding::country::resolve_country_code;
use crate::bidding::device::{build_app, build_consent, build_device, build_geo, build_network, build_regs};
use crate::config::ConfigManager;
use crate::error::AdapterError;
use crate::logging::adx_log::TranslationLog;
use crate::model::credential::{CredentialResolver, PublishersCredential};
use crate::model::huaweiads::{HuaweiAdsRequest, HUAWEI_ADX_API_VERSION};
use crate::openrtb::request::BidRequest;

/// **交给 HTTP 传输层的请求包**
#[derive(Debug, Clone)]
pub struct RequestData {
    pub method: Method,
    pub uri: String,
    pub body: Vec<u8>,
    pub headers: HeaderMap,
}

impl RequestData {
    /// 以 JSON 形式展示请求包，用于 `/openrtb` 的预览应答
    pub fn preview(&self) -> Value {
        let headers: Map<String, Value> = self
            .headers
            .iter()
            .map(|(name, value)| {
                (
                    name.to_string(),
                    Value::String(String::from_utf8_lossy(value.as_bytes()).into_owned()),
                )
            })
            .collect();
        let body = serde_json::from_slice(&self.body)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&self.body).into_owned()));
        json!({
            "method": self.method.as_str(),
            "uri": self.uri,
            "headers": headers,
            "body": body,
        })
    }
}

/// 翻译结果：请求体、用于签名的主鉴权信息（第一个 imp）以及解析出的国家码
#[derive(Debug, Clone)]
pub struct Translation {
    pub request: HuaweiAdsRequest,
    pub credential: PublishersCredential,
    pub country_code: String,
}

/// **OpenRTB BidRequest -> HuaweiAdsRequest**
///
/// 逐个 imp 解析鉴权信息并构造广告位，任一 imp 失败即整体失败；
/// 之后一次性构造 app/device/network/regs/geo/consent。
pub fn translate(
    bid_request: &BidRequest,
    resolver: &dyn CredentialResolver,
    now: DateTime<FixedOffset>,
) -> Result<Translation, AdapterError> {
    let mut primary: Option<PublishersCredential> = None;
    let mut multislot = Vec::with_capacity(bid_request.imp.len());
    for (index, imp) in bid_request.imp.iter().enumerate() {
        let credential = resolver
            .resolve(imp)
            .map_err(|e| AdapterError::impression(index, &imp.id, e))?;
        let slot = build_ad_slot(&credential, imp).map_err(|e| AdapterError::impression(index, &imp.id, e))?;
        multislot.push(slot);
        primary.get_or_insert(credential);
    }
    let credential = primary.ok_or(AdapterError::NoImpressions)?;

    let country_code = resolve_country_code(bid_request);
    let app = build_app(bid_request, &country_code)?;
    let device = build_device(bid_request, &country_code, now)?;

    let request = HuaweiAdsRequest {
        version: HUAWEI_ADX_API_VERSION.to_string(),
        multislot,
        app,
        device,
        network: build_network(bid_request),
        regs: build_regs(bid_request),
        geo: build_geo(bid_request),
        consent: build_consent(bid_request),
        client_ad_request_id: bid_request.id.clone(),
    };
    Ok(Translation {
        request,
        credential,
        country_code,
    })
}

fn build_headers(credential: &PublishersCredential, bid_request: &BidRequest) -> Result<HeaderMap, AdapterError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json;charset=utf-8"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    let authorization = digest_authorization(credential, credential.is_test_authorization());
    let authorization =
        HeaderValue::from_str(&authorization).map_err(|_| AdapterError::InvalidHeader("Authorization"))?;
    headers.insert(AUTHORIZATION, authorization);

    if let Some(ua) = bid_request.device.as_ref().map(|d| d.ua.as_str()).filter(|ua| !ua.is_empty()) {
        match HeaderValue::from_str(ua) {
            Ok(value) => {
                headers.insert(USER_AGENT, value);
            }
            Err(_) => warn!(request_id = %bid_request.id, "device.ua is not a valid header value, skipped"),
        }
    }
    Ok(headers)
}

/// 以当前本地时间构造请求包
pub fn make_request(
    bid_request: &BidRequest,
    resolver: &dyn CredentialResolver,
    config: &ConfigManager,
) -> Result<RequestData, AdapterError> {
    make_request_at(bid_request, resolver, config, Local::now().fixed_offset())
}

/// **构造发往 HuaweiAds 的完整请求包**（method / uri / body / headers）
pub fn make_request_at(
    bid_request: &BidRequest,
    resolver: &dyn CredentialResolver,
    config: &ConfigManager,
    now: DateTime<FixedOffset>,
) -> Result<RequestData, AdapterError> {
    let mut log = TranslationLog::new(&bid_request.id, bid_request.imp.len());
    let result = assemble(bid_request, resolver, config, now, &mut log);
    if let Err(e) = &result {
        log.fail(e);
    }
    log.emit();
    result
}

fn assemble(
    bid_request: &BidRequest,
    resolver: &dyn CredentialResolver,
    config: &ConfigManager,
    now: DateTime<FixedOffset>,
    log: &mut TranslationLog,
) -> Result<RequestData, AdapterError> {
    let translation = translate(bid_request, resolver, now)?;
    let body = serde_json::to_vec(&translation.request)?;
    let headers = build_headers(&translation.credential, bid_request)?;
    let uri = config.endpoint_for(&translation.country_code);

    info!(
        request_id = %bid_request.id,
        slots = translation.request.multislot.len(),
        country = %translation.country_code,
        endpoint = %uri,
        "HuaweiAds request assembled"
    );
    log.succeed(&translation.country_code, &uri);

    Ok(RequestData {
        method: Method::POST,
        uri,
        body,
        headers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bidding::auth::TEST_AUTHORIZATION_NONCE;
    use crate::bidding::endpoint::{CHINESE_SITE_ENDPOINT, EUROPEAN_SITE_ENDPOINT};
    use crate::error::ImpressionError;
    use crate::model::credential::FixtureCredentialResolver;
    use crate::openrtb::request::{Banner, Device, Geo, Imp, Video};
    use chrono::TimeZone;

    fn now() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(3600).unwrap().with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    fn fixture(adtype: &str) -> FixtureCredentialResolver {
        let mut resolver = FixtureCredentialResolver::default();
        resolver.credential.adtype = adtype.to_string();
        resolver.credential.is_test_authorization = "true".to_string();
        resolver
    }

    fn banner_imp(id: &str) -> Imp {
        Imp {
            id: id.to_string(),
            banner: Some(Banner {
                w: Some(320),
                h: Some(50),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn bid_request(imp: Vec<Imp>) -> BidRequest {
        BidRequest {
            id: "req-42".to_string(),
            imp,
            device: Some(Device {
                ua: "Mozilla/5.0".to_string(),
                ifa: "gaid-1".to_string(),
                geo: Some(Geo {
                    country: "CHN".to_string(),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn assembles_request_data() {
        let request = bid_request(vec![banner_imp("1"), banner_imp("2")]);
        let data = make_request_at(&request, &fixture("banner"), &ConfigManager::default(), now()).unwrap();

        assert_eq!(data.method, Method::POST);
        assert_eq!(data.uri, CHINESE_SITE_ENDPOINT);
        assert_eq!(data.headers[CONTENT_TYPE], "application/json;charset=utf-8");
        assert_eq!(data.headers[ACCEPT], "application/json");
        assert_eq!(data.headers[USER_AGENT], "Mozilla/5.0");
        let authorization = data.headers[AUTHORIZATION].to_str().unwrap();
        assert!(authorization.starts_with("Digest username=3,realm=ppsadx/getResult,"));
        assert!(authorization.contains(&format!("nonce={},", TEST_AUTHORIZATION_NONCE)));
        assert!(authorization.ends_with(",algorithm=HmacSHA256,usertype=1,keyid=5"));

        let body: Value = serde_json::from_slice(&data.body).unwrap();
        assert_eq!(body["version"], "3.4");
        assert_eq!(body["clientAdRequestId"], "req-42");
        assert_eq!(body["multislot"].as_array().unwrap().len(), 2);
        assert_eq!(body["multislot"][0]["test"], 1);
        assert_eq!(body["device"]["belongCountry"], "CN");
        assert_eq!(body["app"]["country"], "CN");
    }

    #[test]
    fn impression_failure_aborts_with_index() {
        let roll_without_duration = Imp {
            id: "video-imp".to_string(),
            video: Some(Video::default()),
            ..Default::default()
        };
        let request = bid_request(vec![banner_imp("1"), roll_without_duration]);
        let err = translate(&request, &fixture("roll"), now()).unwrap_err();
        match err {
            AdapterError::Impression { index, imp_id, source } => {
                // 第一个 banner imp 与 roll 不匹配，先失败
                assert_eq!(index, 0);
                assert_eq!(imp_id, "1");
                assert!(matches!(source, ImpressionError::AdTypeMismatch { .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let request = bid_request(vec![Imp {
            id: "v".to_string(),
            video: Some(Video::default()),
            ..Default::default()
        }]);
        assert!(matches!(
            translate(&request, &fixture("roll"), now()),
            Err(AdapterError::Impression {
                index: 0,
                source: ImpressionError::RollDurationMissing,
                ..
            })
        ));
    }

    #[test]
    fn empty_imp_list_is_rejected() {
        let request = bid_request(vec![]);
        assert!(matches!(
            make_request_at(&request, &fixture("banner"), &ConfigManager::default(), now()),
            Err(AdapterError::NoImpressions)
        ));
    }

    #[test]
    fn closed_site_selection_overrides_country_routing() {
        let mut config = ConfigManager::default();
        config.extra_info.close_site_selection_by_country = "1".to_string();
        let request = bid_request(vec![banner_imp("1")]);
        let data = make_request_at(&request, &fixture("banner"), &config, now()).unwrap();
        assert_eq!(data.uri, EUROPEAN_SITE_ENDPOINT);
    }

    #[test]
    fn preview_exposes_decoded_body() {
        let request = bid_request(vec![banner_imp("1")]);
        let data = make_request_at(&request, &fixture("banner"), &ConfigManager::default(), now()).unwrap();
        let preview = data.preview();
        assert_eq!(preview["method"], "POST");
        assert_eq!(preview["uri"], CHINESE_SITE_ENDPOINT);
        assert_eq!(preview["headers"]["accept"], "application/json");
        assert_eq!(preview["body"]["multislot"][0]["w"], 320);
    }
}
