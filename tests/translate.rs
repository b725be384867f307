use chrono::{DateTime, FixedOffset, TimeZone};
use serde_json::{json, Value};

use huaweiads_adx::bidding::endpoint::{ASIAN_SITE_ENDPOINT, RUSSIAN_SITE_ENDPOINT};
use huaweiads_adx::config::ConfigManager;
use huaweiads_adx::model::credential::ImpExtCredentialResolver;
use huaweiads_adx::openrtb::request::BidRequest;
use huaweiads_adx::{make_request_at, AdapterError, ImpressionError};

fn now() -> DateTime<FixedOffset> {
    FixedOffset::east_opt(2 * 3600)
        .unwrap()
        .with_ymd_and_hms(2021, 8, 20, 19, 30, 0)
        .unwrap()
}

fn bidder(slotid: &str, adtype: &str) -> Value {
    json!({"bidder": {
        "slotid": slotid,
        "adtype": adtype,
        "publisherid": "3",
        "signkey": "4",
        "keyid": "5",
        "isTestAuthorization": "true"
    }})
}

fn sample_request() -> BidRequest {
    let native_markup = json!({"ver": "1.2", "assets": [
        {"id": 1, "title": {"len": 90}},
        {"id": 2, "img": {"type": 3, "w": 720, "h": 1280}},
        {"id": 3, "img": {"type": 3, "wmin": 1080, "hmin": 607}}
    ]})
    .to_string();

    serde_json::from_value(json!({
        "id": "test-imp-id",
        "imp": [
            {"id": "b", "banner": {"w": 300, "h": 250, "format": [{"w": 300, "h": 250}, {"w": 0, "h": 50}]},
             "ext": bidder("slot-banner", "banner")},
            {"id": "n", "native": {"request": native_markup}, "ext": bidder("slot-native", "NATIVE")},
            {"id": "v", "video": {"mimes": ["video/mp4"], "w": 640, "h": 360, "maxduration": 30},
             "ext": bidder("slot-roll", "roll")}
        ],
        "app": {"bundle": "com.huawei.p11", "name": "Huawei Browser", "ver": "9.1.0.301"},
        "device": {
            "ua": "useragent", "h": 1920, "w": 1080, "language": "zh", "model": "COL-TEST",
            "os": "android", "osv": "10.0.0", "devicetype": 4, "make": "huawei", "pxratio": 23.01,
            "ip": "ip", "mccmnc": "250-01", "connectiontype": 1, "dnt": 0, "ifa": "e4fe9bde-caa0-47b6-908d-ffba3fa184f2"
        },
        "user": {"ext": {"data": {
            "imei": ["imei"], "oaid": ["oaid"],
            "clientTime": ["2018-11-02 16:34:07.981+1300"]
        }, "consent": "CPaYLJBPaYLJBIPAAAENCSCgAPAAAAAAAAAAGsQAQGsAAAAA.YAAAAAAAAAA"}},
        "regs": {"coppa": 1}
    }))
    .unwrap()
}

#[test]
fn translates_full_request() {
    let data = make_request_at(&sample_request(), &ImpExtCredentialResolver, &ConfigManager::default(), now()).unwrap();
    assert_eq!(data.uri, RUSSIAN_SITE_ENDPOINT);

    let body: Value = serde_json::from_slice(&data.body).unwrap();
    assert_eq!(
        body["multislot"],
        json!([
            {"slotid": "slot-banner", "adtype": 8, "test": 1, "w": 300, "h": 250, "format": [{"w": 300, "h": 250}]},
            {"slotid": "slot-native", "adtype": 3, "test": 1, "w": 1080, "h": 607, "detailedCreativeTypeList": ["904"]},
            {"slotid": "slot-roll", "adtype": 60, "test": 1, "totalDuration": 30, "w": 640, "h": 360}
        ])
    );
    assert_eq!(
        body["app"],
        json!({"version": "9.1.0.301", "name": "Huawei Browser", "pkgname": "com.huawei.p11", "lang": "en", "country": "RU"})
    );
    assert_eq!(body["device"]["oaid"], "oaid");
    assert_eq!(body["device"]["imei"], "imei");
    assert_eq!(body["device"]["gaid"], "e4fe9bde-caa0-47b6-908d-ffba3fa184f2");
    assert_eq!(body["device"]["isTrackingEnabled"], "1");
    assert_eq!(body["device"]["gaidTrackingEnabled"], "1");
    assert_eq!(body["device"]["clientTime"], "2018-11-02 16:34:07.981+1300");
    assert_eq!(body["device"]["localeCountry"], "RU");
    assert_eq!(body["network"], json!({"type": 1, "carrier": 99, "cellInfo": [{"mcc": "250", "mnc": "01"}]}));
    assert_eq!(body["regs"], json!({"coppa": 1}));
    assert_eq!(body["consent"], "CPaYLJBPaYLJBIPAAAENCSCgAPAAAAAAAAAAGsQAQGsAAAAA.YAAAAAAAAAA");
    assert_eq!(body["clientAdRequestId"], "test-imp-id");

    assert_eq!(
        data.headers["authorization"],
        "Digest username=3,realm=ppsadx/getResult,nonce=1629473330823,\
         response=d95f4118a9619ee8d926b82c3dff822236786d1cc138a18b01282c7c38bc7fa0,\
         algorithm=HmacSHA256,usertype=1,keyid=5"
    );
    assert_eq!(data.headers["user-agent"], "useragent");
}

#[test]
fn translation_is_idempotent_under_test_authorization() {
    let request = sample_request();
    let config = ConfigManager::default();
    let first = make_request_at(&request, &ImpExtCredentialResolver, &config, now()).unwrap();
    let second = make_request_at(&request, &ImpExtCredentialResolver, &config, now()).unwrap();
    assert_eq!(first.body, second.body);
    assert_eq!(first.headers, second.headers);
    assert_eq!(first.uri, second.uri);
}

#[test]
fn failing_impression_is_identified() {
    let mut request = sample_request();
    request.imp[2].ext = Some(json!({"bidder": {"slotid": "s", "adtype": "roll", "publisherid": "3", "signkey": "", "keyid": "5"}}));
    let err = make_request_at(&request, &ImpExtCredentialResolver, &ConfigManager::default(), now()).unwrap_err();
    match err {
        AdapterError::Impression { index, imp_id, source } => {
            assert_eq!(index, 2);
            assert_eq!(imp_id, "v");
            assert!(matches!(source, ImpressionError::CredentialIncomplete("signkey")));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn missing_device_identifiers_abort_translation() {
    let mut request = sample_request();
    request.user = None;
    request.device.as_mut().unwrap().ifa.clear();
    assert!(matches!(
        make_request_at(&request, &ImpExtCredentialResolver, &ConfigManager::default(), now()),
        Err(AdapterError::NoDeviceIdentifier(_))
    ));
}

#[test]
fn unknown_mcc_routes_to_default_country_site() {
    let mut request = sample_request();
    request.device.as_mut().unwrap().mccmnc = "999-99".to_string();
    let data = make_request_at(&request, &ImpExtCredentialResolver, &ConfigManager::default(), now()).unwrap();
    // 默认国家 ZA 不在欧洲 / 俄罗斯 / 中国站点中
    assert_eq!(data.uri, ASIAN_SITE_ENDPOINT);
}
