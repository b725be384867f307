// src/bidding/endpoint.rs

use std::collections::HashSet;

use once_cell::sync::Lazy;

pub const CHINESE_SITE_ENDPOINT: &str = "https://acd.op.hicloud.com/ppsadx/getResult";
pub const EUROPEAN_SITE_ENDPOINT: &str = "https://adx-dre.op.hicloud.com/ppsadx/getResult";
pub const ASIAN_SITE_ENDPOINT: &str = "https://adx-dra.op.hicloud.com/ppsadx/getResult";
pub const RUSSIAN_SITE_ENDPOINT: &str = "https://adx-drru.op.hicloud.com/ppsadx/getResult";
pub const DEFAULT_ENDPOINT: &str = EUROPEAN_SITE_ENDPOINT;

/// HuaweiAds 的区域站点
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Site {
    China,
    Russia,
    Europe,
    Asia,
}

impl Site {
    pub fn endpoint(self) -> &'static str {
        match self {
            Site::China => CHINESE_SITE_ENDPOINT,
            Site::Russia => RUSSIAN_SITE_ENDPOINT,
            Site::Europe => EUROPEAN_SITE_ENDPOINT,
            Site::Asia => ASIAN_SITE_ENDPOINT,
        }
    }
}

static CHINESE_SITE_COUNTRIES: Lazy<HashSet<&'static str>> = Lazy::new(|| ["CN"].into());

static RUSSIAN_SITE_COUNTRIES: Lazy<HashSet<&'static str>> = Lazy::new(|| ["RU"].into());

/// 欧洲站同时服务大洋洲与北美
static EUROPEAN_SITE_COUNTRIES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "AX", "AL", "AD", "AU", "AT", "BE", "BA", "BG", "CA", "HR", "CY", "CZ", "DK", "EE",
        "FO", "FI", "FR", "DE", "GI", "GR", "GL", "GG", "VA", "HU", "IS", "IE", "IM", "IL",
        "IT", "JE", "YK", "LV", "LI", "LT", "LU", "MT", "MD", "MC", "ME", "NL", "AN", "NZ",
        "NO", "PL", "PT", "RO", "MF", "VC", "SM", "RS", "SX", "SK", "SI", "ES", "SE", "CH",
        "TR", "UA", "GB", "US", "MK", "SJ", "BQ", "PM", "CW",
    ]
    .into_iter()
    .collect()
});

/// 按优先级匹配国家码，第一个命中的站点生效，均未命中归亚洲站
pub fn select_site(country_code: &str) -> Site {
    let groups: [(&HashSet<&'static str>, Site); 3] = [
        (&*CHINESE_SITE_COUNTRIES, Site::China),
        (&*RUSSIAN_SITE_COUNTRIES, Site::Russia),
        (&*EUROPEAN_SITE_COUNTRIES, Site::Europe),
    ];
    groups
        .iter()
        .find(|(countries, _)| countries.contains(country_code))
        .map(|(_, site)| *site)
        .unwrap_or(Site::Asia)
}

/// **根据国家码选择最终请求地址**
///
/// 空串或超过两位的国家码直接使用默认（欧洲）站点。
pub fn final_endpoint(country_code: &str) -> &'static str {
    if country_code.is_empty() || country_code.chars().count() > 2 {
        return DEFAULT_ENDPOINT;
    }
    select_site(country_code).endpoint()
}
