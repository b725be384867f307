// src/error.rs

use thiserror::Error;

/// 单个 imp 级别的失败原因，由 `AdapterError::Impression` 包装并带上 imp 下标
#[derive(Error, Debug)]
pub enum ImpressionError {
    #[error("publishers credential is not complete: {0} is empty")]
    CredentialIncomplete(&'static str),

    #[error("unmarshal imp.ext.bidder failed: {0}")]
    MalformedImpExt(String),

    #[error("request has {creative}, doesn't correspond to huawei adtype {adtype}")]
    AdTypeMismatch { creative: &'static str, adtype: String },

    #[error("request has audio, not currently supported")]
    UnsupportedCreative,

    #[error("please choose one of our supported type banner, native, or video")]
    MissingCreative,

    #[error("imp.native.request is empty")]
    NativeMarkupEmpty,

    #[error("imp.native.request is not a valid native request: {0}")]
    NativeMarkupInvalid(#[source] serde_json::Error),

    #[error("video maxduration is empty when huaweiads adtype is roll")]
    RollDurationMissing,
}

/// **翻译流程的顶层错误**，任何一个都会终止整个请求，不产出部分结果
#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("imp[{index}] (id={imp_id}): {source}")]
    Impression {
        index: usize,
        imp_id: String,
        #[source]
        source: ImpressionError,
    },

    #[error("bid request has no imp")]
    NoImpressions,

    #[error("get device id failed: {0}")]
    NoDeviceIdentifier(&'static str),

    #[error("unmarshal user.ext failed: {0}")]
    MalformedUserExt(String),

    #[error("generate HuaweiAds AppInfo failed: app.bundle is empty")]
    AppBundleMissing,

    #[error("invalid header value for {0}")]
    InvalidHeader(&'static str),

    #[error("serialize HuaweiAds request failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("exchange request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("config error: {0}")]
    Config(String),
}

impl AdapterError {
    pub fn impression(index: usize, imp_id: &str, source: ImpressionError) -> Self {
        AdapterError::Impression {
            index,
            imp_id: imp_id.to_string(),
            source,
        }
    }
}
