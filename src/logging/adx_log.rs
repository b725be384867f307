use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

/// **单次翻译日志**
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TranslationLog {
    pub timestamp: String,        // 记录时间
    pub log_type: String,         // 日志类型，固定 "huaweiads_request"
    pub request_id: String,       // OpenRTB `BidRequest.id`
    pub imp_count: usize,         // imp 数量，即广告位数量
    pub status: String,           // "success" or "failure"
    pub country: Option<String>,  // 解析出的国家码
    pub endpoint: Option<String>, // 最终请求地址
    pub failure_reason: Option<String>,
}

impl TranslationLog {
    pub fn new(request_id: &str, imp_count: usize) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            log_type: "huaweiads_request".to_string(),
            request_id: request_id.to_string(),
            imp_count,
            status: "failure".to_string(), // 默认失败，成功后更新
            country: None,
            endpoint: None,
            failure_reason: None,
        }
    }

    pub fn succeed(&mut self, country: &str, endpoint: &str) {
        self.status = "success".to_string();
        self.country = Some(country.to_string());
        self.endpoint = Some(endpoint.to_string());
    }

    pub fn fail(&mut self, reason: &impl std::fmt::Display) {
        self.status = "failure".to_string();
        self.failure_reason = Some(reason.to_string());
    }

    pub fn is_success(&self) -> bool {
        self.status == "success"
    }

    /// 以 JSON 写入 `adx_log` target
    pub fn emit(&self) {
        let line = serde_json::to_string(self).unwrap_or_default();
        if self.is_success() {
            info!(target: "adx_log", "{}", line);
        } else {
            error!(target: "adx_log", "{}", line);
        }
    }
}
