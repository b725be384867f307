// src/config/config_manager.rs

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::bidding::endpoint::{final_endpoint, DEFAULT_ENDPOINT};
use crate::error::AdapterError;
use crate::model::credential::{
    CredentialResolver, FixtureCredentialResolver, ImpExtCredentialResolver, PublishersCredential,
};

/// 鉴权信息来源
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CredentialSource {
    /// 线上默认：解析 imp.ext.bidder
    #[default]
    ImpExt,
    /// 联调 / 一致性测试用的固定值
    Fixture,
}

/// Prebid 侧给 HuaweiAds 适配器的附加配置
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtraInfo {
    /// "1" 表示关闭按国家选站，固定使用 `endpoint`
    #[serde(
        rename = "closeSiteSelectionByCountry",
        default,
        skip_serializing_if = "String::is_empty"
    )]
    pub close_site_selection_by_country: String,
}

/// **适配器配置**
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ConfigManager {
    pub endpoint: String,
    pub extra_info: ExtraInfo,
    pub credential_source: CredentialSource,
    pub fixture: PublishersCredential,
    pub exchange_timeout_ms: u64,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            extra_info: ExtraInfo::default(),
            credential_source: CredentialSource::default(),
            fixture: FixtureCredentialResolver::default().credential,
            exchange_timeout_ms: 1000,
        }
    }
}

impl ConfigManager {
    pub fn from_json(content: &str) -> Result<Self, AdapterError> {
        serde_json::from_str(content).map_err(|e| AdapterError::Config(e.to_string()))
    }

    /// 读取配置文件，文件不存在或格式错误时使用默认配置
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let loaded = fs::read_to_string(path)
            .map_err(|e| AdapterError::Config(e.to_string()))
            .and_then(|content| Self::from_json(&content));
        match loaded {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "unable to load adapter config, using defaults");
                Self::default()
            }
        }
    }

    pub fn site_selection_closed(&self) -> bool {
        self.extra_info.close_site_selection_by_country == "1"
    }

    /// 按国家选站，关闭选站时固定使用配置的 endpoint
    pub fn endpoint_for(&self, country_code: &str) -> String {
        if self.site_selection_closed() {
            return self.endpoint.clone();
        }
        final_endpoint(country_code).to_string()
    }

    pub fn credential_resolver(&self) -> Arc<dyn CredentialResolver> {
        match self.credential_source {
            CredentialSource::ImpExt => Arc::new(ImpExtCredentialResolver),
            CredentialSource::Fixture => Arc::new(FixtureCredentialResolver::new(self.fixture.clone())),
        }
    }
}
