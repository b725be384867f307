// src/lib.rs

use std::sync::Arc;

pub mod api;
pub mod bidding;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod openrtb;

use bidding::exchange_client::ExchangeClient;
use config::ConfigManager;
use model::credential::CredentialResolver;

pub use bidding::engine::{make_request, make_request_at, translate, RequestData, Translation};
pub use error::{AdapterError, ImpressionError};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ConfigManager>,
    pub credentials: Arc<dyn CredentialResolver>,
    /// 为 None 时只返回请求包预览，不真正请求 HuaweiAds
    pub exchange: Option<ExchangeClient>,
}
