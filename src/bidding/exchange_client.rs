// src/bidding/exchange_client.rs

use std::time::Instant;

use reqwest::Client;
use tokio::time::Duration;
use tracing::{info, warn};

use crate::bidding::engine::RequestData;
use crate::error::AdapterError;
use crate::model::huaweiads_response::HuaweiAdsResponse;

/// 把构造好的 RequestData 发往 HuaweiAds，不做重试
#[derive(Clone)]
pub struct ExchangeClient {
    client: Client,
    timeout: Duration,
}

impl ExchangeClient {
    pub fn new(timeout_ms: u64) -> Self {
        Self {
            client: Client::new(),
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    /// 发送请求并解码应答
    pub async fn send(&self, request: &RequestData) -> Result<HuaweiAdsResponse, AdapterError> {
        let start = Instant::now();
        let result = self
            .client
            .request(request.method.clone(), &request.uri)
            .headers(request.headers.clone())
            .body(request.body.clone())
            .timeout(self.timeout)
            .send()
            .await
            .and_then(|resp| resp.error_for_status());
        let elapsed = start.elapsed().as_millis();

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                warn!(uri = %request.uri, elapsed_ms = elapsed as u64, error = %e, "HuaweiAds request failed");
                return Err(e.into());
            }
        };
        let decoded = response.json::<HuaweiAdsResponse>().await?;
        info!(
            uri = %request.uri,
            elapsed_ms = elapsed as u64,
            retcode = decoded.retcode,
            ads = decoded.multiad.len(),
            "HuaweiAds response received"
        );
        Ok(decoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use http::{HeaderMap, Method};
    use serde_json::{json, Value};
    use tokio::net::TcpListener;

    async fn spawn_exchange(app: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/ppsadx/getResult", addr)
    }

    fn request_to(uri: String) -> RequestData {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", "application/json;charset=utf-8".parse().unwrap());
        RequestData {
            method: Method::POST,
            uri,
            body: br#"{"version":"3.4","multislot":[{"slotid":"s1","adtype":8}]}"#.to_vec(),
            headers,
        }
    }

    #[tokio::test]
    async fn decodes_exchange_response() {
        let app = Router::new().route(
            "/ppsadx/getResult",
            post(|Json(body): Json<Value>| async move {
                Json(json!({
                    "retcode": 200,
                    "reason": "",
                    "multiad": [{"adtype": body["multislot"][0]["adtype"], "slotid": "s1", "retcode30": 200}]
                }))
            }),
        );
        let uri = spawn_exchange(app).await;

        let response = ExchangeClient::new(1000).send(&request_to(uri)).await.unwrap();
        assert_eq!(response.retcode, 200);
        assert_eq!(response.multiad.len(), 1);
        assert_eq!(response.multiad[0].adtype, 8);
        assert_eq!(response.multiad[0].slotid, "s1");
    }

    #[tokio::test]
    async fn error_status_is_transport_error() {
        let app = Router::new().route("/ppsadx/getResult", post(|| async { StatusCode::INTERNAL_SERVER_ERROR }));
        let uri = spawn_exchange(app).await;

        let err = ExchangeClient::new(1000).send(&request_to(uri)).await.unwrap_err();
        assert!(matches!(err, AdapterError::Transport(_)));
    }

    #[tokio::test]
    async fn closed_port_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = ExchangeClient::new(1000)
            .send(&request_to(format!("http://{}/ppsadx/getResult", addr)))
            .await
            .unwrap_err();
        assert!(matches!(err, AdapterError::Transport(_)));
    }
}
