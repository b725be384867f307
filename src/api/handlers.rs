use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::warn;

use crate::bidding::engine::make_request;
use crate::openrtb::request::BidRequest;
use crate::AppState;

/// **处理 OpenRTB 竞价请求**
///
/// 默认返回 201 和翻译后的请求包预览；`--forward` 模式下发往 HuaweiAds 并透传应答。
/// 请求体无法解析时同样以 `{ "error": ... }` 返回。
pub async fn handle_openrtb_request(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BidRequest>, JsonRejection>,
) -> (StatusCode, Json<Value>) {
    let bid_request = match payload {
        Ok(Json(bid_request)) => bid_request,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "rejected bid request body");
            return (
                rejection.status(),
                Json(json!({ "error": rejection.body_text() })),
            );
        }
    };

    let request_data = match make_request(&bid_request, state.credentials.as_ref(), &state.config) {
        Ok(request_data) => request_data,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "id": bid_request.id, "error": e.to_string() })),
            )
        }
    };

    let Some(exchange) = &state.exchange else {
        return (StatusCode::CREATED, Json(request_data.preview()));
    };
    match exchange.send(&request_data).await {
        Ok(response) => (
            StatusCode::OK,
            Json(serde_json::to_value(response).unwrap_or_default()),
        ),
        Err(e) => (
            StatusCode::BAD_GATEWAY,
            Json(json!({ "id": bid_request.id, "error": e.to_string() })),
        ),
    }
}
