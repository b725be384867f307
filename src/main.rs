// src/main.rs

use axum::{routing::post, serve, Router};
use clap::Parser;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};
use tracing_appender::rolling;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

use huaweiads_adx::api::handlers::handle_openrtb_request;
use huaweiads_adx::bidding::exchange_client::ExchangeClient;
use huaweiads_adx::config::ConfigManager;
use huaweiads_adx::AppState;

#[derive(Parser, Debug)]
#[command(author = "whiteCcinn", version = "1.0", about = "OpenRTB -> HuaweiAds request adapter")]
struct CliArgs {
    #[arg(short, long, default_value_t = 8081)]
    port: u16,
    #[arg(long, default_value = "logs")]
    log_dir: String,
    /// 适配器配置文件（JSON）
    #[arg(long, default_value = "static/huaweiads.json")]
    config: String,
    /// 直接把翻译后的请求发往 HuaweiAds，而不是返回预览
    #[arg(long, default_value_t = false)]
    forward: bool,
}

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();

    // 初始化全局 tracing 日志
    let log_file = rolling::hourly(&args.log_dir, "adx_log.json");
    let (non_blocking, _guard) = tracing_appender::non_blocking(log_file);
    let subscriber = Registry::default()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().json().with_writer(non_blocking));
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Unable to set global tracing subscriber: {}", e);
        return;
    }

    let config = Arc::new(ConfigManager::load(&args.config));
    info!(
        config = %args.config,
        credential_source = ?config.credential_source,
        site_selection_closed = config.site_selection_closed(),
        forward = args.forward,
        "adapter config loaded"
    );

    let exchange = args
        .forward
        .then(|| ExchangeClient::new(config.exchange_timeout_ms));
    let state = Arc::new(AppState {
        credentials: config.credential_resolver(),
        config: config.clone(),
        exchange,
    });

    let app = Router::new()
        .route("/openrtb", post(handle_openrtb_request))
        .with_state(state);
    let addr = format!("0.0.0.0:{}", args.port);
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %addr, error = %e, "unable to bind");
            return;
        }
    };
    info!("HuaweiAds adapter running at http://{}", addr);

    let shutdown = async {
        let _ = signal::ctrl_c().await;
        info!("Shutting down gracefully...");
    };
    if let Err(e) = serve(listener, app).with_graceful_shutdown(shutdown).await {
        error!(error = %e, "server error");
    }
    info!("HuaweiAds adapter shut down.");
}
