pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod market;
pub mod news;
pub mod state;
pub mod storage;

use tracing_subscriber::{EnvFilter, fmt::time::ChronoLocal};

use config::Config;
use state::AppState;

/// 初始化日志，过滤规则取自 `MARKETPULSE_LOG`
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S%.3f".to_string()))
        .with_env_filter(EnvFilter::from_env("MARKETPULSE_LOG"))
        .init();
}

pub async fn run() -> error::Result<()> {
    init_tracing();

    let config = Config::from_env()?;
    let pool = storage::init_db(&config.database_url)?;
    let app = AppState::from_config(&config, pool)?;

    api::run_server(app, &config.listen).await
}
