mod articles;
mod indices;

use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::instrument;

use crate::{error::Result, state::AppState};

/// 设置应用的路由。
///
/// 将 `/api/v1` 下的文章接口和指数接口组合在一起，并绑定应用状态。
pub fn setup_route(app: AppState) -> Router {
    Router::new()
        .nest(
            "/api/v1",
            articles::setup_route().merge(indices::setup_route()),
        )
        .with_state(app)
}

/// 启动 HTTP 服务，并使用给定的路由处理请求。
#[instrument(name = "http server", skip(router))]
pub async fn run_server_with_router(router: Router, listen: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(listen).await?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, router).await?;
    Ok(())
}

/// 启动 HTTP 服务，自动设置路由和中间件。
///
/// 1. 生成路由
/// 2. 添加日志和追踪中间件
/// 3. 启动服务器
pub async fn run_server(app: AppState, listen: &str) -> Result<()> {
    let router = setup_route(app);
    let router = add_middlewares(router);
    run_server_with_router(router, listen).await
}

/// 为路由添加请求追踪中间件。
///
/// 只记录返回 5xx 的请求，例如数据库不可用且静态文章也未命中时的 500；
/// 正常请求不输出日志。
fn add_middlewares(router: Router) -> Router {
    fn log_server_error(
        err: tower_http::classify::ServerErrorsFailureClass,
        latency: std::time::Duration,
        _span: &tracing::Span,
    ) {
        tracing::error!(error = %err, latency_ms = latency.as_millis() as u64, "request failed");
    }

    router.layer(
        TraceLayer::new_for_http()
            .on_failure(log_server_error)
            .on_request(()),
    )
}
