use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::header,
    response::IntoResponse,
    routing::get,
};

use crate::{market::IndexService, state::AppState};

pub fn setup_route() -> Router<AppState> {
    Router::new().route("/indices", get(index_list))
}

/// 获取指数快照。
///
/// 行情全部不可用时返回空数组。响应头允许中间层按缓存时长缓存。
async fn index_list(State(indices): State<Arc<IndexService>>) -> impl IntoResponse {
    let ttl = indices.cache_ttl();
    let cache_control = if ttl.is_zero() {
        "no-store".to_string()
    } else {
        format!("public, max-age={}", ttl.as_secs())
    };

    (
        [(header::CACHE_CONTROL, cache_control)],
        Json(indices.market_indices().await),
    )
}
