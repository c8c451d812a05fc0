use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use crate::{error::ApiError, news::ArticleService, state::AppState, storage::Article};

/// 配置文章相关路由。
///
/// 路由包括：
/// - `GET /articles`：启用中的文章列表
/// - `GET /articles/{id}`：获取单篇文章
pub fn setup_route() -> Router<AppState> {
    Router::new()
        .route("/articles", get(article_list))
        .route("/articles/{id}", get(article))
}

/// 获取文章列表。
///
/// 数据库不可用时返回静态文章，始终为 200。
async fn article_list(State(articles): State<Arc<ArticleService>>) -> Json<Vec<Article>> {
    Json(articles.list_active().await)
}

/// 根据标识获取单篇文章。
///
/// 不存在时返回 [`ApiError::NotFound`]；数据库不可用且静态数据也未命中时返回 [`ApiError::Internal`]。
async fn article(
    Path(id): Path<String>,
    State(articles): State<Arc<ArticleService>>,
) -> Result<Json<Article>, ApiError> {
    let article = articles.get_by_id(&id).await?;
    Ok(Json(article))
}
