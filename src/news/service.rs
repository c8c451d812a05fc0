use std::sync::Arc;

use crate::storage::{Article, ArticleStore};

use super::fallback;

/// [`ArticleService::get_by_id`] 可能返回的结果
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// 数据库与静态数据中都不存在
    #[error("article not found")]
    NotFound,
    /// 数据库不可用，且静态数据中不存在
    #[error("article storage unavailable")]
    Internal,
}

/// 文章访问服务
///
/// 存储层的失败在这里统一转换为静态数据或 [`LookupError`]，
/// 不会原样传递给调用方。
#[derive(Clone)]
pub struct ArticleService {
    store: Arc<dyn ArticleStore>,
}

impl ArticleService {
    pub fn new(store: Arc<dyn ArticleStore>) -> Self {
        Self { store }
    }

    /// 查询所有启用中的文章
    ///
    /// 存储失败时返回完整的静态文章列表。
    pub async fn list_active(&self) -> Vec<Article> {
        match self.store.list_active().await {
            Ok(mut articles) => {
                articles.retain(|a| a.active);
                articles
            }
            Err(e) => {
                tracing::error!(error = %e, "listing articles failed, serving fallback set");
                fallback::articles().to_vec()
            }
        }
    }

    /// 按标识查询文章
    ///
    /// 数据库未命中或不可用时，再按标识查找静态文章。
    pub async fn get_by_id(&self, id: &str) -> Result<Article, LookupError> {
        let stored = self.store.find_by_id(id).await;

        if let Ok(Some(article)) = stored {
            return Ok(article);
        }

        if let Err(e) = &stored {
            tracing::error!(error = %e, id, "article lookup failed, trying fallback set");
        }

        match (fallback::find(id), stored) {
            (Some(article), _) => Ok(article.clone()),
            (None, Ok(_)) => Err(LookupError::NotFound),
            (None, Err(_)) => Err(LookupError::Internal),
        }
    }
}
