use async_trait::async_trait;

use super::{Article, Db, NewArticle};

/// 存储层错误
///
/// 连接失败、查询失败都归为此类，由访问层决定如何回退。
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Sqlx(#[from] sqlx::Error),
}

/// 文章存储接口
///
/// 支持查询启用中的文章、按标识查询以及批量写入。
#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// 查询所有 `active = TRUE` 的文章，按创建时间倒序
    async fn list_active(&self) -> Result<Vec<Article>, StorageError>;

    /// 按标识查询单篇文章，不检查 `active`
    ///
    /// 文章不存在时返回 `None`。
    async fn find_by_id(&self, id: &str) -> Result<Option<Article>, StorageError>;

    /// 在同一事务中写入一批文章
    ///
    /// 任意一条失败则整批回滚。返回按输入顺序生成的标识。
    async fn insert_batch(&self, articles: &[NewArticle]) -> Result<Vec<String>, StorageError>;
}

/// sqlx 的 [`ArticleStore`] 实现
#[derive(Clone)]
pub struct PgArticleStore {
    pool: Db,
}

impl PgArticleStore {
    pub fn new(pool: Db) -> Self {
        Self { pool }
    }
}

/// 将对外的字符串标识转换为主键
fn parse_key(id: &str) -> Option<i64> {
    id.parse::<i64>().ok()
}

#[async_trait]
impl ArticleStore for PgArticleStore {
    async fn list_active(&self) -> Result<Vec<Article>, StorageError> {
        let rows = sqlx::query_as::<_, Article>(
            r#"
            SELECT id::text AS id, title, summary, content, category, related_tickers,
                   author, image_url, created_at, active
            FROM articles
            WHERE active = TRUE
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Article>, StorageError> {
        // 主键为 BIGSERIAL，非数字标识不可能命中
        let Some(key) = parse_key(id) else {
            return Ok(None);
        };

        let row = sqlx::query_as::<_, Article>(
            r#"
            SELECT id::text AS id, title, summary, content, category, related_tickers,
                   author, image_url, created_at, active
            FROM articles
            WHERE id = $1
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn insert_batch(&self, articles: &[NewArticle]) -> Result<Vec<String>, StorageError> {
        let mut tx = self.pool.begin().await?;
        let mut ids = Vec::with_capacity(articles.len());

        for article in articles {
            let inserted = sqlx::query_scalar::<_, String>(
                "
                INSERT INTO articles
                    (title, summary, content, category, related_tickers, author, image_url)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING id::text
                ",
            )
            .bind(&article.title)
            .bind(&article.summary)
            .bind(&article.content)
            .bind(&article.category)
            .bind(&article.related_tickers)
            .bind(&article.author)
            .bind(&article.image_url)
            .fetch_one(tx.as_mut())
            .await;

            match inserted {
                Ok(id) => {
                    tracing::info!(%id, title = %article.title, "article saved");
                    ids.push(id);
                }
                Err(e) => {
                    tx.rollback().await.ok();
                    tracing::error!(error = %e, "inserting articles failed, rolled back");
                    return Err(e.into());
                }
            }
        }

        tx.commit().await?;
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::init_db;

    #[test]
    fn test_parse_key() {
        assert_eq!(parse_key("42"), Some(42));
        assert_eq!(parse_key("abc"), None);
        assert_eq!(parse_key(" 42"), None);
        assert_eq!(parse_key(""), None);
    }

    #[tokio::test]
    async fn test_non_numeric_id_skips_query() {
        // 端口 1 上没有数据库，发出查询必然失败
        let store = PgArticleStore::new(init_db("postgres://marketpulse@127.0.0.1:1/none").unwrap());

        assert!(matches!(store.find_by_id("not-a-number").await, Ok(None)));
        assert!(store.find_by_id("42").await.is_err());
    }
}
