use std::sync::Arc;

use axum::extract::FromRef;

use crate::{
    cache::{MokaTtlCache, PassThrough, TtlCache},
    config::Config,
    error::{Error, Result},
    market::{IndexService, IndexSnapshot, YahooQuoteProvider},
    news::ArticleService,
    storage::{Db, PgArticleStore},
};

/// 应用程序上下文
///
/// [`AppState`] 持有文章服务和指数服务，启动时构造一次，
/// 由 axum 通过 [`FromRef`] 注入到各个处理函数。
#[derive(Clone, FromRef)]
pub struct AppState {
    articles: Arc<ArticleService>,
    indices: Arc<IndexService>,
}

impl AppState {
    /// 创建一个新的 [`AppState`] 实例
    pub fn new(articles: ArticleService, indices: IndexService) -> Self {
        Self {
            articles: Arc::new(articles),
            indices: Arc::new(indices),
        }
    }

    /// 按配置组装生产环境使用的服务
    ///
    /// 缓存时长为 0 时使用 [`PassThrough`]。
    pub fn from_config(config: &Config, pool: Db) -> Result<Self> {
        let articles = ArticleService::new(Arc::new(PgArticleStore::new(pool)));

        let provider =
            YahooQuoteProvider::new(&config.quote_url).map_err(|e| Error::InvalidEnv {
                name: "MARKETPULSE_QUOTE_URL",
                reason: e.to_string(),
            })?;

        let cache: Arc<dyn TtlCache<Vec<IndexSnapshot>>> = if config.indices_ttl.is_zero() {
            Arc::new(PassThrough::<Vec<IndexSnapshot>>::default())
        } else {
            Arc::new(MokaTtlCache::<Vec<IndexSnapshot>>::new(config.indices_ttl))
        };

        let indices = IndexService::new(Arc::new(provider), cache);

        Ok(Self::new(articles, indices))
    }
}
