use std::{sync::Arc, time::Duration};

use futures::future::join_all;

use crate::cache::TtlCache;

use super::{IndexSnapshot, QuoteProvider};

const CACHE_KEY: &str = "market-indices";

/// 需要展示的指数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackedIndex {
    pub symbol: &'static str,
    pub name: &'static str,
}

pub const TRACKED_INDICES: &[TrackedIndex] = &[
    TrackedIndex {
        symbol: "^GSPC",
        name: "S&P 500",
    },
    TrackedIndex {
        symbol: "^NDX",
        name: "Nasdaq 100",
    },
    TrackedIndex {
        symbol: "^DJI",
        name: "Dow Jones",
    },
    TrackedIndex {
        symbol: "BTC-USD",
        name: "Bitcoin",
    },
];

/// 指数快照服务
///
/// 并发查询每个指数的行情，查询失败的指数直接从结果中去掉；
/// 结果在缓存有效期内复用。
#[derive(Clone)]
pub struct IndexService {
    provider: Arc<dyn QuoteProvider>,
    cache: Arc<dyn TtlCache<Vec<IndexSnapshot>>>,
    indices: &'static [TrackedIndex],
}

impl IndexService {
    pub fn new(
        provider: Arc<dyn QuoteProvider>,
        cache: Arc<dyn TtlCache<Vec<IndexSnapshot>>>,
    ) -> Self {
        Self::with_indices(provider, cache, TRACKED_INDICES)
    }

    pub fn with_indices(
        provider: Arc<dyn QuoteProvider>,
        cache: Arc<dyn TtlCache<Vec<IndexSnapshot>>>,
        indices: &'static [TrackedIndex],
    ) -> Self {
        Self {
            provider,
            cache,
            indices,
        }
    }

    /// 缓存有效时长
    pub fn cache_ttl(&self) -> Duration {
        self.cache.ttl()
    }

    /// 获取指数快照，顺序与配置一致
    ///
    /// 全部失败时返回空列表。
    pub async fn market_indices(&self) -> Vec<IndexSnapshot> {
        self.cache
            .get_or_compute(CACHE_KEY, Box::pin(self.fetch_all()))
            .await
    }

    async fn fetch_all(&self) -> Vec<IndexSnapshot> {
        let fetches = self.indices.iter().map(|index| async move {
            match self.provider.quote(index.symbol).await {
                Ok(quote) => Some(IndexSnapshot::from_quote(index.name, &quote)),
                Err(e) => {
                    tracing::warn!(symbol = index.symbol, error = %e, "fetching index quote failed");
                    None
                }
            }
        });

        let snapshots: Vec<_> = join_all(fetches).await.into_iter().flatten().collect();
        if snapshots.is_empty() && !self.indices.is_empty() {
            tracing::warn!("no index quotes available");
        }
        snapshots
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        sync::atomic::{AtomicUsize, Ordering},
    };

    use async_trait::async_trait;

    use super::*;
    use crate::{
        cache::{MokaTtlCache, PassThrough},
        market::{Quote, QuoteError},
    };

    /// 按代码返回固定行情，未配置的代码视为失败
    struct StaticQuotes {
        quotes: HashMap<&'static str, Quote>,
        calls: AtomicUsize,
    }

    impl StaticQuotes {
        fn new(quotes: &[(&'static str, f64)]) -> Self {
            Self {
                quotes: quotes
                    .iter()
                    .map(|&(symbol, price)| {
                        (
                            symbol,
                            Quote {
                                price: Some(price),
                                change: Some(1.0),
                                change_percent: Some(0.5),
                            },
                        )
                    })
                    .collect(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl QuoteProvider for StaticQuotes {
        async fn quote(&self, symbol: &str) -> Result<Quote, QuoteError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.quotes
                .get(symbol)
                .copied()
                .ok_or_else(|| QuoteError::NoData(symbol.to_string()))
        }
    }

    fn no_cache() -> Arc<dyn TtlCache<Vec<IndexSnapshot>>> {
        Arc::new(PassThrough::<Vec<IndexSnapshot>>::default())
    }

    fn ttl_cache(ttl: Duration) -> Arc<dyn TtlCache<Vec<IndexSnapshot>>> {
        Arc::new(MokaTtlCache::<Vec<IndexSnapshot>>::new(ttl))
    }

    fn all_four() -> StaticQuotes {
        StaticQuotes::new(&[
            ("^GSPC", 5234.5),
            ("^NDX", 18100.0),
            ("^DJI", 39000.25),
            ("BTC-USD", 64000.5),
        ])
    }

    #[tokio::test]
    async fn test_order_follows_config() {
        let svc = IndexService::new(Arc::new(all_four()), no_cache());

        let names: Vec<_> = svc.market_indices().await.into_iter().map(|s| s.name).collect();
        assert_eq!(names, ["S&P 500", "Nasdaq 100", "Dow Jones", "Bitcoin"]);
    }

    #[tokio::test]
    async fn test_failed_symbol_is_dropped() {
        let provider = StaticQuotes::new(&[("^GSPC", 5234.5), ("^DJI", 39000.25), ("BTC-USD", 64000.5)]);
        let svc = IndexService::new(Arc::new(provider), no_cache());

        let snapshots = svc.market_indices().await;
        assert_eq!(snapshots.len(), 3);
        assert!(snapshots.iter().all(|s| s.name != "Nasdaq 100"));
        assert_eq!(snapshots[0].value, "5,234.50");
    }

    #[tokio::test]
    async fn test_total_failure_is_empty() {
        let svc = IndexService::new(
            Arc::new(StaticQuotes::new(&[])),
            no_cache(),
        );
        assert!(svc.market_indices().await.is_empty());
    }

    #[tokio::test]
    async fn test_memoized_within_window() {
        let provider = Arc::new(all_four());
        let svc = IndexService::new(
            provider.clone(),
            ttl_cache(Duration::from_secs(180)),
        );

        let first = svc.market_indices().await;
        let second = svc.market_indices().await;

        assert_eq!(first, second);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 4);
        assert_eq!(svc.cache_ttl(), Duration::from_secs(180));
    }

    #[tokio::test]
    async fn test_refetched_after_window() {
        let provider = Arc::new(all_four());
        let svc = IndexService::new(
            provider.clone(),
            ttl_cache(Duration::from_millis(50)),
        );

        svc.market_indices().await;
        tokio::time::sleep(Duration::from_millis(200)).await;
        svc.market_indices().await;

        assert_eq!(provider.calls.load(Ordering::SeqCst), 8);
    }

    /// 所有请求都到达屏障后才返回行情
    struct GatedQuotes(tokio::sync::Barrier);

    #[async_trait]
    impl QuoteProvider for GatedQuotes {
        async fn quote(&self, _symbol: &str) -> Result<Quote, QuoteError> {
            self.0.wait().await;
            Ok(Quote::default())
        }
    }

    #[tokio::test]
    async fn test_symbols_fetched_concurrently() {
        let provider = GatedQuotes(tokio::sync::Barrier::new(TRACKED_INDICES.len()));
        let svc = IndexService::new(Arc::new(provider), no_cache());

        // 顺序请求时第一个请求会一直等待屏障
        let snapshots = tokio::time::timeout(Duration::from_secs(5), svc.market_indices())
            .await
            .expect("行情请求应并发发出");
        assert_eq!(snapshots.len(), TRACKED_INDICES.len());
    }
}
