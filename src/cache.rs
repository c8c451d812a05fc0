use std::{marker::PhantomData, time::Duration};

use async_trait::async_trait;
use futures::future::BoxFuture;

/// 带过期时间的“读取或计算”缓存
///
/// 命中时直接返回缓存值；未命中或已过期时执行 `compute` 并写入结果。
/// 并发未命中的调用方会各自计算，最后写入的结果生效。
#[async_trait]
pub trait TtlCache<V>: Send + Sync
where
    V: Clone + Send + Sync + 'static,
{
    async fn get_or_compute(&self, key: &str, compute: BoxFuture<'_, V>) -> V;

    /// 缓存有效时长，不缓存时为 [`Duration::ZERO`]
    fn ttl(&self) -> Duration;
}

/// 基于 [`moka::future::Cache`] 的实现
pub struct MokaTtlCache<V> {
    inner: moka::future::Cache<String, V>,
    ttl: Duration,
}

impl<V> MokaTtlCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn new(ttl: Duration) -> Self {
        let inner = moka::future::Cache::builder()
            .max_capacity(64)
            .time_to_live(ttl)
            .build();
        Self { inner, ttl }
    }
}

#[async_trait]
impl<V> TtlCache<V> for MokaTtlCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    async fn get_or_compute(&self, key: &str, compute: BoxFuture<'_, V>) -> V {
        if let Some(value) = self.inner.get(key).await {
            return value;
        }

        let value = compute.await;
        self.inner.insert(key.to_owned(), value.clone()).await;
        value
    }

    fn ttl(&self) -> Duration {
        self.ttl
    }
}

/// 不缓存，每次都重新计算
pub struct PassThrough<V>(PhantomData<fn() -> V>);

impl<V> Default for PassThrough<V> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

#[async_trait]
impl<V> TtlCache<V> for PassThrough<V>
where
    V: Clone + Send + Sync + 'static,
{
    async fn get_or_compute(&self, _key: &str, compute: BoxFuture<'_, V>) -> V {
        compute.await
    }

    fn ttl(&self) -> Duration {
        Duration::ZERO
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    async fn compute_counted(counter: &AtomicUsize) -> usize {
        counter.fetch_add(1, Ordering::SeqCst) + 1
    }

    #[tokio::test]
    async fn test_moka_memoizes_within_ttl() {
        let cache = MokaTtlCache::<usize>::new(Duration::from_secs(60));
        let counter = AtomicUsize::new(0);

        let first = cache.get_or_compute("k", Box::pin(compute_counted(&counter))).await;
        let second = cache.get_or_compute("k", Box::pin(compute_counted(&counter))).await;

        assert_eq!(first, 1);
        assert_eq!(second, 1);
        assert_eq!(counter.load(Ordering::SeqCst), 1);

        // 不同的 key 相互独立
        let other = cache.get_or_compute("other", Box::pin(compute_counted(&counter))).await;
        assert_eq!(other, 2);
    }

    #[tokio::test]
    async fn test_moka_recomputes_after_expiry() {
        let cache = MokaTtlCache::<usize>::new(Duration::from_millis(50));
        let counter = AtomicUsize::new(0);

        assert_eq!(cache.get_or_compute("k", Box::pin(compute_counted(&counter))).await, 1);
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(cache.get_or_compute("k", Box::pin(compute_counted(&counter))).await, 2);
    }

    #[tokio::test]
    async fn test_pass_through_always_computes() {
        let cache = PassThrough::<usize>::default();
        let counter = AtomicUsize::new(0);

        assert_eq!(cache.get_or_compute("k", Box::pin(compute_counted(&counter))).await, 1);
        assert_eq!(cache.get_or_compute("k", Box::pin(compute_counted(&counter))).await, 2);
        assert_eq!(cache.ttl(), Duration::ZERO);
    }
}
