use async_trait::async_trait;

/// 单个标的的实时行情
///
/// 行情源可能缺少任意字段。
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Quote {
    /// 最新价
    pub price: Option<f64>,
    /// 涨跌额
    pub change: Option<f64>,
    /// 涨跌幅，百分数（`-1.23` 表示 `-1.23%`）
    pub change_percent: Option<f64>,
}

/// 行情源错误
#[derive(Debug, thiserror::Error)]
pub enum QuoteError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("quote request for `{symbol}` returned status {status}")]
    Status { symbol: String, status: u16 },

    #[error("quote provider error for `{symbol}`: {code}: {description}")]
    Upstream {
        symbol: String,
        code: String,
        description: String,
    },

    #[error("no quote data for `{0}`")]
    NoData(String),

    #[error("invalid quote url: {0}")]
    InvalidUrl(String),
}

/// 行情源
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// 查询单个标的的行情
    async fn quote(&self, symbol: &str) -> Result<Quote, QuoteError>;
}
