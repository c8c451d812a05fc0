use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;

use super::{Quote, QuoteError, QuoteProvider};

/// 基于 Yahoo Finance chart 接口的行情源
///
/// 请求 `{base}{symbol}?range=1d&interval=1d`，
/// 由最新价与前收盘价计算涨跌额和涨跌幅。
#[derive(Clone)]
pub struct YahooQuoteProvider {
    client: reqwest::Client,
    base: Url,
}

impl YahooQuoteProvider {
    /// 使用指定的接口地址创建行情源
    ///
    /// ```ignore
    /// let provider = YahooQuoteProvider::new("https://query1.finance.yahoo.com/v8/finance/chart/")?;
    /// let quote = provider.quote("^GSPC").await?;
    /// ```
    pub fn new(base: &str) -> Result<Self, QuoteError> {
        let base = Url::parse(base).map_err(|e| QuoteError::InvalidUrl(e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(QuoteError::InvalidUrl(base.to_string()));
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(Self { client, base })
    }

    fn chart_url(&self, symbol: &str) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(symbol);
        }
        url.query_pairs_mut()
            .append_pair("range", "1d")
            .append_pair("interval", "1d");
        url
    }
}

#[derive(Deserialize)]
struct ChartEnvelope {
    chart: Option<ChartNode>,
}

#[derive(Deserialize)]
struct ChartNode {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<ChartError>,
}

#[derive(Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Deserialize)]
struct ChartResult {
    #[serde(default)]
    meta: Option<MetaNode>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MetaNode {
    #[serde(default)]
    regular_market_price: Option<f64>,
    #[serde(default)]
    chart_previous_close: Option<f64>,
    #[serde(default)]
    previous_close: Option<f64>,
}

impl From<MetaNode> for Quote {
    fn from(meta: MetaNode) -> Self {
        let price = meta.regular_market_price;
        let previous = meta.chart_previous_close.or(meta.previous_close);

        let change = price.zip(previous).map(|(p, prev)| p - prev);
        let change_percent = change
            .zip(previous)
            .filter(|(_, prev)| *prev != 0.0)
            .map(|(c, prev)| c * 100.0 / prev);

        Quote {
            price,
            change,
            change_percent,
        }
    }
}

#[async_trait]
impl QuoteProvider for YahooQuoteProvider {
    async fn quote(&self, symbol: &str) -> Result<Quote, QuoteError> {
        let resp = self.client.get(self.chart_url(symbol)).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(QuoteError::Status {
                symbol: symbol.to_string(),
                status: status.as_u16(),
            });
        }

        let envelope: ChartEnvelope = resp.json().await?;
        let chart = envelope
            .chart
            .ok_or_else(|| QuoteError::NoData(symbol.to_string()))?;

        if let Some(err) = chart.error {
            return Err(QuoteError::Upstream {
                symbol: symbol.to_string(),
                code: err.code,
                description: err.description,
            });
        }

        chart
            .result
            .and_then(|results| results.into_iter().next())
            .and_then(|r| r.meta)
            .map(Quote::from)
            .ok_or_else(|| QuoteError::NoData(symbol.to_string()))
    }
}
