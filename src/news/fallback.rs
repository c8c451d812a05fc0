use std::sync::LazyLock;

use chrono::{Duration, Utc};

use crate::storage::Article;

const UNAVAILABLE: &str = "Full content not available in summary.";

/// 数据库不可用时使用的静态文章
///
/// 时间戳在进程内首次访问时相对当前时间确定，之后不再变化。
static FALLBACK: LazyLock<Vec<Article>> = LazyLock::new(|| {
    let now = Utc::now();
    let article = |id: &str,
                   title: &str,
                   author: &str,
                   age: Duration,
                   related_tickers: &str,
                   category: &str,
                   summary: &str| Article {
        id: id.to_string(),
        title: title.to_string(),
        summary: summary.to_string(),
        content: UNAVAILABLE.to_string(),
        category: category.to_string(),
        related_tickers: related_tickers.to_string(),
        author: author.to_string(),
        image_url: None,
        created_at: now - age,
        active: true,
    };

    vec![
        article(
            "1",
            "Nvidia chips are fueling a new era of computing, CEO says",
            "Bloomberg",
            Duration::minutes(2),
            "NVDA",
            "Markets",
            "Jensen Huang highlights the massive demand for Blackwell architecture as cloud providers race to build AI infrastructure.",
        ),
        article(
            "2",
            "Apple faces headwinds in China as sales slow",
            "Reuters",
            Duration::minutes(15),
            "AAPL",
            "Technology",
            "New local competitors and shifting consumer preferences are impacting iPhone shipments in the crucial Greater China region.",
        ),
        article(
            "3",
            "Fed signals rate cuts may come sooner than expected",
            "WSJ",
            Duration::hours(1),
            "SPY, QQQ",
            "Economy",
            "Inflation data cooling down provides the FOMC with the confidence needed to begin a easing cycle this summer.",
        ),
        article(
            "4",
            "Tesla Stock Rebounds on Robotaxi Optimism",
            "CNBC",
            Duration::hours(3),
            "TSLA",
            "Auto",
            "Analysts suggest the upcoming Aug 8 event could be a turning point for the company's valuation model.",
        ),
        article(
            "5",
            "Microsoft Azure Outpaces AWS in Recent Cloud Growth Metrics",
            "TechCrunch",
            Duration::hours(4),
            "MSFT, AMZN",
            "Cloud",
            "Deep integration of OpenAI models into the Azure stack is proving to be a significant competitive moat for Microsoft.",
        ),
        article(
            "6",
            "The AI Bubble: Is the Hype Meeting the Revenue Reality?",
            "Financial Times",
            Duration::hours(6),
            "GOOGL, META",
            "Analysis",
            "Investors are starting to demand clearer evidence of AI ROI beyond just increased infrastructure spend.",
        ),
    ]
});

/// 全部静态文章，按创建时间倒序
pub fn articles() -> &'static [Article] {
    &FALLBACK
}

/// 按标识查找静态文章
pub fn find(id: &str) -> Option<&'static Article> {
    FALLBACK.iter().find(|a| a.id == id)
}
