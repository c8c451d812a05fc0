use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 文章
///
/// 既是 `articles` 表的行，也是接口返回的 JSON 结构。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Article {
    /// 文章标识，对外视为不透明字符串
    pub id: String,
    /// 标题
    pub title: String,
    /// 摘要
    pub summary: String,
    /// 正文
    pub content: String,
    /// 分类
    pub category: String,
    /// 相关股票代码，逗号分隔的自由文本
    pub related_tickers: String,
    /// 作者
    pub author: String,
    /// 配图地址
    pub image_url: Option<String>,
    /// 创建时间
    pub created_at: DateTime<Utc>,
    /// 是否在列表中展示
    pub active: bool,
}

impl Article {
    /// 拆分 [`Article::related_tickers`]
    ///
    /// 按逗号分割并去除空白，跳过空项，不去重。
    pub fn tickers(&self) -> impl Iterator<Item = &str> {
        self.related_tickers
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

/// 待写入的文章
///
/// 标识、创建时间和 `active` 由数据库生成。
#[derive(Debug, Clone, PartialEq)]
pub struct NewArticle {
    pub title: String,
    pub summary: String,
    pub content: String,
    pub category: String,
    pub related_tickers: String,
    pub author: String,
    pub image_url: Option<String>,
}
