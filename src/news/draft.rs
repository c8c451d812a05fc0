use serde::Deserialize;

use crate::{
    error::{Error, Result},
    storage::NewArticle,
};

const DEFAULT_CATEGORY: &str = "Markets";
const DEFAULT_AUTHOR: &str = "William Barnaby";

/// 内容生成器输出的单篇文章
///
/// 除标题、摘要和正文外，其余字段都可能缺失或为 `null`。
#[derive(Debug, Deserialize)]
pub struct ArticleDraft {
    pub title: String,
    pub summary: String,
    pub content: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub related_tickers: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl From<ArticleDraft> for NewArticle {
    fn from(draft: ArticleDraft) -> Self {
        fn non_empty(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.trim().is_empty())
        }

        NewArticle {
            title: draft.title,
            summary: draft.summary,
            content: draft.content,
            category: non_empty(draft.category).unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            related_tickers: draft.related_tickers.unwrap_or_default(),
            author: non_empty(draft.author).unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
            image_url: non_empty(draft.image_url),
        }
    }
}

/// 去除模型有时附带的 Markdown 代码块标记
fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// 解析内容生成器的输出
///
/// 输出应为 JSON 数组，可能被 ```` ```json ```` 包裹。
/// 缺失的字段按默认值补齐。
pub fn parse_generated(text: &str) -> Result<Vec<NewArticle>> {
    let json = strip_code_fences(text);
    if json.is_empty() {
        return Err(Error::FormatError("generated content is empty"));
    }

    let drafts: Vec<ArticleDraft> = serde_json::from_str(&json)?;
    Ok(drafts.into_iter().map(NewArticle::from).collect())
}
