use std::{env, time::Duration};

use crate::error::{Error, Result};

const DEFAULT_LISTEN: &str = "0.0.0.0:3000";
const DEFAULT_INDICES_TTL: Duration = Duration::from_secs(180);
/// moka 允许的最长 `time_to_live`（1000 年）
const MAX_INDICES_TTL_SECS: u64 = 1000 * 365 * 24 * 3600;
pub const DEFAULT_QUOTE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart/";

/// 运行配置，启动时从环境变量读取一次
#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres 连接 URL（`DATABASE_URL`）
    pub database_url: String,
    /// HTTP 监听地址（`MARKETPULSE_LISTEN`）
    pub listen: String,
    /// 指数快照的缓存时间（`MARKETPULSE_INDICES_TTL`，单位秒），为 0 时不缓存
    pub indices_ttl: Duration,
    /// 行情接口地址（`MARKETPULSE_QUOTE_URL`）
    pub quote_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 从任意键值来源构造配置，便于测试
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database_url = database_url(&lookup)?;

        let listen = lookup("MARKETPULSE_LISTEN").unwrap_or_else(|| DEFAULT_LISTEN.to_string());

        let indices_ttl = match lookup("MARKETPULSE_INDICES_TTL") {
            Some(raw) => parse_ttl(&raw).map_err(|reason| Error::InvalidEnv {
                name: "MARKETPULSE_INDICES_TTL",
                reason,
            })?,
            None => DEFAULT_INDICES_TTL,
        };

        let quote_url =
            lookup("MARKETPULSE_QUOTE_URL").unwrap_or_else(|| DEFAULT_QUOTE_URL.to_string());

        Ok(Self {
            database_url,
            listen,
            indices_ttl,
            quote_url,
        })
    }
}

/// 读取 `DATABASE_URL`，服务和 `publish` 共用
pub fn database_url_from_env() -> Result<String> {
    database_url(|key| env::var(key).ok())
}

fn database_url(lookup: impl Fn(&str) -> Option<String>) -> Result<String> {
    lookup("DATABASE_URL")
        .filter(|url| !url.trim().is_empty())
        .ok_or(Error::MissingEnv("DATABASE_URL"))
}

/// 解析缓存时长（秒），超过 [`MAX_INDICES_TTL_SECS`] 视为无效
fn parse_ttl(raw: &str) -> core::result::Result<Duration, String> {
    let secs = raw.trim().parse::<u64>().map_err(|e| e.to_string())?;
    if secs > MAX_INDICES_TTL_SECS {
        return Err(format!("must not exceed {MAX_INDICES_TTL_SECS} seconds"));
    }
    Ok(Duration::from_secs(secs))
}
