use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

/// 数据库连接池类型
pub type Db = sqlx::PgPool;

/// 建表脚本，内容均为幂等语句
pub const SCHEMA: &str = include_str!("../../sql/01-CREATE_TABLE.sql");

/// 连接池配置：
///
/// - 最大空闲时间 60 秒
/// - 最大生存时间 1500 秒（约 25 分钟）
/// - 最大连接数 10
/// - 获取连接超时 2 秒
/// - 获取前测试连接
fn pool_options() -> PgPoolOptions {
    PgPoolOptions::new()
        .idle_timeout(Duration::from_secs(60))
        .max_lifetime(Duration::from_secs(1500))
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(2))
        .test_before_acquire(true)
}

/// 创建惰性连接池
///
/// 不会在启动时建立连接，数据库不可用时服务仍可启动，
/// 每次查询失败都交由上层回退到静态数据。
pub fn init_db(conn_url: &str) -> Result<Db, sqlx::Error> {
    pool_options().connect_lazy(conn_url)
}

/// 创建连接池并立即建立连接
///
/// 最小连接数 2，用于写入流程，数据库不可用时直接返回错误。
pub async fn connect_db(conn_url: &str) -> Result<Db, sqlx::Error> {
    pool_options().min_connections(2).connect(conn_url).await
}

/// 执行 SQL 脚本
///
/// 将内容按 `;` 分割，每条 SQL 单独执行
pub async fn migrate(db: &Db, script: &str) -> Result<(), sqlx::Error> {
    for sql in script.split(';') {
        if sql.trim().is_empty() {
            continue;
        }
        sqlx::query(sql).execute(db).await?;
    }
    Ok(())
}
