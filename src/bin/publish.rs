use std::{env, io::Read};

use marketpulse::{
    config,
    error::Result,
    news::draft,
    storage::{self, ArticleStore, PgArticleStore},
};

fn print_usage_and_exit() -> ! {
    eprintln!("Usage: publish [FILE]");
    eprintln!("Reads generated articles (a JSON array) from FILE, or stdin when omitted.");
    std::process::exit(1);
}

fn read_input(path: Option<String>) -> Result<String> {
    match path.as_deref() {
        None | Some("-") => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

async fn publish(path: Option<String>) -> Result<usize> {
    let text = read_input(path)?;
    let articles = draft::parse_generated(&text)?;

    if articles.is_empty() {
        tracing::info!("no articles to save");
        return Ok(0);
    }

    let database_url = config::database_url_from_env()?;
    let db = storage::connect_db(&database_url).await?;
    storage::migrate(&db, storage::SCHEMA).await?;

    tracing::info!(count = articles.len(), "saving articles");
    let ids = PgArticleStore::new(db.clone()).insert_batch(&articles).await?;
    db.close().await;

    Ok(ids.len())
}

#[tokio::main]
async fn main() {
    let mut args = env::args().skip(1); // 跳过程序名
    let path = args.next();

    if args.next().is_some() || matches!(path.as_deref(), Some("-h" | "--help")) {
        print_usage_and_exit();
    }

    marketpulse::init_tracing();

    match publish(path).await {
        Ok(count) => println!("✅ {count} article(s) published"),
        Err(e) => {
            eprintln!("❌ Publishing failed: {e}");
            std::process::exit(1);
        }
    }
}
