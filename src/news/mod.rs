pub mod draft;
pub mod fallback;
mod service;

pub use self::service::{ArticleService, LookupError};
