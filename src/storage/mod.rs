mod models;
mod postgres;
mod store;

pub use self::{
    models::{Article, NewArticle},
    postgres::{Db, SCHEMA, connect_db, init_db, migrate},
    store::{ArticleStore, PgArticleStore, StorageError},
};
