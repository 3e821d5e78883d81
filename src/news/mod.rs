pub mod client;
pub mod models;

pub use client::NewsClient;
pub use models::{Article, ArticleSource, ResultSet, SourceId};
