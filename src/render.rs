use std::path::Path;

use anyhow::Context;
use minijinja::{context, Environment};
use serde::Serialize;
use url::form_urlencoded;

use crate::news::Article;
use crate::pagination::SearchState;

pub const PAGE_TEMPLATE: &str = "index.html";

/// Article fields as the template sees them.
#[derive(Debug, Serialize)]
pub struct ArticleView<'a> {
    pub source: &'a str,
    pub author: Option<&'a str>,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub url: &'a str,
    pub url_to_image: Option<&'a str>,
    pub published_at: Option<String>,
    pub published_display: String,
    pub content: Option<&'a str>,
}

impl<'a> From<&'a Article> for ArticleView<'a> {
    fn from(article: &'a Article) -> Self {
        Self {
            source: &article.source.name,
            author: article.author.as_deref(),
            title: &article.title,
            description: article.description.as_deref(),
            url: &article.url,
            url_to_image: article.url_to_image.as_deref(),
            published_at: article.published_at.map(|at| at.to_rfc3339()),
            published_display: article.formatted_published_date(),
            content: article.content.as_deref(),
        }
    }
}

/// Search state flattened for the template.
#[derive(Debug, Serialize)]
pub struct SearchView<'a> {
    pub search_key: &'a str,
    pub status: &'a str,
    pub total_results: u64,
    pub requested_page: u32,
    pub current_page: u32,
    pub previous_page: u32,
    pub next_page: u32,
    pub total_pages: u32,
    pub is_last_page: bool,
    pub previous_href: String,
    pub next_href: String,
    pub articles: Vec<ArticleView<'a>>,
}

impl<'a> From<&'a SearchState> for SearchView<'a> {
    fn from(state: &'a SearchState) -> Self {
        Self {
            search_key: &state.search_key,
            status: &state.results.status,
            total_results: state.results.total_results,
            requested_page: state.requested_page(),
            current_page: state.current_page(),
            previous_page: state.previous_page(),
            next_page: state.next_page(),
            total_pages: state.total_pages(),
            is_last_page: state.is_last_page(),
            previous_href: page_href(&state.search_key, state.previous_page()),
            next_href: page_href(&state.search_key, state.next_page()),
            articles: state.results.articles.iter().map(ArticleView::from).collect(),
        }
    }
}

/// `/search` link for `search_key` at `page`.
pub fn page_href(search_key: &str, page: u32) -> String {
    let query: String = form_urlencoded::Serializer::new(String::new())
        .append_pair("q", search_key)
        .append_pair("page", &page.to_string())
        .finish();
    format!("/search?{query}")
}

/// Page renderer. Built once at startup and shared read-only.
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    /// Load `index.html` from `templates_dir`.
    pub fn from_dir(templates_dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = templates_dir.as_ref().join(PAGE_TEMPLATE);
        let source = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read template {}", path.display()))?;
        Ok(Self::from_source(source)?)
    }

    pub fn from_source(source: impl Into<String>) -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template_owned(PAGE_TEMPLATE, source.into())?;
        Ok(Self { env })
    }

    /// Landing view: the page without any search state.
    pub fn render_index(&self) -> Result<String, minijinja::Error> {
        self.env
            .get_template(PAGE_TEMPLATE)?
            .render(context! { search => () })
    }

    pub fn render_search(&self, state: &SearchState) -> Result<String, minijinja::Error> {
        let view = SearchView::from(state);
        self.env
            .get_template(PAGE_TEMPLATE)?
            .render(context! { search => view })
    }
}
