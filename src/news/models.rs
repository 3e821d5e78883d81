use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Identifier of the publishing source.
///
/// Upstream sends `null` for most outlets, a string slug for the ones it
/// knows (`"bbc-news"`), and occasionally a number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceId {
    #[default]
    Absent,
    Numeric(i64),
    Text(String),
}

impl SourceId {
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleSource {
    #[serde(default)]
    pub id: SourceId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

/// One article as returned by `/v2/everything`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default)]
    pub source: ArticleSource,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default)]
    pub url_to_image: Option<String>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub content: Option<String>,
}

impl Article {
    /// Publication date as `"Month Day, Year"`, e.g. `"March 7, 2024"`.
    /// Empty when upstream sent no date.
    pub fn formatted_published_date(&self) -> String {
        self.published_at
            .map(|at| at.format("%B %-d, %Y").to_string())
            .unwrap_or_default()
    }
}

/// Decoded body of an upstream search response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSet {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub total_results: u64,
    #[serde(default)]
    pub articles: Vec<Article>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::news::fixtures::SAMPLE_BODY as BODY;

    #[test]
    fn decodes_upstream_body_in_order() {
        let results: ResultSet = serde_json::from_str(BODY).unwrap();

        assert_eq!(results.status, "ok");
        assert_eq!(results.total_results, 237);
        let titles: Vec<_> = results.articles.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(
            titles,
            ["Glaciers retreat faster than expected", "Second story", "Third story"]
        );
    }

    #[test]
    fn source_id_variants() {
        let results: ResultSet = serde_json::from_str(BODY).unwrap();

        assert_eq!(results.articles[0].source.id, SourceId::Text("bbc-news".into()));
        assert!(results.articles[1].source.id.is_absent());
        assert_eq!(results.articles[2].source.id, SourceId::Numeric(42));
    }

    #[test]
    fn missing_source_id_is_absent() {
        let source: ArticleSource = serde_json::from_str(r#"{ "name": "Wire" }"#).unwrap();
        assert!(source.id.is_absent());
        assert_eq!(source.name, "Wire");
    }

    #[test]
    fn nullable_fields_decode_to_none() {
        let results: ResultSet = serde_json::from_str(BODY).unwrap();
        let second = &results.articles[1];

        assert_eq!(second.author, None);
        assert_eq!(second.description, None);
        assert_eq!(second.url_to_image, None);
        assert_eq!(second.content, None);
    }

    #[test]
    fn formats_publish_date() {
        let results: ResultSet = serde_json::from_str(BODY).unwrap();

        assert_eq!(results.articles[0].formatted_published_date(), "March 7, 2024");
        assert_eq!(results.articles[2].formatted_published_date(), "January 1, 2024");
    }

    #[test]
    fn null_or_missing_publish_date() {
        let article: Article =
            serde_json::from_str(r#"{ "title": "a", "url": "u", "publishedAt": null }"#).unwrap();
        assert_eq!(article.published_at, None);
        assert_eq!(article.formatted_published_date(), "");

        let article: Article = serde_json::from_str(r#"{ "title": "b", "url": "u" }"#).unwrap();
        assert_eq!(article.published_at, None);
    }

    #[test]
    fn rejects_unexpected_shape() {
        let err = serde_json::from_str::<ResultSet>(r#"{ "articles": "nope" }"#);
        assert!(err.is_err());
    }
}
