use crate::error::NewsError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Marker NewsAPI appends to clipped content, e.g. `"... [+1234 chars]"`.
pub const TRUNCATION_MARKER: &str = "[+";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewsResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, rename = "totalResults", deserialize_with = "null_as_default")]
    pub total_results: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub articles: Vec<RawArticle>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSource {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawArticle {
    #[serde(default)]
    pub source: Option<RawSource>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, rename = "urlToImage")]
    pub url_to_image: Option<String>,
    #[serde(default, rename = "publishedAt")]
    pub published_at: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Article {
    pub title: String,
    pub source: String,
    pub source_id: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub url: String,
    pub url_to_image: Option<String>,
    pub published_at: String,
    pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentPreview<'a> {
    pub text: &'a str,
    pub truncated: bool,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl NewsResponse {
    pub fn from_value(value: &Value) -> Result<Self, NewsError> {
        if !value.is_object() {
            return Err(NewsError::Shape("top-level document must be an object".into()));
        }
        Self::deserialize(value).map_err(|e| NewsError::Shape(e.to_string()))
    }
}

impl From<RawArticle> for Article {
    fn from(raw: RawArticle) -> Self {
        let source = raw.source.unwrap_or_default();
        Self {
            title: raw.title.unwrap_or_default(),
            source: source.name.unwrap_or_default(),
            source_id: source.id,
            author: raw.author,
            description: raw.description,
            url: raw.url.unwrap_or_default(),
            url_to_image: raw.url_to_image,
            published_at: raw.published_at.unwrap_or_default(),
            content: raw.content,
        }
    }
}

impl Article {
    pub fn content_preview(&self) -> Option<ContentPreview<'_>> {
        let content = self.content.as_deref().filter(|c| !c.is_empty())?;
        Some(match content.split_once(TRUNCATION_MARKER) {
            Some((head, _)) => ContentPreview {
                text: head,
                truncated: true,
            },
            None => ContentPreview {
                text: content,
                truncated: false,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nulls_and_missing_fields_normalise() {
        let raw: RawArticle = serde_json::from_value(json!({
            "source": null,
            "title": null,
            "author": "مراسل",
        }))
        .unwrap();
        let article = Article::from(raw);
        assert_eq!(article.title, "");
        assert_eq!(article.source, "");
        assert_eq!(article.source_id, None);
        assert_eq!(article.author.as_deref(), Some("مراسل"));
        assert_eq!(article.published_at, "");
    }

    #[test]
    fn preview_cuts_at_marker() {
        let mut article = Article::from(RawArticle::default());
        article.content = Some("الخبر الكامل... [+2048 chars]".into());
        let preview = article.content_preview().unwrap();
        assert_eq!(preview.text, "الخبر الكامل... ");
        assert!(preview.truncated);

        article.content = Some("short".into());
        assert_eq!(
            article.content_preview(),
            Some(ContentPreview {
                text: "short",
                truncated: false
            })
        );

        article.content = Some(String::new());
        assert_eq!(article.content_preview(), None);
    }

    #[test]
    fn non_object_document_is_rejected() {
        assert!(matches!(
            NewsResponse::from_value(&json!([1, 2])),
            Err(NewsError::Shape(_))
        ));
        assert!(matches!(
            NewsResponse::from_value(&json!({"articles": "nope"})),
            Err(NewsError::Shape(_))
        ));
    }

    #[test]
    fn null_articles_means_empty() {
        let resp = NewsResponse::from_value(&json!({"status": "ok", "articles": null})).unwrap();
        assert!(resp.articles.is_empty());
        assert_eq!(resp.total_results, 0);
    }
}
