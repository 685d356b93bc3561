//! News source abstractions: the NewsAPI HTTP client and a fixed in-memory source.

use thiserror::Error;

pub mod newsapi;
pub mod static_source;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("invalid query: {0}")]
    InvalidQuery(String),
    #[error("request failed: {0}")]
    RequestFailed(String),
    #[error("api error {code}: {message}")]
    Api { code: String, message: String },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Endpoint {
    #[default]
    TopHeadlines,
    Everything,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::TopHeadlines => "top-headlines",
            Endpoint::Everything => "everything",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FetchQuery {
    pub endpoint: Endpoint,
    pub query: Option<String>,
    pub country: Option<String>,
    pub category: Option<String>,
    pub sources: Option<String>,
    pub language: Option<String>,
    pub page_size: Option<u32>,
    pub page: Option<u32>,
}

impl FetchQuery {
    /// Checks the parameter combinations NewsAPI accepts for the chosen endpoint.
    pub fn validate(&self) -> Result<(), ProviderError> {
        if let Some(size) = self.page_size {
            if !(1..=100).contains(&size) {
                return Err(ProviderError::InvalidQuery(format!(
                    "page size must be between 1 and 100, got {}",
                    size
                )));
            }
        }
        if self.page == Some(0) {
            return Err(ProviderError::InvalidQuery("page starts at 1".into()));
        }

        match self.endpoint {
            Endpoint::TopHeadlines => {
                if self.query.is_none()
                    && self.country.is_none()
                    && self.category.is_none()
                    && self.sources.is_none()
                {
                    return Err(ProviderError::InvalidQuery(
                        "top-headlines needs one of query, country, category or sources".into(),
                    ));
                }
                if self.sources.is_some() && (self.country.is_some() || self.category.is_some()) {
                    return Err(ProviderError::InvalidQuery(
                        "sources cannot be mixed with country or category".into(),
                    ));
                }
            }
            Endpoint::Everything => {
                if self.query.is_none() && self.sources.is_none() {
                    return Err(ProviderError::InvalidQuery(
                        "everything needs a query or sources".into(),
                    ));
                }
            }
        }
        Ok(())
    }

    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        let text = [
            ("q", &self.query),
            ("country", &self.country),
            ("category", &self.category),
            ("sources", &self.sources),
            ("language", &self.language),
        ];
        for (name, value) in text {
            if let Some(v) = value {
                params.push((name, v.clone()));
            }
        }
        if let Some(size) = self.page_size {
            params.push(("pageSize", size.to_string()));
        }
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        params
    }
}

#[async_trait::async_trait]
pub trait NewsSource: Send + Sync {
    /// Returns the raw response document, unchanged.
    async fn fetch(&self, query: &FetchQuery) -> Result<serde_json::Value, ProviderError>;
}
