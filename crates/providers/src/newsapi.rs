use crate::{FetchQuery, NewsSource, ProviderError};
use bytes::Bytes;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://newsapi.org";
const USER_AGENT: &str = concat!("newsgenie/", env!("CARGO_PKG_VERSION"));

#[derive(Clone)]
pub struct NewsApiConfig {
    pub api_key: String,
    pub base_url: String,
}

#[derive(Clone)]
pub struct NewsApiClient {
    client: Client,
    cfg: Arc<NewsApiConfig>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl NewsApiClient {
    /// NewsAPI rejects requests without a User-Agent, so the client always sets one.
    pub fn new(cfg: NewsApiConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;
        Ok(Self {
            client,
            cfg: Arc::new(cfg),
        })
    }

    pub fn endpoint_url(&self, query: &FetchQuery) -> String {
        format!(
            "{}/v2/{}",
            self.cfg.base_url.trim_end_matches('/'),
            query.endpoint.path()
        )
    }
}

fn api_error(body: &[u8], fallback_code: String) -> ProviderError {
    match serde_json::from_slice::<ApiErrorBody>(body) {
        Ok(parsed) => ProviderError::Api {
            code: parsed.code.unwrap_or(fallback_code),
            message: parsed.message.unwrap_or_default(),
        },
        Err(_) => ProviderError::Api {
            code: fallback_code,
            message: String::from_utf8_lossy(body).into_owned(),
        },
    }
}

#[async_trait::async_trait]
impl NewsSource for NewsApiClient {
    async fn fetch(&self, query: &FetchQuery) -> Result<Value, ProviderError> {
        let url = self.endpoint_url(query);
        debug!("GET {}", url);

        let resp = self
            .client
            .get(url)
            .header("X-Api-Key", &self.cfg.api_key)
            .query(&query.to_params())
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.bytes().await.unwrap_or(Bytes::from_static(b""));
            return Err(api_error(&body, status.as_u16().to_string()));
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;
        let doc: Value = serde_json::from_slice(&body)
            .map_err(|e| ProviderError::RequestFailed(format!("invalid response body: {}", e)))?;

        if doc.get("status").and_then(|s| s.as_str()) == Some("error") {
            return Err(api_error(&body, "error".into()));
        }
        Ok(doc)
    }
}
