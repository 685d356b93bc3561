use crate::{FetchQuery, NewsSource, ProviderError};
use serde_json::Value;

/// Serves the same document for every query.
#[derive(Debug, Clone)]
pub struct StaticSource(pub Value);

#[async_trait::async_trait]
impl NewsSource for StaticSource {
    async fn fetch(&self, query: &FetchQuery) -> Result<Value, ProviderError> {
        query.validate()?;
        Ok(self.0.clone())
    }
}
