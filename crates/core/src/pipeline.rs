use crate::config::AppConfig;
use crate::loader::InputSource;
use crate::processor::{NewsDataProcessor, ProcessOutcome};
use anyhow::Context;
use providers::newsapi::{NewsApiClient, NewsApiConfig};
use providers::{FetchQuery, NewsSource};
use tracing::info;

/// Optional base names for the two export files.
#[derive(Debug, Clone, Default)]
pub struct OutputNames {
    pub json: Option<String>,
    pub csv: Option<String>,
}

pub fn build_source(config: &AppConfig) -> anyhow::Result<Box<dyn NewsSource>> {
    let key_var = &config.newsapi.api_key_env;
    let api_key = std::env::var(key_var)
        .with_context(|| format!("NewsAPI key not set; export {}", key_var))?;
    let client = NewsApiClient::new(NewsApiConfig {
        api_key,
        base_url: config.newsapi.base_url.clone(),
    })?;
    Ok(Box::new(client))
}

pub fn process_input(
    processor: &NewsDataProcessor,
    input: &InputSource,
    names: &OutputNames,
) -> anyhow::Result<ProcessOutcome> {
    let data = input.load()?;
    let outcome = processor.process_and_save(&data, names.json.as_deref(), names.csv.as_deref())?;
    Ok(outcome)
}

pub async fn fetch_and_process(
    processor: &NewsDataProcessor,
    source: &dyn NewsSource,
    query: &FetchQuery,
    names: &OutputNames,
) -> anyhow::Result<ProcessOutcome> {
    query.validate()?;
    info!("Fetching {} from news source", query.endpoint.path());
    let data = source.fetch(query).await.context("fetch news")?;
    let outcome = processor.process_and_save(&data, names.json.as_deref(), names.csv.as_deref())?;
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_source_requires_api_key() {
        let mut cfg = AppConfig::default();
        cfg.newsapi.api_key_env = "NEWSGENIE_UNSET_KEY_FOR_BUILD_SOURCE".into();

        let err = match build_source(&cfg) {
            Ok(_) => panic!("expected missing key error"),
            Err(e) => e,
        };
        let msg = format!("{:#}", err);
        assert!(msg.contains("NewsAPI key not set"), "{msg}");
        assert!(msg.contains("NEWSGENIE_UNSET_KEY_FOR_BUILD_SOURCE"));
    }
}
