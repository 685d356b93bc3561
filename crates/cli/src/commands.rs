use crate::display;
use anyhow::Result;
use clap::{Args, ValueEnum};
use newsgenie_core::config::AppConfig;
use newsgenie_core::loader::InputSource;
use newsgenie_core::pipeline::{self, OutputNames};
use newsgenie_core::processor::{NewsDataProcessor, ProcessOutcome};
use newsgenie_core::NewsError;
use providers::{Endpoint, FetchQuery, NewsSource};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone, Default, Args)]
pub struct OutputArgs {
    /// Directory to save output files
    #[arg(short = 'o', long)]
    pub output_dir: Option<String>,
    /// JSON output filename
    #[arg(short = 'j', long = "json")]
    pub json: Option<String>,
    /// CSV output filename
    #[arg(short = 's', long = "csv")]
    pub csv: Option<String>,
    /// Suppress console display output
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,
    /// Display full article content in console output
    #[arg(short, long, default_value_t = false)]
    pub full_content: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum EndpointArg {
    #[default]
    TopHeadlines,
    Everything,
}

impl From<EndpointArg> for Endpoint {
    fn from(arg: EndpointArg) -> Self {
        match arg {
            EndpointArg::TopHeadlines => Endpoint::TopHeadlines,
            EndpointArg::Everything => Endpoint::Everything,
        }
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct FetchArgs {
    /// NewsAPI endpoint
    #[arg(long, value_enum, default_value_t = EndpointArg::TopHeadlines)]
    pub endpoint: EndpointArg,
    /// Keywords or phrase to search for
    #[arg(long)]
    pub query: Option<String>,
    /// 2-letter country code (top-headlines only)
    #[arg(long)]
    pub country: Option<String>,
    /// Category (top-headlines only), e.g. business
    #[arg(long)]
    pub category: Option<String>,
    /// Comma-separated source identifiers
    #[arg(long)]
    pub sources: Option<String>,
    /// 2-letter language code, e.g. ar
    #[arg(long)]
    pub language: Option<String>,
    /// Results per page (1-100)
    #[arg(long)]
    pub page_size: Option<u32>,
    /// Page number, starting at 1
    #[arg(long)]
    pub page: Option<u32>,
}

/// Output settings after CLI flags are layered over the config file.
#[derive(Debug, Clone, Default)]
pub struct OutputOptions {
    pub dir: Option<PathBuf>,
    pub names: OutputNames,
    pub quiet: bool,
    pub full_content: bool,
}

impl OutputArgs {
    pub fn resolve(&self, cfg: &AppConfig) -> OutputOptions {
        OutputOptions {
            dir: self
                .output_dir
                .clone()
                .or_else(|| cfg.output.dir.clone())
                .map(PathBuf::from),
            names: OutputNames {
                json: self.json.clone().or_else(|| cfg.output.json_name.clone()),
                csv: self.csv.clone().or_else(|| cfg.output.csv_name.clone()),
            },
            quiet: self.quiet || cfg.display.quiet,
            full_content: self.full_content || cfg.display.full_content,
        }
    }
}

impl FetchArgs {
    pub fn to_query(&self, cfg: &AppConfig) -> FetchQuery {
        FetchQuery {
            endpoint: self.endpoint.into(),
            query: self.query.clone(),
            country: self.country.clone(),
            category: self.category.clone(),
            sources: self.sources.clone(),
            language: self.language.clone().or_else(|| cfg.newsapi.language.clone()),
            page_size: self.page_size.or(cfg.newsapi.page_size),
            page: self.page,
        }
    }
}

pub fn run_process(input: Option<&str>, opts: &OutputOptions) -> Result<ProcessOutcome> {
    let processor = NewsDataProcessor::new(opts.dir.as_deref())?;
    let source = InputSource::resolve(input);
    pipeline::process_input(&processor, &source, &opts.names)
}

pub async fn run_fetch(
    source: &dyn NewsSource,
    query: &FetchQuery,
    opts: &OutputOptions,
) -> Result<ProcessOutcome> {
    let processor = NewsDataProcessor::new(opts.dir.as_deref())?;
    pipeline::fetch_and_process(&processor, source, query, &opts.names).await
}

pub fn report(outcome: &ProcessOutcome, opts: &OutputOptions) -> Result<()> {
    if opts.quiet {
        return Ok(());
    }
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    display::render_articles(&mut out, &outcome.articles, opts.full_content)?;
    info!("Data saved to:");
    info!("   JSON: {}", outcome.json_path.display());
    info!("   CSV: {}", outcome.csv_path.display());
    Ok(())
}

/// One-line description of a failed run, matching how the error should be reported.
pub fn failure_message(err: &anyhow::Error) -> String {
    match err.downcast_ref::<NewsError>() {
        Some(NewsError::InvalidJson(_)) => "Invalid JSON input".to_string(),
        Some(NewsError::NotFound(path)) => format!("File not found: {}", path.display()),
        _ => format!("Unexpected error: {:#}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let mut cfg = AppConfig::default();
        cfg.output.dir = Some("from-config".into());
        cfg.output.csv_name = Some("cfg.csv".into());
        cfg.display.full_content = true;

        let args = OutputArgs {
            output_dir: Some("from-flag".into()),
            json: Some("flag.json".into()),
            ..Default::default()
        };
        let opts = args.resolve(&cfg);
        assert_eq!(opts.dir, Some(PathBuf::from("from-flag")));
        assert_eq!(opts.names.json.as_deref(), Some("flag.json"));
        assert_eq!(opts.names.csv.as_deref(), Some("cfg.csv"));
        assert!(opts.full_content);
        assert!(!opts.quiet);
    }

    #[test]
    fn fetch_args_fall_back_to_config() {
        let mut cfg = AppConfig::default();
        cfg.newsapi.language = Some("ar".into());
        cfg.newsapi.page_size = Some(30);

        let args = FetchArgs {
            endpoint: EndpointArg::Everything,
            query: Some("الطاقة".into()),
            page_size: Some(10),
            ..Default::default()
        };
        let q = args.to_query(&cfg);
        assert_eq!(q.endpoint, Endpoint::Everything);
        assert_eq!(q.language.as_deref(), Some("ar"));
        assert_eq!(q.page_size, Some(10));
    }

    #[test]
    fn endpoint_flag_parses_kebab_case_names() {
        use clap::Parser;

        #[derive(Parser)]
        struct Harness {
            #[command(flatten)]
            fetch: FetchArgs,
        }

        let parsed = Harness::try_parse_from(["newsgenie", "--endpoint", "everything"]).unwrap();
        assert_eq!(parsed.fetch.endpoint, EndpointArg::Everything);
        let parsed = Harness::try_parse_from(["newsgenie"]).unwrap();
        assert_eq!(parsed.fetch.endpoint, EndpointArg::TopHeadlines);
        assert!(Harness::try_parse_from(["newsgenie", "--endpoint", "sources"]).is_err());
    }

    #[test]
    fn failure_messages_by_kind() {
        let bad_json = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = anyhow::Error::from(NewsError::InvalidJson(bad_json));
        assert_eq!(failure_message(&err), "Invalid JSON input");

        let err = anyhow::Error::from(NewsError::NotFound(PathBuf::from("feed.json")));
        assert_eq!(failure_message(&err), "File not found: feed.json");

        let err = anyhow::anyhow!("disk full");
        assert_eq!(failure_message(&err), "Unexpected error: disk full");
    }
}
