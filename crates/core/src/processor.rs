//! Turns a raw news document into articles and writes the JSON and CSV exports.

use crate::error::NewsError;
use crate::models::{Article, NewsResponse};
use chrono::{DateTime, Local};
use csv::WriterBuilder;
use serde::Serialize;
use serde_json::Value;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

#[derive(Debug, Clone)]
pub struct NewsDataProcessor {
    output_dir: PathBuf,
    timestamp: String,
}

#[derive(Debug, Clone)]
pub struct ProcessOutcome {
    pub json_path: PathBuf,
    pub csv_path: PathBuf,
    pub articles: Vec<Article>,
}

#[derive(Serialize)]
struct CsvArticleRow<'a> {
    title: &'a str,
    source: &'a str,
    source_id: &'a str,
    author: &'a str,
    description: &'a str,
    url: &'a str,
    url_to_image: &'a str,
    #[serde(rename = "publishedAt")]
    published_at: &'a str,
    content: &'a str,
}

impl<'a> From<&'a Article> for CsvArticleRow<'a> {
    fn from(a: &'a Article) -> Self {
        Self {
            title: &a.title,
            source: &a.source,
            source_id: a.source_id.as_deref().unwrap_or(""),
            author: a.author.as_deref().unwrap_or(""),
            description: a.description.as_deref().unwrap_or(""),
            url: &a.url,
            url_to_image: a.url_to_image.as_deref().unwrap_or(""),
            published_at: &a.published_at,
            content: a.content.as_deref().unwrap_or(""),
        }
    }
}

impl NewsDataProcessor {
    /// Uses the current directory when `output_dir` is `None`.
    pub fn new(output_dir: Option<&Path>) -> Result<Self, NewsError> {
        let dir = match output_dir {
            Some(d) => d.to_path_buf(),
            None => std::env::current_dir().map_err(|e| NewsError::io(".", e))?,
        };
        Self::with_timestamp(dir, Local::now())
    }

    pub fn with_timestamp(
        output_dir: impl Into<PathBuf>,
        now: DateTime<Local>,
    ) -> Result<Self, NewsError> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir).map_err(|e| NewsError::io(&output_dir, e))?;
        Ok(Self {
            output_dir,
            timestamp: now.format(TIMESTAMP_FORMAT).to_string(),
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn output_path(&self, base_name: Option<&str>, extension: &str) -> PathBuf {
        let filename = match base_name {
            Some(name) => {
                let mut p = PathBuf::from(name);
                if p.extension().is_none() {
                    p.set_extension(extension);
                }
                p
            }
            None => PathBuf::from(format!("news_data_{}.{}", self.timestamp, extension)),
        };
        self.output_dir.join(filename)
    }

    pub fn save_json(&self, data: &Value, filename: Option<&str>) -> Result<PathBuf, NewsError> {
        let path = self.output_path(filename, "json");
        info!("Saving JSON data to {}", path.display());

        let file = File::create(&path).map_err(|e| NewsError::io(&path, e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, data)
            .map_err(|e| NewsError::io(&path, e.into()))?;
        writer.flush().map_err(|e| NewsError::io(&path, e))?;
        Ok(path)
    }

    /// Writes nothing when `articles` is empty; the would-be path is still returned.
    pub fn save_csv(
        &self,
        articles: &[Article],
        filename: Option<&str>,
    ) -> Result<PathBuf, NewsError> {
        let path = self.output_path(filename, "csv");
        info!("Saving CSV data to {}", path.display());

        if articles.is_empty() {
            warn!("No articles to save");
            return Ok(path);
        }

        let file = File::create(&path).map_err(|e| NewsError::io(&path, e))?;
        let mut writer = WriterBuilder::new().from_writer(BufWriter::new(file));
        for article in articles {
            writer.serialize(CsvArticleRow::from(article))?;
        }
        writer.flush().map_err(|e| NewsError::io(&path, e))?;
        Ok(path)
    }

    pub fn process_data(&self, data: &Value) -> Result<Vec<Article>, NewsError> {
        let response = NewsResponse::from_value(data)?;
        info!(
            "API Status: {}, Total Results: {}",
            response.status.as_deref().unwrap_or("None"),
            response.total_results
        );

        let articles: Vec<Article> = response.articles.into_iter().map(Article::from).collect();
        info!("Processed {} articles", articles.len());
        Ok(articles)
    }

    pub fn process_and_save(
        &self,
        data: &Value,
        json_filename: Option<&str>,
        csv_filename: Option<&str>,
    ) -> Result<ProcessOutcome, NewsError> {
        let articles = self.process_data(data)?;
        let json_path = self.save_json(data, json_filename)?;
        let csv_path = self.save_csv(&articles, csv_filename)?;
        Ok(ProcessOutcome {
            json_path,
            csv_path,
            articles,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn processor(dir: &Path) -> NewsDataProcessor {
        let now = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        NewsDataProcessor::with_timestamp(dir, now).unwrap()
    }

    #[test]
    fn output_path_rules() {
        let dir = tempfile::tempdir().unwrap();
        let p = processor(dir.path());
        assert_eq!(
            p.output_path(None, "json"),
            dir.path().join("news_data_20240309_070501.json")
        );
        assert_eq!(p.output_path(Some("daily"), "csv"), dir.path().join("daily.csv"));
        assert_eq!(
            p.output_path(Some("daily.txt"), "csv"),
            dir.path().join("daily.txt")
        );

        let elsewhere = tempfile::tempdir().unwrap();
        let absolute = elsewhere.path().join("x");
        assert_eq!(
            p.output_path(Some(absolute.to_string_lossy().as_ref()), "csv"),
            elsewhere.path().join("x.csv")
        );
    }

    #[test]
    fn creates_nested_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let p = processor(&nested);
        assert!(nested.is_dir());
        assert_eq!(p.output_dir(), nested.as_path());
    }
}
