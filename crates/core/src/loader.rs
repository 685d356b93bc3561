//! Reads the raw news document from a file, an inline string, or stdin.

use crate::error::NewsError;
use serde_json::Value;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{error, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    File(PathBuf),
    Inline(String),
    Stdin,
}

impl InputSource {
    /// An argument that names an existing path is a file; anything else is raw JSON.
    pub fn resolve(arg: Option<&str>) -> Self {
        match arg {
            None => InputSource::Stdin,
            Some(a) if Path::new(a).exists() => InputSource::File(PathBuf::from(a)),
            Some(a) => InputSource::Inline(a.to_string()),
        }
    }

    pub fn load(&self) -> Result<Value, NewsError> {
        match self {
            InputSource::File(path) => {
                info!("Loading JSON from file: {}", path.display());
                load_json_file(path)
            }
            InputSource::Inline(text) => {
                info!("Parsing JSON from input string");
                load_json(text)
            }
            InputSource::Stdin => {
                info!("Reading JSON from stdin");
                load_reader(std::io::stdin().lock())
            }
        }
    }
}

pub fn load_json(data: &str) -> Result<Value, NewsError> {
    serde_json::from_str(data).map_err(|e| {
        error!("Failed to parse JSON: {}", e);
        NewsError::InvalidJson(e)
    })
}

pub fn load_json_file(path: &Path) -> Result<Value, NewsError> {
    let text = fs::read_to_string(path).map_err(|e| {
        error!("Failed to load JSON file {}: {}", path.display(), e);
        NewsError::io(path, e)
    })?;
    load_json(&text)
}

pub fn load_reader<R: Read>(mut reader: R) -> Result<Value, NewsError> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|e| NewsError::io("<stdin>", e))?;
    load_json(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_prefers_existing_paths() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("feed.json");
        fs::write(&file, "{}").unwrap();

        let arg = file.to_string_lossy().into_owned();
        assert_eq!(InputSource::resolve(Some(arg.as_str())), InputSource::File(file));
        assert_eq!(
            InputSource::resolve(Some(r#"{"status":"ok"}"#)),
            InputSource::Inline(r#"{"status":"ok"}"#.into())
        );
        assert_eq!(InputSource::resolve(None), InputSource::Stdin);
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.json");
        assert!(matches!(
            load_json_file(&missing),
            Err(NewsError::NotFound(p)) if p == missing
        ));
    }

    #[test]
    fn reader_input_is_parsed() {
        let value = load_reader(&b"{\"totalResults\": 3}"[..]).unwrap();
        assert_eq!(value["totalResults"], 3);
        assert!(matches!(
            load_reader(&b"{not json"[..]),
            Err(NewsError::InvalidJson(_))
        ));
    }
}
