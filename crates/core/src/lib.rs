//! Core library: loading news documents, normalising articles, JSON/CSV export.

pub mod config;
pub mod error;
pub mod loader;
pub mod models;
pub mod pipeline;
pub mod processor;

pub use error::NewsError;
