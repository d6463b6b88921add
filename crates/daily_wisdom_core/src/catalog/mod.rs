//! Article catalog loading and validation.
//!
//! # Responsibility
//! - Load the ordered article table once, from embedded JSON or a file.
//! - Reject malformed content at load time, never during navigation.
//!
//! # Invariants
//! - A loaded catalog is non-empty and every entry passes `Article::validate()`.
//! - Order is preserved exactly as written in the source document.
//!
//! # See also
//! - content/articles.json

use crate::model::article::{Article, ArticleValidationError};
use log::{error, info};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const BUILTIN_CATALOG_JSON: &str = include_str!("../../content/articles.json");

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog load failures.
#[derive(Debug)]
pub enum CatalogError {
    Io { path: PathBuf, source: std::io::Error },
    Json(serde_json::Error),
    /// Entry `index` does not have the article shape.
    MalformedEntry {
        index: usize,
        source: serde_json::Error,
    },
    Empty,
    InvalidEntry {
        index: usize,
        source: ArticleValidationError,
    },
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read catalog `{}`: {source}", path.display())
            }
            Self::Json(err) => write!(f, "malformed catalog document: {err}"),
            Self::MalformedEntry { index, source } => {
                write!(f, "malformed article at index {index}: {source}")
            }
            Self::Empty => write!(f, "catalog contains no articles"),
            Self::InvalidEntry { index, source } => {
                write!(f, "invalid article at index {index}: {source}")
            }
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json(err) => Some(err),
            Self::MalformedEntry { source, .. } => Some(source),
            Self::Empty => None,
            Self::InvalidEntry { source, .. } => Some(source),
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// `{"inspiration": [...]}`; a bare array is accepted too.
#[derive(Deserialize)]
struct CatalogDocument {
    inspiration: Vec<Value>,
}

#[derive(Serialize)]
struct CatalogDocumentRef<'a> {
    inspiration: &'a [Article],
}

/// Immutable ordered article table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleCatalog {
    articles: Vec<Article>,
}

impl ArticleCatalog {
    /// Builds a catalog from already-parsed records.
    pub fn from_articles(articles: Vec<Article>) -> CatalogResult<Self> {
        if articles.is_empty() {
            return Err(CatalogError::Empty);
        }
        for (index, article) in articles.iter().enumerate() {
            article
                .validate()
                .map_err(|source| CatalogError::InvalidEntry { index, source })?;
        }
        Ok(Self { articles })
    }

    /// Parses and validates a catalog document.
    ///
    /// Shape errors name the offending entry index.
    pub fn from_json_str(raw: &str) -> CatalogResult<Self> {
        let entries = match serde_json::from_str::<Value>(raw)? {
            Value::Array(entries) => entries,
            document => serde_json::from_value::<CatalogDocument>(document)?.inspiration,
        };
        let articles = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                serde_json::from_value::<Article>(entry)
                    .map_err(|source| CatalogError::MalformedEntry { index, source })
            })
            .collect::<CatalogResult<Vec<_>>>()?;
        Self::from_articles(articles)
    }

    /// Reads a catalog document from disk.
    pub fn from_path(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        match Self::from_json_str(&raw) {
            Ok(catalog) => {
                info!(
                    "event=catalog_load module=catalog status=ok source=file count={}",
                    catalog.len()
                );
                Ok(catalog)
            }
            Err(err) => {
                error!(
                    "event=catalog_load module=catalog status=error source=file error={}",
                    err
                );
                Err(err)
            }
        }
    }

    /// Catalog compiled into the binary.
    pub fn builtin() -> CatalogResult<Self> {
        let catalog = Self::from_json_str(BUILTIN_CATALOG_JSON)?;
        info!(
            "event=catalog_load module=catalog status=ok source=builtin count={}",
            catalog.len()
        );
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Article> {
        self.articles.get(index)
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    /// Serializes to the `{"inspiration": [...]}` document shape.
    pub fn to_json_string(&self) -> CatalogResult<String> {
        serde_json::to_string_pretty(&CatalogDocumentRef {
            inspiration: &self.articles,
        })
        .map_err(Into::into)
    }
}
