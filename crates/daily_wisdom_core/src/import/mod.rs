//! Offline content preparation from saved article pages.
//!
//! # Responsibility
//! - Convert a directory of saved HTML pages into a validated catalog.
//! - Preserve the caller-supplied page order as the unlock order.
//! - Default to the curated order in content/pages.txt when no order is given.
//!
//! # Invariants
//! - A page that yields an incomplete article aborts the import.
//! - Pages are only read from disk; fetching is a separate concern.

pub mod html;

use crate::catalog::{ArticleCatalog, CatalogError};
use crate::model::article::{Article, ArticleValidationError};
use html::parse_article_html;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const CURATED_PAGE_ORDER: &str = include_str!("../../content/pages.txt");

pub type ImportResult<T> = Result<T, ImportError>;

/// Import failures.
#[derive(Debug)]
pub enum ImportError {
    Io { path: PathBuf, source: std::io::Error },
    Incomplete {
        path: PathBuf,
        source: ArticleValidationError,
    },
    NoPages(PathBuf),
    Catalog(CatalogError),
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "failed to read `{}`: {source}", path.display()),
            Self::Incomplete { path, source } => {
                write!(f, "page `{}` is incomplete: {source}", path.display())
            }
            Self::NoPages(dir) => write!(f, "no .htm/.html pages found in `{}`", dir.display()),
            Self::Catalog(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Incomplete { source, .. } => Some(source),
            Self::NoPages(_) => None,
            Self::Catalog(err) => Some(err),
        }
    }
}

impl From<CatalogError> for ImportError {
    fn from(value: CatalogError) -> Self {
        Self::Catalog(value)
    }
}

/// Reads and converts one saved page.
pub fn import_page(path: impl AsRef<Path>) -> ImportResult<Article> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let imported = parse_article_html(&raw);
    let article = Article {
        title: imported.title,
        author: imported.author,
        content: imported.content,
    };
    article.validate().map_err(|source| {
        warn!(
            "event=import_page module=import status=error file={} error={}",
            path.display(),
            source
        );
        ImportError::Incomplete {
            path: path.to_path_buf(),
            source,
        }
    })?;
    Ok(article)
}

/// Imports `file_names` from `dir`, in the given order.
pub fn import_directory<S: AsRef<str>>(
    dir: impl AsRef<Path>,
    file_names: &[S],
) -> ImportResult<ArticleCatalog> {
    let dir = dir.as_ref();
    if file_names.is_empty() {
        return Err(ImportError::NoPages(dir.to_path_buf()));
    }
    let articles = file_names
        .iter()
        .map(|name| import_page(dir.join(name.as_ref())))
        .collect::<ImportResult<Vec<_>>>()?;
    let catalog = ArticleCatalog::from_articles(articles)?;
    info!(
        "event=import_directory module=import status=ok dir={} count={}",
        dir.display(),
        catalog.len()
    );
    Ok(catalog)
}

/// Lists `.htm`/`.html` file names in `dir`, sorted by name.
pub fn list_html_pages(dir: impl AsRef<Path>) -> ImportResult<Vec<String>> {
    let dir = dir.as_ref();
    let io_err = |source| ImportError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let path = entry.path();
        let is_page = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("htm") || ext.eq_ignore_ascii_case("html"));
        if !is_page || !path.is_file() {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
            names.push(name.to_string());
        }
    }
    names.sort();
    Ok(names)
}

/// Page names of the curated collection, in unlock order.
pub fn curated_page_order() -> Vec<String> {
    parse_manifest(CURATED_PAGE_ORDER)
}

/// Orders the pages found in `dir` by the curated unlock order.
///
/// Pages outside the curated list follow, sorted by name.
pub fn default_page_order(dir: impl AsRef<Path>) -> ImportResult<Vec<String>> {
    let dir = dir.as_ref();
    let mut remaining = list_html_pages(dir)?;
    let mut ordered = Vec::with_capacity(remaining.len());
    let mut missing = 0usize;
    for name in curated_page_order() {
        match remaining.iter().position(|found| *found == name) {
            Some(pos) => ordered.push(remaining.remove(pos)),
            None => missing += 1,
        }
    }
    if missing > 0 {
        warn!(
            "event=import_order module=import status=partial dir={} missing={} unlisted={}",
            dir.display(),
            missing,
            remaining.len()
        );
    }
    ordered.extend(remaining);
    Ok(ordered)
}

/// Reads a page manifest: one file name per line, `#` comments and blanks skipped.
pub fn read_manifest(path: impl AsRef<Path>) -> ImportResult<Vec<String>> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_manifest(&raw))
}

fn parse_manifest(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
