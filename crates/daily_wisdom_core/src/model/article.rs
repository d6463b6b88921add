//! Article domain model.
//!
//! # Responsibility
//! - Define the canonical record shown by the reader, one per weekday slot.
//! - Validate record shape before it enters a catalog.
//!
//! # Invariants
//! - `title`, `author` and `content` are non-blank for every loaded article.
//! - Articles are immutable once loaded; ordering is owned by the catalog.
//!
//! # See also
//! - crate::catalog

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Curated article record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Display title.
    pub title: String,
    /// Author display name, without any "By" prefix.
    pub author: String,
    /// Markdown body.
    pub content: String,
}

impl Article {
    /// Creates an article and validates its shape.
    ///
    /// # Errors
    /// - Returns the first blank field as an [`ArticleValidationError`].
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<Self, ArticleValidationError> {
        let article = Self {
            title: title.into(),
            author: author.into(),
            content: content.into(),
        };
        article.validate()?;
        Ok(article)
    }

    /// Validates record-level invariants.
    pub fn validate(&self) -> Result<(), ArticleValidationError> {
        if self.title.trim().is_empty() {
            return Err(ArticleValidationError::EmptyTitle);
        }
        if self.author.trim().is_empty() {
            return Err(ArticleValidationError::EmptyAuthor);
        }
        if self.content.trim().is_empty() {
            return Err(ArticleValidationError::EmptyContent);
        }
        Ok(())
    }
}

/// Shape errors for a single article record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleValidationError {
    EmptyTitle,
    EmptyAuthor,
    EmptyContent,
}

impl Display for ArticleValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "article title must not be blank"),
            Self::EmptyAuthor => write!(f, "article author must not be blank"),
            Self::EmptyContent => write!(f, "article content must not be blank"),
        }
    }
}

impl Error for ArticleValidationError {}

#[cfg(test)]
mod tests {
    use super::{Article, ArticleValidationError};

    #[test]
    fn new_accepts_complete_record() {
        let article = Article::new("Quantify", "Keith Braithwaite", "Numbers beat adjectives.")
            .expect("complete article should validate");
        assert_eq!(article.title, "Quantify");
    }

    #[test]
    fn validate_reports_first_blank_field() {
        let err = Article::new("  ", "", "").unwrap_err();
        assert_eq!(err, ArticleValidationError::EmptyTitle);

        let err = Article::new("Title", " \n", "body").unwrap_err();
        assert_eq!(err, ArticleValidationError::EmptyAuthor);

        let err = Article::new("Title", "Someone", "\t").unwrap_err();
        assert_eq!(err, ArticleValidationError::EmptyContent);
    }
}
