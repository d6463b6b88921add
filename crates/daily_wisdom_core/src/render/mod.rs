//! Presentation helpers over article markdown.

pub mod markdown;
