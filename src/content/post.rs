//! Post model

use serde::{Deserialize, Serialize};

use super::markdown::{self, Block};

/// A blog post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Unique identifier, also the list order
    pub id: u32,

    /// Unique URL-safe key
    pub slug: String,

    pub title: String,

    /// Calendar date as written by the author
    pub date: String,

    pub excerpt: String,

    pub author: String,

    /// Display string such as "5 min read"
    pub read_time: String,

    /// Tags in display order
    pub tags: Vec<String>,

    /// Markdown-subset body
    pub content: String,

    /// Optional preview image URL
    pub image: Option<String>,

    /// Source file path (relative to the source dir)
    pub source: String,
}

impl Post {
    /// Create a post with the fields every post needs
    pub fn new(id: u32, slug: impl Into<String>, title: impl Into<String>) -> Self {
        let slug = slug.into();
        Self {
            id,
            source: format!("_posts/{}.md", slug),
            slug,
            title: title.into(),
            date: String::new(),
            excerpt: String::new(),
            author: String::new(),
            read_time: String::new(),
            tags: Vec::new(),
            content: String::new(),
            image: None,
        }
    }

    /// Builder-style tag assignment
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Builder-style body assignment
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Exact, case-sensitive tag match
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Render the body into block nodes
    pub fn blocks(&self) -> Vec<Block> {
        markdown::render(&self.content)
    }
}
