//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub keywords: Option<Vec<String>>,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub source_dir: String,
    pub public_dir: String,
    pub blog_dir: String,
    pub tag_dir: String,
    pub data_dir: String,

    // Writing
    pub excerpt_length: usize,
    pub words_per_minute: usize,

    // Date format (Moment.js style)
    pub date_format: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Portfolio".to_string(),
            subtitle: String::new(),
            description: String::new(),
            keywords: None,
            author: "John Doe".to_string(),
            language: "en".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            source_dir: "source".to_string(),
            public_dir: "public".to_string(),
            blog_dir: "blog".to_string(),
            tag_dir: "tags".to_string(),
            data_dir: "_data".to_string(),

            excerpt_length: 160,
            words_per_minute: 200,

            date_format: "MMMM D, YYYY".to_string(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {:?}", path))?;
        Ok(config)
    }

    /// Keywords joined for the meta tag
    pub fn keyword_line(&self) -> String {
        self.keywords
            .as_ref()
            .map(|k| k.join(", "))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.blog_dir, "blog");
        assert_eq!(config.tag_dir, "tags");
        assert_eq!(config.date_format, "MMMM D, YYYY");
        assert_eq!(config.words_per_minute, 200);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Shivam Kumar
author: Shivam Kumar
root: /portfolio/
blog_dir: writing
keywords:
  - sre
  - devops
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Shivam Kumar");
        assert_eq!(config.root, "/portfolio/");
        assert_eq!(config.blog_dir, "writing");
        assert_eq!(config.tag_dir, "tags");
        assert_eq!(config.keyword_line(), "sre, devops");
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let yaml = "title: Site\ngoogle_analytics: UA-1\n";
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Site");
    }
}
