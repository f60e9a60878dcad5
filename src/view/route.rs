//! Routes: which view a URL path addresses

use percent_encoding::percent_decode_str;
use std::path::PathBuf;

use crate::config::SiteConfig;
use crate::content::PostIndex;
use crate::helpers::{encode_segment, url_for};

/// A view of the site
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// The single-page portfolio
    Home,
    /// One blog post, by slug
    Post(String),
    /// The portfolio with the blog pre-filtered to a tag
    Tag(String),
    NotFound,
}

impl Route {
    /// Parse a request path relative to the site root
    ///
    /// Post slugs are percent-decoded; tag routes carry the tag's URL
    /// segment until [`Route::resolve`] maps it back to the tag.
    pub fn parse(path: &str, config: &SiteConfig) -> Route {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let root = config.root.trim_end_matches('/');
        let Some(rest) = path.strip_prefix(root) else {
            return Route::NotFound;
        };

        let mut segments: Vec<String> = rest
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| percent_decode_str(s).decode_utf8_lossy().into_owned())
            .collect();
        if segments.last().is_some_and(|s| s == "index.html") {
            segments.pop();
        }

        match segments.as_slice() {
            [] => Route::Home,
            [dir, slug] if *dir == config.blog_dir => Route::Post(slug.clone()),
            [dir, tag] if *dir == config.tag_dir => Route::Tag(tag.clone()),
            _ => Route::NotFound,
        }
    }

    /// Check a parsed route against the loaded posts
    ///
    /// A post slug nobody owns, or a tag segment no tag produces, is a miss.
    pub fn resolve(self, index: &PostIndex) -> Route {
        match self {
            Route::Post(slug) if index.lookup_by_slug(&slug).is_some() => Route::Post(slug),
            Route::Tag(segment) => match index.tag_for_segment(&segment) {
                Some(tag) => Route::Tag(tag.to_string()),
                None if index.tag_segment(&segment).is_some() => Route::Tag(segment),
                None => Route::NotFound,
            },
            Route::Post(_) | Route::NotFound => Route::NotFound,
            Route::Home => Route::Home,
        }
    }

    /// Site-relative URL of the view
    ///
    /// A tag no post carries has no page of its own and links to the
    /// not-found view.
    pub fn url(&self, config: &SiteConfig, index: &PostIndex) -> String {
        match self {
            Route::Home => url_for(config, "/"),
            Route::Post(slug) => {
                url_for(config, &format!("{}/{}/", config.blog_dir, encode_segment(slug)))
            }
            Route::Tag(tag) => match index.tag_segment(tag) {
                Some(segment) => url_for(config, &format!("{}/{}/", config.tag_dir, segment)),
                None => Route::NotFound.url(config, index),
            },
            Route::NotFound => url_for(config, "404.html"),
        }
    }

    /// Output file of the view, relative to the public directory
    pub fn output_path(&self, config: &SiteConfig, index: &PostIndex) -> PathBuf {
        match self {
            Route::Home => PathBuf::from("index.html"),
            Route::Post(slug) => PathBuf::from(&config.blog_dir).join(slug).join("index.html"),
            Route::Tag(tag) => match index.tag_segment(tag) {
                Some(segment) => PathBuf::from(&config.tag_dir)
                    .join(segment)
                    .join("index.html"),
                None => Route::NotFound.output_path(config, index),
            },
            Route::NotFound => PathBuf::from("404.html"),
        }
    }
}
