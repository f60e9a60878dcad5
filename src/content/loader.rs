//! Content loader - loads posts and profile data from the source directory

use anyhow::Result;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::markdown;
use super::{ContentError, FrontMatter, Post, PostIndex, Profile};
use crate::helpers::truncate;
use crate::Folio;

const PROFILE_FILE: &str = "profile.yml";

/// Loads content from the source directory
pub struct ContentLoader<'a> {
    folio: &'a Folio,
}

impl<'a> ContentLoader<'a> {
    pub fn new(folio: &'a Folio) -> Self {
        Self { folio }
    }

    /// Load all posts from source/_posts into an index
    pub fn load_index(&self) -> Result<PostIndex> {
        let posts = self.load_posts()?;
        Ok(PostIndex::new(posts)?)
    }

    /// Load all posts from source/_posts, ordered by id
    pub fn load_posts(&self) -> Result<Vec<Post>> {
        let posts_dir = self.folio.posts_dir();
        if !posts_dir.exists() {
            tracing::debug!("No posts directory at {:?}", posts_dir);
            return Ok(Vec::new());
        }

        let mut files: Vec<_> = WalkDir::new(&posts_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .map(|e| e.into_path())
            .filter(|p| p.is_file() && is_markdown_file(p))
            .collect();
        files.sort();

        let mut loaded = Vec::with_capacity(files.len());
        for path in &files {
            let content = fs::read_to_string(path).map_err(|source| ContentError::Io {
                path: path.clone(),
                source,
            })?;
            let (fm, body) = FrontMatter::parse(&content).map_err(|source| {
                ContentError::FrontMatter {
                    path: path.clone(),
                    source,
                }
            })?;
            loaded.push((fm.id, self.build_post(path, fm, body)));
        }

        let posts = assign_ids(loaded);
        tracing::debug!("Loaded {} posts from {:?}", posts.len(), posts_dir);
        Ok(posts)
    }

    /// Build a post from parsed front-matter, filling the defaults
    fn build_post(&self, path: &Path, fm: FrontMatter, body: &str) -> Post {
        let config = &self.folio.config;

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("untitled")
            .to_string();

        let source = path
            .strip_prefix(&self.folio.source_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string();

        let blocks = markdown::render(body);

        let excerpt = fm.excerpt.unwrap_or_else(|| {
            markdown::first_paragraph(&blocks)
                .map(|text| truncate(&text, config.excerpt_length, None))
                .unwrap_or_default()
        });

        let read_time = fm
            .read_time
            .unwrap_or_else(|| read_time(markdown::word_count(&blocks), config.words_per_minute));

        let mut post = Post::new(0, fm.slug.unwrap_or_else(|| stem.clone()), fm.title.unwrap_or(stem));
        post.date = fm.date.unwrap_or_default();
        post.excerpt = excerpt;
        post.author = fm.author.unwrap_or_else(|| config.author.clone());
        post.read_time = read_time;
        post.tags = fm.tags;
        post.content = body.to_string();
        post.image = fm.image.filter(|i| !i.trim().is_empty());
        post.source = source;
        post
    }

    /// Load the portfolio profile, falling back to one built from the config
    pub fn load_profile(&self) -> Result<Profile> {
        let path = self.folio.data_dir().join(PROFILE_FILE);
        if !path.exists() {
            tracing::info!("No profile data at {:?}, using site config", path);
            return Ok(Profile::from_config(&self.folio.config));
        }

        let content = fs::read_to_string(&path).map_err(|source| ContentError::Io {
            path: path.clone(),
            source,
        })?;
        let mut profile: Profile = serde_yaml::from_str(&content)
            .map_err(|source| ContentError::Profile { path, source })?;

        if profile.name.trim().is_empty() {
            profile.name = self.folio.config.author.clone();
        }
        profile.normalize();
        Ok(profile)
    }
}

/// Give id-less posts ids after the largest explicit one, then sort by id
fn assign_ids(loaded: Vec<(Option<u32>, Post)>) -> Vec<Post> {
    let mut next_id = loaded
        .iter()
        .filter_map(|(id, _)| *id)
        .max()
        .map_or(1, |max| max.saturating_add(1));

    let mut seen = HashSet::new();
    let mut posts: Vec<Post> = loaded
        .into_iter()
        .map(|(id, mut post)| {
            post.id = id.unwrap_or_else(|| {
                let id = next_id;
                next_id = next_id.saturating_add(1);
                tracing::debug!("Assigned id {} to {}", id, post.source);
                id
            });
            if !seen.insert(post.id) {
                tracing::warn!("Duplicate post id {} in {}", post.id, post.source);
            }
            post
        })
        .collect();

    // Stable: duplicate ids keep file-name order
    posts.sort_by_key(|p| p.id);
    posts
}

/// Estimated reading time, never below one minute
fn read_time(words: usize, words_per_minute: usize) -> String {
    let minutes = words.div_ceil(words_per_minute.max(1)).max(1);
    format!("{} min read", minutes)
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}
