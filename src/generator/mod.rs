//! Generator module - renders every view of the site with the built-in Tera templates

use anyhow::{Context as _, Result};
use std::fs;

use tera::Context;
use walkdir::WalkDir;

use crate::content::{Post, PostIndex, Profile};
use crate::helpers::{html_escape, squash_whitespace, url_for};
use crate::templates::{
    nav_items, ui_icons, ConfigData, NavPost, PostData, SidebarEntry, StateData, TagLink,
    TemplateRenderer, STYLESHEET,
};
use crate::view::{Route, ViewState};
use crate::Folio;

/// Static site generator using Tera templates
pub struct Generator {
    folio: Folio,
    renderer: TemplateRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(folio: &Folio) -> Result<Self> {
        let renderer = TemplateRenderer::new()?;

        Ok(Self {
            folio: folio.clone(),
            renderer,
        })
    }

    /// Generate the entire site
    pub fn generate(&self, index: &PostIndex, profile: &Profile) -> Result<()> {
        // Ensure public directory exists
        fs::create_dir_all(&self.folio.public_dir)
            .with_context(|| format!("Failed to create {:?}", self.folio.public_dir))?;

        // Copy source assets (images, resume, etc.)
        self.copy_source_assets()?;

        self.write_file("css/folio.css", STYLESHEET)?;

        let base = self.create_base_context(profile);

        self.generate_home_page(index, profile, &base)?;
        self.generate_post_pages(index, profile, &base)?;
        self.generate_tag_pages(index, profile, &base)?;
        self.generate_not_found_page(index, profile, &base)?;

        Ok(())
    }

    /// Create a base context with the variables every page uses
    fn create_base_context(&self, profile: &Profile) -> Context {
        let mut context = Context::new();
        context.insert("config", &ConfigData::from_config(&self.folio.config));
        context.insert("profile", profile);
        context.insert("contact_links", &profile.contact_links());
        context.insert("ui", &ui_icons());
        context.insert("version", env!("CARGO_PKG_VERSION"));
        context.insert(
            "current_year",
            &chrono::Local::now().format("%Y").to_string(),
        );
        context.insert("blog_url", &self.blog_url());
        context
    }

    /// Add the view state and the navigation bar derived from it
    fn insert_state(&self, context: &mut Context, state: &ViewState) {
        context.insert("state", &StateData::from(state));
        context.insert("nav", &nav_items(&self.folio.config, state));
    }

    /// The home page anchor of the blog section
    fn blog_url(&self) -> String {
        format!("{}#blog", url_for(&self.folio.config, "/"))
    }

    /// Context of the single-page view for a given state
    fn home_context(&self, index: &PostIndex, base: &Context, state: &ViewState) -> Context {
        let config = &self.folio.config;
        let selected = state.selected_tag.as_deref();

        let posts: Vec<PostData> = index
            .filtered_posts(selected)
            .into_iter()
            .map(|p| PostData::from_post(p, config, index, selected))
            .collect();

        let counts = index.tag_counts();
        let tags: Vec<TagLink> = index
            .all_tags()
            .iter()
            .map(|t| {
                let count = counts.get(t.as_str()).copied().unwrap_or(0);
                TagLink::new(t, config, index, count, selected == Some(t.as_str()))
            })
            .collect();

        let mut context = base.clone();
        self.insert_state(&mut context, state);
        context.insert("posts", &posts);
        context.insert("tags", &tags);
        context.insert("clear_tag_url", &self.blog_url());
        context
    }

    /// Generate the portfolio page
    fn generate_home_page(&self, index: &PostIndex, profile: &Profile, base: &Context) -> Result<()> {
        let route = Route::Home;
        let context = self.home_context(index, base, &ViewState::for_route(&route));
        let html = self.render_page("index.html", &context, profile);
        self.write_page(&route, index, &html)?;
        tracing::info!("Generated home page with {} posts", index.len());
        Ok(())
    }

    /// Generate one page per post
    fn generate_post_pages(&self, index: &PostIndex, profile: &Profile, base: &Context) -> Result<()> {
        for post in index.posts() {
            let route = Route::Post(post.slug.clone());
            let context = self.post_context(index, post, base, &route);
            let html = self.render_page("post.html", &context, profile);
            self.write_page(&route, index, &html)?;
        }
        tracing::info!("Generated {} post pages", index.len());
        Ok(())
    }

    fn post_context(&self, index: &PostIndex, post: &Post, base: &Context, route: &Route) -> Context {
        let config = &self.folio.config;

        let sidebar: Vec<SidebarEntry> = index
            .posts()
            .iter()
            .map(|p| SidebarEntry {
                title: p.title.clone(),
                date: p.date.clone(),
                url: Route::Post(p.slug.clone()).url(config, index),
                current: p.slug == post.slug,
            })
            .collect();

        let (prev, next) = index.neighbours(&post.slug);
        let prev_post = prev.map(|p| NavPost::from_post(p, config, index));
        let next_post = next.map(|p| NavPost::from_post(p, config, index));

        let description = if post.excerpt.trim().is_empty() {
            config.description.clone()
        } else {
            squash_whitespace(&post.excerpt)
        };

        let mut context = base.clone();
        self.insert_state(&mut context, &ViewState::for_route(route));
        context.insert("post", &PostData::from_post(post, config, index, None));
        context.insert("blocks", &post.blocks());
        context.insert("sidebar", &sidebar);
        context.insert("prev_post", &prev_post);
        context.insert("next_post", &next_post);
        context.insert("description", &description);
        context
    }

    /// Generate the portfolio page pre-filtered to each tag
    fn generate_tag_pages(&self, index: &PostIndex, profile: &Profile, base: &Context) -> Result<()> {
        for tag in index.all_tags() {
            let route = Route::Tag(tag.clone());
            let context = self.home_context(index, base, &ViewState::for_route(&route));
            let html = self.render_page("index.html", &context, profile);
            self.write_page(&route, index, &html)?;
        }

        tracing::info!("Generated {} tag pages", index.all_tags().len());
        Ok(())
    }

    /// Generate the not-found page
    fn generate_not_found_page(&self, index: &PostIndex, profile: &Profile, base: &Context) -> Result<()> {
        let route = Route::NotFound;
        let mut context = base.clone();
        self.insert_state(&mut context, &ViewState::for_route(&route));
        let html = self.render_page("not_found.html", &context, profile);
        self.write_page(&route, index, &html)
    }

    /// Render a page; a template failure yields the fallback page instead
    fn render_page(&self, template_name: &str, context: &Context, profile: &Profile) -> String {
        match self.renderer.render(template_name, context) {
            Ok(html) => html,
            Err(e) => {
                tracing::error!("Failed to render {}: {:#}", template_name, e);
                fallback_page(profile, &self.folio.config.language)
            }
        }
    }

    fn write_page(&self, route: &Route, index: &PostIndex, html: &str) -> Result<()> {
        let relative = route.output_path(&self.folio.config, index);
        self.write_file(&relative.to_string_lossy(), html)
    }

    fn write_file(&self, relative: &str, content: &str) -> Result<()> {
        let output_path = self.folio.public_dir.join(relative);
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create dir {:?}", parent))?;
        }
        fs::write(&output_path, content)
            .with_context(|| format!("Failed to write {:?}", output_path))?;
        tracing::debug!("Generated: {:?}", output_path);
        Ok(())
    }

    /// Copy source assets (images, resume, etc.) to public directory
    fn copy_source_assets(&self) -> Result<()> {
        let source_dir = &self.folio.source_dir;
        if !source_dir.exists() {
            return Ok(());
        }
        let data_dir = &self.folio.config.data_dir;

        for entry in WalkDir::new(source_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            // Skip markdown files (they are processed separately)
            let ext = path.extension().and_then(|e| e.to_str());
            if matches!(ext, Some("md") | Some("markdown")) {
                continue;
            }

            let relative = path.strip_prefix(source_dir)?;

            // Skip posts and profile data
            if relative
                .components()
                .any(|c| c.as_os_str() == "_posts" || c.as_os_str() == data_dir.as_str())
            {
                continue;
            }

            let dest = self.folio.public_dir.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest).with_context(|| format!("Failed to copy {:?}", path))?;
            tracing::debug!("Copied: {:?}", relative);
        }

        Ok(())
    }
}

/// Minimal page shown when a view fails to render
pub fn fallback_page(profile: &Profile, language: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{name}</title>
</head>
<body style="min-height: 100vh; margin: 0; background: #0f172a; color: white; display: flex; flex-direction: column; align-items: center; justify-content: center;">
  <h1 style="color: #0ea5e9;">{name}</h1>
  <p>{role}</p>
</body>
</html>
"#,
        lang = html_escape(language),
        name = html_escape(&profile.name),
        role = html_escape(&profile.role),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn profile() -> Profile {
        Profile {
            name: "Ada <Lovelace>".to_string(),
            role: "Engineer".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_render_failure_uses_fallback() {
        let dir = TempDir::new().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        let generator = Generator::new(&folio).unwrap();

        let html = generator.render_page("missing.html", &Context::new(), &profile());
        assert!(html.contains("Ada &lt;Lovelace&gt;"));
        assert!(html.contains("<p>Engineer</p>"));
    }

    #[test]
    fn test_incomplete_context_uses_fallback() {
        let dir = TempDir::new().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        let generator = Generator::new(&folio).unwrap();

        // post.html needs a post in its context
        let html = generator.render_page("post.html", &Context::new(), &profile());
        assert!(html.contains("<p>Engineer</p>"));
    }

    #[test]
    fn test_assets_are_copied_but_content_is_not() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("source");
        fs::create_dir_all(source.join("_posts")).unwrap();
        fs::create_dir_all(source.join("_data")).unwrap();
        fs::create_dir_all(source.join("images")).unwrap();
        fs::write(source.join("_posts/a.md"), "A").unwrap();
        fs::write(source.join("_data/profile.yml"), "name: A").unwrap();
        fs::write(source.join("images/me.png"), "png").unwrap();
        fs::write(source.join("resume.pdf"), "pdf").unwrap();

        let folio = Folio::new(dir.path()).unwrap();
        Generator::new(&folio).unwrap().copy_source_assets().unwrap();

        let public = dir.path().join("public");
        assert!(public.join("images/me.png").exists());
        assert!(public.join("resume.pdf").exists());
        assert!(!public.join("_posts").exists());
        assert!(!public.join("_data").exists());
    }
}
