//! Built-in portfolio templates using the Tera template engine
//!
//! All templates are embedded in the binary. Autoescaping stays on for every
//! `.html` template: post bodies reach the page as typed block nodes drawn by
//! the `partials/markdown.html` macros, never as pre-rendered markup.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::content::{Icon, IconDescriptor, Post, PostIndex};
use crate::helpers::{date_xml, display_date, is_external, safe_href, url_for};
use crate::view::{Route, Section, ViewState};

/// Stylesheet written to `css/folio.css`
pub const STYLESHEET: &str = include_str!("folio/folio.css");

/// Template renderer with the embedded portfolio templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        // Tera::default() autoescapes .html, .htm and .xml
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("folio/layout.html")),
            ("index.html", include_str!("folio/index.html")),
            ("post.html", include_str!("folio/post.html")),
            ("not_found.html", include_str!("folio/not_found.html")),
            // Partials
            ("partials/nav.html", include_str!("folio/partials/nav.html")),
            (
                "partials/markdown.html",
                include_str!("folio/partials/markdown.html"),
            ),
            (
                "partials/post_card.html",
                include_str!("folio/partials/post_card.html"),
            ),
            ("partials/icon.html", include_str!("folio/partials/icon.html")),
        ])?;

        // Register custom filters
        tera.register_filter("safe_href", safe_href_filter);
        tera.register_filter("date_format", date_format_filter);
        tera.register_tester("external", external_tester);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: replace script-capable hrefs with `#`
fn safe_href_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("safe_href", "value", String, value);
    Ok(tera::Value::String(safe_href(&s)))
}

/// Tera filter: format a post date string, keeping it as-is when unparseable
fn date_format_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("date_format", "value", String, value);
    let format = match args.get("format") {
        Some(val) => tera::try_get_value!("date_format", "format", String, val),
        None => "YYYY-MM-DD".to_string(),
    };
    Ok(tera::Value::String(display_date(&s, &format)))
}

/// Tera tester: absolute http(s) link
fn external_tester(value: Option<&tera::Value>, _args: &[tera::Value]) -> tera::Result<bool> {
    Ok(value
        .and_then(|v| v.as_str())
        .map(is_external)
        .unwrap_or(false))
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct ConfigData {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub keyword: String,
    pub author: String,
    pub language: String,
    pub url: String,
    pub root: String,
    pub date_format: String,
    pub home_url: String,
    pub stylesheet_url: String,
}

impl ConfigData {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            title: config.title.clone(),
            subtitle: config.subtitle.clone(),
            description: config.description.clone(),
            keyword: config.keyword_line(),
            author: config.author.clone(),
            language: config.language.clone(),
            url: config.url.clone(),
            root: config.root.clone(),
            date_format: config.date_format.clone(),
            home_url: url_for(config, "/"),
            stylesheet_url: url_for(config, "css/folio.css"),
        }
    }
}

/// A post as listed on cards and shown on its own page
#[derive(Debug, Clone, Serialize)]
pub struct PostData {
    pub id: u32,
    pub slug: String,
    pub title: String,
    pub date: String,
    /// `YYYY-MM-DD` for `<time datetime>`, when the date parses
    pub date_iso: Option<String>,
    pub excerpt: String,
    pub author: String,
    pub read_time: String,
    pub tags: Vec<TagLink>,
    pub image: Option<String>,
    pub url: String,
}

impl PostData {
    pub fn from_post(
        post: &Post,
        config: &SiteConfig,
        index: &PostIndex,
        selected_tag: Option<&str>,
    ) -> Self {
        Self {
            id: post.id,
            slug: post.slug.clone(),
            title: post.title.clone(),
            date: display_date(&post.date, &config.date_format),
            date_iso: date_xml(&post.date),
            excerpt: post.excerpt.clone(),
            author: post.author.clone(),
            read_time: post.read_time.clone(),
            tags: post
                .tags
                .iter()
                .map(|t| TagLink::new(t, config, index, 0, selected_tag == Some(t.as_str())))
                .collect(),
            image: post.image.clone(),
            url: Route::Post(post.slug.clone()).url(config, index),
        }
    }
}

/// A tag chip
#[derive(Debug, Clone, Serialize)]
pub struct TagLink {
    pub name: String,
    pub url: String,
    pub count: usize,
    pub active: bool,
}

impl TagLink {
    pub fn new(
        tag: &str,
        config: &SiteConfig,
        index: &PostIndex,
        count: usize,
        active: bool,
    ) -> Self {
        Self {
            name: tag.to_string(),
            url: Route::Tag(tag.to_string()).url(config, index),
            count,
            active,
        }
    }
}

/// One entry of the top navigation bar
#[derive(Debug, Clone, Serialize)]
pub struct NavItem {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: IconDescriptor,
    pub href: String,
    pub active: bool,
}

/// Navigation bar for a view state; links point at the home page anchors
pub fn nav_items(config: &SiteConfig, state: &ViewState) -> Vec<NavItem> {
    let home = url_for(config, "/");
    Section::ALL
        .iter()
        .map(|&section| NavItem {
            id: section.id(),
            label: section.label(),
            icon: section.icon().descriptor(),
            href: format!("{}#{}", home, section.id()),
            active: state.is_active(section),
        })
        .collect()
}

/// A post in the post page sidebar
#[derive(Debug, Clone, Serialize)]
pub struct SidebarEntry {
    pub title: String,
    pub date: String,
    pub url: String,
    pub current: bool,
}

/// Previous/next link on a post page
#[derive(Debug, Clone, Serialize)]
pub struct NavPost {
    pub title: String,
    pub url: String,
}

impl NavPost {
    pub fn from_post(post: &Post, config: &SiteConfig, index: &PostIndex) -> Self {
        Self {
            title: post.title.clone(),
            url: Route::Post(post.slug.clone()).url(config, index),
        }
    }
}

/// Explicit view state as the templates see it
#[derive(Debug, Clone, Serialize)]
pub struct StateData {
    pub active_section: &'static str,
    pub selected_tag: Option<String>,
}

impl From<&ViewState> for StateData {
    fn from(state: &ViewState) -> Self {
        Self {
            active_section: state.active_section.id(),
            selected_tag: state.selected_tag.clone(),
        }
    }
}

/// Icons the templates reach for by name
pub fn ui_icons() -> HashMap<&'static str, IconDescriptor> {
    [
        ("calendar", Icon::Calendar),
        ("clock", Icon::Clock),
        ("user", Icon::User),
        ("tag", Icon::Tag),
        ("github", Icon::Github),
        ("map_marker", Icon::MapMarker),
        ("rocket", Icon::Rocket),
        ("briefcase", Icon::Briefcase),
        ("blog", Icon::Blog),
    ]
    .into_iter()
    .map(|(name, icon)| (name, icon.descriptor()))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{markdown, Profile};
    use crate::view::Action;

    fn render_markdown(source: &str) -> String {
        let mut renderer = TemplateRenderer::new().unwrap();
        // Escaping follows the name of the top-level template
        renderer
            .tera
            .add_raw_template(
                "body.html",
                r#"{% import "partials/markdown.html" as md %}{{ md::blocks(blocks=blocks) }}"#,
            )
            .unwrap();
        let mut context = Context::new();
        context.insert("blocks", &markdown::render(source));
        renderer.render("body.html", &context).unwrap()
    }

    #[test]
    fn test_templates_load() {
        assert!(TemplateRenderer::new().is_ok());
    }

    #[test]
    fn test_markdown_is_escaped() {
        let html = render_markdown("Hello <script>alert(1)</script> **<b>**");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("<strong>&lt;b&gt;</strong>"));
    }

    #[test]
    fn test_markdown_blocks() {
        let html = render_markdown("## Title\n- one\n- `two`\n\n```rust\nfn main() {}\n```");
        assert!(html.contains("<h2"));
        assert!(html.contains("Title"));
        assert!(html.contains("<ul"));
        assert!(html.contains("<code"));
        assert!(html.contains("language-rust"));
        assert!(html.contains("fn main() {}"));
        assert!(html.contains("<br"));
    }

    #[test]
    fn test_markdown_links() {
        let html = render_markdown("[site](https://example.com) [bad](javascript:alert(1))");
        assert!(html.contains(r#"target="_blank""#));
        assert!(html.contains(r#"rel="noopener noreferrer""#));
        assert!(html.contains("example.com"));
        assert!(!html.contains("javascript:"));
        assert!(html.contains(r##"href="#""##));
    }

    #[test]
    fn test_nav_items_follow_state() {
        let config = SiteConfig::default();
        let state = crate::view::reduce(&ViewState::default(), Action::SelectTag("A".into()));
        let items = nav_items(&config, &state);
        assert_eq!(items.len(), 7);
        assert_eq!(items[0].href, "/#hero");
        let active: Vec<_> = items.iter().filter(|i| i.active).map(|i| i.id).collect();
        assert_eq!(active, vec!["blog"]);
    }

    #[test]
    fn test_post_data() {
        let config = SiteConfig::default();
        let mut post = Post::new(1, "hello", "Hello").with_tags(["Rust", "Web Dev"]);
        post.date = "2025-11-12".to_string();

        let index = PostIndex::new(vec![post.clone()]).unwrap();

        let data = PostData::from_post(&post, &config, &index, Some("Rust"));
        assert_eq!(data.date, "November 12, 2025");
        assert_eq!(data.date_iso.as_deref(), Some("2025-11-12"));
        assert_eq!(data.url, "/blog/hello/");
        assert_eq!(data.tags[1].url, "/tags/web-dev/");
        assert!(data.tags[0].active);
        assert!(!data.tags[1].active);
    }

    #[test]
    fn test_profile_serializes_icons_as_descriptors() {
        let profile: Profile = serde_yaml::from_str("skills:\n  - title: Cloud\n    icon: aws\n").unwrap();
        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(value["skills"][0]["icon"]["id"], "aws");
    }
}
