//! List site content

use anyhow::Result;
use serde::Serialize;

use crate::content::loader::ContentLoader;
use crate::content::PostIndex;
use crate::view::Route;
use crate::Folio;

/// What `list` prints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Post,
    Tag,
}

#[derive(Debug, Serialize)]
pub struct PostRow<'a> {
    pub id: u32,
    pub slug: &'a str,
    pub title: &'a str,
    pub date: &'a str,
    pub tags: &'a [String],
    pub source: &'a str,
}

#[derive(Debug, Serialize)]
pub struct TagRow<'a> {
    pub name: &'a str,
    pub count: usize,
    pub url: String,
}

/// List posts (optionally only those carrying `tag`) or tags
pub fn run(folio: &Folio, kind: ListKind, tag: Option<&str>, json: bool) -> Result<()> {
    let index = ContentLoader::new(folio).load_index()?;

    match kind {
        ListKind::Post => {
            let rows = post_rows(&index, tag);
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                match tag {
                    Some(tag) => println!("Posts tagged {:?} ({}):", tag, rows.len()),
                    None => println!("Posts ({}):", rows.len()),
                }
                for row in &rows {
                    println!(
                        "  #{} {} - {} [{}]",
                        row.id, row.date, row.title, row.source
                    );
                }
            }
        }
        ListKind::Tag => {
            if tag.is_some() {
                tracing::warn!("--tag only applies when listing posts");
            }
            let rows = tag_rows(&index, folio);
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                println!("Tags ({}):", rows.len());
                for row in &rows {
                    println!("  {} ({})", row.name, row.count);
                }
            }
        }
    }

    Ok(())
}

/// Posts in list order, filtered by tag
pub fn post_rows<'a>(index: &'a PostIndex, tag: Option<&str>) -> Vec<PostRow<'a>> {
    index
        .filtered_posts(tag)
        .into_iter()
        .map(|p| PostRow {
            id: p.id,
            slug: &p.slug,
            title: &p.title,
            date: &p.date,
            tags: &p.tags,
            source: &p.source,
        })
        .collect()
}

/// Tags sorted by post count, then by name
pub fn tag_rows<'a>(index: &'a PostIndex, folio: &Folio) -> Vec<TagRow<'a>> {
    let mut rows: Vec<TagRow> = index
        .tag_counts()
        .into_iter()
        .map(|(name, count)| TagRow {
            name,
            count,
            url: Route::Tag(name.to_string()).url(&folio.config, index),
        })
        .collect();
    // tag_counts is name-ordered, so a stable sort keeps ties alphabetical
    rows.sort_by(|a, b| b.count.cmp(&a.count));
    rows
}
