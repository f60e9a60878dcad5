use std::fs;

use folio::content::loader::ContentLoader;
use folio::content::{Post, PostIndex};
use folio::view::Route;
use folio::Folio;
use tempfile::TempDir;

fn sample() -> PostIndex {
    PostIndex::new(vec![
        Post::new(1, "one", "One").with_tags(["A", "B"]),
        Post::new(2, "two", "Two").with_tags(["B", "C"]),
    ])
    .unwrap()
}

fn slugs(posts: &[&Post]) -> Vec<String> {
    posts.iter().map(|p| p.slug.clone()).collect()
}

#[test]
fn test_tags_are_unique_and_sorted() {
    let index = sample();
    assert_eq!(index.all_tags(), ["A", "B", "C"]);
}

#[test]
fn test_filtering_by_tag() {
    let index = sample();
    assert_eq!(slugs(&index.filtered_posts(Some("B"))), ["one", "two"]);
    assert_eq!(slugs(&index.filtered_posts(Some("A"))), ["one"]);
    assert_eq!(slugs(&index.filtered_posts(None)), ["one", "two"]);
    assert!(index.filtered_posts(Some("Z")).is_empty());
}

#[test]
fn test_filtered_posts_keep_order_and_carry_tag() {
    let index = sample();
    for tag in index.all_tags() {
        let filtered = index.filtered_posts(Some(tag));
        assert!(filtered.iter().all(|p| p.tags.contains(tag)));

        let positions: Vec<usize> = filtered
            .iter()
            .map(|f| index.posts().iter().position(|p| p.slug == f.slug).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}

#[test]
fn test_lookup_by_slug() {
    let index = sample();
    assert_eq!(index.lookup_by_slug("two").map(|p| p.id), Some(2));
    assert!(index.lookup_by_slug("missing").is_none());
    for post in index.posts() {
        assert_eq!(index.lookup_by_slug(&post.slug).unwrap().slug, post.slug);
    }
}

#[test]
fn test_empty_index() {
    let index = PostIndex::new(Vec::new()).unwrap();
    assert!(index.is_empty());
    assert!(index.all_tags().is_empty());
    assert!(index.filtered_posts(None).is_empty());
}

#[test]
fn test_routes_resolve_against_loaded_posts() {
    let dir = TempDir::new().unwrap();
    let posts = dir.path().join("source/_posts");
    fs::create_dir_all(&posts).unwrap();
    fs::write(
        posts.join("k8s.md"),
        "---\ntitle: Kubernetes Notes\ntags: [Kubernetes, Site Reliability]\n---\nBody\n",
    )
    .unwrap();

    let folio = Folio::new(dir.path()).unwrap();
    let index = ContentLoader::new(&folio).load_index().unwrap();
    let post = index.lookup_by_slug("k8s").unwrap();
    assert_eq!(post.title, "Kubernetes Notes");

    let url = Route::Post(post.slug.clone()).url(&folio.config, &index);
    assert_eq!(
        Route::parse(&url, &folio.config).resolve(&index),
        Route::Post("k8s".to_string())
    );

    let tag_url = Route::Tag("Site Reliability".to_string()).url(&folio.config, &index);
    assert_eq!(
        Route::parse(&tag_url, &folio.config).resolve(&index),
        Route::Tag("Site Reliability".to_string())
    );

    assert_eq!(
        Route::parse("/blog/nope/", &folio.config).resolve(&index),
        Route::NotFound
    );
}

#[test]
fn test_tags_sharing_a_slug_keep_separate_pages() {
    let index = PostIndex::new(vec![
        Post::new(1, "c-post", "C").with_tags(["C"]),
        Post::new(2, "cpp-post", "C++").with_tags(["C++"]),
    ])
    .unwrap();
    let config = folio::config::SiteConfig::default();

    for tag in index.all_tags() {
        let url = Route::Tag(tag.clone()).url(&config, &index);
        let Route::Tag(resolved) = Route::parse(&url, &config).resolve(&index) else {
            panic!("{} does not resolve to a tag", url);
        };
        assert_eq!(&resolved, tag);
        assert!(index
            .filtered_posts(Some(&resolved))
            .iter()
            .all(|p| p.tags.contains(tag)));
    }
}
