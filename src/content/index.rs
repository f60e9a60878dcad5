//! Tag-filtered post index
//!
//! Holds the ordered post list for a build and answers the three questions
//! every view asks of it: which tags exist, which posts carry a tag, and
//! which post owns a slug. It also owns the URL segment of every tag, so
//! links and output files agree even when two tags slugify alike.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use super::{ContentError, Post};

/// Immutable, ordered collection of posts
#[derive(Debug, Clone, Default)]
pub struct PostIndex {
    posts: Vec<Post>,
    tags: Vec<String>,
    /// URL segment of `tags[i]`
    segments: Vec<String>,
}

/// Segment used for tags without a single URL-safe character
const FALLBACK_SEGMENT: &str = "tag";

impl PostIndex {
    /// Build the index; slugs must be unique
    pub fn new(posts: Vec<Post>) -> Result<Self, ContentError> {
        let mut seen: HashMap<&str, &Post> = HashMap::new();
        for post in &posts {
            if let Some(first) = seen.insert(post.slug.as_str(), post) {
                return Err(ContentError::DuplicateSlug {
                    slug: post.slug.clone(),
                    first: first.source.clone(),
                    second: post.source.clone(),
                });
            }
        }

        let tags: Vec<String> = posts
            .iter()
            .flat_map(|p| p.tags.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let segments = tag_segments(&tags);

        Ok(Self {
            posts,
            tags,
            segments,
        })
    }

    /// All posts in list order
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Distinct tags across all posts, sorted ascending
    pub fn all_tags(&self) -> &[String] {
        &self.tags
    }

    /// Posts carrying `selected_tag`, in list order; all posts when `None`
    pub fn filtered_posts(&self, selected_tag: Option<&str>) -> Vec<&Post> {
        match selected_tag {
            None => self.posts.iter().collect(),
            Some(tag) => self.posts.iter().filter(|p| p.has_tag(tag)).collect(),
        }
    }

    /// First post whose slug equals `slug`
    pub fn lookup_by_slug(&self, slug: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.slug == slug)
    }

    /// URL segment of a tag; `None` when no post carries it
    pub fn tag_segment(&self, tag: &str) -> Option<&str> {
        self.tags
            .binary_search_by(|t| t.as_str().cmp(tag))
            .ok()
            .map(|i| self.segments[i].as_str())
    }

    /// The tag whose URL segment is `segment`
    pub fn tag_for_segment(&self, segment: &str) -> Option<&str> {
        self.segments
            .iter()
            .position(|s| s == segment)
            .map(|i| self.tags[i].as_str())
    }

    /// Number of posts per tag
    pub fn tag_counts(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for post in &self.posts {
            // A tag repeated within one post counts once
            let unique: BTreeSet<&str> = post.tags.iter().map(String::as_str).collect();
            for tag in unique {
                *counts.entry(tag).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Previous and next posts around `slug`, in list order
    pub fn neighbours(&self, slug: &str) -> (Option<&Post>, Option<&Post>) {
        let Some(pos) = self.posts.iter().position(|p| p.slug == slug) else {
            return (None, None);
        };
        let prev = pos.checked_sub(1).and_then(|i| self.posts.get(i));
        let next = self.posts.get(pos + 1);
        (prev, next)
    }
}

/// Slugify each tag, suffixing `-2`, `-3`, ... on collisions
///
/// Tags arrive sorted, so the same tag set always yields the same segments.
fn tag_segments(tags: &[String]) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::with_capacity(tags.len());

    tags.iter()
        .map(|tag| {
            let mut base = slug::slugify(tag);
            if base.is_empty() {
                base = FALLBACK_SEGMENT.to_string();
            }

            let mut segment = base.clone();
            let mut n = 2;
            while taken.contains(&segment) {
                segment = format!("{}-{}", base, n);
                n += 1;
            }
            if segment != base {
                tracing::warn!("Tag {:?} is published as {:?} to keep its URL unique", tag, segment);
            }
            taken.insert(segment.clone());
            segment
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PostIndex {
        PostIndex::new(vec![
            Post::new(1, "first", "First").with_tags(["A", "B"]),
            Post::new(2, "second", "Second").with_tags(["B", "C"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_all_tags_sorted_and_deduplicated() {
        assert_eq!(sample().all_tags(), ["A", "B", "C"]);
    }

    #[test]
    fn test_filtered_posts() {
        let index = sample();

        let both: Vec<_> = index.filtered_posts(Some("B")).iter().map(|p| p.id).collect();
        assert_eq!(both, vec![1, 2]);

        let only_c: Vec<_> = index.filtered_posts(Some("C")).iter().map(|p| p.id).collect();
        assert_eq!(only_c, vec![2]);

        assert!(index.filtered_posts(Some("Z")).is_empty());
        assert!(index.filtered_posts(Some("b")).is_empty());
    }

    #[test]
    fn test_no_selection_returns_everything_in_order() {
        let index = sample();
        let all: Vec<_> = index.filtered_posts(None).iter().map(|p| p.id).collect();
        assert_eq!(all, vec![1, 2]);
    }

    #[test]
    fn test_every_tag_matches_some_post() {
        let index = sample();
        for tag in index.all_tags() {
            let posts = index.filtered_posts(Some(tag));
            assert!(!posts.is_empty());
            assert!(posts.iter().all(|p| p.has_tag(tag)));
        }
    }

    #[test]
    fn test_lookup_by_slug() {
        let index = sample();
        for post in index.posts() {
            assert_eq!(index.lookup_by_slug(&post.slug), Some(post));
        }
        assert!(index.lookup_by_slug("missing").is_none());
    }

    #[test]
    fn test_duplicate_slug_is_rejected() {
        let result = PostIndex::new(vec![Post::new(1, "same", "A"), Post::new(2, "same", "B")]);
        match result {
            Err(ContentError::DuplicateSlug { slug, .. }) => assert_eq!(slug, "same"),
            other => panic!("expected duplicate slug error, got {:?}", other),
        }
    }

    #[test]
    fn test_tag_counts() {
        let index = PostIndex::new(vec![
            Post::new(1, "a", "A").with_tags(["x", "x", "y"]),
            Post::new(2, "b", "B").with_tags(["x"]),
        ])
        .unwrap();
        let counts = index.tag_counts();
        assert_eq!(counts.get("x"), Some(&2));
        assert_eq!(counts.get("y"), Some(&1));
    }

    #[test]
    fn test_neighbours() {
        let index = sample();
        let (prev, next) = index.neighbours("first");
        assert!(prev.is_none());
        assert_eq!(next.map(|p| p.id), Some(2));

        let (prev, next) = index.neighbours("second");
        assert_eq!(prev.map(|p| p.id), Some(1));
        assert!(next.is_none());

        assert_eq!(index.neighbours("missing"), (None, None));
    }

    #[test]
    fn test_tag_segments_are_unique() {
        let index = PostIndex::new(vec![
            Post::new(1, "c-post", "C").with_tags(["C"]),
            Post::new(2, "cpp-post", "C++").with_tags(["C++", "Machine Learning"]),
            Post::new(3, "symbols", "Symbols").with_tags(["!!!", "???"]),
        ])
        .unwrap();

        assert_eq!(index.tag_segment("C"), Some("c"));
        assert_eq!(index.tag_segment("C++"), Some("c-2"));
        assert_eq!(index.tag_segment("Machine Learning"), Some("machine-learning"));
        assert_eq!(index.tag_segment("!!!"), Some("tag"));
        assert_eq!(index.tag_segment("???"), Some("tag-2"));
        assert_eq!(index.tag_segment("Rust"), None);

        for tag in index.all_tags() {
            let segment = index.tag_segment(tag).unwrap();
            assert_eq!(index.tag_for_segment(segment), Some(tag.as_str()));
        }
        assert_eq!(index.tag_for_segment("missing"), None);
    }

    #[test]
    fn test_empty_index() {
        let index = PostIndex::new(Vec::new()).unwrap();
        assert!(index.is_empty());
        assert!(index.all_tags().is_empty());
        assert!(index.filtered_posts(None).is_empty());
    }
}
