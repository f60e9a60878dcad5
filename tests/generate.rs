use std::fs;
use std::path::Path;

use folio::content::loader::ContentLoader;
use folio::generator::fallback_page;
use folio::Folio;
use tempfile::TempDir;
use walkdir::WalkDir;

const CONFIG: &str = "title: Test Folio\nauthor: Ada Lovelace\n";

const PROFILE: &str = r#"
name: Ada Lovelace
role: Analyst
social:
  - { name: GitHub, href: "https://github.com/ada", icon: github }
  - { name: Trap, href: "javascript:alert(3)", icon: code }
"#;

const FIRST: &str = r#"---
id: 1
slug: first-post
title: First Post
date: 2025-11-12
tags: [DevOps, AWS]
---
Intro paragraph with <script>alert(1)</script> inside.

- [Docs](https://example.com/docs)
- [Bad](javascript:alert(2))
"#;

const SECOND: &str = r#"---
id: 2
slug: second-post
title: Second Post
date: 2025-11-13
tags: [DevOps]
---
## Heading

```bash
echo "<b>"
```
"#;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn generated_site() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "_config.yml", CONFIG);
    write(dir.path(), "source/_data/profile.yml", PROFILE);
    write(dir.path(), "source/_posts/first.md", FIRST);
    write(dir.path(), "source/_posts/second.md", SECOND);
    write(dir.path(), "source/images/avatar.png", "png");

    let folio = Folio::new(dir.path()).unwrap();
    folio.generate().unwrap();
    dir
}

fn read(dir: &TempDir, relative: &str) -> String {
    fs::read_to_string(dir.path().join("public").join(relative))
        .unwrap_or_else(|e| panic!("missing {}: {}", relative, e))
}

#[test]
fn test_every_view_is_written() {
    let dir = generated_site();
    let public = dir.path().join("public");

    for file in [
        "index.html",
        "blog/first-post/index.html",
        "blog/second-post/index.html",
        "tags/devops/index.html",
        "tags/aws/index.html",
        "404.html",
        "css/folio.css",
        "images/avatar.png",
    ] {
        assert!(public.join(file).exists(), "{} was not generated", file);
    }
    assert!(!public.join("_posts").exists());
}

#[test]
fn test_home_lists_posts_in_order() {
    let dir = generated_site();
    let html = read(&dir, "index.html");

    let first = html.find("First Post").unwrap();
    let second = html.find("Second Post").unwrap();
    assert!(first < second);
    assert!(html.contains("Ada Lovelace"));
    assert!(html.contains(r#"id="blog""#));
}

#[test]
fn test_content_is_escaped() {
    let dir = generated_site();

    let post = read(&dir, "blog/first-post/index.html");
    assert!(!post.contains("<script"));
    assert!(post.contains("&lt;script&gt;"));

    let second = read(&dir, "blog/second-post/index.html");
    assert!(second.contains("&lt;b&gt;"));
    assert!(second.contains("language-bash"));

    let home = read(&dir, "index.html");
    assert!(!home.contains("<script"));
}

#[test]
fn test_links_are_safe() {
    let dir = generated_site();

    let post = read(&dir, "blog/first-post/index.html");
    assert!(post.contains(r#"rel="noopener noreferrer""#));
    assert!(post.contains("example.com"));
    assert!(!post.contains("javascript:"));

    let home = read(&dir, "index.html");
    assert!(!home.contains("javascript:"));
    assert!(home.contains("github.com"));
}

#[test]
fn test_tag_page_is_prefiltered() {
    let dir = generated_site();

    let aws = read(&dir, "tags/aws/index.html");
    assert!(aws.contains("First Post"));
    assert!(!aws.contains("Second Post"));
    assert!(aws.contains("Show all posts"));

    let devops = read(&dir, "tags/devops/index.html");
    assert!(devops.contains("First Post"));
    assert!(devops.contains("Second Post"));
}

#[test]
fn test_post_page_navigation() {
    let dir = generated_site();

    let first = read(&dir, "blog/first-post/index.html");
    assert!(first.contains("Back to Blog"));
    assert!(first.contains("pager-next"));
    assert!(!first.contains("pager-prev"));
    assert!(first.contains("November 12, 2025"));
    assert!(first.contains("Ada Lovelace"));

    let second = read(&dir, "blog/second-post/index.html");
    assert!(second.contains("pager-prev"));
    assert!(!second.contains("pager-next"));
}

#[test]
fn test_not_found_page() {
    let dir = generated_site();
    let html = read(&dir, "404.html");
    assert!(html.contains("Post Not Found"));
    assert!(html.contains("Back to Blog"));
}

#[test]
fn test_duplicate_slugs_abort_generation() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "source/_posts/a.md", "---\nslug: same\n---\nA\n");
    write(dir.path(), "source/_posts/b.md", "---\nslug: same\n---\nB\n");

    let folio = Folio::new(dir.path()).unwrap();
    let err = folio.generate().unwrap_err();
    assert!(err.to_string().contains("same"));
    assert!(!dir.path().join("public/index.html").exists());
}

#[test]
fn test_site_without_profile_or_posts() {
    let dir = TempDir::new().unwrap();
    let folio = Folio::new(dir.path()).unwrap();
    folio.generate().unwrap();

    let html = read(&dir, "index.html");
    assert!(html.contains("No posts found"));
    assert!(html.contains(&folio.config.author));
}

#[test]
fn test_no_page_falls_back() {
    let dir = generated_site();
    let folio = Folio::new(dir.path()).unwrap();
    let profile = ContentLoader::new(&folio).load_profile().unwrap();
    let fallback = fallback_page(&profile, &folio.config.language);

    let pages: Vec<_> = WalkDir::new(&folio.public_dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "html"))
        .map(|e| e.into_path())
        .collect();
    assert!(pages.len() >= 6);

    for page in pages {
        let html = fs::read_to_string(&page).unwrap();
        assert_ne!(html, fallback, "{:?} was rendered as the fallback page", page);
        assert!(html.contains("site-nav"), "{:?} is missing the layout", page);
    }
}

#[test]
fn test_inline_code_inside_bold() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "source/_posts/cli.md",
        "---\nslug: cli\n---\nRun **`kubectl get pods`** first.\n",
    );
    Folio::new(dir.path()).unwrap().generate().unwrap();

    let html = read(&dir, "blog/cli/index.html");
    assert!(html.contains(r#"<strong><code class="md-inline-code">kubectl get pods</code></strong>"#));
    assert!(!html.contains("`kubectl"));
}

#[test]
fn test_tags_sharing_a_slug_get_separate_pages() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "source/_posts/c.md", "---\nid: 1\nslug: c-post\ntitle: Plain C\ntags: [C]\n---\nC\n");
    write(dir.path(), "source/_posts/cpp.md", "---\nid: 2\nslug: cpp-post\ntitle: Modern Cpp\ntags: [C++]\n---\nCpp\n");
    Folio::new(dir.path()).unwrap().generate().unwrap();

    let c = read(&dir, "tags/c/index.html");
    assert!(c.contains("Plain C"));
    assert!(!c.contains("Modern Cpp"));

    let cpp = read(&dir, "tags/c-2/index.html");
    assert!(cpp.contains("Modern Cpp"));
    assert!(!cpp.contains("Plain C"));

    // The chip on the post page points at the page that lists the post
    let post = read(&dir, "blog/cpp-post/index.html");
    assert!(post.contains("tags&#x2F;c-2&#x2F;"));
}

#[test]
fn test_bad_front_matter_fails_generation() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "source/_posts/momentum.md",
        "---\ntitle: Momentum: why it works\nslug: why-momentum\n---\nBody\n",
    );

    let err = Folio::new(dir.path()).unwrap().generate().unwrap_err();
    assert!(format!("{:#}", err).contains("momentum.md"));
    assert!(!dir.path().join("public/blog/momentum").exists());
}
