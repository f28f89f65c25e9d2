//! Tests for post loading and series filtering

use super::{filter_series, load_posts, normalize_tags, Post, DEFAULT_WEIGHT};
use pretty_assertions::assert_eq;
use serde_yaml::Value;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const SERIES: &str = "SQL for Python Developers";

fn post(name: &str, front_matter: &str) -> Post {
    let content = format!("---\n{front_matter}\n---\nBody of {name}\n");
    Post::parse(format!("{name}/index.md"), &content, "series")
}

fn titles(posts: &[Post]) -> Vec<&str> {
    posts.iter().filter_map(|p| p.title.as_deref()).collect()
}

fn write_bundle(content_dir: &Path, name: &str, content: &str) {
    let dir = content_dir.join(name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("index.md"), content).unwrap();
}

#[test]
fn test_parse_post_fields() {
    let p = post(
        "zero-setup",
        "title: Zero Setup SQL\nweight: 2\nseries: [\"SQL for Python Developers\", \"beginner\"]",
    );

    assert_eq!(p.title.as_deref(), Some("Zero Setup SQL"));
    assert_eq!(p.weight, 2);
    assert_eq!(
        p.tags,
        BTreeSet::from(["SQL for Python Developers".to_string(), "beginner".to_string()])
    );
    assert_eq!(p.body, "Body of zero-setup\n");
}

#[test]
fn test_string_and_list_tags_normalize_the_same() {
    let single = post("a", "title: A\nseries: SQL for Python Developers");
    let list = post("b", "title: B\nseries:\n  - SQL for Python Developers");

    assert_eq!(single.tags, list.tags);
    assert!(single.has_tag(SERIES));
    assert!(list.has_tag(SERIES));
}

#[test]
fn test_tag_match_is_case_insensitive() {
    let p = post("a", "title: A\nseries: sql FOR python developers");
    assert!(p.has_tag(SERIES));
    assert!(!p.has_tag("SQL for Go Developers"));
}

#[test]
fn test_malformed_tags_become_empty() {
    let mapping = post("a", "title: A\nseries:\n  name: SQL for Python Developers");
    assert!(mapping.tags.is_empty());

    let missing = post("b", "title: B");
    assert!(missing.tags.is_empty());

    let nulls = normalize_tags(Some(&Value::Null));
    assert!(nulls.is_empty());
}

#[test]
fn test_scalar_list_items_are_stringified() {
    let p = post("a", "title: A\nseries: [2024, true, {nested: map}, \"  padded  \"]");
    assert_eq!(
        p.tags,
        BTreeSet::from(["2024".to_string(), "true".to_string(), "padded".to_string()])
    );
}

#[test]
fn test_weight_fallbacks() {
    assert_eq!(post("a", "title: A").weight, DEFAULT_WEIGHT);
    assert_eq!(post("b", "title: B\nweight: \"4\"").weight, 4);
    assert_eq!(post("c", "title: C\nweight: 5.0").weight, 5);
    assert_eq!(post("d", "title: D\nweight: soon").weight, DEFAULT_WEIGHT);
}

#[test]
fn test_blank_title_is_none() {
    assert_eq!(post("a", "title: \"  \"").title, None);
}

#[test]
fn test_filter_sorts_by_weight() {
    let posts = vec![
        post("c", "title: Third\nweight: 3\nseries: SQL for Python Developers"),
        post("x", "title: Other\nweight: 1\nseries: Rust Tips"),
        post("a", "title: First\nweight: 1\nseries: [SQL for Python Developers]"),
        post("n", "title: Unweighted\nseries: SQL for Python Developers"),
        post("b", "title: Second\nweight: 2\nseries: sql for python developers"),
    ];

    let selected = filter_series(posts, SERIES);
    assert_eq!(titles(&selected), vec!["First", "Second", "Third", "Unweighted"]);
}

#[test]
fn test_filter_ties_keep_load_order() {
    let posts = vec![
        post("b", "title: Beta\nweight: 2\nseries: SQL for Python Developers"),
        post("a", "title: Alpha\nweight: 2\nseries: [SQL for Python Developers]"),
        post("c", "title: Gamma\nweight: 1\nseries: SQL for Python Developers"),
    ];

    let selected = filter_series(posts, SERIES);
    assert_eq!(titles(&selected), vec!["Gamma", "Beta", "Alpha"]);
}

#[test]
fn test_filter_includes_each_post_once() {
    let posts = vec![
        post("a", "title: A\nweight: 1\nseries: [SQL for Python Developers, SQL for Python Developers]"),
        post("b", "title: B\nweight: 2\nseries: SQL for Python Developers"),
    ];

    let selected = filter_series(posts, SERIES);
    assert_eq!(titles(&selected), vec!["A", "B"]);
}

#[test]
fn test_load_posts_bundles_and_leaves() {
    let temp_dir = tempdir().unwrap();
    let content_dir = temp_dir.path().join("content").join("blog");
    fs::create_dir_all(&content_dir).unwrap();

    write_bundle(&content_dir, "b-post", "---\ntitle: Bundle\n---\nbody\n");
    fs::write(content_dir.join("a-leaf.md"), "---\ntitle: Leaf\n---\nbody\n").unwrap();
    fs::write(content_dir.join("_index.md"), "---\ntitle: Section\n---\n").unwrap();
    fs::write(content_dir.join("notes.txt"), "not a post").unwrap();

    // Bundle directories without an index.md hold only resources
    let images = content_dir.join("c-images");
    fs::create_dir_all(&images).unwrap();
    fs::write(images.join("diagram.md"), "---\ntitle: Resource\n---\n").unwrap();

    let posts = load_posts(&content_dir, "series").unwrap();
    assert_eq!(titles(&posts), vec!["Leaf", "Bundle"]);
    assert_eq!(posts[1].path, content_dir.join("b-post").join("index.md"));
}

#[test]
fn test_load_posts_skips_non_utf8() {
    let temp_dir = tempdir().unwrap();
    let content_dir = temp_dir.path();

    write_bundle(content_dir, "good", "---\ntitle: Good\n---\n");
    let bad = content_dir.join("bad");
    fs::create_dir_all(&bad).unwrap();
    fs::write(bad.join("index.md"), [0xff, 0xfe, 0x00, 0x9f]).unwrap();

    let posts = load_posts(content_dir, "series").unwrap();
    assert_eq!(titles(&posts), vec!["Good"]);
}

#[test]
fn test_load_posts_missing_directory() {
    let temp_dir = tempdir().unwrap();
    let err = load_posts(&temp_dir.path().join("nope"), "series").unwrap_err();
    assert!(err.to_string().contains("Blog content directory not found"));
}
