use super::Post;

/// Keep the posts tagged with `series` and order them by ascending weight.
///
/// The sort is stable, so posts sharing a weight keep the order they were loaded in.
pub fn filter_series(posts: Vec<Post>, series: &str) -> Vec<Post> {
    let mut selected: Vec<Post> = posts
        .into_iter()
        .filter(|post| post.has_tag(series))
        .collect();

    selected.sort_by_key(|post| post.weight);
    selected
}
