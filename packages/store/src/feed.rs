//! # Feed projections
//!
//! Pure, read-only views over a post collection, recomputed on every call so
//! they can never go stale against the store. Each accepts an optional text
//! query for case-insensitive substring filtering.
//!
//! Every post lands in exactly one projection: anonymous posts go to the
//! anonymous feed regardless of any community scoping, community posts to
//! their community feed, and everything else to the public feed.

use crate::models::Post;

fn matches_query(haystack: &str, query: &str) -> bool {
    haystack.to_lowercase().contains(&query.to_lowercase())
}

/// Posts with no community scope and no anonymity flag.
///
/// The query matches against content or author name.
pub fn public_feed(posts: &[Post], query: Option<&str>) -> Vec<Post> {
    posts
        .iter()
        .filter(|p| p.community_id.is_none() && !p.is_anonymous)
        .filter(|p| match query {
            Some(q) => matches_query(&p.content, q) || matches_query(&p.author_name, q),
            None => true,
        })
        .cloned()
        .collect()
}

/// Community-scoped posts, optionally narrowed to a single community.
///
/// Anonymous posts are excluded so the three projections stay disjoint.
pub fn community_feed(
    posts: &[Post],
    community_id: Option<&str>,
    query: Option<&str>,
) -> Vec<Post> {
    posts
        .iter()
        .filter(|p| p.community_id.is_some() && !p.is_anonymous)
        .filter(|p| match community_id {
            Some(id) => p.community_id.as_deref() == Some(id),
            None => true,
        })
        .filter(|p| match query {
            Some(q) => matches_query(&p.content, q),
            None => true,
        })
        .cloned()
        .collect()
}

/// Posts flagged anonymous.
pub fn anonymous_feed(posts: &[Post], query: Option<&str>) -> Vec<Post> {
    posts
        .iter()
        .filter(|p| p.is_anonymous)
        .filter(|p| match query {
            Some(q) => matches_query(&p.content, q),
            None => true,
        })
        .cloned()
        .collect()
}
