//! # Domain models for organizations, communities and posts
//!
//! Defines the value types held by [`crate::OrganizationStore`] and handed out
//! to consumers as read-only snapshots. These types are `Serialize +
//! Deserialize` so the current-organization selection can round-trip through a
//! [`crate::SelectionStore`] without loss.
//!
//! ## Types
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`User`] | An authenticated identity. Immutable after registration; the store only reads it to stamp authorship onto created entities. |
//! | [`Organization`] | The top-level tenant. Its `id` is a URL-safe slug used as the join key. `created_by` is always the first admin, and `admins` is a subset of `members`. |
//! | [`Community`] | A sub-group scoped to exactly one organization, never reparented. `is_private` gates visibility in the presentation layer only. |
//! | [`Post`] | A content item. Author fields are a snapshot taken at creation time, not a live join; for anonymous posts they hold the fixed anonymous identity. |
//!
//! ## Request structs
//!
//! Each mutation on the store takes an explicit request struct
//! ([`CreateOrganizationRequest`], [`CreateCommunityRequest`],
//! [`CreatePostRequest`]) rather than a bag of loose parameters. Structural
//! checks the type system cannot express (non-empty content, image cap) live
//! on the request; everything else is the presentation layer's job.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// Author id stamped onto anonymous posts in place of the acting user.
pub const ANONYMOUS_AUTHOR_ID: &str = "anonymous";

/// Display name stamped onto anonymous posts.
pub const ANONYMOUS_AUTHOR_NAME: &str = "Anonymous";

/// Maximum number of image attachments on a single post.
pub const MAX_POST_IMAGES: usize = 4;

/// An authenticated user identity, as provided by the auth collaborator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub nickname: Option<String>,
    pub username: Option<String>,
    /// Avatar image URI.
    pub avatar: Option<String>,
}

/// A named top-level tenant grouping users, communities and posts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    /// URL-safe slug, unique across organizations: "tech-corp"
    pub id: String,
    pub name: String,
    pub description: String,
    /// User id of the creator; always present in `admins`.
    pub created_by: String,
    /// User ids of all members, `created_by` included.
    pub members: Vec<String>,
    /// User ids with admin rights; non-empty subset of `members`.
    pub admins: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Organization {
    /// Build a fresh organization owned entirely by `creator`.
    pub fn founded_by(id: &str, name: &str, description: &str, creator: &User) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            created_by: creator.id.clone(),
            members: vec![creator.id.clone()],
            admins: vec![creator.id.clone()],
            created_at: Utc::now(),
        }
    }
}

/// A private or public sub-group within one organization.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Community {
    /// Unique within the owning organization.
    pub id: String,
    pub name: String,
    pub description: String,
    /// Owning organization; immutable for the community's lifetime.
    pub organization_id: String,
    pub members: Vec<String>,
    pub created_by: String,
    /// Visibility gate enforced by the presentation layer.
    pub is_private: bool,
    pub created_at: DateTime<Utc>,
}

/// A content item scoped to public, community or anonymous visibility.
///
/// Visibility is derived from two independent flags rather than a single tag:
/// no `community_id` and not anonymous means the public feed, a `community_id`
/// means the community feed, and `is_anonymous` means the anonymous feed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub content: String,
    /// Ordered image URIs, at most [`MAX_POST_IMAGES`].
    pub images: Vec<String>,
    /// Snapshot of the author at creation time. For anonymous posts this is
    /// the fixed anonymous identity, so it is deliberately not trustworthy.
    pub author_id: String,
    pub author_name: String,
    pub author_avatar: Option<String>,
    pub organization_id: String,
    /// When present, the post belongs to that community's feed.
    pub community_id: Option<String>,
    pub is_anonymous: bool,
    pub created_at: DateTime<Utc>,
    pub likes: u32,
    pub comments: u32,
}

/// Fields required to create a new organization.
#[derive(Clone, Debug, PartialEq)]
pub struct CreateOrganizationRequest {
    /// Caller-chosen URL-safe slug.
    pub id: String,
    pub name: String,
    pub description: String,
}

/// Fields required to create a community in the current organization.
#[derive(Clone, Debug, PartialEq)]
pub struct CreateCommunityRequest {
    pub name: String,
    pub description: String,
    pub is_private: bool,
}

/// Fields required to create a post in the current organization.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CreatePostRequest {
    pub content: String,
    pub images: Vec<String>,
    /// Scope the post to a community feed instead of the public feed.
    pub community_id: Option<String>,
    /// Replace the author snapshot with the fixed anonymous identity.
    pub is_anonymous: bool,
}

impl CreatePostRequest {
    /// Structural checks only; semantic validation stays with the caller.
    pub fn validate(&self) -> StoreResult<()> {
        if self.content.trim().is_empty() {
            return Err(StoreError::InvalidRequest {
                reason: "post content must not be empty".to_string(),
            });
        }
        if self.images.len() > MAX_POST_IMAGES {
            return Err(StoreError::InvalidRequest {
                reason: format!("a post carries at most {MAX_POST_IMAGES} images"),
            });
        }
        Ok(())
    }
}
