//! # Directory — the backing dataset behind the organization store
//!
//! The store never owns the full universe of organizations, communities and
//! posts; it queries them through the [`Directory`] trait, the stand-in for a
//! remote data source. Keeping it a trait lets tests inject an empty or
//! hand-built dataset and keeps every store operation honestly asynchronous
//! without hardcoded latency.
//!
//! [`SeedDirectory`] is the bundled implementation: a fixed dataset of two
//! organizations, two communities and three posts that simulates the backend
//! this client would normally talk to.

use chrono::{DateTime, Utc};

use crate::models::{Community, Organization, Post};

/// Async read interface over the full membership dataset.
pub trait Directory {
    /// Every organization in the dataset.
    fn organizations(&self) -> impl std::future::Future<Output = Vec<Organization>>;
    /// Look up one organization by its slug.
    fn find_organization(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Option<Organization>>;
    /// Communities belonging to one organization.
    fn communities_in(
        &self,
        organization_id: &str,
    ) -> impl std::future::Future<Output = Vec<Community>>;
    /// Posts belonging to one organization.
    fn posts_in(&self, organization_id: &str) -> impl std::future::Future<Output = Vec<Post>>;
}

/// Fixed in-memory dataset standing in for a remote backend.
#[derive(Clone, Debug, Default)]
pub struct SeedDirectory {
    organizations: Vec<Organization>,
    communities: Vec<Community>,
    posts: Vec<Post>,
}

fn seed_time(rfc3339: &str) -> DateTime<Utc> {
    rfc3339.parse().unwrap_or_default()
}

impl SeedDirectory {
    /// A directory with nothing in it.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A directory over a caller-supplied dataset.
    pub fn new(
        organizations: Vec<Organization>,
        communities: Vec<Community>,
        posts: Vec<Post>,
    ) -> Self {
        Self {
            organizations,
            communities,
            posts,
        }
    }

    /// The bundled sample dataset.
    pub fn sample() -> Self {
        let organizations = vec![
            Organization {
                id: "tech-corp".to_string(),
                name: "Tech Corp".to_string(),
                description: "Leading technology company focused on innovation".to_string(),
                created_by: "1".to_string(),
                members: vec!["1".to_string(), "2".to_string(), "3".to_string()],
                admins: vec!["1".to_string()],
                created_at: seed_time("2024-01-01T00:00:00Z"),
            },
            Organization {
                id: "design-studio".to_string(),
                name: "Design Studio".to_string(),
                description: "Creative design agency specializing in digital experiences"
                    .to_string(),
                created_by: "1".to_string(),
                members: vec!["1".to_string(), "4".to_string(), "5".to_string()],
                admins: vec!["1".to_string()],
                created_at: seed_time("2024-02-01T00:00:00Z"),
            },
        ];

        let communities = vec![
            Community {
                id: "dev-team".to_string(),
                name: "Development Team".to_string(),
                description: "Internal discussions for the development team".to_string(),
                organization_id: "tech-corp".to_string(),
                members: vec!["1".to_string(), "2".to_string()],
                created_by: "1".to_string(),
                is_private: true,
                created_at: seed_time("2024-01-15T00:00:00Z"),
            },
            Community {
                id: "design-team".to_string(),
                name: "Design Team".to_string(),
                description: "Creative discussions and feedback".to_string(),
                organization_id: "tech-corp".to_string(),
                members: vec!["1".to_string(), "3".to_string()],
                created_by: "1".to_string(),
                is_private: false,
                created_at: seed_time("2024-01-20T00:00:00Z"),
            },
        ];

        let posts = vec![
            Post {
                id: "1".to_string(),
                content: "Excited to announce our new product launch! We've been working hard \
                          on this for months."
                    .to_string(),
                images: vec!["https://images.example/launch.jpg".to_string()],
                author_id: "1".to_string(),
                author_name: "John Doe".to_string(),
                author_avatar: Some("https://images.example/avatars/john.jpg".to_string()),
                organization_id: "tech-corp".to_string(),
                community_id: None,
                is_anonymous: false,
                created_at: seed_time("2024-03-15T10:30:00Z"),
                likes: 24,
                comments: 8,
            },
            Post {
                id: "2".to_string(),
                content: "Great team meeting today! Looking forward to implementing the new \
                          features discussed."
                    .to_string(),
                images: Vec::new(),
                author_id: "2".to_string(),
                author_name: "Jane Smith".to_string(),
                author_avatar: Some("https://images.example/avatars/jane.jpg".to_string()),
                organization_id: "tech-corp".to_string(),
                community_id: Some("dev-team".to_string()),
                is_anonymous: false,
                created_at: seed_time("2024-03-14T15:45:00Z"),
                likes: 12,
                comments: 3,
            },
            Post {
                id: "3".to_string(),
                content: "Anonymous feedback: The new office layout is much better for \
                          collaboration."
                    .to_string(),
                images: Vec::new(),
                author_id: "3".to_string(),
                author_name: "Anonymous".to_string(),
                author_avatar: None,
                organization_id: "tech-corp".to_string(),
                community_id: None,
                is_anonymous: true,
                created_at: seed_time("2024-03-13T09:15:00Z"),
                likes: 18,
                comments: 5,
            },
        ];

        Self::new(organizations, communities, posts)
    }
}

impl Directory for SeedDirectory {
    async fn organizations(&self) -> Vec<Organization> {
        self.organizations.clone()
    }

    async fn find_organization(&self, id: &str) -> Option<Organization> {
        self.organizations.iter().find(|o| o.id == id).cloned()
    }

    async fn communities_in(&self, organization_id: &str) -> Vec<Community> {
        self.communities
            .iter()
            .filter(|c| c.organization_id == organization_id)
            .cloned()
            .collect()
    }

    async fn posts_in(&self, organization_id: &str) -> Vec<Post> {
        self.posts
            .iter()
            .filter(|p| p.organization_id == organization_id)
            .cloned()
            .collect()
    }
}
