//! # OrganizationStore — the authoritative organization state
//!
//! This module is the core of Huddle's data layer. [`OrganizationStore`]
//! owns the live view of the current organization: which organizations the
//! user belongs to, the communities and posts scoped to the current one, and
//! the persisted current-organization selection. All reads and writes go
//! through it; presentational collaborators receive cloned snapshots and
//! route every mutation through the operations below.
//!
//! Both collaborators are injected: a [`Directory`] standing in for the
//! remote dataset and a [`SelectionStore`] for the durable selection slot,
//! so a test can build a fresh store around an in-memory pair.
//!
//! ## Operations
//!
//! | Method | Description |
//! |--------|-------------|
//! | [`initialize`](OrganizationStore::initialize) | Restores the persisted selection and populates the scoped collections; leaves everything empty when nothing is stored. |
//! | [`switch_organization`](OrganizationStore::switch_organization) | Makes an organization current, persists the choice, refilters communities and posts. Cannot fail. |
//! | [`join_organization`](OrganizationStore::join_organization) | Looks the slug up in the directory, appends it to the membership list and switches to it. `NotFound` on an unknown slug, `AlreadyMember` on a duplicate; state is untouched on failure. |
//! | [`create_organization`](OrganizationStore::create_organization) | Builds an organization owned by the acting user and switches to it. `IdTaken` when the slug collides. |
//! | [`create_community`](OrganizationStore::create_community) | Appends a community scoped to the current organization. Silently a no-op without one. |
//! | [`create_post`](OrganizationStore::create_post) | Prepends a post, keeping the collection most-recent-first. Anonymous posts get the fixed anonymous author snapshot. Silently a no-op without a current organization. |
//!
//! ## Busy flag and serialization
//!
//! `is_loading` is one global flag covering every mutation, set for the whole
//! operation and always cleared on exit. Consumers are expected to disable
//! their triggering controls while it is set; on top of that, mutations
//! serialize through a single-slot async mutex so two overlapping calls can
//! never interleave their state updates.

use std::sync::Mutex;

use chrono::Utc;

use crate::directory::Directory;
use crate::error::{StoreError, StoreResult};
use crate::feed;
use crate::models::{
    Community, CreateCommunityRequest, CreateOrganizationRequest, CreatePostRequest, Organization,
    Post, User, ANONYMOUS_AUTHOR_ID, ANONYMOUS_AUTHOR_NAME,
};
use crate::selection::SelectionStore;

#[derive(Debug, Default)]
struct State {
    current_organization: Option<Organization>,
    user_organizations: Vec<Organization>,
    communities: Vec<Community>,
    posts: Vec<Post>,
    is_loading: bool,
}

/// Clears `is_loading` on every exit path, including early error returns.
struct BusyGuard<'a> {
    state: &'a Mutex<State>,
}

impl<'a> BusyGuard<'a> {
    fn engage(state: &'a Mutex<State>) -> Self {
        state.lock().unwrap().is_loading = true;
        Self { state }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.state.lock().unwrap().is_loading = false;
    }
}

/// The organization data layer, generic over its two backends.
pub struct OrganizationStore<D: Directory, S: SelectionStore> {
    directory: D,
    selection: S,
    /// Acting-user snapshot from the auth collaborator; stamped onto
    /// everything the user creates.
    user: User,
    state: Mutex<State>,
    /// Single-slot mutation queue. One mutation runs at a time; callers
    /// behind it wait their turn instead of interleaving.
    op_gate: tokio::sync::Mutex<()>,
}

impl<D: Directory, S: SelectionStore> OrganizationStore<D, S> {
    pub fn new(directory: D, selection: S, user: User) -> Self {
        Self {
            directory,
            selection,
            user,
            state: Mutex::new(State::default()),
            op_gate: tokio::sync::Mutex::new(()),
        }
    }

    /// Restore the persisted selection, if any.
    ///
    /// On a hit the membership list comes from the directory and the scoped
    /// collections are filtered to the restored organization. On a miss all
    /// collections stay empty and `current_organization` stays unset, which
    /// is the signal consumers use to route to organization selection.
    pub async fn initialize(&self) {
        let Some(organization) = self.selection.load().await else {
            tracing::debug!("no persisted organization selection");
            return;
        };
        tracing::info!(organization = %organization.id, "restored organization selection");

        let user_organizations = self.directory.organizations().await;
        let communities = self.directory.communities_in(&organization.id).await;
        let posts = self.directory.posts_in(&organization.id).await;

        let mut state = self.state.lock().unwrap();
        state.user_organizations = user_organizations;
        state.communities = communities;
        state.posts = posts;
        state.current_organization = Some(organization);
    }

    // ---- reads -----------------------------------------------------------

    pub fn current_organization(&self) -> Option<Organization> {
        self.state.lock().unwrap().current_organization.clone()
    }

    pub fn user_organizations(&self) -> Vec<Organization> {
        self.state.lock().unwrap().user_organizations.clone()
    }

    pub fn communities(&self) -> Vec<Community> {
        self.state.lock().unwrap().communities.clone()
    }

    pub fn posts(&self) -> Vec<Post> {
        self.state.lock().unwrap().posts.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().unwrap().is_loading
    }

    /// Public feed over the current posts; see [`feed::public_feed`].
    pub fn public_feed(&self, query: Option<&str>) -> Vec<Post> {
        feed::public_feed(&self.state.lock().unwrap().posts, query)
    }

    /// Community feed over the current posts; see [`feed::community_feed`].
    pub fn community_feed(&self, community_id: Option<&str>, query: Option<&str>) -> Vec<Post> {
        feed::community_feed(&self.state.lock().unwrap().posts, community_id, query)
    }

    /// Anonymous feed over the current posts; see [`feed::anonymous_feed`].
    pub fn anonymous_feed(&self, query: Option<&str>) -> Vec<Post> {
        feed::anonymous_feed(&self.state.lock().unwrap().posts, query)
    }

    // ---- mutations -------------------------------------------------------

    /// Make `organization` current. The input is assumed to already be one
    /// of the user's organizations, so there is no failure mode.
    pub async fn switch_organization(&self, organization: Organization) {
        let _op = self.op_gate.lock().await;
        self.apply_switch(organization).await;
    }

    /// Join an existing organization by slug and switch to it.
    pub async fn join_organization(&self, org_id: &str) -> StoreResult<()> {
        let _op = self.op_gate.lock().await;
        let _busy = BusyGuard::engage(&self.state);

        let already_member = self
            .state
            .lock()
            .unwrap()
            .user_organizations
            .iter()
            .any(|o| o.id == org_id);
        if already_member {
            return Err(StoreError::AlreadyMember {
                org_id: org_id.to_string(),
            });
        }

        let Some(organization) = self.directory.find_organization(org_id).await else {
            tracing::warn!(organization = %org_id, "join failed: organization not found");
            return Err(StoreError::NotFound {
                org_id: org_id.to_string(),
            });
        };

        self.state
            .lock()
            .unwrap()
            .user_organizations
            .push(organization.clone());
        self.apply_switch(organization).await;
        Ok(())
    }

    /// Create a new organization owned by the acting user and switch to it.
    pub async fn create_organization(
        &self,
        request: CreateOrganizationRequest,
    ) -> StoreResult<()> {
        let _op = self.op_gate.lock().await;
        let _busy = BusyGuard::engage(&self.state);

        let taken_locally = self
            .state
            .lock()
            .unwrap()
            .user_organizations
            .iter()
            .any(|o| o.id == request.id);
        if taken_locally || self.directory.find_organization(&request.id).await.is_some() {
            return Err(StoreError::IdTaken { org_id: request.id });
        }

        let organization =
            Organization::founded_by(&request.id, &request.name, &request.description, &self.user);
        tracing::info!(organization = %organization.id, "created organization");

        self.state
            .lock()
            .unwrap()
            .user_organizations
            .push(organization.clone());
        self.apply_switch(organization).await;
        Ok(())
    }

    /// Create a community in the current organization. Without a current
    /// organization this silently returns.
    pub async fn create_community(&self, request: CreateCommunityRequest) -> StoreResult<()> {
        let _op = self.op_gate.lock().await;
        let Some(current) = self.current_organization() else {
            return Ok(());
        };
        let _busy = BusyGuard::engage(&self.state);

        let community = Community {
            id: timestamp_id(),
            name: request.name,
            description: request.description,
            organization_id: current.id,
            members: vec![self.user.id.clone()],
            created_by: self.user.id.clone(),
            is_private: request.is_private,
            created_at: Utc::now(),
        };
        tracing::debug!(community = %community.id, "created community");

        self.state.lock().unwrap().communities.push(community);
        Ok(())
    }

    /// Create a post in the current organization. Without a current
    /// organization this silently returns.
    pub async fn create_post(&self, request: CreatePostRequest) -> StoreResult<()> {
        let _op = self.op_gate.lock().await;
        let Some(current) = self.current_organization() else {
            return Ok(());
        };
        request.validate()?;
        let _busy = BusyGuard::engage(&self.state);

        // True anonymity: the stored author snapshot is replaced outright,
        // not merely masked at render time.
        let (author_id, author_name, author_avatar) = if request.is_anonymous {
            (
                ANONYMOUS_AUTHOR_ID.to_string(),
                ANONYMOUS_AUTHOR_NAME.to_string(),
                None,
            )
        } else {
            (
                self.user.id.clone(),
                self.user.name.clone(),
                self.user.avatar.clone(),
            )
        };

        let post = Post {
            id: timestamp_id(),
            content: request.content,
            images: request.images,
            author_id,
            author_name,
            author_avatar,
            organization_id: current.id,
            community_id: request.community_id,
            is_anonymous: request.is_anonymous,
            created_at: Utc::now(),
            likes: 0,
            comments: 0,
        };
        tracing::debug!(post = %post.id, anonymous = post.is_anonymous, "created post");

        // Most-recent-first: new posts always land at index 0.
        self.state.lock().unwrap().posts.insert(0, post);
        Ok(())
    }

    /// Persist the selection and refilter the scoped collections. The whole
    /// snapshot is replaced in one step, so readers never observe a
    /// half-updated view.
    async fn apply_switch(&self, organization: Organization) {
        self.selection.save(&organization).await;
        let communities = self.directory.communities_in(&organization.id).await;
        let posts = self.directory.posts_in(&organization.id).await;
        tracing::info!(organization = %organization.id, "switched organization");

        let mut state = self.state.lock().unwrap();
        state.communities = communities;
        state.posts = posts;
        state.current_organization = Some(organization);
    }
}

/// Millisecond-timestamp id, monotonic enough for a single client.
fn timestamp_id() -> String {
    Utc::now().timestamp_millis().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::SeedDirectory;
    use crate::memory::MemorySelection;

    fn acting_user() -> User {
        User {
            id: "1".to_string(),
            email: "john@techcorp.example".to_string(),
            name: "John Doe".to_string(),
            nickname: None,
            username: Some("john".to_string()),
            avatar: Some("https://images.example/avatars/john.jpg".to_string()),
        }
    }

    fn fresh_store(
        directory: SeedDirectory,
    ) -> OrganizationStore<SeedDirectory, MemorySelection> {
        OrganizationStore::new(directory, MemorySelection::new(), acting_user())
    }

    fn post_request(content: &str) -> CreatePostRequest {
        CreatePostRequest {
            content: content.to_string(),
            ..CreatePostRequest::default()
        }
    }

    #[tokio::test]
    async fn test_initialize_without_selection_leaves_state_empty() {
        let store = fresh_store(SeedDirectory::sample());
        store.initialize().await;

        assert!(store.current_organization().is_none());
        assert!(store.user_organizations().is_empty());
        assert!(store.communities().is_empty());
        assert!(store.posts().is_empty());
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_initialize_restores_persisted_selection() {
        let directory = SeedDirectory::sample();
        let selection = MemorySelection::new();
        let org = directory.find_organization("tech-corp").await.unwrap();
        selection.save(&org).await;

        let store = OrganizationStore::new(directory, selection, acting_user());
        store.initialize().await;

        assert_eq!(store.current_organization().unwrap().id, "tech-corp");
        assert_eq!(store.user_organizations().len(), 2);
        assert_eq!(store.communities().len(), 2);
        assert_eq!(store.posts().len(), 3);
    }

    #[tokio::test]
    async fn test_join_switches_and_persists() {
        let store = fresh_store(SeedDirectory::sample());

        store.join_organization("tech-corp").await.unwrap();

        assert_eq!(store.current_organization().unwrap().id, "tech-corp");
        assert_eq!(store.user_organizations().len(), 1);
        assert_eq!(store.communities().len(), 2);
        assert_eq!(store.posts().len(), 3);
        assert_eq!(store.selection.load().await.unwrap().id, "tech-corp");
    }

    #[tokio::test]
    async fn test_join_unknown_slug_leaves_state_untouched() {
        let store = fresh_store(SeedDirectory::sample());

        let err = store.join_organization("nonexistent-id").await.unwrap_err();

        assert!(matches!(err, StoreError::NotFound { .. }));
        assert!(store.current_organization().is_none());
        assert!(store.user_organizations().is_empty());
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_join_twice_rejects_duplicate_membership() {
        let store = fresh_store(SeedDirectory::sample());

        store.join_organization("tech-corp").await.unwrap();
        let err = store.join_organization("tech-corp").await.unwrap_err();

        assert!(matches!(err, StoreError::AlreadyMember { .. }));
        assert_eq!(store.user_organizations().len(), 1);
    }

    #[tokio::test]
    async fn test_create_organization_from_empty_state() {
        let store = fresh_store(SeedDirectory::empty());

        store
            .create_organization(CreateOrganizationRequest {
                id: "acme".to_string(),
                name: "Acme Inc".to_string(),
                description: "desc".to_string(),
            })
            .await
            .unwrap();

        let current = store.current_organization().unwrap();
        assert_eq!(current.id, "acme");
        assert_eq!(current.created_by, "1");
        assert_eq!(current.members, vec!["1".to_string()]);
        assert_eq!(current.admins, vec!["1".to_string()]);
        assert_eq!(store.user_organizations().len(), 1);
        assert!(store.communities().is_empty());
        assert!(store.posts().is_empty());
    }

    #[tokio::test]
    async fn test_create_organization_rejects_taken_slug() {
        let store = fresh_store(SeedDirectory::sample());

        let err = store
            .create_organization(CreateOrganizationRequest {
                id: "tech-corp".to_string(),
                name: "Impostor Corp".to_string(),
                description: "".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::IdTaken { .. }));
        assert!(store.current_organization().is_none());
    }

    #[tokio::test]
    async fn test_public_post_lands_in_public_feed_only() {
        let store = fresh_store(SeedDirectory::empty());
        store
            .create_organization(CreateOrganizationRequest {
                id: "acme".to_string(),
                name: "Acme Inc".to_string(),
                description: "desc".to_string(),
            })
            .await
            .unwrap();

        store.create_post(post_request("hello")).await.unwrap();

        let posts = store.posts();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].content, "hello");
        assert!(posts[0].community_id.is_none());
        assert!(!posts[0].is_anonymous);
        assert_eq!(posts[0].likes, 0);
        assert_eq!(posts[0].comments, 0);

        assert_eq!(store.public_feed(None).len(), 1);
        assert!(store.community_feed(None, None).is_empty());
        assert!(store.anonymous_feed(None).is_empty());
    }

    #[tokio::test]
    async fn test_posts_stay_most_recent_first() {
        let store = fresh_store(SeedDirectory::empty());
        store
            .create_organization(CreateOrganizationRequest {
                id: "acme".to_string(),
                name: "Acme Inc".to_string(),
                description: "desc".to_string(),
            })
            .await
            .unwrap();

        for content in ["first", "second", "third"] {
            store.create_post(post_request(content)).await.unwrap();
        }

        let posts = store.posts();
        assert_eq!(posts[0].content, "third");
        assert_eq!(posts[2].content, "first");
        assert!(posts.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    }

    #[tokio::test]
    async fn test_anonymous_post_erases_author_snapshot() {
        let store = fresh_store(SeedDirectory::empty());
        store
            .create_organization(CreateOrganizationRequest {
                id: "acme".to_string(),
                name: "Acme Inc".to_string(),
                description: "desc".to_string(),
            })
            .await
            .unwrap();

        store
            .create_post(CreatePostRequest {
                content: "candid feedback".to_string(),
                is_anonymous: true,
                ..CreatePostRequest::default()
            })
            .await
            .unwrap();

        let posts = store.posts();
        assert_eq!(posts[0].author_id, ANONYMOUS_AUTHOR_ID);
        assert_eq!(posts[0].author_name, ANONYMOUS_AUTHOR_NAME);
        assert!(posts[0].author_avatar.is_none());
        assert_eq!(store.anonymous_feed(None).len(), 1);
    }

    #[tokio::test]
    async fn test_create_post_without_organization_is_a_noop() {
        let store = fresh_store(SeedDirectory::sample());

        store.create_post(post_request("shouting into the void")).await.unwrap();

        assert!(store.posts().is_empty());
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_create_community_scopes_to_current_organization() {
        let store = fresh_store(SeedDirectory::sample());

        // no current organization: silent no-op
        store
            .create_community(CreateCommunityRequest {
                name: "Book Club".to_string(),
                description: "Monthly reads".to_string(),
                is_private: false,
            })
            .await
            .unwrap();
        assert!(store.communities().is_empty());

        store.join_organization("tech-corp").await.unwrap();
        store
            .create_community(CreateCommunityRequest {
                name: "Book Club".to_string(),
                description: "Monthly reads".to_string(),
                is_private: true,
            })
            .await
            .unwrap();

        let communities = store.communities();
        assert_eq!(communities.len(), 3);
        let club = communities.last().unwrap();
        assert_eq!(club.organization_id, "tech-corp");
        assert_eq!(club.members, vec!["1".to_string()]);
        assert!(club.is_private);
    }

    #[tokio::test]
    async fn test_switch_refilters_and_persists() {
        let directory = SeedDirectory::sample();
        let store = fresh_store(directory.clone());
        store.join_organization("tech-corp").await.unwrap();
        assert_eq!(store.posts().len(), 3);

        let studio = directory.find_organization("design-studio").await.unwrap();
        store.switch_organization(studio).await;

        assert_eq!(store.current_organization().unwrap().id, "design-studio");
        assert!(store.communities().is_empty());
        assert!(store.posts().is_empty());
        assert_eq!(store.selection.load().await.unwrap().id, "design-studio");
    }

    #[tokio::test]
    async fn test_overlapping_joins_serialize() {
        let store = fresh_store(SeedDirectory::sample());

        let (a, b) = tokio::join!(
            store.join_organization("tech-corp"),
            store.join_organization("tech-corp"),
        );

        // exactly one of the two wins; the other sees the membership
        assert!(a.is_ok() != b.is_ok());
        assert_eq!(store.user_organizations().len(), 1);

        let (c, d) = tokio::join!(
            store.join_organization("design-studio"),
            store.join_organization("design-studio"),
        );
        assert!(c.is_ok() != d.is_ok());
        assert_eq!(store.user_organizations().len(), 2);
    }

    #[tokio::test]
    async fn test_invalid_post_request_keeps_busy_flag_clear() {
        let store = fresh_store(SeedDirectory::sample());
        store.join_organization("tech-corp").await.unwrap();

        let err = store.create_post(post_request("   ")).await.unwrap_err();

        assert!(matches!(err, StoreError::InvalidRequest { .. }));
        assert_eq!(store.posts().len(), 3);
        assert!(!store.is_loading());
    }
}
