//! Headless walkthrough of the organization data layer.
//!
//! Stands in for the presentational shell: resolves auth, restores the
//! persisted organization selection, routes with the usual precedence
//! (sign-in, then organization selection, then main), and exercises the
//! store's consumer contract against the seed dataset.

use store::{
    CreateCommunityRequest, CreatePostRequest, FileSelection, OrganizationStore, SeedDirectory,
};

use auth::AuthState;
use routing::Route;
use settings::Settings;

mod auth;
mod routing;
mod settings;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let settings = Settings::new().unwrap_or_default();
    let auth = AuthState::signed_in(auth::demo_user());
    let Some(user) = auth.user.clone() else {
        tracing::info!("not signed in; routing to sign-in");
        return;
    };

    let selection = FileSelection::new(settings.data_dir());
    let store = OrganizationStore::new(SeedDirectory::sample(), selection, user);
    store.initialize().await;

    match Route::decide(&auth, store.current_organization().as_ref()) {
        Route::Loading | Route::SignIn => {
            tracing::info!("not signed in; routing to sign-in");
            return;
        }
        Route::SelectOrganization => {
            tracing::info!("no current organization; joining tech-corp");
            if let Err(e) = store.join_organization("tech-corp").await {
                tracing::warn!("join failed: {}", e);
                return;
            }
        }
        Route::Main => {}
    }

    let current = match store.current_organization() {
        Some(org) => org,
        None => return,
    };
    tracing::info!(
        organization = %current.id,
        members = current.members.len(),
        "entering main layout"
    );

    if let Err(e) = store
        .create_community(CreateCommunityRequest {
            name: "Water Cooler".to_string(),
            description: "Off-topic chatter".to_string(),
            is_private: false,
        })
        .await
    {
        tracing::warn!("create community failed: {}", e);
    }

    if let Err(e) = store
        .create_post(CreatePostRequest {
            content: "Checking in from the demo shell.".to_string(),
            ..CreatePostRequest::default()
        })
        .await
    {
        tracing::warn!("create post failed: {}", e);
    }

    tracing::info!(
        public = store.public_feed(None).len(),
        community = store.community_feed(None, None).len(),
        anonymous = store.anonymous_feed(None).len(),
        communities = store.communities().len(),
        "feed snapshot"
    );
}
