//! Authentication collaborator stub.
//!
//! The data layer only consumes the acting-user snapshot; session handling,
//! credential checks and input validation all belong to the real auth layer.

use store::User;

/// Authentication state as seen by the routing layer.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }
}

impl AuthState {
    pub fn signed_in(user: User) -> Self {
        Self {
            user: Some(user),
            loading: false,
        }
    }

    pub fn signed_out() -> Self {
        Self {
            user: None,
            loading: false,
        }
    }

    /// Session teardown. The organization store does not react to this;
    /// the consumer simply routes back to sign-in.
    pub fn logout(&mut self) {
        self.user = None;
    }
}

/// The demo identity matching the seed dataset's primary author.
pub fn demo_user() -> User {
    User {
        id: "1".to_string(),
        email: "john@techcorp.example".to_string(),
        name: "John Doe".to_string(),
        nickname: None,
        username: Some("john".to_string()),
        avatar: Some("https://images.example/avatars/john.jpg".to_string()),
    }
}
