//! Top-level routing over the two state layers.
//!
//! Strict precedence: an unauthenticated user routes to sign-in before
//! anything else, a missing current organization routes to organization
//! selection, and only then does the main layout render.

use store::Organization;

use crate::auth::AuthState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Auth state not resolved yet; show nothing actionable.
    Loading,
    SignIn,
    SelectOrganization,
    Main,
}

impl Route {
    pub fn decide(auth: &AuthState, current_organization: Option<&Organization>) -> Self {
        if auth.loading {
            return Self::Loading;
        }
        if auth.user.is_none() {
            return Self::SignIn;
        }
        if current_organization.is_none() {
            return Self::SelectOrganization;
        }
        Self::Main
    }
}
