//! Error types for store mutations.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("organization not found: {org_id}")]
    NotFound { org_id: String },

    #[error("already a member of organization: {org_id}")]
    AlreadyMember { org_id: String },

    #[error("organization id already taken: {org_id}")]
    IdTaken { org_id: String },

    #[error("invalid request: {reason}")]
    InvalidRequest { reason: String },
}

pub type StoreResult<T> = Result<T, StoreError>;
