//! # SelectionStore — durable slot for the current organization
//!
//! The only thing this client persists is which organization the user was
//! last operating in. [`SelectionStore`] is the async interface over that
//! single slot: `save` serializes the full [`Organization`] record so it can
//! be restored on the next launch without a round trip to the backing
//! dataset, and `load` hands it back, or `None` when nothing usable is
//! stored.
//!
//! `load` must fail soft: a missing or corrupt slot is indistinguishable
//! from "no selection yet" and must never abort startup.
//!
//! Implementations live in sibling modules ([`crate::memory`],
//! [`crate::file_store`]).

use crate::models::Organization;

/// Async trait for persisting the current-organization selection.
pub trait SelectionStore {
    fn save(
        &self,
        organization: &Organization,
    ) -> impl std::future::Future<Output = ()>;
    fn load(&self) -> impl std::future::Future<Output = Option<Organization>>;
}
