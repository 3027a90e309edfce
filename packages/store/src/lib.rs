pub mod directory;
pub mod error;
pub mod feed;
pub mod models;
pub mod org;
pub mod selection;

mod file_store;
pub use file_store::FileSelection;

mod memory;
pub use memory::MemorySelection;

pub use directory::{Directory, SeedDirectory};
pub use error::{StoreError, StoreResult};
pub use models::{
    Community, CreateCommunityRequest, CreateOrganizationRequest, CreatePostRequest, Organization,
    Post, User,
};
pub use org::OrganizationStore;
pub use selection::SelectionStore;
