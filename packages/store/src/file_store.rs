//! # Filesystem-backed selection store
//!
//! [`FileSelection`] is a [`SelectionStore`] that persists the current
//! organization as a single JSON file, so the selection survives app
//! restarts on the same device. There is no cross-device sync.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! └── current_organization.json    # full serialized Organization record
//! ```
//!
//! Callers obtain a platform-appropriate base via [`dirs::data_dir()`]:
//!
//! | Platform | Path |
//! |----------|------|
//! | macOS | `~/Library/Application Support/huddle/` |
//! | Linux | `~/.local/share/huddle/` |
//! | Windows | `C:\Users\<user>\AppData\Roaming\huddle\` |
//!
//! [`dirs::data_dir()`]: https://docs.rs/dirs

use std::path::PathBuf;

use crate::models::Organization;
use crate::selection::SelectionStore;

const SELECTION_FILE: &str = "current_organization.json";

/// Filesystem-backed SelectionStore for desktop persistence.
#[derive(Clone, Debug)]
pub struct FileSelection {
    base: PathBuf,
}

impl FileSelection {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    fn slot_path(&self) -> PathBuf {
        self.base.join(SELECTION_FILE)
    }

    /// Remove the persisted selection, if any.
    pub fn clear(&self) {
        let _ = std::fs::remove_file(self.slot_path());
    }
}

impl SelectionStore for FileSelection {
    async fn save(&self, organization: &Organization) {
        let raw = match serde_json::to_string_pretty(organization) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("failed to serialize organization selection: {}", e);
                return;
            }
        };
        let _ = std::fs::create_dir_all(&self.base);
        if let Err(e) = std::fs::write(self.slot_path(), raw) {
            tracing::warn!("failed to persist organization selection: {}", e);
        }
    }

    async fn load(&self) -> Option<Organization> {
        let raw = std::fs::read_to_string(self.slot_path()).ok()?;
        serde_json::from_str(&raw).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::{Directory, SeedDirectory};

    fn scratch_dir(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("huddle_test_{}_{}", tag, std::process::id()))
    }

    #[tokio::test]
    async fn test_selection_survives_reopen() {
        let dir = scratch_dir("reopen");
        let _ = std::fs::remove_dir_all(&dir);

        let org = SeedDirectory::sample()
            .find_organization("design-studio")
            .await
            .unwrap();
        FileSelection::new(dir.clone()).save(&org).await;

        // Re-open from the same directory
        let loaded = FileSelection::new(dir.clone()).load().await.unwrap();
        assert_eq!(loaded, org);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_missing_slot_loads_none() {
        let dir = scratch_dir("missing");
        let _ = std::fs::remove_dir_all(&dir);

        assert!(FileSelection::new(dir).load().await.is_none());
    }

    #[tokio::test]
    async fn test_corrupt_slot_loads_none() {
        let dir = scratch_dir("corrupt");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(SELECTION_FILE), b"}{ definitely not json").unwrap();

        assert!(FileSelection::new(dir.clone()).load().await.is_none());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_clear_removes_selection() {
        let dir = scratch_dir("clear");
        let _ = std::fs::remove_dir_all(&dir);

        let org = SeedDirectory::sample()
            .find_organization("tech-corp")
            .await
            .unwrap();
        let selection = FileSelection::new(dir.clone());
        selection.save(&org).await;
        assert!(selection.load().await.is_some());

        selection.clear();
        assert!(selection.load().await.is_none());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
