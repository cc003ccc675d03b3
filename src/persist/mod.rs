//! Persistence gateway: one versioned JSON blob on disk.
//!
//! Only whitelisted slices survive a reload: the preference store and the
//! session store. Every mutation rewrites the whole blob through a temp
//! file + rename, so the write is atomic at the filesystem boundary and
//! same-tick writes from multiple stores coalesce into one serialization
//! pass each. Session termination purges the entire blob, not just the
//! session slice; that global reset is deliberate.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::models::PublicUser;

/// Bump when the blob layout changes; older blobs are discarded on load.
pub const SCHEMA_VERSION: u32 = 1;

const BLOB_FILE: &str = "portfolio_state.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSlice {
    pub user: PublicUser,
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferenceSlice {
    pub dark_mode: bool,
    pub language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Blob {
    schema_version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    preferences: Option<PreferenceSlice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    session: Option<SessionSlice>,
}

impl Default for Blob {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            preferences: None,
            session: None,
        }
    }
}

pub struct PersistGateway {
    path: PathBuf,
    blob: Mutex<Blob>,
}

impl PersistGateway {
    /// Opens the blob under `data_dir`, reading any existing state before
    /// the stores hydrate. A blob from a different schema version is
    /// dropped rather than migrated.
    pub fn open(data_dir: &Path) -> Self {
        let path = data_dir.join(BLOB_FILE);
        let blob = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<Blob>(&raw) {
                Ok(blob) if blob.schema_version == SCHEMA_VERSION => blob,
                Ok(blob) => {
                    warn!(
                        "discarding persisted state with schema {} (expected {})",
                        blob.schema_version, SCHEMA_VERSION
                    );
                    Blob::default()
                }
                Err(e) => {
                    warn!("unreadable persisted state, starting fresh: {e}");
                    Blob::default()
                }
            },
            Err(_) => Blob::default(),
        };
        Self {
            path,
            blob: Mutex::new(blob),
        }
    }

    pub fn preferences(&self) -> Option<PreferenceSlice> {
        self.lock().preferences.clone()
    }

    pub fn session(&self) -> Option<SessionSlice> {
        self.lock().session.clone()
    }

    pub fn save_preferences(&self, slice: PreferenceSlice) -> anyhow::Result<()> {
        let snapshot = {
            let mut blob = self.lock();
            blob.preferences = Some(slice);
            blob.clone()
        };
        self.write(&snapshot)
    }

    pub fn save_session(&self, slice: Option<SessionSlice>) -> anyhow::Result<()> {
        let snapshot = {
            let mut blob = self.lock();
            blob.session = slice;
            blob.clone()
        };
        self.write(&snapshot)
    }

    /// Drops every persisted slice and removes the file. Invoked on
    /// session termination.
    pub fn purge(&self) -> anyhow::Result<()> {
        *self.lock() = Blob::default();
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        debug!("persisted state purged");
        Ok(())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Blob> {
        self.blob.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self, blob: &Blob) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(blob)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn sample_session() -> SessionSlice {
        SessionSlice {
            user: PublicUser {
                id: 1,
                username: "alice".into(),
                email: "a@x.com".into(),
                name: "Alice".into(),
                role: Role::User,
            },
            token: "dG9rZW4=".into(),
        }
    }

    #[test]
    fn slices_survive_a_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = PersistGateway::open(dir.path());
        gateway
            .save_preferences(PreferenceSlice {
                dark_mode: true,
                language: "ar".into(),
            })
            .unwrap();
        gateway.save_session(Some(sample_session())).unwrap();

        let reopened = PersistGateway::open(dir.path());
        assert_eq!(reopened.preferences().unwrap().language, "ar");
        assert_eq!(reopened.session().unwrap().user.username, "alice");
    }

    #[test]
    fn purge_removes_the_whole_blob() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = PersistGateway::open(dir.path());
        gateway
            .save_preferences(PreferenceSlice {
                dark_mode: false,
                language: "en".into(),
            })
            .unwrap();
        gateway.save_session(Some(sample_session())).unwrap();
        gateway.purge().unwrap();

        assert!(gateway.session().is_none());
        assert!(gateway.preferences().is_none());
        let reopened = PersistGateway::open(dir.path());
        assert!(reopened.preferences().is_none());
        assert!(reopened.session().is_none());
    }

    #[test]
    fn foreign_schema_versions_are_discarded() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(BLOB_FILE),
            r#"{"schema_version": 99, "session": null}"#,
        )
        .unwrap();
        let gateway = PersistGateway::open(dir.path());
        assert!(gateway.session().is_none());
    }
}
