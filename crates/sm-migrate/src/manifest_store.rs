//! Reads and writes the system manifest through the settings store.
//!
//! The manifest is the only record of which schema version is installed.
//! Nothing else in the application writes it.

use crate::error::MigrateResult;
use crate::settings::SettingsStore;
use sm_core::{SystemManifest, MANIFEST_KEY};

/// Owner of the persisted [`SystemManifest`].
pub struct ManifestStore<S> {
    settings: S,
}

impl<S: SettingsStore> ManifestStore<S> {
    pub fn new(settings: S) -> Self {
        Self { settings }
    }

    /// Current manifest.
    ///
    /// A missing manifest is not an error: it reads as
    /// [`SystemManifest::unset`], which makes the first run migrate.
    pub async fn read(&self) -> MigrateResult<SystemManifest> {
        match self.settings.get(MANIFEST_KEY).await? {
            Some(json) => Ok(SystemManifest::from_json(&json)?),
            None => {
                log::debug!("No {MANIFEST_KEY} recorded yet, treating schema as unset");
                Ok(SystemManifest::unset())
            }
        }
    }

    /// Replace the stored manifest with `manifest`.
    pub async fn write(&self, manifest: &SystemManifest) -> MigrateResult<()> {
        let json = manifest.to_json()?;
        self.settings.put(MANIFEST_KEY, &json).await
    }

    pub fn settings(&self) -> &S {
        &self.settings
    }
}
