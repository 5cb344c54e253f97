//! The persisted record of which schema version is installed.

use crate::error::CoreResult;
use crate::version::SchemaVersion;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Key under which the manifest lives in the configuration store.
pub const MANIFEST_KEY: &str = "SystemManifestSettings";

/// Installed schema version and when it was installed.
///
/// Serialized with PascalCase field names so the stored JSON matches what
/// the rest of the application reads from the configuration store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SystemManifest {
    pub version_string: String,
    pub install_time_utc: DateTime<Utc>,
    /// SHA-256 of the script that produced this schema, for auditing only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applied_script_checksum: Option<String>,
}

impl SystemManifest {
    pub fn new(version: impl Into<String>, install_time_utc: DateTime<Utc>) -> Self {
        Self {
            version_string: version.into(),
            install_time_utc,
            applied_script_checksum: None,
        }
    }

    /// Manifest used when nothing has been recorded yet.
    pub fn unset() -> Self {
        Self::new(SchemaVersion::UNSET.to_string(), DateTime::<Utc>::UNIX_EPOCH)
    }

    pub fn with_checksum(mut self, checksum: impl Into<String>) -> Self {
        self.applied_script_checksum = Some(checksum.into());
        self
    }

    /// True for the placeholder from [`SystemManifest::unset`], not for a
    /// manifest that really records `0.0.0`.
    pub fn is_unset(&self) -> bool {
        self.install_time_utc == DateTime::<Utc>::UNIX_EPOCH
            && self
                .version_string
                .parse::<SchemaVersion>()
                .is_ok_and(|v| v == SchemaVersion::UNSET)
    }

    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_json_uses_pascal_case() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let json = SystemManifest::new("14.3.0", at).to_json().unwrap();
        assert!(json.contains("\"VersionString\":\"14.3.0\""));
        assert!(json.contains("\"InstallTimeUtc\":\"2024-03-01T12:00:00Z\""));
        assert!(!json.contains("AppliedScriptChecksum"));
    }

    #[test]
    fn test_reads_manifest_written_by_other_components() {
        let json = r#"{"VersionString":"12.8.1","InstallTimeUtc":"2021-06-30T08:15:00Z"}"#;
        let manifest = SystemManifest::from_json(json).unwrap();
        assert_eq!(manifest.version_string, "12.8.1");
        assert_eq!(manifest.applied_script_checksum, None);
    }

    #[test]
    fn test_checksum_is_persisted_when_present() {
        let manifest = SystemManifest::new("14.3.0", Utc::now()).with_checksum("abc123");
        let back = SystemManifest::from_json(&manifest.to_json().unwrap()).unwrap();
        assert_eq!(back, manifest);
    }

    #[test]
    fn test_unset() {
        let manifest = SystemManifest::unset();
        assert!(manifest.is_unset());
        assert_eq!(manifest.version_string, "0.0.0");
    }

    #[test]
    fn test_recorded_zero_version_is_not_unset() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        assert!(!SystemManifest::new("0.0.0", at).is_unset());
        assert!(!SystemManifest::new("1.0.0", DateTime::<Utc>::UNIX_EPOCH).is_unset());
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(SystemManifest::from_json("{\"Version\":1}").is_err());
    }
}
