//! Configuration values injected into the storage engine and transport.
//!
//! All configuration is an explicit, owned value threaded in at construction
//! time; there is no module-level state, and changing configuration never
//! affects an in-flight operation.

use url::Url;

const DRIVE_API_URL: &str = "https://www.googleapis.com/drive/v3";
const DRIVE_UPLOAD_URL: &str = "https://www.googleapis.com/upload/drive/v3";
const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Policy applied when several siblings share the looked-up name.
///
/// Drive happily stores two objects with identical name and parent, which a
/// POSIX path cannot address unambiguously; the policy decides whether that
/// state is a hard error or a reported-but-tolerated condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Fail lookups with `MultipleFilesWithSameName`.
    Strict,
    /// Notify collision subscribers and proceed with the first match in
    /// listing order.
    #[default]
    Tolerant,
}

/// Engine-level configuration, captured per call.
#[derive(Debug, Clone, Default)]
pub struct StorageConfig {
    /// OAuth access token for the Drive API. Operations fail with
    /// `AccessTokenMissing` while unset.
    pub access_token: Option<String>,
    pub duplicate_policy: DuplicatePolicy,
}

/// Endpoints and timeout for the Drive HTTP transport.
#[derive(Debug, Clone)]
pub struct DriveApiConfig {
    /// Metadata and listing endpoint base.
    pub api_url: Url,
    /// Content upload endpoint base.
    pub upload_url: Url,
    /// Per-request deadline, seconds. A timed-out listing fails the whole
    /// operation; partial listings are never used.
    pub timeout_secs: u64,
}

impl Default for DriveApiConfig {
    fn default() -> Self {
        DriveApiConfig {
            api_url: Url::parse(DRIVE_API_URL).expect("static Drive API URL"),
            upload_url: Url::parse(DRIVE_UPLOAD_URL).expect("static Drive upload URL"),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_drive_v3() {
        let config = DriveApiConfig::default();
        assert_eq!(config.api_url.as_str(), "https://www.googleapis.com/drive/v3");
        assert_eq!(config.upload_url.as_str(), "https://www.googleapis.com/upload/drive/v3");
    }

    #[test]
    fn tolerant_is_the_default_policy() {
        assert_eq!(StorageConfig::default().duplicate_policy, DuplicatePolicy::Tolerant);
    }
}
