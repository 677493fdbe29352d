//! Arbitration for same-name siblings.
//!
//! Two Drive create calls with identical name and parent both succeed, so a
//! lookup can legally face several candidates for one POSIX path. The policy
//! decides between a hard error and a reported-but-tolerated pick.

use crate::domain::{DriveObject, DuplicatePolicy, StorageError};

/// Details of a tolerated name collision, handed to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameCollision {
    /// The path whose final segment matched several objects.
    pub path: String,
    /// Ids of all colliding objects, in listing order.
    pub object_ids: Vec<String>,
}

/// Applies the configured duplicate-name policy to one lookup.
#[derive(Debug, Clone, Copy)]
pub struct DuplicateNameArbiter {
    policy: DuplicatePolicy,
}

impl DuplicateNameArbiter {
    pub fn new(policy: DuplicatePolicy) -> Self {
        DuplicateNameArbiter { policy }
    }

    /// Check the candidate set for one path lookup.
    ///
    /// A single candidate (or none) passes untouched. Multiple candidates
    /// fail in strict mode; in tolerant mode the collision is returned for
    /// notification and the caller proceeds with the first match in listing
    /// order.
    pub fn check(
        &self,
        path: &str,
        candidates: &[&DriveObject],
    ) -> Result<Option<NameCollision>, StorageError> {
        if candidates.len() <= 1 {
            return Ok(None);
        }

        let ids: Vec<String> = candidates.iter().map(|o| o.id.clone()).collect();
        match self.policy {
            DuplicatePolicy::Strict => {
                Err(StorageError::MultipleFilesWithSameName { path: path.to_string(), ids })
            }
            DuplicatePolicy::Tolerant => {
                log::warn!("multiple files named alike at {path}: {ids:?}");
                Ok(Some(NameCollision { path: path.to_string(), object_ids: ids }))
            }
        }
    }
}
