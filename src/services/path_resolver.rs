//! Segment-by-segment resolution of POSIX paths against an object index.
//!
//! Drive's app-data space has exactly one implicit root, while the user space
//! can hold several same-named top-level folders; the walk therefore treats
//! the first segment specially, discriminating a true top-level anchor from a
//! nested duplicate before descending the rest of the chain.

use crate::domain::{DriveObject, DuplicatePolicy, Scope, StorageError, is_root_path, split_path};
use crate::services::arbiter::{DuplicateNameArbiter, NameCollision};
use crate::services::graph_index::ObjectIndex;

/// Type constraint applied to the resolved object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expect {
    Any,
    File,
    Directory,
}

/// Outcome of a successful resolution.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// Id of the resolved object (or inferred space root for `/`).
    pub id: String,
    /// Tolerated duplicate-name condition observed at the final segment, for
    /// the caller to dispatch to subscribers.
    pub collision: Option<NameCollision>,
}

pub struct PathResolver<'a> {
    index: &'a ObjectIndex,
    arbiter: DuplicateNameArbiter,
}

impl<'a> PathResolver<'a> {
    pub fn new(index: &'a ObjectIndex, policy: DuplicatePolicy) -> Self {
        PathResolver { index, arbiter: DuplicateNameArbiter::new(policy) }
    }

    /// Resolve a path to an object id, enforcing the expected type.
    pub fn resolve(
        &self,
        path: &str,
        scope: Scope,
        expect: Expect,
    ) -> Result<Resolution, StorageError> {
        if is_root_path(path) {
            if expect == Expect::File {
                return Err(StorageError::PathIsDirectory(path.to_string()));
            }
            let root = self.index.root_id(scope)?;
            return Ok(Resolution { id: root.to_string(), collision: None });
        }

        let parts = split_path(path);
        let parent_id = self.locate_parent(&parts.directories)?;

        let candidates = self.index.find(parent_id.as_deref(), &parts.filename);
        let collision = self.arbiter.check(path, &candidates)?;
        let object = candidates
            .first()
            .copied()
            .ok_or_else(|| StorageError::FileNotFound(path.to_string()))?;

        match expect {
            Expect::File if object.is_folder => {
                Err(StorageError::PathIsDirectory(path.to_string()))
            }
            Expect::Directory if !object.is_folder => {
                Err(StorageError::PathIsFile(path.to_string()))
            }
            _ => Ok(Resolution { id: object.id.clone(), collision }),
        }
    }

    /// Walk a directory chain to the id of its last directory.
    ///
    /// `Ok(None)` means the chain is empty: the entry sits directly under the
    /// space root and creation calls may omit the parent (or substitute the
    /// app-data container).
    pub fn locate_parent(&self, directories: &[String]) -> Result<Option<String>, StorageError> {
        let Some(anchor_name) = directories.first() else {
            return Ok(None);
        };

        let anchor = self.locate_anchor(anchor_name)?;

        let mut current = anchor.id.clone();
        for segment in &directories[1..] {
            if self.index.get(&current).is_none() {
                return Err(StorageError::DirectoryNotFound(format!(
                    "Could not find directory with id {current}"
                )));
            }
            let next = self
                .index
                .children_of(&current)
                .into_iter()
                .find(|o| o.is_folder && o.name == *segment)
                .ok_or_else(|| {
                    StorageError::DirectoryNotFound(format!(
                        "Could not find directory with name {segment}"
                    ))
                })?;
            current = next.id.clone();
        }

        Ok(Some(current))
    }

    /// Pick the top-level anchor folder for the first path segment.
    ///
    /// Among several same-named candidates, the one whose own parent is not an
    /// indexed folder is root-adjacent and wins; a nested duplicate always has
    /// its parent folder in the listing.
    fn locate_anchor(&self, name: &str) -> Result<&DriveObject, StorageError> {
        let candidates: Vec<&DriveObject> =
            self.index.objects().filter(|o| o.is_folder && o.name == name).collect();

        let not_found = || {
            StorageError::DirectoryNotFound(format!(
                "Could not find top directory with name {name}"
            ))
        };

        match candidates.as_slice() {
            [] => Err(not_found()),
            [only] => Ok(only),
            many => many
                .iter()
                .copied()
                .find(|candidate| match candidate.parent_id.as_deref() {
                    Some(parent) => {
                        !self.index.get(parent).is_some_and(|object| object.is_folder)
                    }
                    None => true,
                })
                .ok_or_else(not_found),
        }
    }
}
