//! The filesystem operation engine over a Drive transport.
//!
//! Each operation is a single resolve-then-act sequence against a fresh
//! snapshot of the scope's space; nothing is cached across calls. Concurrent
//! calls are not serialized here: two simultaneous creates can both observe
//! "not found" and both create, producing the duplicate-name condition the
//! arbiter handles — Drive offers no atomic create-if-absent.

use std::collections::HashSet;

use crate::domain::{
    DuplicatePolicy, ErrorCode, FileStat, Scope, StorageConfig, StorageError, split_path,
};
use crate::ports::{CreateObject, DriveTransport};
use crate::services::arbiter::NameCollision;
use crate::services::graph_index::ObjectIndex;
use crate::services::path_resolver::{Expect, PathResolver};

/// Handle for removing a registered listener.
pub type SubscriptionId = u64;

type AvailabilityListener = Box<dyn Fn(bool) + Send + Sync>;
type CollisionListener = Box<dyn Fn(&NameCollision) + Send + Sync>;

/// POSIX-like filesystem operations over a cloud object store.
///
/// Generic over the transport port; production code wires in
/// [`HttpDriveTransport`](crate::services::HttpDriveTransport).
pub struct CloudStorage<T: DriveTransport> {
    transport: T,
    config: StorageConfig,
    next_subscription: SubscriptionId,
    availability_listeners: Vec<(SubscriptionId, AvailabilityListener)>,
    collision_listeners: Vec<(SubscriptionId, CollisionListener)>,
}

impl<T: DriveTransport> CloudStorage<T> {
    pub fn new(transport: T, config: StorageConfig) -> Self {
        CloudStorage {
            transport,
            config,
            next_subscription: 0,
            availability_listeners: Vec::new(),
            collision_listeners: Vec::new(),
        }
    }

    /// Whether operations can currently reach the cloud, i.e. a token is set.
    pub fn is_cloud_available(&self) -> bool {
        self.config.access_token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Replace the access token and notify availability subscribers
    /// synchronously. In-flight operations keep the token they captured.
    pub fn set_access_token(&mut self, token: Option<String>) {
        self.config.access_token = token.filter(|t| !t.is_empty());
        let available = self.config.access_token.is_some();
        for (_, listener) in &self.availability_listeners {
            listener(available);
        }
    }

    pub fn subscribe_availability(
        &mut self,
        listener: impl Fn(bool) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = self.next_id();
        self.availability_listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe_availability(&mut self, id: SubscriptionId) {
        self.availability_listeners.retain(|(listener_id, _)| *listener_id != id);
    }

    /// Subscribe to tolerated duplicate-name conditions.
    pub fn subscribe_collisions(
        &mut self,
        listener: impl Fn(&NameCollision) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = self.next_id();
        self.collision_listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe_collisions(&mut self, id: SubscriptionId) {
        self.collision_listeners.retain(|(listener_id, _)| *listener_id != id);
    }

    fn next_id(&mut self) -> SubscriptionId {
        self.next_subscription += 1;
        self.next_subscription
    }

    /// Token precondition: checked before any network call.
    fn token(&self) -> Result<&str, StorageError> {
        self.config
            .access_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(StorageError::AccessTokenMissing)
    }

    fn policy(&self) -> DuplicatePolicy {
        self.config.duplicate_policy
    }

    /// Resolve a path against the index and dispatch any tolerated collision
    /// to subscribers (exactly one notification per lookup).
    fn resolve(
        &self,
        index: &ObjectIndex,
        path: &str,
        scope: Scope,
        expect: Expect,
    ) -> Result<String, StorageError> {
        let resolver = PathResolver::new(index, self.policy());
        let resolution = resolver.resolve(path, scope, expect)?;
        if let Some(collision) = &resolution.collision {
            for (_, listener) in &self.collision_listeners {
                listener(collision);
            }
        }
        Ok(resolution.id)
    }

    /// Resolve to `None` instead of failing when the final segment is absent.
    fn resolve_existing(
        &self,
        index: &ObjectIndex,
        path: &str,
        scope: Scope,
    ) -> Result<Option<String>, StorageError> {
        match self.resolve(index, path, scope, Expect::Any) {
            Ok(id) => Ok(Some(id)),
            Err(err) if err.code() == ErrorCode::FileNotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Resolve the parent for a new entry. An empty directory chain means the
    /// scope root: the app-data space needs its synthetic container named
    /// explicitly, while the user space defaults to the root when no parent
    /// is given.
    fn parent_for_new_entry(
        &self,
        index: &ObjectIndex,
        directories: &[String],
        scope: Scope,
    ) -> Result<Option<String>, StorageError> {
        let resolver = PathResolver::new(index, self.policy());
        let parent = resolver.locate_parent(directories)?;
        Ok(parent.or_else(|| match scope {
            Scope::AppData => Some(Scope::AppData.space().to_string()),
            Scope::Documents => None,
        }))
    }

    fn create_entry(
        &self,
        index: &ObjectIndex,
        token: &str,
        path: &str,
        scope: Scope,
        folder: bool,
        content: Option<&str>,
    ) -> Result<(), StorageError> {
        let parts = split_path(path);
        let parent = self.parent_for_new_entry(index, &parts.directories, scope)?;
        let request = CreateObject { name: parts.filename, parent, folder };
        self.transport
            .create_object(token, &request, content)
            .map_err(StorageError::into_write_error)?;
        Ok(())
    }

    /// Test whether the path exists. `FileNotFound` maps to `false`; every
    /// other failure propagates.
    pub fn exists(&self, path: &str, scope: Scope) -> Result<bool, StorageError> {
        let token = self.token()?;
        let index = ObjectIndex::fetch(&self.transport, token, scope)?;
        Ok(self.resolve_existing(&index, path, scope)?.is_some())
    }

    /// Read the file's text content.
    pub fn read_file(&self, path: &str, scope: Scope) -> Result<String, StorageError> {
        let token = self.token()?;
        let index = ObjectIndex::fetch(&self.transport, token, scope)?;
        let id = self.resolve(&index, path, scope, Expect::File)?;
        self.transport.get_object_content(token, &id).map_err(StorageError::into_read_error)
    }

    /// Write the file, creating it or (with `overwrite`) replacing its
    /// content in place so the backing object id stays stable.
    pub fn write_file(
        &self,
        path: &str,
        data: &str,
        scope: Scope,
        overwrite: bool,
    ) -> Result<(), StorageError> {
        let token = self.token()?;
        let index = ObjectIndex::fetch(&self.transport, token, scope)?;

        match self.resolve_existing(&index, path, scope)? {
            Some(_) if !overwrite => Err(StorageError::FileAlreadyExists(path.to_string())),
            Some(id) => self
                .transport
                .update_object_content(token, &id, data)
                .map_err(StorageError::into_write_error),
            None => self.create_entry(&index, token, path, scope, false, Some(data)),
        }
    }

    /// Append to the file; appending to a nonexistent path creates it.
    pub fn append_file(&self, path: &str, data: &str, scope: Scope) -> Result<(), StorageError> {
        let token = self.token()?;
        let index = ObjectIndex::fetch(&self.transport, token, scope)?;

        match self.resolve_existing(&index, path, scope)? {
            Some(id) => {
                let previous = self
                    .transport
                    .get_object_content(token, &id)
                    .map_err(StorageError::into_read_error)?;
                let combined = format!("{previous}{data}");
                self.transport
                    .update_object_content(token, &id, &combined)
                    .map_err(StorageError::into_write_error)
            }
            None => self.create_entry(&index, token, path, scope, false, Some(data)),
        }
    }

    /// Create a directory. Existing entries of any type fail with
    /// `FileAlreadyExists`; directory creation is not idempotent.
    pub fn mkdir(&self, path: &str, scope: Scope) -> Result<(), StorageError> {
        let token = self.token()?;
        let index = ObjectIndex::fetch(&self.transport, token, scope)?;

        match self.resolve_existing(&index, path, scope)? {
            Some(_) => Err(StorageError::FileAlreadyExists(path.to_string())),
            None => self.create_entry(&index, token, path, scope, true, None),
        }
    }

    /// List the de-duplicated child names of a directory, in listing order.
    pub fn readdir(&self, path: &str, scope: Scope) -> Result<Vec<String>, StorageError> {
        let token = self.token()?;
        let index = ObjectIndex::fetch(&self.transport, token, scope)?;
        let id = self.resolve(&index, path, scope, Expect::Directory)?;

        let mut seen = HashSet::new();
        let mut names = Vec::new();
        for child in index.children_of(&id) {
            if seen.insert(child.name.clone()) {
                names.push(child.name.clone());
            }
        }
        Ok(names)
    }

    /// Delete a file. Directories are rejected with `PathIsDirectory`.
    pub fn unlink(&self, path: &str, scope: Scope) -> Result<(), StorageError> {
        let token = self.token()?;
        let index = ObjectIndex::fetch(&self.transport, token, scope)?;
        let id = self.resolve(&index, path, scope, Expect::File)?;
        self.transport.delete_object(token, &id).map_err(StorageError::into_delete_error)
    }

    /// Delete a directory. Without `recursive`, a non-empty directory fails
    /// with `DirectoryNotEmpty` carrying the blocking child names; with it,
    /// the backing store cascades deletion of the subtree.
    pub fn rmdir(&self, path: &str, recursive: bool, scope: Scope) -> Result<(), StorageError> {
        let token = self.token()?;
        let index = ObjectIndex::fetch(&self.transport, token, scope)?;
        let id = self.resolve(&index, path, scope, Expect::Directory)?;

        if !recursive {
            let children: Vec<String> =
                index.children_of(&id).iter().map(|o| o.name.clone()).collect();
            if !children.is_empty() {
                return Err(StorageError::DirectoryNotEmpty {
                    path: path.to_string(),
                    children,
                });
            }
        }

        self.transport.delete_object(token, &id).map_err(StorageError::into_delete_error)
    }

    /// Stat the entry at the path, file or directory.
    pub fn stat(&self, path: &str, scope: Scope) -> Result<FileStat, StorageError> {
        let token = self.token()?;
        let index = ObjectIndex::fetch(&self.transport, token, scope)?;
        let id = self.resolve(&index, path, scope, Expect::Any)?;
        let object =
            self.transport.get_object(token, &id).map_err(StorageError::into_stat_error)?;
        Ok(FileStat::from(&object))
    }
}
