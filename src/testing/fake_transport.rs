//! In-memory Drive fake for engine tests.
//!
//! Models the flat object graph the real API exposes: every object carries a
//! parent reference, root-level objects point at an unlisted container id,
//! and deleting a folder cascades to its descendants.

use std::sync::{Arc, Mutex};

use crate::domain::{DriveObject, Scope, StorageError};
use crate::ports::{CreateObject, DriveTransport, ObjectPage};

/// Unlisted container id for root-level objects in the documents space.
pub const DRIVE_ROOT: &str = "drive-root";

const CREATED_AT_MS: i64 = 1_700_000_000_000;

#[derive(Clone)]
struct StoredObject {
    object: DriveObject,
    content: String,
    space: &'static str,
}

#[derive(Default)]
struct DriveState {
    objects: Vec<StoredObject>,
    next_id: u64,
    deleted: Vec<String>,
    list_calls: u64,
}

/// Fake [`DriveTransport`] backed by a shared in-memory graph.
#[derive(Clone, Default)]
pub struct FakeDriveTransport {
    state: Arc<Mutex<DriveState>>,
    reject_credentials: bool,
}

impl FakeDriveTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transport that rejects every credential, as Drive does for a revoked
    /// token.
    pub fn unauthenticated() -> Self {
        FakeDriveTransport { state: Arc::default(), reject_credentials: true }
    }

    /// Seed an object directly into the graph, bypassing the engine. The
    /// parent may be a real object id or a dangling container id such as
    /// [`DRIVE_ROOT`] or `appDataFolder`.
    pub fn insert(&self, parent_id: &str, name: &str, folder: bool, content: &str) -> String {
        let mut state = self.state.lock().unwrap();
        let id = format!("obj-{}", state.next_id);
        state.next_id += 1;

        let space = space_of(&state, parent_id);
        state.objects.push(StoredObject {
            object: DriveObject {
                id: id.clone(),
                name: name.to_string(),
                is_folder: folder,
                parent_id: Some(parent_id.to_string()),
                size_bytes: content.len() as u64,
                created_at_ms: CREATED_AT_MS,
                modified_at_ms: CREATED_AT_MS,
            },
            content: content.to_string(),
            space,
        });
        id
    }

    pub fn find_by_name(&self, name: &str) -> Option<DriveObject> {
        let state = self.state.lock().unwrap();
        state.objects.iter().find(|s| s.object.name == name).map(|s| s.object.clone())
    }

    pub fn object_count(&self) -> usize {
        self.state.lock().unwrap().objects.len()
    }

    pub fn deleted_ids(&self) -> Vec<String> {
        self.state.lock().unwrap().deleted.clone()
    }

    pub fn list_calls(&self) -> u64 {
        self.state.lock().unwrap().list_calls
    }

    fn check_credentials(&self) -> Result<(), StorageError> {
        if self.reject_credentials {
            return Err(StorageError::AuthenticationFailed("Invalid Credentials".into()));
        }
        Ok(())
    }
}

/// Resolve the space a new object lands in from its parent reference, the way
/// the real API does: the app-data container pins the hidden space, a known
/// object id inherits its space, anything else belongs to the user space.
fn space_of(state: &DriveState, parent_id: &str) -> &'static str {
    if parent_id == Scope::AppData.space() {
        return Scope::AppData.space();
    }
    state
        .objects
        .iter()
        .find(|s| s.object.id == parent_id)
        .map(|s| s.space)
        .unwrap_or_else(|| Scope::Documents.space())
}

impl DriveTransport for FakeDriveTransport {
    fn list_objects(
        &self,
        _token: &str,
        scope: Scope,
        _page_token: Option<&str>,
    ) -> Result<ObjectPage, StorageError> {
        self.check_credentials()?;
        let mut state = self.state.lock().unwrap();
        state.list_calls += 1;
        let objects = state
            .objects
            .iter()
            .filter(|s| s.space == scope.space())
            .map(|s| s.object.clone())
            .collect();
        Ok(ObjectPage { objects, next_page_token: None })
    }

    fn get_object(&self, _token: &str, id: &str) -> Result<DriveObject, StorageError> {
        self.check_credentials()?;
        let state = self.state.lock().unwrap();
        state
            .objects
            .iter()
            .find(|s| s.object.id == id)
            .map(|s| s.object.clone())
            .ok_or_else(|| StorageError::Api {
                message: format!("File not found: {id}"),
                status: Some(404),
            })
    }

    fn get_object_content(&self, _token: &str, id: &str) -> Result<String, StorageError> {
        self.check_credentials()?;
        let state = self.state.lock().unwrap();
        state
            .objects
            .iter()
            .find(|s| s.object.id == id)
            .map(|s| s.content.clone())
            .ok_or_else(|| StorageError::Api {
                message: format!("File not found: {id}"),
                status: Some(404),
            })
    }

    fn create_object(
        &self,
        _token: &str,
        request: &CreateObject,
        content: Option<&str>,
    ) -> Result<DriveObject, StorageError> {
        self.check_credentials()?;
        let mut state = self.state.lock().unwrap();
        let id = format!("obj-{}", state.next_id);
        state.next_id += 1;

        let parent_id = request.parent.clone().unwrap_or_else(|| DRIVE_ROOT.to_string());
        let space = space_of(&state, &parent_id);
        let content = content.unwrap_or_default().to_string();
        let object = DriveObject {
            id,
            name: request.name.clone(),
            is_folder: request.folder,
            parent_id: Some(parent_id),
            size_bytes: content.len() as u64,
            created_at_ms: CREATED_AT_MS,
            modified_at_ms: CREATED_AT_MS,
        };
        state.objects.push(StoredObject { object: object.clone(), content, space });
        Ok(object)
    }

    fn update_object_content(
        &self,
        _token: &str,
        id: &str,
        content: &str,
    ) -> Result<(), StorageError> {
        self.check_credentials()?;
        let mut state = self.state.lock().unwrap();
        let stored = state.objects.iter_mut().find(|s| s.object.id == id).ok_or_else(|| {
            StorageError::Api { message: format!("File not found: {id}"), status: Some(404) }
        })?;
        stored.content = content.to_string();
        stored.object.size_bytes = content.len() as u64;
        stored.object.modified_at_ms += 1;
        Ok(())
    }

    fn delete_object(&self, _token: &str, id: &str) -> Result<(), StorageError> {
        self.check_credentials()?;
        let mut state = self.state.lock().unwrap();
        if !state.objects.iter().any(|s| s.object.id == id) {
            return Err(StorageError::Api {
                message: format!("File not found: {id}"),
                status: Some(404),
            });
        }

        // Cascade: removing a container removes its subtree.
        let mut doomed = vec![id.to_string()];
        let mut index = 0;
        while index < doomed.len() {
            let parent = doomed[index].clone();
            for stored in &state.objects {
                if stored.object.parent_id.as_deref() == Some(parent.as_str()) {
                    doomed.push(stored.object.id.clone());
                }
            }
            index += 1;
        }

        state.objects.retain(|s| !doomed.contains(&s.object.id));
        state.deleted.push(id.to_string());
        Ok(())
    }
}
