//! Drive transport port definition.

use crate::domain::{DriveObject, Scope, StorageError};

/// One bounded page of a space listing.
#[derive(Debug, Clone)]
pub struct ObjectPage {
    pub objects: Vec<DriveObject>,
    /// Continuation token; absent on the final page.
    pub next_page_token: Option<String>,
}

/// Metadata for an object-creation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateObject {
    pub name: String,
    /// Parent object id, or a space identifier for the app-data synthetic
    /// container. `None` lets the backing store default to the user root.
    pub parent: Option<String>,
    pub folder: bool,
}

/// Port for the Drive backing store.
///
/// Implementations perform a single request per call; retry and request
/// signing are transport concerns outside this interface. The access token is
/// threaded into every call so credential changes never affect an operation
/// already in flight.
pub trait DriveTransport {
    /// Fetch one page of all objects in the scope's space.
    fn list_objects(
        &self,
        token: &str,
        scope: Scope,
        page_token: Option<&str>,
    ) -> Result<ObjectPage, StorageError>;

    /// Fetch full metadata for a single object.
    fn get_object(&self, token: &str, id: &str) -> Result<DriveObject, StorageError>;

    /// Fetch an object's text content.
    fn get_object_content(&self, token: &str, id: &str) -> Result<String, StorageError>;

    /// Create an object, optionally with initial text content.
    fn create_object(
        &self,
        token: &str,
        request: &CreateObject,
        content: Option<&str>,
    ) -> Result<DriveObject, StorageError>;

    /// Replace an object's content in place; the id is preserved.
    fn update_object_content(
        &self,
        token: &str,
        id: &str,
        content: &str,
    ) -> Result<(), StorageError>;

    /// Delete an object. Deleting a folder cascades to its descendants in the
    /// backing store.
    fn delete_object(&self, token: &str, id: &str) -> Result<(), StorageError>;
}
