//! In-memory index over one flat listing of a Drive space.
//!
//! Drive has no server-side path queries, so every filesystem operation
//! starts from a complete snapshot of the space and answers parent/child and
//! name questions locally. The snapshot is rebuilt per operation; Drive's
//! state may change between calls and a cached index would violate the
//! resolver's invariants.

use std::collections::HashMap;

use crate::domain::{DriveObject, Scope, StorageError};
use crate::ports::DriveTransport;

/// Id-keyed snapshot of all objects within one scope's space.
///
/// Objects whose `parent_id` does not resolve to another indexed object sit
/// directly under the space root; the root itself is never listed.
pub struct ObjectIndex {
    /// All objects in listing order. Order matters: tolerant duplicate
    /// handling picks the first match in listing order.
    objects: Vec<DriveObject>,
    by_id: HashMap<String, usize>,
}

impl ObjectIndex {
    /// Fetch the complete listing for a scope, paginating until no
    /// continuation token remains.
    ///
    /// Any page failure fails the build; an incomplete listing cannot yield a
    /// correct index and is never used.
    pub fn fetch<T: DriveTransport + ?Sized>(
        transport: &T,
        token: &str,
        scope: Scope,
    ) -> Result<Self, StorageError> {
        let mut objects = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let page = transport.list_objects(token, scope, page_token.as_deref())?;
            objects.extend(page.objects);
            match page.next_page_token {
                Some(next) if !next.is_empty() => page_token = Some(next),
                _ => break,
            }
        }

        log::debug!("indexed {} objects in space {}", objects.len(), scope.space());
        Ok(Self::from_objects(objects))
    }

    /// Build an index from an already-materialized listing.
    pub fn from_objects(objects: Vec<DriveObject>) -> Self {
        let by_id =
            objects.iter().enumerate().map(|(index, object)| (object.id.clone(), index)).collect();
        ObjectIndex { objects, by_id }
    }

    pub fn get(&self, id: &str) -> Option<&DriveObject> {
        self.by_id.get(id).map(|&index| &self.objects[index])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn objects(&self) -> impl Iterator<Item = &DriveObject> {
        self.objects.iter()
    }

    /// All objects whose parent reference equals the given id, in listing
    /// order.
    pub fn children_of(&self, parent_id: &str) -> Vec<&DriveObject> {
        self.objects.iter().filter(|o| o.parent_id.as_deref() == Some(parent_id)).collect()
    }

    /// All objects with the exact (case-sensitive) name at the given parent.
    /// With no parent, matches objects sitting directly under the space root,
    /// i.e. those whose parent reference does not resolve within this index.
    pub fn find(&self, parent_id: Option<&str>, name: &str) -> Vec<&DriveObject> {
        match parent_id {
            Some(parent) => self
                .objects
                .iter()
                .filter(|o| o.name == name && o.parent_id.as_deref() == Some(parent))
                .collect(),
            None => self.objects.iter().filter(|o| o.name == name && self.is_root(o)).collect(),
        }
    }

    /// True iff the object's parent reference does not resolve within this
    /// index, placing it directly under the space root.
    pub fn is_root(&self, object: &DriveObject) -> bool {
        match &object.parent_id {
            Some(parent) => !self.by_id.contains_key(parent),
            None => true,
        }
    }

    /// Infer the id of the space root from the shape of the graph.
    ///
    /// Drive exposes no queryable root id per space, but every listed object
    /// carries a parent reference; the one reference that does not itself
    /// appear as a listed id is, by construction, the unlisted space root. An
    /// empty space has no discoverable root.
    pub fn root_id(&self, scope: Scope) -> Result<&str, StorageError> {
        for object in &self.objects {
            if let Some(parent) = object.parent_id.as_deref() {
                if !self.by_id.contains_key(parent) {
                    return Ok(parent);
                }
            }
        }

        Err(StorageError::DirectoryNotFound(format!(
            "Root directory in scope {scope} not found"
        )))
    }
}
