/// A single Drive object, file or folder, as seen in one listing snapshot.
///
/// Drive permits several parents per object; the product contract assumes a
/// single-parent tree, so only the first parent reference is kept. A
/// `parent_id` that does not resolve within the same listing marks the object
/// as sitting directly under the (unlisted) space root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriveObject {
    /// Opaque, stable object id.
    pub id: String,
    /// Object name; not unique within a parent.
    pub name: String,
    /// Derived from the folder sentinel mime type.
    pub is_folder: bool,
    /// First (only) parent reference, if any.
    pub parent_id: Option<String>,
    pub size_bytes: u64,
    /// Creation time, epoch milliseconds.
    pub created_at_ms: i64,
    /// Last modification time, epoch milliseconds.
    pub modified_at_ms: i64,
}

/// POSIX-style stat result synthesized from a resolved object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStat {
    pub size_bytes: u64,
    pub created_at_ms: i64,
    pub modified_at_ms: i64,
    pub is_directory: bool,
    pub is_file: bool,
}

impl From<&DriveObject> for FileStat {
    fn from(object: &DriveObject) -> Self {
        FileStat {
            size_bytes: object.size_bytes,
            created_at_ms: object.created_at_ms,
            modified_at_ms: object.modified_at_ms,
            is_directory: object.is_folder,
            is_file: !object.is_folder,
        }
    }
}
