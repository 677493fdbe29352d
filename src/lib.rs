//! cloudfs: POSIX-like filesystem operations over Google Drive's flat object
//! graph.
//!
//! Drive stores a flat set of objects where each object has a name and a
//! parent reference, with no native path concept and no uniqueness of names
//! within a parent. This crate reconstructs a directory hierarchy from one
//! flat listing per operation, walks POSIX paths against it, infers the
//! scope root from the shape of the graph, and exposes the usual file
//! operations (`exists`, `read_file`, `write_file`, `append_file`, `mkdir`,
//! `readdir`, `unlink`, `rmdir`, `stat`) on top.
//!
//! ```no_run
//! use cloudfs::{CloudStorage, DriveApiConfig, HttpDriveTransport, Scope, StorageConfig};
//!
//! # fn main() -> Result<(), cloudfs::StorageError> {
//! let transport = HttpDriveTransport::new(&DriveApiConfig::default())?;
//! let config = StorageConfig { access_token: Some("ya29...".into()), ..Default::default() };
//! let storage = CloudStorage::new(transport, config);
//!
//! storage.write_file("/notes.txt", "hello", Scope::AppData, true)?;
//! assert_eq!(storage.read_file("/notes.txt", Scope::AppData)?, "hello");
//! # Ok(())
//! # }
//! ```

pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

pub use domain::{
    DriveApiConfig, DriveObject, DuplicatePolicy, ErrorCode, FileStat, Scope, StorageConfig,
    StorageError,
};
pub use ports::{CreateObject, DriveTransport, ObjectPage};
pub use services::{CloudStorage, HttpDriveTransport, NameCollision, SubscriptionId};
