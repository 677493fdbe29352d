//! Core domain types: objects, paths, scopes, configuration, errors.

pub mod config;
pub mod error;
pub mod object;
pub mod path;
pub mod scope;

pub use config::{DriveApiConfig, DuplicatePolicy, StorageConfig};
pub use error::{ErrorCode, StorageError};
pub use object::{DriveObject, FileStat};
pub use path::{PathParts, is_root_path, split_path};
pub use scope::Scope;
