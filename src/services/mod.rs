//! Service implementations: the HTTP transport adapter and the virtual
//! filesystem layer built on top of it.

pub mod arbiter;
pub mod drive_transport_http;
pub mod graph_index;
pub mod path_resolver;
pub mod storage;

pub use arbiter::{DuplicateNameArbiter, NameCollision};
pub use drive_transport_http::{FOLDER_MIME_TYPE, HttpDriveTransport};
pub use graph_index::ObjectIndex;
pub use path_resolver::{Expect, PathResolver, Resolution};
pub use storage::{CloudStorage, SubscriptionId};
