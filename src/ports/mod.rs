//! Port definitions for external collaborators.

pub mod transport;

pub use transport::{CreateObject, DriveTransport, ObjectPage};
