//! equip-file - Filesystem-backed equipment collection.
//!
//! Serves a `file://` base location from a json-server style `db.json`, so
//! the client can be exercised without running the development server.

mod collection;
mod store;

pub use collection::FileCollection;
pub use store::{DB_FILE, FileStore};
