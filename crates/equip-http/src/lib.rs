//! equip-http - HTTP-backed equipment collection.

mod client;
mod collection;

pub use collection::HttpCollection;
