//! equip-core - Types, validation, and client state for the equip inventory
//! client.
//!
//! Data flows in one direction: a view asks the [`EquipmentApi`] for records,
//! the API talks to a [`Collection`], every response is checked by the
//! [`schema`] module, and the typed result lands in the [`EquipmentStore`]
//! when the view that asked is still around.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use equip_core::{Collection, DetailView, EquipmentApi, EquipmentId, EquipmentStore, TracingNotifier};
//!
//! # async fn example(collection: impl Collection) -> Result<(), equip_core::Error> {
//! let api = Arc::new(EquipmentApi::new(collection, TracingNotifier));
//! let store = EquipmentStore::new();
//!
//! for record in api.list().await? {
//!     println!("{} {} {}", record.id, record.name, record.status);
//! }
//!
//! let view = DetailView::mount(api.clone(), store.clone());
//! view.load(&EquipmentId::new("1")?).await?;
//! assert!(store.selected_equipment().is_some());
//! view.unmount();
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod error;
pub mod model;
pub mod schema;
pub mod store;
pub mod traits;
pub mod types;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

pub use api::EquipmentApi;
pub use error::{Error, InvalidInputError, TransportError};
pub use model::{Equipment, EquipmentPatch, NewEquipment};
pub use schema::{ValidationError, validate_many, validate_one};
pub use store::{DEFAULT_RECENT_CAPACITY, EquipmentStore};
pub use traits::{Collection, Notifier, TracingNotifier};
pub use types::{ApiUrl, DEFAULT_API_BASE_URL, EquipmentId, Status, Timestamp};
pub use view::{DetailLoader, DetailView, ScopeHandle, ViewScope};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
