//! Core equip types.
//!
//! These types enforce their invariants at construction time, so a value that
//! exists is a value that is valid on the wire.

mod api_url;
mod equipment_id;
mod status;
mod timestamp;

pub use api_url::{ApiUrl, DEFAULT_API_BASE_URL};
pub use equipment_id::EquipmentId;
pub use status::Status;
pub use timestamp::Timestamp;
