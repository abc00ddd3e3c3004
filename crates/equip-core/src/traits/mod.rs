//! Seams between the core and its collaborators.

mod collection;
mod notifier;

pub use collection::Collection;
pub use notifier::{Notifier, TracingNotifier};
