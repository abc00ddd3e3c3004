//! User-facing notification sink.

use std::sync::Arc;

use tracing::{info, warn};

/// Fire-and-forget sink for the messages shown after an API call.
pub trait Notifier: Send + Sync {
    /// Report a successful write.
    fn notify_success(&self, message: &str);

    /// Report a failed call.
    fn notify_failure(&self, message: &str);
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn notify_success(&self, message: &str) {
        (**self).notify_success(message)
    }

    fn notify_failure(&self, message: &str) {
        (**self).notify_failure(message)
    }
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn notify_success(&self, message: &str) {
        (**self).notify_success(message)
    }

    fn notify_failure(&self, message: &str) {
        (**self).notify_failure(message)
    }
}

/// Notifier that only writes to the tracing subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify_success(&self, message: &str) {
        info!(target: "equip::notify", "{message}");
    }

    fn notify_failure(&self, message: &str) {
        warn!(target: "equip::notify", "{message}");
    }
}
