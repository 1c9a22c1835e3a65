use tracing::warn;

/// Message shown when a cart toggle fails.
pub const CART_TOGGLE_ALERT: &str = "Failed to add item to cart";

/// Blocking, user-visible alerts.
pub trait Notifier: Send + Sync + 'static {
    fn alert(&self, message: &str);
}

/// Reports alerts as `warn` events. Used when no UI is attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn alert(&self, message: &str) {
        warn!(alert = %message, "User alert");
    }
}
