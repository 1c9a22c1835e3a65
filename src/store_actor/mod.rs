//! The cart/favorites synchronizer: a single actor that owns the storefront
//! state and keeps it in step with the two backends.

mod messages;
mod notifier;
mod service;
mod state;

pub use messages::*;
pub use notifier::*;
pub use service::*;
pub use state::*;
