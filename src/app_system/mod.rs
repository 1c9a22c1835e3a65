//! System orchestration, configuration, startup, walkthrough and shutdown logic.

pub mod config;
pub mod demo;
pub mod error;
pub mod logging;
pub mod store_system;

pub use config::*;
pub use demo::*;
pub use error::*;
pub use logging::*;
pub use store_system::*;
