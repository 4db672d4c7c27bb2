//! Alert rendering and Telegram delivery.

pub mod format;
pub mod notifier;

pub use format::*;
pub use notifier::*;
