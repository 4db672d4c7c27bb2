//! Core data types for the ticker watch bot.

pub mod alert;
pub mod pair;
pub mod tick;

pub use alert::*;
pub use pair::*;
pub use tick::*;
