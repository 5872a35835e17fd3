pub mod api_router;
pub mod catalog;
pub mod core;
pub mod dashboard;
pub mod moderation;
pub mod progress;

pub use crate::core::config;
pub use crate::core::shared;
