pub mod events_service;
pub mod user_agent;

pub use events_service::*;
