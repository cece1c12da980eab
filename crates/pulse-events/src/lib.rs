pub mod handlers;
pub mod plugin;
pub mod services;
pub mod types;

// Re-export main types
pub use plugin::EventsPlugin;
pub use services::*;
pub use types::*;
