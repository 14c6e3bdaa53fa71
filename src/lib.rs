// Mergington High School Activities - Core Library
// Exposes all modules for use in the API server and tests

pub mod http;
pub mod registry;
pub mod service;

// Re-export commonly used types
pub use http::{app, ActivityRecord, HealthResponse, MessageResponse};
pub use registry::{Activity, ActivityStore};
pub use service::{ActivityError, ActivityService};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
