pub mod auth;
pub mod concepts;

// Re-export auth module for easier access
pub use auth::*;
