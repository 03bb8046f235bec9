//! Use cases driven by the HTTP adapters
//!
//! Each use case turns raw request input into domain values and calls the
//! auth service. Nothing here knows about cookies or status codes.

pub mod auth;
