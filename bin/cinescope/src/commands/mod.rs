//! CLI command implementations.

pub mod favorites;
pub mod server;
pub mod session;
