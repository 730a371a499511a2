//! Shared helpers for packaging components.

pub mod fs;
pub mod http;
pub mod tool;
