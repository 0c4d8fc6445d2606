//! Configuration types
//!
//! Board-agnostic configuration structures. The firmware embeds them as
//! postcard binary data generated from `camera.toml` at build time.

pub mod types;

pub use types::*;
