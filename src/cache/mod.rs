//! Caller-owned memo of shift resolutions.
//!
//! Entries are keyed by a blake3 digest of everything that influences the
//! result, so a stale hit is impossible and separate callers never share state.

mod core;

pub use self::core::{LayoutCache, resolution_key};
