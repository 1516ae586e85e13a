//! Shift resolver orchestrator.
//!
//! When a widget is dropped onto others, every widget from the first collision
//! onward (in canonical order) is relocated to the next free slot; widgets
//! before that point never move.

mod core;

pub use self::core::{Resolution, resolve, sort_canonical};
