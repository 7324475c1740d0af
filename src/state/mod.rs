//! State module for tracking pagination progress
//!
//! # Components
//!
//! - `WalkState`: where the pagination walker is within one listing chain

mod walk_state;

pub use walk_state::WalkState;
