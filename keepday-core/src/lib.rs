//! Core types for keepday.
//!
//! This crate holds everything that is pure or purely in-memory:
//! - `Event` and related types
//! - grid/week builders and D-day math
//! - the raw-record normalizer
//! - the event cache and the view state machine
//!
//! The CLI crate layers the event-store client and terminal UI on top.

pub mod cache;
pub mod dday;
pub mod error;
pub mod event;
pub mod grid;
pub mod normalize;
pub mod view;

// Re-export the types almost every consumer needs at crate root.
pub use cache::EventCache;
pub use error::{KeepdayError, KeepdayResult};
pub use event::{Event, EventForm, EventPayload, Upcoming};
pub use view::{Msg, Screen, ViewState};
