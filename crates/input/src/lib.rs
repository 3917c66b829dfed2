//! Input mapping: window events become [`Action`]s, actions drive the camera.
//!
//! # Invariants
//! - Nothing here depends on a window system; apps translate their key
//!   codes and cursor events into actions.
//! - Held movement keys are applied once per frame, in a fixed order.

pub mod action;
pub mod cursor;
pub mod state;

pub use action::{Action, apply_action};
pub use cursor::CursorTracker;
pub use state::InputState;
