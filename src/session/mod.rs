//! Inspection sessions
//!
//! [`InspectorSession`] owns the snapshot, selection, expansion set, search query and
//! islands-only flag, and is the only writer of that state. Keyboard navigation runs over the
//! rows currently visible in the displayed tree.

pub mod controller;
pub mod keys;

pub use controller::{InspectorSession, SessionError, SessionStatus};
pub use keys::NavKey;
