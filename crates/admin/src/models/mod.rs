//! Session-stored admin state.

pub mod session;

pub use session::{CurrentAdmin, keys as session_keys};
