//! Stikerin API Library
//!
//! HTTP boundary for the sticker pipeline: handlers, error rendering,
//! telemetry and server setup.

pub mod error;
pub mod handlers;
pub mod setup;
pub mod state;
pub mod telemetry;

pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
