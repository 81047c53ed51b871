//! Structured logging facility
//!
//! - Single initialization point via `init(profile)` / `init_with_level`
//! - Boundary macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Test capture mode for deterministic assertions
//!
//! The engine owns boundary logging for each request. The store and the model
//! only emit `tracing::debug!` for internal details.

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, init_with_level, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
