//! Core types shared across the snac crates
//!
//! - **Correlation types**: `RequestId`, `TraceId`, `RequestContext`
//! - **Sensitive data**: `Sensitive<T>` wrapper that redacts passwords in logs
//! - **Schema constants**: canonical field keys and event names for logging

pub mod correlation;
pub mod schema;
pub mod sensitive;

pub use correlation::{RequestContext, RequestId, TraceId};
pub use sensitive::Sensitive;
