//! Request construction and execution.

pub mod engine_command;
pub mod request;

pub use engine_command::{execute, Outcome, ResultKind};
pub use request::{Credentials, Operation, OperationKind, Request, RequestBuilder};
