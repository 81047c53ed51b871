//! snac engine - request construction and execution
//!
//! Callers build a frozen `Request` with `RequestBuilder`, then `execute` it
//! against any `Database` implementation. The engine authorizes, validates,
//! makes a single storage call and tags the result.

pub mod commands;

pub use commands::{
    execute, Credentials, Operation, OperationKind, Outcome, Request, RequestBuilder, ResultKind,
};
