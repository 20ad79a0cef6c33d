//! Executor module - remote browser automation backends
//!
//! The executor is opaque: it takes a step sequence and returns per-step
//! outputs. `HttpExecutor` is the only bundled backend.

pub mod http;
pub mod traits;

pub use http::HttpExecutor;
pub use traits::StepExecutor;
