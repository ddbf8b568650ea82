//! Services: async flows over external collaborators.
//!
//! DESIGN
//! ======
//! The engine itself never does I/O. Everything that talks to the backend
//! goes through the traits in [`api`], so flows are testable against
//! in-memory mocks and [`http::HttpClient`] is just one implementation.
//!
//! Apply and bake share one [`busy::BusyGate`]: a second invocation while one
//! is in flight is refused, never queued. Nothing here retries.

pub mod api;
pub mod apply;
pub mod busy;
pub mod http;
pub mod render;

/// Grepable error code for logs and host-side error mapping.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}
