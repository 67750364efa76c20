//! HTTP middleware stack.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (added by the binary)
//! 2. `TraceLayer` (`http_request` span)
//! 3. Request ID (recorded on the span, echoed in the response)
//! 4. Timeout (added by [`crate::routes::router`] when a timeout is configured)

pub mod request_id;

pub use request_id::request_id_middleware;
