//! HTTP boundary
//!
//! Axum routers per domain plus the response envelope. This layer only
//! translates service outcomes into HTTP status codes and JSON bodies; it
//! owns no business rules.

mod enrollment_routes;
mod errors;
mod response;
mod server;
mod student_routes;

pub use errors::{ErrorMessage, ErrorResponse};
pub use response::MessageResponse;
pub use server::{AppState, HttpServer};
