//! # Toss & Trips Web
//!
//! The Axum HTTP surface: catalog reads, traveller and booking CRUD, and
//! the contact form. Handlers are thin — parse and validate the request,
//! call the store, map the result. The only side channel is the
//! post-commit enqueue of confirmation jobs after a booking or contact
//! message is created; the response never waits on (or reflects) the
//! email pipeline.
//!
//! # Request Flow
//!
//! 1. **HTTP request** arrives at an Axum handler
//! 2. **Validate** the JSON body / query parameters
//! 3. **Call** the store
//! 4. **Enqueue** the confirmation job (creation endpoints, post-commit)
//! 5. **Map** the result to JSON or an [`AppError`] response

pub mod api;
pub mod error;
pub mod middleware;
pub mod pagination;
pub mod routes;
pub mod state;

pub use error::AppError;
pub use middleware::{correlation_id_layer, CORRELATION_ID_HEADER};
pub use routes::build_router;
pub use state::AppState;

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
