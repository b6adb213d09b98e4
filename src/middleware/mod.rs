// ABOUTME: HTTP middleware for request correlation and identity resolution
// ABOUTME: Provides request ID propagation, bearer token authentication, and the login gate

//! Request middleware
//!
//! Layer order from the outside in: request id, HTTP trace span, timeout,
//! identity resolution. The login gate is a route layer on protected routes.

/// Bearer token identity resolution, login gate, and principal extractors
pub mod auth;
/// Request ID generation and propagation
pub mod request_id;

pub use auth::{authenticate, require_user, resolve_principal, AuthenticatedUser, CurrentPrincipal};
pub use request_id::{request_id_middleware, RequestId, REQUEST_ID_HEADER};
