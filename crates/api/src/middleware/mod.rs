//! Authentication and authorization middleware extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`rbac::RequireManager`] -- Requires `manager` or `admin` role.
//! - [`rbac::RequireAuth`] -- Requires any authenticated user.
//! - [`preflight`] -- Answers CORS preflight requests with `204 No Content`.

pub mod auth;
pub mod preflight;
pub mod rbac;
