//! Authentication and authorization middleware extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`rbac::ReadAccess`] -- Any authenticated user may read the catalog.
//! - [`rbac::WriteAccess`] -- Only staff may write the catalog.
//! - [`rbac::RequireAuth`] -- Requires any authenticated user.

pub mod auth;
pub mod rbac;
