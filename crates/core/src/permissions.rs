//! Route authorization policies.
//!
//! Every route names a [`Policy`] and the kind of [`Access`] it performs.
//! [`authorize`] decides whether a (possibly anonymous) caller may proceed.
//! The HTTP layer wraps this in extractors; nothing here knows about HTTP.

use crate::error::CoreError;
use crate::types::DbId;

/// The caller identity established by authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub user_id: DbId,
    pub is_staff: bool,
}

/// Whether an operation only reads state or mutates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// GET and other safe methods.
    Read,
    /// POST, PUT, PATCH, DELETE.
    Write,
}

/// Authorization policy attached to a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Any authenticated user may read; only staff may write.
    ///
    /// Applied to the catalog: genres, actors, cinema halls, movies,
    /// movie sessions.
    StaffOrAuthenticatedReadOnly,
    /// Any authenticated user may read and write (orders, own profile).
    Authenticated,
}

/// Decide whether `principal` may perform `access` under `policy`.
///
/// Anonymous callers always get [`CoreError::Unauthorized`] (401); an
/// authenticated caller lacking privilege gets [`CoreError::Forbidden`] (403).
pub fn authorize(
    principal: Option<&Principal>,
    policy: Policy,
    access: Access,
) -> Result<(), CoreError> {
    let Some(principal) = principal else {
        return Err(CoreError::Unauthorized(
            "Authentication credentials were not provided".into(),
        ));
    };

    match (policy, access) {
        (Policy::Authenticated, _) => Ok(()),
        (Policy::StaffOrAuthenticatedReadOnly, Access::Read) => Ok(()),
        (Policy::StaffOrAuthenticatedReadOnly, Access::Write) if principal.is_staff => Ok(()),
        (Policy::StaffOrAuthenticatedReadOnly, Access::Write) => Err(CoreError::Forbidden(
            "You do not have permission to perform this action".into(),
        )),
    }
}
