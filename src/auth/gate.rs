//! Authorization checks shared by every ownership-scoped operation.
//!
//! Two guards run before any store mutation: [`require_authenticated`] turns the
//! request context into a caller identity, and [`require_ownership`] compares a
//! resource's resolved owner with that caller. A task's owner is always the owner
//! of its parent project; callers resolve that chain before invoking the gate.

use std::fmt;
use std::str::FromStr;

use super::extractors::RequestContext;
use crate::error::AppError;
use crate::models::{User, UserId};

/// How a foreign-owned resource is reported to a caller who does not own it.
///
/// The same policy applies to projects and tasks alike.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum OwnershipPolicy {
    /// Report "not found", indistinguishable from a resource that does not exist.
    #[default]
    Conceal,
    /// Report "not authorized", revealing that the resource exists.
    Reveal,
}

impl FromStr for OwnershipPolicy {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "conceal" => Ok(OwnershipPolicy::Conceal),
            "reveal" => Ok(OwnershipPolicy::Reveal),
            other => Err(AppError::InternalServerError(format!(
                "Unknown ownership policy '{}', expected 'conceal' or 'reveal'",
                other
            ))),
        }
    }
}

/// The kind of resource being guarded, used to word "not found" errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Project,
    Task,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Resource::Project => write!(f, "Project"),
            Resource::Task => write!(f, "Task"),
        }
    }
}

impl Resource {
    pub fn not_found(self) -> AppError {
        AppError::NotFound(format!("{} not found", self))
    }
}

/// Returns the caller's identity, or `Unauthorized("Not authenticated")` for an
/// anonymous context.
pub fn require_authenticated(context: &RequestContext) -> Result<&User, AppError> {
    context
        .user()
        .ok_or_else(|| AppError::Unauthorized("Not authenticated".into()))
}

/// Checks that `caller` owns a resource whose resolved owner is `owner`.
///
/// A missing owner means the resource (or a link in its ownership chain) does not
/// exist and always yields `NotFound`. A foreign owner yields `NotFound` or
/// `Forbidden("Not authorized")` depending on `policy`.
pub fn require_ownership(
    resource: Resource,
    owner: Option<UserId>,
    caller: UserId,
    policy: OwnershipPolicy,
) -> Result<(), AppError> {
    match owner {
        None => Err(resource.not_found()),
        Some(owner) if owner == caller => Ok(()),
        Some(owner) => {
            log::debug!(
                "user {} denied access to {} owned by user {}",
                caller,
                resource,
                owner
            );
            match policy {
                OwnershipPolicy::Conceal => Err(resource.not_found()),
                OwnershipPolicy::Reveal => Err(AppError::Forbidden("Not authorized".into())),
            }
        }
    }
}
