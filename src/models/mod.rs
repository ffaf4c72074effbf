pub mod project;
pub mod task;
pub mod user;

use std::borrow::Cow;
use validator::ValidationError;

pub use project::{Project, ProjectDetails, ProjectInput, ProjectResponse};
pub use task::{StatusUpdate, Task, TaskInput, TaskQuery, TaskResponse, TaskStatus};
pub use user::User;

pub type UserId = i32;
pub type ProjectId = i32;
pub type TaskId = i32;

/// Rejects strings that are empty or consist only of whitespace.
pub(crate) fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some(Cow::from("must not be blank"));
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("Garden").is_ok());
        assert!(validate_not_blank("  x ").is_ok());
        assert!(validate_not_blank("").is_err());
        assert!(validate_not_blank(" \t\n").is_err());
    }
}
