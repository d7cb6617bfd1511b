//! Driving port for writes: registering users and logging exercises.
//!
//! Requests carry input exactly as the adapter received it; validation and
//! coercion happen behind the port.

use async_trait::async_trait;

use crate::domain::{
    Description, DurationInput, DurationMinutes, Error, ExerciseDate, UserId, Username,
};

use super::UserSummary;

/// Input for registering a user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateUserRequest {
    /// Requested username; missing or blank is rejected.
    pub username: Option<String>,
}

/// Input for logging an exercise against `user_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct LogExerciseRequest {
    /// User the exercise is logged against.
    pub user_id: UserId,
    /// What was done; required.
    pub description: Option<String>,
    /// Minutes as a number or numeric text; required.
    pub duration: Option<DurationInput>,
    /// Calendar date text; today when absent.
    pub date: Option<String>,
}

/// Result of logging an exercise.
///
/// `id` echoes the user id the exercise was logged against, not the id of the
/// stored exercise. `username` is `None` when no such user exists; the
/// exercise is stored regardless.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedExercise {
    /// The user id from the request.
    pub id: UserId,
    /// Name of that user, when it exists.
    pub username: Option<Username>,
    /// Stored description.
    pub description: Description,
    /// Stored whole minutes.
    pub duration: DurationMinutes,
    /// Stored calendar date.
    pub date: ExerciseDate,
}

/// Use-case port for exercise tracker writes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExerciseLogCommand: Send + Sync {
    /// Register a new user.
    async fn create_user(&self, request: CreateUserRequest) -> Result<UserSummary, Error>;

    /// Record an exercise for a user without checking that the user exists.
    async fn log_exercise(&self, request: LogExerciseRequest) -> Result<LoggedExercise, Error>;
}
