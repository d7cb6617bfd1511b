//! Exercise log service.
//!
//! Implements both driving ports over any [`EntityStore`]. Writes never check
//! that the referenced user exists; reads do, after the log has been built.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::domain::ports::{
    CreateUserRequest, EntityStore, EntityStoreError, ExerciseLog, ExerciseLogCommand,
    ExerciseLogQuery, GetLogRequest, LogEntry, LogExerciseRequest, LoggedExercise, UserSummary,
};
use crate::domain::{
    DateRange, Description, DurationMinutes, Error, Exercise, ExerciseDate, ExerciseDraft,
    ExerciseFilter, ExerciseQuery, LogLimit, Username,
};

const USERNAME_REQUIRED: &str = "username required";
const EXERCISE_FIELDS_REQUIRED: &str = "description and duration required";
const USER_NOT_FOUND: &str = "User not found";
const CREATE_USER_FAILED: &str = "Failed to create user";
const ADD_EXERCISE_FAILED: &str = "An error occurred while adding the exercise.";
const LIST_USERS_FAILED: &str = "Failed to retrieve users";
const FETCH_LOG_FAILED: &str = "An error occurred while fetching logs.";

/// Failures raised by the exercise log use cases.
#[derive(Debug, Error)]
pub enum ExerciseLogError {
    /// Request input was missing or could not be coerced.
    #[error("{message}")]
    Validation {
        /// Request field at fault.
        field: &'static str,
        /// Client-facing explanation.
        message: String,
    },
    /// The requested user does not exist.
    #[error("User not found")]
    NotFound,
    /// A write did not complete.
    #[error("{message}")]
    CreationFailed {
        /// Client-facing summary.
        message: &'static str,
        /// Underlying store failure.
        source: EntityStoreError,
    },
    /// A read did not complete.
    #[error("{message}")]
    RetrievalFailed {
        /// Client-facing summary.
        message: &'static str,
        /// Underlying store failure.
        source: EntityStoreError,
    },
}

impl ExerciseLogError {
    fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    fn creation_failed(message: &'static str) -> impl FnOnce(EntityStoreError) -> Self {
        move |source| Self::CreationFailed { message, source }
    }

    fn retrieval_failed(message: &'static str) -> impl FnOnce(EntityStoreError) -> Self {
        move |source| Self::RetrievalFailed { message, source }
    }
}

impl From<ExerciseLogError> for Error {
    fn from(value: ExerciseLogError) -> Self {
        match value {
            ExerciseLogError::Validation { field, message } => {
                Error::invalid_request(message).with_details(json!({ "field": field }))
            }
            ExerciseLogError::NotFound => Error::not_found(USER_NOT_FOUND),
            ExerciseLogError::CreationFailed { message, source }
            | ExerciseLogError::RetrievalFailed { message, source } => {
                error!(error = %source, "{message}");
                Error::internal(message)
            }
        }
    }
}

/// Exercise tracker service implementing the command and query ports.
#[derive(Clone)]
pub struct ExerciseLogService<S> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S> ExerciseLogService<S> {
    /// Create a service over `store`, dating undated exercises with `clock`.
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    fn draft_exercise(&self, request: LogExerciseRequest) -> Result<ExerciseDraft, ExerciseLogError> {
        let LogExerciseRequest {
            user_id,
            description,
            duration,
            date,
        } = request;

        let description = description.filter(|text| !text.trim().is_empty());
        let duration = duration.filter(|input| !input.is_blank());
        let (description, duration) = match (description, duration) {
            (Some(description), Some(duration)) => (description, duration),
            (None, _) => {
                return Err(ExerciseLogError::validation(
                    "description",
                    EXERCISE_FIELDS_REQUIRED,
                ));
            }
            (Some(_), None) => {
                return Err(ExerciseLogError::validation(
                    "duration",
                    EXERCISE_FIELDS_REQUIRED,
                ));
            }
        };

        let description = Description::new(description)
            .map_err(|err| ExerciseLogError::validation("description", err.to_string()))?;
        let duration = DurationMinutes::coerce(&duration)
            .map_err(|err| ExerciseLogError::validation("duration", err.to_string()))?;
        let date = ExerciseDate::parse_optional(date.as_deref())
            .map_err(|err| ExerciseLogError::validation("date", err.to_string()))?
            .unwrap_or_else(|| ExerciseDate::today(self.clock.as_ref()));

        Ok(ExerciseDraft {
            user_id,
            description,
            duration,
            date,
        })
    }
}

fn parse_bound(
    field: &'static str,
    text: Option<&str>,
) -> Result<Option<ExerciseDate>, ExerciseLogError> {
    ExerciseDate::parse_optional(text).map_err(|_| {
        ExerciseLogError::validation(field, format!("{field} must be a valid calendar date"))
    })
}

fn log_entry(exercise: &Exercise) -> LogEntry {
    LogEntry {
        description: exercise.description().clone(),
        duration: exercise.duration(),
        date: exercise.date(),
    }
}

#[async_trait]
impl<S> ExerciseLogCommand for ExerciseLogService<S>
where
    S: EntityStore,
{
    async fn create_user(&self, request: CreateUserRequest) -> Result<UserSummary, Error> {
        let username = request
            .username
            .ok_or_else(|| ExerciseLogError::validation("username", USERNAME_REQUIRED))
            .and_then(|raw| {
                Username::new(raw)
                    .map_err(|_| ExerciseLogError::validation("username", USERNAME_REQUIRED))
            })?;

        let user = self
            .store
            .create_user(&username)
            .await
            .map_err(ExerciseLogError::creation_failed(CREATE_USER_FAILED))?;

        Ok(UserSummary::from(user))
    }

    async fn log_exercise(&self, request: LogExerciseRequest) -> Result<LoggedExercise, Error> {
        let draft = self.draft_exercise(request)?;

        let exercise = self
            .store
            .create_exercise(&draft)
            .await
            .map_err(ExerciseLogError::creation_failed(ADD_EXERCISE_FAILED))?;

        let user = self
            .store
            .find_user_by_id(exercise.user_id())
            .await
            .map_err(ExerciseLogError::creation_failed(ADD_EXERCISE_FAILED))?;

        Ok(LoggedExercise {
            id: draft.user_id,
            username: user.map(|found| found.username().clone()),
            description: exercise.description().clone(),
            duration: exercise.duration(),
            date: exercise.date(),
        })
    }
}

#[async_trait]
impl<S> ExerciseLogQuery for ExerciseLogService<S>
where
    S: EntityStore,
{
    async fn list_users(&self) -> Result<Vec<UserSummary>, Error> {
        let users = self
            .store
            .list_users()
            .await
            .map_err(ExerciseLogError::retrieval_failed(LIST_USERS_FAILED))?;

        Ok(users.into_iter().map(UserSummary::from).collect())
    }

    async fn get_log(&self, request: GetLogRequest) -> Result<ExerciseLog, Error> {
        let GetLogRequest {
            user_id,
            from,
            to,
            limit,
        } = request;

        let range = DateRange {
            from: parse_bound("from", from.as_deref())?,
            to: parse_bound("to", to.as_deref())?,
        };
        let filter = ExerciseFilter::for_user(user_id.clone()).within(range);

        let count = self
            .store
            .count_exercises(&filter)
            .await
            .map_err(ExerciseLogError::retrieval_failed(FETCH_LOG_FAILED))?;

        let query = ExerciseQuery {
            filter,
            limit: LogLimit::parse_optional(limit.as_deref()),
        };
        let exercises = self
            .store
            .find_exercises(&query)
            .await
            .map_err(ExerciseLogError::retrieval_failed(FETCH_LOG_FAILED))?;
        let log = exercises.iter().map(log_entry).collect();

        let user = self
            .store
            .find_user_by_id(&user_id)
            .await
            .map_err(ExerciseLogError::retrieval_failed(FETCH_LOG_FAILED))?
            .ok_or(ExerciseLogError::NotFound)?;

        Ok(ExerciseLog {
            id: user_id,
            username: user.username().clone(),
            count,
            log,
        })
    }
}

#[cfg(test)]
#[path = "exercise_log_service_tests.rs"]
mod tests;
