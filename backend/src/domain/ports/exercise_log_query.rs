//! Driving port for reads: listing users and fetching exercise logs.

use async_trait::async_trait;

use crate::domain::{Description, DurationMinutes, Error, ExerciseDate, User, UserId, Username};

/// Identity-and-name projection of a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    /// Store-issued identifier.
    pub id: UserId,
    /// Registered name.
    pub username: Username,
}

impl From<User> for UserSummary {
    fn from(value: User) -> Self {
        Self {
            id: value.id().clone(),
            username: value.username().clone(),
        }
    }
}

/// Input for fetching a user's exercise log.
///
/// `from` and `to` are inclusive date bounds as request text; `limit` caps the
/// returned entries when it parses to a positive integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetLogRequest {
    /// Owner of the log.
    pub user_id: UserId,
    /// Earliest date to include.
    pub from: Option<String>,
    /// Latest date to include.
    pub to: Option<String>,
    /// Maximum number of entries.
    pub limit: Option<String>,
}

impl GetLogRequest {
    /// Unfiltered, uncapped request for `user_id`.
    pub fn for_user(user_id: UserId) -> Self {
        Self {
            user_id,
            from: None,
            to: None,
            limit: None,
        }
    }
}

/// One exercise in a log, stripped of identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// What was done.
    pub description: Description,
    /// Whole minutes.
    pub duration: DurationMinutes,
    /// Calendar date.
    pub date: ExerciseDate,
}

/// A user's exercise log.
///
/// `count` is the number of exercises matching the user and date range,
/// regardless of any limit; `log` may hold fewer entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseLog {
    /// Owner of the log.
    pub id: UserId,
    /// Owner's registered name.
    pub username: Username,
    /// Total matching exercises, ignoring the limit.
    pub count: u64,
    /// Matching exercises in insertion order, capped by the limit.
    pub log: Vec<LogEntry>,
}

/// Use-case port for exercise tracker reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExerciseLogQuery: Send + Sync {
    /// Every registered user.
    async fn list_users(&self) -> Result<Vec<UserSummary>, Error>;

    /// The exercise log of an existing user.
    async fn get_log(&self, request: GetLogRequest) -> Result<ExerciseLog, Error>;
}
