//! Driven port for user and exercise persistence.
//!
//! The exercise log service only needs create, point lookup, scan and count
//! operations; adapters decide how those are stored. Lifecycle is a separate
//! port so the composition root can connect and close the store without the
//! service seeing those operations.

use async_trait::async_trait;

use crate::domain::{
    Exercise, ExerciseDraft, ExerciseFilter, ExerciseQuery, User, UserId, Username,
};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by entity store adapters.
    pub enum EntityStoreError {
        /// The store is not connected or the connection was lost.
        Connection {
            /// Description of the connection failure.
            message: String,
        } => "entity store connection failed: {message}",
        /// A read or write failed during execution.
        Query {
            /// Description of the failed operation.
            message: String,
        } => "entity store query failed: {message}",
    }
}

/// Storage for users and the exercises that reference them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Persist a new user and return it with a freshly issued id.
    async fn create_user(&self, username: &Username) -> Result<User, EntityStoreError>;

    /// Persist a new exercise. The referenced user is not checked.
    async fn create_exercise(&self, draft: &ExerciseDraft) -> Result<Exercise, EntityStoreError>;

    /// Look a user up by id; absence is `Ok(None)`.
    async fn find_user_by_id(&self, id: &UserId) -> Result<Option<User>, EntityStoreError>;

    /// Every user, in insertion order.
    async fn list_users(&self) -> Result<Vec<User>, EntityStoreError>;

    /// Exercises matching the query filter, in insertion order, capped by
    /// the query limit when one is set.
    async fn find_exercises(&self, query: &ExerciseQuery)
    -> Result<Vec<Exercise>, EntityStoreError>;

    /// Number of exercises matching `filter`. No limit applies.
    async fn count_exercises(&self, filter: &ExerciseFilter) -> Result<u64, EntityStoreError>;
}

/// Connection lifecycle of an entity store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoreLifecycle: Send + Sync {
    /// Make the store ready to serve operations. Connecting twice is a no-op.
    async fn connect(&self) -> Result<(), EntityStoreError>;

    /// Flush pending state and stop serving operations.
    async fn close(&self) -> Result<(), EntityStoreError>;

    /// Whether operations will currently be served.
    fn is_ready(&self) -> bool;
}
