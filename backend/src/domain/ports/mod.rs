//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod entity_store;
mod exercise_log_command;
mod exercise_log_query;

#[cfg(test)]
pub use entity_store::{MockEntityStore, MockStoreLifecycle};
pub use entity_store::{EntityStore, EntityStoreError, StoreLifecycle};
#[cfg(test)]
pub use exercise_log_command::MockExerciseLogCommand;
pub use exercise_log_command::{
    CreateUserRequest, ExerciseLogCommand, LogExerciseRequest, LoggedExercise,
};
#[cfg(test)]
pub use exercise_log_query::MockExerciseLogQuery;
pub use exercise_log_query::{
    ExerciseLog, ExerciseLogQuery, GetLogRequest, LogEntry, UserSummary,
};
