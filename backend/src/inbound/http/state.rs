//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{ExerciseLogCommand, ExerciseLogQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Write use cases.
    pub commands: Arc<dyn ExerciseLogCommand>,
    /// Read use cases.
    pub queries: Arc<dyn ExerciseLogQuery>,
}

impl HttpState {
    /// Construct state from the command and query ports.
    ///
    /// A single service usually implements both; pass it twice.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use exercise_tracker::domain::ExerciseLogService;
    /// use exercise_tracker::inbound::http::state::HttpState;
    /// use exercise_tracker::outbound::persistence::InMemoryEntityStore;
    /// use mockable::DefaultClock;
    ///
    /// let service = Arc::new(ExerciseLogService::new(
    ///     Arc::new(InMemoryEntityStore::new()),
    ///     Arc::new(DefaultClock),
    /// ));
    /// let state = HttpState::new(service.clone(), service);
    /// let _queries = state.queries.clone();
    /// ```
    pub fn new(commands: Arc<dyn ExerciseLogCommand>, queries: Arc<dyn ExerciseLogQuery>) -> Self {
        Self { commands, queries }
    }
}
