//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::{App, web};

use crate::domain::ports::{MockExerciseLogCommand, MockExerciseLogQuery};
use crate::inbound::http::state::HttpState;

/// Build handler state from mocked driving ports.
pub fn mock_state(
    commands: MockExerciseLogCommand,
    queries: MockExerciseLogQuery,
) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(Arc::new(commands), Arc::new(queries)))
}

/// Application serving every exercise tracker route under `/api`.
pub fn test_app(
    state: web::Data<HttpState>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .service(crate::inbound::http::api_scope())
}
