//! HTTP inbound adapter exposing REST endpoints.

use actix_web::{Scope, web};

pub mod error;
pub mod exercises;
pub mod health;
pub mod payload;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use error::ApiResult;

/// Scope mounting the user and exercise routes under `/api`.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use exercise_tracker::inbound::http::api_scope;
///
/// let app = App::new().service(api_scope());
/// ```
pub fn api_scope() -> Scope {
    web::scope("/api")
        .app_data(payload::json_config())
        .app_data(payload::form_config())
        .service(users::create_user)
        .service(users::list_users)
        .service(exercises::log_exercise)
        .service(exercises::get_log)
}
