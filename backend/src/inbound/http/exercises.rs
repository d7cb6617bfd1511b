//! Exercise logging and log retrieval handlers.
//!
//! ```text
//! POST /api/users/{user_id}/exercises {"description":"run","duration":30,"date":"2023-01-02"}
//! GET /api/users/{user_id}/logs?from=2023-01-01&to=2023-01-31&limit=10
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{ExerciseLog, GetLogRequest, LogEntry, LogExerciseRequest, LoggedExercise};
use crate::domain::{DurationInput, Error, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::payload::{JsonOrForm, into_payload};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Request payload for logging an exercise.
///
/// `duration` may be a number or numeric text; `date` defaults to today.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct LogExerciseRequestBody {
    /// What was done.
    #[schema(example = "run")]
    pub description: Option<String>,
    /// Minutes spent.
    #[schema(value_type = Option<f64>, example = 30)]
    pub duration: Option<DurationInput>,
    /// Day of the exercise.
    #[schema(example = "2023-01-02")]
    pub date: Option<String>,
}

/// A freshly logged exercise. `_id` is the owning user's id.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct LoggedExerciseResponseBody {
    /// Owner's name; omitted when the user is unknown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "alice")]
    pub username: Option<String>,
    /// What was done.
    #[schema(example = "run")]
    pub description: String,
    /// Whole minutes.
    #[schema(example = 30)]
    pub duration: i64,
    /// Date as `Www Mmm DD YYYY`.
    #[schema(example = "Mon Jan 02 2023")]
    pub date: String,
    /// Owning user's id.
    #[serde(rename = "_id")]
    pub id: String,
}

impl From<LoggedExercise> for LoggedExerciseResponseBody {
    fn from(value: LoggedExercise) -> Self {
        Self {
            username: value.username.map(String::from),
            description: value.description.into(),
            duration: value.duration.get(),
            date: value.date.to_string(),
            id: value.id.into(),
        }
    }
}

/// Query parameters for `GET /api/users/{user_id}/logs`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LogQueryParams {
    /// Earliest date to include.
    #[param(example = "2023-01-01")]
    pub from: Option<String>,
    /// Latest date to include.
    #[param(example = "2023-01-31")]
    pub to: Option<String>,
    /// Maximum number of entries; ignored unless a positive integer.
    #[param(example = "10")]
    pub limit: Option<String>,
}

/// One entry of an exercise log.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct LogEntryBody {
    /// What was done.
    pub description: String,
    /// Whole minutes.
    pub duration: i64,
    /// Date as `Www Mmm DD YYYY`.
    #[schema(example = "Mon Jan 02 2023")]
    pub date: String,
}

impl From<LogEntry> for LogEntryBody {
    fn from(value: LogEntry) -> Self {
        Self {
            description: value.description.into(),
            duration: value.duration.get(),
            date: value.date.to_string(),
        }
    }
}

/// A user's exercise log. `count` ignores `limit`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct ExerciseLogResponseBody {
    /// Owner's name.
    pub username: String,
    /// Matching exercises before the limit.
    pub count: u64,
    /// Owner's id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Returned entries.
    pub log: Vec<LogEntryBody>,
}

impl From<ExerciseLog> for ExerciseLogResponseBody {
    fn from(value: ExerciseLog) -> Self {
        Self {
            username: value.username.into(),
            count: value.count,
            id: value.id.into(),
            log: value.log.into_iter().map(LogEntryBody::from).collect(),
        }
    }
}

fn parse_user_id(raw: String) -> Result<UserId, Error> {
    UserId::new(raw).map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(json!({ "field": "user_id" }))
    })
}

/// Log an exercise for a user.
///
/// The user is not required to exist; the response omits `username` when it
/// does not.
#[utoipa::path(
    post,
    path = "/api/users/{user_id}/exercises",
    params(("user_id" = String, Path, description = "Owning user id")),
    request_body(
        content(
            (LogExerciseRequestBody = "application/json"),
            (LogExerciseRequestBody = "application/x-www-form-urlencoded")
        )
    ),
    responses(
        (status = 200, description = "Exercise logged", body = LoggedExerciseResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["exercises"],
    operation_id = "logExercise"
)]
#[post("/users/{user_id}/exercises")]
pub async fn log_exercise(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: JsonOrForm<LogExerciseRequestBody>,
) -> ApiResult<web::Json<LoggedExerciseResponseBody>> {
    let user_id = parse_user_id(path.into_inner())?;
    let body = into_payload(payload);
    let logged = state
        .commands
        .log_exercise(LogExerciseRequest {
            user_id,
            description: body.description,
            duration: body.duration,
            date: body.date,
        })
        .await?;
    Ok(web::Json(logged.into()))
}

/// Fetch a user's exercise log.
#[utoipa::path(
    get,
    path = "/api/users/{user_id}/logs",
    params(("user_id" = String, Path, description = "User id"), LogQueryParams),
    responses(
        (status = 200, description = "Exercise log", body = ExerciseLogResponseBody),
        (status = 400, description = "Invalid date bound", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["exercises"],
    operation_id = "getExerciseLog"
)]
#[get("/users/{user_id}/logs")]
pub async fn get_log(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<LogQueryParams>,
) -> ApiResult<web::Json<ExerciseLogResponseBody>> {
    let user_id = parse_user_id(path.into_inner())?;
    let LogQueryParams { from, to, limit } = query.into_inner();
    let log = state
        .queries
        .get_log(GetLogRequest {
            user_id,
            from,
            to,
            limit,
        })
        .await?;
    Ok(web::Json(log.into()))
}

#[cfg(test)]
#[path = "exercises_tests.rs"]
mod tests;
