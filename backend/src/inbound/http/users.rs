//! User registration and listing handlers.
//!
//! ```text
//! POST /api/users {"username":"alice"}
//! GET /api/users
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{CreateUserRequest, UserSummary};
use crate::inbound::http::ApiResult;
use crate::inbound::http::payload::{JsonOrForm, into_payload};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Request payload for `POST /api/users`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct CreateUserRequestBody {
    /// Name to register.
    #[schema(example = "alice")]
    pub username: Option<String>,
}

/// A registered user as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct UserResponseBody {
    /// Store-issued identifier.
    #[serde(rename = "_id")]
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    /// Registered name.
    #[schema(example = "alice")]
    pub username: String,
}

impl From<UserSummary> for UserResponseBody {
    fn from(value: UserSummary) -> Self {
        Self {
            id: value.id.into(),
            username: value.username.into(),
        }
    }
}

/// Register a user.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body(
        content(
            (CreateUserRequestBody = "application/json"),
            (CreateUserRequestBody = "application/x-www-form-urlencoded")
        )
    ),
    responses(
        (status = 200, description = "User created", body = UserResponseBody),
        (status = 400, description = "Username missing", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: JsonOrForm<CreateUserRequestBody>,
) -> ApiResult<web::Json<UserResponseBody>> {
    let body = into_payload(payload);
    let user = state
        .commands
        .create_user(CreateUserRequest {
            username: body.username,
        })
        .await?;
    Ok(web::Json(user.into()))
}

/// List every registered user.
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Users", body = [UserResponseBody]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<UserResponseBody>>> {
    let users = state.queries.list_users().await?;
    Ok(web::Json(users.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests;
