//! Request body extraction shared by handlers that accept HTML form posts.
//!
//! Bodies that fail to parse are answered with the usual `invalid_request`
//! JSON error rather than actix's plain-text rejection.

use actix_web::web;
use tracing::debug;

use crate::domain::Error;

const MALFORMED_BODY: &str = "request body must be valid JSON or form data";

/// Request body accepted either as JSON or as
/// `application/x-www-form-urlencoded`.
///
/// When neither representation parses, the JSON rejection is reported.
pub type JsonOrForm<T> = web::Either<web::Json<T>, web::Form<T>>;

/// Unwrap whichever representation the client sent.
pub fn into_payload<T>(body: JsonOrForm<T>) -> T {
    match body {
        web::Either::Left(json) => json.into_inner(),
        web::Either::Right(form) => form.into_inner(),
    }
}

fn malformed_body(reason: &dyn std::fmt::Display) -> actix_web::Error {
    debug!(%reason, "rejected request body");
    Error::invalid_request(MALFORMED_BODY).into()
}

/// JSON extractor settings mapping parse failures to domain errors.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| malformed_body(&err))
}

/// Form extractor settings mapping parse failures to domain errors.
pub fn form_config() -> web::FormConfig {
    web::FormConfig::default().error_handler(|err, _req| malformed_body(&err))
}
