//! Domain primitives, aggregates and services.
//!
//! Purpose: define the strongly typed entities behind the exercise tracker and
//! the service that implements its use cases. Types are immutable once
//! constructed; invariants and serialisation contracts are documented on
//! each type.
//!
//! Public surface:
//! - Error (alias to `error::Error`) — transport-agnostic error payload.
//! - ErrorCode (alias to `error::ErrorCode`) — stable error identifier.
//! - User / UserId / Username — registered user identity and display name.
//! - Exercise and its value types — logged exercise sessions.
//! - DateRange / ExerciseFilter / ExerciseQuery / LogLimit — log selection.
//! - ExerciseLogService — implementation of the driving ports.
//! - TraceId — per-request correlation identifier.

pub mod error;
pub mod exercise;
pub mod exercise_log;
mod exercise_log_service;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::exercise::{
    Description, DurationInput, DurationMinutes, Exercise, ExerciseDate, ExerciseDraft,
    ExerciseId, ExerciseValidationError, RENDERED_DATE_FORMAT, leading_integer,
};
pub use self::exercise_log::{DateRange, ExerciseFilter, ExerciseQuery, LogLimit};
pub use self::exercise_log_service::{ExerciseLogError, ExerciseLogService};
pub use self::trace_id::TraceId;
pub use self::user::{User, UserId, UserValidationError, Username};
