//! Exercise data model and input coercion.
//!
//! Requests describe exercises loosely: the duration may be a JSON number or
//! numeric text, the date free text or nothing at all. The constructors here
//! are the single place where that input becomes typed values, and they reject
//! anything they cannot coerce rather than storing an invalid marker.

use std::fmt;

use chrono::{DateTime, NaiveDate};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::UserId;

/// Calendar format used when rendering exercise dates, e.g. `Mon Jan 02 2023`.
pub const RENDERED_DATE_FORMAT: &str = "%a %b %d %Y";

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Validation errors raised while coercing exercise input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExerciseValidationError {
    /// The description was blank once trimmed.
    EmptyDescription,
    /// The duration text was blank.
    MissingDuration,
    /// The duration could not be read as a number of minutes.
    InvalidDuration {
        /// Input as received.
        value: String,
    },
    /// The date matched none of the accepted formats.
    InvalidDate {
        /// Input as received.
        value: String,
    },
}

impl fmt::Display for ExerciseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "description must not be empty"),
            Self::MissingDuration => write!(f, "duration must not be empty"),
            Self::InvalidDuration { value } => write!(f, "duration must be a number, got {value:?}"),
            Self::InvalidDate { value } => {
                write!(f, "date must be a valid calendar date, got {value:?}")
            }
        }
    }
}

impl std::error::Error for ExerciseValidationError {}

/// Identifier assigned to an exercise by the entity store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExerciseId(Uuid);

impl ExerciseId {
    /// Generate a fresh identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ExerciseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Free-text description of an exercise session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Description(String);

impl Description {
    /// Validate and construct a [`Description`].
    pub fn new(description: impl Into<String>) -> Result<Self, ExerciseValidationError> {
        Self::from_owned(description.into())
    }

    fn from_owned(description: String) -> Result<Self, ExerciseValidationError> {
        if description.trim().is_empty() {
            return Err(ExerciseValidationError::EmptyDescription);
        }
        Ok(Self(description))
    }
}

impl AsRef<str> for Description {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<Description> for String {
    fn from(value: Description) -> Self {
        value.0
    }
}

impl TryFrom<String> for Description {
    type Error = ExerciseValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Duration as supplied by a request, before coercion.
///
/// Deserialises from a JSON integer, a JSON float or a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DurationInput {
    /// Whole number of minutes.
    Whole(i64),
    /// Fractional minutes; truncated toward zero.
    Fractional(f64),
    /// Numeric text, e.g. a form field.
    Text(String),
}

impl DurationInput {
    /// Whether the input carries no value at all (blank text).
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(text) if text.trim().is_empty())
    }
}

impl From<i64> for DurationInput {
    fn from(value: i64) -> Self {
        Self::Whole(value)
    }
}

impl From<&str> for DurationInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// Read the integer at the start of `text`.
///
/// Leading whitespace and one sign are skipped, then digits are taken up to
/// the first non-digit, so `"12.75"` and `"30min"` both yield their whole
/// part and `"1e3"` yields 1. Text without leading digits, or whose digits
/// overflow `i64`, yields `None`.
///
/// # Examples
/// ```
/// use exercise_tracker::domain::leading_integer;
///
/// assert_eq!(leading_integer(" 2.5"), Some(2));
/// assert_eq!(leading_integer("-4 laps"), Some(-4));
/// assert_eq!(leading_integer("abc"), None);
/// ```
pub fn leading_integer(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let digits_end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let digits = unsigned.get(..digits_end).filter(|digits| !digits.is_empty())?;
    let magnitude = digits.parse::<i64>().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Exercise duration in whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DurationMinutes(i64);

// 2^63 as f64; every float strictly below it and at or above -2^63 fits in i64.
const I64_UPPER_BOUND: f64 = 9_223_372_036_854_775_808.0;

impl DurationMinutes {
    /// Wrap a whole number of minutes.
    pub fn new(minutes: i64) -> Self {
        Self(minutes)
    }

    /// Coerce request input into whole minutes.
    ///
    /// Numbers are truncated toward zero; text contributes its leading
    /// integer (see [`leading_integer`]).
    ///
    /// # Examples
    /// ```
    /// use exercise_tracker::domain::{DurationInput, DurationMinutes};
    ///
    /// let minutes = DurationMinutes::coerce(&DurationInput::from("30.9")).expect("numeric");
    /// assert_eq!(minutes.get(), 30);
    /// assert!(DurationMinutes::coerce(&DurationInput::from("half an hour")).is_err());
    /// ```
    pub fn coerce(input: &DurationInput) -> Result<Self, ExerciseValidationError> {
        match input {
            DurationInput::Whole(minutes) => Ok(Self(*minutes)),
            DurationInput::Fractional(minutes) => {
                Self::truncate(*minutes).ok_or_else(|| ExerciseValidationError::InvalidDuration {
                    value: minutes.to_string(),
                })
            }
            DurationInput::Text(text) => {
                if text.trim().is_empty() {
                    return Err(ExerciseValidationError::MissingDuration);
                }
                leading_integer(text)
                    .map(Self)
                    .ok_or_else(|| ExerciseValidationError::InvalidDuration {
                        value: text.clone(),
                    })
            }
        }
    }

    fn truncate(minutes: f64) -> Option<Self> {
        if !minutes.is_finite() {
            return None;
        }
        let whole = minutes.trunc();
        if whole < -I64_UPPER_BOUND || whole >= I64_UPPER_BOUND {
            return None;
        }
        #[expect(
            clippy::cast_possible_truncation,
            reason = "value is integral and range-checked above"
        )]
        let minutes = whole as i64;
        Some(Self(minutes))
    }

    /// Number of whole minutes.
    pub fn get(self) -> i64 {
        self.0
    }
}

/// Calendar day an exercise took place on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExerciseDate(NaiveDate);

impl ExerciseDate {
    /// Wrap a calendar date.
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Today's date according to `clock` (UTC).
    pub fn today(clock: &dyn Clock) -> Self {
        Self(clock.utc().date_naive())
    }

    /// Parse request text into a calendar date.
    ///
    /// Accepts `YYYY-MM-DD`, RFC 3339 timestamps (keeping their calendar date)
    /// and the rendered `Www Mmm DD YYYY` form.
    ///
    /// # Examples
    /// ```
    /// use exercise_tracker::domain::ExerciseDate;
    ///
    /// let date = ExerciseDate::parse("2023-01-02").expect("ISO date");
    /// assert_eq!(date.to_string(), "Mon Jan 02 2023");
    /// assert_eq!(ExerciseDate::parse("Mon Jan 02 2023"), Ok(date));
    /// ```
    pub fn parse(text: &str) -> Result<Self, ExerciseValidationError> {
        let trimmed = text.trim();
        NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT)
            .ok()
            .or_else(|| {
                DateTime::parse_from_rfc3339(trimmed)
                    .ok()
                    .map(|timestamp| timestamp.date_naive())
            })
            .or_else(|| NaiveDate::parse_from_str(trimmed, RENDERED_DATE_FORMAT).ok())
            .map(Self)
            .ok_or_else(|| ExerciseValidationError::InvalidDate {
                value: text.to_owned(),
            })
    }

    /// Parse optional request text, treating absent or blank input as `None`.
    pub fn parse_optional(text: Option<&str>) -> Result<Option<Self>, ExerciseValidationError> {
        match text {
            Some(raw) if !raw.trim().is_empty() => Self::parse(raw).map(Some),
            _ => Ok(None),
        }
    }

    /// The underlying calendar date.
    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for ExerciseDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(RENDERED_DATE_FORMAT))
    }
}

/// Validated exercise awaiting an identifier from the entity store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseDraft {
    /// Referenced user; may not exist.
    pub user_id: UserId,
    /// What was done.
    pub description: Description,
    /// Whole minutes.
    pub duration: DurationMinutes,
    /// Calendar date.
    pub date: ExerciseDate,
}

/// Logged exercise.
///
/// `user_id` is a back-reference; the referenced user may not exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    id: ExerciseId,
    user_id: UserId,
    description: Description,
    duration: DurationMinutes,
    date: ExerciseDate,
}

impl Exercise {
    /// Assign `id` to a validated draft.
    pub fn from_draft(id: ExerciseId, draft: ExerciseDraft) -> Self {
        let ExerciseDraft {
            user_id,
            description,
            duration,
            date,
        } = draft;
        Self {
            id,
            user_id,
            description,
            duration,
            date,
        }
    }

    /// Identifier assigned at creation.
    pub fn id(&self) -> ExerciseId {
        self.id
    }

    /// Owning user's identifier.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// What was done.
    pub fn description(&self) -> &Description {
        &self.description
    }

    /// How long it took.
    pub fn duration(&self) -> DurationMinutes {
        self.duration
    }

    /// When it happened.
    pub fn date(&self) -> ExerciseDate {
        self.date
    }
}
