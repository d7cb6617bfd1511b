//! Exercise log query model.
//!
//! A log query selects one user's exercises within an optional inclusive date
//! range. The limit only shortens the returned page; counts are always taken
//! over the unlimited [`ExerciseFilter`].

use std::num::NonZeroUsize;

use crate::domain::{Exercise, ExerciseDate, UserId, leading_integer};

/// Inclusive calendar range. A missing bound leaves that side open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    /// Earliest included date.
    pub from: Option<ExerciseDate>,
    /// Latest included date.
    pub to: Option<ExerciseDate>,
}

impl DateRange {
    /// Range with no bounds.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Whether `date` falls within the range, bounds included.
    ///
    /// # Examples
    /// ```
    /// use exercise_tracker::domain::{DateRange, ExerciseDate};
    ///
    /// let jan_1 = ExerciseDate::parse("2023-01-01").expect("date");
    /// let jan_31 = ExerciseDate::parse("2023-01-31").expect("date");
    /// let range = DateRange { from: Some(jan_1), to: Some(jan_31) };
    /// assert!(range.contains(jan_1));
    /// assert!(range.contains(jan_31));
    /// assert!(!range.contains(ExerciseDate::parse("2023-02-01").expect("date")));
    /// ```
    pub fn contains(&self, date: ExerciseDate) -> bool {
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }
}

/// Predicate selecting one user's exercises within a date range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseFilter {
    /// Owner of the selected exercises.
    pub user_id: UserId,
    /// Dates to include.
    pub range: DateRange,
}

impl ExerciseFilter {
    /// All exercises belonging to `user_id`.
    pub fn for_user(user_id: UserId) -> Self {
        Self {
            user_id,
            range: DateRange::unbounded(),
        }
    }

    /// Restrict the filter to `range`.
    pub fn within(mut self, range: DateRange) -> Self {
        self.range = range;
        self
    }

    /// Whether `exercise` satisfies the predicate.
    pub fn matches(&self, exercise: &Exercise) -> bool {
        exercise.user_id() == &self.user_id && self.range.contains(exercise.date())
    }
}

/// Positive cap on the number of log entries returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogLimit(NonZeroUsize);

impl LogLimit {
    /// Wrap a positive limit.
    pub fn new(limit: NonZeroUsize) -> Self {
        Self(limit)
    }

    /// Interpret request text as a limit.
    ///
    /// The leading integer of the text is used (see [`leading_integer`]), so
    /// `"2.5"` and `"2abc"` both cap at two. Only a positive value caps the
    /// log; absent, blank, zero, negative or non-numeric text means "no
    /// limit".
    ///
    /// # Examples
    /// ```
    /// use exercise_tracker::domain::LogLimit;
    ///
    /// assert_eq!(LogLimit::parse_optional(Some("2")).map(LogLimit::get), Some(2));
    /// assert_eq!(LogLimit::parse_optional(Some("2.5")).map(LogLimit::get), Some(2));
    /// assert_eq!(LogLimit::parse_optional(Some("0")), None);
    /// assert_eq!(LogLimit::parse_optional(Some("ten")), None);
    /// assert_eq!(LogLimit::parse_optional(None), None);
    /// ```
    pub fn parse_optional(text: Option<&str>) -> Option<Self> {
        let value = leading_integer(text?)?;
        let count = usize::try_from(value).ok()?;
        NonZeroUsize::new(count).map(Self)
    }

    /// The cap as a plain count.
    pub fn get(self) -> usize {
        self.0.get()
    }
}

/// Filter plus optional page cap handed to the entity store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseQuery {
    /// Which exercises match.
    pub filter: ExerciseFilter,
    /// How many matches to return; all when absent.
    pub limit: Option<LogLimit>,
}
