use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{ActivityId, CourseId, UserId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ActivityError {
    #[error("minutes spent must be > 0")]
    NoMinutes,

    #[error("lesson name cannot be empty")]
    EmptyLessonName,
}

/// One logged study session. Append-only; ids are assigned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEvent {
    id: ActivityId,
    student_id: UserId,
    course_id: CourseId,
    date: NaiveDate,
    // Older backends send `minutes`.
    #[serde(alias = "minutes")]
    minutes_spent: i64,
    lesson_name: String,
}

impl ActivityEvent {
    #[must_use]
    pub fn from_persisted(
        id: ActivityId,
        student_id: UserId,
        course_id: CourseId,
        date: NaiveDate,
        minutes_spent: i64,
        lesson_name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            student_id,
            course_id,
            date,
            minutes_spent,
            lesson_name: lesson_name.into(),
        }
    }

    /// Materialize a submitted activity once the backend has assigned an id.
    #[must_use]
    pub fn from_new(id: ActivityId, new: NewActivity) -> Self {
        Self {
            id,
            student_id: new.student_id,
            course_id: new.course_id,
            date: new.date,
            minutes_spent: i64::from(new.minutes_spent),
            lesson_name: new.lesson_name,
        }
    }

    #[must_use]
    pub fn id(&self) -> &ActivityId {
        &self.id
    }

    #[must_use]
    pub fn student_id(&self) -> &UserId {
        &self.student_id
    }

    #[must_use]
    pub fn course_id(&self) -> &CourseId {
        &self.course_id
    }

    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Raw minutes as reported; may be zero or negative on malformed input.
    #[must_use]
    pub fn minutes_spent(&self) -> i64 {
        self.minutes_spent
    }

    #[must_use]
    pub fn lesson_name(&self) -> &str {
        &self.lesson_name
    }
}

/// Activity-log command sent to the backend (`POST /activities`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewActivity {
    student_id: UserId,
    course_id: CourseId,
    minutes_spent: u32,
    lesson_name: String,
    date: NaiveDate,
}

impl NewActivity {
    /// # Errors
    ///
    /// Returns `ActivityError` for zero minutes or a blank lesson name.
    pub fn new(
        student_id: UserId,
        course_id: CourseId,
        minutes_spent: u32,
        lesson_name: impl Into<String>,
        date: NaiveDate,
    ) -> Result<Self, ActivityError> {
        let lesson_name = lesson_name.into().trim().to_owned();
        if minutes_spent == 0 {
            return Err(ActivityError::NoMinutes);
        }
        if lesson_name.is_empty() {
            return Err(ActivityError::EmptyLessonName);
        }
        Ok(Self {
            student_id,
            course_id,
            minutes_spent,
            lesson_name,
            date,
        })
    }

    #[must_use]
    pub fn student_id(&self) -> &UserId {
        &self.student_id
    }

    #[must_use]
    pub fn course_id(&self) -> &CourseId {
        &self.course_id
    }

    #[must_use]
    pub fn minutes_spent(&self) -> u32 {
        self.minutes_spent
    }

    #[must_use]
    pub fn lesson_name(&self) -> &str {
        &self.lesson_name
    }

    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 21).unwrap()
    }

    #[test]
    fn new_activity_requires_minutes_and_lesson() {
        let err = NewActivity::new(UserId::new("u1"), CourseId::new("c1"), 0, "HOCs", day())
            .unwrap_err();
        assert_eq!(err, ActivityError::NoMinutes);

        let err = NewActivity::new(UserId::new("u1"), CourseId::new("c1"), 10, "   ", day())
            .unwrap_err();
        assert_eq!(err, ActivityError::EmptyLessonName);
    }

    #[test]
    fn command_serializes_date_without_time() {
        let cmd =
            NewActivity::new(UserId::new("u1"), CourseId::new("c1"), 45, "HOCs", day()).unwrap();
        let json = serde_json::to_value(&cmd).unwrap();
        assert_eq!(json["date"], "2024-05-21");
        assert_eq!(json["minutesSpent"], 45);
        assert_eq!(json["studentId"], "u1");
    }

    #[test]
    fn accepts_legacy_minutes_field() {
        let raw = r#"{"id":"a1","studentId":"u1","courseId":"c1","date":"2024-05-21","minutes":30,"lessonName":"Colors"}"#;
        let event: ActivityEvent = serde_json::from_str(raw).unwrap();
        assert_eq!(event.minutes_spent(), 30);
    }
}
