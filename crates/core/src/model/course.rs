use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{CourseId, UserId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CourseError {
    #[error("course title cannot be empty")]
    EmptyTitle,

    #[error("course category cannot be empty")]
    EmptyCategory,

    #[error("total lessons must be > 0")]
    NoLessons,

    #[error("completed lessons ({completed}) exceed total lessons ({total})")]
    CompletedExceedsTotal { completed: u32, total: u32 },
}

//
// ─── COURSE ────────────────────────────────────────────────────────────────────
//

/// A course enrollment owned by exactly one student.
///
/// Records arriving from the backend are accepted as-is; aggregation treats
/// a zero lesson count or an over-complete course as a defined edge case
/// rather than rejecting the whole snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    id: CourseId,
    student_id: UserId,
    title: String,
    category: String,
    total_lessons: u32,
    completed_lessons: u32,
    #[serde(default)]
    time_spent: u32,
    last_accessed: NaiveDate,
}

impl Course {
    /// Creates a validated course.
    ///
    /// # Errors
    ///
    /// Returns `CourseError` if the title or category is blank, there are no
    /// lessons, or more lessons are completed than exist.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: CourseId,
        student_id: UserId,
        title: impl Into<String>,
        category: impl Into<String>,
        total_lessons: u32,
        completed_lessons: u32,
        time_spent: u32,
        last_accessed: NaiveDate,
    ) -> Result<Self, CourseError> {
        let title = title.into().trim().to_owned();
        let category = category.into().trim().to_owned();

        if title.is_empty() {
            return Err(CourseError::EmptyTitle);
        }
        if category.is_empty() {
            return Err(CourseError::EmptyCategory);
        }
        if total_lessons == 0 {
            return Err(CourseError::NoLessons);
        }
        if completed_lessons > total_lessons {
            return Err(CourseError::CompletedExceedsTotal {
                completed: completed_lessons,
                total: total_lessons,
            });
        }

        Ok(Self::from_persisted(
            id,
            student_id,
            title,
            category,
            total_lessons,
            completed_lessons,
            time_spent,
            last_accessed,
        ))
    }

    /// Rehydrate a course without validation, mirroring what the backend may send.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn from_persisted(
        id: CourseId,
        student_id: UserId,
        title: impl Into<String>,
        category: impl Into<String>,
        total_lessons: u32,
        completed_lessons: u32,
        time_spent: u32,
        last_accessed: NaiveDate,
    ) -> Self {
        Self {
            id,
            student_id,
            title: title.into(),
            category: category.into(),
            total_lessons,
            completed_lessons,
            time_spent,
            last_accessed,
        }
    }

    #[must_use]
    pub fn id(&self) -> &CourseId {
        &self.id
    }

    #[must_use]
    pub fn student_id(&self) -> &UserId {
        &self.student_id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn total_lessons(&self) -> u32 {
        self.total_lessons
    }

    #[must_use]
    pub fn completed_lessons(&self) -> u32 {
        self.completed_lessons
    }

    /// Minutes spent in the course.
    #[must_use]
    pub fn time_spent(&self) -> u32 {
        self.time_spent
    }

    #[must_use]
    pub fn last_accessed(&self) -> NaiveDate {
        self.last_accessed
    }

    /// Lessons left to complete, never negative.
    #[must_use]
    pub fn remaining_lessons(&self) -> u32 {
        self.total_lessons.saturating_sub(self.completed_lessons)
    }

    #[must_use]
    pub fn is_owned_by(&self, student_id: &UserId) -> bool {
        &self.student_id == student_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn new_enforces_lesson_invariants() {
        let err = Course::new(
            CourseId::new("c1"),
            UserId::new("u1"),
            "T",
            "Cat",
            0,
            0,
            0,
            date(2024, 5, 1),
        )
        .unwrap_err();
        assert_eq!(err, CourseError::NoLessons);

        let err = Course::new(
            CourseId::new("c1"),
            UserId::new("u1"),
            "T",
            "Cat",
            5,
            6,
            0,
            date(2024, 5, 1),
        )
        .unwrap_err();
        assert_eq!(
            err,
            CourseError::CompletedExceedsTotal {
                completed: 6,
                total: 5
            }
        );
    }

    #[test]
    fn decodes_backend_shape() {
        let raw = r#"{
            "id": "c1", "studentId": "u1", "title": "Advanced React Patterns",
            "category": "Engineering", "totalLessons": 24, "completedLessons": 18,
            "timeSpent": 1240, "lastAccessed": "2024-05-20"
        }"#;
        let course: Course = serde_json::from_str(raw).unwrap();
        assert_eq!(course.student_id(), &UserId::new("u1"));
        assert_eq!(course.remaining_lessons(), 6);
        assert_eq!(course.last_accessed(), date(2024, 5, 20));
    }

    #[test]
    fn remaining_lessons_saturates() {
        let course = Course::from_persisted(
            CourseId::new("c9"),
            UserId::new("u1"),
            "Odd",
            "Misc",
            3,
            5,
            0,
            date(2024, 5, 1),
        );
        assert_eq!(course.remaining_lessons(), 0);
    }
}
