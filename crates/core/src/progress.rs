//! Progress and mastery aggregation over course and activity records.
//!
//! Every function here is total: zero-lesson courses, over-complete courses
//! and negative minutes degrade to defined defaults instead of panicking or
//! producing NaN.

use chrono::NaiveDate;

use crate::model::{ActivityEvent, Course, User, UserId};

/// Name shown for enrollments whose owner is missing from the roster.
pub const UNKNOWN_STUDENT: &str = "Unknown";

//
// ─── MASTERY ───────────────────────────────────────────────────────────────────
//

/// Unrounded mastery in `0.0..=100.0`; 0 for a course without lessons.
#[must_use]
pub fn mastery_ratio(course: &Course) -> f64 {
    let total = course.total_lessons();
    if total == 0 {
        return 0.0;
    }
    let completed = course.completed_lessons().min(total);
    f64::from(completed) * 100.0 / f64::from(total)
}

/// Percentage of lessons completed, rounded half up.
///
/// A course with `total_lessons == 0` reports 0 so the dashboard stays stable.
#[must_use]
pub fn course_mastery(course: &Course) -> u8 {
    let total = u64::from(course.total_lessons());
    if total == 0 {
        return 0;
    }
    let completed = u64::from(course.completed_lessons()).min(total);
    let rounded = (200 * completed + total) / (2 * total);
    u8::try_from(rounded).unwrap_or(100)
}

/// Mean mastery across a student's courses; 0 for no courses.
#[must_use]
pub fn student_average_mastery(courses: &[Course]) -> u8 {
    mean_mastery(courses.iter())
}

/// Mean mastery across courses in `category`; 0 when none match.
#[must_use]
pub fn category_average(courses: &[Course], category: &str) -> u8 {
    mean_mastery(courses.iter().filter(|course| course.category() == category))
}

fn mean_mastery<'a>(courses: impl Iterator<Item = &'a Course>) -> u8 {
    let (sum, count) = courses.fold((0.0_f64, 0_u32), |(sum, count), course| {
        (sum + mastery_ratio(course), count + 1)
    });
    if count == 0 {
        return 0;
    }
    round_percent(sum / f64::from(count))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn round_percent(value: f64) -> u8 {
    if !value.is_finite() {
        return 0;
    }
    // Clamped to 0..=100 before the cast.
    value.round().clamp(0.0, 100.0) as u8
}

//
// ─── TIME ──────────────────────────────────────────────────────────────────────
//

/// Sum of logged minutes; negative entries count as zero.
#[must_use]
pub fn total_minutes(activities: &[ActivityEvent]) -> u64 {
    activities
        .iter()
        .map(|activity| u64::try_from(activity.minutes_spent()).unwrap_or(0))
        .sum()
}

/// Sum of completed lessons across courses.
#[must_use]
pub fn completed_lessons(courses: &[Course]) -> u64 {
    courses
        .iter()
        .map(|course| u64::from(course.completed_lessons()))
        .sum()
}

//
// ─── ACTIVE COURSE ─────────────────────────────────────────────────────────────
//

/// The most recently accessed course.
///
/// Ties on `last_accessed` resolve to the earliest course in input order.
#[must_use]
pub fn active_course(courses: &[Course]) -> Option<&Course> {
    courses.iter().fold(None, |best: Option<&Course>, course| match best {
        Some(current) if current.last_accessed() >= course.last_accessed() => Some(current),
        _ => Some(course),
    })
}

//
// ─── TREND ─────────────────────────────────────────────────────────────────────
//

/// One point of the daily-focus trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendPoint<'a> {
    pub day: NaiveDate,
    pub minutes: u32,
    pub lesson: &'a str,
}

/// Iterator over the trailing window of activities with positive minutes.
///
/// Cloning restarts the walk from the beginning of the window.
#[derive(Debug, Clone)]
pub struct RecentTrend<'a> {
    window: std::slice::Iter<'a, ActivityEvent>,
}

impl<'a> Iterator for RecentTrend<'a> {
    type Item = TrendPoint<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        for activity in self.window.by_ref() {
            let Ok(minutes) = u32::try_from(activity.minutes_spent()) else {
                continue;
            };
            if minutes == 0 {
                continue;
            }
            return Some(TrendPoint {
                day: activity.date(),
                minutes,
                lesson: activity.lesson_name(),
            });
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.window.len()))
    }
}

/// Last `window_size` activities in input order, skipping entries without minutes.
#[must_use]
pub fn recent_trend(activities: &[ActivityEvent], window_size: usize) -> RecentTrend<'_> {
    let start = activities.len().saturating_sub(window_size);
    RecentTrend {
        window: activities[start..].iter(),
    }
}

//
// ─── PER-STUDENT AND PER-CATEGORY ROLLUPS ──────────────────────────────────────
//

/// Metrics shown in the per-student drill-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StudentMetrics {
    pub course_count: usize,
    pub total_minutes: u64,
    pub completed_lessons: u64,
    pub average_mastery: u8,
}

/// Roll up one student's courses and activities out of a shared snapshot.
#[must_use]
pub fn student_metrics(
    courses: &[Course],
    activities: &[ActivityEvent],
    student_id: &UserId,
) -> StudentMetrics {
    let owned: Vec<Course> = courses
        .iter()
        .filter(|course| course.is_owned_by(student_id))
        .cloned()
        .collect();
    let logged: Vec<ActivityEvent> = activities
        .iter()
        .filter(|activity| activity.student_id() == student_id)
        .cloned()
        .collect();

    StudentMetrics {
        course_count: owned.len(),
        total_minutes: total_minutes(&logged),
        completed_lessons: completed_lessons(&owned),
        average_mastery: student_average_mastery(&owned),
    }
}

/// A single student's standing within a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrollment {
    pub student_id: UserId,
    pub student_name: String,
    pub mastery: u8,
}

/// Class-wide progress for one course category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryProgress {
    pub name: String,
    pub average_mastery: u8,
    pub enrolled: Vec<Enrollment>,
}

impl CategoryProgress {
    #[must_use]
    pub fn student_count(&self) -> usize {
        self.enrolled.len()
    }
}

/// Per-category averages with enrollments, categories in first-seen order.
#[must_use]
pub fn category_breakdown(courses: &[Course], roster: &[User]) -> Vec<CategoryProgress> {
    let mut categories: Vec<&str> = Vec::new();
    for course in courses {
        if !categories.contains(&course.category()) {
            categories.push(course.category());
        }
    }

    categories
        .into_iter()
        .map(|category| {
            let enrolled = courses
                .iter()
                .filter(|course| course.category() == category)
                .map(|course| Enrollment {
                    student_id: course.student_id().clone(),
                    student_name: roster
                        .iter()
                        .find(|user| user.id() == course.student_id())
                        .map_or_else(|| UNKNOWN_STUDENT.to_owned(), |user| user.name().to_owned()),
                    mastery: course_mastery(course),
                })
                .collect();
            CategoryProgress {
                name: category.to_owned(),
                average_mastery: category_average(courses, category),
                enrolled,
            }
        })
        .collect()
}

//
// ─── FORMATTING HELPERS ────────────────────────────────────────────────────────
//

/// Whole hours in a minute count, rounded down.
#[must_use]
pub fn whole_hours(minutes: u64) -> u64 {
    minutes / 60
}

/// `"20h 40m"` style focus time.
#[must_use]
pub fn format_focus_time(minutes: u64) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}
