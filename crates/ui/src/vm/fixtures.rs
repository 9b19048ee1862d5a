use chrono::NaiveDate;
use edutrack_core::model::{
    ActivityEvent, ActivityId, Course, CourseId, DashboardSnapshot, User, UserId, UserRole,
};

pub(crate) fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
}

pub(crate) fn user(id: &str, name: &str, role: UserRole) -> User {
    User::new(
        UserId::new(id),
        name,
        format!("{id}@edutrack.test"),
        role,
        "",
    )
    .unwrap()
}

pub(crate) fn course(
    id: &str,
    owner: &str,
    title: &str,
    category: &str,
    lessons: (u32, u32),
    spent: u32,
    accessed: u32,
) -> Course {
    Course::from_persisted(
        CourseId::new(id),
        UserId::new(owner),
        title,
        category,
        lessons.0,
        lessons.1,
        spent,
        day(accessed),
    )
}

pub(crate) fn activity(id: &str, owner: &str, course: &str, on: u32, minutes: i64, lesson: &str) -> ActivityEvent {
    ActivityEvent::from_persisted(
        ActivityId::new(id),
        UserId::new(owner),
        CourseId::new(course),
        day(on),
        minutes,
        lesson,
    )
}

/// Mirrors the demo cohort: Alex (u1) owns two courses, Jordan (u3) and Casey (u4) one each.
pub(crate) fn cohort() -> DashboardSnapshot {
    DashboardSnapshot::new(
        vec![
            course("c1", "u1", "Advanced React Patterns", "Engineering", (24, 18), 1240, 20),
            course("c2", "u1", "UI/UX Design", "Design", (15, 5), 450, 18),
            course("c3", "u3", "Data Structures", "CS", (40, 12), 2100, 21),
            course("c4", "u4", "Machine Learning", "Data", (30, 30), 3200, 10),
        ],
        vec![
            activity("a1", "u1", "c1", 21, 45, "HOCs"),
            activity("a2", "u3", "c3", 21, 120, "Trees"),
            activity("a3", "u1", "c2", 20, 30, "Colors"),
        ],
        vec![
            user("u1", "Alex Johnson", UserRole::Student),
            user("u3", "Jordan Lee", UserRole::Student),
            user("u4", "Casey Chen", UserRole::Student),
        ],
    )
}
