use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;

use edutrack_core::model::{
    ActivityEvent, ActivityId, Course, CourseId, DashboardSnapshot, LessonSummary, MentorInsight,
    NewActivity, User, UserId, UserRole,
};

use super::Backend;
use crate::error::GatewayError;

/// Injected failures, one slot per operation. A slot stays armed until cleared.
#[derive(Clone, Debug, Default)]
struct FailurePlan {
    login: Option<GatewayError>,
    dashboard: Option<GatewayError>,
    submit: Option<GatewayError>,
    insights: Option<GatewayError>,
}

#[derive(Default)]
struct BackendState {
    users: Vec<User>,
    courses: Vec<Course>,
    activities: Vec<ActivityEvent>,
    insights: Vec<MentorInsight>,
    lessons: HashMap<CourseId, Vec<LessonSummary>>,
    failures: FailurePlan,
    next_activity: u64,
    dashboard_calls: usize,
}

/// Deterministic in-process backend for tests and the offline demo.
///
/// Behaves like the real service: any password is accepted for a known email,
/// snapshots contain every course and activity plus the student roster, and
/// logged activities get sequential `a{n}` ids.
#[derive(Clone, Default)]
pub struct InMemoryBackend {
    inner: Arc<Mutex<BackendState>>,
}

impl InMemoryBackend {
    #[must_use]
    pub fn new(users: Vec<User>, courses: Vec<Course>, activities: Vec<ActivityEvent>) -> Self {
        let next_activity = activities.len() as u64 + 1;
        Self {
            inner: Arc::new(Mutex::new(BackendState {
                users,
                courses,
                activities,
                next_activity,
                ..BackendState::default()
            })),
        }
    }

    /// Backend pre-loaded with the demo cohort: one mentor, three students.
    #[must_use]
    pub fn seeded() -> Self {
        Self::new(seed_users(), seed_courses(), seed_activities())
    }

    pub fn set_insights(&self, insights: Vec<MentorInsight>) {
        self.with_state(|state| state.insights = insights);
    }

    pub fn set_lessons(&self, course_id: CourseId, lessons: Vec<LessonSummary>) {
        self.with_state(|state| {
            state.lessons.insert(course_id, lessons);
        });
    }

    pub fn fail_login(&self, err: GatewayError) {
        self.with_state(|state| state.failures.login = Some(err));
    }

    pub fn fail_dashboard(&self, err: GatewayError) {
        self.with_state(|state| state.failures.dashboard = Some(err));
    }

    pub fn fail_submit(&self, err: GatewayError) {
        self.with_state(|state| state.failures.submit = Some(err));
    }

    pub fn fail_insights(&self, err: GatewayError) {
        self.with_state(|state| state.failures.insights = Some(err));
    }

    pub fn clear_failures(&self) {
        self.with_state(|state| state.failures = FailurePlan::default());
    }

    /// Number of dashboard fetches served or refused so far.
    #[must_use]
    pub fn dashboard_calls(&self) -> usize {
        self.with_state(|state| state.dashboard_calls)
    }

    #[must_use]
    pub fn activity_count(&self) -> usize {
        self.with_state(|state| state.activities.len())
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut BackendState) -> T) -> T {
        let mut guard = match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut guard)
    }
}

#[async_trait]
impl Backend for InMemoryBackend {
    async fn login(&self, email: &str, _password: &str) -> Result<Option<User>, GatewayError> {
        self.with_state(|state| {
            if let Some(err) = state.failures.login.clone() {
                return Err(err);
            }
            let wanted = email.trim();
            Ok(state
                .users
                .iter()
                .find(|user| user.email().eq_ignore_ascii_case(wanted))
                .cloned())
        })
    }

    async fn fetch_dashboard(&self, user_id: &UserId) -> Result<DashboardSnapshot, GatewayError> {
        self.with_state(|state| {
            state.dashboard_calls += 1;
            if let Some(err) = state.failures.dashboard.clone() {
                return Err(err);
            }
            if !state.users.iter().any(|user| user.id() == user_id) {
                return Err(GatewayError::Fetch(format!("404 Not Found: unknown user {user_id}")));
            }
            let all_students = state
                .users
                .iter()
                .filter(|user| user.role() == UserRole::Student)
                .cloned()
                .collect();
            Ok(DashboardSnapshot::new(
                state.courses.clone(),
                state.activities.clone(),
                all_students,
            ))
        })
    }

    async fn log_activity(&self, activity: &NewActivity) -> Result<ActivityEvent, GatewayError> {
        self.with_state(|state| {
            if let Some(err) = state.failures.submit.clone() {
                return Err(err);
            }
            if !state.courses.iter().any(|course| course.id() == activity.course_id()) {
                return Err(GatewayError::Submit(format!(
                    "400 Bad Request: unknown course {}",
                    activity.course_id()
                )));
            }
            let id = ActivityId::new(format!("a{}", state.next_activity));
            state.next_activity += 1;
            let event = ActivityEvent::from_new(id, activity.clone());
            state.activities.push(event.clone());
            Ok(event)
        })
    }

    async fn fetch_mentor_insights(
        &self,
        _students: &[User],
        _courses: &[Course],
        _activities: &[ActivityEvent],
    ) -> Result<Vec<MentorInsight>, GatewayError> {
        self.with_state(|state| match state.failures.insights.clone() {
            Some(err) => Err(err),
            None => Ok(state.insights.clone()),
        })
    }

    async fn fetch_lessons(&self, course_id: &CourseId) -> Result<Vec<LessonSummary>, GatewayError> {
        self.with_state(|state| {
            state
                .lessons
                .get(course_id)
                .cloned()
                .ok_or_else(|| GatewayError::Fetch(format!("404 Not Found: no lessons for {course_id}")))
        })
    }
}

//
// ─── DEMO COHORT ───────────────────────────────────────────────────────────────
//

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, d).unwrap_or_default()
}

fn seed_users() -> Vec<User> {
    [
        ("u1", "Alex Johnson", "alex@student.edu", UserRole::Student, "alex"),
        ("u2", "Dr. Sarah Smith", "sarah@mentor.edu", UserRole::Mentor, "sarah"),
        ("u3", "Jordan Lee", "jordan@student.edu", UserRole::Student, "jordan"),
        ("u4", "Casey Chen", "casey@student.edu", UserRole::Student, "casey"),
    ]
    .into_iter()
    .filter_map(|(id, name, email, role, handle)| {
        User::new(
            UserId::new(id),
            name,
            email,
            role,
            format!("https://i.pravatar.cc/150?u={handle}"),
        )
        .ok()
    })
    .collect()
}

fn seed_courses() -> Vec<Course> {
    [
        ("c1", "u1", "Advanced React Patterns", "Engineering", 24, 18, 1240, 20),
        ("c2", "u1", "UI/UX Design", "Design", 15, 5, 450, 18),
        ("c3", "u3", "Data Structures", "CS", 40, 12, 2100, 21),
        ("c4", "u4", "Machine Learning", "Data", 30, 30, 3200, 10),
    ]
    .into_iter()
    .map(|(id, owner, title, category, total, done, spent, accessed)| {
        Course::from_persisted(
            CourseId::new(id),
            UserId::new(owner),
            title,
            category,
            total,
            done,
            spent,
            day(accessed),
        )
    })
    .collect()
}

fn seed_activities() -> Vec<ActivityEvent> {
    [
        ("a1", "u1", 21, 45, "HOCs", "c1"),
        ("a2", "u3", 21, 120, "Trees", "c3"),
        ("a3", "u1", 20, 30, "Colors", "c2"),
    ]
    .into_iter()
    .map(|(id, owner, on, minutes, lesson, course)| {
        ActivityEvent::from_persisted(
            ActivityId::new(id),
            UserId::new(owner),
            CourseId::new(course),
            day(on),
            minutes,
            lesson,
        )
    })
    .collect()
}
