use serde::{Deserialize, Serialize};

use crate::model::activity::ActivityEvent;
use crate::model::course::Course;
use crate::model::ids::UserId;
use crate::model::user::User;

/// Point-in-time projection of everything the dashboard shows.
///
/// Replaced wholesale on every reload; never patched in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub courses: Vec<Course>,
    pub activities: Vec<ActivityEvent>,
    pub all_students: Vec<User>,
}

impl DashboardSnapshot {
    #[must_use]
    pub fn new(courses: Vec<Course>, activities: Vec<ActivityEvent>, all_students: Vec<User>) -> Self {
        Self {
            courses,
            activities,
            all_students,
        }
    }

    /// Courses owned by `student_id`, in snapshot order.
    #[must_use]
    pub fn courses_for(&self, student_id: &UserId) -> Vec<Course> {
        self.courses
            .iter()
            .filter(|course| course.is_owned_by(student_id))
            .cloned()
            .collect()
    }

    /// Activities logged by `student_id`, in snapshot order.
    #[must_use]
    pub fn activities_for(&self, student_id: &UserId) -> Vec<ActivityEvent> {
        self.activities
            .iter()
            .filter(|activity| activity.student_id() == student_id)
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn student(&self, id: &UserId) -> Option<&User> {
        self.all_students.iter().find(|user| user.id() == id)
    }

    /// Distinct course categories in first-seen order.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for course in &self.courses {
            if !seen.contains(&course.category()) {
                seen.push(course.category());
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW: &str = r#"{
        "courses": [
            {"id":"c1","studentId":"u1","title":"A","category":"Engineering","totalLessons":24,"completedLessons":18,"timeSpent":1240,"lastAccessed":"2024-05-20"},
            {"id":"c2","studentId":"u1","title":"B","category":"Design","totalLessons":15,"completedLessons":5,"timeSpent":450,"lastAccessed":"2024-05-18"},
            {"id":"c3","studentId":"u3","title":"C","category":"Engineering","totalLessons":40,"completedLessons":12,"timeSpent":2100,"lastAccessed":"2024-05-21"}
        ],
        "activities": [
            {"id":"a1","studentId":"u1","date":"2024-05-21","minutesSpent":45,"lessonName":"HOCs","courseId":"c1"}
        ],
        "allStudents": [
            {"id":"u1","name":"Alex Johnson","email":"alex@student.edu","role":"STUDENT","avatar":"https://i.pravatar.cc/150?u=alex"}
        ]
    }"#;

    #[test]
    fn decodes_and_filters_by_owner() {
        let snapshot: DashboardSnapshot = serde_json::from_str(RAW).unwrap();
        let alex = UserId::new("u1");
        assert_eq!(snapshot.courses_for(&alex).len(), 2);
        assert_eq!(snapshot.activities_for(&alex).len(), 1);
        assert_eq!(snapshot.student(&alex).map(User::name), Some("Alex Johnson"));
        assert!(snapshot.student(&UserId::new("u9")).is_none());
    }

    #[test]
    fn categories_keep_first_seen_order() {
        let snapshot: DashboardSnapshot = serde_json::from_str(RAW).unwrap();
        assert_eq!(snapshot.categories(), vec!["Engineering", "Design"]);
    }

    #[test]
    fn missing_section_is_rejected() {
        let raw = r#"{"courses": [], "activities": []}"#;
        assert!(serde_json::from_str::<DashboardSnapshot>(raw).is_err());
    }
}
