use edutrack_core::model::{Course, CourseId, DashboardSnapshot, User};
use edutrack_core::progress::{
    active_course, course_mastery, format_focus_time, recent_trend, student_average_mastery,
    total_minutes, whole_hours,
};

use crate::vm::time_fmt::{format_day, format_weekday};

/// Number of trailing activities plotted on the daily-focus chart.
pub const TREND_WINDOW: usize = 7;

/// A course tile in the student workspace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CourseCardVm {
    pub id: CourseId,
    pub title: String,
    pub category: String,
    pub mastery: u8,
    pub lessons_label: String,
}

impl From<&Course> for CourseCardVm {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id().clone(),
            title: course.title().to_owned(),
            category: course.category().to_owned(),
            mastery: course_mastery(course),
            lessons_label: format!(
                "{}/{} lessons",
                course.completed_lessons(),
                course.total_lessons()
            ),
        }
    }
}

/// The "current focus" panel for the most recently accessed course.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActiveFocusVm {
    pub course_id: CourseId,
    pub title: String,
    pub mastery: u8,
    pub next_module: u32,
    pub total_lessons: u32,
    pub remaining_lessons: u32,
    pub time_logged: String,
    pub last_accessed: String,
}

impl From<&Course> for ActiveFocusVm {
    fn from(course: &Course) -> Self {
        let total = course.total_lessons();
        Self {
            course_id: course.id().clone(),
            title: course.title().to_owned(),
            mastery: course_mastery(course),
            // Finished courses stay on their last module.
            next_module: course.completed_lessons().saturating_add(1).min(total.max(1)),
            total_lessons: total,
            remaining_lessons: course.remaining_lessons(),
            time_logged: format_focus_time(u64::from(course.time_spent())),
            last_accessed: format_day(course.last_accessed()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrendPointVm {
    pub weekday: String,
    pub minutes: u32,
    pub lesson: String,
}

/// Everything the personal workspace renders for one student.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StudentWorkspaceVm {
    pub student_name: String,
    pub courses: Vec<CourseCardVm>,
    pub active: Option<ActiveFocusVm>,
    pub average_mastery: u8,
    pub total_minutes: u64,
    pub total_hours: u64,
    pub trend: Vec<TrendPointVm>,
}

#[must_use]
pub fn map_student_workspace(snapshot: &DashboardSnapshot, user: &User) -> StudentWorkspaceVm {
    let courses = snapshot.courses_for(user.id());
    let activities = snapshot.activities_for(user.id());
    let minutes = total_minutes(&activities);

    StudentWorkspaceVm {
        student_name: user.name().to_owned(),
        courses: courses.iter().map(CourseCardVm::from).collect(),
        active: active_course(&courses).map(ActiveFocusVm::from),
        average_mastery: student_average_mastery(&courses),
        total_minutes: minutes,
        total_hours: whole_hours(minutes),
        trend: recent_trend(&activities, TREND_WINDOW)
            .map(|point| TrendPointVm {
                weekday: format_weekday(point.day),
                minutes: point.minutes,
                lesson: point.lesson.to_owned(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vm::fixtures::{activity, cohort, course, user};
    use edutrack_core::model::UserRole;

    #[test]
    fn workspace_shows_only_own_courses() {
        let alex = user("u1", "Alex Johnson", UserRole::Student);
        let vm = map_student_workspace(&cohort(), &alex);

        assert_eq!(vm.courses.len(), 2);
        assert_eq!(vm.courses[0].mastery, 75);
        assert_eq!(vm.courses[0].lessons_label, "18/24 lessons");
        assert_eq!(vm.total_minutes, 75);
        assert_eq!(vm.total_hours, 1);
        assert_eq!(vm.average_mastery, 54);
    }

    #[test]
    fn active_focus_is_latest_course() {
        let alex = user("u1", "Alex Johnson", UserRole::Student);
        let vm = map_student_workspace(&cohort(), &alex);
        let active = vm.active.unwrap();

        assert_eq!(active.title, "Advanced React Patterns");
        assert_eq!(active.next_module, 19);
        assert_eq!(active.remaining_lessons, 6);
        assert_eq!(active.time_logged, "20h 40m");
        assert_eq!(active.last_accessed, "2024-05-20");
    }

    #[test]
    fn finished_course_stays_on_last_module() {
        let done = course("c4", "u4", "Machine Learning", "Data", (30, 30), 3200, 10);
        assert_eq!(ActiveFocusVm::from(&done).next_module, 30);
    }

    #[test]
    fn student_without_courses_has_no_focus() {
        let newcomer = user("u9", "Robin Park", UserRole::Student);
        let vm = map_student_workspace(&cohort(), &newcomer);
        assert!(vm.courses.is_empty());
        assert!(vm.active.is_none());
        assert_eq!(vm.average_mastery, 0);
        assert!(vm.trend.is_empty());
    }

    #[test]
    fn trend_keeps_input_order_and_skips_empty_minutes() {
        let alex = user("u1", "Alex Johnson", UserRole::Student);
        let mut snapshot = cohort();
        snapshot.activities.push(activity("a4", "u1", "c1", 22, 0, "Skipped"));
        let vm = map_student_workspace(&snapshot, &alex);

        let lessons: Vec<&str> = vm.trend.iter().map(|p| p.lesson.as_str()).collect();
        assert_eq!(lessons, ["HOCs", "Colors"]);
        assert_eq!(vm.trend[0].weekday, "Tue");
    }
}
