use edutrack_core::model::{DashboardSnapshot, User, UserId};
use edutrack_core::progress::{
    CategoryProgress, category_breakdown, format_focus_time, student_average_mastery,
    student_metrics, whole_hours,
};

use crate::vm::CourseCardVm;

/// One student in the mentor's class overview.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StudentRowVm {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub course_count: usize,
    pub average_mastery: u8,
    pub completed_lessons: u64,
    pub focus_time: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MentorRosterVm {
    pub class_average: u8,
    pub categories: Vec<CategoryProgress>,
    pub students: Vec<StudentRowVm>,
}

impl MentorRosterVm {
    /// Row for the student with this id or exact display name.
    #[must_use]
    pub fn find_student(&self, key: &str) -> Option<&StudentRowVm> {
        self.students
            .iter()
            .find(|row| row.id.as_str() == key || row.name == key)
    }
}

/// A mentor's drill-down into one student: roll-up plus every enrolled course.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StudentDetailVm {
    pub student: StudentRowVm,
    pub total_hours: u64,
    pub courses: Vec<CourseCardVm>,
}

fn student_row(snapshot: &DashboardSnapshot, student: &User) -> StudentRowVm {
    let metrics = student_metrics(&snapshot.courses, &snapshot.activities, student.id());
    StudentRowVm {
        id: student.id().clone(),
        name: student.name().to_owned(),
        email: student.email().to_owned(),
        course_count: metrics.course_count,
        average_mastery: metrics.average_mastery,
        completed_lessons: metrics.completed_lessons,
        focus_time: format_focus_time(metrics.total_minutes),
    }
}

#[must_use]
pub fn map_mentor_roster(snapshot: &DashboardSnapshot) -> MentorRosterVm {
    let students = snapshot
        .all_students
        .iter()
        .map(|student| student_row(snapshot, student))
        .collect();

    MentorRosterVm {
        class_average: student_average_mastery(&snapshot.courses),
        categories: category_breakdown(&snapshot.courses, &snapshot.all_students),
        students,
    }
}

/// Drill into the roster student matching `key` (id or display name).
#[must_use]
pub fn map_student_detail(snapshot: &DashboardSnapshot, key: &str) -> Option<StudentDetailVm> {
    let roster = map_mentor_roster(snapshot);
    let student = roster.find_student(key)?.clone();
    let metrics = student_metrics(&snapshot.courses, &snapshot.activities, &student.id);
    let courses = snapshot
        .courses_for(&student.id)
        .iter()
        .map(CourseCardVm::from)
        .collect();

    Some(StudentDetailVm {
        student,
        total_hours: whole_hours(metrics.total_minutes),
        courses,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vm::fixtures::{cohort, course};

    #[test]
    fn roster_rolls_up_each_student() {
        let vm = map_mentor_roster(&cohort());
        assert_eq!(vm.students.len(), 3);

        let jordan = vm.find_student("Jordan Lee").unwrap();
        assert_eq!(jordan.course_count, 1);
        assert_eq!(jordan.average_mastery, 30);
        assert_eq!(jordan.completed_lessons, 12);
        assert_eq!(jordan.focus_time, "2h 0m");

        let casey = vm.find_student("u4").unwrap();
        assert_eq!(casey.name, "Casey Chen");
        assert_eq!(casey.average_mastery, 100);
        assert_eq!(casey.focus_time, "0h 0m");
    }

    #[test]
    fn categories_follow_first_seen_order() {
        let vm = map_mentor_roster(&cohort());
        let names: Vec<&str> = vm.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Engineering", "Design", "CS", "Data"]);
        assert_eq!(vm.categories[0].average_mastery, 75);
        assert_eq!(vm.categories[0].enrolled[0].student_name, "Alex Johnson");
    }

    #[test]
    fn orphan_course_is_attributed_to_unknown() {
        let mut snapshot = cohort();
        snapshot
            .courses
            .push(course("c9", "u404", "Rust", "Engineering", (10, 5), 0, 1));
        let vm = map_mentor_roster(&snapshot);
        let engineering = &vm.categories[0];
        assert_eq!(engineering.student_count(), 2);
        assert_eq!(engineering.enrolled[1].student_name, "Unknown");
        assert_eq!(engineering.average_mastery, 63);
    }

    #[test]
    fn detail_lists_the_students_courses() {
        let detail = map_student_detail(&cohort(), "u1").unwrap();
        assert_eq!(detail.student.name, "Alex Johnson");
        assert_eq!(detail.total_hours, 1);

        let titles: Vec<&str> = detail.courses.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, ["Advanced React Patterns", "UI/UX Design"]);
        assert_eq!(detail.courses[0].mastery, 75);
        assert_eq!(detail.courses[0].lessons_label, "18/24 lessons");

        assert_eq!(map_student_detail(&cohort(), "Jordan Lee").unwrap().courses.len(), 1);
        assert!(map_student_detail(&cohort(), "u404").is_none());
    }
}
