use edutrack_core::model::{CourseId, DashboardSnapshot, User};
use edutrack_core::progress::{UNKNOWN_STUDENT, course_mastery};

use crate::routes::CatalogScope;

/// Filter entry that disables category filtering.
pub const ALL_CATEGORIES: &str = "All";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogCourseVm {
    pub id: CourseId,
    pub title: String,
    pub category: String,
    pub owner_name: String,
    pub mastery: u8,
    pub completed_lessons: u32,
    pub total_lessons: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CourseCatalogVm {
    pub filters: Vec<String>,
    pub selected_filter: String,
    pub courses: Vec<CatalogCourseVm>,
}

/// Courses visible to `viewer` in `scope`, narrowed to `filter`.
///
/// Filter options come from every course in the snapshot, so a student sees
/// the same category bar as their mentor. An unknown filter matches nothing.
#[must_use]
pub fn map_course_catalog(
    snapshot: &DashboardSnapshot,
    viewer: &User,
    scope: CatalogScope,
    filter: &str,
) -> CourseCatalogVm {
    let filters = std::iter::once(ALL_CATEGORIES)
        .chain(snapshot.categories())
        .map(str::to_owned)
        .collect();

    let courses = snapshot
        .courses
        .iter()
        .filter(|course| filter == ALL_CATEGORIES || course.category() == filter)
        .filter(|course| match scope {
            CatalogScope::OwnCourses => course.is_owned_by(viewer.id()),
            CatalogScope::AllStudents => true,
        })
        .map(|course| CatalogCourseVm {
            id: course.id().clone(),
            title: course.title().to_owned(),
            category: course.category().to_owned(),
            owner_name: snapshot
                .student(course.student_id())
                .map_or_else(|| UNKNOWN_STUDENT.to_owned(), |user| user.name().to_owned()),
            mastery: course_mastery(course),
            completed_lessons: course.completed_lessons(),
            total_lessons: course.total_lessons(),
        })
        .collect();

    CourseCatalogVm {
        filters,
        selected_filter: filter.to_owned(),
        courses,
    }
}
