mod catalog_vm;
mod mentorship_vm;
mod roster_vm;
mod student_vm;
mod time_fmt;

pub use catalog_vm::{ALL_CATEGORIES, CatalogCourseVm, CourseCatalogVm, map_course_catalog};
pub use mentorship_vm::{MentorshipRowVm, MentorshipVm, map_mentorship};
pub use roster_vm::{
    MentorRosterVm, StudentDetailVm, StudentRowVm, map_mentor_roster, map_student_detail,
};
pub use student_vm::{
    ActiveFocusVm, CourseCardVm, StudentWorkspaceVm, TREND_WINDOW, TrendPointVm,
    map_student_workspace,
};
pub use time_fmt::{format_day, format_weekday};

#[cfg(test)]
pub(crate) mod fixtures;
