use std::fmt;
use std::str::FromStr;

use edutrack_core::model::UserRole;
use thiserror::Error;

/// A top-level section the user can select from the sidebar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum AppView {
    #[default]
    Dashboard,
    Courses,
    Mentorship,
}

impl AppView {
    pub const ALL: [AppView; 3] = [AppView::Dashboard, AppView::Courses, AppView::Mentorship];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            AppView::Dashboard => "dashboard",
            AppView::Courses => "courses",
            AppView::Mentorship => "mentorship",
        }
    }
}

impl fmt::Display for AppView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown view: {0}")]
pub struct UnknownView(pub String);

impl FromStr for AppView {
    type Err = UnknownView;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dashboard" => Ok(AppView::Dashboard),
            "courses" => Ok(AppView::Courses),
            "mentorship" => Ok(AppView::Mentorship),
            _ => Err(UnknownView(s.to_owned())),
        }
    }
}

/// Which courses the catalog lists.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CatalogScope {
    OwnCourses,
    AllStudents,
}

/// What the main area shows for a `(role, view)` pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Presentation {
    StudentWorkspace,
    CourseCatalog { scope: CatalogScope },
    MentorRoster,
    MentorshipTable,
}

impl Presentation {
    /// Whether a per-student drill-down can be opened from this presentation.
    #[must_use]
    pub fn allows_student_detail(self) -> bool {
        matches!(
            self,
            Presentation::MentorRoster
                | Presentation::MentorshipTable
                | Presentation::CourseCatalog {
                    scope: CatalogScope::AllStudents
                }
        )
    }
}

/// Sidebar entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavItem {
    pub view: AppView,
    pub label: &'static str,
}

struct Grant {
    role: UserRole,
    view: AppView,
    presentation: Presentation,
    label: &'static str,
}

// Rows without a grant fall back to the role's dashboard and are not listed in the nav.
const GRANTS: &[Grant] = &[
    Grant {
        role: UserRole::Student,
        view: AppView::Dashboard,
        presentation: Presentation::StudentWorkspace,
        label: "My Dashboard",
    },
    Grant {
        role: UserRole::Student,
        view: AppView::Courses,
        presentation: Presentation::CourseCatalog {
            scope: CatalogScope::OwnCourses,
        },
        label: "My Courses",
    },
    Grant {
        role: UserRole::Mentor,
        view: AppView::Dashboard,
        presentation: Presentation::MentorRoster,
        label: "Class Overview",
    },
    Grant {
        role: UserRole::Mentor,
        view: AppView::Courses,
        presentation: Presentation::CourseCatalog {
            scope: CatalogScope::AllStudents,
        },
        label: "Curriculum",
    },
    Grant {
        role: UserRole::Mentor,
        view: AppView::Mentorship,
        presentation: Presentation::MentorshipTable,
        label: "Mentorship",
    },
];

fn grant(role: UserRole, view: AppView) -> Option<&'static Grant> {
    GRANTS
        .iter()
        .find(|grant| grant.role == role && grant.view == view)
}

/// Resolve the presentation for a role and selected view.
#[must_use]
pub fn route(role: UserRole, view: AppView) -> Presentation {
    grant(role, view)
        .or_else(|| grant(role, AppView::Dashboard))
        .map_or(Presentation::StudentWorkspace, |grant| grant.presentation)
}

/// Sidebar entries available to `role`, in display order.
#[must_use]
pub fn nav_items(role: UserRole) -> Vec<NavItem> {
    GRANTS
        .iter()
        .filter(|grant| grant.role == role)
        .map(|grant| NavItem {
            view: grant.view,
            label: grant.label,
        })
        .collect()
}

/// Whether `view` is reachable from the sidebar for `role`.
#[must_use]
pub fn is_granted(role: UserRole, view: AppView) -> bool {
    grant(role, view).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn student_routes() {
        assert_eq!(
            route(UserRole::Student, AppView::Dashboard),
            Presentation::StudentWorkspace
        );
        assert_eq!(
            route(UserRole::Student, AppView::Courses),
            Presentation::CourseCatalog {
                scope: CatalogScope::OwnCourses
            }
        );
        assert_eq!(
            route(UserRole::Student, AppView::Mentorship),
            Presentation::StudentWorkspace
        );
    }

    #[test]
    fn mentor_routes() {
        assert_eq!(route(UserRole::Mentor, AppView::Dashboard), Presentation::MentorRoster);
        assert_eq!(
            route(UserRole::Mentor, AppView::Courses),
            Presentation::CourseCatalog {
                scope: CatalogScope::AllStudents
            }
        );
        assert_eq!(
            route(UserRole::Mentor, AppView::Mentorship),
            Presentation::MentorshipTable
        );
    }

    #[test]
    fn nav_matches_routing_table() {
        let student: Vec<AppView> = nav_items(UserRole::Student).iter().map(|i| i.view).collect();
        assert_eq!(student, vec![AppView::Dashboard, AppView::Courses]);

        let mentor: Vec<AppView> = nav_items(UserRole::Mentor).iter().map(|i| i.view).collect();
        assert_eq!(mentor, AppView::ALL.to_vec());

        for role in [UserRole::Student, UserRole::Mentor] {
            for view in AppView::ALL {
                let listed = nav_items(role).iter().any(|item| item.view == view);
                assert_eq!(listed, is_granted(role, view));
            }
        }
    }

    #[test]
    fn drill_down_only_from_mentor_presentations() {
        for view in AppView::ALL {
            assert!(route(UserRole::Mentor, view).allows_student_detail());
            assert!(!route(UserRole::Student, view).allows_student_detail());
        }
    }

    #[test]
    fn views_parse_and_print() {
        for view in AppView::ALL {
            assert_eq!(view.to_string().parse::<AppView>().unwrap(), view);
        }
        assert_eq!(" Courses ".parse::<AppView>().unwrap(), AppView::Courses);
        assert!("settings".parse::<AppView>().is_err());
    }
}
