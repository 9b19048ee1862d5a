use edutrack_core::model::{MentorInsight, UserRole};
use services::SessionController;
use thiserror::Error;

use crate::context::Navigator;
use crate::routes::{self, Presentation};
use crate::views::state::{ViewState, view_state_from_session};
use crate::vm::{
    CourseCatalogVm, MentorRosterVm, MentorshipVm, StudentDetailVm, StudentWorkspaceVm,
    map_course_catalog, map_mentor_roster, map_mentorship, map_student_detail,
    map_student_workspace,
};

/// What the main area shows right now.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    Login { message: Option<String> },
    Loading,
    Failed { message: String },
    StudentWorkspace(StudentWorkspaceVm),
    CourseCatalog(CourseCatalogVm),
    MentorRoster(MentorRosterVm),
    Mentorship(MentorshipVm),
    StudentDetail(StudentDetailVm),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DetailError {
    #[error("student details are not available to the {0} role")]
    NotPermitted(UserRole),
    #[error("no student matches {0:?}")]
    UnknownStudent(String),
}

/// Resolve the screen for the current session and sidebar selection.
///
/// Routing uses the logged-in user's role, never a role carried by the caller.
/// `filter` narrows the course catalog; `insights` feed the mentorship table.
#[must_use]
pub fn build_screen(
    session: &SessionController,
    navigator: &Navigator,
    filter: &str,
    insights: &[MentorInsight],
) -> Screen {
    let state = view_state_from_session(session, |snapshot, user| {
        match routes::route(user.role(), navigator.selected()) {
            Presentation::StudentWorkspace => {
                Screen::StudentWorkspace(map_student_workspace(snapshot, user))
            }
            Presentation::CourseCatalog { scope } => {
                Screen::CourseCatalog(map_course_catalog(snapshot, user, scope, filter))
            }
            Presentation::MentorRoster => Screen::MentorRoster(map_mentor_roster(snapshot)),
            Presentation::MentorshipTable => {
                Screen::Mentorship(map_mentorship(snapshot, insights))
            }
        }
    });

    match settle(session, state) {
        Ok(screen) | Err(screen) => screen,
    }
}

/// Drill into one student (by id or display name) from the current mentor view.
///
/// # Errors
///
/// Returns `DetailError::NotPermitted` when the routed presentation is not a
/// mentor view and `DetailError::UnknownStudent` when nobody in the roster
/// matches. Without loaded data the login, loading or failure screen is
/// returned instead.
pub fn build_student_detail(
    session: &SessionController,
    navigator: &Navigator,
    student: &str,
) -> Result<Screen, DetailError> {
    let state = view_state_from_session(session, |snapshot, user| {
        if !routes::route(user.role(), navigator.selected()).allows_student_detail() {
            return Err(DetailError::NotPermitted(user.role()));
        }
        map_student_detail(snapshot, student)
            .map(Screen::StudentDetail)
            .ok_or_else(|| DetailError::UnknownStudent(student.to_owned()))
    });

    match settle(session, state) {
        Ok(detail) => detail,
        Err(screen) => Ok(screen),
    }
}

// Ready content, or the screen that stands in for it.
fn settle<T>(session: &SessionController, state: ViewState<T>) -> Result<T, Screen> {
    match state {
        ViewState::Ready(content) => Ok(content),
        ViewState::Idle => Err(Screen::Login {
            message: session.login_failure().map(|failure| failure.to_string()),
        }),
        ViewState::Loading => Err(Screen::Loading),
        ViewState::Error(message) => Err(Screen::Failed { message }),
    }
}
