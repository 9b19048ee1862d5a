use edutrack_core::model::{InsightStatus, MentorInsight, UserRole};
use services::GatewayError;

use super::test_harness::ViewHarness;
use crate::routes::AppView;
use crate::views::screen::{DetailError, Screen};

#[tokio::test(flavor = "current_thread")]
async fn logged_out_renders_login_prompt() {
    let mut harness = ViewHarness::new();
    assert_eq!(harness.screen(), Screen::Login { message: None });

    let _ = harness.session.login("nobody@edutrack.test").await;
    let text = harness.render();
    assert!(
        text.contains("Invalid credentials or student record not found."),
        "missing login message in {text}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn student_dashboard_renders_active_focus() {
    let mut harness = ViewHarness::new();
    harness.login("alex@student.edu").await;

    let text = harness.render();
    for expected in [
        "Personal Workspace: Alex Johnson",
        "Active focus: Advanced React Patterns (75%)",
        "module 19 of 24",
        "20h 40m logged",
        "Tue   45 min  HOCs",
    ] {
        assert!(text.contains(expected), "missing {expected} in {text}");
    }
    assert!(!text.contains("Data Structures"));
}

#[tokio::test(flavor = "current_thread")]
async fn student_cannot_open_mentorship() {
    let mut harness = ViewHarness::new();
    harness.login("alex@student.edu").await;
    harness.select(AppView::Mentorship);
    assert!(matches!(harness.screen(), Screen::StudentWorkspace(_)));
}

#[tokio::test(flavor = "current_thread")]
async fn mentor_views_follow_selection() {
    let mut harness = ViewHarness::new();
    harness.login("sarah@mentor.edu").await;
    assert!(matches!(harness.screen(), Screen::MentorRoster(_)));

    harness.select(AppView::Courses);
    let text = harness.render();
    assert!(text.contains("Jordan Lee"), "missing owner in {text}");

    harness.filter = "Data".to_owned();
    let Screen::CourseCatalog(catalog) = harness.screen() else {
        panic!("expected course catalog");
    };
    assert_eq!(catalog.courses.len(), 1);

    harness.insights = vec![MentorInsight::new(
        "Jordan Lee",
        InsightStatus::Stalled,
        "No activity this week",
    )];
    harness.select(AppView::Mentorship);
    let text = harness.render();
    assert!(text.contains("Mentorship (1 need attention)"), "{text}");
    assert!(text.contains("stalled  No activity this week"), "{text}");
}

#[tokio::test(flavor = "current_thread")]
async fn load_failure_blocks_content() {
    let mut harness = ViewHarness::new();
    harness
        .backend
        .fail_dashboard(GatewayError::Fetch("500 Internal Server Error".into()));
    harness.login("alex@student.edu").await;

    assert_eq!(
        harness.screen(),
        Screen::Failed {
            message: services::session::LOAD_FAILED_MESSAGE.to_owned()
        }
    );
}

#[tokio::test(flavor = "current_thread")]
async fn mentor_drills_into_a_student() {
    let mut harness = ViewHarness::new();
    harness.login("sarah@mentor.edu").await;
    harness.select(AppView::Courses);

    let Ok(Screen::StudentDetail(detail)) = harness.detail("Alex Johnson") else {
        panic!("expected student detail");
    };
    assert_eq!(detail.courses.len(), 2);

    let text = harness.detail("u1").expect("detail").to_string();
    for expected in ["Alex Johnson <", "Courses:", "18/24 lessons"] {
        assert!(text.contains(expected), "missing {expected} in {text}");
    }
    assert!(!text.contains("Data Structures"), "{text}");

    assert_eq!(
        harness.detail("Nobody Here"),
        Err(DetailError::UnknownStudent("Nobody Here".into()))
    );
}

#[tokio::test(flavor = "current_thread")]
async fn student_cannot_drill_into_others() {
    let mut harness = ViewHarness::new();
    harness.login("alex@student.edu").await;
    for view in AppView::ALL {
        harness.select(view);
        assert_eq!(
            harness.detail("Jordan Lee"),
            Err(DetailError::NotPermitted(UserRole::Student))
        );
    }
}

#[tokio::test(flavor = "current_thread")]
async fn drill_down_without_session_shows_login() {
    let harness = ViewHarness::new();
    assert_eq!(harness.detail("u1"), Ok(Screen::Login { message: None }));
}
