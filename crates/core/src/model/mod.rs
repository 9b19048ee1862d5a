mod activity;
mod course;
mod ids;
mod insight;
mod lesson;
mod snapshot;
mod user;

pub use ids::{ActivityId, CourseId, UserId};

pub use activity::{ActivityError, ActivityEvent, NewActivity};
pub use course::{Course, CourseError};
pub use insight::{InsightStatus, MentorInsight, status_for};
pub use lesson::LessonSummary;
pub use snapshot::DashboardSnapshot;
pub use user::{User, UserError, UserRole};
