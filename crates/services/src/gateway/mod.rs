//! Request/response access to the EduTrack backend.

use async_trait::async_trait;

use edutrack_core::model::{
    ActivityEvent, Course, CourseId, DashboardSnapshot, LessonSummary, MentorInsight, NewActivity,
    User, UserId,
};

use crate::error::GatewayError;

mod http;
mod memory;

pub use http::{GatewayConfig, HttpGateway};
pub use memory::InMemoryBackend;

/// Backend contract used by the session controller.
///
/// Every call is a suspension point; implementations must not retry on their own.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Exchange credentials for a user record.
    ///
    /// Rejected credentials are `Ok(None)`, not an error.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Network` when the exchange cannot complete.
    async fn login(&self, email: &str, password: &str) -> Result<Option<User>, GatewayError>;

    /// Fetch the full dashboard snapshot visible to `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Fetch` for non-success or malformed responses,
    /// `GatewayError::Network` when the backend cannot be reached.
    async fn fetch_dashboard(&self, user_id: &UserId) -> Result<DashboardSnapshot, GatewayError>;

    /// Append an activity log entry. Not idempotent: a retry may duplicate it.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Submit` for non-success responses.
    async fn log_activity(&self, activity: &NewActivity) -> Result<ActivityEvent, GatewayError>;

    /// Ask the analysis service for per-student advisories.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Insights` for non-success responses.
    async fn fetch_mentor_insights(
        &self,
        students: &[User],
        courses: &[Course],
        activities: &[ActivityEvent],
    ) -> Result<Vec<MentorInsight>, GatewayError>;

    /// List the lessons of one course.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Fetch` for non-success or malformed responses.
    async fn fetch_lessons(&self, course_id: &CourseId) -> Result<Vec<LessonSummary>, GatewayError>;
}
