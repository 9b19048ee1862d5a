use serde::{Deserialize, Serialize};

/// A lesson within a course (`GET /courses/{id}/lessons`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonSummary {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
}
