use serde::{Deserialize, Serialize};
use std::fmt;

/// Advisory status produced by the external analysis service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InsightStatus {
    AtRisk,
    Stalled,
    #[default]
    Thriving,
}

impl InsightStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            InsightStatus::AtRisk => "at-risk",
            InsightStatus::Stalled => "stalled",
            InsightStatus::Thriving => "thriving",
        }
    }
}

impl fmt::Display for InsightStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mentor-facing note about a student. Keyed by display name, not id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorInsight {
    pub student_name: String,
    pub status: InsightStatus,
    #[serde(default)]
    pub reason: String,
}

impl MentorInsight {
    #[must_use]
    pub fn new(student_name: impl Into<String>, status: InsightStatus, reason: impl Into<String>) -> Self {
        Self {
            student_name: student_name.into(),
            status,
            reason: reason.into(),
        }
    }
}

/// Status for a student, defaulting to thriving when the service said nothing.
#[must_use]
pub fn status_for(insights: &[MentorInsight], student_name: &str) -> InsightStatus {
    insights
        .iter()
        .find(|insight| insight.student_name == student_name)
        .map(|insight| insight.status)
        .unwrap_or_default()
}
