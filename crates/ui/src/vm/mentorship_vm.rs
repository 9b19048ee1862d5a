use edutrack_core::model::{DashboardSnapshot, InsightStatus, MentorInsight, UserId, status_for};
use edutrack_core::progress::student_metrics;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MentorshipRowVm {
    pub student_id: UserId,
    pub name: String,
    pub global_mastery: u8,
    pub status: InsightStatus,
    pub reason: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct MentorshipVm {
    pub rows: Vec<MentorshipRowVm>,
}

impl MentorshipVm {
    #[must_use]
    pub fn needing_attention(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| row.status != InsightStatus::Thriving)
            .count()
    }
}

/// One row per rostered student; students without an insight read as thriving.
#[must_use]
pub fn map_mentorship(snapshot: &DashboardSnapshot, insights: &[MentorInsight]) -> MentorshipVm {
    let rows = snapshot
        .all_students
        .iter()
        .map(|student| {
            let metrics = student_metrics(&snapshot.courses, &snapshot.activities, student.id());
            MentorshipRowVm {
                student_id: student.id().clone(),
                name: student.name().to_owned(),
                global_mastery: metrics.average_mastery,
                status: status_for(insights, student.name()),
                reason: insights
                    .iter()
                    .find(|insight| insight.student_name == student.name())
                    .map(|insight| insight.reason.clone())
                    .filter(|reason| !reason.is_empty()),
            }
        })
        .collect();
    MentorshipVm { rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vm::fixtures::cohort;

    #[test]
    fn missing_insight_reads_as_thriving() {
        let vm = map_mentorship(&cohort(), &[]);
        assert_eq!(vm.rows.len(), 3);
        assert!(vm.rows.iter().all(|row| row.status == InsightStatus::Thriving));
        assert_eq!(vm.needing_attention(), 0);
        assert_eq!(vm.rows[0].global_mastery, 54);
    }

    #[test]
    fn insights_match_by_student_name() {
        let insights = [MentorInsight::new(
            "Jordan Lee",
            InsightStatus::AtRisk,
            "Completion below 35%",
        )];
        let vm = map_mentorship(&cohort(), &insights);
        let jordan = vm.rows.iter().find(|row| row.name == "Jordan Lee").unwrap();
        assert_eq!(jordan.status, InsightStatus::AtRisk);
        assert_eq!(jordan.reason.as_deref(), Some("Completion below 35%"));
        assert_eq!(vm.needing_attention(), 1);
    }
}
