use edutrack_core::model::UserId;

/// Handle for one in-flight dashboard reload.
///
/// Generations increase monotonically per controller; only the ticket for the
/// latest generation may replace the snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReloadTicket {
    generation: u64,
    user_id: UserId,
}

impl ReloadTicket {
    pub(crate) fn new(generation: u64, user_id: UserId) -> Self {
        Self {
            generation,
            user_id,
        }
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }
}

/// What a finished reload did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    /// The snapshot was replaced.
    Applied,
    /// The fetch failed; the snapshot was cleared and an error recorded.
    Failed,
    /// A newer reload was issued (or the session ended); the result was dropped.
    Stale,
}
