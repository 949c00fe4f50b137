use crate::sink::SubmitOutcome;

/// Counters accumulated over one directory walk.
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkStats {
    /// Profile links discovered on listing pages
    pub links: usize,
    /// Records the storage API accepted
    pub inserted: usize,
    /// Records rejected as already present
    pub duplicates: usize,
    /// Records rejected for any other reason
    pub failed: usize,
    /// Profiles skipped because their page could not be fetched
    pub skipped: usize,
}

impl WalkStats {
    /// Fold one submission outcome into the counters.
    pub fn tally(&mut self, outcome: SubmitOutcome) {
        match outcome {
            SubmitOutcome::Inserted => self.inserted += 1,
            SubmitOutcome::DuplicateSkipped => self.duplicates += 1,
            SubmitOutcome::Failed(_) => self.failed += 1,
        }
    }
}
