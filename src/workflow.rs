use crate::analysis::similarity::{find_similar, is_trivial_query, SimilarityCandidate};
use crate::error::{Result, TrackerError};
use crate::models::issue::{is_transition_allowed, Issue, IssueDraft, Status};
use crate::store::IssueStore;

/// Result of one submission attempt.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// No likely duplicates; the issue was persisted.
    Created(Issue),
    /// Likely duplicates found; nothing was persisted. The caller shows
    /// the shortlist and either drops the draft or calls [`CreationWorkflow::confirm`].
    PossibleDuplicates(Vec<SimilarityCandidate>),
}

/// Drives issue creation against an injected store: duplicate check
/// first, persistence only when the shortlist is empty or the user has
/// explicitly confirmed.
pub struct CreationWorkflow<'a, S: IssueStore> {
    store: &'a S,
    submitting: bool,
}

impl<'a, S: IssueStore> CreationWorkflow<'a, S> {
    pub fn new(store: &'a S) -> CreationWorkflow<'a, S> {
        CreationWorkflow {
            store,
            submitting: false,
        }
    }

    /// True while a submission is in flight; the UI disables the submit
    /// affordance exactly as long as this holds.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Submits a draft. Runs the duplicate check before persisting;
    /// trivial titles skip the corpus fetch entirely. One submission at
    /// a time: re-entry fails with `SubmissionInProgress`, and the
    /// in-flight flag is cleared on every exit path, error included.
    pub fn submit(&mut self, draft: &IssueDraft) -> Result<SubmitOutcome> {
        self.guarded(|workflow| workflow.check_and_create(draft))
    }

    /// Persists a draft despite a previously shown duplicate shortlist.
    pub fn confirm(&mut self, draft: &IssueDraft) -> Result<Issue> {
        self.guarded(|workflow| workflow.store.create(draft))
    }

    /// Local pre-check of the transition rule, then the store's
    /// authoritative one. An `open -> done` request never reaches the
    /// store.
    pub fn set_status(&self, issue: &Issue, requested: Status) -> Result<()> {
        if !is_transition_allowed(issue.status, requested) {
            return Err(TrackerError::TransitionRejected {
                from: issue.status,
                to: requested,
            });
        }
        self.store.update_status(&issue.id, requested)
    }

    fn guarded<T>(&mut self, op: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.submitting {
            return Err(TrackerError::SubmissionInProgress);
        }
        self.submitting = true;
        let outcome = op(self);
        self.submitting = false;
        outcome
    }

    fn check_and_create(&mut self, draft: &IssueDraft) -> Result<SubmitOutcome> {
        if is_trivial_query(&draft.title) {
            // Too short to score; skip the corpus fetch and persist.
            return Ok(SubmitOutcome::Created(self.store.create(draft)?));
        }

        let corpus = self.store.fetch_all()?;
        let candidates = find_similar(&draft.title, &corpus)?;
        if !candidates.is_empty() {
            log::info!(
                "submission of {:?} held: {} likely duplicate(s)",
                draft.title,
                candidates.len()
            );
            return Ok(SubmitOutcome::PossibleDuplicates(candidates));
        }

        Ok(SubmitOutcome::Created(self.store.create(draft)?))
    }
}
