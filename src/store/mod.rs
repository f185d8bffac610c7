pub mod sqlite;

use crate::error::Result;
use crate::models::issue::{Issue, IssueDraft, Status};

/// Persistence boundary for issues. The store owns identity generation,
/// timestamps, and authorization; callers receive it as an injected
/// dependency rather than through any ambient global handle.
pub trait IssueStore {
    /// Returns the full current corpus. No ordering is promised; callers
    /// must not assume one.
    fn fetch_all(&self) -> Result<Vec<Issue>>;

    /// Assigns an id, sets `status = open` and `created_at = now`,
    /// persists, and returns the full record.
    fn create(&self, draft: &IssueDraft) -> Result<Issue>;

    /// Applies a status change. This is the authoritative layer of the
    /// transition rule: `open -> done` fails with `TransitionRejected`
    /// even if a caller skipped its local pre-check.
    fn update_status(&self, id: &str, new_status: Status) -> Result<()>;
}
