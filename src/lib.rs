pub mod analysis;
pub mod auth;
pub mod error;
pub mod models;
pub mod store;
pub mod workflow;

pub use analysis::similarity::{find_similar, SimilarityCandidate};
pub use auth::Session;
pub use error::{Result, TrackerError};
pub use models::issue::{is_transition_allowed, Issue, IssueDraft, Priority, Status};
pub use store::sqlite::SqliteIssueStore;
pub use store::IssueStore;
pub use workflow::{CreationWorkflow, SubmitOutcome};
