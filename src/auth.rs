use crate::error::{Result, TrackerError};

/// Proof of a signed-in caller. Every store operation requires one; a
/// store handle without a session fails with `Unauthorized`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    identity: String,
}

impl Session {
    /// Signs in with an email or display name. Identity is free text,
    /// only blankness is rejected.
    pub fn sign_in(identity: &str) -> Result<Session> {
        let identity = identity.trim();
        if identity.is_empty() {
            return Err(TrackerError::BlankIdentity);
        }
        log::info!("signed in as {identity}");
        Ok(Session {
            identity: identity.to_string(),
        })
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }
}
