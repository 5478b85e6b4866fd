//! Session transcript: a canonical record of every command applied to a
//! session and the state digest after each one.
//!
//! Two processes that replay the same commands against the same config must
//! render byte-identical transcripts. The transcript is derived, so the
//! session stays authoritative.

use gridstep_kernel::proof::canon::{canonical_json_bytes, CanonError};
use gridstep_kernel::proof::hash::{canonical_hash, ContentHash};
use gridstep_kernel::proof::hash_domain::HashDomain;

use crate::session::{SearchSession, SessionError, StepReport, UndoOutcome};

pub const SCHEMA_VERSION: &str = "session_transcript.v1";

/// A command applied to a session, as recorded in a transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Step,
    Undo,
    /// Reset to the default obstacle layout.
    ResetDefault,
}

impl SessionCommand {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Step => "step",
            Self::Undo => "undo",
            Self::ResetDefault => "reset_default",
        }
    }
}

/// Transcript under construction.
#[derive(Debug, Clone)]
pub struct SessionTranscriptV1 {
    header: serde_json::Value,
    initial_digest: ContentHash,
    entries: Vec<serde_json::Value>,
    final_digest: ContentHash,
    final_json: serde_json::Value,
}

impl SessionTranscriptV1 {
    /// Start a transcript at the session's current state.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Canon`] if the state cannot be digested.
    pub fn begin(session: &SearchSession) -> Result<Self, SessionError> {
        let digest = session.state_digest()?;
        let grid_digest = session.grid().layout_digest()?;
        Ok(Self {
            header: serde_json::json!({
                "config": session.config().to_json_value(),
                "grid": session.grid().to_json_value(),
                "grid_digest": grid_digest.as_str(),
                "policy": session.policy().to_json_value(),
            }),
            initial_digest: digest.clone(),
            entries: Vec::new(),
            final_digest: digest,
            final_json: Self::summary(session),
        })
    }

    fn summary(session: &SearchSession) -> serde_json::Value {
        serde_json::json!({
            "final_path": session.final_path().iter().map(|p| p.to_json_value()).collect::<Vec<_>>(),
            "found": session.found(),
            "history_depth": session.history_depth(),
            "status": session.status().as_str(),
            "steps_taken": session.steps_taken(),
        })
    }

    fn push(
        &mut self,
        session: &SearchSession,
        command: &SessionCommand,
        detail: serde_json::Value,
    ) -> Result<(), SessionError> {
        let digest = session.state_digest()?;
        self.entries.push(serde_json::json!({
            "command": command.as_str(),
            "detail": detail,
            "history_depth": session.history_depth(),
            "index": self.entries.len(),
            "state_digest": digest.as_str(),
        }));
        self.final_digest = digest;
        self.final_json = Self::summary(session);
        Ok(())
    }

    /// Record a step the session has just taken.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Canon`] if the state cannot be digested.
    pub fn record_step(
        &mut self,
        session: &SearchSession,
        report: &StepReport,
    ) -> Result<(), SessionError> {
        self.push(session, &SessionCommand::Step, report.to_json_value())
    }

    /// Record an undo the session has just performed.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Canon`] if the state cannot be digested.
    pub fn record_undo(
        &mut self,
        session: &SearchSession,
        outcome: UndoOutcome,
    ) -> Result<(), SessionError> {
        self.push(
            session,
            &SessionCommand::Undo,
            serde_json::json!({ "outcome": outcome.as_str() }),
        )
    }

    /// Record a reset to the default layout the session has just performed.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Canon`] if the state cannot be digested.
    pub fn record_reset(&mut self, session: &SearchSession) -> Result<(), SessionError> {
        self.push(session, &SessionCommand::ResetDefault, serde_json::Value::Null)
    }

    /// Apply `command` to `session` and record it.
    ///
    /// # Errors
    ///
    /// Returns any error from the reset or from digesting.
    pub fn apply(
        &mut self,
        session: &mut SearchSession,
        command: &SessionCommand,
    ) -> Result<(), SessionError> {
        match command {
            SessionCommand::Step => {
                let report = session.step();
                self.record_step(session, &report)
            }
            SessionCommand::Undo => {
                let outcome = session.undo();
                self.record_undo(session, outcome)
            }
            SessionCommand::ResetDefault => {
                session.reset_default()?;
                self.record_reset(session)
            }
        }
    }

    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn final_digest(&self) -> &ContentHash {
        &self.final_digest
    }

    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "entries": self.entries,
            "entry_count": self.entries.len(),
            "final": self.final_json,
            "final_digest": self.final_digest.as_str(),
            "header": self.header,
            "initial_digest": self.initial_digest.as_str(),
            "schema_version": SCHEMA_VERSION,
        })
    }

    /// Canonical JSON bytes of the whole transcript.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if any number in the transcript is not an integer.
    pub fn to_canonical_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json_value())
    }

    /// Digest of [`SessionTranscriptV1::to_canonical_bytes`].
    ///
    /// # Errors
    ///
    /// Same as [`SessionTranscriptV1::to_canonical_bytes`].
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        Ok(canonical_hash(
            HashDomain::SessionTranscript,
            &self.to_canonical_bytes()?,
        ))
    }
}
