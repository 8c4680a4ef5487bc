//! Two-step confirmation for destructive roster actions.
//!
//! A request parks a [`PendingAction`] and hands back a token; only confirming
//! with that same token releases the action. At most one action is pending.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use messmate_core::{DomainError, DomainResult, MemberId};

use crate::roster::RosterCommand;

/// Opaque handle for one confirmation request.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfirmationToken(Uuid);

impl ConfirmationToken {
    fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl core::fmt::Display for ConfirmationToken {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// A destructive action waiting for a yes/no answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PendingAction {
    DeleteMember(MemberId),
    ResetAll,
}

impl PendingAction {
    /// Question to put to the user.
    pub fn prompt(&self) -> &'static str {
        match self {
            PendingAction::DeleteMember(_) => "Delete this member?",
            PendingAction::ResetAll => "Are you sure? This will clear all numbers.",
        }
    }

    pub fn to_command(self) -> RosterCommand {
        match self {
            PendingAction::DeleteMember(id) => RosterCommand::DeleteMember { id },
            PendingAction::ResetAll => RosterCommand::ResetAll,
        }
    }
}

#[derive(Debug, Default)]
pub struct ConfirmationGate {
    pending: Option<(ConfirmationToken, PendingAction)>,
}

impl ConfirmationGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Park `action`, replacing whatever was pending before.
    pub fn request(&mut self, action: PendingAction) -> ConfirmationToken {
        let token = ConfirmationToken::new();
        self.pending = Some((token, action));
        token
    }

    pub fn pending(&self) -> Option<(ConfirmationToken, PendingAction)> {
        self.pending
    }

    /// Release the parked action if `token` is the current one.
    pub fn confirm(&mut self, token: ConfirmationToken) -> DomainResult<PendingAction> {
        match self.pending {
            Some((current, action)) if current == token => {
                self.pending = None;
                Ok(action)
            }
            _ => Err(DomainError::not_found(format!(
                "no pending confirmation for token {token}"
            ))),
        }
    }

    /// Drop the parked action. Returns `false` for a stale or unknown token.
    pub fn cancel(&mut self, token: ConfirmationToken) -> bool {
        match self.pending {
            Some((current, _)) if current == token => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }
}
