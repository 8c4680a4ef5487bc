//! Shared-meal ledger domain (roster, derived balances, confirmations).
//!
//! Pure domain logic only: no IO, no storage, no rendering concerns.

pub mod confirmation;
pub mod member;
pub mod roster;
pub mod seed;
pub mod summary;

pub use confirmation::{ConfirmationGate, ConfirmationToken, PendingAction};
pub use member::{Member, MemberField, parse_amount};
pub use roster::{Roster, RosterCommand, RosterEvent};
pub use seed::{SEED_NAMES, seed_members};
pub use summary::{LedgerSummary, MemberStanding, Standing};
