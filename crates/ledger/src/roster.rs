use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use messmate_core::{Aggregate, DomainError, DomainResult, MemberId};

use crate::member::{Member, MemberField, parse_amount};
use crate::seed::seed_members;
use crate::summary::LedgerSummary;

/// Aggregate root: the ordered roster of members.
///
/// Order is display order only. Aggregates are never cached here; call
/// [`Roster::summary`] after every mutation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Roster {
    members: Vec<Member>,
    version: u64,
}

impl Roster {
    /// An empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// The default ten-member roster with zeroed amounts.
    pub fn seeded() -> Self {
        Self {
            members: seed_members(),
            version: 0,
        }
    }

    /// Rehydrate a roster from previously stored members.
    ///
    /// Rejects duplicate ids and non-finite amounts.
    pub fn from_members(members: Vec<Member>) -> DomainResult<Self> {
        let mut seen = HashSet::with_capacity(members.len());
        for m in &members {
            if !seen.insert(m.id) {
                return Err(DomainError::invariant(format!("duplicate member id {}", m.id)));
            }
            if !m.deposit.is_finite() || !m.meals.is_finite() {
                return Err(DomainError::invariant(format!(
                    "member {} has a non-finite amount",
                    m.id
                )));
            }
        }

        Ok(Self {
            members,
            version: 0,
        })
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn into_members(self) -> Vec<Member> {
        self.members
    }

    pub fn get(&self, id: MemberId) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }

    pub fn contains(&self, id: MemberId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Id the next added member will receive, `None` when the id space is used up.
    pub fn next_id(&self) -> Option<MemberId> {
        MemberId::next_after(self.members.iter().map(|m| m.id))
    }

    /// Derived totals, rate and per-member balances, computed fresh.
    pub fn summary(&self) -> LedgerSummary {
        LedgerSummary::compute(&self.members)
    }
}

/// Command: mutate the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RosterCommand {
    AddMember { name: String },
    DeleteMember { id: MemberId },
    /// `raw` is the text as typed; parsing happens in `handle`.
    UpdateField {
        id: MemberId,
        field: MemberField,
        raw: String,
    },
    ResetAll,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RosterEvent {
    MemberAdded { id: MemberId, name: String },
    MemberDeleted { id: MemberId },
    FieldUpdated {
        id: MemberId,
        field: MemberField,
        value: f64,
    },
    RosterReset,
}

impl RosterEvent {
    /// Stable event name (e.g. "ledger.member.added").
    pub fn event_type(&self) -> &'static str {
        match self {
            RosterEvent::MemberAdded { .. } => "ledger.member.added",
            RosterEvent::MemberDeleted { .. } => "ledger.member.deleted",
            RosterEvent::FieldUpdated { .. } => "ledger.member.field_updated",
            RosterEvent::RosterReset => "ledger.roster.reset",
        }
    }
}

impl Aggregate for Roster {
    type Command = RosterCommand;
    type Event = RosterEvent;
    type Error = DomainError;

    fn version(&self) -> u64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        match event {
            RosterEvent::MemberAdded { id, name } => {
                self.members.push(Member::new(*id, name.clone()));
            }
            RosterEvent::MemberDeleted { id } => {
                self.members.retain(|m| m.id != *id);
            }
            RosterEvent::FieldUpdated { id, field, value } => {
                if let Some(m) = self.members.iter_mut().find(|m| m.id == *id) {
                    m.set_field(*field, *value);
                }
            }
            RosterEvent::RosterReset => {
                self.members.iter_mut().for_each(Member::clear_amounts);
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            RosterCommand::AddMember { name } => self.handle_add(name),
            RosterCommand::DeleteMember { id } => Ok(self.handle_delete(*id)),
            RosterCommand::UpdateField { id, field, raw } => self.handle_update(*id, *field, raw),
            RosterCommand::ResetAll => Ok(vec![RosterEvent::RosterReset]),
        }
    }
}

impl Roster {
    fn handle_add(&self, name: &str) -> Result<Vec<RosterEvent>, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(vec![]);
        }

        let id = self
            .next_id()
            .ok_or_else(|| DomainError::invariant("member id space exhausted"))?;

        Ok(vec![RosterEvent::MemberAdded {
            id,
            name: name.to_string(),
        }])
    }

    fn handle_delete(&self, id: MemberId) -> Vec<RosterEvent> {
        if !self.contains(id) {
            return vec![];
        }
        vec![RosterEvent::MemberDeleted { id }]
    }

    fn handle_update(
        &self,
        id: MemberId,
        field: MemberField,
        raw: &str,
    ) -> Result<Vec<RosterEvent>, DomainError> {
        let value = parse_amount(field, raw)?;
        if !self.contains(id) {
            return Ok(vec![]);
        }
        Ok(vec![RosterEvent::FieldUpdated { id, field, value }])
    }
}
