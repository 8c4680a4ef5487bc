//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a roster member.
///
/// Ids are small positive integers assigned by the roster (`max + 1`), never
/// reused while the member exists and never reassigned when others are removed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(u64);

impl MemberId {
    /// The id handed to the first member of an empty roster.
    pub const FIRST: MemberId = MemberId(1);

    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    /// Next id after the highest id in `existing`, or [`MemberId::FIRST`] when empty.
    ///
    /// `None` once the highest id is `u64::MAX`.
    pub fn next_after<I>(existing: I) -> Option<Self>
    where
        I: IntoIterator<Item = MemberId>,
    {
        match existing.into_iter().max() {
            Some(max) => max.0.checked_add(1).map(MemberId),
            None => Some(Self::FIRST),
        }
    }
}

impl core::fmt::Display for MemberId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<u64> for MemberId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<MemberId> for u64 {
    fn from(value: MemberId) -> Self {
        value.0
    }
}

impl FromStr for MemberId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<u64>()
            .map_err(|e| DomainError::validation(format!("MemberId: {e}")))?;
        Ok(Self(value))
    }
}
