use core::str::FromStr;

use serde::{Deserialize, Serialize};

use messmate_core::{DomainError, DomainResult, MemberId};

/// One participant in the shared-meal ledger.
///
/// Serialized as `{ "id", "name", "deposit", "meals" }`, which is also the
/// persisted shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    /// Cumulative money contributed.
    pub deposit: f64,
    /// Cumulative meals consumed (fractional allowed).
    pub meals: f64,
}

impl Member {
    /// A fresh member with nothing deposited and no meals.
    pub fn new(id: MemberId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            deposit: 0.0,
            meals: 0.0,
        }
    }

    pub fn field(&self, field: MemberField) -> f64 {
        match field {
            MemberField::Deposit => self.deposit,
            MemberField::Meals => self.meals,
        }
    }

    pub(crate) fn set_field(&mut self, field: MemberField, value: f64) {
        match field {
            MemberField::Deposit => self.deposit = value,
            MemberField::Meals => self.meals = value,
        }
    }

    pub(crate) fn clear_amounts(&mut self) {
        self.deposit = 0.0;
        self.meals = 0.0;
    }
}

/// Editable numeric field of a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberField {
    Deposit,
    Meals,
}

impl MemberField {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberField::Deposit => "deposit",
            MemberField::Meals => "meals",
        }
    }
}

impl core::fmt::Display for MemberField {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MemberField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "deposit" => Ok(MemberField::Deposit),
            "meals" => Ok(MemberField::Meals),
            other => Err(DomainError::validation(format!("unknown member field '{other}'"))),
        }
    }
}

/// Parse user-typed text for a numeric field.
///
/// Blank input means zero. Anything that is not a finite number is rejected so
/// the caller can keep the previous value.
pub fn parse_amount(field: MemberField, raw: &str) -> DomainResult<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }

    let value = trimmed
        .parse::<f64>()
        .map_err(|_| DomainError::validation(format!("{field} must be a number, got '{trimmed}'")))?;

    if !value.is_finite() {
        return Err(DomainError::validation(format!(
            "{field} must be a finite number, got '{trimmed}'"
        )));
    }

    Ok(value)
}
