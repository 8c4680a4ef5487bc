//! Derived ledger aggregates: totals, meal rate and per-member balances.
//!
//! Everything here is a pure function of the member slice at the moment of the
//! call. Nothing is cached.

use serde::Serialize;

use messmate_core::MemberId;

use crate::member::Member;

/// Ledger-wide aggregates plus one standing per member (roster order).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerSummary {
    pub total_deposit: f64,
    pub total_meals: f64,
    /// `total_deposit / total_meals`, or 0 when no meals were eaten.
    pub meal_rate: f64,
    /// Highest single deposit, or 0 for an empty roster.
    pub max_deposit: f64,
    pub standings: Vec<MemberStanding>,
}

/// A member's derived position in the ledger.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberStanding {
    pub id: MemberId,
    pub name: String,
    pub deposit: f64,
    pub meals: f64,
    /// `meals * meal_rate`.
    pub cost: f64,
    /// `deposit - cost`; positive means the member gets money back.
    pub balance: f64,
    pub top_depositor: bool,
}

/// Which way money flows for a member at settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Standing {
    Gets,
    Pays,
}

impl Standing {
    pub fn as_str(&self) -> &'static str {
        match self {
            Standing::Gets => "Gets",
            Standing::Pays => "Pays",
        }
    }
}

impl LedgerSummary {
    pub fn compute(members: &[Member]) -> Self {
        let total_deposit: f64 = members.iter().map(|m| m.deposit).sum();
        let total_meals: f64 = members.iter().map(|m| m.meals).sum();
        let meal_rate = if total_meals > 0.0 {
            total_deposit / total_meals
        } else {
            0.0
        };
        let max_deposit = members
            .iter()
            .map(|m| m.deposit)
            .reduce(f64::max)
            .unwrap_or(0.0);

        let standings = members
            .iter()
            .map(|m| {
                let cost = m.meals * meal_rate;
                MemberStanding {
                    id: m.id,
                    name: m.name.clone(),
                    deposit: m.deposit,
                    meals: m.meals,
                    cost,
                    balance: m.deposit - cost,
                    top_depositor: m.deposit > 0.0 && m.deposit == max_deposit,
                }
            })
            .collect();

        Self {
            total_deposit,
            total_meals,
            meal_rate,
            max_deposit,
            standings,
        }
    }

    pub fn member_count(&self) -> usize {
        self.standings.len()
    }

    pub fn standing_of(&self, id: MemberId) -> Option<&MemberStanding> {
        self.standings.iter().find(|s| s.id == id)
    }

    pub fn top_depositors(&self) -> impl Iterator<Item = &MemberStanding> {
        self.standings.iter().filter(|s| s.top_depositor)
    }

    /// Average deposit per member, used to scale balance bars.
    ///
    /// Falls back to 1 when the average is zero or undefined.
    pub fn average_deposit(&self) -> f64 {
        if self.standings.is_empty() {
            return 1.0;
        }
        let avg = self.total_deposit / self.standings.len() as f64;
        if avg == 0.0 || !avg.is_finite() {
            1.0
        } else {
            avg
        }
    }

    /// Width of a member's balance bar as a percentage in `[0, 100]`.
    pub fn balance_bar_percent(&self, standing: &MemberStanding) -> f64 {
        let pct = standing.balance.abs() / self.average_deposit() * 100.0;
        pct.clamp(0.0, 100.0)
    }
}

impl MemberStanding {
    pub fn standing(&self) -> Standing {
        if self.balance >= 0.0 {
            Standing::Gets
        } else {
            Standing::Pays
        }
    }

    /// Amount that changes hands at settlement, regardless of direction.
    pub fn settlement(&self) -> f64 {
        self.balance.abs()
    }

    /// First two characters of the name, upper-cased (avatar label).
    pub fn initials(&self) -> String {
        self.name.chars().take(2).collect::<String>().to_uppercase()
    }
}
