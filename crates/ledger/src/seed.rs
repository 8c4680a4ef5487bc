//! Default roster used when nothing has been persisted yet.

use messmate_core::MemberId;

use crate::member::Member;

/// Seed member names, in display order. Ids are assigned 1..=10.
pub const SEED_NAMES: [&str; 10] = [
    "Tushar Sheikh",
    "Abu Bakar",
    "Shahin",
    "Mehedi bhai",
    "Mahmud",
    "Riyad",
    "Kamirul",
    "Tarik",
    "Ibrahim",
    "Faruk mama",
];

pub fn seed_members() -> Vec<Member> {
    SEED_NAMES
        .iter()
        .zip(1u64..)
        .map(|(name, id)| Member::new(MemberId::new(id), *name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_has_ten_zeroed_members_with_sequential_ids() {
        let members = seed_members();
        assert_eq!(members.len(), 10);
        for (idx, m) in members.iter().enumerate() {
            assert_eq!(m.id.get(), idx as u64 + 1);
            assert_eq!(m.deposit, 0.0);
            assert_eq!(m.meals, 0.0);
        }
        assert_eq!(members[0].name, "Tushar Sheikh");
        assert_eq!(members[9].name, "Faruk mama");
    }
}
