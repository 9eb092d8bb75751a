//! The standard 32-card roster.
//!
//! Eight body variants with four characters each. Every subject appears
//! eight times and no two characters share a name.

use super::definition::{AbilityKind, Subject};

/// `(name, is_male, subject, body, ability)` in roster order.
pub(crate) const STANDARD_ROSTER: [(&str, bool, Subject, u8, AbilityKind); 32] = [
    ("andrew", true, Subject::Math, 0, AbilityKind::ByName),
    ("chloe", false, Subject::Engineering, 0, AbilityKind::ByBody),
    ("ryan", true, Subject::Technology, 0, AbilityKind::BySubject),
    ("sophia", false, Subject::Science, 0, AbilityKind::ByGender),
    ("amanda", false, Subject::Science, 1, AbilityKind::ByBody),
    ("connor", true, Subject::Math, 1, AbilityKind::ByName),
    ("rose", false, Subject::Engineering, 1, AbilityKind::ByGender),
    ("steve", true, Subject::Technology, 1, AbilityKind::ByRandom),
    ("adam", true, Subject::Technology, 2, AbilityKind::ByGender),
    ("julia", false, Subject::Science, 2, AbilityKind::ByName),
    ("richard", true, Subject::Math, 2, AbilityKind::ByBody),
    ("wendy", false, Subject::Engineering, 2, AbilityKind::BySubject),
    ("abigail", false, Subject::Engineering, 3, AbilityKind::ByRandom),
    ("justin", true, Subject::Technology, 3, AbilityKind::ByBody),
    ("rebecca", false, Subject::Science, 3, AbilityKind::ByName),
    ("walter", true, Subject::Math, 3, AbilityKind::ByGender),
    ("emily", false, Subject::Math, 4, AbilityKind::BySubject),
    ("jimmy", true, Subject::Engineering, 4, AbilityKind::ByGender),
    ("linda", false, Subject::Technology, 4, AbilityKind::ByName),
    ("warren", true, Subject::Science, 4, AbilityKind::ByBody),
    ("eric", true, Subject::Science, 5, AbilityKind::ByGender),
    ("jessica", false, Subject::Math, 5, AbilityKind::ByRandom),
    ("liam", true, Subject::Engineering, 5, AbilityKind::ByBody),
    ("wanda", false, Subject::Technology, 5, AbilityKind::ByName),
    ("emma", false, Subject::Technology, 6, AbilityKind::ByBody),
    ("colin", true, Subject::Science, 6, AbilityKind::BySubject),
    ("laura", false, Subject::Math, 6, AbilityKind::ByGender),
    ("scott", true, Subject::Engineering, 6, AbilityKind::ByName),
    ("ethan", true, Subject::Engineering, 7, AbilityKind::ByName),
    ("clara", false, Subject::Technology, 7, AbilityKind::ByGender),
    ("lucas", true, Subject::Science, 7, AbilityKind::ByRandom),
    ("susan", false, Subject::Math, 7, AbilityKind::ByBody),
];

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_names_are_unique() {
        let names: FxHashSet<_> = STANDARD_ROSTER.iter().map(|c| c.0).collect();
        assert_eq!(names.len(), 32);
    }

    #[test]
    fn test_subjects_are_balanced() {
        for subject in Subject::ALL {
            let count = STANDARD_ROSTER.iter().filter(|c| c.2 == subject).count();
            assert_eq!(count, 8, "{subject}");
        }
    }

    #[test]
    fn test_four_cards_per_body() {
        for body in 0..8u8 {
            let count = STANDARD_ROSTER.iter().filter(|c| c.3 == body).count();
            assert_eq!(count, 4, "body {body}");
        }
    }
}
