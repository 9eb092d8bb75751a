//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable properties of a roster entry: the
//! character's name, gender, subject, body variant and inspire ability.
//! Instance-specific data (power) lives in `PlayingCard`.

use serde::{Deserialize, Serialize};

/// Index of a card definition in the roster (0..31 for the standard set).
///
/// Renderers use it as the opaque handle for card art.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u8);

impl CardId {
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Raw roster index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// The four project subjects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Subject {
    Science = 0,
    Technology = 1,
    Engineering = 2,
    Math = 3,
}

impl Subject {
    /// All subjects in discriminant order.
    pub const ALL: [Subject; 4] = [
        Subject::Science,
        Subject::Technology,
        Subject::Engineering,
        Subject::Math,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<u8> for Subject {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Subject::ALL.get(value as usize).copied().ok_or(value)
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Subject::Science => "science",
            Subject::Technology => "technology",
            Subject::Engineering => "engineering",
            Subject::Math => "math",
        };
        f.write_str(name)
    }
}

/// Body art variant, 0..7. Cards sharing a body inspire each other.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BodyVariant(u8);

impl BodyVariant {
    pub const COUNT: u8 = 8;

    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for BodyVariant {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value < Self::COUNT {
            Ok(Self(value))
        } else {
            Err(value)
        }
    }
}

/// How a played card picks the hand cards it inspires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilityKind {
    /// Every other card whose name starts with the same letter.
    ByName = 0,
    /// Every other card with the same body variant.
    ByBody = 1,
    /// The first other card with the same gender.
    ByGender = 2,
    /// Neighbouring cards (slot ±1) with the same subject.
    BySubject = 3,
    /// One random other card.
    ByRandom = 4,
}

impl TryFrom<u8> for AbilityKind {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(AbilityKind::ByName),
            1 => Ok(AbilityKind::ByBody),
            2 => Ok(AbilityKind::ByGender),
            3 => Ok(AbilityKind::BySubject),
            4 => Ok(AbilityKind::ByRandom),
            other => Err(other),
        }
    }
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use inspire_deck::cards::{AbilityKind, CardDefinition, CardId, Subject};
///
/// let card = CardDefinition::new(CardId::new(0), "andrew", true, Subject::Math, 0, AbilityKind::ByName);
/// assert_eq!(card.initial(), Some('a'));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    /// Roster index.
    pub id: CardId,

    /// Character name, lowercase.
    pub name: String,

    pub is_male: bool,

    pub subject: Subject,

    pub body: BodyVariant,

    pub ability: AbilityKind,
}

impl CardDefinition {
    /// Create a definition.
    ///
    /// Panics if `body` is outside 0..7; roster data is static, so a bad
    /// value is a programming error.
    #[must_use]
    pub fn new(
        id: CardId,
        name: impl Into<String>,
        is_male: bool,
        subject: Subject,
        body: u8,
        ability: AbilityKind,
    ) -> Self {
        let body = BodyVariant::try_from(body)
            .unwrap_or_else(|bad| panic!("body variant {bad} out of range for {id}"));
        Self {
            id,
            name: name.into(),
            is_male,
            subject,
            body,
            ability,
        }
    }

    /// First letter of the name, lowercased.
    #[must_use]
    pub fn initial(&self) -> Option<char> {
        self.name.chars().next().map(|c| c.to_ascii_lowercase())
    }
}
