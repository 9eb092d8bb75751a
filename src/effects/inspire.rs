//! Inspire target selection.
//!
//! When a card is played, its ability picks the other hand cards it
//! inspires. Five rules exist, one per `AbilityKind`:
//!
//! | Ability     | Targets                                              |
//! |-------------|------------------------------------------------------|
//! | `ByName`    | every other card whose name has the same first letter |
//! | `ByBody`    | every other card with the same body variant          |
//! | `ByGender`  | the first other card (slot order) of the same gender |
//! | `BySubject` | the slot neighbours (±1) with the same subject        |
//! | `ByRandom`  | one random other card                                |
//!
//! Selection never mutates the hand. It runs twice per play in practice:
//! every frame while the player hovers a card (`preview_inspired`) and
//! once when the play resolves (`get_inspired`).

use smallvec::SmallVec;

use crate::cards::{AbilityKind, CardDefinition, CardRegistry, PlayingCard};
use crate::core::rng::GameRng;

/// Hand slot indices, ascending except for the single random pick.
pub type InspireTargets = SmallVec<[usize; 6]>;

/// Picks inspire targets for one source card in a hand.
#[derive(Clone, Copy, Debug)]
pub struct InspireSelector<'a> {
    registry: &'a CardRegistry,
    hand: &'a [PlayingCard],
    source: usize,
}

impl<'a> InspireSelector<'a> {
    /// `None` if `source` is not a hand slot.
    #[must_use]
    pub fn new(registry: &'a CardRegistry, hand: &'a [PlayingCard], source: usize) -> Option<Self> {
        (source < hand.len()).then_some(Self {
            registry,
            hand,
            source,
        })
    }

    fn definition(&self, slot: usize) -> &'a CardDefinition {
        self.registry.get_unchecked(self.hand[slot].card_id)
    }

    /// Ability of the source card.
    #[must_use]
    pub fn ability(&self) -> AbilityKind {
        self.definition(self.source).ability
    }

    /// Every slot except the source, ascending.
    fn others(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.hand.len()).filter(move |&i| i != self.source)
    }

    /// Does `other` satisfy the source's rule? Meaningless for `ByRandom`.
    fn matches(&self, other: usize) -> bool {
        let src = self.definition(self.source);
        let dst = self.definition(other);
        match src.ability {
            AbilityKind::ByName => src.initial() == dst.initial(),
            AbilityKind::ByBody => src.body == dst.body,
            AbilityKind::ByGender => src.is_male == dst.is_male,
            AbilityKind::BySubject => {
                src.subject == dst.subject && self.source.abs_diff(other) == 1
            }
            AbilityKind::ByRandom => true,
        }
    }

    /// Pick the targets. Only `ByRandom` draws from `rng`.
    pub fn select(&self, rng: &mut GameRng) -> InspireTargets {
        match self.ability() {
            AbilityKind::ByName | AbilityKind::ByBody | AbilityKind::BySubject => {
                self.others().filter(|&i| self.matches(i)).collect()
            }
            AbilityKind::ByGender => self.others().find(|&i| self.matches(i)).into_iter().collect(),
            AbilityKind::ByRandom => {
                if self.hand.len() < 2 {
                    return InspireTargets::new();
                }
                // Pick among the other slots, then skip over the source.
                let mut pick = rng.gen_index(self.hand.len() - 1);
                if pick >= self.source {
                    pick += 1;
                }
                smallvec::smallvec![pick]
            }
        }
    }
}

/// Authoritative targets for a play. Consumes game randomness for
/// `ByRandom` cards. Out-of-range slots inspire nothing.
pub fn get_inspired(
    registry: &CardRegistry,
    hand: &[PlayingCard],
    index: usize,
    rng: &mut GameRng,
) -> InspireTargets {
    InspireSelector::new(registry, hand, index)
        .map(|selector| selector.select(rng))
        .unwrap_or_default()
}

/// Hover preview. Leaves `rng` untouched and gives the same answer for the
/// same card every time it is asked.
#[must_use]
pub fn preview_inspired(
    registry: &CardRegistry,
    hand: &[PlayingCard],
    index: usize,
    rng: &GameRng,
) -> InspireTargets {
    let Some(card) = hand.get(index) else {
        return InspireTargets::new();
    };
    let mut preview_rng = rng.for_context(&format!("inspire-preview-{}", card.entity_id));
    get_inspired(registry, hand, index, &mut preview_rng)
}
