//! Per-slot selection flags.
//!
//! Selection is not a zone: a selected card stays in the hand. What the
//! player may do depends only on how many slots are selected.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// What the current selection count allows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionAction {
    /// Nothing selected.
    None,
    /// Exactly one card: it can be assigned.
    Assign,
    /// Two or more cards: they can be discarded together.
    Discard,
}

/// One flag per hand slot.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    flags: SmallVec<[bool; 6]>,
}

impl Selection {
    /// All slots unselected.
    #[must_use]
    pub fn new(slots: usize) -> Self {
        Self {
            flags: SmallVec::from_elem(false, slots),
        }
    }

    /// Flip one slot. Returns the new flag, or `None` for an unknown slot.
    pub fn toggle(&mut self, slot: usize) -> Option<bool> {
        let flag = self.flags.get_mut(slot)?;
        *flag = !*flag;
        Some(*flag)
    }

    #[must_use]
    pub fn is_selected(&self, slot: usize) -> bool {
        self.flags.get(slot).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.flags.iter().filter(|&&f| f).count()
    }

    /// Selected slot indices, ascending.
    #[must_use]
    pub fn selected_slots(&self) -> SmallVec<[usize; 6]> {
        self.flags
            .iter()
            .enumerate()
            .filter_map(|(i, &f)| f.then_some(i))
            .collect()
    }

    /// The only selected slot, if exactly one is selected.
    #[must_use]
    pub fn single(&self) -> Option<usize> {
        match self.selected_slots().as_slice() {
            [slot] => Some(*slot),
            _ => None,
        }
    }

    #[must_use]
    pub fn action(&self) -> SelectionAction {
        match self.count() {
            0 => SelectionAction::None,
            1 => SelectionAction::Assign,
            _ => SelectionAction::Discard,
        }
    }

    pub fn clear(&mut self) {
        self.flags.iter_mut().for_each(|f| *f = false);
    }
}
