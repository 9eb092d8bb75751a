//! Selection and action controller.
//!
//! Turns the player's selection into assigns and discards and runs the
//! animations that follow them. The controller owns no cards or projects;
//! every call gets the deck, the project queue, and the stats passed in.
//!
//! ## Assign
//!
//! ```text
//! assign() --> travel out --> strike --> travel back --+--> no targets: discard played card, refill
//!                                                      `--> inspire laser --> inspire taker
//!                                                                              |  buff at midpoint
//!                                                                              `--> discard played card, refill
//! ```
//!
//! The strike is skipped if a hit is already open when the card arrives;
//! the card just turns around.
//!
//! ## Discard
//!
//! `discard()` --> slide/drop --> selected cards move to the discard pile,
//! selection clears, hand refills.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::cards::{CardRegistry, Subject};
use crate::core::config::{AnimationConfig, GameConfig};
use crate::core::entity::EntityId;
use crate::core::error::{GameError, GameResult};
use crate::core::event::{EventLog, GameEvent};
use crate::core::layout::Layout;
use crate::core::progress::Progress;
use crate::core::rng::GameRng;
use crate::effects::{get_inspired, InspireTargets};
use crate::projects::{HitReport, ProjectQueue};
use crate::rules::stats::Stats;
use crate::zones::{DeckEngine, Selection};

/// Discard animation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum DiscardState {
    Idle,
    Active {
        progress: Progress,
        slots: SmallVec<[usize; 6]>,
    },
}

/// An assigned card on its way to a project and back.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssignTravel {
    /// Hand slot the card left from.
    pub slot: usize,
    pub card: EntityId,
    pub subject: Subject,
    /// `true` on the way out, `false` on the way back.
    pub going_to_hit: bool,
    pub current_distance: f32,
    pub total_distance: f32,
    pub origin: Vec2,
    /// Unit vector from the hand slot to the project slot.
    pub direction: Vec2,
    /// Set on arrival, unless the strike was skipped.
    pub strike: Option<HitReport>,
}

impl AssignTravel {
    /// Current position of the travelling card.
    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.origin + self.direction * self.current_distance
    }
}

/// Assign animation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum AssignState {
    Idle,
    Active(AssignTravel),
}

/// Shared data of both inspire phases.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InspireAnimation {
    /// Slot of the played card, which is still in hand.
    pub source_slot: usize,
    pub source: EntityId,
    pub progress: Progress,
    /// Hand slots receiving the buff.
    pub affected: InspireTargets,
    pub has_applied_buff: bool,
    pub was_project_completed: bool,
}

/// Inspire animation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum InspireState {
    Idle,
    /// Beams from the played card to each target.
    Laser(InspireAnimation),
    /// Targets flip face down and back; the buff lands at the midpoint.
    Taker(InspireAnimation),
}

#[derive(Clone, Debug)]
struct ControllerRules {
    action_cost: i64,
    buff_on_completed: i64,
    buff_on_incomplete: i64,
    animation: AnimationConfig,
    layout: Layout,
}

/// Runs player actions and their animations.
#[derive(Clone, Debug)]
pub struct ActionController {
    selection: Selection,
    discard: DiscardState,
    assign: AssignState,
    inspire: InspireState,
    rules: ControllerRules,
}

impl ActionController {
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        Self {
            selection: Selection::new(config.hand_size),
            discard: DiscardState::Idle,
            assign: AssignState::Idle,
            inspire: InspireState::Idle,
            rules: ControllerRules {
                action_cost: config.action_cost,
                buff_on_completed: config.buff_on_completed,
                buff_on_incomplete: config.buff_on_incomplete,
                animation: config.animation.clone(),
                layout: config.layout.clone(),
            },
        }
    }

    // === Queries ===

    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    #[must_use]
    pub fn discard_state(&self) -> &DiscardState {
        &self.discard
    }

    #[must_use]
    pub fn assign_state(&self) -> &AssignState {
        &self.assign
    }

    #[must_use]
    pub fn inspire_state(&self) -> &InspireState {
        &self.inspire
    }

    /// Any controller animation in flight.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        !matches!(self.discard, DiscardState::Idle)
            || !matches!(self.assign, AssignState::Idle)
            || !matches!(self.inspire, InspireState::Idle)
    }

    /// Every animation that gates input has finished.
    #[must_use]
    pub fn is_settled(&self, deck: &DeckEngine, projects: &ProjectQueue) -> bool {
        !(projects.is_hit_open()
            || projects.is_laser_playing()
            || projects.is_spawning()
            || deck.is_busy()
            || self.is_animating())
    }

    /// The input gate. Recomputed every tick.
    #[must_use]
    pub fn is_action_blocked(&self, deck: &DeckEngine, projects: &ProjectQueue, stats: &Stats) -> bool {
        stats.is_game_over() || !self.is_settled(deck, projects)
    }

    // === Commands ===
    //
    // Callers check the gate first. Commands only validate their own
    // arguments and never mutate anything on error.

    /// Flip one hand slot's selection. Returns the new flag.
    pub fn toggle_select(&mut self, slot: usize, deck: &DeckEngine) -> GameResult<bool> {
        let hand_len = deck.hand().len();
        if slot >= hand_len {
            return Err(GameError::InvalidSlot { slot, hand_len });
        }
        self.selection
            .toggle(slot)
            .ok_or(GameError::InvalidSlot { slot, hand_len })
    }

    /// Check that an assign would be accepted. Returns the slot to play.
    pub fn check_assign(&self, deck: &DeckEngine) -> GameResult<usize> {
        let slot = self.selection.single().ok_or(GameError::SelectionCount {
            action: "assign",
            need: "exactly 1",
            have: self.selection.count(),
        })?;
        if deck.card(slot).is_none() {
            return Err(GameError::InvalidSlot {
                slot,
                hand_len: deck.hand().len(),
            });
        }
        Ok(slot)
    }

    /// Check that a discard would be accepted. Returns the selected slots.
    pub fn check_discard(&self, deck: &DeckEngine) -> GameResult<SmallVec<[usize; 6]>> {
        let slots = self.selection.selected_slots();
        if slots.len() < 2 {
            return Err(GameError::SelectionCount {
                action: "discard",
                need: "at least 2",
                have: slots.len(),
            });
        }
        let hand_len = deck.hand().len();
        if let Some(&slot) = slots.iter().find(|&&s| s >= hand_len) {
            return Err(GameError::InvalidSlot { slot, hand_len });
        }
        Ok(slots)
    }

    /// Send the single selected card at its subject's project.
    ///
    /// Charges the action cost up front. That is the only energy an assign
    /// ever costs, whichever way it resolves.
    pub fn assign(
        &mut self,
        deck: &DeckEngine,
        projects: &ProjectQueue,
        registry: &CardRegistry,
        stats: &mut Stats,
        events: &mut EventLog,
    ) -> GameResult<EntityId> {
        let slot = self.check_assign(deck)?;
        let card = deck.hand()[slot].clone();
        let subject = registry.get_unchecked(card.card_id).subject;
        let project_slot = projects
            .slot_of(subject)
            .unwrap_or_else(|| panic!("no live project for subject {subject}"));

        let origin = self.rules.layout.hand_slot(slot);
        let target = self.rules.layout.project_slot(project_slot);

        stats.charge(self.rules.action_cost, events);
        self.selection.clear();
        self.assign = AssignState::Active(AssignTravel {
            slot,
            card: card.entity_id,
            subject,
            going_to_hit: true,
            current_distance: 0.0,
            total_distance: origin.distance(target),
            origin,
            direction: (target - origin).normalize_or_zero(),
            strike: None,
        });

        debug!(card = %card.entity_id, %subject, power = card.power, "card assigned");
        events.push(GameEvent::CardAssigned {
            card: card.entity_id,
            subject,
        });
        Ok(card.entity_id)
    }

    /// Start discarding every selected card. Returns how many.
    pub fn discard(&mut self, deck: &DeckEngine, stats: &mut Stats, events: &mut EventLog) -> GameResult<usize> {
        let slots = self.check_discard(deck)?;
        let count = slots.len();

        stats.charge(self.rules.action_cost, events);
        self.discard = DiscardState::Active {
            progress: Progress::new(self.rules.animation.discard_step),
            slots,
        };
        debug!(cards = count, "discard started");
        Ok(count)
    }

    // === Animation ===

    /// Step every controller animation once.
    ///
    /// Phases that start during this call first advance on the next one.
    pub fn advance(
        &mut self,
        deck: &mut DeckEngine,
        projects: &mut ProjectQueue,
        registry: &CardRegistry,
        rng: &mut GameRng,
        events: &mut EventLog,
    ) {
        self.advance_inspire(deck, rng, events);
        self.advance_assign(deck, projects, registry, rng, events);
        self.advance_discard(deck, rng, events);
    }

    fn advance_discard(&mut self, deck: &mut DeckEngine, rng: &mut GameRng, events: &mut EventLog) {
        let DiscardState::Active { progress, .. } = &mut self.discard else {
            return;
        };
        if !progress.advance() {
            return;
        }
        self.discard = DiscardState::Idle;
        if let Err(err) = deck.discard_selected(&mut self.selection, rng, events) {
            warn!(%err, "discard could not resolve");
            self.selection.clear();
        }
    }

    fn advance_assign(
        &mut self,
        deck: &mut DeckEngine,
        projects: &mut ProjectQueue,
        registry: &CardRegistry,
        rng: &mut GameRng,
        events: &mut EventLog,
    ) {
        let speed = self.rules.animation.assign_speed;
        let AssignState::Active(travel) = &mut self.assign else {
            return;
        };

        if travel.going_to_hit {
            travel.current_distance = (travel.current_distance + speed).min(travel.total_distance);
            if travel.current_distance >= travel.total_distance {
                travel.going_to_hit = false;
                travel.strike = strike(travel, deck, projects, events);
            }
            return;
        }

        travel.current_distance = (travel.current_distance - speed).max(0.0);
        if travel.current_distance > 0.0 {
            return;
        }
        let travel = *travel;
        self.assign = AssignState::Idle;
        self.finish_assign(&travel, deck, registry, rng, events);
    }

    /// The card is back in its slot: inspire, or clean it up right away.
    fn finish_assign(
        &mut self,
        travel: &AssignTravel,
        deck: &mut DeckEngine,
        registry: &CardRegistry,
        rng: &mut GameRng,
        events: &mut EventLog,
    ) {
        let slot = deck.slot_of(travel.card).unwrap_or(travel.slot);
        let affected = get_inspired(registry, deck.hand(), slot, rng);
        if affected.is_empty() {
            discard_played(deck, slot, rng, events);
            return;
        }

        debug!(source = %travel.card, targets = ?affected, "inspire started");
        self.inspire = InspireState::Laser(InspireAnimation {
            source_slot: slot,
            source: travel.card,
            progress: Progress::new(self.rules.animation.inspire_laser_step),
            affected,
            has_applied_buff: false,
            was_project_completed: travel.strike.is_some_and(|s| s.is_completed),
        });
    }

    fn advance_inspire(&mut self, deck: &mut DeckEngine, rng: &mut GameRng, events: &mut EventLog) {
        let taker_step = self.rules.animation.inspire_taker_step;
        let (on_completed, on_incomplete) = (self.rules.buff_on_completed, self.rules.buff_on_incomplete);

        match &mut self.inspire {
            InspireState::Idle => {}
            InspireState::Laser(anim) => {
                if anim.progress.advance() {
                    let mut next = anim.clone();
                    next.progress = Progress::new(taker_step);
                    self.inspire = InspireState::Taker(next);
                }
            }
            InspireState::Taker(anim) => {
                anim.progress.advance();
                if !anim.has_applied_buff && anim.progress.has_reached(0.5) {
                    anim.has_applied_buff = true;
                    let buff = if anim.was_project_completed {
                        on_completed
                    } else {
                        on_incomplete
                    };
                    let targets: SmallVec<[EntityId; 6]> = anim
                        .affected
                        .iter()
                        .filter_map(|&slot| deck.buff_slot(slot, buff))
                        .collect();
                    debug!(source = %anim.source, buff, cards = targets.len(), "inspire applied");
                    events.push(GameEvent::CardsInspired {
                        source: anim.source,
                        targets,
                        buff,
                    });
                }
                if anim.progress.is_done() {
                    let slot = deck.slot_of(anim.source).unwrap_or(anim.source_slot);
                    self.inspire = InspireState::Idle;
                    discard_played(deck, slot, rng, events);
                }
            }
        }
    }
}

/// Damage the card's project, unless a hit is already open.
fn strike(
    travel: &AssignTravel,
    deck: &DeckEngine,
    projects: &mut ProjectQueue,
    events: &mut EventLog,
) -> Option<HitReport> {
    let power = deck.slot_of(travel.card).and_then(|slot| deck.card(slot)).map(|c| c.power)?;
    if projects.is_hit_open() {
        debug!(card = %travel.card, "strike skipped: project already being hit");
        events.push(GameEvent::StrikeSkipped { card: travel.card });
        return None;
    }
    projects.damage(travel.subject, power, events).ok()
}

fn discard_played(deck: &mut DeckEngine, slot: usize, rng: &mut GameRng, events: &mut EventLog) {
    if let Err(err) = deck.discard_slot(slot, rng, events) {
        warn!(%err, slot, "played card could not be discarded");
    }
}
