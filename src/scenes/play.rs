//! The play scene: one game from first draw to game over.
//!
//! `PlayScene` wires the deck, the project queue, the action controller and
//! the stats together and is the only surface a front-end talks to during
//! play. Input is queued and applied inside `tick()`, so within one tick the
//! order is always:
//!
//! 1. evaluate the gate
//! 2. apply at most one queued command, if the gate is open
//! 3. advance project animations (and credit landed rewards)
//! 4. advance deck animations
//! 5. advance controller animations
//! 6. latch game over, settle the outcome once everything has drained
//!
//! ```
//! use inspire_deck::core::{AnimationConfig, GameConfig};
//! use inspire_deck::scenes::PlayScene;
//!
//! let config = GameConfig::default()
//!     .with_animation(AnimationConfig::instant())
//!     .with_input_cooldown(0);
//! let mut play = PlayScene::new(config);
//! play.run_until_idle(100);
//!
//! assert_eq!(play.hand_slots().len(), 6);
//! assert_eq!(play.energy(), 10);
//! assert!(!play.is_action_blocked());
//! ```

use glam::Vec2;
use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cards::{CardId, CardRegistry, PlayingCard, Subject};
use crate::core::config::GameConfig;
use crate::core::entity::EntityAllocator;
use crate::core::error::{GameError, GameResult};
use crate::core::event::{EventLog, GameEvent};
use crate::core::progress::Progress;
use crate::core::rng::GameRng;
use crate::effects::{preview_inspired, InspireTargets};
use crate::projects::{Flyer, HitTarget, Laser, ProjectQueue};
use crate::rules::{ActionController, AssignState, DiscardState, InspireState, Outcome, Stats};
use crate::zones::DeckEngine;

/// A queued player command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    ToggleSlot(usize),
    Assign,
    Discard,
}

/// Keyboard input, already decoded by the front-end.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    /// A digit key, `0..=9`.
    Digit(u8),
    /// A letter key, either case.
    Letter(char),
}

impl Key {
    /// The command a key stands for: digits 1-6 toggle slots, `A` assigns,
    /// `D` discards.
    #[must_use]
    pub fn command(self) -> Option<Command> {
        match self {
            Key::Digit(d @ 1..=6) => Some(Command::ToggleSlot(usize::from(d - 1))),
            Key::Letter(c) => match c.to_ascii_lowercase() {
                'a' => Some(Command::Assign),
                'd' => Some(Command::Discard),
                _ => None,
            },
            Key::Digit(_) => None,
        }
    }
}

/// Image lookup provided by the renderer. The engine only ever hands out
/// roster indices and subjects; what they map to is up to the renderer.
pub trait ArtHandle {
    type Handle;

    fn card_art(&self, card: CardId) -> Self::Handle;

    fn subject_icon(&self, subject: Subject) -> Self::Handle;
}

/// Render snapshot of one hand slot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HandSlot {
    pub slot: usize,
    pub card: PlayingCard,
    pub is_selected: bool,
    /// Where the card currently is; differs from its slot while assigned.
    pub position: Vec2,
    /// Fly-in from the draw pile, while it plays.
    pub draw: Option<Progress>,
    /// Slide-and-drop, while the card is being discarded.
    pub discard: Option<Progress>,
    /// Face-down flip, while the card is being inspired.
    pub inspire: Option<Progress>,
}

/// Render snapshot of one project slot.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectSlot {
    pub slot: usize,
    pub subject: Subject,
    pub hp: i64,
    pub max_hp: i64,
    /// HP the bar should show, lagging behind `hp` while a hit drains.
    pub displayed_hp: f32,
    pub spawn: Progress,
    pub is_hit: bool,
}

/// One game in progress.
#[derive(Clone, Debug)]
pub struct PlayScene {
    config: GameConfig,
    registry: CardRegistry,
    deck: DeckEngine,
    projects: ProjectQueue,
    controller: ActionController,
    stats: Stats,
    rng: GameRng,
    events: EventLog,
    pending: Option<Command>,
    cooldown: u32,
    ticks: u64,
}

impl PlayScene {
    /// Set up a fresh game with the standard roster.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self::with_registry(config, CardRegistry::standard())
    }

    /// Set up a fresh game dealing one card per registry entry.
    #[must_use]
    pub fn with_registry(config: GameConfig, registry: CardRegistry) -> Self {
        let mut rng = GameRng::new(config.seed);
        let mut events = EventLog::new();

        let mut ids = EntityAllocator::new();
        let cards = registry
            .iter()
            .map(|def| PlayingCard::new(ids.alloc(), def.id, config.starting_power))
            .collect();
        let mut deck = DeckEngine::new(cards, &config);

        let mut projects = ProjectQueue::new(&config);
        projects.populate(&mut rng, &mut events);
        deck.fill_hand(&mut rng, &mut events);

        info!(seed = config.seed, cards = deck.total_cards(), "new game");
        Self {
            controller: ActionController::new(&config),
            stats: Stats::new(&config),
            registry,
            deck,
            projects,
            rng,
            events,
            pending: None,
            cooldown: 0,
            ticks: 0,
            config,
        }
    }

    /// Throw this game away and deal a new one with the same config.
    pub fn new_game(&mut self) {
        *self = Self::with_registry(self.config.clone(), self.registry.clone());
    }

    // === Queries ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn registry(&self) -> &CardRegistry {
        &self.registry
    }

    #[must_use]
    pub fn deck(&self) -> &DeckEngine {
        &self.deck
    }

    #[must_use]
    pub fn project_queue(&self) -> &ProjectQueue {
        &self.projects
    }

    #[must_use]
    pub fn controller(&self) -> &ActionController {
        &self.controller
    }

    #[must_use]
    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// The input gate.
    #[must_use]
    pub fn is_action_blocked(&self) -> bool {
        self.controller
            .is_action_blocked(&self.deck, &self.projects, &self.stats)
    }

    #[must_use]
    pub fn hand_slots(&self) -> Vec<HandSlot> {
        let layout = &self.config.layout;
        let selection = self.controller.selection();

        let assigned = match self.controller.assign_state() {
            AssignState::Active(travel) => Some((travel.card, travel.position())),
            AssignState::Idle => None,
        };
        let discarding = match self.controller.discard_state() {
            DiscardState::Active { progress, slots } => Some((*progress, slots)),
            DiscardState::Idle => None,
        };
        let inspiring = match self.controller.inspire_state() {
            InspireState::Taker(anim) => Some((anim.progress, &anim.affected)),
            InspireState::Idle | InspireState::Laser(_) => None,
        };

        self.deck
            .hand()
            .iter()
            .enumerate()
            .map(|(slot, card)| HandSlot {
                slot,
                card: card.clone(),
                is_selected: selection.is_selected(slot),
                position: assigned
                    .filter(|(id, _)| *id == card.entity_id)
                    .map_or_else(|| layout.hand_slot(slot), |(_, pos)| pos),
                draw: self.deck.draw_progress(card.entity_id),
                discard: discarding
                    .filter(|(_, slots)| slots.contains(&slot))
                    .map(|(p, _)| p),
                inspire: inspiring
                    .filter(|(_, affected)| affected.contains(&slot))
                    .map(|(p, _)| p),
            })
            .collect()
    }

    #[must_use]
    pub fn projects(&self) -> Vec<ProjectSlot> {
        let hit = self.projects.hit_target();
        self.projects
            .projects()
            .iter()
            .enumerate()
            .map(|(slot, project)| {
                let open = hit.filter(|h| h.report.slot == slot);
                ProjectSlot {
                    slot,
                    subject: project.subject,
                    hp: project.hp,
                    max_hp: project.max_hp,
                    displayed_hp: open.map_or(project.hp as f32, HitTarget::displayed_hp),
                    spawn: project.spawn,
                    is_hit: open.is_some(),
                }
            })
            .collect()
    }

    #[must_use]
    pub fn draw_pile_count(&self) -> usize {
        self.deck.draw_pile_count()
    }

    #[must_use]
    pub fn discard_pile_count(&self) -> usize {
        self.deck.discard_pile_count()
    }

    #[must_use]
    pub fn energy(&self) -> i64 {
        self.stats.energy()
    }

    #[must_use]
    pub fn completed_amount(&self) -> i64 {
        self.stats.completed_amount()
    }

    #[must_use]
    pub fn hit_target(&self) -> Option<&HitTarget> {
        self.projects.hit_target()
    }

    #[must_use]
    pub fn laser(&self) -> Option<&Laser> {
        self.projects.laser()
    }

    #[must_use]
    pub fn flyer(&self) -> Option<&Flyer> {
        self.projects.flyer()
    }

    /// Hover preview of the cards a slot would inspire.
    #[must_use]
    pub fn preview_inspired(&self, slot: usize) -> InspireTargets {
        preview_inspired(&self.registry, self.deck.hand(), slot, &self.rng)
    }

    /// Settled outcome; `None` while playing or draining after game over.
    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        self.stats.outcome()
    }

    /// Portrait and subject icon for the card in a slot.
    #[must_use]
    pub fn art_of<A: ArtHandle>(&self, slot: usize, art: &A) -> Option<(A::Handle, A::Handle)> {
        let card = self.deck.card(slot)?;
        let subject = self.registry.get(card.card_id)?.subject;
        Some((art.card_art(card.card_id), art.subject_icon(subject)))
    }

    /// Take the events recorded since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    // === Commands ===

    pub fn on_hand_slot_clicked(&mut self, slot: usize) -> GameResult<()> {
        self.submit(Command::ToggleSlot(slot))
    }

    pub fn on_assign_button_clicked(&mut self) -> GameResult<()> {
        self.submit(Command::Assign)
    }

    pub fn on_discard_button_clicked(&mut self) -> GameResult<()> {
        self.submit(Command::Discard)
    }

    /// Read-only browse view of the draw pile.
    #[must_use]
    pub fn on_draw_pile_clicked(&self) -> Vector<PlayingCard> {
        self.deck.draw_pile_view()
    }

    /// Map a key to its command and submit it. Unbound keys are ignored.
    pub fn on_key(&mut self, key: Key) -> GameResult<()> {
        match key.command() {
            Some(command) => self.submit(command),
            None => Ok(()),
        }
    }

    /// Queue a command for the next tick.
    ///
    /// Rejected during the input cooldown, when a command is already queued
    /// this frame, while the gate is closed, or when the command itself is
    /// invalid right now.
    pub fn submit(&mut self, command: Command) -> GameResult<()> {
        if self.cooldown > 0 {
            return Err(GameError::InputCooldown {
                frames_left: self.cooldown,
            });
        }
        if self.pending.is_some() {
            return Err(GameError::InputAlreadyQueued);
        }
        if self.is_action_blocked() {
            return Err(GameError::ActionBlocked);
        }
        self.check(command)?;

        self.pending = Some(command);
        self.cooldown = self.config.input_cooldown_frames;
        Ok(())
    }

    fn check(&self, command: Command) -> GameResult<()> {
        match command {
            Command::ToggleSlot(slot) => {
                let hand_len = self.deck.hand().len();
                if slot >= hand_len {
                    return Err(GameError::InvalidSlot { slot, hand_len });
                }
                Ok(())
            }
            Command::Assign => self.controller.check_assign(&self.deck).map(|_| ()),
            Command::Discard => self.controller.check_discard(&self.deck).map(|_| ()),
        }
    }

    fn apply(&mut self, command: Command) -> GameResult<()> {
        match command {
            Command::ToggleSlot(slot) => self.controller.toggle_select(slot, &self.deck).map(|_| ()),
            Command::Assign => self
                .controller
                .assign(
                    &self.deck,
                    &self.projects,
                    &self.registry,
                    &mut self.stats,
                    &mut self.events,
                )
                .map(|_| ()),
            Command::Discard => self
                .controller
                .discard(&self.deck, &mut self.stats, &mut self.events)
                .map(|_| ()),
        }
    }

    // === Simulation ===

    /// Advance the game by one frame.
    pub fn tick(&mut self) {
        self.ticks += 1;

        let blocked = self.is_action_blocked();
        if let Some(command) = self.pending.take() {
            if blocked {
                debug!(?command, "queued command dropped: gate closed");
            } else if let Err(err) = self.apply(command) {
                debug!(?command, %err, "queued command rejected");
            }
        }

        if let Some(credit) = self.projects.advance(&mut self.rng, &mut self.events) {
            debug!(energy = credit.energy, subject = %credit.subject, "reward landed");
            self.stats.credit(credit, &mut self.events);
        }
        self.deck.advance();
        self.controller.advance(
            &mut self.deck,
            &mut self.projects,
            &self.registry,
            &mut self.rng,
            &mut self.events,
        );

        self.stats.latch();
        if self.stats.is_game_over()
            && self.stats.outcome().is_none()
            && self.controller.is_settled(&self.deck, &self.projects)
        {
            self.stats.settle(&mut self.events);
        }

        self.cooldown = self.cooldown.saturating_sub(1);
    }

    /// Tick until the gate opens or the game is settled, at most
    /// `max_ticks` times. Returns the ticks spent.
    pub fn run_until_idle(&mut self, max_ticks: u64) -> u64 {
        let mut spent = 0;
        while spent < max_ticks
            && self.pending.is_none()
            && self.is_action_blocked()
            && self.outcome().is_none()
        {
            self.tick();
            spent += 1;
        }
        // Then wait out the input cooldown.
        while spent < max_ticks && self.cooldown > 0 {
            self.tick();
            spent += 1;
        }
        spent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::AnimationConfig;

    fn quick() -> GameConfig {
        GameConfig::default()
            .with_animation(AnimationConfig::instant())
            .with_input_cooldown(0)
    }

    #[test]
    fn test_fresh_game() {
        let mut play = PlayScene::new(quick());
        play.run_until_idle(100);

        assert_eq!(play.energy(), 10);
        assert_eq!(play.completed_amount(), 0);
        assert_eq!(play.hand_slots().len(), 6);
        assert_eq!(play.draw_pile_count(), 26);
        let mut max: Vec<_> = play.projects().iter().map(|p| p.max_hp).collect();
        max.sort_unstable();
        assert_eq!(max, vec![10, 15, 20, 25]);
        assert!(play.outcome().is_none());
    }

    #[test]
    fn test_input_rejected_while_drawing() {
        let mut play = PlayScene::new(quick());
        assert!(play.is_action_blocked());
        assert_eq!(play.on_hand_slot_clicked(0), Err(GameError::ActionBlocked));
    }

    #[test]
    fn test_one_command_per_frame() {
        let mut play = PlayScene::new(quick());
        play.run_until_idle(100);

        play.on_hand_slot_clicked(0).unwrap();
        assert_eq!(play.on_hand_slot_clicked(1), Err(GameError::InputAlreadyQueued));
        play.tick();
        assert!(play.hand_slots()[0].is_selected);
        assert!(!play.hand_slots()[1].is_selected);
    }

    #[test]
    fn test_cooldown_after_accepted_input() {
        let config = quick().with_input_cooldown(5);
        let mut play = PlayScene::new(config);
        play.run_until_idle(100);

        play.on_hand_slot_clicked(0).unwrap();
        play.tick();
        assert_eq!(
            play.on_hand_slot_clicked(1),
            Err(GameError::InputCooldown { frames_left: 4 })
        );
        for _ in 0..4 {
            play.tick();
        }
        assert!(play.on_hand_slot_clicked(1).is_ok());
    }

    #[test]
    fn test_keys_map_to_commands() {
        assert_eq!(Key::Digit(1).command(), Some(Command::ToggleSlot(0)));
        assert_eq!(Key::Digit(6).command(), Some(Command::ToggleSlot(5)));
        assert_eq!(Key::Digit(7).command(), None);
        assert_eq!(Key::Digit(0).command(), None);
        assert_eq!(Key::Letter('A').command(), Some(Command::Assign));
        assert_eq!(Key::Letter('d').command(), Some(Command::Discard));
        assert_eq!(Key::Letter('x').command(), None);
    }

    #[test]
    fn test_invalid_commands_rejected_up_front() {
        let mut play = PlayScene::new(quick());
        play.run_until_idle(100);

        assert_eq!(
            play.on_discard_button_clicked(),
            Err(GameError::SelectionCount {
                action: "discard",
                need: "at least 2",
                have: 0
            })
        );
        assert_eq!(
            play.on_hand_slot_clicked(8),
            Err(GameError::InvalidSlot { slot: 8, hand_len: 6 })
        );
        assert!(play.on_key(Key::Letter('q')).is_ok());
    }

    #[test]
    fn test_draw_pile_view_is_read_only_snapshot() {
        let mut play = PlayScene::new(quick());
        play.run_until_idle(100);
        let view = play.on_draw_pile_clicked();
        assert_eq!(view.len(), play.draw_pile_count());
        assert!(play.deck().check_invariants().is_ok());
    }

    #[test]
    fn test_new_game_resets() {
        let mut play = PlayScene::new(quick());
        play.run_until_idle(100);
        let first_hand: Vec<_> = play.hand_slots().iter().map(|s| s.card.entity_id).collect();

        play.on_hand_slot_clicked(0).unwrap();
        play.tick();
        play.on_assign_button_clicked().unwrap();
        play.tick();
        play.run_until_idle(100);
        assert_eq!(play.energy(), 9);

        play.new_game();
        play.run_until_idle(100);
        assert_eq!(play.energy(), 10);
        let hand: Vec<_> = play.hand_slots().iter().map(|s| s.card.entity_id).collect();
        assert_eq!(hand, first_hand);
    }

    #[test]
    fn test_art_of_slot() {
        struct Names;
        impl ArtHandle for Names {
            type Handle = String;
            fn card_art(&self, card: CardId) -> String {
                format!("card-{}", card.index())
            }
            fn subject_icon(&self, subject: Subject) -> String {
                format!("icon-{subject}")
            }
        }

        let mut play = PlayScene::new(quick());
        play.run_until_idle(100);
        let card = play.hand_slots()[0].card.card_id;
        let subject = play.registry().get_unchecked(card).subject;

        let (portrait, icon) = play.art_of(0, &Names).unwrap();
        assert_eq!(portrait, format!("card-{}", card.index()));
        assert_eq!(icon, format!("icon-{subject}"));
        assert!(play.art_of(6, &Names).is_none());
    }
}
