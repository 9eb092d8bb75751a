//! Top-level game: menu, play, and end screens.

use tracing::info;

use super::controller::{Scene, SceneController};
use super::play::{Key, PlayScene};
use crate::core::config::GameConfig;
use crate::core::error::{GameError, GameResult};
use crate::rules::Outcome;

/// Owns the scene lifecycle and the current play scene.
///
/// The play scene is built when a game starts and kept through the end
/// screen so its final stats can be shown. It is dropped on return to the
/// menu.
#[derive(Clone, Debug)]
pub struct Game {
    config: GameConfig,
    scenes: SceneController,
    play: Option<PlayScene>,
    games_started: u64,
}

impl Game {
    /// Start on the menu.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self {
            scenes: SceneController::new(Scene::Menu, config.animation.scene_transition_step),
            config,
            play: None,
            games_started: 0,
        }
    }

    #[must_use]
    pub fn scene(&self) -> Scene {
        self.scenes.current()
    }

    #[must_use]
    pub fn scenes(&self) -> &SceneController {
        &self.scenes
    }

    #[must_use]
    pub fn play(&self) -> Option<&PlayScene> {
        self.play.as_ref()
    }

    #[must_use]
    pub fn games_started(&self) -> u64 {
        self.games_started
    }

    /// Outcome of the game shown on the end screen.
    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        self.play.as_ref().and_then(PlayScene::outcome)
    }

    /// Leave the menu for a new game.
    pub fn start_game(&mut self) -> GameResult<()> {
        self.require(Scene::Menu)?;
        self.scenes.go_to(Scene::Play)?;
        self.deal();
        Ok(())
    }

    /// Restart. From the play scene the new deal replaces the current one
    /// in place; from anywhere else it transitions into play.
    pub fn new_game(&mut self) -> GameResult<()> {
        if self.scenes.is_transitioning() {
            return Err(GameError::ActionBlocked);
        }
        if self.scenes.current() != Scene::Play {
            self.scenes.go_to(Scene::Play)?;
        }
        self.deal();
        Ok(())
    }

    /// Leave the end screen for the menu.
    pub fn back_to_menu(&mut self) -> GameResult<()> {
        self.require(Scene::End)?;
        self.scenes.go_to(Scene::Menu)
    }

    fn deal(&mut self) {
        let seed = self.config.seed.wrapping_add(self.games_started);
        self.games_started += 1;
        info!(game = self.games_started, seed, "dealing");
        self.play = Some(PlayScene::new(self.config.clone().with_seed(seed)));
    }

    fn require(&self, scene: Scene) -> GameResult<()> {
        if self.scenes.is_transitioning() {
            return Err(GameError::ActionBlocked);
        }
        if self.scenes.current() != scene {
            return Err(GameError::WrongScene {
                scene: self.scenes.current().name(),
            });
        }
        Ok(())
    }

    fn play_input(&mut self) -> GameResult<&mut PlayScene> {
        self.require(Scene::Play)?;
        self.play.as_mut().ok_or(GameError::WrongScene { scene: "play" })
    }

    // === Play input ===

    pub fn on_hand_slot_clicked(&mut self, slot: usize) -> GameResult<()> {
        self.play_input()?.on_hand_slot_clicked(slot)
    }

    pub fn on_assign_button_clicked(&mut self) -> GameResult<()> {
        self.play_input()?.on_assign_button_clicked()
    }

    pub fn on_discard_button_clicked(&mut self) -> GameResult<()> {
        self.play_input()?.on_discard_button_clicked()
    }

    pub fn on_key(&mut self, key: Key) -> GameResult<()> {
        self.play_input()?.on_key(key)
    }

    // === Simulation ===

    /// Advance one frame.
    ///
    /// The play scene ticks whenever it is the current scene, including
    /// while it fades in. Once its outcome settles the end screen follows.
    pub fn tick(&mut self) {
        if let Some(entered) = self.scenes.advance() {
            if entered == Scene::Menu {
                self.play = None;
            }
        }

        if self.scenes.current() != Scene::Play {
            return;
        }
        let Some(play) = self.play.as_mut() else {
            return;
        };
        play.tick();

        if play.outcome().is_some() && !self.scenes.is_transitioning() {
            // Cannot fail: no transition is running.
            let _ = self.scenes.go_to(Scene::End);
        }
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

    fn settle_scene(game: &mut Game) {
        for _ in 0..100 {
            if !game.scenes().is_transitioning() {
                return;
            }
            game.tick();
        }
        panic!("scene transition never finished");
    }

    #[test]
    fn test_menu_to_play() {
        let mut game = Game::new(quick());
        assert_eq!(game.scene(), Scene::Menu);
        assert_eq!(
            game.on_hand_slot_clicked(0),
            Err(GameError::WrongScene { scene: "menu" })
        );

        game.start_game().unwrap();
        assert!(game.play().is_some());
        assert_eq!(game.on_hand_slot_clicked(0), Err(GameError::ActionBlocked));

        settle_scene(&mut game);
        assert_eq!(game.scene(), Scene::Play);
        assert_eq!(game.games_started(), 1);
    }

    #[test]
    fn test_start_only_from_menu() {
        let mut game = Game::new(quick());
        game.start_game().unwrap();
        settle_scene(&mut game);
        assert_eq!(game.start_game(), Err(GameError::WrongScene { scene: "play" }));
        assert_eq!(game.back_to_menu(), Err(GameError::WrongScene { scene: "play" }));
    }

    #[test]
    fn test_new_game_in_play_redeals() {
        let mut game = Game::new(quick());
        game.start_game().unwrap();
        settle_scene(&mut game);

        game.new_game().unwrap();
        assert_eq!(game.games_started(), 2);
        assert_eq!(game.scene(), Scene::Play);
        assert!(!game.scenes().is_transitioning());
        assert_eq!(game.play().unwrap().config().seed, 43);
    }

    #[test]
    fn test_loss_reaches_end_then_menu() {
        let config = quick().with_starting_energy(1);
        let mut game = Game::new(config);
        game.start_game().unwrap();
        settle_scene(&mut game);
        for _ in 0..10 {
            game.tick();
        }

        game.on_hand_slot_clicked(0).unwrap();
        game.tick();
        game.on_hand_slot_clicked(1).unwrap();
        game.tick();
        game.on_discard_button_clicked().unwrap();

        for _ in 0..200 {
            game.tick();
            if game.scene() == Scene::End && !game.scenes().is_transitioning() {
                break;
            }
        }
        assert_eq!(game.scene(), Scene::End);
        assert_eq!(game.outcome(), Some(Outcome::Loss));

        game.back_to_menu().unwrap();
        settle_scene(&mut game);
        assert_eq!(game.scene(), Scene::Menu);
        assert!(game.play().is_none());
    }
}
