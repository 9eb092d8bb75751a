//! Scene lifecycle and transitions.
//!
//! A transition runs over two progress units: `0..1` fades the current
//! scene out, the switch happens at 1, and `1..2` fades the new scene in.
//! Input stays blocked until the whole transition has played.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::core::error::{GameError, GameResult};
use crate::core::progress::Progress;

/// Top-level screens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scene {
    Menu,
    Play,
    End,
}

impl Scene {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Scene::Menu => "menu",
            Scene::Play => "play",
            Scene::End => "end",
        }
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fade phase of a running transition.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Transition {
    /// Fading out towards `target`.
    Closing { target: Scene, progress: Progress },
    /// `target` is current and fading in.
    Opening { progress: Progress },
}

/// Tracks the current scene and any transition in flight.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneController {
    current: Scene,
    transition: Option<Transition>,
    step: f32,
}

impl SceneController {
    /// Start on `scene` with no transition.
    #[must_use]
    pub fn new(scene: Scene, step: f32) -> Self {
        Self {
            current: scene,
            transition: None,
            step,
        }
    }

    #[must_use]
    pub fn current(&self) -> Scene {
        self.current
    }

    #[must_use]
    pub fn transition(&self) -> Option<&Transition> {
        self.transition.as_ref()
    }

    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    /// Transition progress on the `0..2` scale, `None` when idle.
    #[must_use]
    pub fn transition_progress(&self) -> Option<f32> {
        self.transition.map(|t| match t {
            Transition::Closing { progress, .. } => progress.visible(),
            Transition::Opening { progress } => 1.0 + progress.visible(),
        })
    }

    /// Begin a transition to `target`. Rejected while one is running.
    pub fn go_to(&mut self, target: Scene) -> GameResult<()> {
        if self.transition.is_some() {
            return Err(GameError::ActionBlocked);
        }
        debug!(from = %self.current, to = %target, "scene transition started");
        self.transition = Some(Transition::Closing {
            target,
            progress: Progress::new(self.step),
        });
        Ok(())
    }

    /// Step the transition once. Returns the scene entered on this tick.
    pub fn advance(&mut self) -> Option<Scene> {
        let step = self.step;
        match self.transition.as_mut()? {
            Transition::Closing { target, progress } => {
                if !progress.advance() {
                    return None;
                }
                let target = *target;
                self.current = target;
                self.transition = Some(Transition::Opening {
                    progress: Progress::new(step),
                });
                debug!(scene = %target, "scene entered");
                Some(target)
            }
            Transition::Opening { progress } => {
                if progress.advance() {
                    self.transition = None;
                }
                None
            }
        }
    }
}
