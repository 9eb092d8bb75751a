//! Completion rewards: the reward laser and the decorative flyer.
//!
//! Completing a project starts two effects at once. The laser arcs from
//! the project slot to the stats panel, and its landing is what credits
//! energy and the completion count. The flyer is the finished project
//! panel tumbling off screen under gravity. It changes no game state, but
//! it stays alive until it falls past the despawn line.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::cards::Subject;
use crate::core::config::{AnimationConfig, GameConfig};
use crate::core::progress::Progress;
use crate::core::rng::GameRng;

/// Energy and score granted when a laser lands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardCredit {
    pub subject: Subject,
    pub energy: i64,
    pub completed: i64,
    pub perfect: bool,
}

impl RewardCredit {
    /// Reward for completing one project.
    #[must_use]
    pub fn for_completion(subject: Subject, perfect: bool, config: &GameConfig) -> Self {
        let bonus = if perfect { config.perfect_bonus } else { 0 };
        Self {
            subject,
            energy: config.completion_energy + bonus,
            completed: 1,
            perfect,
        }
    }
}

/// The arc from a completed project to the stats panel.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Laser {
    pub from: Vec2,
    pub to: Vec2,
    pub progress: Progress,
    /// Credited when `progress` reaches 1.
    pub credit: RewardCredit,
    /// Peak height of the arc.
    pub lift: f32,
}

impl Laser {
    #[must_use]
    pub fn new(from: Vec2, to: Vec2, anim: &AnimationConfig, credit: RewardCredit) -> Self {
        Self {
            from,
            to,
            progress: Progress::new(anim.laser_step),
            credit,
            lift: anim.laser_lift,
        }
    }

    /// Head of the beam: a straight interpolation lifted by a parabola.
    #[must_use]
    pub fn head(&self) -> Vec2 {
        let t = self.progress.visible();
        let lift = 4.0 * t * (1.0 - t) * self.lift;
        self.from.lerp(self.to, t) - Vec2::new(0.0, lift)
    }

    /// Step once. Returns the credit on the landing tick.
    pub fn advance(&mut self) -> Option<RewardCredit> {
        self.progress.advance().then_some(self.credit)
    }
}

/// A completed project panel falling off screen.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Flyer {
    pub subject: Subject,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Rotation in radians.
    pub angle: f32,
    /// Angular velocity in radians per tick; decays every tick.
    pub spin: f32,
}

impl Flyer {
    /// Launch upwards from `origin` with a random sideways drift and spin.
    #[must_use]
    pub fn launch(subject: Subject, origin: Vec2, anim: &AnimationConfig, rng: &mut GameRng) -> Self {
        Self {
            subject,
            position: origin,
            velocity: Vec2::new(rng.gen_range_f32(anim.flyer_drift.clone()), -anim.flyer_launch_speed),
            angle: 0.0,
            spin: rng.gen_range_f32(anim.flyer_spin.clone()),
        }
    }

    /// One physics step. Returns `false` once the flyer has fallen past
    /// `despawn_y` and should be dropped.
    pub fn step(&mut self, anim: &AnimationConfig) -> bool {
        self.velocity.y += anim.flyer_gravity;
        self.position += self.velocity;
        self.angle += self.spin;
        self.spin *= anim.flyer_spin_decay;
        self.position.y <= anim.flyer_despawn_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credit_amounts() {
        let config = GameConfig::default();
        let plain = RewardCredit::for_completion(Subject::Math, false, &config);
        assert_eq!(plain.energy, 3);
        assert_eq!(plain.completed, 1);

        let perfect = RewardCredit::for_completion(Subject::Math, true, &config);
        assert_eq!(perfect.energy, 4);
    }

    #[test]
    fn test_laser_credits_once_on_landing() {
        let config = GameConfig::default();
        let credit = RewardCredit::for_completion(Subject::Science, false, &config);
        let anim = AnimationConfig {
            laser_step: 0.5,
            ..AnimationConfig::default()
        };
        let mut laser = Laser::new(Vec2::ZERO, Vec2::new(100.0, 0.0), &anim, credit);

        assert_eq!(laser.advance(), None);
        assert_eq!(laser.advance(), Some(credit));
        assert_eq!(laser.advance(), None);
        assert_eq!(laser.head(), Vec2::new(100.0, 0.0));
    }

    #[test]
    fn test_laser_arcs_upwards() {
        let config = GameConfig::default();
        let credit = RewardCredit::for_completion(Subject::Science, false, &config);
        let anim = AnimationConfig {
            laser_step: 0.5,
            ..AnimationConfig::default()
        };
        let mut laser = Laser::new(Vec2::ZERO, Vec2::new(100.0, 0.0), &anim, credit);
        laser.advance();
        assert_eq!(laser.head(), Vec2::new(50.0, -anim.laser_lift));
    }

    #[test]
    fn test_flyer_falls_and_despawns() {
        let anim = AnimationConfig::default();
        let mut rng = GameRng::new(1);
        let mut flyer = Flyer::launch(Subject::Math, Vec2::new(100.0, 100.0), &anim, &mut rng);

        let start_spin = flyer.spin.abs();
        assert!(flyer.step(&anim));
        assert!(flyer.position.y < 100.0, "flyer should rise first");

        let mut ticks = 1;
        while flyer.step(&anim) {
            ticks += 1;
            assert!(ticks < 500, "flyer never fell off screen");
        }
        assert!(flyer.position.y > anim.flyer_despawn_y);
        assert!(flyer.spin.abs() <= start_spin);
    }

    #[test]
    fn test_flyer_launch_uses_configured_ranges() {
        let anim = AnimationConfig {
            flyer_drift: 4.0..4.5,
            flyer_spin: 0.1..0.2,
            ..AnimationConfig::default()
        };
        let mut rng = GameRng::new(9);
        for _ in 0..20 {
            let flyer = Flyer::launch(Subject::Engineering, Vec2::ZERO, &anim, &mut rng);
            assert!(anim.flyer_drift.contains(&flyer.velocity.x));
            assert!(anim.flyer_spin.contains(&flyer.spin));
            assert_eq!(flyer.velocity.y, -anim.flyer_launch_speed);
        }
    }
}
