//! Project queue and the damage pipeline.
//!
//! Four projects are live at all times, one per subject, in queue slots
//! 0..3. A slot is just a position: when a project completes, everything
//! below it shifts up and a harder project of the same subject joins at the
//! end.
//!
//! Damage goes through a single `HitTarget` at a time:
//!
//! ```text
//! damage() --> Squish --> Drain --> closed
//!                                     |-- incomplete: nothing else
//!                                     `-- completed: replace project,
//!                                         launch flyer, start laser
//!                                         laser lands --> RewardCredit
//! ```
//!
//! HP changes immediately on `damage()`; the phases only pace what the
//! renderer shows and keep the input gate closed.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::reward::{Flyer, Laser, RewardCredit};
use crate::cards::Subject;
use crate::core::config::{AnimationConfig, GameConfig};
use crate::core::error::{GameError, GameResult, InvariantError};
use crate::core::event::{EventLog, GameEvent};
use crate::core::layout::Layout;
use crate::core::progress::Progress;
use crate::core::rng::GameRng;

/// A live project.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub subject: Subject,
    pub hp: i64,
    pub max_hp: i64,
    /// Slide-in animation after joining the queue.
    pub spawn: Progress,
}

/// Outcome of one `damage()` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitReport {
    pub subject: Subject,
    pub slot: usize,
    pub previous_hp: i64,
    pub hp: i64,
    /// Damage was at least the remaining HP.
    pub is_completed: bool,
    /// Damage was exactly the remaining HP.
    pub is_perfect: bool,
}

/// Animation phase of the open hit.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum HitPhase {
    /// The panel squashes on impact. Visual only.
    Squish(Progress),
    /// The HP bar slides from the previous value to the new one.
    Drain(Progress),
}

/// The project currently being damaged.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HitTarget {
    pub report: HitReport,
    pub phase: HitPhase,
}

impl HitTarget {
    /// HP the renderer should show for the hit project right now.
    #[must_use]
    pub fn displayed_hp(&self) -> f32 {
        let from = self.report.previous_hp as f32;
        let to = self.report.hp as f32;
        match self.phase {
            HitPhase::Squish(_) => from,
            HitPhase::Drain(p) => from + (to - from) * p.visible(),
        }
    }
}

/// Owns the live projects, the open hit, and the reward effects.
#[derive(Clone, Debug)]
pub struct ProjectQueue {
    projects: Vec<Project>,
    next_max_hp: i64,
    hit: Option<HitTarget>,
    laser: Option<Laser>,
    flyer: Option<Flyer>,
    config: GameConfig,
}

impl ProjectQueue {
    /// Empty queue. Call `populate` or `add` to fill it.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        Self {
            projects: Vec::with_capacity(Subject::ALL.len()),
            next_max_hp: config.initial_project_hp,
            hit: None,
            laser: None,
            flyer: None,
            config: config.clone(),
        }
    }

    /// Add one project per subject in random order.
    pub fn populate(&mut self, rng: &mut GameRng, events: &mut EventLog) {
        let mut subjects = Subject::ALL;
        rng.shuffle(&mut subjects);
        for subject in subjects {
            self.add(subject, events);
        }
    }

    fn anim(&self) -> &AnimationConfig {
        &self.config.animation
    }

    fn layout(&self) -> &Layout {
        &self.config.layout
    }

    // === Queries ===

    /// Live projects in slot order.
    #[must_use]
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Slot of the first project with this subject.
    #[must_use]
    pub fn slot_of(&self, subject: Subject) -> Option<usize> {
        self.projects.iter().position(|p| p.subject == subject)
    }

    /// Max HP the next spawned project will get.
    #[must_use]
    pub fn next_max_hp(&self) -> i64 {
        self.next_max_hp
    }

    #[must_use]
    pub fn hit_target(&self) -> Option<&HitTarget> {
        self.hit.as_ref()
    }

    #[must_use]
    pub fn laser(&self) -> Option<&Laser> {
        self.laser.as_ref()
    }

    #[must_use]
    pub fn flyer(&self) -> Option<&Flyer> {
        self.flyer.as_ref()
    }

    #[must_use]
    pub fn is_hit_open(&self) -> bool {
        self.hit.is_some()
    }

    #[must_use]
    pub fn is_laser_playing(&self) -> bool {
        self.laser.is_some()
    }

    /// The most recently added project is still sliding in.
    #[must_use]
    pub fn is_spawning(&self) -> bool {
        self.projects.last().is_some_and(|p| !p.spawn.is_done())
    }

    // === Mutations ===

    /// Append a project at the next free slot. Its max HP is the global
    /// counter, which then grows by the HP step.
    pub fn add(&mut self, subject: Subject, events: &mut EventLog) -> &Project {
        let max_hp = self.next_max_hp;
        self.next_max_hp += self.config.project_hp_step;

        let spawn = Progress::new(self.anim().spawn_step);
        self.projects.push(Project {
            subject,
            hp: max_hp,
            max_hp,
            spawn,
        });

        debug!(%subject, max_hp, slot = self.projects.len() - 1, "project spawned");
        events.push(GameEvent::ProjectSpawned { subject, max_hp });
        &self.projects[self.projects.len() - 1]
    }

    /// Damage the first project of `subject` and open a hit on it.
    ///
    /// Rejected while another hit is open. Panics if no project of that
    /// subject is live; the queue always refills the completed subject, so
    /// that can only happen if the queue was corrupted.
    pub fn damage(&mut self, subject: Subject, amount: i64, events: &mut EventLog) -> GameResult<HitReport> {
        if let Some(open) = &self.hit {
            warn!(
                requested = %subject,
                open = %open.report.subject,
                "damage rejected: a hit is already open"
            );
            return Err(GameError::HitInProgress {
                subject: open.report.subject,
            });
        }

        let slot = self
            .slot_of(subject)
            .unwrap_or_else(|| panic!("no live project for subject {subject}"));
        let project = &mut self.projects[slot];

        let previous_hp = project.hp;
        let report = HitReport {
            subject,
            slot,
            previous_hp,
            hp: (previous_hp - amount).max(0),
            is_completed: amount >= previous_hp,
            is_perfect: amount == previous_hp,
        };
        project.hp = report.hp;

        self.hit = Some(HitTarget {
            report,
            phase: HitPhase::Squish(Progress::new(self.anim().squish_step)),
        });

        debug!(%subject, amount, previous_hp, hp = report.hp, completed = report.is_completed, "project hit");
        events.push(GameEvent::ProjectHit {
            subject,
            amount,
            previous_hp,
            hp: report.hp,
            completed: report.is_completed,
            perfect: report.is_perfect,
        });
        Ok(report)
    }

    /// Step every project animation once.
    ///
    /// Returns the reward credit on the tick a laser lands.
    pub fn advance(&mut self, rng: &mut GameRng, events: &mut EventLog) -> Option<RewardCredit> {
        for project in &mut self.projects {
            project.spawn.advance();
        }

        if let Some(flyer) = &mut self.flyer {
            let anim = &self.config.animation;
            if !flyer.step(anim) {
                self.flyer = None;
            }
        }

        // Advance an already running laser before a new one can start,
        // so a fresh laser begins at zero on its first visible tick.
        let credit = self.laser.as_mut().and_then(Laser::advance);
        if credit.is_some() {
            self.laser = None;
        }

        self.advance_hit(rng, events);
        credit
    }

    fn advance_hit(&mut self, rng: &mut GameRng, events: &mut EventLog) {
        let Some(hit) = &mut self.hit else {
            return;
        };

        match &mut hit.phase {
            HitPhase::Squish(p) => {
                if p.advance() {
                    hit.phase = HitPhase::Drain(Progress::new(self.config.animation.drain_step));
                }
            }
            HitPhase::Drain(p) => {
                if p.advance() {
                    let report = hit.report;
                    self.hit = None;
                    if report.is_completed {
                        self.complete(report, rng, events);
                    }
                }
            }
        }
    }

    /// Replace a completed project and start its reward effects.
    fn complete(&mut self, report: HitReport, rng: &mut GameRng, events: &mut EventLog) {
        let origin = self.layout().project_slot(report.slot);
        let target = self.layout().stats_panel;

        self.projects.remove(report.slot);
        info!(subject = %report.subject, perfect = report.is_perfect, "project completed");
        events.push(GameEvent::ProjectCompleted {
            subject: report.subject,
            perfect: report.is_perfect,
        });
        self.add(report.subject, events);

        let credit = RewardCredit::for_completion(report.subject, report.is_perfect, &self.config);
        self.flyer = Some(Flyer::launch(report.subject, origin, self.anim(), rng));
        self.laser = Some(Laser::new(origin, target, self.anim(), credit));
    }

    /// Check that exactly one project per subject is live.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.projects.len() != Subject::ALL.len() {
            return Err(InvariantError::ProjectCount {
                expected: Subject::ALL.len(),
                found: self.projects.len(),
            });
        }
        for subject in Subject::ALL {
            let count = self.projects.iter().filter(|p| p.subject == subject).count();
            if count != 1 {
                return Err(InvariantError::SubjectCount { subject, count });
            }
        }
        Ok(())
    }
}
