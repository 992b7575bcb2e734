use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::character::{Character, Session};
use crate::damage::{resolve_attack_outcome, AttackOutcome};
use crate::reporter::HealthReporter;
use crate::round::DeathRule;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackEvent {
    pub damage: i32,
}

/// Attacks waiting for the next frame that is allowed to process them.
#[derive(Debug, Default, Clone)]
pub struct AttackQueue {
    pending: VecDeque<AttackEvent>,
}

impl AttackQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, damage: i32) {
        self.pending.push_back(AttackEvent { damage });
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl Extend<i32> for AttackQueue {
    fn extend<T: IntoIterator<Item = i32>>(&mut self, iter: T) {
        self.pending
            .extend(iter.into_iter().map(|damage| AttackEvent { damage }));
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub skipped: bool,
    pub outcomes: Vec<(AttackEvent, AttackOutcome)>,
    pub died: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FrameLoop {
    pub death_rule: DeathRule,
}

impl FrameLoop {
    pub fn new(death_rule: DeathRule) -> Self {
        Self { death_rule }
    }

    /// Drains the queue in arrival order unless it is the computer's turn,
    /// in which case nothing is touched.
    pub fn tick<R>(
        &self,
        session: &Session,
        character: &mut Character,
        queue: &mut AttackQueue,
        reporter: &mut R,
    ) -> FrameReport
    where
        R: HealthReporter + ?Sized,
    {
        if session.is_computers_turn {
            trace!(
                target: "core_game.frame",
                pending = queue.len(),
                "computer's turn, frame skipped"
            );
            return FrameReport {
                skipped: true,
                ..Default::default()
            };
        }

        let outcomes = std::mem::take(&mut queue.pending)
            .into_iter()
            .map(|event| {
                let outcome =
                    resolve_attack_outcome(session, &mut *character, event.damage, &mut *reporter);
                (event, outcome)
            })
            .collect();
        let died = self.death_rule.apply(character);

        FrameReport {
            skipped: false,
            outcomes,
            died,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::CharacterState;
    use crate::reporter::RecordingReporter;

    #[test]
    fn computers_turn_leaves_everything_alone() {
        let session = Session {
            is_game_running: true,
            is_computers_turn: true,
        };
        let mut hero = Character::new();
        let mut queue = AttackQueue::new();
        queue.extend([3, 4]);
        let mut reporter = RecordingReporter::new();

        let report = FrameLoop::default().tick(&session, &mut hero, &mut queue, &mut reporter);

        assert!(report.skipped);
        assert_eq!(2, queue.len());
        assert_eq!(10, hero.health);
        assert!(reporter.reports().is_empty());
    }

    #[test]
    fn frame_drains_in_order() {
        let mut hero = Character::new();
        let mut queue = AttackQueue::new();
        queue.extend([3, 9, 4]);
        let mut reporter = RecordingReporter::new();

        let report =
            FrameLoop::default().tick(&Session::running(), &mut hero, &mut queue, &mut reporter);

        assert!(!report.skipped);
        assert!(queue.is_empty());
        assert_eq!(3, report.outcomes.len());
        assert_eq!(AttackOutcome::Overwhelmed, report.outcomes[1].1);
        assert_eq!(&[7, 3], reporter.reports());
        assert_eq!(3, hero.health);
    }

    #[test]
    fn death_rule_runs_after_attacks() {
        let mut hero = Character::with_health(0);
        let mut queue = AttackQueue::new();
        queue.push(1);
        let mut reporter = RecordingReporter::new();

        let report = FrameLoop::new(DeathRule::Depleted).tick(
            &Session::running(),
            &mut hero,
            &mut queue,
            &mut reporter,
        );

        assert!(report.died);
        assert_eq!(CharacterState::Dead, hero.state);
    }
}
