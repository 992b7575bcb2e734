//! Damage resolution for a single incoming attack.
//!
//! Checks run in order and stop at the first that discards the attack.
//! Damage only lands when the character survives it (`damage < health`);
//! an attack that would bring health to zero or below is dropped instead.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::character::{Character, Session};
use crate::reporter::HealthReporter;

/// Which rule decided an attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AttackOutcome {
    GameNotRunning,
    Invincible,
    Blocked,
    Survived { health: i32 },
    /// `damage >= health`; health is left untouched.
    Overwhelmed,
}

impl AttackOutcome {
    pub fn applied(&self) -> bool {
        matches!(self, AttackOutcome::Survived { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            AttackOutcome::GameNotRunning => "game_not_running",
            AttackOutcome::Invincible => "invincible",
            AttackOutcome::Blocked => "blocked",
            AttackOutcome::Survived { .. } => "survived",
            AttackOutcome::Overwhelmed => "overwhelmed",
        }
    }
}

/// Classifies an attack without touching the character.
pub fn assess_attack(session: &Session, character: &Character, damage: i32) -> AttackOutcome {
    if !session.is_game_running {
        return AttackOutcome::GameNotRunning;
    }
    if character.is_invincible {
        return AttackOutcome::Invincible;
    }

    let is_ineffective = character.is_defending && !character.is_charged;
    if is_ineffective {
        return AttackOutcome::Blocked;
    }

    let has_survived = damage < character.health;
    if has_survived {
        AttackOutcome::Survived {
            health: character.health.saturating_sub(damage),
        }
    } else {
        AttackOutcome::Overwhelmed
    }
}

/// Applies an attack and returns the character's health afterwards.
///
/// The reporter is called exactly once when the attack lands and never
/// otherwise.
pub fn resolve_attack<R>(
    session: &Session,
    character: &mut Character,
    damage: i32,
    reporter: &mut R,
) -> i32
where
    R: HealthReporter + ?Sized,
{
    resolve_attack_outcome(session, character, damage, reporter);
    character.health
}

/// Same as [`resolve_attack`] but hands back the deciding outcome.
pub fn resolve_attack_outcome<R>(
    session: &Session,
    character: &mut Character,
    damage: i32,
    reporter: &mut R,
) -> AttackOutcome
where
    R: HealthReporter + ?Sized,
{
    let outcome = assess_attack(session, character, damage);
    if let AttackOutcome::Survived { health } = outcome {
        character.health = health;
        reporter.report_health(health);
    } else {
        debug!(
            target: "core_game.damage",
            damage,
            health = character.health,
            outcome = outcome.label(),
            "attack ignored"
        );
    }
    outcome
}
