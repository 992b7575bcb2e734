use serde::{Deserialize, Serialize};
use tracing::info;

use crate::character::{Character, CharacterState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum RoundResult {
    Survived { health: i32 },
    Defeated,
}

pub fn on_round_over(character: &Character) -> RoundResult {
    match character.state {
        CharacterState::Alive => {
            info!(
                target: "core_game.round",
                health = character.health,
                "round over, character alive"
            );
            RoundResult::Survived {
                health: character.health,
            }
        }
        CharacterState::Dead => {
            info!(target: "core_game.round", "round over, character dead");
            RoundResult::Defeated
        }
    }
}

/// Owns the `Alive -> Dead` transition. Damage resolution never calls this;
/// the frame loop applies whichever rule the session was configured with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeathRule {
    #[default]
    Never,
    /// Dead once health is zero or below.
    Depleted,
}

impl DeathRule {
    /// Returns true when this call moved the character to `Dead`.
    pub fn apply(self, character: &mut Character) -> bool {
        match self {
            DeathRule::Never => false,
            DeathRule::Depleted => {
                if character.is_alive() && character.health <= 0 {
                    character.state = CharacterState::Dead;
                    info!(target: "core_game.round", health = character.health, "character died");
                    true
                } else {
                    false
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_over_reports_state() {
        let mut hero = Character::with_health(4);
        assert_eq!(RoundResult::Survived { health: 4 }, on_round_over(&hero));
        hero.state = CharacterState::Dead;
        assert_eq!(RoundResult::Defeated, on_round_over(&hero));
    }

    #[test]
    fn never_rule_keeps_state() {
        let mut hero = Character::with_health(-5);
        assert!(!DeathRule::Never.apply(&mut hero));
        assert!(hero.is_alive());
    }

    #[test]
    fn depleted_rule_kills_at_zero_once() {
        let mut hero = Character::with_health(0);
        assert!(DeathRule::Depleted.apply(&mut hero));
        assert_eq!(CharacterState::Dead, hero.state);
        assert!(!DeathRule::Depleted.apply(&mut hero));
    }

    #[test]
    fn depleted_rule_spares_positive_health_and_never_revives() {
        let mut hero = Character::with_health(1);
        assert!(!DeathRule::Depleted.apply(&mut hero));
        assert!(hero.is_alive());

        hero.state = CharacterState::Dead;
        hero.health = 8;
        assert!(!DeathRule::Depleted.apply(&mut hero));
        assert_eq!(CharacterState::Dead, hero.state);
    }
}
