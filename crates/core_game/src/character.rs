use serde::{Deserialize, Serialize};

pub const START_HEALTH: i32 = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterState {
    #[default]
    Alive,
    Dead,
}

/// A combatant as seen by damage resolution. Flags are owned and toggled by
/// external gameplay systems (defense input, charge meter, power-ups).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub health: i32,
    pub is_defending: bool,
    pub is_charged: bool,
    pub is_invincible: bool,
    pub state: CharacterState,
}

impl Character {
    pub fn new() -> Self {
        Self::with_health(START_HEALTH)
    }

    /// Health is taken as-is; zero and negative values are allowed.
    pub fn with_health(health: i32) -> Self {
        Self {
            health,
            is_defending: false,
            is_charged: false,
            is_invincible: false,
            state: CharacterState::Alive,
        }
    }

    pub fn defending(mut self, is_defending: bool) -> Self {
        self.is_defending = is_defending;
        self
    }

    pub fn charged(mut self, is_charged: bool) -> Self {
        self.is_charged = is_charged;
        self
    }

    pub fn invincible(mut self, is_invincible: bool) -> Self {
        self.is_invincible = is_invincible;
        self
    }

    pub fn is_alive(&self) -> bool {
        self.state == CharacterState::Alive
    }
}

impl Default for Character {
    fn default() -> Self {
        Self::new()
    }
}

/// Match-wide flags that used to live in ambient scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub is_game_running: bool,
    pub is_computers_turn: bool,
}

impl Session {
    pub fn running() -> Self {
        Self {
            is_game_running: true,
            is_computers_turn: false,
        }
    }

    pub fn paused() -> Self {
        Self {
            is_game_running: false,
            is_computers_turn: false,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::running()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_character_starts_alive_at_start_health() {
        let hero = Character::new();
        assert_eq!(START_HEALTH, hero.health);
        assert!(hero.is_alive());
        assert!(!hero.is_defending && !hero.is_charged && !hero.is_invincible);
    }

    #[test]
    fn builders_set_flags() {
        let hero = Character::with_health(-3).defending(true).charged(true);
        assert_eq!(-3, hero.health);
        assert!(hero.is_defending);
        assert!(hero.is_charged);
        assert!(!hero.is_invincible);
    }
}
