use std::fs;
use std::path::{Path, PathBuf};

use core_game::{Character, DeathRule, Session, START_HEALTH};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read scenario {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse scenario {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("scenario `{0}` has no attacks")]
    NoAttacks(String),
    #[error("scenario name is empty")]
    EmptyName,
}

#[derive(Debug, Deserialize)]
pub struct ScenarioConfig {
    pub scenario: ScenarioInfoConfig,
    #[serde(default)]
    pub character: CharacterConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub attacks: Vec<AttackConfig>,
    #[serde(default)]
    pub report: Option<ReportConfig>,
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
}

impl ScenarioConfig {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scenario.name.trim().is_empty() {
            return Err(ConfigError::EmptyName);
        }
        if self.attacks.is_empty() {
            return Err(ConfigError::NoAttacks(self.scenario.name.clone()));
        }
        Ok(())
    }

    pub fn scenario_info(&self, path: Option<&Path>) -> crate::report::ScenarioInfo {
        crate::report::ScenarioInfo {
            name: self.scenario.name.clone(),
            description: self.scenario.description.clone(),
            path: path.map(Path::to_path_buf),
            death_rule: self.session.death_rule,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ScenarioInfoConfig {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct CharacterConfig {
    #[serde(default)]
    pub health: Option<i32>,
    #[serde(default)]
    pub defending: Option<bool>,
    #[serde(default)]
    pub charged: Option<bool>,
    #[serde(default)]
    pub invincible: Option<bool>,
}

impl CharacterConfig {
    pub fn build(&self) -> Character {
        Character::with_health(self.health.unwrap_or(START_HEALTH))
            .defending(self.defending.unwrap_or(false))
            .charged(self.charged.unwrap_or(false))
            .invincible(self.invincible.unwrap_or(false))
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct SessionConfig {
    #[serde(default)]
    pub game_running: Option<bool>,
    #[serde(default)]
    pub computers_turn: Option<bool>,
    #[serde(default)]
    pub death_rule: DeathRule,
}

impl SessionConfig {
    pub fn build(&self) -> Session {
        Session {
            is_game_running: self.game_running.unwrap_or(true),
            is_computers_turn: self.computers_turn.unwrap_or(false),
        }
    }
}

/// One incoming attack. Flag fields, when present, are applied to the
/// character or session right before the attack resolves.
#[derive(Debug, Deserialize, Clone)]
pub struct AttackConfig {
    pub damage: i32,
    #[serde(default)]
    pub defending: Option<bool>,
    #[serde(default)]
    pub charged: Option<bool>,
    #[serde(default)]
    pub invincible: Option<bool>,
    #[serde(default)]
    pub game_running: Option<bool>,
    #[serde(default)]
    pub computers_turn: Option<bool>,
}

impl AttackConfig {
    pub fn apply_overrides(&self, character: &mut Character, session: &mut Session) {
        if let Some(defending) = self.defending {
            character.is_defending = defending;
        }
        if let Some(charged) = self.charged {
            character.is_charged = charged;
        }
        if let Some(invincible) = self.invincible {
            character.is_invincible = invincible;
        }
        if let Some(running) = self.game_running {
            session.is_game_running = running;
        }
        if let Some(computers_turn) = self.computers_turn {
            session.is_computers_turn = computers_turn;
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReportConfig {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct TelemetryConfig {
    #[serde(default)]
    pub enable_trace: Option<bool>,
    #[serde(default)]
    pub trace_filter: Option<String>,
}

impl TelemetryConfig {
    pub fn trace_enabled(&self) -> bool {
        self.enable_trace.unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHARGED_GUARD: &str = r#"
        [scenario]
        name = "charge breaks guard"

        [character]
        defending = true
        charged = true

        [session]
        death_rule = "depleted"

        [[attacks]]
        damage = 5

        [[attacks]]
        damage = 2
        charged = false

        [telemetry]
        trace_filter = "core_game=debug"
    "#;

    #[test]
    fn parses_full_scenario() {
        let cfg: ScenarioConfig = toml::from_str(CHARGED_GUARD).unwrap();
        cfg.validate().unwrap();

        let hero = cfg.character.build();
        assert_eq!(START_HEALTH, hero.health);
        assert!(hero.is_defending && hero.is_charged && !hero.is_invincible);
        assert_eq!(DeathRule::Depleted, cfg.session.death_rule);
        assert_eq!(Session::running(), cfg.session.build());
        assert_eq!(2, cfg.attacks.len());
        assert_eq!(Some(false), cfg.attacks[1].charged);
        let telemetry = cfg.telemetry.unwrap();
        assert!(telemetry.trace_enabled());
        assert_eq!(Some("core_game=debug"), telemetry.trace_filter.as_deref());
    }

    #[test]
    fn defaults_fill_missing_sections() {
        let cfg: ScenarioConfig = toml::from_str(
            r#"
            [scenario]
            name = "bare"
            [[attacks]]
            damage = 1
            "#,
        )
        .unwrap();
        assert_eq!(Character::new(), cfg.character.build());
        assert_eq!(DeathRule::Never, cfg.session.death_rule);
        assert!(cfg.report.is_none());
    }

    #[test]
    fn rejects_scenarios_without_attacks() {
        let cfg: ScenarioConfig = toml::from_str("[scenario]\nname = \"idle\"\n").unwrap();
        assert!(matches!(cfg.validate(), Err(ConfigError::NoAttacks(name)) if name == "idle"));
    }

    #[test]
    fn rejects_blank_names() {
        let cfg: ScenarioConfig =
            toml::from_str("[scenario]\nname = \"  \"\n[[attacks]]\ndamage = 1\n").unwrap();
        assert!(matches!(cfg.validate(), Err(ConfigError::EmptyName)));
    }

    #[test]
    fn overrides_touch_only_named_flags() {
        let attack = AttackConfig {
            damage: 3,
            defending: Some(true),
            charged: None,
            invincible: None,
            game_running: Some(false),
            computers_turn: None,
        };
        let mut hero = Character::new().charged(true);
        let mut session = Session::running();
        attack.apply_overrides(&mut hero, &mut session);
        assert!(hero.is_defending && hero.is_charged);
        assert!(!session.is_game_running);
        assert!(!session.is_computers_turn);
    }
}
