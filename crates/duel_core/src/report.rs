use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use core_game::{AttackOutcome, DeathRule, RoundResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuelReport {
    pub id: String,
    pub timestamp: String,
    pub scenario: ScenarioInfo,
    pub summary: DuelSummary,
    pub attacks: Vec<AttackRecord>,
}

impl DuelReport {
    pub fn new(
        id: impl Into<String>,
        scenario: ScenarioInfo,
        starting_health: i32,
        round: RoundResult,
        attacks: Vec<AttackRecord>,
        deferred: usize,
    ) -> Self {
        let mut summary = summarize_attacks(starting_health, round, &attacks);
        summary.deferred = deferred;
        Self {
            id: id.into(),
            timestamp: Utc::now().to_rfc3339(),
            scenario,
            summary,
            attacks,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read report {}", path.display()))?;
        let report = serde_json::from_str(&data)
            .with_context(|| format!("failed to parse report {}", path.display()))?;
        Ok(report)
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }
}

fn summarize_attacks(
    starting_health: i32,
    round: RoundResult,
    attacks: &[AttackRecord],
) -> DuelSummary {
    let applied = attacks.iter().filter(|a| a.outcome.applied()).count();
    let final_health = attacks
        .last()
        .map(|a| a.health_after)
        .unwrap_or(starting_health);
    let status = match round {
        RoundResult::Survived { .. } => DuelStatus::Survived,
        RoundResult::Defeated => DuelStatus::Defeated,
    };
    DuelSummary {
        status,
        starting_health,
        final_health,
        applied,
        ignored: attacks.len() - applied,
        deferred: 0,
        round,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioInfo {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub path: Option<std::path::PathBuf>,
    #[serde(default)]
    pub death_rule: DeathRule,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuelSummary {
    pub status: DuelStatus,
    pub starting_health: i32,
    pub final_health: i32,
    pub applied: usize,
    pub ignored: usize,
    /// Attacks still queued because the round ended on the computer's turn.
    #[serde(default)]
    pub deferred: usize,
    pub round: RoundResult,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DuelStatus {
    Survived,
    Defeated,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttackRecord {
    pub index: usize,
    pub damage: i32,
    pub flags: AttackFlags,
    pub outcome: AttackOutcome,
    pub health_before: i32,
    pub health_after: i32,
}

/// Character and session flags as they stood when an attack resolved.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttackFlags {
    pub game_running: bool,
    pub defending: bool,
    pub charged: bool,
    pub invincible: bool,
}
