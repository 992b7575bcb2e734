use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use core_game::{on_round_over, AttackOutcome, AttackQueue, FrameLoop, HealthReporter};
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::config::ScenarioConfig;
use crate::report::{AttackFlags, AttackRecord, DuelReport};

pub struct RunOptions {
    pub run_id: String,
    pub scenario_path: Option<PathBuf>,
}

impl RunOptions {
    pub fn new(run_id: impl Into<String>) -> Self {
        Self {
            run_id: run_id.into(),
            scenario_path: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.scenario_path = Some(path.into());
        self
    }
}

/// Plays a scenario one frame per attack, then ends the round.
///
/// Per-attack overrides are applied before the attack is queued. Frames
/// that fall on the computer's turn leave the queue alone, so those attacks
/// resolve on the next frame the player holds, with the flags of that frame.
pub fn run_scenario<R>(
    config: &ScenarioConfig,
    options: &RunOptions,
    reporter: &mut R,
) -> Result<DuelReport>
where
    R: HealthReporter + ?Sized,
{
    config.validate()?;

    let mut character = config.character.build();
    let mut session = config.session.build();
    let frame_loop = FrameLoop::new(config.session.death_rule);
    let starting_health = character.health;
    let mut queue = AttackQueue::new();
    let mut waiting = VecDeque::new();
    let mut records = Vec::with_capacity(config.attacks.len());

    for (index, attack) in config.attacks.iter().enumerate() {
        attack.apply_overrides(&mut character, &mut session);
        queue.push(attack.damage);
        waiting.push_back(index);

        let flags = AttackFlags {
            game_running: session.is_game_running,
            defending: character.is_defending,
            charged: character.is_charged,
            invincible: character.is_invincible,
        };
        let mut health = character.health;
        let frame = frame_loop.tick(&session, &mut character, &mut queue, &mut *reporter);
        if frame.skipped {
            debug!(target: "duel_core.runner", index, pending = queue.len(), "attack deferred");
            continue;
        }

        for (event, outcome) in frame.outcomes {
            let index = waiting
                .pop_front()
                .context("resolved more attacks than were queued")?;
            let health_before = health;
            if let AttackOutcome::Survived { health: after } = outcome {
                health = after;
            }
            records.push(AttackRecord {
                index,
                damage: event.damage,
                flags,
                outcome,
                health_before,
                health_after: health,
            });
        }
    }

    if !waiting.is_empty() {
        warn!(
            target: "duel_core.runner",
            deferred = waiting.len(),
            "round ended on the computer's turn with attacks still queued"
        );
    }

    let round = on_round_over(&character);
    let report = DuelReport::new(
        options.run_id.clone(),
        config.scenario_info(options.scenario_path.as_deref()),
        starting_health,
        round,
        records,
        waiting.len(),
    );
    info!(
        target: "duel_core.runner",
        scenario = %report.scenario.name,
        final_health = report.summary.final_health,
        applied = report.summary.applied,
        "scenario finished"
    );
    Ok(report)
}

pub fn run_scenario_file<R>(path: &Path, run_id: &str, reporter: &mut R) -> Result<DuelReport>
where
    R: HealthReporter + ?Sized,
{
    let config = ScenarioConfig::from_path(path)?;
    let options = RunOptions::new(run_id).with_path(path);
    run_scenario(&config, &options, reporter)
        .with_context(|| format!("scenario {} failed", path.display()))
}

/// Every `*.toml` under `root`, sorted by path.
pub fn discover_scenarios(root: &Path) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    for entry in WalkDir::new(root).into_iter().filter_entry(filter_entry) {
        let entry = entry.with_context(|| format!("failed to walk {}", root.display()))?;
        let path = entry.path();
        if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == "toml") {
            found.push(path.to_path_buf());
        }
    }
    found.sort();
    Ok(found)
}

/// Only names below the walk root are checked, so a root that itself sits
/// inside an ignored folder is still walked.
fn filter_entry(entry: &DirEntry) -> bool {
    entry.depth() == 0 || !entry.file_name().to_str().is_some_and(is_ignored)
}

fn is_ignored(name: &str) -> bool {
    ["target", ".git", "reports"].contains(&name)
}
