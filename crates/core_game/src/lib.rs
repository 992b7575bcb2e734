//! Character damage rules.
//!
//! Everything here is synchronous and owned by the caller: a [`Session`]
//! and a [`Character`] are passed into each call instead of living in
//! process-wide state.

pub mod character;
pub mod damage;
pub mod frame;
pub mod reporter;
pub mod round;

pub use character::{Character, CharacterState, Session, START_HEALTH};
pub use damage::{assess_attack, resolve_attack, resolve_attack_outcome, AttackOutcome};
pub use frame::{AttackEvent, AttackQueue, FrameLoop, FrameReport};
pub use reporter::{HealthReporter, RecordingReporter, TracingReporter};
pub use round::{on_round_over, DeathRule, RoundResult};
