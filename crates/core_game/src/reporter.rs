use tracing::info;

/// Receives the new health value whenever an attack actually lands.
pub trait HealthReporter {
    fn report_health(&mut self, health: i32);
}

impl<F> HealthReporter for F
where
    F: FnMut(i32),
{
    fn report_health(&mut self, health: i32) {
        self(health)
    }
}

/// Emits each update as a `core_game.health` tracing event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl HealthReporter for TracingReporter {
    fn report_health(&mut self, health: i32) {
        info!(target: "core_game.health", health, "Health: {health}");
    }
}

#[derive(Debug, Default, Clone)]
pub struct RecordingReporter {
    reports: Vec<i32>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> &[i32] {
        &self.reports
    }

    pub fn last(&self) -> Option<i32> {
        self.reports.last().copied()
    }

    pub fn into_reports(self) -> Vec<i32> {
        self.reports
    }
}

impl HealthReporter for RecordingReporter {
    fn report_health(&mut self, health: i32) {
        self.reports.push(health);
    }
}
