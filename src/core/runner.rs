use crate::core::Lab;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

/// Drives one lab: progress logging around the run, plus optional resource
/// monitoring.
pub struct LabRunner<L: Lab> {
    lab: L,
    monitor: SystemMonitor,
}

impl<L: Lab> LabRunner<L> {
    pub fn new(lab: L) -> Self {
        Self::new_with_monitoring(lab, false)
    }

    pub fn new_with_monitoring(lab: L, monitor_enabled: bool) -> Self {
        Self {
            lab,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("🚀 Running lab: {}", self.lab.name());
        self.monitor.log_stats("Start");

        let summary = self.lab.run().await?;

        self.monitor.log_stats("Finish");
        self.monitor.log_final_stats();

        Ok(summary)
    }
}
