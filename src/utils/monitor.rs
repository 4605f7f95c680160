use std::sync::Mutex;
use std::time::{Duration, Instant};
use sysinfo::{Pid, RefreshKind, System};

#[derive(Debug, Clone, Copy)]
pub struct ResourceSnapshot {
    pub cpu_percent: f32,
    pub memory_mb: u64,
    pub peak_memory_mb: u64,
    pub elapsed: Duration,
}

/// Per-run resource tracking behind `--monitor`. Disabled monitors are
/// inert: no refreshes, no log lines.
pub struct SystemMonitor {
    inner: Option<Mutex<MonitorState>>,
    started: Instant,
}

struct MonitorState {
    system: System,
    pid: Pid,
    peak_memory_mb: u64,
}

impl SystemMonitor {
    pub fn new(enabled: bool) -> Self {
        let inner = if enabled {
            let mut system = System::new_with_specifics(RefreshKind::everything());
            system.refresh_all();
            sysinfo::get_current_pid().ok().map(|pid| {
                Mutex::new(MonitorState {
                    system,
                    pid,
                    peak_memory_mb: 0,
                })
            })
        } else {
            None
        };

        Self {
            inner,
            started: Instant::now(),
        }
    }

    pub fn snapshot(&self) -> Option<ResourceSnapshot> {
        let mut state = self.inner.as_ref()?.lock().ok()?;
        state.system.refresh_all();

        let pid = state.pid;
        let process = state.system.process(pid)?;
        let memory_mb = process.memory() / 1024 / 1024;
        let cpu_percent = process.cpu_usage();
        state.peak_memory_mb = state.peak_memory_mb.max(memory_mb);

        Some(ResourceSnapshot {
            cpu_percent,
            memory_mb,
            peak_memory_mb: state.peak_memory_mb,
            elapsed: self.started.elapsed(),
        })
    }

    pub fn log_stats(&self, phase: &str) {
        if let Some(snap) = self.snapshot() {
            tracing::info!(
                "📊 {} - CPU: {:.1}%, Memory: {}MB, Peak: {}MB, Time: {:?}",
                phase,
                snap.cpu_percent,
                snap.memory_mb,
                snap.peak_memory_mb,
                snap.elapsed
            );
        }
    }

    pub fn log_final_stats(&self) {
        if let Some(snap) = self.snapshot() {
            tracing::info!(
                "📊 Final Stats - Total Time: {:?}, Peak Memory: {}MB",
                snap.elapsed,
                snap.peak_memory_mb
            );
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.is_some()
    }
}

impl Default for SystemMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}
