use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use crate::persist::write_atomic;
use crate::video::Tool;

#[derive(Debug, Default, Serialize, Clone)]
pub struct MetricsSnapshot {
    pub steps: BTreeMap<String, StepMetrics>,
    pub tools: BTreeMap<String, ToolMetrics>,
    pub total_duration_ms: f64,
    pub tool_invocations: u64,
    /// Step that aborted the run, if any.
    pub failed_step: Option<String>,
}

#[derive(Debug, Default, Serialize, Clone)]
pub struct StepMetrics {
    pub calls: u64,
    pub total_duration_ms: f64,
    pub max_duration_ms: f64,
}

/// Per-binary tallies of ffmpeg/ffprobe calls.
#[derive(Debug, Default, Serialize, Clone)]
pub struct ToolMetrics {
    pub invocations: u64,
    pub failures: u64,
    pub total_duration_ms: f64,
}

/// Shared step-duration recorder. Clones feed the same snapshot.
#[derive(Debug, Default, Clone)]
pub struct MetricsCollector {
    inner: Arc<Mutex<MetricsSnapshot>>,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_step(&self, step_name: &str) -> StepTimer {
        StepTimer {
            step: step_name.to_string(),
            started_at: Instant::now(),
            collector: self.inner.clone(),
            recorded: false,
        }
    }

    pub fn record_total_duration(&self, duration: Duration) {
        if let Ok(mut guard) = self.inner.lock() {
            guard.total_duration_ms = duration.as_secs_f64() * 1_000.0;
        }
    }

    /// Tallies one finished tool call under the binary's name.
    pub fn record_tool_run(&self, tool: Tool, duration: Duration, succeeded: bool) {
        if let Ok(mut guard) = self.inner.lock() {
            guard.tool_invocations += 1;
            let metrics = guard.tools.entry(tool.to_string()).or_default();
            metrics.invocations += 1;
            metrics.total_duration_ms += duration.as_secs_f64() * 1_000.0;
            if !succeeded {
                metrics.failures += 1;
            }
        }
    }

    pub fn record_failed_step(&self, step_name: &str) {
        if let Ok(mut guard) = self.inner.lock() {
            guard.failed_step = Some(step_name.to_string());
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        self.inner.lock().map(|g| g.clone()).unwrap_or_default()
    }
}

/// Records the elapsed time of one step when dropped.
pub struct StepTimer {
    step: String,
    started_at: Instant,
    collector: Arc<Mutex<MetricsSnapshot>>,
    recorded: bool,
}

impl StepTimer {
    fn record(&mut self) {
        if self.recorded {
            return;
        }
        let duration_ms = self.started_at.elapsed().as_secs_f64() * 1_000.0;
        if let Ok(mut guard) = self.collector.lock() {
            let metrics = guard.steps.entry(self.step.clone()).or_default();
            metrics.calls += 1;
            metrics.total_duration_ms += duration_ms;
            if duration_ms > metrics.max_duration_ms {
                metrics.max_duration_ms = duration_ms;
            }
        }
        debug!(
            step = self.step.as_str(),
            duration_ms, "Step duration recorded"
        );
        self.recorded = true;
    }
}

impl Drop for StepTimer {
    fn drop(&mut self) {
        self.record();
    }
}

pub fn log_snapshot(snapshot: &MetricsSnapshot) {
    info!(
        total_duration_ms = snapshot.total_duration_ms,
        step_count = snapshot.steps.len(),
        tool_invocations = snapshot.tool_invocations,
        failed_step = snapshot.failed_step.as_deref().unwrap_or("none"),
        "Workflow metrics summary"
    );
    for (tool, metrics) in &snapshot.tools {
        info!(
            tool = tool.as_str(),
            invocations = metrics.invocations,
            failures = metrics.failures,
            total_ms = metrics.total_duration_ms,
            "Tool metrics"
        );
    }
    for (step, metrics) in &snapshot.steps {
        info!(
            step = step.as_str(),
            calls = metrics.calls,
            total_ms = metrics.total_duration_ms,
            max_ms = metrics.max_duration_ms,
            "Step metrics"
        );
    }
}

pub fn write_snapshot(snapshot: &MetricsSnapshot, path: &Path) -> Result<()> {
    let json = serde_json::to_vec_pretty(snapshot).context("Failed to serialize metrics")?;
    write_atomic(path, &json)
        .with_context(|| format!("Failed to write metrics JSON: {}", path.display()))?;
    info!(metrics = %path.display(), "Metrics JSON written");
    Ok(())
}
