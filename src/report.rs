//! Provisioning progress events and sinks.
//!
//! The original tool pushed state into GUI labels through an observer
//! registration. The core instead reports per-target outcomes through an
//! explicit sink trait, keeping it decoupled from any presentation layer.

use std::io;

use serde::{Deserialize, Serialize};

/// A provisioning target whose outcome is reported separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetupTarget {
    /// Deriving the group name list.
    Groups,
    /// Creating one repository per group.
    Repositories,
    /// Creating one build job per group.
    BuildJobs,
}

/// A structured progress event emitted during a provisioning run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SetupEvent {
    /// Work on a target has started.
    Started {
        /// The target being provisioned.
        target: SetupTarget,
    },
    /// Every unit of a target was provisioned successfully.
    Succeeded {
        /// The provisioned target.
        target: SetupTarget,
    },
    /// At least one unit of a target failed.
    Failed {
        /// The affected target.
        target: SetupTarget,
        /// Summary of what went wrong.
        message: String,
    },
}

/// A sink that receives provisioning progress events.
pub trait ProgressSink: Send + Sync {
    /// Records a progress event.
    fn record(&self, event: SetupEvent);
}

/// Progress sink that drops all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgressSink;

impl ProgressSink for NoopProgressSink {
    fn record(&self, _event: SetupEvent) {}
}

/// Records progress events to stderr as JSON lines (JSONL).
///
/// Keeps the human-readable summary on stdout free of event noise.
#[derive(Debug, Default)]
pub struct StderrJsonlProgressSink;

impl ProgressSink for StderrJsonlProgressSink {
    fn record(&self, event: SetupEvent) {
        let Ok(serialised) = serde_json::to_string(&event) else {
            return;
        };

        let _ignored = writeln_stderr(&serialised);
    }
}

fn writeln_stderr(message: &str) -> io::Result<()> {
    use io::Write;

    let mut stderr = io::stderr().lock();
    writeln!(stderr, "{message}")
}
