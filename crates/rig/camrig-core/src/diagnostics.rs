//! Non-fatal failure reporting.
//!
//! Nothing in the rig aborts on a failed lookup or a missing companion
//! component. Those cases are logged through the `log` facade and buffered
//! here so hosts (and tests) can inspect what degraded to a no-op.

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticsCfg {
    /// Buffer diagnostics for later inspection. Logging happens regardless.
    pub enabled: bool,
    /// Maximum buffered entries; the oldest are dropped first.
    pub capacity: usize,
}

impl Default for DiagnosticsCfg {
    fn default() -> Self {
        DiagnosticsCfg {
            enabled: true,
            capacity: 256,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// A name or tag lookup found nothing.
    LookupFailure,
    /// A required companion (camera, director, owner object) is absent.
    MissingUpstreamComponent,
    /// A track has no usable binding target.
    UnboundTrack,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    /// Component that reported it, e.g. `TransformProxy(cam_proxy)`.
    pub source: String,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.source, self.message)
    }
}

#[derive(Debug, Default)]
pub struct Diagnostics {
    cfg: DiagnosticsCfg,
    entries: VecDeque<Diagnostic>,
}

impl Diagnostics {
    pub fn new(cfg: DiagnosticsCfg) -> Self {
        Self {
            cfg,
            entries: VecDeque::new(),
        }
    }

    pub fn warn(&mut self, kind: DiagnosticKind, source: &str, message: impl Into<String>) {
        self.record(Severity::Warning, kind, source, message.into());
    }

    pub fn error(&mut self, kind: DiagnosticKind, source: &str, message: impl Into<String>) {
        self.record(Severity::Error, kind, source, message.into());
    }

    fn record(&mut self, severity: Severity, kind: DiagnosticKind, source: &str, message: String) {
        let diag = Diagnostic {
            severity,
            kind,
            source: source.to_string(),
            message,
        };
        match severity {
            Severity::Warning => log::warn!("{diag}"),
            Severity::Error => log::error!("{diag}"),
        }
        if !self.cfg.enabled || self.cfg.capacity == 0 {
            return;
        }
        while self.entries.len() >= self.cfg.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(diag);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Take every buffered entry, oldest first.
    pub fn drain(&mut self) -> Vec<Diagnostic> {
        self.entries.drain(..).collect()
    }

    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.entries.iter().filter(|d| d.kind == kind).count()
    }
}
