//! Runs the per-host diagnostics.
//!
//! The orchestrator only depends on the [`DiagnosticRunner`] trait. The
//! [`command`] submodule provides the implementation that spawns the
//! platform's `ping`/`traceroute` tools; tests plug in their own.

use async_trait::async_trait;
use pingrid_common::dialect::Diagnostic;
use pingrid_common::host::Host;

use crate::error::ProbeError;

pub mod command;

pub use command::CommandRunner;

/// Captured output of both diagnostics for one host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosticReport {
    pub reachability: String,
    pub path_trace: String,
}

#[async_trait]
pub trait DiagnosticRunner: Send + Sync {
    /// Runs one diagnostic against `host` and returns its trimmed output.
    ///
    /// A tool that exits with a failure status still yields its output.
    /// Errors are reserved for failures to run the tool at all.
    async fn run(&self, diagnostic: Diagnostic, host: &Host) -> Result<String, ProbeError>;

    /// Runs the reachability probe, then the path trace.
    async fn run_all(&self, host: &Host) -> Result<DiagnosticReport, ProbeError> {
        let reachability: String = self.run(Diagnostic::Reachability, host).await?;
        let path_trace: String = self.run(Diagnostic::PathTrace, host).await?;
        Ok(DiagnosticReport {
            reachability,
            path_trace,
        })
    }
}
