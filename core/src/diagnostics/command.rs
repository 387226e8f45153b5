//! Diagnostics backed by **external processes**.
//!
//! Each invocation spawns the program named by the [`CommandDialect`] with an
//! explicit argument vector, the host address being the final argument. No
//! shell is involved.

use std::process::{Output, Stdio};

use async_trait::async_trait;
use pingrid_common::dialect::{CommandDialect, CommandSpec, Diagnostic};
use pingrid_common::host::Host;
use tokio::process::Command;
use tracing::debug;

use super::DiagnosticRunner;
use crate::error::ProbeError;

pub struct CommandRunner {
    dialect: CommandDialect,
}

impl CommandRunner {
    pub fn new(dialect: CommandDialect) -> Self {
        Self { dialect }
    }
}

#[async_trait]
impl DiagnosticRunner for CommandRunner {
    async fn run(&self, diagnostic: Diagnostic, host: &Host) -> Result<String, ProbeError> {
        let spec: &CommandSpec = self.dialect.command_for(diagnostic);
        debug!("running {diagnostic}: {spec} {host}");

        let output: Output = Command::new(&spec.program)
            .args(spec.argv(host.address()))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| ProbeError::Spawn {
                program: spec.program.clone(),
                host: host.address().to_string(),
                source,
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr = stderr.trim();
        if !output.status.success() || !stderr.is_empty() {
            debug!(
                "{} for {host} exited with {}: {stderr}",
                spec.program, output.status
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}
