//! vnstat subprocess source.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::source::{Query, StatsSource};

// == vnstat CLI ==
/// Runs the vnstat binary directly, without a shell, under a timeout.
#[derive(Debug, Clone)]
pub struct VnstatCli {
    binary: String,
    timeout: Duration,
}

impl VnstatCli {
    /// Creates a source running `binary`, killing any call that outlives `timeout`.
    pub fn new(binary: impl Into<String>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
        }
    }

    /// Creates a source from `VNSTAT_BIN` and `VNSTAT_TIMEOUT_MS`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.vnstat_bin.clone(), config.command_timeout())
    }

    fn command_line(&self, args: &[String]) -> String {
        std::iter::once(self.binary.as_str())
            .chain(args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

// == Fetch ==
#[async_trait]
impl StatsSource for VnstatCli {
    async fn fetch(&self, query: &Query) -> Result<String> {
        let args = query.args();
        let command_line = self.command_line(&args);

        let mut cmd = Command::new(&self.binary);
        cmd.args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        debug!("Running {}", command_line);

        let output = match tokio::time::timeout(self.timeout, cmd.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                warn!("Failed to start {}: {}", command_line, e);
                return Err(AppError::Command(format!(
                    "Command failed: {}\n{}",
                    command_line, e
                )));
            }
            Err(_) => {
                warn!("{} timed out after {:?}", command_line, self.timeout);
                return Err(AppError::Command(format!(
                    "Command timed out after {}ms: {}",
                    self.timeout.as_millis(),
                    command_line
                )));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(
                "{} exited with {}: {}",
                command_line,
                output.status,
                stderr.trim()
            );
            return Err(AppError::Command(format!(
                "Command failed: {}\n{}",
                command_line,
                stderr.trim_end()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
