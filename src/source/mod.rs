//! Stats Source
//!
//! The seam between the service layer and the external accounting tool.

mod vnstat;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Interface, ReportDate};
use crate::stats::Period;

pub use vnstat::VnstatCli;

// == Query ==
/// One report the accounting tool can produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Names of every interface the tool tracks
    InterfaceList,
    /// One-line summary, used to check an interface actually has data
    Probe(Interface),
    /// Report of one period for an interface
    Period { interface: Interface, period: Period },
    /// Daily report restricted to a date range
    Range {
        interface: Interface,
        start: ReportDate,
        end: ReportDate,
    },
}

impl Query {
    /// Command-line arguments selecting this report.
    pub fn args(&self) -> Vec<String> {
        match self {
            Query::InterfaceList => vec!["--iflist".to_string()],
            Query::Probe(interface) => vec![
                "-i".to_string(),
                interface.to_string(),
                "--oneline".to_string(),
            ],
            Query::Period { interface, period } => vec![
                period.vnstat_flag().to_string(),
                "-i".to_string(),
                interface.to_string(),
            ],
            Query::Range {
                interface,
                start,
                end,
            } => vec![
                "-i".to_string(),
                interface.to_string(),
                "--begin".to_string(),
                start.to_string(),
                "--end".to_string(),
                end.to_string(),
                "-d".to_string(),
            ],
        }
    }
}

// == Stats Source ==
/// Produces raw report text for a query.
#[async_trait]
pub trait StatsSource: Send + Sync {
    /// Runs the query and returns its stdout.
    ///
    /// Failures surface as [`AppError::Command`](crate::error::AppError::Command).
    async fn fetch(&self, query: &Query) -> Result<String>;
}


#[cfg(test)]
pub(crate) mod testing {
    //! Scripted source for exercising the service and HTTP layers.

    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::{Query, StatsSource};
    use crate::error::{AppError, Result};

    /// Answers queries from a table keyed by argument vector.
    #[derive(Default)]
    pub struct ScriptedSource {
        replies: HashMap<Vec<String>, std::result::Result<String, String>>,
        calls: AtomicUsize,
        seen: Mutex<Vec<Vec<String>>>,
    }

    impl ScriptedSource {
        pub fn new() -> Self {
            Self::default()
        }

        /// Answers `args` with `stdout`.
        pub fn reply(mut self, args: &[&str], stdout: &str) -> Self {
            self.replies.insert(
                args.iter().map(|a| a.to_string()).collect(),
                Ok(stdout.to_string()),
            );
            self
        }

        /// Fails `args` with a command error carrying `message`.
        pub fn fail(mut self, args: &[&str], message: &str) -> Self {
            self.replies.insert(
                args.iter().map(|a| a.to_string()).collect(),
                Err(message.to_string()),
            );
            self
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub fn seen(&self) -> Vec<Vec<String>> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl StatsSource for ScriptedSource {
        async fn fetch(&self, query: &Query) -> Result<String> {
            let args = query.args();
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(args.clone());

            match self.replies.get(&args) {
                Some(Ok(stdout)) => Ok(stdout.clone()),
                Some(Err(message)) => Err(AppError::Command(message.clone())),
                None => Err(AppError::Command(format!(
                    "Command failed: vnstat {}",
                    args.join(" ")
                ))),
            }
        }
    }
}
