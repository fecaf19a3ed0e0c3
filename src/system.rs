//! Process memory sampling using sysinfo.

use std::sync::Mutex;

use once_cell::sync::Lazy;
use sysinfo::{ProcessesToUpdate, System};

static SYSTEM: Lazy<Mutex<System>> = Lazy::new(|| Mutex::new(System::new()));

/// Memory held by this process, in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessMemory {
    /// Resident set size
    pub rss: u64,
    pub virtual_memory: u64,
}

/// Samples this process's memory. Returns `None` if the platform does not
/// expose it.
pub fn process_memory() -> Option<ProcessMemory> {
    let pid = sysinfo::get_current_pid().ok()?;
    let mut sys = SYSTEM.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    sys.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);

    sys.process(pid).map(|process| ProcessMemory {
        rss: process.memory(),
        virtual_memory: process.virtual_memory(),
    })
}
