use std::io;

use sysinfo::System;
use tracing::debug;

use crate::error::{Error, Result};

/// Read access to the launch arguments of running processes.
pub trait ProcessTable {
    /// Full command line of the process called `process_name`, or `None` when
    /// no such process is running.
    fn command_line(&self, process_name: &str) -> Result<Option<String>>;
}

/// Name and arguments of one running process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessEntry {
    /// Process id, used to order entries sharing a name.
    pub pid: u32,
    /// Executable name as reported by the OS.
    pub name: String,
    /// Arguments, starting with the program path.
    pub cmd: Vec<String>,
}

/// Process table of the host operating system, read through `sysinfo`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProcessTable;

impl SystemProcessTable {
    fn snapshot(&self) -> Result<Vec<ProcessEntry>> {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            return Err(Error::ProcessQuery(io::Error::new(
                io::ErrorKind::Unsupported,
                "process listing is not supported on this platform",
            )));
        }

        let mut system = System::new_all();
        system.refresh_all();

        let entries: Vec<ProcessEntry> = system
            .processes()
            .values()
            .map(|process| ProcessEntry {
                pid: process.pid().as_u32(),
                name: process.name().to_string_lossy().into_owned(),
                cmd: process
                    .cmd()
                    .iter()
                    .map(|arg| arg.to_string_lossy().into_owned())
                    .collect(),
            })
            .collect();
        debug!("read {} entries from the process table", entries.len());
        Ok(entries)
    }
}

impl ProcessTable for SystemProcessTable {
    fn command_line(&self, process_name: &str) -> Result<Option<String>> {
        let entries = self.snapshot()?;
        Ok(select_command_line(&entries, process_name))
    }
}

/// Command line of the process whose name is exactly `process_name`.
/// Several matches resolve to the lowest pid.
pub fn select_command_line(entries: &[ProcessEntry], process_name: &str) -> Option<String> {
    entries
        .iter()
        .filter(|entry| entry.name == process_name)
        .min_by_key(|entry| entry.pid)
        .map(|entry| entry.cmd.join(" "))
}
