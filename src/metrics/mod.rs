//! Collectors for the host metrics shown on the display.
//!
//! Every collector is a read-only query. A collector that cannot reach its
//! data source fails with `Error::Collector`; the failure is absorbed here
//! and the affected reading renders as absent. Absence of a condition (no
//! degraded array, no running maintenance) is a successful reading.

pub mod disk;
pub mod maintenance;
pub mod net;
pub mod raid;
pub mod system;

use std::net::Ipv4Addr;

use sysinfo::{Disks, System};

use crate::app::Logger;
use crate::Result;

/// A used/total gauge reading in consistent units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Percentage {
    pub used: u64,
    pub total: u64,
}

impl Percentage {
    /// Integer percentage, floored. An empty total reads as 0 rather than
    /// raising a division fault.
    pub fn percent(&self) -> u64 {
        if self.total == 0 {
            0
        } else {
            self.used.saturating_mul(100) / self.total
        }
    }
}

/// Long-running filesystem housekeeping detected on a mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaintenanceKind {
    Scrub,
    Balance,
    Defrag,
}

impl MaintenanceKind {
    pub fn display_name(self) -> &'static str {
        match self {
            MaintenanceKind::Scrub => "Scrubbing",
            MaintenanceKind::Balance => "Balancing",
            MaintenanceKind::Defrag => "Defragmenting",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaintenanceOp {
    pub kind: MaintenanceKind,
    /// Progress in percent when the tooling reports one. Defragment never
    /// reports progress.
    pub progress: Option<u8>,
}

/// Health of one RAID array as reported by the kernel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayHealth {
    pub name: String,
    /// Member-status bitmap, e.g. `[UU]` or `[U_]`.
    pub bitmap: String,
    pub degraded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IfaceAddr {
    pub name: String,
    pub ipv4: Option<Ipv4Addr>,
}

/// Usage and maintenance state for one monitored mount point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiskStatus {
    pub mount: String,
    pub usage: Option<Percentage>,
    pub maintenance: Option<MaintenanceOp>,
}

/// Snapshot of everything the collectors produced this cycle. Built fresh
/// per invocation and discarded after the render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Readings {
    pub uptime_secs: Option<u64>,
    pub hostname: Option<String>,
    pub cpu: Option<Percentage>,
    pub memory: Option<Percentage>,
    pub disks: Vec<DiskStatus>,
    pub arrays: Vec<ArrayHealth>,
    pub interfaces: Vec<IfaceAddr>,
}

/// Run every collector. Failures are logged and degrade to absent data;
/// the cycle always produces a renderable snapshot.
pub fn collect(mounts: &[String], interfaces: &[String], logger: &Logger) -> Readings {
    let mut sys = System::new();
    let cpu = absorb(logger, system::cpu_load(&mut sys));
    let memory = absorb(logger, system::memory(&mut sys));
    let uptime_secs = absorb(logger, system::uptime());
    let hostname = absorb(logger, system::hostname());
    let arrays = absorb(logger, raid::arrays()).unwrap_or_default();

    let mounted = Disks::new_with_refreshed_list();
    let disks = mounts
        .iter()
        .map(|mount| DiskStatus {
            mount: mount.clone(),
            usage: absorb(logger, disk::usage(&mounted, mount)),
            maintenance: absorb(logger, maintenance::active_op(mount)).flatten(),
        })
        .collect();

    Readings {
        uptime_secs,
        hostname,
        cpu,
        memory,
        disks,
        arrays,
        interfaces: net::addresses(interfaces),
    }
}

fn absorb<T>(logger: &Logger, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            logger.warn(format!("{err}"));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_floors_and_guards_zero_total() {
        assert_eq!(Percentage { used: 50, total: 200 }.percent(), 25);
        assert_eq!(Percentage { used: 999, total: 1000 }.percent(), 99);
        assert_eq!(Percentage { used: 7, total: 0 }.percent(), 0);
    }

    #[test]
    fn percent_can_exceed_one_hundred() {
        // CPU load above the unit count reads as more than 100%.
        assert_eq!(Percentage { used: 800, total: 400 }.percent(), 200);
    }
}
