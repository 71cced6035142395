use std::path::Path;

use sysinfo::Disks;

use super::Percentage;
use crate::{Error, Result};

/// Used/total space for one mount point. An unknown mount is a collector
/// failure for that mount only.
pub fn usage(disks: &Disks, mount: &str) -> Result<Percentage> {
    let disk = disks
        .list()
        .iter()
        .find(|disk| disk.mount_point() == Path::new(mount))
        .ok_or_else(|| Error::Collector {
            source: "disk",
            cause: format!("mount point {mount} not present"),
        })?;
    let total = disk.total_space();
    Ok(Percentage {
        used: total.saturating_sub(disk.available_space()),
        total,
    })
}
