use sysinfo::{CpuRefreshKind, System};

use super::Percentage;
use crate::{Error, Result};

/// One-minute load average scaled against the processing-unit count, so a
/// load equal to the unit count reads as 100%.
pub fn cpu_load(sys: &mut System) -> Result<Percentage> {
    sys.refresh_cpu_list(CpuRefreshKind::nothing());
    let units = sys.cpus().len() as u64;
    let load = System::load_average().one;
    if !load.is_finite() || load < 0.0 {
        return Err(Error::Collector {
            source: "cpu",
            cause: format!("implausible load average {load}"),
        });
    }
    Ok(Percentage {
        used: (load * 100.0).round() as u64,
        total: units.saturating_mul(100),
    })
}

pub fn memory(sys: &mut System) -> Result<Percentage> {
    sys.refresh_memory();
    Ok(Percentage {
        used: sys.used_memory(),
        total: sys.total_memory(),
    })
}

pub fn uptime() -> Result<u64> {
    Ok(System::uptime())
}

pub fn hostname() -> Result<String> {
    System::host_name().ok_or(Error::Collector {
        source: "hostname",
        cause: "host name unavailable".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cpu_load_normalizes_against_unit_count() {
        let mut sys = System::new();
        let reading = cpu_load(&mut sys).unwrap();
        // total is units*100; a load equal to the unit count maps to 100%.
        assert_eq!(reading.total % 100, 0);
    }

    #[test]
    fn memory_reports_used_within_total() {
        let mut sys = System::new();
        let reading = memory(&mut sys).unwrap();
        assert!(reading.used <= reading.total);
    }
}
