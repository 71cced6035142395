//! Turns collector readings into a per-cycle render plan.

pub mod bars;
pub mod mode;

pub use mode::{select_mode, DisplayMode};

use crate::lcd::Font;
use crate::metrics::{MaintenanceOp, Percentage, Readings};
use bars::{fit_line, format_bar};

/// Rows available in the fixed font.
pub const MAX_ROWS: usize = 4;

/// Columns reserved for the row label in front of a gauge or overlay.
const LABEL_COLS: usize = 4;

/// A single fixed-font row on the display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub row: u8,
    pub text: String,
}

/// Everything one cycle draws: either up to four status rows, or a banner
/// that owns the screen (with an optional fixed-font detail row below it).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderPlan {
    Lines(Vec<Line>),
    Banner {
        text: String,
        detail: Option<String>,
    },
}

pub fn build_plan(mode: DisplayMode, readings: &Readings, bar_width: usize) -> RenderPlan {
    match mode {
        DisplayMode::BootInfo => boot_plan(readings),
        DisplayMode::RaidWarning => raid_plan(readings),
        DisplayMode::NormalStatus => status_plan(readings, bar_width),
    }
}

/// Hostname plus one row per tracked interface. During early boot the disk
/// and CPU numbers are meaningless; the device's network identity is what
/// an operator needs to find it.
fn boot_plan(readings: &Readings) -> RenderPlan {
    let cols = Font::Fixed.safe_cols();
    let mut lines = vec![Line {
        row: 0,
        text: fit_line(readings.hostname.as_deref().unwrap_or("N/A"), cols),
    }];
    for (idx, iface) in readings.interfaces.iter().take(MAX_ROWS - 1).enumerate() {
        let addr = iface
            .ipv4
            .map(|ip| ip.to_string())
            .unwrap_or_else(|| "N/A".to_string());
        lines.push(Line {
            row: (idx + 1) as u8,
            text: fit_line(&format!("{}: {}", iface.name, addr), cols),
        });
    }
    RenderPlan::Lines(lines)
}

fn raid_plan(readings: &Readings) -> RenderPlan {
    let detail = readings
        .arrays
        .iter()
        .find(|array| array.degraded)
        .map(|array| fit_line(&format!("{} {}", array.name, array.bitmap), Font::Fixed.safe_cols()));
    RenderPlan::Banner {
        text: fit_line("RAID WARNING", Font::Banner.safe_cols()),
        detail,
    }
}

/// CPU on row 0, memory on row 1, monitored mounts on the remaining rows.
/// A mount with an active maintenance operation shows the operation in
/// place of its usage bar.
fn status_plan(readings: &Readings, bar_width: usize) -> RenderPlan {
    let cols = Font::Fixed.safe_cols();
    let mut lines = Vec::with_capacity(MAX_ROWS);
    lines.push(Line {
        row: 0,
        text: gauge_line("CPU", readings.cpu.as_ref(), bar_width, cols),
    });
    lines.push(Line {
        row: 1,
        text: gauge_line("Mem", readings.memory.as_ref(), bar_width, cols),
    });
    for (idx, disk) in readings.disks.iter().take(MAX_ROWS - 2).enumerate() {
        let text = match &disk.maintenance {
            Some(op) => overlay_line(&disk.mount, op, cols),
            None => gauge_line(&disk.mount, disk.usage.as_ref(), bar_width, cols),
        };
        lines.push(Line {
            row: (idx + 2) as u8,
            text,
        });
    }
    RenderPlan::Lines(lines)
}

fn gauge_line(label: &str, gauge: Option<&Percentage>, bar_width: usize, cols: usize) -> String {
    let label = pad_label(label);
    match gauge {
        Some(gauge) => fit_line(
            &format!(
                "{label}[{}] {:>3}%",
                format_bar(gauge.used, gauge.total, bar_width),
                gauge.percent()
            ),
            cols,
        ),
        None => fit_line(&format!("{label}N/A"), cols),
    }
}

fn overlay_line(label: &str, op: &MaintenanceOp, cols: usize) -> String {
    let label = pad_label(label);
    let text = match op.progress {
        Some(pct) => format!("{label}{} {pct}%", op.kind.display_name()),
        None => format!("{label}{}...", op.kind.display_name()),
    };
    fit_line(&text, cols)
}

fn pad_label(label: &str) -> String {
    let mut short: String = label.chars().take(LABEL_COLS).collect();
    while short.chars().count() < LABEL_COLS {
        short.push(' ');
    }
    short
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{ArrayHealth, DiskStatus, IfaceAddr, MaintenanceKind};
    use std::net::Ipv4Addr;

    fn disk(mount: &str, usage: Option<Percentage>, maintenance: Option<MaintenanceOp>) -> DiskStatus {
        DiskStatus {
            mount: mount.to_string(),
            usage,
            maintenance,
        }
    }

    fn lines_of(plan: RenderPlan) -> Vec<Line> {
        match plan {
            RenderPlan::Lines(lines) => lines,
            RenderPlan::Banner { .. } => panic!("expected a line plan"),
        }
    }

    #[test]
    fn status_rows_carry_bars_and_percentages() {
        let readings = Readings {
            cpu: Some(Percentage { used: 50, total: 100 }),
            memory: Some(Percentage { used: 25, total: 100 }),
            disks: vec![disk("/", Some(Percentage { used: 100, total: 100 }), None)],
            ..Readings::default()
        };
        let lines = lines_of(build_plan(DisplayMode::NormalStatus, &readings, 10));
        assert_eq!(lines[0].text, "CPU [#####.....]  50%");
        assert_eq!(lines[1].text, "Mem [##........]  25%");
        assert_eq!(lines[2].text, "/   [##########] 100%");
        for line in &lines {
            assert!(line.text.chars().count() <= Font::Fixed.safe_cols());
        }
    }

    #[test]
    fn missing_readings_render_as_na() {
        let readings = Readings {
            disks: vec![disk("/", None, None)],
            ..Readings::default()
        };
        let lines = lines_of(build_plan(DisplayMode::NormalStatus, &readings, 10));
        assert_eq!(lines[0].text, "CPU N/A");
        assert_eq!(lines[1].text, "Mem N/A");
        assert_eq!(lines[2].text, "/   N/A");
    }

    #[test]
    fn scrub_progress_replaces_the_bar() {
        let readings = Readings {
            disks: vec![disk(
                "/data",
                Some(Percentage { used: 1, total: 2 }),
                Some(MaintenanceOp {
                    kind: MaintenanceKind::Scrub,
                    progress: Some(42),
                }),
            )],
            ..Readings::default()
        };
        let lines = lines_of(build_plan(DisplayMode::NormalStatus, &readings, 10));
        assert_eq!(lines[2].text, "/datScrubbing 42%");
        assert!(lines[2].text.ends_with("42%"));
    }

    #[test]
    fn scrub_without_progress_uses_ellipsis() {
        let readings = Readings {
            disks: vec![disk(
                "/",
                None,
                Some(MaintenanceOp {
                    kind: MaintenanceKind::Scrub,
                    progress: None,
                }),
            )],
            ..Readings::default()
        };
        let lines = lines_of(build_plan(DisplayMode::NormalStatus, &readings, 10));
        assert!(lines[2].text.ends_with("..."));
    }

    #[test]
    fn defragment_always_uses_ellipsis() {
        let readings = Readings {
            disks: vec![disk(
                "/",
                None,
                Some(MaintenanceOp {
                    kind: MaintenanceKind::Defrag,
                    progress: None,
                }),
            )],
            ..Readings::default()
        };
        let lines = lines_of(build_plan(DisplayMode::NormalStatus, &readings, 10));
        assert_eq!(lines[2].text, "/   Defragmenting...");
    }

    #[test]
    fn extra_mounts_are_dropped_at_four_rows() {
        let readings = Readings {
            disks: vec![
                disk("/", None, None),
                disk("/data", None, None),
                disk("/backup", None, None),
            ],
            ..Readings::default()
        };
        let lines = lines_of(build_plan(DisplayMode::NormalStatus, &readings, 10));
        assert_eq!(lines.len(), MAX_ROWS);
        assert_eq!(lines.last().unwrap().row, 3);
    }

    #[test]
    fn boot_plan_lists_hostname_and_interfaces() {
        let readings = Readings {
            hostname: Some("nas-01".into()),
            interfaces: vec![
                IfaceAddr {
                    name: "eth0".into(),
                    ipv4: Some(Ipv4Addr::new(192, 168, 1, 10)),
                },
                IfaceAddr {
                    name: "eth1".into(),
                    ipv4: None,
                },
            ],
            ..Readings::default()
        };
        let lines = lines_of(build_plan(DisplayMode::BootInfo, &readings, 10));
        assert_eq!(lines[0].text, "nas-01");
        assert_eq!(lines[1].text, "eth0: 192.168.1.10");
        assert_eq!(lines[2].text, "eth1: N/A");
    }

    #[test]
    fn boot_plan_without_hostname_shows_na() {
        let lines = lines_of(build_plan(DisplayMode::BootInfo, &Readings::default(), 10));
        assert_eq!(lines[0].text, "N/A");
    }

    #[test]
    fn raid_plan_names_the_degraded_array() {
        let readings = Readings {
            arrays: vec![
                ArrayHealth {
                    name: "md0".into(),
                    bitmap: "[UU]".into(),
                    degraded: false,
                },
                ArrayHealth {
                    name: "md1".into(),
                    bitmap: "[U_]".into(),
                    degraded: true,
                },
            ],
            ..Readings::default()
        };
        match build_plan(DisplayMode::RaidWarning, &readings, 10) {
            RenderPlan::Banner { text, detail } => {
                assert_eq!(text, "RAID WARNING");
                assert_eq!(detail.as_deref(), Some("md1 [U_]"));
            }
            RenderPlan::Lines(_) => panic!("expected a banner plan"),
        }
    }
}
