use std::time::Duration;

use crate::metrics::Readings;

/// What the display shows this cycle. Exactly one mode wins per cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    BootInfo,
    RaidWarning,
    NormalStatus,
}

struct Rule {
    applies: fn(&Readings, Duration) -> bool,
    mode: DisplayMode,
}

/// Selection rules in priority order; the first match wins and later rules
/// are not consulted. `NormalStatus` is the fallback.
const RULES: &[Rule] = &[
    Rule {
        applies: within_boot_grace,
        mode: DisplayMode::BootInfo,
    },
    Rule {
        applies: any_array_degraded,
        mode: DisplayMode::RaidWarning,
    },
];

pub fn select_mode(readings: &Readings, boot_grace: Duration) -> DisplayMode {
    RULES
        .iter()
        .find(|rule| (rule.applies)(readings, boot_grace))
        .map(|rule| rule.mode)
        .unwrap_or(DisplayMode::NormalStatus)
}

fn within_boot_grace(readings: &Readings, boot_grace: Duration) -> bool {
    // An unknown uptime does not count as booting.
    readings
        .uptime_secs
        .map(|secs| secs < boot_grace.as_secs())
        .unwrap_or(false)
}

fn any_array_degraded(readings: &Readings, _boot_grace: Duration) -> bool {
    readings.arrays.iter().any(|array| array.degraded)
}
