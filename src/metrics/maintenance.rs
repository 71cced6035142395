use std::io::ErrorKind;
use std::process::Command;

use super::{MaintenanceKind, MaintenanceOp};
use crate::{Error, Result};

/// Probe scrub, then balance, then defragment on one mount. The first
/// active operation wins. A missing btrfs toolchain reads as "no
/// operation", not as a failure.
pub fn active_op(mount: &str) -> Result<Option<MaintenanceOp>> {
    if let Some(text) = run_tool("btrfs", &["scrub", "status", mount])? {
        if let Some(op) = parse_status(&text, MaintenanceKind::Scrub) {
            return Ok(Some(op));
        }
    }
    if let Some(text) = run_tool("btrfs", &["balance", "status", mount])? {
        if let Some(op) = parse_status(&text, MaintenanceKind::Balance) {
            return Ok(Some(op));
        }
    }
    if let Some(listing) = run_tool("pgrep", &["-af", "btrfs filesystem defrag"])? {
        if defrag_matches(mount, &listing) {
            return Ok(Some(MaintenanceOp {
                kind: MaintenanceKind::Defrag,
                progress: None,
            }));
        }
    }
    Ok(None)
}

/// Capture a tool's stdout. `balance status` exits non-zero while a balance
/// runs, so the exit code carries no failure signal here.
fn run_tool(program: &str, args: &[&str]) -> Result<Option<String>> {
    match Command::new(program).args(args).output() {
        Ok(out) => Ok(Some(String::from_utf8_lossy(&out.stdout).into_owned())),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(Error::Collector {
            source: "maintenance",
            cause: format!("{program}: {err}"),
        }),
    }
}

/// The status formats differ across btrfs-progs versions; "running" is the
/// one stable marker, and the percent token is scraped best-effort.
fn parse_status(text: &str, kind: MaintenanceKind) -> Option<MaintenanceOp> {
    if !text.contains("running") {
        return None;
    }
    let progress = extract_percent(text).map(|(pct, remaining)| if remaining { 100 - pct } else { pct });
    Some(MaintenanceOp { kind, progress })
}

/// First `NN%` / `NN.N%` token, floored and range-checked. The second
/// field flags the balance "NN% left" form, which counts down.
fn extract_percent(text: &str) -> Option<(u8, bool)> {
    let idx = text.find('%')?;
    let head = &text[..idx];
    let start = head
        .rfind(|ch: char| !ch.is_ascii_digit() && ch != '.')
        .map(|pos| pos + 1)
        .unwrap_or(0);
    let number: f64 = head[start..].parse().ok()?;
    if !(0.0..=100.0).contains(&number) {
        return None;
    }
    let remaining = text[idx..].starts_with("% left");
    Some((number.floor() as u8, remaining))
}

fn defrag_matches(mount: &str, listing: &str) -> bool {
    listing
        .lines()
        .any(|line| mount == "/" || line.contains(mount))
}
