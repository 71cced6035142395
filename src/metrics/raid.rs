use std::fs;
use std::io::ErrorKind;

use super::ArrayHealth;
use crate::{Error, Result};

const MDSTAT_PATH: &str = "/proc/mdstat";

/// Arrays listed in the kernel's md status file. A machine without the md
/// driver has no arrays; that is a successful, empty reading.
pub fn arrays() -> Result<Vec<ArrayHealth>> {
    let content = match fs::read_to_string(MDSTAT_PATH) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => {
            return Err(Error::Collector {
                source: "raid",
                cause: err.to_string(),
            })
        }
    };
    Ok(parse_mdstat(&content))
}

/// Each array starts with "mdX : ..."; the following line carries the
/// member-status bitmap, e.g. "... blocks [2/2] [UU]". An underscore in
/// the bitmap marks a missing member.
pub fn parse_mdstat(content: &str) -> Vec<ArrayHealth> {
    let mut arrays = Vec::new();
    let mut lines = content.lines().peekable();

    while let Some(line) = lines.next() {
        if !line.starts_with("md") || !line.contains(" : ") {
            continue;
        }
        let name = match line.split(" : ").next() {
            Some(name) => name.trim().to_string(),
            None => continue,
        };
        let detail = lines.peek().copied().unwrap_or("");
        let bitmap = member_bitmap(detail).unwrap_or("").to_string();
        let degraded = bitmap.contains('_');
        arrays.push(ArrayHealth {
            name,
            bitmap,
            degraded,
        });
    }

    arrays
}

/// Last bracket group made up of only member markers; skips the `[n/m]`
/// count group that precedes it.
fn member_bitmap(detail: &str) -> Option<&str> {
    let mut rest = detail;
    let mut found = None;
    while let Some(start) = rest.find('[') {
        let tail = &rest[start..];
        let len = match tail.find(']') {
            Some(len) => len,
            None => break,
        };
        let candidate = &tail[..=len];
        let inner = &candidate[1..candidate.len() - 1];
        if !inner.is_empty() && inner.chars().all(|ch| ch == 'U' || ch == '_') {
            found = Some(candidate);
        }
        rest = &tail[len + 1..];
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEALTHY: &str = "\
Personalities : [raid1]
md0 : active raid1 sda1[0] sdb1[1]
      976762584 blocks super 1.2 [2/2] [UU]

unused devices: <none>
";

    const DEGRADED: &str = "\
Personalities : [raid1] [raid5]
md0 : active raid1 sda1[0] sdb1[1]
      976762584 blocks super 1.2 [2/2] [UU]

md1 : active raid5 sdc1[0] sdd1[1]
      1953524992 blocks level 5, 64k chunk, algorithm 2 [3/2] [UU_]

unused devices: <none>
";

    #[test]
    fn healthy_array_is_not_degraded() {
        let arrays = parse_mdstat(HEALTHY);
        assert_eq!(arrays.len(), 1);
        assert_eq!(arrays[0].name, "md0");
        assert_eq!(arrays[0].bitmap, "[UU]");
        assert!(!arrays[0].degraded);
    }

    #[test]
    fn missing_member_marks_the_array_degraded() {
        let arrays = parse_mdstat(DEGRADED);
        assert_eq!(arrays.len(), 2);
        assert!(!arrays[0].degraded);
        assert_eq!(arrays[1].name, "md1");
        assert_eq!(arrays[1].bitmap, "[UU_]");
        assert!(arrays[1].degraded);
    }

    #[test]
    fn count_group_is_not_mistaken_for_the_bitmap() {
        assert_eq!(member_bitmap("976762584 blocks [2/2] [UU]"), Some("[UU]"));
        assert_eq!(member_bitmap("blocks [3/2] [U_U]"), Some("[U_U]"));
        assert_eq!(member_bitmap("blocks [2/2]"), None);
    }

    #[test]
    fn empty_or_foreign_content_yields_no_arrays() {
        assert!(parse_mdstat("").is_empty());
        assert!(parse_mdstat("Personalities :\nunused devices: <none>\n").is_empty());
    }
}
