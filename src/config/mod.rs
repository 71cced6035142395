use std::path::Path;
use std::time::Duration;

use crate::{Error, Result};

pub mod loader;

pub const DEFAULT_DEVICE: &str = "/dev/ttyS1";
pub const DEFAULT_BAUD: u32 = 115_200;
pub const DEFAULT_BAR_WIDTH: usize = 10;
pub const DEFAULT_BOOT_GRACE: Duration = Duration::from_secs(180);
const CONFIG_DIR_NAME: &str = ".lcdmon";
const CONFIG_FILE_NAME: &str = "config.toml";

/// User-supplied settings loaded from the config file. Immutable for the
/// duration of one cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub device: String,
    pub baud: u32,
    pub bar_width: usize,
    pub mounts: Vec<String>,
    pub interfaces: Vec<String>,
    pub boot_grace: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            device: DEFAULT_DEVICE.to_string(),
            baud: DEFAULT_BAUD,
            bar_width: DEFAULT_BAR_WIDTH,
            mounts: vec!["/".to_string()],
            interfaces: vec!["eth0".to_string()],
            boot_grace: DEFAULT_BOOT_GRACE,
        }
    }
}

impl Config {
    pub fn load_or_default() -> Result<Self> {
        loader::load_or_default()
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        loader::load_from_path(path)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        loader::save_to_path(self, path)
    }
}

pub(crate) fn validate(config: &Config) -> Result<()> {
    if config.baud == 0 {
        return Err(Error::InvalidArgs(
            "baud must be a positive integer".to_string(),
        ));
    }
    if config.bar_width == 0 || config.bar_width > 19 {
        return Err(Error::InvalidArgs(
            "bar_width must be between 1 and 19".to_string(),
        ));
    }
    if config.mounts.is_empty() {
        return Err(Error::InvalidArgs(
            "mounts must list at least one mount point".to_string(),
        ));
    }
    for mount in &config.mounts {
        if !mount.starts_with('/') {
            return Err(Error::InvalidArgs(format!(
                "mount points must be absolute paths, got '{mount}'"
            )));
        }
    }
    if config.boot_grace > Duration::from_secs(86_400) {
        return Err(Error::InvalidArgs(
            "boot_grace must be at most one day".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        validate(&Config::default()).unwrap();
    }

    #[test]
    fn rejects_zero_bar_width() {
        let cfg = Config {
            bar_width: 0,
            ..Config::default()
        };
        let err = validate(&cfg).unwrap_err();
        assert!(format!("{err}").contains("bar_width"));
    }

    #[test]
    fn rejects_relative_mount_points() {
        let cfg = Config {
            mounts: vec!["data".to_string()],
            ..Config::default()
        };
        let err = validate(&cfg).unwrap_err();
        assert!(format!("{err}").contains("absolute"));
    }

    #[test]
    fn rejects_empty_mount_list() {
        let cfg = Config {
            mounts: Vec::new(),
            ..Config::default()
        };
        assert!(validate(&cfg).is_err());
    }
}
