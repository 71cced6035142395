use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{Error, Result};

use super::{Config, CONFIG_DIR_NAME, CONFIG_FILE_NAME};

pub fn load_or_default() -> Result<Config> {
    let path = config_path()?;
    if !path.exists() {
        let cfg = Config::default();
        save_to_path(&cfg, &path)?;
        super::validate(&cfg)?;
        return Ok(cfg);
    }
    load_from_path(&path)
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    if !path.exists() {
        let cfg = Config::default();
        super::validate(&cfg)?;
        return Ok(cfg);
    }

    let raw = fs::read_to_string(path)?;
    parse(&raw)
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let contents = format!(
        "# lcdmon config\n\
device = \"{}\"\n\
baud = {}\n\
bar_width = {}\n\
mounts = {}\n\
interfaces = {}\n\
boot_grace = \"{}\"\n",
        config.device,
        config.baud,
        config.bar_width,
        format_string_array(&config.mounts),
        format_string_array(&config.interfaces),
        humantime::format_duration(config.boot_grace),
    );
    fs::write(path, contents)?;
    Ok(())
}

pub fn parse(raw: &str) -> Result<Config> {
    let mut cfg = Config::default();

    for (idx, line) in raw.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let (key, value) = trimmed.split_once('=').ok_or_else(|| {
            Error::InvalidArgs(format!("invalid config line {}: '{}'", idx + 1, line))
        })?;

        let key = key.trim();
        let value = value.trim().trim_matches('"');
        match key {
            "device" => cfg.device = value.to_string(),
            "baud" => {
                cfg.baud = value.parse().map_err(|_| {
                    Error::InvalidArgs(format!("invalid baud value on line {}", idx + 1))
                })?;
            }
            "bar_width" => {
                cfg.bar_width = value.parse().map_err(|_| {
                    Error::InvalidArgs(format!("invalid bar_width value on line {}", idx + 1))
                })?;
            }
            "mounts" => {
                cfg.mounts = parse_string_array(value).map_err(|e| {
                    Error::InvalidArgs(format!("invalid mounts on line {}: {e}", idx + 1))
                })?;
            }
            "interfaces" => {
                cfg.interfaces = parse_string_array(value).map_err(|e| {
                    Error::InvalidArgs(format!("invalid interfaces on line {}: {e}", idx + 1))
                })?;
            }
            "boot_grace" => {
                cfg.boot_grace = parse_grace(value).map_err(|e| {
                    Error::InvalidArgs(format!("invalid boot_grace on line {}: {e}", idx + 1))
                })?;
            }
            other => {
                return Err(Error::InvalidArgs(format!(
                    "unknown config key '{}' on line {}",
                    other,
                    idx + 1
                )));
            }
        }
    }

    super::validate(&cfg)?;
    Ok(cfg)
}

fn config_path() -> Result<PathBuf> {
    let home = std::env::var_os("HOME")
        .map(PathBuf::from)
        .ok_or_else(|| Error::InvalidArgs("HOME not set; cannot locate config directory".into()))?;
    Ok(home.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Durations accept humantime forms ("90s", "3m") or a bare second count.
fn parse_grace(value: &str) -> std::result::Result<Duration, String> {
    if let Ok(secs) = value.parse::<u64>() {
        return Ok(Duration::from_secs(secs));
    }
    humantime::parse_duration(value).map_err(|e| e.to_string())
}

fn parse_string_array(value: &str) -> std::result::Result<Vec<String>, String> {
    let trimmed = value.trim();
    if !trimmed.starts_with('[') || !trimmed.ends_with(']') {
        return Err("expected array literal (e.g., [\"/\", \"/data\"])".into());
    }
    let inner = &trimmed[1..trimmed.len() - 1];
    if inner.trim().is_empty() {
        return Ok(Vec::new());
    }
    let mut entries = Vec::new();
    for part in inner.split(',') {
        let item = part.trim();
        if item.is_empty() {
            continue;
        }
        let cleaned = if item.len() >= 2
            && ((item.starts_with('"') && item.ends_with('"'))
                || (item.starts_with('\'') && item.ends_with('\'')))
        {
            &item[1..item.len() - 1]
        } else {
            item
        };
        let cleaned = cleaned.trim();
        if cleaned.is_empty() {
            return Err("entries must not be empty".into());
        }
        entries.push(cleaned.to_string());
    }
    Ok(entries)
}

fn format_string_array(values: &[String]) -> String {
    if values.is_empty() {
        return "[]".into();
    }
    let quoted = values
        .iter()
        .map(|value| format!("\"{value}\""))
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{quoted}]")
}
