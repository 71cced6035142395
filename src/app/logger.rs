use std::str::FromStr;
use std::sync::Mutex;
use std::time::SystemTime;

use syslog::{Facility, Formatter3164};

/// Log verbosity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    #[default]
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl FromStr for LogLevel {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(()),
        }
    }
}

type SyslogWriter = syslog::Logger<syslog::LoggerBackend, String, Formatter3164>;

/// Leveled logger for an unattended daemon: stderr always, the system log
/// when its socket is reachable.
pub struct Logger {
    level: LogLevel,
    syslog: Option<Mutex<SyslogWriter>>,
}

impl Logger {
    pub fn new(level: LogLevel) -> Self {
        let env_level = std::env::var("LCDMON_LOG_LEVEL")
            .ok()
            .and_then(|s| LogLevel::from_str(&s).ok());

        let formatter = Formatter3164 {
            facility: Facility::LOG_DAEMON,
            hostname: None,
            process: "lcdmon".into(),
            pid: 0,
        };
        // A missing syslog socket is not fatal; stderr still gets every line.
        let syslog = syslog::unix(formatter).ok().map(Mutex::new);

        Self {
            level: env_level.unwrap_or(level),
            syslog,
        }
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn log(&self, level: LogLevel, msg: impl AsRef<str>) {
        if level > self.level {
            return;
        }
        let stamp = humantime::format_rfc3339_seconds(SystemTime::now());
        eprintln!("[{stamp}] [{level:?}] {}", msg.as_ref());

        if let Some(writer) = self.syslog.as_ref() {
            if let Ok(mut writer) = writer.lock() {
                let line = msg.as_ref().to_string();
                let _ = match level {
                    LogLevel::Error => writer.err(line),
                    LogLevel::Warn => writer.warning(line),
                    LogLevel::Info => writer.info(line),
                    LogLevel::Debug | LogLevel::Trace => writer.debug(line),
                };
            }
        }
    }

    pub fn error(&self, msg: impl AsRef<str>) {
        self.log(LogLevel::Error, msg);
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        self.log(LogLevel::Warn, msg);
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        self.log(LogLevel::Info, msg);
    }

    pub fn debug(&self, msg: impl AsRef<str>) {
        self.log(LogLevel::Debug, msg);
    }

    #[allow(dead_code)]
    pub fn trace(&self, msg: impl AsRef<str>) {
        self.log(LogLevel::Trace, msg);
    }
}
