use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use crate::{
    cli::RunOptions,
    config::Config,
    lcd::{Font, Lcd, SerialTransport, Transport},
    metrics,
    render::{self, bars, RenderPlan},
    Error, Result,
};

pub mod logger;

pub use logger::{LogLevel, Logger};

/// Effective settings for one invocation: file config merged with CLI
/// overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub device: String,
    pub baud: u32,
    pub bar_width: usize,
    pub mounts: Vec<String>,
    pub interfaces: Vec<String>,
    pub boot_grace: Duration,
    pub log_level: LogLevel,
}

impl AppConfig {
    pub fn from_sources(config: Config, opts: RunOptions) -> Self {
        Self {
            device: opts.device.unwrap_or(config.device),
            baud: opts.baud.unwrap_or(config.baud),
            bar_width: config.bar_width,
            mounts: config.mounts,
            interfaces: config.interfaces,
            boot_grace: config.boot_grace,
            log_level: opts
                .log_level
                .as_deref()
                .and_then(|s| LogLevel::from_str(s).ok())
                .unwrap_or_default(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_sources(Config::default(), RunOptions::default())
    }
}

pub struct App {
    config: AppConfig,
    logger: Logger,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let logger = Logger::new(config.log_level);
        Self { config, logger }
    }

    pub fn from_options(opts: RunOptions) -> Result<Self> {
        let file = match opts.config_path.as_deref() {
            Some(path) => Config::load_from_path(Path::new(path))?,
            None => Config::load_or_default()?,
        };
        Ok(Self::new(AppConfig::from_sources(file, opts)))
    }

    /// One full cycle: collect, pick a mode, build the plan, drive the LCD.
    /// Only a failed channel open propagates; a write failure mid-render is
    /// logged and the cycle ends cleanly (the next scheduled run retries).
    pub fn run(&self) -> Result<()> {
        let mut lcd = self.open_display()?;
        let readings = metrics::collect(&self.config.mounts, &self.config.interfaces, &self.logger);
        let mode = render::select_mode(&readings, self.config.boot_grace);
        self.logger.debug(format!("selected {mode:?}"));
        let plan = render::build_plan(mode, &readings, self.config.bar_width);
        self.finish(render_plan(&mut lcd, &plan))
    }

    /// One-shot banner for the companion utility.
    pub fn banner(&self, text: &str) -> Result<()> {
        let mut lcd = self.open_display()?;
        let text = bars::fit_line(text, Font::Banner.safe_cols());
        self.finish(lcd.print_banner(&text))
    }

    fn open_display(&self) -> Result<Lcd<SerialTransport>> {
        let transport = SerialTransport::open(&self.config.device, self.config.baud)?;
        self.logger.debug(format!(
            "display channel open (device={}, baud={})",
            self.config.device, self.config.baud
        ));
        Ok(Lcd::new(transport, self.config.device.clone()))
    }

    fn finish(&self, outcome: Result<()>) -> Result<()> {
        match outcome {
            Ok(()) => Ok(()),
            Err(err @ Error::DeviceWrite { .. }) => {
                // Partial renders self-heal on the next cycle.
                self.logger.error(format!("render aborted: {err}"));
                Ok(())
            }
            Err(other) => Err(other),
        }
    }
}

/// Turn a render plan into the driver's primitive calls. The first failing
/// write aborts the remainder; the device keeps its last good frame.
pub fn render_plan<T: Transport>(lcd: &mut Lcd<T>, plan: &RenderPlan) -> Result<()> {
    match plan {
        RenderPlan::Lines(lines) => {
            lcd.clear()?;
            lcd.set_font(Font::Fixed)?;
            for line in lines {
                lcd.set_cursor(line.row)?;
                lcd.write_text(&line.text)?;
            }
            Ok(())
        }
        RenderPlan::Banner { text, detail } => {
            lcd.print_banner(text)?;
            if let Some(detail) = detail {
                lcd.set_font(Font::Fixed)?;
                lcd.set_cursor(2)?;
                lcd.write_text(detail)?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_BAUD, DEFAULT_DEVICE};

    #[test]
    fn cli_overrides_win_over_file_values() {
        let opts = RunOptions {
            device: Some("/dev/ttyUSB1".into()),
            baud: Some(57_600),
            log_level: Some("debug".into()),
            ..RunOptions::default()
        };
        let merged = AppConfig::from_sources(Config::default(), opts);
        assert_eq!(merged.device, "/dev/ttyUSB1");
        assert_eq!(merged.baud, 57_600);
        assert_eq!(merged.log_level, LogLevel::Debug);
    }

    #[test]
    fn file_values_survive_when_cli_is_silent() {
        let file = Config {
            device: "/dev/ttyS2".into(),
            baud: 9_600,
            ..Config::default()
        };
        let merged = AppConfig::from_sources(file, RunOptions::default());
        assert_eq!(merged.device, "/dev/ttyS2");
        assert_eq!(merged.baud, 9_600);
        assert_eq!(merged.log_level, LogLevel::Info);
    }

    #[test]
    fn defaults_mirror_the_config_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.device, DEFAULT_DEVICE);
        assert_eq!(cfg.baud, DEFAULT_BAUD);
    }
}
