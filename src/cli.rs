use crate::{Error, Result};

/// Options shared by `run` and `banner`; values are `None` when not
/// provided on the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunOptions {
    pub device: Option<String>,
    pub baud: Option<u32>,
    pub config_path: Option<String>,
    pub log_level: Option<String>,
}

/// Parsed command-line intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(RunOptions),
    Banner { text: String, opts: RunOptions },
    ShowHelp,
    ShowVersion,
}

impl Command {
    pub fn parse(args: &[String]) -> Result<Self> {
        if args.is_empty() {
            return Ok(Command::Run(RunOptions::default()));
        }

        let mut iter = args.iter();
        match iter.next().map(|s| s.as_str()) {
            Some("run") => Ok(Command::Run(parse_options(&mut iter)?)),
            Some("banner") => parse_banner(&mut iter),
            Some("--help") | Some("-h") => Ok(Command::ShowHelp),
            Some("--version") | Some("-V") => Ok(Command::ShowVersion),
            Some(flag) if flag.starts_with('-') => {
                // Allow omitting the explicit `run` subcommand: pass the
                // consumed flag plus the remaining args into the parser.
                let mut flags: Vec<String> = Vec::with_capacity(args.len());
                flags.push(flag.to_string());
                flags.extend(iter.map(|s| s.to_string()));
                let mut iter = flags.iter();
                Ok(Command::Run(parse_options(&mut iter)?))
            }
            Some(cmd) => Err(Error::InvalidArgs(format!(
                "unknown command '{cmd}', try --help"
            ))),
            None => Ok(Command::Run(RunOptions::default())),
        }
    }

    pub fn help() -> &'static str {
        concat!(
            "lcdmon - host status on a serial LCD\n",
            "\n",
            "USAGE:\n",
            "  lcdmon [run] [--device <path>] [--baud <number>] [--config <path>] [--log-level <level>]\n",
            "  lcdmon banner <word> [--device <path>] [--baud <number>]\n",
            "  lcdmon --help\n",
            "  lcdmon --version\n",
            "\n",
            "OPTIONS:\n",
            "  --device <path>      Serial device path (default: /dev/ttyS1)\n",
            "  --baud <number>      Baud rate (default: 115200)\n",
            "  --config <path>      Config file path (default: ~/.lcdmon/config.toml)\n",
            "  --log-level <level>  error|warn|info|debug|trace (default: info)\n",
            "  -h, --help           Show this help\n",
            "  -V, --version        Show version\n",
        )
    }

    pub fn print_help() {
        println!("{}", Self::help());
    }
}

fn parse_options(iter: &mut std::slice::Iter<String>) -> Result<RunOptions> {
    let mut opts = RunOptions::default();

    while let Some(flag) = iter.next() {
        parse_flag(flag, iter, &mut opts)?;
    }

    Ok(opts)
}

fn parse_banner(iter: &mut std::slice::Iter<String>) -> Result<Command> {
    let mut opts = RunOptions::default();
    let mut text: Option<String> = None;

    while let Some(arg) = iter.next() {
        if arg.starts_with('-') {
            parse_flag(arg, iter, &mut opts)?;
        } else if text.is_none() {
            text = Some(arg.clone());
        } else {
            return Err(Error::InvalidArgs(
                "banner takes a single word".to_string(),
            ));
        }
    }

    let text = text.ok_or_else(|| {
        Error::InvalidArgs("banner requires a word to display".to_string())
    })?;
    Ok(Command::Banner { text, opts })
}

fn parse_flag(
    flag: &str,
    iter: &mut std::slice::Iter<String>,
    opts: &mut RunOptions,
) -> Result<()> {
    match flag {
        "--device" => {
            opts.device = Some(take_value(flag, iter)?);
        }
        "--baud" => {
            let raw = take_value(flag, iter)?;
            opts.baud = Some(raw.parse().map_err(|_| {
                Error::InvalidArgs("baud must be a positive integer".to_string())
            })?);
        }
        "--config" => {
            opts.config_path = Some(take_value(flag, iter)?);
        }
        "--log-level" => {
            opts.log_level = Some(take_value(flag, iter)?);
        }
        other => {
            return Err(Error::InvalidArgs(format!(
                "unknown flag '{other}', try --help"
            )));
        }
    }
    Ok(())
}

fn take_value(flag: &str, iter: &mut std::slice::Iter<String>) -> Result<String> {
    iter.next()
        .cloned()
        .ok_or_else(|| Error::InvalidArgs(format!("expected a value after {flag}")))
}
