pub mod app;
pub mod cli;
pub mod config;
pub mod lcd;
pub mod metrics;
pub mod render;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    InvalidArgs(String),
    Collector {
        source: &'static str,
        cause: String,
    },
    DeviceWrite {
        op: &'static str,
        device: String,
        cause: std::io::Error,
    },
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidArgs(msg) => write!(f, "invalid arguments: {msg}"),
            Error::Collector { source, cause } => {
                write!(f, "collector '{source}' failed: {cause}")
            }
            Error::DeviceWrite { op, device, cause } => {
                write!(f, "{op} failed on {device}: {cause}")
            }
            Error::Io(err) => write!(f, "io error: {err}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Error::Io(value)
    }
}
