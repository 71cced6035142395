use std::io;
use std::time::Duration;

use serialport::{DataBits, FlowControl, Parity, StopBits};

use crate::{Error, Result};

/// Write timeout on the underlying port. The controller never pushes back
/// for longer than this unless the line is gone.
const WRITE_TIMEOUT_MS: u64 = 1_000;

/// Byte channel to the display with a minimum inter-command interval.
///
/// `settle` is the timing contract of the display controller: after each
/// command line the caller must wait before issuing the next one. The
/// production transport sleeps; test transports may record and return.
pub trait Transport {
    /// Write one command line, newline-terminated, as a single write.
    fn send_line(&mut self, line: &str) -> io::Result<()>;

    /// Block until the display is ready for the next command.
    fn settle(&mut self, interval: Duration);
}

/// Serial transport for the physical display channel (8N1, no flow control).
pub struct SerialTransport {
    port: Box<dyn serialport::SerialPort>,
}

impl SerialTransport {
    pub fn open(device: &str, baud: u32) -> Result<Self> {
        if device.is_empty() {
            return Err(Error::InvalidArgs(
                "device path cannot be empty".to_string(),
            ));
        }

        let port = serialport::new(device, baud)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(Duration::from_millis(WRITE_TIMEOUT_MS))
            .open()
            .map_err(map_serial_error)?;

        Ok(Self { port })
    }
}

impl Transport for SerialTransport {
    fn send_line(&mut self, line: &str) -> io::Result<()> {
        let mut buf = line.as_bytes().to_vec();
        buf.push(b'\n');
        self.port.write_all(&buf)?;
        self.port.flush()
    }

    fn settle(&mut self, interval: Duration) {
        std::thread::sleep(interval);
    }
}

fn map_serial_error(err: serialport::Error) -> Error {
    use serialport::ErrorKind;

    let kind = match err.kind() {
        ErrorKind::NoDevice => io::ErrorKind::NotFound,
        ErrorKind::InvalidInput => io::ErrorKind::InvalidInput,
        ErrorKind::Io(inner) => inner,
        ErrorKind::Unknown => io::ErrorKind::Other,
    };

    Error::Io(io::Error::new(kind, err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_device() {
        let err = SerialTransport::open("", 115_200).unwrap_err();
        assert!(format!("{err}").contains("device path cannot be empty"));
    }

    #[test]
    fn open_missing_device_is_io_error() {
        match SerialTransport::open("/dev/nonexistent-lcd", 115_200) {
            Ok(_) => panic!("open of a missing device should fail"),
            Err(Error::Io(_)) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
}
