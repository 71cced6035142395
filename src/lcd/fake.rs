use std::io;
use std::time::Duration;

use super::Transport;

/// Scriptable transport used in tests: records every command line and
/// settle interval instead of touching hardware.
#[derive(Debug, Default)]
pub struct FakeTransport {
    lines: Vec<String>,
    settles: Vec<Duration>,
    fail_after: Option<usize>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the n-th send (zero-based) and every send after it.
    pub fn failing_after(n: usize) -> Self {
        Self {
            fail_after: Some(n),
            ..Self::default()
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn settles(&self) -> &[Duration] {
        &self.settles
    }
}

impl Transport for FakeTransport {
    fn send_line(&mut self, line: &str) -> io::Result<()> {
        if let Some(limit) = self.fail_after {
            if self.lines.len() >= limit {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "scripted failure"));
            }
        }
        self.lines.push(line.to_string());
        Ok(())
    }

    fn settle(&mut self, interval: Duration) {
        self.settles.push(interval);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_lines_and_settles() {
        let mut fake = FakeTransport::new();
        fake.send_line("E").unwrap();
        fake.settle(Duration::from_millis(100));
        assert_eq!(fake.lines(), &["E".to_string()]);
        assert_eq!(fake.settles(), &[Duration::from_millis(100)]);
    }

    #[test]
    fn scripted_failure_fires_at_the_limit() {
        let mut fake = FakeTransport::failing_after(1);
        fake.send_line("E").unwrap();
        assert!(fake.send_line("F 0").is_err());
        assert_eq!(fake.lines().len(), 1);
    }
}
