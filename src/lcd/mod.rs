//! Driver for the display's line-oriented command protocol.
//!
//! The controller accepts one ASCII command per line and needs a settle
//! interval after each one before it accepts the next.

use std::time::Duration;

use crate::{Error, Result};

pub mod fake;
pub mod transport;

pub use transport::{SerialTransport, Transport};

/// Settle interval owed after clear, font and cursor commands.
pub const SETTLE_COMMAND: Duration = Duration::from_millis(100);
/// Settle interval owed after a status-line text write.
pub const SETTLE_TEXT: Duration = Duration::from_millis(200);
/// Settle interval owed after a banner text write.
pub const SETTLE_BANNER: Duration = Duration::from_millis(500);

/// Fonts selectable on the display controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Fixed,
    Banner,
    Small,
}

impl Font {
    pub fn id(self) -> u8 {
        match self {
            Font::Fixed => 0,
            Font::Banner => 1,
            Font::Small => 2,
        }
    }

    /// Pixel height of one text row in this font.
    pub fn line_height(self) -> u8 {
        match self {
            Font::Fixed => 10,
            Font::Banner => 18,
            Font::Small => 8,
        }
    }

    /// Characters guaranteed to fit on one row.
    pub fn safe_cols(self) -> usize {
        match self {
            Font::Fixed => 21,
            Font::Banner => 12,
            Font::Small => 26,
        }
    }
}

/// One display command as it goes onto the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolFrame {
    Clear,
    SetFont(Font),
    SetCursor { x: u8, y: u8 },
    WriteText(String),
}

impl ProtocolFrame {
    pub fn encode(&self) -> String {
        match self {
            ProtocolFrame::Clear => "E".to_string(),
            ProtocolFrame::SetFont(font) => format!("F {}", font.id()),
            ProtocolFrame::SetCursor { x, y } => format!("C{x:02X} {y:02X}"),
            ProtocolFrame::WriteText(text) => format!("L{text}"),
        }
    }

    fn op(&self) -> &'static str {
        match self {
            ProtocolFrame::Clear => "clear",
            ProtocolFrame::SetFont(_) => "set_font",
            ProtocolFrame::SetCursor { .. } => "set_cursor",
            ProtocolFrame::WriteText(_) => "write_text",
        }
    }
}

/// LCD driver over a transport. Tracks the active font so cursor rows can
/// be translated into pixel coordinates.
pub struct Lcd<T: Transport> {
    transport: T,
    device: String,
    font: Font,
}

impl<T: Transport> Lcd<T> {
    pub fn new(transport: T, device: impl Into<String>) -> Self {
        Self {
            transport,
            device: device.into(),
            font: Font::Fixed,
        }
    }

    pub fn clear(&mut self) -> Result<()> {
        self.send(&ProtocolFrame::Clear, SETTLE_COMMAND)
    }

    pub fn set_font(&mut self, font: Font) -> Result<()> {
        self.send(&ProtocolFrame::SetFont(font), SETTLE_COMMAND)?;
        self.font = font;
        Ok(())
    }

    /// Position the cursor at the start of a text row in the active font.
    pub fn set_cursor(&mut self, row: u8) -> Result<()> {
        let y = row.saturating_mul(self.font.line_height());
        self.send(&ProtocolFrame::SetCursor { x: 0, y }, SETTLE_COMMAND)
    }

    /// Draw text at the current cursor in the current font. The payload is
    /// passed through verbatim; callers must not embed command marks.
    pub fn write_text(&mut self, text: &str) -> Result<()> {
        self.send(&ProtocolFrame::WriteText(text.to_string()), SETTLE_TEXT)
    }

    /// Clear the screen and own it with a single large-font message.
    pub fn print_banner(&mut self, text: &str) -> Result<()> {
        self.clear()?;
        self.set_font(Font::Banner)?;
        self.send(&ProtocolFrame::SetCursor { x: 0, y: 0 }, SETTLE_COMMAND)?;
        self.send(&ProtocolFrame::WriteText(text.to_string()), SETTLE_BANNER)
    }

    pub fn font(&self) -> Font {
        self.font
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn send(&mut self, frame: &ProtocolFrame, settle: Duration) -> Result<()> {
        self.transport
            .send_line(&frame.encode())
            .map_err(|cause| Error::DeviceWrite {
                op: frame.op(),
                device: self.device.clone(),
                cause,
            })?;
        self.transport.settle(settle);
        Ok(())
    }
}
