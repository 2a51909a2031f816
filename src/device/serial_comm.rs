use super::Result;
use crate::TouchConfig;

/// An open serial connection whose modem control lines can be set
pub trait ControlLines {
    /// Drive RTS (request to send); `true` asserts the line
    fn set_rts(&mut self, level: bool) -> Result<()>;

    /// Drive DTR (data terminal ready); `true` asserts the line
    fn set_dtr(&mut self, level: bool) -> Result<()>;

    /// Release the connection
    fn close(self) -> Result<()>;
}

/// Opens named serial devices
pub trait PortOpener {
    type Port: ControlLines;

    /// Open `path` with the framing in `config`
    ///
    /// `path` is platform specific: /dev/tty* or similar on unix-like systems, COM devices on
    /// Windows.
    fn open(&mut self, path: &str, config: &TouchConfig) -> Result<Self::Port>;
}
