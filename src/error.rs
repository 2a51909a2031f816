use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

/// An error while performing the touch
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The device (the `String` is its path) is missing, busy, or access was denied
    #[error("Could not open `{0}`: `{1:?}`")]
    PortOpen(String, DeviceError),

    /// The driver refused to set one of the control lines
    #[error("Could not set {0}: `{1:?}`")]
    ControlLine(ControlLine, DeviceError),

    /// The OS failed to release the port
    #[error("Could not close port: `{0:?}`")]
    Close(DeviceError),
}

#[derive(Debug)]
pub struct DeviceError(pub(crate) crate::device::Error);

impl DeviceError {
    /// The underlying [device error](crate::device::Error)
    pub fn inner(&self) -> &crate::device::Error {
        &self.0
    }
}

impl From<crate::device::Error> for DeviceError {
    fn from(e: crate::device::Error) -> Self {
        DeviceError(e)
    }
}

/// A modem control line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlLine {
    /// Request to send
    Rts,
    /// Data terminal ready
    Dtr,
}

impl fmt::Display for ControlLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Rts => "RTS",
            Self::Dtr => "DTR",
        })
    }
}
