//! Serial devices that can have their control lines driven

mod serial_comm;
pub use serial_comm::{ControlLines, PortOpener};

#[cfg(feature = "serialport_comm")]
mod serialport_comm;
#[cfg(feature = "serialport_comm")]
pub use serialport_comm::{SerialPort, SerialPortOpener};

pub(crate) type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[cfg(feature = "serialport_comm")]
    #[error("Serial port error: `{0:?}`")]
    SerialPort(serialport::Error),
    #[error("Communication error: `{0}`")]
    Communication(String),
}

#[cfg(feature = "serialport_comm")]
impl From<serialport::Error> for Error {
    fn from(e: serialport::Error) -> Self {
        Error::SerialPort(e)
    }
}
