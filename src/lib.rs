//! Crate for resetting microcontrollers into their bootloader with a "1200bps touch"
//!
//! Boards that follow this convention watch their USB serial port: when it is opened at 1200
//! baud and the modem control lines change, the board resets and waits in its bootloader.
//!
//! # Usage
//! ```no_run
//! fn main() -> Result<(), touch1200::Error> {
//!     touch1200::touch("/dev/ttyACM0")
//! }
//! ```
//!
//! Other framing can be used through [Touch] and [TouchConfig]:
//! ```no_run
//! use touch1200::{config::Parity, device::SerialPortOpener, Touch, TouchConfig};
//!
//! fn main() -> Result<(), touch1200::Error> {
//!     let config = TouchConfig::default().with_parity(Parity::Even);
//!     Touch::new(SerialPortOpener, config).run("COM3")
//! }
//! ```

#![forbid(unsafe_code)]

pub mod config;
pub use config::TouchConfig;

pub mod device;

mod error;
pub use error::{ControlLine, DeviceError, Error};
use error::Result;

mod touch;
#[cfg(feature = "serialport_comm")]
pub use touch::touch;
pub use touch::Touch;
