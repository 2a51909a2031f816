use log::trace;
use std::time::Duration;

use super::serial_comm::{ControlLines, PortOpener};
use super::Result;
use crate::config::{DataBits, Parity, StopBits, TouchConfig};

/// I/O timeout handed to the library; nothing is read or written, so it only bounds driver calls
/// that honour it
const IO_TIMEOUT: Duration = Duration::from_millis(10);

/// Communicate with a serial device using the
/// serialport library
///
/// /dev/tty* or similar on unix-like systems
/// COM devices on Windows systems
pub struct SerialPort {
    device: Box<dyn serialport::SerialPort>,
}

impl SerialPort {
    /// Opens `path` with the given framing
    pub fn new(path: &str, config: &TouchConfig) -> Result<Self> {
        let device = serialport::new(path, config.baud_rate)
            .timeout(IO_TIMEOUT)
            .parity(config.parity.into())
            .data_bits(config.data_bits.into())
            .stop_bits(config.stop_bits.into())
            .flow_control(serialport::FlowControl::None)
            .open()?;

        Ok(Self { device })
    }
}

impl ControlLines for SerialPort {
    fn set_rts(&mut self, level: bool) -> Result<()> {
        Ok(self.device.write_request_to_send(level)?)
    }

    fn set_dtr(&mut self, level: bool) -> Result<()> {
        Ok(self.device.write_data_terminal_ready(level)?)
    }

    fn close(self) -> Result<()> {
        // the library closes the handle on drop and has no fallible close
        trace!("close: dropping {:?}", self.device.name());
        drop(self.device);
        Ok(())
    }
}

/// [PortOpener] for [SerialPort]
#[derive(Debug, Default, Clone, Copy)]
pub struct SerialPortOpener;

impl PortOpener for SerialPortOpener {
    type Port = SerialPort;

    fn open(&mut self, path: &str, config: &TouchConfig) -> Result<SerialPort> {
        SerialPort::new(path, config)
    }
}

impl From<Parity> for serialport::Parity {
    fn from(parity: Parity) -> Self {
        match parity {
            Parity::None => serialport::Parity::None,
            Parity::Even => serialport::Parity::Even,
            Parity::Odd => serialport::Parity::Odd,
        }
    }
}

impl From<StopBits> for serialport::StopBits {
    fn from(stop_bits: StopBits) -> Self {
        match stop_bits {
            StopBits::One => serialport::StopBits::One,
            StopBits::Two => serialport::StopBits::Two,
        }
    }
}

impl From<DataBits> for serialport::DataBits {
    fn from(data_bits: DataBits) -> Self {
        match data_bits {
            DataBits::Seven => serialport::DataBits::Seven,
            DataBits::Eight => serialport::DataBits::Eight,
        }
    }
}
