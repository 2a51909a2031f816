//! Serial framing used for the touch

use std::{fmt, str::FromStr};

/// Baud rate recognized by bootloaders that implement the 1200bps touch
pub const TOUCH_BAUD_RATE: u32 = 1200;

/// Framing parameters for opening the port
///
/// The [Default] is the classic touch: 1200 baud, no parity, one stop bit, eight data bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchConfig {
    pub baud_rate: u32,
    pub parity: Parity,
    pub stop_bits: StopBits,
    pub data_bits: DataBits,
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            baud_rate: TOUCH_BAUD_RATE,
            parity: Parity::None,
            stop_bits: StopBits::One,
            data_bits: DataBits::Eight,
        }
    }
}

impl TouchConfig {
    pub fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    pub fn with_parity(mut self, parity: Parity) -> Self {
        self.parity = parity;
        self
    }

    pub fn with_stop_bits(mut self, stop_bits: StopBits) -> Self {
        self.stop_bits = stop_bits;
        self
    }

    pub fn with_data_bits(mut self, data_bits: DataBits) -> Self {
        self.data_bits = data_bits;
        self
    }
}

impl fmt::Display for TouchConfig {
    /// Conventional short form, e.g. `1200,N,1,8`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parity = match self.parity {
            Parity::None => 'N',
            Parity::Even => 'E',
            Parity::Odd => 'O',
        };
        write!(
            f,
            "{},{},{},{}",
            self.baud_rate, parity, self.stop_bits, self.data_bits
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    None,
    Even,
    Odd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopBits {
    One,
    Two,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataBits {
    Seven,
    Eight,
}

/// A framing option was not one of the recognized spellings
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("invalid {option} `{value}`: expected one of {expected}")]
pub struct ParseError {
    option: &'static str,
    value: String,
    expected: &'static str,
}

impl ParseError {
    fn new(option: &'static str, value: &str, expected: &'static str) -> Self {
        ParseError {
            option,
            value: value.to_owned(),
            expected,
        }
    }
}

impl FromStr for Parity {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "n" => Ok(Parity::None),
            "even" | "e" => Ok(Parity::Even),
            "odd" | "o" => Ok(Parity::Odd),
            _ => Err(ParseError::new("parity", s, "none, even, odd")),
        }
    }
}

impl fmt::Display for Parity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Parity::None => "none",
            Parity::Even => "even",
            Parity::Odd => "odd",
        })
    }
}

impl FromStr for StopBits {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" => Ok(StopBits::One),
            "2" => Ok(StopBits::Two),
            _ => Err(ParseError::new("stop bits", s, "1, 2")),
        }
    }
}

impl fmt::Display for StopBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StopBits::One => "1",
            StopBits::Two => "2",
        })
    }
}

impl FromStr for DataBits {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "7" => Ok(DataBits::Seven),
            "8" => Ok(DataBits::Eight),
            _ => Err(ParseError::new("data bits", s, "7, 8")),
        }
    }
}

impl fmt::Display for DataBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DataBits::Seven => "7",
            DataBits::Eight => "8",
        })
    }
}
