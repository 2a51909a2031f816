use std::process::ExitCode;

use clap::Parser;
use log::error;

use touch1200::{
    config::{DataBits, Parity, StopBits, TOUCH_BAUD_RATE},
    device::SerialPortOpener,
    Touch, TouchConfig,
};

/// Reset a board into its bootloader with a 1200bps touch
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Serial port, e.g. /dev/ttyACM0 or COM3
    port: String,

    /// Baud rate
    #[arg(long, default_value_t = TOUCH_BAUD_RATE, value_parser = clap::value_parser!(u32).range(1..))]
    baud: u32,

    /// none, even or odd
    #[arg(long, default_value_t = Parity::None)]
    parity: Parity,

    /// 1 or 2
    #[arg(long, default_value_t = StopBits::One)]
    stop_bits: StopBits,

    /// 7 or 8
    #[arg(long, default_value_t = DataBits::Eight)]
    data_bits: DataBits,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let config = TouchConfig::default()
        .with_baud_rate(cli.baud)
        .with_parity(cli.parity)
        .with_stop_bits(cli.stop_bits)
        .with_data_bits(cli.data_bits);

    match Touch::new(SerialPortOpener, config).run(&cli.port) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Touch failed: {:?}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
