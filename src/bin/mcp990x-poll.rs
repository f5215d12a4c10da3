//! Poll all four channels of an MCP990x and redraw a table of readings.
use std::fmt::Write as _;
use std::time::Duration;

use anyhow::Context;
use log::warn;
use mcp990x::{Channel, Config, Sensor, SensorConfig, Temperature, DEFAULT_ADDRESS};

const POLL_INTERVAL: Duration = Duration::from_secs(2);

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

fn parse_address(arg: &str) -> anyhow::Result<u8> {
    let address = match arg.strip_prefix("0x").or_else(|| arg.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => arg.parse(),
    }
    .with_context(|| format!("invalid I2C address {arg:?}"))?;
    anyhow::ensure!(address <= 0x7F, "I2C address {address:#x} is not 7-bit");
    Ok(address)
}

fn render_table(readings: &[Option<Temperature>; 4]) -> String {
    let mut table = String::from("Temperatures (C)\n");
    for channel in Channel::ALL {
        let _ = write!(table, "{:>9}", channel.index());
    }
    table.push('\n');
    for reading in readings {
        let _ = match reading {
            Some(t) => write!(table, "{t:>9.3}"),
            None => write!(table, "{:>9}", "--"),
        };
    }
    table.push('\n');
    table
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(bus) = args.next() else {
        eprintln!("Provide the I2C bus index as the first argument.");
        std::process::exit(1)
    };
    let bus: u8 = bus
        .parse()
        .with_context(|| format!("invalid bus index {bus:?}"))?;
    let address = match args.next() {
        Some(arg) => parse_address(&arg)?,
        None => DEFAULT_ADDRESS,
    };

    let config = SensorConfig::builder()
        .bus(bus)
        .address(address)
        .debug(log::log_enabled!(log::Level::Debug))
        .build();
    let mut sensor = Sensor::open(config)?;
    sensor.set_config(Config::default().with_extended_range(true))?;

    loop {
        // A failed channel is shown as "--" and polling carries on.
        let readings = Channel::ALL.map(|channel| match sensor.read_channel(channel) {
            Ok(t) => Some(t),
            Err(e) => {
                warn!("channel {}: {e}", channel.index());
                None
            }
        });
        print!("{CLEAR_SCREEN}{}", render_table(&readings));
        std::thread::sleep(POLL_INTERVAL);
    }
}
