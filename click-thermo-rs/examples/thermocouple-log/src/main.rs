//! Thermocouple log example
//!
//! Reads the K-type thermocouple on the Thermo Click and the DS1825 on
//! the Thermo 2 Click every two seconds. The DS1825 sits next to the
//! thermocouple connector, so its reading is logged beside the MAX31855's
//! cold-junction temperature for comparison.
//!
//! # Wiring
//!
//! | Signal      | Pico 2 Pin | Notes                    |
//! |-------------|------------|--------------------------|
//! | SPI0 SCK    | GP18       |                          |
//! | SPI0 MISO   | GP16       | MAX31855 is read-only    |
//! | MAX31855 CS | GP17       |                          |
//! | DS1825 DQ   | GP22       | 4.7 kΩ pull-up on Click  |

#![no_std]
#![no_main]

use defmt::*;
use embassy_embedded_hal::shared_bus::asynch::spi::SpiDevice;
use embassy_executor::Spawner;
use embassy_rp as hal;
use embassy_rp::block::ImageDef;
use embassy_rp::gpio::{Level, Output, OutputOpenDrain};
use embassy_rp::spi::{self, Spi};
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_time::{Delay, Duration, Timer};
use {defmt_rtt as _, panic_probe as _};

use click_thermo::ds1825::{Config, Resolution};
use click_thermo::{BitBangOneWire, Ds1825, Max31855, ThermoError};

/// Tell the Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = hal::block::ImageDef::secure_exe();

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    info!("Thermocouple log example starting");

    let mut config = spi::Config::default();
    config.frequency = 4_000_000;
    let spi = Spi::new_rxonly(p.SPI0, p.PIN_18, p.PIN_16, p.DMA_CH0, p.DMA_CH1, config);
    let bus = Mutex::<NoopRawMutex, _>::new(spi);
    let mut thermocouple = Max31855::new(SpiDevice::new(&bus, Output::new(p.PIN_17, Level::High)));

    let wire = BitBangOneWire::new(OutputOpenDrain::new(p.PIN_22, Level::High), Delay);
    let mut junction_sensor = Ds1825::new(
        wire,
        Delay,
        Config {
            resolution: Resolution::Bits11,
        },
    );
    junction_sensor.init().await.expect("DS1825 init failed");
    info!("DS1825 initialised");

    loop {
        match thermocouple.read().await {
            Ok(reading) => info!(
                "Thermocouple {} C, cold junction {} C",
                reading.thermocouple_c, reading.internal_c
            ),
            Err(ThermoError::Fault(fault)) => warn!("Thermocouple fault: {}", fault),
            Err(e) => warn!("MAX31855: {}", Debug2Format(&e)),
        }

        match junction_sensor.read_temperature().await {
            Ok(celsius) => info!("DS1825 {} C", celsius),
            Err(e) => warn!("DS1825: {}", Debug2Format(&e)),
        }

        Timer::after(Duration::from_secs(2)).await;
    }
}
