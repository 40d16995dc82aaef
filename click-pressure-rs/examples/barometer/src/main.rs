//! Barometer example
//!
//! Runs the DPS422 (Pressure 5 Click) and the ICP-10100 (Pressure 13
//! Click) side by side on one I2C bus and logs both readings once a
//! second, together with the difference between them.
//!
//! # Wiring
//!
//! | Signal    | Pico 2 Pin | Notes                         |
//! |-----------|------------|-------------------------------|
//! | I2C0 SDA  | GP4        | shared by both Clicks         |
//! | I2C0 SCL  | GP5        | shared by both Clicks         |
//! | VCC       | 3V3        |                               |
//! | GND       | GND        |                               |

#![no_std]
#![no_main]

use defmt::*;
use embassy_embedded_hal::shared_bus::asynch::i2c::I2cDevice;
use embassy_executor::Spawner;
use embassy_rp as hal;
use embassy_rp::bind_interrupts;
use embassy_rp::block::ImageDef;
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_time::{Delay, Duration, Timer};
use {defmt_rtt as _, panic_probe as _};

use click_pressure::dps422::{self, Dps422};
use click_pressure::icp10100::{self, Icp10100};

/// Tell the Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = hal::block::ImageDef::secure_exe();

// Wire the I2C0 interrupt to Embassy's handler.
bind_interrupts!(struct Irqs {
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
});

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    info!("Barometer example starting");

    let i2c = I2c::new_async(
        p.I2C0,
        p.PIN_5, // SCL
        p.PIN_4, // SDA
        Irqs,
        i2c::Config::default(),
    );
    let bus = Mutex::<NoopRawMutex, _>::new(i2c);

    let mut dps = Dps422::new(
        I2cDevice::new(&bus),
        dps422::DEFAULT_ADDRESS,
        Delay,
        dps422::Config::default(),
    );
    let mut icp = Icp10100::new(I2cDevice::new(&bus), Delay, icp10100::Config::default());

    dps.init().await.expect("DPS422 init failed");
    icp.init().await.expect("ICP-10100 init failed");
    info!("Both sensors initialised");

    loop {
        match (dps.measure().await, icp.measure().await) {
            (Ok(a), Ok(b)) => info!(
                "DPS422 {} Pa / {} C, ICP-10100 {} Pa / {} C, delta {} Pa",
                a.pressure_pa,
                a.temperature_c,
                b.pressure_pa,
                b.temperature_c,
                a.pressure_pa - b.pressure_pa
            ),
            (Err(e), _) => warn!("DPS422: {}", Debug2Format(&e)),
            (_, Err(e)) => warn!("ICP-10100: {}", Debug2Format(&e)),
        }

        Timer::after(Duration::from_secs(1)).await;
    }
}
