//! Station scan example
//!
//! Tunes the FM Click to the bottom of the band and seeks upward until the
//! seek wraps past the top. Each station's frequency, RSSI and stereo
//! state is logged, then the radio returns to the strongest one.
//!
//! # Wiring
//!
//! | Signal    | Pico 2 Pin | Notes                            |
//! |-----------|------------|----------------------------------|
//! | I2C0 SDA  | GP4        | SDIO; the Click pulls it low     |
//! | I2C0 SCL  | GP5        |                                  |
//! | RST       | GP6        |                                  |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp as hal;
use embassy_rp::bind_interrupts;
use embassy_rp::block::ImageDef;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::{Delay, Duration, Timer};
use {defmt_rtt as _, panic_probe as _};

use click_fm::{SeekDirection, Si4703};

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
    info!("Station scan example starting");

    let rst = Output::new(p.PIN_6, Level::Low);

    let i2c = I2c::new_async(
        p.I2C0,
        p.PIN_5, // SCL
        p.PIN_4, // SDA
        Irqs,
        i2c::Config::default(),
    );

    let mut radio = Si4703::new(i2c, rst, Delay, Default::default());
    radio.init().await.expect("Si4703 init failed");
    radio.set_volume(8).await.expect("volume");

    let bottom = radio.config().band.bottom();
    radio.tune(bottom).await.expect("tune failed");

    let mut best: Option<(u16, u8)> = None;
    let mut last = bottom;
    loop {
        match radio.seek(SeekDirection::Up).await {
            // Seeks wrap at the band edge; a lower frequency means a full lap.
            Ok(Some(freq)) if freq <= last => break,
            Ok(Some(freq)) => {
                last = freq;
                let rssi = radio.rssi().await.unwrap_or(0);
                let stereo = radio.is_stereo().await.unwrap_or(false);
                info!("{}.{} MHz  RSSI {}  stereo {}", freq / 100, freq % 100 / 10, rssi, stereo);
                if best.map_or(true, |(_, r)| rssi > r) {
                    best = Some((freq, rssi));
                }
            }
            Ok(None) => break,
            Err(e) => {
                warn!("Seek failed: {}", Debug2Format(&e));
                break;
            }
        }
    }

    match best {
        Some((freq, rssi)) => {
            info!("Staying on {}.{} MHz (RSSI {})", freq / 100, freq % 100 / 10, rssi);
            radio.tune(freq).await.expect("tune failed");
        }
        None => info!("No stations found"),
    }

    loop {
        Timer::after(Duration::from_secs(5)).await;
        if let Ok(rssi) = radio.rssi().await {
            info!("RSSI {}", rssi);
        }
    }
}
