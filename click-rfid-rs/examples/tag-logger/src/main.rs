//! Tag logger example
//!
//! Polls the RFID Click for ISO 14443-A tags and logs each UID when a tag
//! arrives. A button pauses polling, which switches the RF field off;
//! pressing it again restarts the same poller.
//!
//! # Wiring
//!
//! | Signal     | Pico 2 Pin | Notes                   |
//! |------------|------------|-------------------------|
//! | SPI0 SCK   | GP18       |                         |
//! | SPI0 MOSI  | GP19       |                         |
//! | SPI0 MISO  | GP16       |                         |
//! | CR95HF CS  | GP17       |                         |
//! | IRQ_IN     | GP20       | wake pulse              |
//! | Button     | GP15       | to GND, internal pull-up |

#![no_std]
#![no_main]

use core::pin::pin;

use defmt::*;
use embassy_embedded_hal::shared_bus::asynch::spi::SpiDevice;
use embassy_executor::Spawner;
use embassy_futures::select::{select, Either};
use embassy_rp as hal;
use embassy_rp::block::ImageDef;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::spi::{self, Spi};
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_sync::signal::Signal;
use embassy_time::{Delay, Duration, Timer};
use {defmt_rtt as _, panic_probe as _};

use click_rfid::{Cr95hf, TagPoller};

/// Tell the Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = hal::block::ImageDef::secure_exe();

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    info!("Tag logger example starting");

    let mut config = spi::Config::default();
    config.frequency = 2_000_000;
    let spi = Spi::new(
        p.SPI0, p.PIN_18, p.PIN_19, p.PIN_16, p.DMA_CH0, p.DMA_CH1, config,
    );
    let bus = Mutex::<NoopRawMutex, _>::new(spi);
    let device = SpiDevice::new(&bus, Output::new(p.PIN_17, Level::High));
    let irq_in = Output::new(p.PIN_20, Level::High);

    let mut reader = Cr95hf::new(device, irq_in, Delay, Default::default());
    let idn = reader.init().await.expect("CR95HF init failed");
    info!("Reader {} (ROM CRC 0x{:04X})", idn.name.as_str(), idn.rom_crc);

    let mut button = Input::new(p.PIN_15, Pull::Up);
    let stop = Signal::<NoopRawMutex, ()>::new();
    let mut poller = TagPoller::new(reader, Default::default());
    let mut count = 0u32;

    loop {
        info!("Polling; press the button to pause");
        let mut run = pin!(poller.run(&stop, |uid| {
            count += 1;
            info!("Tag {} (#{})", uid, count);
        }));
        let press = async {
            button.wait_for_falling_edge().await;
            stop.signal(());
        };
        // The poller sees the stop flag and switches the field off itself.
        let result = match select(&mut run, press).await {
            Either::First(result) => result,
            Either::Second(()) => run.await,
        };
        if let Err(e) = result {
            error!("Poller failed: {}", Debug2Format(&e));
            return;
        }

        info!("Paused with the field off; press again to resume");
        Timer::after(Duration::from_millis(200)).await;
        button.wait_for_falling_edge().await;
        Timer::after(Duration::from_millis(200)).await;
    }
}
