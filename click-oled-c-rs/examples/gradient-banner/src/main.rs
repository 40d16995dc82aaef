//! Gradient banner example
//!
//! Paints a vertical gradient with a caption drawn through the
//! `embedded-graphics` [`DrawTarget`] impl, then bounces a ball along a
//! band near the bottom of the panel. Each frame restores the band from a
//! saved copy of the background and pushes only that band to the panel.
//!
//! # Wiring
//!
//! | Signal     | Pico 2 Pin | Notes              |
//! |------------|------------|--------------------|
//! | SPI0 SCK   | GP18       |                    |
//! | SPI0 MOSI  | GP19       | panel is write-only |
//! | OLED CS    | GP17       |                    |
//! | OLED DC    | GP20       |                    |
//! | OLED RST   | GP21       |                    |

#![no_std]
#![no_main]

use defmt::*;
use embassy_embedded_hal::shared_bus::asynch::spi::SpiDevice;
use embassy_executor::Spawner;
use embassy_rp as hal;
use embassy_rp::block::ImageDef;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::spi::{self, Spi};
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_time::{Delay, Duration, Timer};
use {defmt_rtt as _, panic_probe as _};

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Alignment, Text};

use click_oled_c::{Canvas, Color, Config, Direction, OledC, Rect};

/// Tell the Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = hal::block::ImageDef::secure_exe();

const BAND: Rect = Rect::new(0, 62, 96, 22);
const BALL_RADIUS: i32 = 10;

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    info!("Gradient banner example starting");

    let mut config = spi::Config::default();
    config.frequency = 16_000_000;
    let spi = Spi::new_txonly(p.SPI0, p.PIN_18, p.PIN_19, p.DMA_CH0, config);
    let bus = Mutex::<NoopRawMutex, _>::new(spi);
    let device = SpiDevice::new(&bus, Output::new(p.PIN_17, Level::High));

    let dc = Output::new(p.PIN_20, Level::Low);
    let rst = Output::new(p.PIN_21, Level::High);
    let mut oled = OledC::new(device, dc, rst, Delay, Config::default());

    oled.init().await.expect("OLED init failed");
    info!("OLED initialised");

    let mut canvas = Canvas::new(96, 96);
    canvas.fill_gradient(Rect::new(0, 0, 96, 96), Color::BLUE, Color::BLACK, Direction::Vertical);
    canvas.draw_rectangle(Rect::new(0, 0, 96, 96), Color::CYAN);
    let style = MonoTextStyle::new(&FONT_6X10, Rgb565::WHITE);
    Text::with_alignment("OLED C", Point::new(48, 24), style, Alignment::Center)
        .draw(&mut canvas)
        .ok();
    oled.flush(&canvas).await.ok();

    let background = canvas.clone();
    let mut x = BALL_RADIUS;
    let mut step = 2;

    loop {
        canvas.set_clipping_region(BAND);
        canvas.draw_image(&background, 0, 0);
        canvas.fill_circle(x, 73, BALL_RADIUS, Color::YELLOW);
        canvas.reset_clipping_region();

        oled.flush_region(&canvas, BAND).await.ok();

        if x + step < BALL_RADIUS || x + step > 95 - BALL_RADIUS {
            step = -step;
        }
        x += step;

        Timer::after(Duration::from_millis(33)).await; // ~30 Hz
    }
}
