//! Doorbell example
//!
//! Plays a short chime on the BUZZ Click each time the bell button is
//! pressed. Pressing it again while the chime is playing cuts it short.
//!
//! The RP2350 PWM slice changes frequency through its `top` register,
//! which `embedded-hal` does not cover; [`SliceTone`] adapts the slice to
//! the driver's [`PwmTone`] trait.
//!
//! # Wiring
//!
//! | Signal   | Pico 2 Pin | Notes                    |
//! |----------|------------|--------------------------|
//! | PWM      | GP0        | slice 0, channel A       |
//! | Button   | GP15       | to GND, internal pull-up |

#![no_std]
#![no_main]

use core::convert::Infallible;
use core::pin::pin;

use defmt::*;
use embassy_executor::Spawner;
use embassy_futures::select::{select, Either};
use embassy_rp as hal;
use embassy_rp::block::ImageDef;
use embassy_rp::clocks::clk_sys_freq;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Delay, Duration, Timer};
use embedded_hal::pwm::{ErrorType, SetDutyCycle};
use {defmt_rtt as _, panic_probe as _};

use click_buzz::notes::{C6, E5, G5};
use click_buzz::{Buzzer, MelodyPlayer, Note, PlaybackEnd, PwmTone};

/// Tell the Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = hal::block::ImageDef::secure_exe();

/// Clock divider; keeps `top` within 16 bits down to ~36 Hz at 150 MHz.
const DIVIDER: u8 = 64;

const CHIME: [Note; 4] = [
    Note::new(G5, Duration::from_millis(180)),
    Note::new(E5, Duration::from_millis(180)),
    Note::new(C6, Duration::from_millis(180)),
    Note::new(G5, Duration::from_millis(400)),
];

/// PWM slice driving the buzzer from channel A.
struct SliceTone<'d> {
    pwm: Pwm<'d>,
    config: PwmConfig,
}

impl ErrorType for SliceTone<'_> {
    type Error = Infallible;
}

impl SetDutyCycle for SliceTone<'_> {
    fn max_duty_cycle(&self) -> u16 {
        self.config.top
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        self.config.compare_a = duty;
        self.pwm.set_config(&self.config);
        Ok(())
    }
}

impl PwmTone for SliceTone<'_> {
    fn set_frequency(&mut self, hz: u32) -> Result<(), Self::Error> {
        let period = (clk_sys_freq() / DIVIDER as u32 / hz.max(1)).clamp(2, 65_536);
        let old_period = self.config.top as u32 + 1;
        let top = period - 1;

        // Keep the duty ratio across the new period.
        self.config.compare_a = (self.config.compare_a as u32 * period / old_period) as u16;
        self.config.top = top as u16;
        self.pwm.set_config(&self.config);
        Ok(())
    }
}

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    info!("Doorbell example starting");

    let mut config = PwmConfig::default();
    config.divider = DIVIDER.into();
    config.top = u16::MAX;
    config.compare_a = 0;
    let pwm = Pwm::new_output_a(p.PWM_SLICE0, p.PIN_0, config.clone());
    let mut buzzer = Buzzer::new(SliceTone { pwm, config }, Delay);

    let mut button = Input::new(p.PIN_15, Pull::Up);
    let stop = Signal::<NoopRawMutex, ()>::new();
    let player = MelodyPlayer::new(Default::default());

    loop {
        button.wait_for_falling_edge().await;
        info!("Ding dong");

        let mut chime = pin!(player.run(&mut buzzer, &CHIME, &stop));
        let press = async {
            // Debounce the press that started the chime.
            Timer::after(Duration::from_millis(150)).await;
            button.wait_for_falling_edge().await;
            stop.signal(());
        };
        // A second press raises the stop flag; the player still runs to
        // its end so the buzzer is left silent.
        let end = match select(&mut chime, press).await {
            Either::First(end) => end,
            Either::Second(()) => chime.await,
        };

        match end {
            Ok(PlaybackEnd::Finished) => {}
            Ok(PlaybackEnd::Stopped) => info!("Cut short"),
            Err(e) => error!("Buzzer: {}", e),
        }
        Timer::after(Duration::from_millis(150)).await;
    }
}
