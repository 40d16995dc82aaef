//! Speed ramp example
//!
//! Ramps the motor on the DC Motor Click up and down in each direction,
//! brakes between directions and sleeps the bridge for a few seconds at
//! the end of every cycle. A latched fault stops the ramp and puts the
//! bridge to sleep.
//!
//! # Wiring
//!
//! | Signal  | Pico 2 Pin | Notes                |
//! |---------|------------|----------------------|
//! | PWM     | GP0        | slice 0, channel A   |
//! | SEL1    | GP1        |                      |
//! | SEL2    | GP2        |                      |
//! | nSLEEP  | GP3        |                      |
//! | nFAULT  | GP6        | open drain, pulled up |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp as hal;
use embassy_rp::block::ImageDef;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_time::{Delay, Duration, Timer};
use {defmt_rtt as _, panic_probe as _};

use click_dc_motor::{DcMotor, Direction, MAX_SPEED};

/// Tell the Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = hal::block::ImageDef::secure_exe();

/// 150 MHz / 7500 = 20 kHz, above the audible range.
const PWM_TOP: u16 = 7_499;
const STEP: u8 = 5;

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    info!("Speed ramp example starting");

    let mut config = PwmConfig::default();
    config.top = PWM_TOP;
    let (pwm, _) = Pwm::new_output_a(p.PWM_SLICE0, p.PIN_0, config).split();
    let pwm = pwm.expect("channel A");

    let mut motor = DcMotor::new(
        pwm,
        Output::new(p.PIN_1, Level::Low),
        Output::new(p.PIN_2, Level::Low),
        Output::new(p.PIN_3, Level::Low),
        Input::new(p.PIN_6, Pull::Up),
        Delay,
    );

    motor.init().await.expect("DRV8833 wake failed");

    'cycle: loop {
        for direction in [Direction::Clockwise, Direction::CounterClockwise] {
            let up = (0..=MAX_SPEED).step_by(STEP as usize);
            let down = (0..=MAX_SPEED - STEP).rev().step_by(STEP as usize);
            for speed in up.chain(down) {
                motor.drive(direction, speed).expect("drive");
                if motor.is_faulted().unwrap_or(true) {
                    error!("Bridge fault at {} % {}", speed, direction);
                    break 'cycle;
                }
                Timer::after(Duration::from_millis(100)).await;
            }

            motor.brake().expect("brake");
            info!("Braking, state {}", motor.state());
            Timer::after(Duration::from_millis(500)).await;
        }

        motor.sleep().expect("sleep");
        Timer::after(Duration::from_secs(3)).await;
        motor.wake().await.expect("wake");
    }

    motor.sleep().ok();
    loop {
        Timer::after(Duration::from_secs(1)).await;
    }
}
