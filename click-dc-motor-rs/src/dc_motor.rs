//! DRV8833 H-bridge as wired on the DC Motor Click.
//!
//! The click routes the MCU PWM to one of the bridge inputs through two
//! select lines:
//!
//! | SEL1 | SEL2 | bridge state |
//! |------|------|--------------|
//! | 0    | 1    | clockwise, PWM on IN1 |
//! | 1    | 0    | counter-clockwise, PWM on IN2 |
//! | 1    | 1    | short brake |
//! | 0    | 0    | coast (outputs high-Z) |

use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::pwm::SetDutyCycle;
use embedded_hal_async::delay::DelayNs;

use crate::error::MotorError;

/// nSLEEP high to outputs ready (t_WAKE, datasheet max 1 ms).
const WAKE_TIME_US: u32 = 1_000;

pub const MAX_SPEED: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

/// Last state commanded to the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    Sleeping,
    Coasting,
    Braking,
    Driving { direction: Direction, speed: u8 },
}

type MotorResult<T, PWM, OUT> =
    Result<T, MotorError<<PWM as embedded_hal::pwm::ErrorType>::Error, <OUT as embedded_hal::digital::ErrorType>::Error>>;

/// Driver for the DC Motor Click.
pub struct DcMotor<PWM, OUT, FLT, D> {
    pwm: PWM,
    sel1: OUT,
    sel2: OUT,
    nsleep: OUT,
    nfault: FLT,
    delay: D,
    state: State,
}

impl<PWM, OUT, FLT, D> DcMotor<PWM, OUT, FLT, D>
where
    PWM: SetDutyCycle,
    OUT: OutputPin,
    FLT: InputPin<Error = OUT::Error>,
    D: DelayNs,
{
    /// Take ownership of the pins. The bridge is assumed asleep until
    /// [`init()`](Self::init).
    pub fn new(pwm: PWM, sel1: OUT, sel2: OUT, nsleep: OUT, nfault: FLT, delay: D) -> Self {
        Self { pwm, sel1, sel2, nsleep, nfault, delay, state: State::Sleeping }
    }

    /// Wake the bridge and leave the motor coasting.
    pub async fn init(&mut self) -> MotorResult<(), PWM, OUT> {
        self.wake().await?;
        self.coast()?;
        #[cfg(feature = "defmt")]
        defmt::info!("DRV8833 ready");
        Ok(())
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Spin in `direction` at `speed` percent duty.
    ///
    /// # Errors
    ///
    /// [`MotorError::InvalidSpeed`] if `speed > 100`; the bridge is left
    /// untouched.
    pub fn drive(&mut self, direction: Direction, speed: u8) -> MotorResult<(), PWM, OUT> {
        if speed > MAX_SPEED {
            return Err(MotorError::InvalidSpeed(speed));
        }
        let (sel1, sel2) = match direction {
            Direction::Clockwise => (false, true),
            Direction::CounterClockwise => (true, false),
        };
        self.select(sel1, sel2)?;
        self.pwm.set_duty_cycle_percent(speed).map_err(MotorError::Pwm)?;
        self.state = State::Driving { direction, speed };
        Ok(())
    }

    /// Short both motor terminals.
    pub fn brake(&mut self) -> MotorResult<(), PWM, OUT> {
        self.select(true, true)?;
        self.pwm.set_duty_cycle_fully_on().map_err(MotorError::Pwm)?;
        self.state = State::Braking;
        Ok(())
    }

    /// Release both motor terminals.
    pub fn coast(&mut self) -> MotorResult<(), PWM, OUT> {
        self.pwm.set_duty_cycle_fully_off().map_err(MotorError::Pwm)?;
        self.select(false, false)?;
        self.state = State::Coasting;
        Ok(())
    }

    /// Put the bridge into its low-power sleep. Outputs go high-Z.
    pub fn sleep(&mut self) -> MotorResult<(), PWM, OUT> {
        self.pwm.set_duty_cycle_fully_off().map_err(MotorError::Pwm)?;
        self.nsleep.set_low().map_err(MotorError::Pin)?;
        self.state = State::Sleeping;
        Ok(())
    }

    /// Leave sleep and wait for the charge pump. The motor coasts
    /// afterwards.
    pub async fn wake(&mut self) -> MotorResult<(), PWM, OUT> {
        self.nsleep.set_high().map_err(MotorError::Pin)?;
        self.delay.delay_us(WAKE_TIME_US).await;
        if self.state == State::Sleeping {
            self.state = State::Coasting;
        }
        Ok(())
    }

    /// `true` while nFAULT is pulled low (over-current, over-temperature
    /// or under-voltage).
    pub fn is_faulted(&mut self) -> MotorResult<bool, PWM, OUT> {
        let faulted = self.nfault.is_low().map_err(MotorError::Pin)?;
        #[cfg(feature = "defmt")]
        if faulted {
            defmt::warn!("DRV8833 fault");
        }
        Ok(faulted)
    }

    fn select(&mut self, sel1: bool, sel2: bool) -> MotorResult<(), PWM, OUT> {
        self.sel1.set_state(sel1.into()).map_err(MotorError::Pin)?;
        self.sel2.set_state(sel2.into()).map_err(MotorError::Pin)?;
        Ok(())
    }

    pub fn release(self) -> (PWM, OUT, OUT, OUT, FLT, D) {
        (self.pwm, self.sel1, self.sel2, self.nsleep, self.nfault, self.delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embassy_futures::block_on;
    use embedded_hal::pwm::ErrorType;
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::digital::{Mock as PinMock, State as PinState, Transaction};

    #[derive(Default)]
    struct FakePwm {
        duty: u16,
    }

    impl ErrorType for FakePwm {
        type Error = Infallible;
    }

    impl SetDutyCycle for FakePwm {
        fn max_duty_cycle(&self) -> u16 {
            200
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> {
            self.duty = duty;
            Ok(())
        }
    }

    fn set(state: PinState) -> Transaction {
        Transaction::set(state)
    }

    #[test]
    fn init_wakes_and_coasts() {
        let sel1 = PinMock::new(&[set(PinState::Low)]);
        let sel2 = PinMock::new(&[set(PinState::Low)]);
        let nsleep = PinMock::new(&[set(PinState::High)]);
        let none: [Transaction; 0] = [];
        let nfault = PinMock::new(&none);
        let mut motor = DcMotor::new(FakePwm::default(), sel1, sel2, nsleep, nfault, NoopDelay::new());

        assert_eq!(motor.state(), State::Sleeping);
        block_on(motor.init()).unwrap();
        assert_eq!(motor.state(), State::Coasting);

        let (_, mut sel1, mut sel2, mut nsleep, mut nfault, _) = motor.release();
        sel1.done();
        sel2.done();
        nsleep.done();
        nfault.done();
    }

    #[test]
    fn drive_selects_direction_and_duty() {
        let sel1 = PinMock::new(&[set(PinState::Low), set(PinState::High), set(PinState::High)]);
        let sel2 = PinMock::new(&[set(PinState::High), set(PinState::Low), set(PinState::High)]);
        let none: [Transaction; 0] = [];
        let nsleep = PinMock::new(&none);
        let nfault = PinMock::new(&none);
        let mut motor = DcMotor::new(FakePwm::default(), sel1, sel2, nsleep, nfault, NoopDelay::new());

        motor.drive(Direction::Clockwise, 75).unwrap();
        assert_eq!(motor.pwm.duty, 150);
        assert_eq!(
            motor.state(),
            State::Driving { direction: Direction::Clockwise, speed: 75 }
        );

        motor.drive(Direction::CounterClockwise, 100).unwrap();
        assert_eq!(motor.pwm.duty, 200);

        motor.brake().unwrap();
        assert_eq!(motor.state(), State::Braking);

        let (_, mut sel1, mut sel2, mut nsleep, mut nfault, _) = motor.release();
        sel1.done();
        sel2.done();
        nsleep.done();
        nfault.done();
    }

    #[test]
    fn speed_above_100_is_rejected_without_touching_pins() {
        let none: [Transaction; 0] = [];
        let mut motor = DcMotor::new(
            FakePwm::default(),
            PinMock::new(&none),
            PinMock::new(&none),
            PinMock::new(&none),
            PinMock::new(&none),
            NoopDelay::new(),
        );

        assert!(matches!(
            motor.drive(Direction::Clockwise, 101),
            Err(MotorError::InvalidSpeed(101))
        ));
        assert_eq!(motor.state(), State::Sleeping);

        let (_, mut sel1, mut sel2, mut nsleep, mut nfault, _) = motor.release();
        sel1.done();
        sel2.done();
        nsleep.done();
        nfault.done();
    }

    #[test]
    fn sleep_and_fault_pins() {
        let none: [Transaction; 0] = [];
        let nsleep = PinMock::new(&[set(PinState::Low), set(PinState::High)]);
        let nfault = PinMock::new(&[Transaction::get(PinState::High), Transaction::get(PinState::Low)]);
        let mut motor = DcMotor::new(
            FakePwm { duty: 120 },
            PinMock::new(&none),
            PinMock::new(&none),
            nsleep,
            nfault,
            NoopDelay::new(),
        );

        motor.sleep().unwrap();
        assert_eq!(motor.pwm.duty, 0);
        assert_eq!(motor.state(), State::Sleeping);
        block_on(motor.wake()).unwrap();
        assert_eq!(motor.state(), State::Coasting);

        assert!(!motor.is_faulted().unwrap());
        assert!(motor.is_faulted().unwrap());

        let (_, mut sel1, mut sel2, mut nsleep, mut nfault, _) = motor.release();
        sel1.done();
        sel2.done();
        nsleep.done();
        nfault.done();
    }
}
