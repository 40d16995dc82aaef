//! Piezo buzzer on a PWM output.

use embassy_time::Duration;
use embedded_hal::pwm::SetDutyCycle;
use embedded_hal_async::delay::DelayNs;

use crate::error::BuzzError;

/// A PWM channel whose frequency can be changed at runtime.
///
/// `embedded-hal` only covers the duty cycle; HALs expose the period
/// through their own types, so boards implement this on a thin wrapper.
pub trait PwmTone: SetDutyCycle {
    /// Retune the channel to `hz`. Implementations should keep the duty
    /// cycle ratio or leave the output off.
    fn set_frequency(&mut self, hz: u32) -> Result<(), Self::Error>;
}

/// Loudest volume, in percent.
pub const MAX_VOLUME: u8 = 100;

/// Volume maps linearly onto 0..=50 % duty; a square wave is loudest at half
/// duty.
pub(crate) fn duty_percent(volume: u8) -> u8 {
    volume / 2
}

/// Driver for the BUZZ Click.
pub struct Buzzer<P, D> {
    pub(crate) pwm: P,
    pub(crate) delay: D,
}

impl<P, D> Buzzer<P, D>
where
    P: PwmTone,
    D: DelayNs,
{
    /// Wrap a PWM channel. The output is not touched until the first tone.
    pub fn new(pwm: P, delay: D) -> Self {
        Self { pwm, delay }
    }

    /// Start a tone and return immediately.
    ///
    /// A frequency of `0` or a volume of `0` silences the output.
    pub fn start_tone(&mut self, hz: u32, volume: u8) -> Result<(), BuzzError<P::Error>> {
        if volume > MAX_VOLUME {
            return Err(BuzzError::InvalidVolume(volume));
        }
        if hz == 0 || volume == 0 {
            self.pwm.set_duty_cycle_fully_off()?;
            return Ok(());
        }
        self.pwm.set_frequency(hz)?;
        self.pwm.set_duty_cycle_percent(duty_percent(volume))?;
        Ok(())
    }

    /// Sound `hz` at `volume` percent for `duration`, then go silent.
    pub async fn play_tone(
        &mut self,
        hz: u32,
        duration: Duration,
        volume: u8,
    ) -> Result<(), BuzzError<P::Error>> {
        self.start_tone(hz, volume)?;
        self.delay.delay_us(duration_us(duration)).await;
        self.stop()
    }

    /// Silence the output.
    pub fn stop(&mut self) -> Result<(), BuzzError<P::Error>> {
        self.pwm.set_duty_cycle_fully_off()?;
        Ok(())
    }

    pub fn release(self) -> (P, D) {
        (self.pwm, self.delay)
    }
}

pub(crate) fn duration_us(duration: Duration) -> u32 {
    u32::try_from(duration.as_micros()).unwrap_or(u32::MAX)
}
