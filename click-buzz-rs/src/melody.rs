//! Cancellable melody playback.
//!
//! [`MelodyPlayer::run`] is a plain `async fn`; applications spawn it from
//! a thin task and cancel it by signalling the stop flag.

use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::signal::Signal;
use embassy_time::Duration;
use embedded_hal_async::delay::DelayNs;

use crate::buzzer::{duration_us, Buzzer, PwmTone};
use crate::error::BuzzError;
use crate::notes::REST;

/// One note of a melody. A frequency of [`REST`] is silence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Note {
    pub frequency_hz: u32,
    pub duration: Duration,
}

impl Note {
    pub const fn new(frequency_hz: u32, duration: Duration) -> Self {
        Self { frequency_hz, duration }
    }

    pub const fn rest(duration: Duration) -> Self {
        Self { frequency_hz: REST, duration }
    }
}

/// How a playback run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlaybackEnd {
    /// Every note was played.
    Finished,
    /// The stop flag was raised first.
    Stopped,
}

/// Playback settings.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// Volume for every note, 0..=100 %.
    pub volume: u8,
    /// Silence inserted after each note so repeated notes stay distinct.
    pub gap: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            volume: 50,
            gap: Duration::from_millis(20),
        }
    }
}

/// Plays `&[Note]` sequences on a [`Buzzer`].
pub struct MelodyPlayer {
    config: Config,
}

impl MelodyPlayer {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Play `melody` to the end or until `stop` is signalled.
    ///
    /// The flag is checked before every note and raced against each note's
    /// wait, so a stop cuts the current note short. A stop consumed here is
    /// reset so the flag can be reused. The buzzer is always left silent.
    pub async fn run<P, D, M>(
        &self,
        buzzer: &mut Buzzer<P, D>,
        melody: &[Note],
        stop: &Signal<M, ()>,
    ) -> Result<PlaybackEnd, BuzzError<P::Error>>
    where
        P: PwmTone,
        D: DelayNs,
        M: RawMutex,
    {
        if self.config.volume > crate::buzzer::MAX_VOLUME {
            return Err(BuzzError::InvalidVolume(self.config.volume));
        }

        for note in melody {
            if stop.signaled() {
                stop.reset();
                return self.stopped(buzzer);
            }

            buzzer.start_tone(note.frequency_hz, self.config.volume)?;
            if wait_or_stop(&mut buzzer.delay, note.duration, stop).await {
                return self.stopped(buzzer);
            }
            buzzer.stop()?;

            if self.config.gap > Duration::from_ticks(0)
                && wait_or_stop(&mut buzzer.delay, self.config.gap, stop).await
            {
                return self.stopped(buzzer);
            }
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("Melody finished ({} notes)", melody.len());
        Ok(PlaybackEnd::Finished)
    }

    fn stopped<P: PwmTone, D: DelayNs>(
        &self,
        buzzer: &mut Buzzer<P, D>,
    ) -> Result<PlaybackEnd, BuzzError<P::Error>> {
        buzzer.stop()?;
        #[cfg(feature = "defmt")]
        defmt::debug!("Melody stopped");
        Ok(PlaybackEnd::Stopped)
    }
}

/// Returns `true` if `stop` fired before `duration` elapsed.
async fn wait_or_stop<D: DelayNs, M: RawMutex>(
    delay: &mut D,
    duration: Duration,
    stop: &Signal<M, ()>,
) -> bool {
    match select(delay.delay_us(duration_us(duration)), stop.wait()).await {
        Either::First(()) => false,
        Either::Second(()) => true,
    }
}
