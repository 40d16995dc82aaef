//! Cancellable tag polling loop.

use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::signal::Signal;
use embassy_time::Duration;
use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::spi::SpiDevice;

use crate::cr95hf::{Cr95hf, Uid};
use crate::error::RfidError;

#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// Pause between two detection rounds.
    pub interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self { interval: Duration::from_millis(100) }
    }
}

/// Polls an initialised [`Cr95hf`] and reports each tag once per visit.
///
/// A UID is reported when it first appears and again only after a round
/// in which it was absent.
pub struct TagPoller<SPI, IRQ, D> {
    reader: Cr95hf<SPI, IRQ, D>,
    config: Config,
    last: Option<Uid>,
}

impl<SPI, IRQ, D> TagPoller<SPI, IRQ, D>
where
    SPI: SpiDevice,
    IRQ: OutputPin,
    D: DelayNs,
{
    pub fn new(reader: Cr95hf<SPI, IRQ, D>, config: Config) -> Self {
        Self { reader, config, last: None }
    }

    /// Poll until `stop` is signalled, calling `on_tag` for each new UID.
    ///
    /// The configured protocol is selected first, so a poller stopped by an
    /// earlier call can simply be run again. Protocol errors (bad BCC,
    /// malformed frames, chip error codes) count as an empty round. Bus and
    /// pin errors end the loop. The RF field is switched off before
    /// returning `Ok`.
    pub async fn run<M, F>(
        &mut self,
        stop: &Signal<M, ()>,
        mut on_tag: F,
    ) -> Result<(), RfidError<SPI::Error, IRQ::Error>>
    where
        M: RawMutex,
        F: FnMut(Uid),
    {
        self.reader.field_on().await?;

        loop {
            if stop.signaled() {
                stop.reset();
                break;
            }

            let seen = match self.reader.detect_tag().await {
                Ok(seen) => seen,
                Err(e) if e.is_transport() || matches!(e, RfidError::NotInitialized) => {
                    return Err(e)
                }
                Err(_) => {
                    #[cfg(feature = "defmt")]
                    defmt::debug!("RFID poll round failed");
                    None
                }
            };

            if let Some(uid) = seen {
                if self.last != Some(uid) {
                    #[cfg(feature = "defmt")]
                    defmt::info!("Tag {}", uid);
                    on_tag(uid);
                }
            }
            self.last = seen;

            let wait = self.reader.delay.delay_us(interval_us(self.config.interval));
            if let Either::Second(()) = select(wait, stop.wait()).await {
                break;
            }
        }

        self.last = None;
        self.reader.field_off().await
    }

    pub fn release(self) -> Cr95hf<SPI, IRQ, D> {
        self.reader
    }
}

fn interval_us(interval: Duration) -> u32 {
    u32::try_from(interval.as_micros()).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cr95hf::tests::{exchange, init_transactions, tag_round, wake_pin, TAG};
    use crate::cr95hf::Config as ReaderConfig;
    use crate::registers::{CMD_PROTOCOL_SELECT, RESULT_OK};
    use embassy_futures::block_on;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use embedded_hal_mock::eh1::digital::{Mock as PinMock, Transaction as PinTransaction};
    use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction};

    const FIELD_ON: [u8; 5] = [0x00, CMD_PROTOCOL_SELECT, 0x02, 0x02, 0x00];
    const FIELD_OFF: [u8; 5] = [0x00, CMD_PROTOCOL_SELECT, 0x02, 0x00, 0x00];

    /// Delay that raises the stop flag every `stop_every` poll intervals,
    /// ignoring the short waits made during init.
    struct CountingDelay<'a> {
        stop: &'a Signal<NoopRawMutex, ()>,
        interval_ns: u32,
        rounds: usize,
        stop_every: usize,
    }

    impl DelayNs for CountingDelay<'_> {
        async fn delay_ns(&mut self, ns: u32) {
            if ns == self.interval_ns {
                self.rounds += 1;
                if self.rounds % self.stop_every == 0 {
                    self.stop.signal(());
                }
            }
        }
    }

    #[test]
    fn reports_each_visit_once() {
        const OTHER: [u8; 4] = [0x04, 0x11, 0x22, 0x33];
        let mut t = init_transactions();
        t.extend(exchange(&FIELD_ON, RESULT_OK, &[], 0));
        t.extend(tag_round(Some(TAG)));
        t.extend(tag_round(Some(TAG)));
        t.extend(tag_round(None));
        t.extend(tag_round(Some(TAG)));
        t.extend(tag_round(Some(OTHER)));
        t.extend(exchange(&FIELD_OFF, RESULT_OK, &[], 0));

        let stop = Signal::<NoopRawMutex, ()>::new();
        let interval = Duration::from_millis(50);
        let delay = CountingDelay {
            stop: &stop,
            interval_ns: 50_000_000,
            rounds: 0,
            stop_every: 5,
        };
        let mut reader = Cr95hf::new(SpiMock::new(&t), wake_pin(), delay, ReaderConfig::default());
        block_on(reader.init()).unwrap();

        let mut poller = TagPoller::new(reader, Config { interval });
        let mut seen = Vec::new();
        block_on(poller.run(&stop, |uid| seen.push(uid))).unwrap();

        assert_eq!(seen, vec![Uid(TAG), Uid(TAG), Uid(OTHER)]);
        assert!(!stop.signaled());

        let (mut spi, mut irq, delay) = poller.release().release();
        assert_eq!(delay.rounds, 5);
        spi.done();
        irq.done();
    }

    #[test]
    fn stop_before_first_round_sends_no_request() {
        let mut t = init_transactions();
        t.extend(exchange(&FIELD_ON, RESULT_OK, &[], 0));
        t.extend(exchange(&FIELD_OFF, RESULT_OK, &[], 0));

        let stop = Signal::<NoopRawMutex, ()>::new();
        let delay = CountingDelay { stop: &stop, interval_ns: 1, rounds: 0, stop_every: 1 };
        let mut reader = Cr95hf::new(SpiMock::new(&t), wake_pin(), delay, ReaderConfig::default());
        block_on(reader.init()).unwrap();

        stop.signal(());
        let mut poller = TagPoller::new(reader, Config::default());
        let mut calls = 0;
        block_on(poller.run(&stop, |_| calls += 1)).unwrap();
        assert_eq!(calls, 0);

        let (mut spi, mut irq, _) = poller.release().release();
        spi.done();
        irq.done();
    }

    #[test]
    fn restarted_poller_turns_the_field_back_on() {
        let mut t = init_transactions();
        for _ in 0..2 {
            t.extend(exchange(&FIELD_ON, RESULT_OK, &[], 0));
            t.extend(tag_round(Some(TAG)));
            t.extend(exchange(&FIELD_OFF, RESULT_OK, &[], 0));
        }

        let stop = Signal::<NoopRawMutex, ()>::new();
        let delay = CountingDelay {
            stop: &stop,
            interval_ns: 100_000_000,
            rounds: 0,
            stop_every: 1,
        };
        let mut reader = Cr95hf::new(SpiMock::new(&t), wake_pin(), delay, ReaderConfig::default());
        block_on(reader.init()).unwrap();

        let mut poller = TagPoller::new(reader, Config::default());
        let mut seen = Vec::new();
        block_on(poller.run(&stop, |uid| seen.push(uid))).unwrap();
        block_on(poller.run(&stop, |uid| seen.push(uid))).unwrap();

        // The same tag is a new visit after a restart.
        assert_eq!(seen, vec![Uid(TAG), Uid(TAG)]);

        let (mut spi, mut irq, delay) = poller.release().release();
        assert_eq!(delay.rounds, 2);
        spi.done();
        irq.done();
    }

    #[test]
    fn run_before_init_is_rejected() {
        let none: [Transaction<u8>; 0] = [];
        let pins: [PinTransaction; 0] = [];
        let stop = Signal::<NoopRawMutex, ()>::new();
        let delay = CountingDelay { stop: &stop, interval_ns: 1, rounds: 0, stop_every: 1 };
        let reader = Cr95hf::new(SpiMock::new(&none), PinMock::new(&pins), delay, ReaderConfig::default());

        let mut poller = TagPoller::new(reader, Config::default());
        let result = block_on(poller.run(&stop, |_| {}));
        assert!(matches!(result, Err(RfidError::NotInitialized)));

        let (mut spi, mut irq, _) = poller.release().release();
        spi.done();
        irq.done();
    }
}
