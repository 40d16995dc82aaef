//! Two pressure sensors on one I2C bus behind an embassy mutex.

use click_pressure::dps422::{self, Dps422};
use click_pressure::icp10100::{self, Icp10100};
use embassy_embedded_hal::shared_bus::asynch::i2c::I2cDevice;
use embassy_futures::block_on;
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::mutex::Mutex;
use embedded_hal_mock::eh1::delay::NoopDelay;
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction};

const DPS: u8 = dps422::DEFAULT_ADDRESS;
const ICP: u8 = icp10100::ADDRESS;

fn crc8(data: &[u8]) -> u8 {
    let mut crc = 0xFFu8;
    for byte in data {
        crc ^= byte;
        for _ in 0..8 {
            crc = if crc & 0x80 != 0 { crc << 1 ^ 0x31 } else { crc << 1 };
        }
    }
    crc
}

fn word(value: u16) -> Vec<u8> {
    let [msb, lsb] = value.to_be_bytes();
    vec![msb, lsb, crc8(&[msb, lsb])]
}

#[test]
fn both_sensors_initialise_on_one_bus() {
    let mut expectations = vec![
        // DPS422: id, reset, ready, coefficients, config
        Transaction::write_read(DPS, vec![0x1D], vec![0x0A]),
        Transaction::write(DPS, vec![0x0C, 0x09]),
        Transaction::write_read(DPS, vec![0x08], vec![0xC0]),
        Transaction::write_read(DPS, vec![0x20], vec![0; 3]),
        Transaction::write_read(DPS, vec![0x26], vec![0; 20]),
        Transaction::write(DPS, vec![0x06, 0x00]),
        Transaction::write(DPS, vec![0x07, 0x00]),
        // ICP-10100: id, OTP address, four constants
        Transaction::write_read(ICP, vec![0xEF, 0xC8], word(0x0148)),
        Transaction::write(ICP, vec![0xC5, 0x95, 0x00, 0x66, 0x9C]),
    ];
    for constant in [1u16, 2, 3, 4] {
        expectations.push(Transaction::write_read(ICP, vec![0xC7, 0xF7], word(constant)));
    }

    let bus = Mutex::<NoopRawMutex, _>::new(I2cMock::new(&expectations));

    let mut dps = Dps422::new(
        I2cDevice::new(&bus),
        DPS,
        NoopDelay::new(),
        dps422::Config::default(),
    );
    let mut icp = Icp10100::new(I2cDevice::new(&bus), NoopDelay::new(), icp10100::Config::default());

    block_on(dps.init()).unwrap();
    block_on(icp.init()).unwrap();

    assert_eq!(dps.coefficients().unwrap().c00, 0);
    assert_eq!(icp.calibration().unwrap().constants, [1, 2, 3, 4]);

    drop(dps);
    drop(icp);
    bus.into_inner().done();
}
