//! Equal-tempered note frequencies (A4 = 440 Hz), rounded to whole hertz.

/// Frequency in hertz of a MIDI note number, rounded to the nearest hertz.
///
/// MIDI 69 is A4. Numbers above 127 are clamped.
pub fn from_midi(note: u8) -> u32 {
    let semitones = f32::from(note.min(127)) - 69.0;
    libm::roundf(440.0 * libm::powf(2.0, semitones / 12.0)) as u32
}

pub const C3: u32 = 131;
pub const CS3: u32 = 139;
pub const D3: u32 = 147;
pub const DS3: u32 = 156;
pub const E3: u32 = 165;
pub const F3: u32 = 175;
pub const FS3: u32 = 185;
pub const G3: u32 = 196;
pub const GS3: u32 = 208;
pub const A3: u32 = 220;
pub const AS3: u32 = 233;
pub const B3: u32 = 247;

pub const C4: u32 = 262;
pub const CS4: u32 = 277;
pub const D4: u32 = 294;
pub const DS4: u32 = 311;
pub const E4: u32 = 330;
pub const F4: u32 = 349;
pub const FS4: u32 = 370;
pub const G4: u32 = 392;
pub const GS4: u32 = 415;
pub const A4: u32 = 440;
pub const AS4: u32 = 466;
pub const B4: u32 = 494;

pub const C5: u32 = 523;
pub const CS5: u32 = 554;
pub const D5: u32 = 587;
pub const DS5: u32 = 622;
pub const E5: u32 = 659;
pub const F5: u32 = 698;
pub const FS5: u32 = 740;
pub const G5: u32 = 784;
pub const GS5: u32 = 831;
pub const A5: u32 = 880;
pub const AS5: u32 = 932;
pub const B5: u32 = 988;

pub const C6: u32 = 1047;
pub const CS6: u32 = 1109;
pub const D6: u32 = 1175;
pub const DS6: u32 = 1245;
pub const E6: u32 = 1319;
pub const F6: u32 = 1397;
pub const FS6: u32 = 1480;
pub const G6: u32 = 1568;
pub const GS6: u32 = 1661;
pub const A6: u32 = 1760;
pub const AS6: u32 = 1865;
pub const B6: u32 = 1976;

/// Silence.
pub const REST: u32 = 0;
