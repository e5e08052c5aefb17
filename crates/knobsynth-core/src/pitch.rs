//! Keyboard character to pitch mapping.
//!
//! Two octaves laid out on two rows of a typing keyboard: the home row
//! carries the natural notes, the row above it the accidentals.
//!
//! ```text
//!   w e   t y u   o p
//!  a s d f g h j k l ;
//! ```
//!
//! Any other character plays [`Pitch::A3`].

/// A playable pitch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Pitch {
    /// 220 Hz, also the fallback for unmapped characters
    #[default]
    A3,
    /// 233.08 Hz
    ASharp3,
    /// 246.94 Hz
    B3,
    /// 261.626 Hz
    C3,
    /// 277.183 Hz
    CSharp3,
    /// 293.665 Hz
    D3,
    /// 311.127 Hz
    DSharp3,
    /// 329.628 Hz
    E3,
    /// 349.228 Hz
    F3,
    /// 369.994 Hz
    FSharp3,
    /// 391.995 Hz
    G3,
    /// 415.305 Hz
    GSharp3,
    /// 440 Hz
    A4,
    /// 466.164 Hz
    ASharp4,
    /// 493.883 Hz
    B4,
    /// 523.251 Hz
    C4,
    /// 554.365 Hz
    CSharp4,
    /// 587.330 Hz
    D4,
    /// 622.254 Hz
    DSharp4,
    /// 659.255 Hz
    E4,
}

/// Character bindings, in keyboard order.
pub const KEYMAP: [(u8, Pitch); 17] = [
    (b'a', Pitch::C3),
    (b'w', Pitch::CSharp3),
    (b's', Pitch::D3),
    (b'e', Pitch::DSharp3),
    (b'd', Pitch::E3),
    (b'f', Pitch::F3),
    (b't', Pitch::FSharp3),
    (b'g', Pitch::G3),
    (b'y', Pitch::GSharp3),
    (b'h', Pitch::A4),
    (b'u', Pitch::ASharp4),
    (b'j', Pitch::B4),
    (b'k', Pitch::C4),
    (b'o', Pitch::CSharp4),
    (b'l', Pitch::D4),
    (b'p', Pitch::DSharp4),
    (b';', Pitch::E4),
];

impl Pitch {
    /// Maps a keyboard byte to its pitch, falling back to [`Pitch::A3`].
    pub fn from_byte(byte: u8) -> Self {
        KEYMAP
            .iter()
            .find(|(key, _)| *key == byte)
            .map(|&(_, pitch)| pitch)
            .unwrap_or_default()
    }

    /// Fundamental frequency in Hz.
    pub fn frequency(self) -> f32 {
        match self {
            Pitch::A3 => 220.0,
            Pitch::ASharp3 => 233.08,
            Pitch::B3 => 246.94,
            Pitch::C3 => 261.626,
            Pitch::CSharp3 => 277.183,
            Pitch::D3 => 293.665,
            Pitch::DSharp3 => 311.127,
            Pitch::E3 => 329.628,
            Pitch::F3 => 349.228,
            Pitch::FSharp3 => 369.994,
            Pitch::G3 => 391.995,
            Pitch::GSharp3 => 415.305,
            Pitch::A4 => 440.0,
            Pitch::ASharp4 => 466.164,
            Pitch::B4 => 493.883,
            Pitch::C4 => 523.251,
            Pitch::CSharp4 => 554.365,
            Pitch::D4 => 587.330,
            Pitch::DSharp4 => 622.254,
            Pitch::E4 => 659.255,
        }
    }

    /// Note name, sharps written with `#`.
    pub fn name(self) -> &'static str {
        match self {
            Pitch::A3 => "A3",
            Pitch::ASharp3 => "A#3",
            Pitch::B3 => "B3",
            Pitch::C3 => "C3",
            Pitch::CSharp3 => "C#3",
            Pitch::D3 => "D3",
            Pitch::DSharp3 => "D#3",
            Pitch::E3 => "E3",
            Pitch::F3 => "F3",
            Pitch::FSharp3 => "F#3",
            Pitch::G3 => "G3",
            Pitch::GSharp3 => "G#3",
            Pitch::A4 => "A4",
            Pitch::ASharp4 => "A#4",
            Pitch::B4 => "B4",
            Pitch::C4 => "C4",
            Pitch::CSharp4 => "C#4",
            Pitch::D4 => "D4",
            Pitch::DSharp4 => "D#4",
            Pitch::E4 => "E4",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_row_keys() {
        assert_eq!(Pitch::from_byte(b'a'), Pitch::C3);
        assert_eq!(Pitch::from_byte(b'k'), Pitch::C4);
        assert_eq!(Pitch::from_byte(b';'), Pitch::E4);
    }

    #[test]
    fn unmapped_falls_back_to_a3() {
        assert_eq!(Pitch::from_byte(b'z'), Pitch::A3);
        assert_eq!(Pitch::from_byte(b' '), Pitch::A3);
        assert_eq!(Pitch::from_byte(0xFF), Pitch::A3);
        assert_eq!(Pitch::from_byte(b'A'), Pitch::A3);
    }

    #[test]
    fn keymap_ascends_in_pitch() {
        for pair in KEYMAP.windows(2) {
            assert!(
                pair[1].1.frequency() > pair[0].1.frequency(),
                "{} should be above {}",
                pair[1].1.name(),
                pair[0].1.name()
            );
        }
    }

    #[test]
    fn octave_doubles_frequency() {
        let ratio = Pitch::C4.frequency() / Pitch::C3.frequency();
        assert!((ratio - 2.0).abs() < 1e-3);
        let ratio = Pitch::A4.frequency() / Pitch::A3.frequency();
        assert!((ratio - 2.0).abs() < 1e-6);
    }

    #[test]
    fn keymap_has_no_duplicate_characters() {
        for (i, (a, _)) in KEYMAP.iter().enumerate() {
            for (b, _) in &KEYMAP[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
