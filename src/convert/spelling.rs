//! Structured pitch spelling: letter, accidental, octave and microtone.

use std::fmt;
use std::str::FromStr;

use super::frequency::{quantize_midi, QuantizeMode};
use super::grammar::parse_note_name;
use crate::{Error, Result};

/// Semitone offset of each natural letter from C.
const NATURAL_SEMITONES: [i32; 7] = [0, 2, 4, 5, 7, 9, 11];

/// Diatonic letter name, ordered along the C-D-E-F-G-A-B cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    pub const ALL: [Letter; 7] = [
        Letter::C,
        Letter::D,
        Letter::E,
        Letter::F,
        Letter::G,
        Letter::A,
        Letter::B,
    ];

    /// Position in the letter cycle (C = 0 ... B = 6).
    pub fn index(self) -> i32 {
        self as i32
    }

    /// Letter at `index` in the cycle, wrapping in both directions.
    pub fn from_index(index: i64) -> Letter {
        Letter::ALL[index.rem_euclid(7) as usize]
    }

    /// Semitones above C of the natural (unaltered) letter.
    pub fn semitone(self) -> i32 {
        NATURAL_SEMITONES[self as usize]
    }

    /// Case-insensitive lookup.
    pub fn from_char(c: char) -> Option<Letter> {
        match c.to_ascii_uppercase() {
            'C' => Some(Letter::C),
            'D' => Some(Letter::D),
            'E' => Some(Letter::E),
            'F' => Some(Letter::F),
            'G' => Some(Letter::G),
            'A' => Some(Letter::A),
            'B' => Some(Letter::B),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Letter::C => 'C',
            Letter::D => 'D',
            Letter::E => 'E',
            Letter::F => 'F',
            Letter::G => 'G',
            Letter::A => 'A',
            Letter::B => 'B',
        }
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Chromatic alteration of a letter, at most a double sharp or double flat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Accidental {
    DoubleFlat,
    Flat,
    #[default]
    Natural,
    Sharp,
    DoubleSharp,
}

impl Accidental {
    pub fn semitones(self) -> i32 {
        match self {
            Accidental::DoubleFlat => -2,
            Accidental::Flat => -1,
            Accidental::Natural => 0,
            Accidental::Sharp => 1,
            Accidental::DoubleSharp => 2,
        }
    }

    /// `None` when the alteration needs more than a double accidental.
    pub fn from_semitones(semitones: i32) -> Option<Accidental> {
        match semitones {
            -2 => Some(Accidental::DoubleFlat),
            -1 => Some(Accidental::Flat),
            0 => Some(Accidental::Natural),
            1 => Some(Accidental::Sharp),
            2 => Some(Accidental::DoubleSharp),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Accidental::DoubleFlat => "bb",
            Accidental::Flat => "b",
            Accidental::Natural => "",
            Accidental::Sharp => "#",
            Accidental::DoubleSharp => "##",
        }
    }
}

impl fmt::Display for Accidental {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A spelled pitch class. `C#` and `Db` share a semitone but are distinct values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PitchClass {
    pub letter: Letter,
    pub accidental: Accidental,
}

impl PitchClass {
    pub const fn new(letter: Letter, accidental: Accidental) -> Self {
        Self { letter, accidental }
    }

    pub const fn natural(letter: Letter) -> Self {
        Self::new(letter, Accidental::Natural)
    }

    /// Semitones above the C of the same octave. Can fall outside 0-11
    /// (`Cb` is -1, `B#` is 12).
    pub fn semitone(self) -> i32 {
        self.letter.semitone() + self.accidental.semitones()
    }

    /// Equal-tempered pitch class in `0..12`.
    pub fn chromatic_index(self) -> i32 {
        self.semitone().rem_euclid(12)
    }

    pub fn is_black_key(self) -> bool {
        matches!(self.chromatic_index(), 1 | 3 | 6 | 8 | 10)
    }

    pub fn is_white_key(self) -> bool {
        !self.is_black_key()
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.letter, self.accidental)
    }
}

/// Deviation from the spelled semitone.
///
/// The symbolic markers are kept distinct from numeric cents so a parsed
/// name keeps its written form: `4C+` and `4C+50` sound the same but are
/// not equal values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Microtone {
    /// No deviation.
    #[default]
    Exact,
    /// `+`, 50 cents up.
    QuarterUp,
    /// `-`, 50 cents down.
    QuarterDown,
    /// `>`, 25 cents up.
    EighthUp,
    /// `<`, 25 cents down.
    EighthDown,
    /// Explicit signed cents.
    Cents(i32),
}

impl Microtone {
    pub fn cents(self) -> i32 {
        match self {
            Microtone::Exact => 0,
            Microtone::QuarterUp => 50,
            Microtone::QuarterDown => -50,
            Microtone::EighthUp => 25,
            Microtone::EighthDown => -25,
            Microtone::Cents(c) => c,
        }
    }

    /// Canonical microtone for a cents value: zero is dropped and ±50
    /// become quarter-tone markers.
    pub fn from_cents(cents: i32) -> Microtone {
        match cents {
            0 => Microtone::Exact,
            50 => Microtone::QuarterUp,
            -50 => Microtone::QuarterDown,
            c => Microtone::Cents(c),
        }
    }
}

impl fmt::Display for Microtone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Microtone::Exact | Microtone::Cents(0) => Ok(()),
            Microtone::QuarterUp => f.write_str("+"),
            Microtone::QuarterDown => f.write_str("-"),
            Microtone::EighthUp => f.write_str(">"),
            Microtone::EighthDown => f.write_str("<"),
            Microtone::Cents(c) => write!(f, "{c:+}"),
        }
    }
}

/// A parsed note name: octave, spelled pitch class and microtone.
///
/// Octaves change at C, so `4B` is one semitone below `5C` and `4C` is MIDI 60.
///
/// # Example
/// ```
/// use pitchconv::convert::{Accidental, Letter, PitchSpelling};
///
/// let p: PitchSpelling = "4Db-10".parse().unwrap();
/// assert_eq!(p.octave, 4);
/// assert_eq!(p.class.letter, Letter::D);
/// assert_eq!(p.class.accidental, Accidental::Flat);
/// assert!((p.midi() - 60.9).abs() < 1e-9);
/// assert_eq!(p.to_string(), "4Db-10");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PitchSpelling {
    pub octave: i32,
    pub class: PitchClass,
    pub microtone: Microtone,
}

impl PitchSpelling {
    pub const fn new(octave: i32, class: PitchClass, microtone: Microtone) -> Self {
        Self {
            octave,
            class,
            microtone,
        }
    }

    /// Spelling without a microtonal deviation.
    pub const fn chromatic(octave: i32, letter: Letter, accidental: Accidental) -> Self {
        Self::new(octave, PitchClass::new(letter, accidental), Microtone::Exact)
    }

    /// Natural letter at a staff position, the inverse of
    /// [`vertical_position`](Self::vertical_position) (`2` is `0E`).
    pub fn from_vertical_position(position: i64) -> Result<Self> {
        Ok(Self::chromatic(
            octave_of_position(position)?,
            Letter::from_index(position),
            Accidental::Natural,
        ))
    }

    /// MIDI number of the spelled semitone, ignoring the microtone.
    pub fn semitone_midi(&self) -> i64 {
        (i64::from(self.octave) + 1) * 12 + i64::from(self.class.semitone())
    }

    /// Fractional MIDI number including the microtone.
    pub fn midi(&self) -> f64 {
        self.semitone_midi() as f64 + f64::from(self.microtone.cents()) / 100.0
    }

    /// Exact pitch in cents above MIDI 0.
    pub(crate) fn total_cents(&self) -> i64 {
        self.semitone_midi() * 100 + i64::from(self.microtone.cents())
    }

    /// Staff position: `octave * 7 + letter index`. Accidentals do not move it,
    /// so `4G#` and `4G` share a position while `4Ab` sits one higher.
    pub fn vertical_position(&self) -> i64 {
        i64::from(self.octave) * 7 + i64::from(self.class.letter.index())
    }

    /// Written alteration from the natural letter, in cents (`4C#+15` is 115).
    pub fn alteration_cents(&self) -> i64 {
        i64::from(self.class.accidental.semitones()) * 100 + i64::from(self.microtone.cents())
    }

    pub fn is_black_key(&self) -> bool {
        self.class.is_black_key()
    }

    pub fn is_white_key(&self) -> bool {
        self.class.is_white_key()
    }

    /// Position of the pitch on a grid of `divisions` steps per semitone,
    /// counted from C within the octave.
    ///
    /// With quarter tones, `4C` is 0, `4C+` is 1 and both `4C#` and `4Db` are 2.
    pub fn microtone_index(&self, divisions: u32) -> Result<u64> {
        let quantized = quantize_midi(self.midi(), divisions, QuantizeMode::Round)?;
        let steps = 12 * u64::from(divisions);
        let index = (quantized.rem_euclid(12.0) * f64::from(divisions)).round() as u64;
        Ok(index % steps)
    }

    /// Octave-first name with no microtone, e.g. `5C#`.
    pub fn chromatic_name(&self) -> String {
        format!("{}{}", self.octave, self.class)
    }
}

impl fmt::Display for PitchSpelling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.octave, self.class, self.microtone)
    }
}

/// Octave containing a staff position.
pub(crate) fn octave_of_position(position: i64) -> Result<i32> {
    i32::try_from(position.div_euclid(7)).map_err(|_| Error::InvalidParameter {
        name: "octave",
        value: position.div_euclid(7).to_string(),
        reason: "outside the representable octave range",
    })
}

impl FromStr for PitchSpelling {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        parse_note_name(s)
    }
}

/// A transposition interval.
///
/// Both the diatonic and the chromatic size are needed: a minor third and an
/// augmented second are both three semitones but move the letter by two and
/// one steps respectively. `cents` adds an optional microtonal shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interval {
    pub diatonic_steps: i32,
    pub chromatic_semitones: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cents: i32,
}

impl Interval {
    pub const UNISON: Interval = Interval::new(0, 0);
    pub const MINOR_SECOND: Interval = Interval::new(1, 1);
    pub const MAJOR_SECOND: Interval = Interval::new(1, 2);
    pub const AUGMENTED_SECOND: Interval = Interval::new(1, 3);
    pub const MINOR_THIRD: Interval = Interval::new(2, 3);
    pub const MAJOR_THIRD: Interval = Interval::new(2, 4);
    pub const PERFECT_FOURTH: Interval = Interval::new(3, 5);
    pub const AUGMENTED_FOURTH: Interval = Interval::new(3, 6);
    pub const DIMINISHED_FIFTH: Interval = Interval::new(4, 6);
    pub const PERFECT_FIFTH: Interval = Interval::new(4, 7);
    pub const MINOR_SIXTH: Interval = Interval::new(5, 8);
    pub const MAJOR_SIXTH: Interval = Interval::new(5, 9);
    pub const MINOR_SEVENTH: Interval = Interval::new(6, 10);
    pub const MAJOR_SEVENTH: Interval = Interval::new(6, 11);
    pub const OCTAVE: Interval = Interval::new(7, 12);

    pub const fn new(diatonic_steps: i32, chromatic_semitones: i32) -> Self {
        Self {
            diatonic_steps,
            chromatic_semitones,
            cents: 0,
        }
    }

    pub const fn with_cents(self, cents: i32) -> Self {
        Self { cents, ..self }
    }

    /// The same interval in the opposite direction.
    pub const fn inverted(self) -> Self {
        Self {
            diatonic_steps: -self.diatonic_steps,
            chromatic_semitones: -self.chromatic_semitones,
            cents: -self.cents,
        }
    }

    /// Total size in semitones, including the cents part.
    pub fn semitones(&self) -> f64 {
        f64::from(self.chromatic_semitones) + f64::from(self.cents) / 100.0
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:+} steps / {:+} semitones",
            self.diatonic_steps, self.chromatic_semitones
        )?;
        if self.cents != 0 {
            write!(f, " / {:+} cents", self.cents)?;
        }
        Ok(())
    }
}
