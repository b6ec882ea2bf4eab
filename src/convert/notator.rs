//! Formatting of fractional MIDI numbers as canonical note names.

use super::frequency::{check_finite, quantize_midi, QuantizeMode};
use super::grammar::parse_note_name;
use super::spelling::{Accidental, Letter, Microtone, PitchClass, PitchSpelling};
use crate::{Error, Result};

/// Spelling used for each equal-tempered pitch class when formatting.
///
/// Context-free and sharp-preferring: class 1 is always `C#`, never `Db`.
pub const SPELLING_TABLE: [PitchClass; 12] = [
    PitchClass::natural(Letter::C),
    PitchClass::new(Letter::C, Accidental::Sharp),
    PitchClass::natural(Letter::D),
    PitchClass::new(Letter::D, Accidental::Sharp),
    PitchClass::natural(Letter::E),
    PitchClass::natural(Letter::F),
    PitchClass::new(Letter::F, Accidental::Sharp),
    PitchClass::natural(Letter::G),
    PitchClass::new(Letter::G, Accidental::Sharp),
    PitchClass::natural(Letter::A),
    PitchClass::new(Letter::A, Accidental::Sharp),
    PitchClass::natural(Letter::B),
];

/// Largest magnitude accepted for formatting.
const MIDI_LIMIT: f64 = 1.0e9;

/// Output options for note-name formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormatOptions {
    /// Render ±25 cents as `>` / `<` instead of `+25` / `-25`.
    pub eighth_tone_symbols: bool,
}

/// Split a MIDI number into (semitone, cents) with cents in (-50, 50],
/// after rounding to the nearest cent.
pub(crate) fn split_cents(midi: f64) -> Result<(i64, i32)> {
    let midi = check_finite("midi", midi)?;
    // Keeps octave and semitone arithmetic inside i32.
    if midi.abs() > MIDI_LIMIT {
        return Err(Error::InvalidParameter {
            name: "midi",
            value: midi.to_string(),
            reason: "outside the representable octave range",
        });
    }
    let total = (midi * 100.0).round() as i64;
    let mut semitone = total.div_euclid(100);
    let mut cents = total.rem_euclid(100);
    if cents > 50 {
        semitone += 1;
        cents -= 100;
    }
    Ok((semitone, cents as i32))
}

/// Canonical spelling of a fractional MIDI number.
///
/// The value is rounded to the nearest cent and split into a semitone plus a
/// deviation in (-50, 50]. The semitone is spelled from [`SPELLING_TABLE`];
/// octave numbers are not clamped, so very low notes get negative octaves.
pub fn notate(midi: f64, options: FormatOptions) -> Result<PitchSpelling> {
    let (semitone, cents) = split_cents(midi)?;
    let octave = semitone.div_euclid(12) - 1;
    let class = SPELLING_TABLE[semitone.rem_euclid(12) as usize];
    let microtone = match cents {
        25 if options.eighth_tone_symbols => Microtone::EighthUp,
        -25 if options.eighth_tone_symbols => Microtone::EighthDown,
        c => Microtone::from_cents(c),
    };
    Ok(PitchSpelling::new(octave as i32, class, microtone))
}

/// Format a fractional MIDI number as a canonical note name.
///
/// # Example
/// ```
/// use pitchconv::convert::format_midi;
///
/// assert_eq!(format_midi(60.0).unwrap(), "4C");
/// assert_eq!(format_midi(61.2).unwrap(), "4C#+20");
/// assert_eq!(format_midi(60.5).unwrap(), "4C+");
/// assert_eq!(format_midi(60.9).unwrap(), "4C#-10");
/// ```
pub fn format_midi(midi: f64) -> Result<String> {
    format_midi_with(midi, FormatOptions::default())
}

/// [`format_midi`] with explicit output options.
pub fn format_midi_with(midi: f64, options: FormatOptions) -> Result<String> {
    Ok(notate(midi, options)?.to_string())
}

/// Round `midi` onto a grid of `divisions` per semitone and name the result.
///
/// # Returns
/// The rounded note name and the signed cents from its chromatic pitch
/// (without microtone) to `midi`.
///
/// # Example
/// ```
/// use pitchconv::convert::pitch_round;
///
/// assert_eq!(pitch_round(60.1, 1).unwrap(), ("4C".to_string(), 10));
/// assert_eq!(pitch_round(60.75, 4).unwrap(), ("4C#-25".to_string(), -25));
/// ```
pub fn pitch_round(midi: f64, divisions: u32) -> Result<(String, i32)> {
    let rounded = quantize_midi(midi, divisions, QuantizeMode::Round)?;
    let spelling = notate(rounded, FormatOptions::default())?;
    let deviation = midi - spelling.semitone_midi() as f64;
    Ok((spelling.to_string(), (deviation * 100.0).round() as i32))
}

/// Snap the microtone of a note name onto a grid of `divisions` per semitone.
///
/// The written letter and accidental are kept when the snapped deviation
/// stays within a semitone; otherwise the rounded pitch is renamed from
/// [`SPELLING_TABLE`].
///
/// # Example
/// ```
/// use pitchconv::convert::quantize_note_name;
///
/// assert_eq!(quantize_note_name("4A+18", 4).unwrap(), "4A+25");
/// assert_eq!(quantize_note_name("4Db-10", 1).unwrap(), "4Db");
/// assert_eq!(quantize_note_name("4Eb+", 1).unwrap(), "4E");
/// ```
pub fn quantize_note_name(name: &str, divisions: u32) -> Result<String> {
    let spelling = parse_note_name(name)?;
    let cents = f64::from(spelling.microtone.cents()) / 100.0;
    let snapped = quantize_midi(cents, divisions, QuantizeMode::Round)?;
    let snapped = (snapped * 100.0).round() as i32;
    if snapped.abs() >= 100 {
        let midi = quantize_midi(spelling.midi(), divisions, QuantizeMode::Round)?;
        return format_midi(midi);
    }
    let quantized = PitchSpelling {
        microtone: Microtone::from_cents(snapped),
        ..spelling
    };
    Ok(quantized.to_string())
}

/// Octave-independent index of a note on a grid of `divisions` per semitone.
///
/// Enharmonic spellings share an index: with `divisions = 1`, `4C#` and `4Db`
/// are both 1; with `divisions = 2`, `4C+` is 1 and `4C#` is 2.
pub fn pitch_class(name: &str, divisions: u32) -> Result<u64> {
    parse_note_name(name)?.microtone_index(divisions)
}
