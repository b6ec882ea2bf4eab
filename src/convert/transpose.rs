//! Spelling-aware transposition and enharmonic respelling.

use log::trace;

use super::grammar::parse_note_name;
use super::spelling::{
    octave_of_position, Accidental, Interval, Letter, Microtone, PitchClass, PitchSpelling,
};
use crate::{Error, Result};

/// Transpose a spelled pitch by a diatonic + chromatic interval.
///
/// The letter moves by `interval.diatonic_steps` around C-D-E-F-G-A-B
/// (adjusting the octave when it wraps), and the accidental is whatever
/// makes the new letter land `interval.chromatic_semitones` away from the
/// original pitch. The microtone is carried over unchanged unless the
/// interval has a cents part, in which case the sum is folded back into
/// [-50, 50] by borrowing whole semitones.
///
/// # Errors
/// [`Error::UnrepresentableAccidental`] if the result would need more than a
/// double sharp or double flat, [`Error::InvalidParameter`] if the octave
/// leaves the `i32` range.
///
/// # Example
/// ```
/// use pitchconv::convert::{parse_note_name, transpose, Interval};
///
/// let c4 = parse_note_name("4C").unwrap();
/// let up = transpose(&c4, Interval::MINOR_THIRD).unwrap();
/// assert_eq!(up.to_string(), "4Eb");
///
/// let aug = transpose(&c4, Interval::AUGMENTED_SECOND).unwrap();
/// assert_eq!(aug.to_string(), "4D#");
/// ```
pub fn transpose(spelling: &PitchSpelling, interval: Interval) -> Result<PitchSpelling> {
    let position = spelling.vertical_position() + i64::from(interval.diatonic_steps);
    let octave = octave_of_position(position)?;
    let letter = Letter::from_index(position);

    let mut semitones = i64::from(interval.chromatic_semitones);
    let microtone = if interval.cents == 0 {
        spelling.microtone
    } else {
        let cents = i64::from(spelling.microtone.cents()) + i64::from(interval.cents);
        let (carry, cents) = fold_cents(cents);
        semitones += carry;
        Microtone::from_cents(cents)
    };

    let target = spelling.semitone_midi() + semitones;
    let natural = (i64::from(octave) + 1) * 12 + i64::from(letter.semitone());
    let alteration = target - natural;
    let accidental = accidental_for(letter, alteration).inspect_err(|_| {
        trace!("transposing {spelling} by {interval} needs {alteration} semitones on {letter}");
    })?;

    Ok(PitchSpelling::new(
        octave,
        PitchClass::new(letter, accidental),
        microtone,
    ))
}

/// Parse a note name, transpose it and render the resulting spelling.
///
/// # Example
/// ```
/// use pitchconv::convert::{transpose_note_name, Interval};
///
/// assert_eq!(transpose_note_name("4Db", Interval::MAJOR_SECOND).unwrap(), "4Eb");
/// assert_eq!(transpose_note_name("4C#", Interval::MAJOR_SECOND).unwrap(), "4D#");
/// ```
pub fn transpose_note_name(name: &str, interval: Interval) -> Result<String> {
    let spelling = parse_note_name(name)?;
    Ok(transpose(&spelling, interval)?.to_string())
}

/// Split a cents sum into whole semitones and a residual in [-50, 50].
fn fold_cents(cents: i64) -> (i64, i32) {
    let carry = if cents > 50 {
        (cents + 49).div_euclid(100)
    } else if cents < -50 {
        -(-cents + 49).div_euclid(100)
    } else {
        0
    };
    (carry, (cents - carry * 100) as i32)
}

fn accidental_for(letter: Letter, alteration: i64) -> Result<Accidental> {
    i32::try_from(alteration)
        .ok()
        .and_then(Accidental::from_semitones)
        .ok_or(Error::UnrepresentableAccidental {
            letter: letter.as_char(),
            alteration,
        })
}

impl PitchSpelling {
    /// This spelling moved by `interval`. See [`transpose`].
    pub fn transposed(&self, interval: Interval) -> Result<PitchSpelling> {
        transpose(self, interval)
    }

    /// Spell the same pitch from the neighbouring letter.
    ///
    /// Only spellings whose written alteration is at least 50 cents are
    /// respelled: upward alterations move to the letter above, downward ones
    /// to the letter below. When two accidentals fit equally well, the one
    /// with the smaller alteration wins.
    ///
    /// # Example
    /// ```
    /// use pitchconv::convert::PitchSpelling;
    ///
    /// let respell = |s: &str| s.parse::<PitchSpelling>().unwrap().enharmonic().unwrap().to_string();
    /// assert_eq!(respell("4C#"), "4Db");
    /// assert_eq!(respell("4C+"), "4Db-");
    /// assert_eq!(respell("4C-"), "3B+");
    /// assert_eq!(respell("4E+25"), "4E+25");
    /// ```
    pub fn enharmonic(&self) -> Result<PitchSpelling> {
        let alteration = self.alteration_cents();
        let direction = if alteration >= 50 {
            1
        } else if alteration <= -50 {
            -1
        } else {
            return Ok(*self);
        };

        let position = self.vertical_position() + direction;
        let octave = octave_of_position(position)?;
        let letter = Letter::from_index(position);
        let natural = ((i64::from(octave) + 1) * 12 + i64::from(letter.semitone())) * 100;
        let (semitones, cents) = nearest_alteration(self.total_cents() - natural);
        let accidental = accidental_for(letter, semitones)?;

        Ok(PitchSpelling::new(
            octave,
            PitchClass::new(letter, accidental),
            Microtone::from_cents(cents),
        ))
    }
}

/// Accidental (in semitones) and residual cents in [-50, 50] for a distance
/// from a natural letter. Exact quarter tones prefer the smaller accidental.
fn nearest_alteration(cents: i64) -> (i64, i32) {
    let lower = cents.div_euclid(100);
    let rest = cents.rem_euclid(100);
    let semitones = match rest {
        r if r < 50 => lower,
        r if r > 50 => lower + 1,
        _ if lower.abs() <= (lower + 1).abs() => lower,
        _ => lower + 1,
    };
    (semitones, (cents - semitones * 100) as i32)
}

impl Interval {
    /// The interval that takes `from` to `to`, so that
    /// `transpose(from, Interval::between(from, to)?)` spells `to`.
    ///
    /// Fails when a component does not fit in `i32`.
    ///
    /// # Example
    /// ```
    /// use pitchconv::convert::{Interval, PitchSpelling};
    ///
    /// let c: PitchSpelling = "4C".parse().unwrap();
    /// let db: PitchSpelling = "4Db".parse().unwrap();
    /// assert_eq!(Interval::between(&c, &db).unwrap(), Interval::MINOR_SECOND);
    /// assert_eq!(Interval::between(&db, &c).unwrap(), Interval::MINOR_SECOND.inverted());
    /// ```
    pub fn between(from: &PitchSpelling, to: &PitchSpelling) -> Result<Interval> {
        let component = |name: &'static str, value: i64| {
            i32::try_from(value).map_err(|_| Error::InvalidParameter {
                name,
                value: value.to_string(),
                reason: "interval component does not fit in i32",
            })
        };
        Ok(Interval {
            diatonic_steps: component(
                "diatonic_steps",
                to.vertical_position() - from.vertical_position(),
            )?,
            chromatic_semitones: component(
                "chromatic_semitones",
                to.semitone_midi() - from.semitone_midi(),
            )?,
            cents: component(
                "cents",
                i64::from(to.microtone.cents()) - i64::from(from.microtone.cents()),
            )?,
        })
    }
}
