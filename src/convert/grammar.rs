//! Note-name parsing.
//!
//! Canonical names are octave first (`4C#+20`). Names with the octave after
//! the pitch class (`C#4+20`) are accepted as well. The letter is
//! case-insensitive; accidental and microtone symbols are not.

use super::spelling::{Accidental, Letter, Microtone, PitchClass, PitchSpelling};
use crate::error::ParseErrorKind;
use crate::{Error, Result};

const MICROTONE_MARKERS: [char; 6] = ['+', '-', '>', '<', '↑', '↓'];

/// Parse a note name into a [`PitchSpelling`].
///
/// # Grammar
/// `<octave><letter><accidentals>?<microtone>?` or
/// `<letter><accidentals>?<octave><microtone>?` where
/// * accidentals are any run of `#`, `x` (double sharp) or `b`, up to a double alteration
/// * microtone is `+`/`-` (±50 cents), `>`/`<` (±25 cents) or signed cents in (-50, 50]
///
/// The spelling is kept exactly as written; no enharmonic normalization happens here.
///
/// # Example
/// ```
/// use pitchconv::convert::parse_note_name;
///
/// assert_eq!(parse_note_name("4C+").unwrap().midi(), 60.5);
/// assert_eq!(parse_note_name("A4").unwrap().midi(), 69.0);
/// assert!(parse_note_name("4H").is_err());
/// assert!(parse_note_name("4C+60").is_err());
/// ```
pub fn parse_note_name(input: &str) -> Result<PitchSpelling> {
    let s = input.trim();
    let first = s
        .chars()
        .next()
        .ok_or_else(|| Error::parse(input, ParseErrorKind::Empty))?;

    if starts_with_octave(s) {
        let (octave, rest) = take_octave(input, s)?;
        let mut chars = rest.chars();
        let c = chars
            .next()
            .ok_or_else(|| Error::parse(input, ParseErrorKind::MissingLetter))?;
        let letter =
            Letter::from_char(c).ok_or_else(|| Error::parse(input, ParseErrorKind::InvalidLetter(c)))?;
        let (accidental, rest) = take_accidentals(input, chars.as_str())?;
        let microtone = parse_microtone(input, rest)?;
        Ok(PitchSpelling::new(
            octave,
            PitchClass::new(letter, accidental),
            microtone,
        ))
    } else if first.is_alphabetic() {
        let letter = Letter::from_char(first)
            .ok_or_else(|| Error::parse(input, ParseErrorKind::InvalidLetter(first)))?;
        let (accidental, rest) = take_accidentals(input, &s[first.len_utf8()..])?;
        if !starts_with_octave(rest) {
            return Err(Error::parse(input, ParseErrorKind::MissingOctave));
        }
        let (octave, rest) = take_octave(input, rest)?;
        let microtone = parse_microtone(input, rest)?;
        Ok(PitchSpelling::new(
            octave,
            PitchClass::new(letter, accidental),
            microtone,
        ))
    } else {
        Err(Error::parse(input, ParseErrorKind::MissingOctave))
    }
}

/// Returns true if `name` parses as a note name.
pub fn is_valid_note_name(name: &str) -> bool {
    parse_note_name(name).is_ok()
}

/// Octave is an optionally negative integer; a bare `-` is a microtone.
fn starts_with_octave(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    digits.starts_with(|c: char| c.is_ascii_digit())
}

fn take_octave<'a>(input: &str, s: &'a str) -> Result<(i32, &'a str)> {
    let sign_len = usize::from(s.starts_with('-'));
    let end = s[sign_len..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(s.len(), |i| i + sign_len);
    let text = &s[..end];
    let octave = text
        .parse::<i32>()
        .map_err(|_| Error::parse(input, ParseErrorKind::InvalidOctave(text.to_string())))?;
    Ok((octave, &s[end..]))
}

fn take_accidentals<'a>(input: &str, s: &'a str) -> Result<(Accidental, &'a str)> {
    let end = s.find(|c: char| !matches!(c, '#' | 'x' | 'b')).unwrap_or(s.len());
    let (symbols, rest) = s.split_at(end);

    let mut sharps = 0;
    let mut flats = 0;
    for c in symbols.chars() {
        match c {
            '#' => sharps += 1,
            'x' => sharps += 2,
            _ => flats += 1,
        }
    }
    if sharps > 0 && flats > 0 {
        return Err(Error::parse(input, ParseErrorKind::MixedAccidentals));
    }
    let accidental = Accidental::from_semitones(sharps - flats)
        .ok_or_else(|| Error::parse(input, ParseErrorKind::AccidentalOverflow))?;

    // Anything alphabetic left over is a misspelled accidental, not a microtone.
    if rest.starts_with(|c: char| c.is_alphabetic()) {
        let token: String = rest.chars().take_while(|c| c.is_alphabetic()).collect();
        return Err(Error::parse(input, ParseErrorKind::InvalidAccidental(token)));
    }
    Ok((accidental, rest))
}

fn parse_microtone(input: &str, s: &str) -> Result<Microtone> {
    match s {
        "" => return Ok(Microtone::Exact),
        "+" => return Ok(Microtone::QuarterUp),
        "-" => return Ok(Microtone::QuarterDown),
        ">" | "↑" => return Ok(Microtone::EighthUp),
        "<" | "↓" => return Ok(Microtone::EighthDown),
        _ => {}
    }

    let markers = s.chars().filter(|c| MICROTONE_MARKERS.contains(c)).count();
    if markers > 1 {
        return Err(Error::parse(input, ParseErrorKind::ConflictingMicrotone));
    }

    let invalid = || Error::parse(input, ParseErrorKind::InvalidMicrotone(s.to_string()));
    let mut chars = s.chars();
    let sign = match chars.next() {
        Some('+') => 1,
        Some('-') => -1,
        Some('>' | '<' | '↑' | '↓') => {
            return Err(Error::parse(input, ParseErrorKind::ConflictingMicrotone))
        }
        _ => return Err(invalid()),
    };
    let digits = chars.as_str();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    let magnitude = digits.parse::<i64>().map_err(|_| invalid())?;
    let cents = sign * magnitude;
    if cents <= -50 || cents > 50 {
        return Err(Error::parse(input, ParseErrorKind::CentsOutOfRange(cents)));
    }
    Ok(Microtone::Cents(cents as i32))
}
