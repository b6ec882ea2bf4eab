//! The conversion façade and the process-wide default instance.

use std::sync::{Arc, LazyLock};

use arc_swap::ArcSwap;
use log::debug;

use super::frequency::{
    check_finite, check_positive, freq_to_midi, midi_to_freq, quantize_midi, QuantizeMode,
};
use super::grammar::parse_note_name;
use super::notator::{format_midi_with, notate, FormatOptions};
use super::spelling::{Interval, PitchSpelling};
use super::transpose::transpose;
use super::{A4_HZ, MIDI_A4};
use crate::error::ParseErrorKind;
use crate::{Error, Result};

/// Settings a [`PitchConverter`] is built from.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ConverterConfig {
    /// Frequency of the reference note in Hz.
    pub a4: f64,
    /// MIDI number of the reference note.
    pub reference_midi: f64,
    /// Use `>` / `<` for ±25 cents in formatted names.
    pub eighth_tone_symbols: bool,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            a4: A4_HZ,
            reference_midi: MIDI_A4,
            eighth_tone_symbols: false,
        }
    }
}

/// A pitch in one of the three supported representations.
///
/// Numbers are never guessed to be frequencies or MIDI notes; the variant
/// says which one is meant.
#[derive(Debug, Clone, PartialEq)]
pub enum PitchInput {
    /// Frequency in Hz.
    Frequency(f64),
    /// Fractional MIDI note.
    Midi(f64),
    /// Note name, optionally with a Hz offset (`"4C+10hz"`) or a bare
    /// frequency (`"440hz"`).
    NoteName(String),
}

impl From<&str> for PitchInput {
    fn from(name: &str) -> Self {
        PitchInput::NoteName(name.to_string())
    }
}

impl From<String> for PitchInput {
    fn from(name: String) -> Self {
        PitchInput::NoteName(name)
    }
}

impl From<PitchSpelling> for PitchInput {
    fn from(spelling: PitchSpelling) -> Self {
        PitchInput::Midi(spelling.midi())
    }
}

/// Converts between frequency, MIDI number and note name under one reference tuning.
///
/// The value is `Copy` and never changes behind the caller's back; library
/// code should pass its own converter around rather than rely on
/// [`default_converter`].
///
/// # Example
/// ```
/// use pitchconv::convert::PitchConverter;
///
/// let cnv = PitchConverter::new(435.0).unwrap();
/// assert!((cnv.n2f("4A").unwrap() - 435.0).abs() < 1e-9);
/// assert_eq!(cnv.f2n(440.0).unwrap(), "4A+20");
/// assert_eq!(cnv.m2n(61.2).unwrap(), "4C#+20");
/// assert_eq!(cnv.transpose("4C", 2, 3).unwrap(), "4Eb");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchConverter {
    a4: f64,
    reference_midi: f64,
    format: FormatOptions,
}

impl Default for PitchConverter {
    fn default() -> Self {
        Self {
            a4: A4_HZ,
            reference_midi: MIDI_A4,
            format: FormatOptions::default(),
        }
    }
}

impl PitchConverter {
    /// Converter with the given A4 frequency and default settings otherwise.
    pub fn new(a4: f64) -> Result<Self> {
        Self::from_config(ConverterConfig {
            a4,
            ..ConverterConfig::default()
        })
    }

    pub fn from_config(config: ConverterConfig) -> Result<Self> {
        Ok(Self {
            a4: check_positive("a4", config.a4)?,
            reference_midi: check_finite("reference_midi", config.reference_midi)?,
            format: FormatOptions {
                eighth_tone_symbols: config.eighth_tone_symbols,
            },
        })
    }

    pub fn config(&self) -> ConverterConfig {
        ConverterConfig {
            a4: self.a4,
            reference_midi: self.reference_midi,
            eighth_tone_symbols: self.format.eighth_tone_symbols,
        }
    }

    /// Frequency of the reference note (A4) in Hz.
    pub fn reference_freq(&self) -> f64 {
        self.a4
    }

    pub fn reference_midi(&self) -> f64 {
        self.reference_midi
    }

    /// Replace the reference frequency. On error the converter is unchanged.
    pub fn set_reference_freq(&mut self, a4: f64) -> Result<()> {
        self.a4 = check_positive("a4", a4)?;
        Ok(())
    }

    /// Frequency to MIDI number.
    pub fn f2m(&self, freq: f64) -> Result<f64> {
        freq_to_midi(freq, self.a4, self.reference_midi)
    }

    /// MIDI number to frequency.
    pub fn m2f(&self, midi: f64) -> Result<f64> {
        midi_to_freq(midi, self.a4, self.reference_midi)
    }

    /// Note name to MIDI number.
    pub fn n2m(&self, name: &str) -> Result<f64> {
        Ok(parse_note_name(name)?.midi())
    }

    /// MIDI number to canonical note name.
    pub fn m2n(&self, midi: f64) -> Result<String> {
        format_midi_with(midi, self.format)
    }

    /// Note name to frequency.
    pub fn n2f(&self, name: &str) -> Result<f64> {
        self.m2f(self.n2m(name)?)
    }

    /// Frequency to canonical note name.
    pub fn f2n(&self, freq: f64) -> Result<String> {
        self.m2n(self.f2m(freq)?)
    }

    /// Canonical spelling of a MIDI number, as produced by [`m2n`](Self::m2n).
    pub fn spell_midi(&self, midi: f64) -> Result<PitchSpelling> {
        notate(midi, self.format)
    }

    /// Transpose a note name by `diatonic_steps` letters and
    /// `chromatic_semitones` semitones, keeping its spelling idiomatic.
    pub fn transpose(
        &self,
        name: &str,
        diatonic_steps: i32,
        chromatic_semitones: i32,
    ) -> Result<String> {
        let spelling = parse_note_name(name)?;
        let interval = Interval::new(diatonic_steps, chromatic_semitones);
        Ok(self.transpose_spelling(&spelling, interval)?.to_string())
    }

    /// Transpose structured spelling directly.
    ///
    /// Also rejects results whose frequency is not finite under this
    /// converter's tuning.
    pub fn transpose_spelling(
        &self,
        spelling: &PitchSpelling,
        interval: Interval,
    ) -> Result<PitchSpelling> {
        let transposed = transpose(spelling, interval)?;
        check_positive("frequency", self.m2f(transposed.midi())?)?;
        Ok(transposed)
    }

    /// Re-render a note name in canonical form (`"a4+24"` becomes `"4A+24"`).
    pub fn normalize_note_name(&self, name: &str) -> Result<String> {
        self.m2n(self.n2m(name)?)
    }

    /// Round a frequency to the nearest step of a grid with `divisions` per semitone.
    pub fn freq_round(&self, freq: f64, divisions: u32) -> Result<f64> {
        let midi = quantize_midi(self.f2m(freq)?, divisions, QuantizeMode::Round)?;
        self.m2f(midi)
    }

    /// Like [`n2m`](Self::n2m) but also accepts frequencies: `"440hz"` is an
    /// absolute frequency and `"4C+10hz"` is 4C raised by 10 Hz.
    ///
    /// # Example
    /// ```
    /// use pitchconv::convert::PitchConverter;
    ///
    /// let cnv = PitchConverter::default();
    /// assert!((cnv.str_to_midi("442hz").unwrap() - 69.0).abs() < 1e-9);
    /// assert_eq!(cnv.str_to_midi("4C").unwrap(), 60.0);
    /// assert!(cnv.str_to_midi("4A-10hz").unwrap() < 69.0);
    /// ```
    pub fn str_to_midi(&self, s: &str) -> Result<f64> {
        let s = s.trim();
        let body = match s.len().checked_sub(2).and_then(|i| s.get(i..).map(|u| (i, u))) {
            Some((i, suffix)) if suffix.eq_ignore_ascii_case("hz") => &s[..i],
            _ => return self.n2m(s),
        };
        let invalid = || Error::parse(s, ParseErrorKind::InvalidFrequency(body.to_string()));

        if let Ok(freq) = body.trim().parse::<f64>() {
            return self.f2m(freq);
        }
        let split = body.rfind(['+', '-']).filter(|&i| i > 0).ok_or_else(invalid)?;
        let (name, offset) = body.split_at(split);
        let offset = offset.parse::<f64>().map_err(|_| invalid())?;
        self.f2m(self.n2f(name)? + offset)
    }

    /// Coerce any supported pitch representation to a MIDI number.
    pub fn as_midi(&self, input: impl Into<PitchInput>) -> Result<f64> {
        match input.into() {
            PitchInput::Frequency(freq) => self.f2m(freq),
            PitchInput::Midi(midi) => check_finite("midi", midi),
            PitchInput::NoteName(name) => self.str_to_midi(&name),
        }
    }

    /// Whitespace-separated pitches (`"4G 4C 4C+10hz"`) as MIDI numbers.
    pub fn as_midi_notes(&self, pitches: &str) -> Result<Vec<f64>> {
        pitches
            .split_whitespace()
            .map(|p| self.str_to_midi(p))
            .collect()
    }

    /// Frequencies of every semitone from `start` to `stop`, inclusive.
    ///
    /// Both ends are truncated toward zero to a whole MIDI number, so `4C-`
    /// (59.5) starts the range at 59. The range may span at most
    /// [`PIANO_SPAN_LIMIT`] semitones.
    ///
    /// # Example
    /// ```
    /// use pitchconv::convert::PitchConverter;
    ///
    /// let cnv = PitchConverter::new(440.0).unwrap();
    /// let keys = cnv.piano_freqs("0A", "8C").unwrap();
    /// assert_eq!(keys.len(), 88);
    /// assert!((keys[0] - 27.5).abs() < 1e-9);
    /// ```
    pub fn piano_freqs(&self, start: &str, stop: &str) -> Result<Vec<f64>> {
        let first = self.n2m(start)?.trunc() as i64;
        let last = self.n2m(stop)?.trunc() as i64;
        if last - first > PIANO_SPAN_LIMIT {
            return Err(Error::InvalidParameter {
                name: "stop",
                value: stop.to_string(),
                reason: "range spans more than 128 octaves",
            });
        }
        (first..=last).map(|m| self.m2f(m as f64)).collect()
    }
}

/// Widest range, in semitones, that [`PitchConverter::piano_freqs`] will list.
pub const PIANO_SPAN_LIMIT: i64 = 128 * 12;

static DEFAULT_CONVERTER: LazyLock<ArcSwap<PitchConverter>> =
    LazyLock::new(|| ArcSwap::from_pointee(PitchConverter::default()));

/// Snapshot of the process-wide default converter (A4 = 442 Hz until replaced).
///
/// This is shared mutable state: whatever was last stored with
/// [`set_default_converter`] or [`set_reference_freq`] is visible to every
/// thread. Pass an explicit [`PitchConverter`] where that matters.
pub fn default_converter() -> PitchConverter {
    **DEFAULT_CONVERTER.load()
}

/// Replace the process-wide default converter in a single swap.
pub fn set_default_converter(converter: PitchConverter) {
    debug!(
        "default pitch converter replaced: a4={} Hz, reference midi={}",
        converter.a4, converter.reference_midi
    );
    DEFAULT_CONVERTER.store(Arc::new(converter));
}

/// Set A4 of the process-wide default converter, keeping its other settings.
pub fn set_reference_freq(a4: f64) -> Result<()> {
    let a4 = check_positive("a4", a4)?;
    DEFAULT_CONVERTER.rcu(|current| {
        let mut converter = **current;
        converter.a4 = a4;
        converter
    });
    debug!("default pitch converter reference set to {a4} Hz");
    Ok(())
}

/// A4 of the process-wide default converter.
pub fn reference_freq() -> f64 {
    default_converter().reference_freq()
}
