use crate::{Error, Result};

/// Largest 14-bit pitch-bend value.
pub const PITCHBEND_MAX: u16 = 16383;

pub(crate) fn check_finite(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::InvalidParameter {
            name,
            value: value.to_string(),
            reason: "must be finite",
        })
    }
}

pub(crate) fn check_positive(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(Error::InvalidParameter {
            name,
            value: value.to_string(),
            reason: "must be positive and finite",
        })
    }
}

/// Convert a frequency (Hz) to a fractional MIDI note number.
///
/// # Arguments
/// * `freq` - Frequency in Hz, must be positive
/// * `ref_freq` - Frequency of the reference note (A4 = 442 Hz by default)
/// * `ref_midi` - MIDI number of the reference note (69 for A4)
///
/// # Example
/// ```
/// use pitchconv::convert::freq_to_midi;
///
/// let midi = freq_to_midi(442.0, 442.0, 69.0).unwrap();
/// assert!((midi - 69.0).abs() < 1e-12);
/// assert!(freq_to_midi(0.0, 442.0, 69.0).is_err());
/// ```
pub fn freq_to_midi(freq: f64, ref_freq: f64, ref_midi: f64) -> Result<f64> {
    let freq = check_positive("freq", freq)?;
    let ref_freq = check_positive("ref_freq", ref_freq)?;
    let ref_midi = check_finite("ref_midi", ref_midi)?;
    Ok(ref_midi + 12.0 * (freq / ref_freq).log2())
}

/// Convert a fractional MIDI note number to a frequency (Hz).
///
/// # Example
/// ```
/// use pitchconv::convert::midi_to_freq;
///
/// assert_eq!(midi_to_freq(69.0, 435.0, 69.0).unwrap(), 435.0);
/// assert!(midi_to_freq(f64::NAN, 442.0, 69.0).is_err());
/// ```
pub fn midi_to_freq(midi: f64, ref_freq: f64, ref_midi: f64) -> Result<f64> {
    let midi = check_finite("midi", midi)?;
    let ref_freq = check_positive("ref_freq", ref_freq)?;
    let ref_midi = check_finite("ref_midi", ref_midi)?;
    Ok(ref_freq * 2.0f64.powf((midi - ref_midi) / 12.0))
}

/// Convert the ratio between two frequencies to an interval in semitones.
///
/// # Example
/// ```
/// use pitchconv::convert::ratio_to_interval;
///
/// assert!((ratio_to_interval(2.0).unwrap() - 12.0).abs() < 1e-12);
/// ```
pub fn ratio_to_interval(ratio: f64) -> Result<f64> {
    let ratio = check_positive("ratio", ratio)?;
    Ok(12.0 * ratio.log2())
}

/// Convert an interval in semitones to a frequency ratio.
pub fn interval_to_ratio(semitones: f64) -> Result<f64> {
    let semitones = check_finite("semitones", semitones)?;
    Ok(2.0f64.powf(semitones / 12.0))
}

/// Scale factor of the natural-log mel formula.
const MEL_FACTOR: f64 = 1127.01048;
/// Corner frequency of the mel formula, in Hz.
const MEL_CORNER_HZ: f64 = 700.0;

fn check_non_negative(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(Error::InvalidParameter {
            name,
            value: value.to_string(),
            reason: "must be non-negative and finite",
        })
    }
}

/// Convert a frequency (Hz) to its position on the mel scale.
///
/// Uses `1127.01048 * ln(1 + freq / 700)`, so 1000 Hz is close to 1000 mel.
///
/// # Example
/// ```
/// use pitchconv::convert::{freq_to_mel, mel_to_freq};
///
/// let mel = freq_to_mel(1000.0).unwrap();
/// assert!((mel - 1000.0).abs() < 0.1);
/// assert!((mel_to_freq(mel).unwrap() - 1000.0).abs() < 1e-9);
/// ```
pub fn freq_to_mel(freq: f64) -> Result<f64> {
    let freq = check_non_negative("freq", freq)?;
    Ok(MEL_FACTOR * (freq / MEL_CORNER_HZ).ln_1p())
}

/// Convert a mel-scale position back to a frequency (Hz).
pub fn mel_to_freq(mel: f64) -> Result<f64> {
    let mel = check_non_negative("mel", mel)?;
    Ok(MEL_CORNER_HZ * (mel / MEL_FACTOR).exp_m1())
}

/// How [`quantize_midi`] snaps onto the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuantizeMode {
    /// Nearest grid point.
    #[default]
    Round,
    /// Next grid point at or below the value.
    Floor,
}

/// Quantize a MIDI note to a grid of `divisions` steps per semitone.
///
/// # Arguments
/// * `midi` - Fractional MIDI note
/// * `divisions` - Grid resolution (1 = semitones, 2 = quarter tones, ...)
/// * `mode` - Round to nearest or floor
///
/// # Example
/// ```
/// use pitchconv::convert::{quantize_midi, QuantizeMode};
///
/// assert_eq!(quantize_midi(60.3, 2, QuantizeMode::Round).unwrap(), 60.5);
/// assert_eq!(quantize_midi(60.3, 2, QuantizeMode::Floor).unwrap(), 60.0);
/// ```
pub fn quantize_midi(midi: f64, divisions: u32, mode: QuantizeMode) -> Result<f64> {
    let midi = check_finite("midi", midi)?;
    if divisions == 0 {
        return Err(Error::InvalidParameter {
            name: "divisions",
            value: "0".to_string(),
            reason: "must be at least 1",
        });
    }
    let div = f64::from(divisions);
    let scaled = midi * div;
    let snapped = match mode {
        QuantizeMode::Round => scaled.round(),
        QuantizeMode::Floor => scaled.floor(),
    };
    Ok(snapped / div)
}

/// Convert a 14-bit MIDI pitch-bend value to cents.
///
/// # Arguments
/// * `value` - Pitch-bend value in `0..=16383` (8192 is centre)
/// * `max_cents` - Cents reached at full bend in either direction
///
/// # Example
/// ```
/// use pitchconv::convert::pitchbend_to_cents;
///
/// assert_eq!(pitchbend_to_cents(8192, 200).unwrap(), 0);
/// assert_eq!(pitchbend_to_cents(16383, 200).unwrap(), 200);
/// assert_eq!(pitchbend_to_cents(0, 200).unwrap(), -200);
/// ```
pub fn pitchbend_to_cents(value: u16, max_cents: u32) -> Result<i32> {
    if value > PITCHBEND_MAX {
        return Err(Error::InvalidParameter {
            name: "value",
            value: value.to_string(),
            reason: "pitch-bend is a 14-bit value (0..=16383)",
        });
    }
    let max = f64::from(max_cents);
    let cents = f64::from(value) / f64::from(PITCHBEND_MAX) * (max * 2.0) - max;
    Ok(cents.round() as i32)
}

/// Convert a cents deviation to a 14-bit MIDI pitch-bend value.
pub fn cents_to_pitchbend(cents: i32, max_cents: u32) -> Result<u16> {
    if max_cents == 0 || cents.unsigned_abs() > max_cents {
        return Err(Error::InvalidParameter {
            name: "cents",
            value: cents.to_string(),
            reason: "must lie within the pitch-bend range",
        });
    }
    let max = f64::from(max_cents);
    let value = (f64::from(cents) + max) / (max * 2.0) * f64::from(PITCHBEND_MAX);
    Ok(value.round() as u16)
}
