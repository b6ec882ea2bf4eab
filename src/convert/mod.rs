//! Conversion between frequency, MIDI number and note name, plus spelling-aware transposition.

/// Default reference frequency for A4, in Hz.
pub const A4_HZ: f64 = 442.0;
/// MIDI number of A4.
pub const MIDI_A4: f64 = 69.0;

mod converter;
mod frequency;
mod grammar;
mod notator;
mod spelling;
mod transpose;

pub use converter::*;
pub use frequency::*;
pub use grammar::*;
pub use notator::*;
pub use spelling::*;
pub use transpose::*;

#[cfg(test)]
mod tests;
