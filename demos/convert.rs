//! Pitch Conversion Example
//!
//! Converts a few frequencies to microtonal note names under two tunings and
//! spells some transpositions. Run with `RUST_LOG=debug` to see the default
//! converter being retuned.

use log::{error, info};
use pitchconv::convert::{self, Interval, PitchConverter};

fn main() {
    env_logger::init();
    info!("Pitch Conversion Example");

    let freqs = [220.0, 261.63, 329.63, 440.0, 452.9];

    for a4 in [442.0, 440.0] {
        let cnv = match PitchConverter::new(a4) {
            Ok(cnv) => cnv,
            Err(e) => {
                error!("bad reference {a4}: {e}");
                return;
            }
        };
        info!("A4 = {a4} Hz");
        for freq in freqs {
            match cnv.f2n(freq) {
                Ok(name) => info!("  {freq:>8.2} Hz -> {name}"),
                Err(e) => error!("  {freq:>8.2} Hz: {e}"),
            }
        }
    }

    info!("Transpositions from 4C");
    let intervals = [
        ("minor third", Interval::MINOR_THIRD),
        ("augmented second", Interval::AUGMENTED_SECOND),
        ("perfect fifth + 30 cents", Interval::PERFECT_FIFTH.with_cents(30)),
        ("augmented sixth", Interval::new(5, 10)),
    ];
    for (label, interval) in intervals {
        match convert::transpose_note_name("4C", interval) {
            Ok(name) => info!("  {label:<26} -> {name}"),
            Err(e) => error!("  {label:<26}: {e}"),
        }
    }

    if let Err(e) = convert::set_reference_freq(443.0) {
        error!("could not retune default converter: {e}");
        return;
    }
    match convert::default_converter().n2f("4A") {
        Ok(freq) => info!("default converter now puts 4A at {freq:.1} Hz"),
        Err(e) => error!("{e}"),
    }

    for name in ["4C#+20", "C4", "4H"] {
        match convert::default_converter().n2m(name) {
            Ok(midi) => info!("{name} -> MIDI {midi:.2}"),
            Err(e) => error!("{e}"),
        }
    }
}
