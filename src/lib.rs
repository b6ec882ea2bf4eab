//! Musical pitch conversion for Rust.
//!
//! Converts between three representations of pitch: frequency in Hz,
//! fractional MIDI note number, and note names with microtonal resolution
//! (`"4C#+20"`). Transposition works on the written spelling, so `4C` up a
//! minor third is `4Eb`, not `4D#`.
//!
//! # Quick Start
//!
//! ```rust
//! use pitchconv::convert::{self, Interval, PitchConverter};
//!
//! // A4 = 442 Hz unless told otherwise
//! let cnv = PitchConverter::default();
//! assert_eq!(cnv.m2n(61.2).unwrap(), "4C#+20");
//! assert!((cnv.n2f("4A").unwrap() - 442.0).abs() < 1e-9);
//!
//! let c4 = convert::parse_note_name("4C").unwrap();
//! assert_eq!(convert::transpose(&c4, Interval::MINOR_THIRD).unwrap().to_string(), "4Eb");
//! ```
//!
//! # Note names
//!
//! | Name | MIDI |
//! |------|------|
//! | `4C` | 60 |
//! | `4C+` | 60.5 |
//! | `4C>` | 60.25 |
//! | `4Db-10` | 60.9 |
//! | `4D#` | 63 |
//! | `C#4+20` | 61.2 |
//!
//! `+` / `-` are quarter tones (±50 cents), `>` / `<` eighth tones (±25 cents),
//! and signed integers are cents in (-50, 50].
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T>`]. [`Error::kind`] tells
//! malformed text ([`ErrorKind::Parse`]) apart from invalid numbers or
//! unrepresentable results ([`ErrorKind::Domain`]).
//!
//! # Feature Flags
//!
//! | Flag | Description |
//! |------|-------------|
//! | `serde` | `Serialize`/`Deserialize` for spellings, intervals and converter settings |

#![forbid(unsafe_code)]

pub mod error;
pub use error::{Error, ErrorKind, ParseErrorKind, Result};

pub mod convert;
