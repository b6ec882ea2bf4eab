use std::fmt;

/// Crate-level error type for pitch conversion.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// A note name (or frequency string) could not be parsed.
    #[error("could not parse note `{input}`: {kind}")]
    Parse { input: String, kind: ParseErrorKind },

    /// Invalid numeric parameter value.
    #[error("invalid parameter `{name}`: got {value}, {reason}")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: &'static str,
    },

    /// A spelling would need more than a double sharp or double flat.
    #[error("cannot spell {letter} with an alteration of {alteration} semitones")]
    UnrepresentableAccidental { letter: char, alteration: i64 },
}

/// The two broad classes of failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed note-name text.
    Parse,
    /// Invalid numeric input or an unrepresentable result.
    Domain,
}

/// Why a note name was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    Empty,
    MissingOctave,
    InvalidOctave(String),
    MissingLetter,
    InvalidLetter(char),
    InvalidAccidental(String),
    MixedAccidentals,
    AccidentalOverflow,
    InvalidMicrotone(String),
    CentsOutOfRange(i64),
    ConflictingMicrotone,
    InvalidFrequency(String),
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::Empty => f.write_str("empty note name"),
            ParseErrorKind::MissingOctave => f.write_str("missing octave"),
            ParseErrorKind::InvalidOctave(s) => write!(f, "invalid octave `{s}`"),
            ParseErrorKind::MissingLetter => f.write_str("missing note letter"),
            ParseErrorKind::InvalidLetter(c) => write!(f, "`{c}` is not a note letter (A-G)"),
            ParseErrorKind::InvalidAccidental(s) => write!(f, "unrecognized accidental `{s}`"),
            ParseErrorKind::MixedAccidentals => f.write_str("sharps and flats mixed"),
            ParseErrorKind::AccidentalOverflow => {
                f.write_str("accidental beyond double sharp or double flat")
            }
            ParseErrorKind::InvalidMicrotone(s) => write!(f, "unrecognized microtone `{s}`"),
            ParseErrorKind::CentsOutOfRange(c) => {
                write!(f, "cents deviation {c} outside (-50, 50]")
            }
            ParseErrorKind::ConflictingMicrotone => f.write_str("conflicting microtone markers"),
            ParseErrorKind::InvalidFrequency(s) => write!(f, "invalid frequency `{s}`"),
        }
    }
}

impl Error {
    pub(crate) fn parse(input: &str, kind: ParseErrorKind) -> Self {
        Error::Parse {
            input: input.to_string(),
            kind,
        }
    }

    /// Which of the two error classes this belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Parse { .. } => ErrorKind::Parse,
            Error::InvalidParameter { .. } | Error::UnrepresentableAccidental { .. } => {
                ErrorKind::Domain
            }
        }
    }

    pub fn is_parse(&self) -> bool {
        self.kind() == ErrorKind::Parse
    }

    pub fn is_domain(&self) -> bool {
        self.kind() == ErrorKind::Domain
    }
}

/// Convenience Result type for pitch conversions.
pub type Result<T> = std::result::Result<T, Error>;
