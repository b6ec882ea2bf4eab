use super::*;
use crate::{Error, ErrorKind, ParseErrorKind};
use approx::assert_abs_diff_eq;

fn parse_kind(name: &str) -> ParseErrorKind {
    match parse_note_name(name) {
        Err(Error::Parse { kind, .. }) => kind,
        other => panic!("expected a parse error for {name:?}, got {other:?}"),
    }
}

#[test]
fn test_freq_midi_conversions() {
    assert_abs_diff_eq!(freq_to_midi(442.0, A4_HZ, MIDI_A4).unwrap(), 69.0);
    assert_abs_diff_eq!(freq_to_midi(884.0, A4_HZ, MIDI_A4).unwrap(), 81.0, epsilon = 1e-12);
    assert_abs_diff_eq!(midi_to_freq(57.0, A4_HZ, MIDI_A4).unwrap(), 221.0, epsilon = 1e-9);
    assert_abs_diff_eq!(midi_to_freq(60.0, 440.0, 69.0).unwrap(), 261.6255653, epsilon = 1e-6);
}

#[test]
fn test_freq_to_midi_rejects_non_positive() {
    for freq in [0.0, -5.0, f64::NAN, f64::INFINITY] {
        let err = freq_to_midi(freq, A4_HZ, MIDI_A4).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Domain, "freq {freq}");
    }
    assert!(freq_to_midi(440.0, 0.0, MIDI_A4).is_err());
}

#[test]
fn test_interval_ratio() {
    assert_abs_diff_eq!(ratio_to_interval(1.5).unwrap(), 7.019550008653875, epsilon = 1e-12);
    assert_abs_diff_eq!(interval_to_ratio(12.0).unwrap(), 2.0, epsilon = 1e-12);
    assert!(ratio_to_interval(0.0).is_err());
}

#[test]
fn test_quantize_midi() {
    assert_eq!(quantize_midi(60.26, 4, QuantizeMode::Round).unwrap(), 60.25);
    assert_eq!(quantize_midi(60.74, 4, QuantizeMode::Floor).unwrap(), 60.5);
    assert_eq!(quantize_midi(60.49, 1, QuantizeMode::Round).unwrap(), 60.0);
    assert!(quantize_midi(60.0, 0, QuantizeMode::Round).is_err());
}

#[test]
fn test_pitchbend() {
    assert_eq!(pitchbend_to_cents(8192, 200).unwrap(), 0);
    assert_eq!(cents_to_pitchbend(0, 200).unwrap(), 8192);
    assert_eq!(cents_to_pitchbend(200, 200).unwrap(), PITCHBEND_MAX);
    assert_eq!(cents_to_pitchbend(-200, 200).unwrap(), 0);
    assert_eq!(pitchbend_to_cents(cents_to_pitchbend(50, 200).unwrap(), 200).unwrap(), 50);
    assert!(pitchbend_to_cents(20000, 200).is_err());
    assert!(cents_to_pitchbend(300, 200).is_err());

    // Rounding is symmetric around the centre, so both extremes hit the range.
    assert_eq!(pitchbend_to_cents(0, 200).unwrap(), -200);
    assert_eq!(pitchbend_to_cents(PITCHBEND_MAX, 200).unwrap(), 200);
    assert_eq!(pitchbend_to_cents(8151, 200).unwrap(), -1);
}

#[test]
fn test_letter_cycle() {
    assert_eq!(Letter::from_index(7), Letter::C);
    assert_eq!(Letter::from_index(-1), Letter::B);
    assert_eq!(Letter::from_char('g'), Some(Letter::G));
    assert_eq!(Letter::from_char('h'), None);
    let semitones: Vec<i32> = Letter::ALL.iter().map(|l| l.semitone()).collect();
    assert_eq!(semitones, vec![0, 2, 4, 5, 7, 9, 11]);
}

#[test]
fn test_pitch_class_semitones() {
    let cb = PitchClass::new(Letter::C, Accidental::Flat);
    assert_eq!(cb.semitone(), -1);
    assert_eq!(cb.chromatic_index(), 11);
    let bs = PitchClass::new(Letter::B, Accidental::Sharp);
    assert_eq!(bs.chromatic_index(), 0);
    assert_ne!(
        PitchClass::new(Letter::C, Accidental::Sharp),
        PitchClass::new(Letter::D, Accidental::Flat)
    );
}

#[test]
fn test_parse_octave_first() {
    let p = parse_note_name("4C#+20").unwrap();
    assert_eq!(p.octave, 4);
    assert_eq!(p.class, PitchClass::new(Letter::C, Accidental::Sharp));
    assert_eq!(p.microtone, Microtone::Cents(20));
    assert_abs_diff_eq!(p.midi(), 61.2, epsilon = 1e-12);

    assert_eq!(parse_note_name("4C").unwrap().midi(), 60.0);
    assert_eq!(parse_note_name("4B").unwrap().midi(), 71.0);
    assert_eq!(parse_note_name("5C").unwrap().midi(), 72.0);
    assert_eq!(parse_note_name("-1C").unwrap().midi(), 0.0);
    assert_eq!(parse_note_name("4c").unwrap().class.letter, Letter::C);
}

#[test]
fn test_parse_accidentals() {
    let acc = |s: &str| parse_note_name(s).unwrap().class.accidental;
    assert_eq!(acc("4Bb"), Accidental::Flat);
    assert_eq!(acc("4bb"), Accidental::Flat);
    assert_eq!(acc("4Ebb"), Accidental::DoubleFlat);
    assert_eq!(acc("4F##"), Accidental::DoubleSharp);
    assert_eq!(acc("4Fx"), Accidental::DoubleSharp);
    assert_eq!(parse_note_name("4Cb").unwrap().midi(), 59.0);
    assert_eq!(parse_note_name("4B#").unwrap().midi(), 72.0);
}

#[test]
fn test_parse_microtones() {
    assert_eq!(parse_note_name("4C+").unwrap().midi(), 60.5);
    assert_eq!(parse_note_name("4D-").unwrap().midi(), 61.5);
    assert_eq!(parse_note_name("4C>").unwrap().midi(), 60.25);
    assert_eq!(parse_note_name("4E<").unwrap().midi(), 63.75);
    assert_abs_diff_eq!(parse_note_name("4Db-10").unwrap().midi(), 60.9, epsilon = 1e-12);
    assert_abs_diff_eq!(parse_note_name("4D-20").unwrap().midi(), 61.8, epsilon = 1e-12);
    assert_eq!(parse_note_name("4C+50").unwrap().microtone, Microtone::Cents(50));
    assert_eq!(parse_note_name("4C+").unwrap().microtone, Microtone::QuarterUp);
}

#[test]
fn test_parse_pitch_first() {
    assert_eq!(parse_note_name("A4").unwrap(), parse_note_name("4A").unwrap());
    assert_eq!(parse_note_name("C#4+20").unwrap(), parse_note_name("4C#+20").unwrap());
    assert_eq!(parse_note_name("eb5<").unwrap(), parse_note_name("5Eb<").unwrap());
    assert_eq!(parse_note_name("bb3").unwrap(), parse_note_name("3Bb").unwrap());
    assert_eq!(parse_note_name("C-1").unwrap().midi(), 0.0);
    assert_eq!(parse_note_name("D4-").unwrap().midi(), 61.5);

    let low = parse_note_name("C-1-10").unwrap();
    assert_eq!(low, parse_note_name("-1C-10").unwrap());
    assert_eq!(low.microtone, Microtone::Cents(-10));
    assert_abs_diff_eq!(low.midi(), -0.1, epsilon = 1e-12);
    assert_eq!(parse_note_name("Db-2+").unwrap().to_string(), "-2Db+");
}

#[test]
fn test_parse_errors() {
    assert_eq!(parse_kind(""), ParseErrorKind::Empty);
    assert_eq!(parse_kind("4H"), ParseErrorKind::InvalidLetter('H'));
    assert_eq!(parse_kind("H4"), ParseErrorKind::InvalidLetter('H'));
    assert_eq!(parse_kind("C#"), ParseErrorKind::MissingOctave);
    assert_eq!(parse_kind("+C"), ParseErrorKind::MissingOctave);
    assert_eq!(parse_kind("4"), ParseErrorKind::MissingLetter);
    assert_eq!(parse_kind("4C+60"), ParseErrorKind::CentsOutOfRange(60));
    assert_eq!(parse_kind("4C-50"), ParseErrorKind::CentsOutOfRange(-50));
    assert_eq!(parse_kind("4C++"), ParseErrorKind::ConflictingMicrotone);
    assert_eq!(parse_kind("4C+-10"), ParseErrorKind::ConflictingMicrotone);
    assert_eq!(parse_kind("4C>10"), ParseErrorKind::ConflictingMicrotone);
    assert_eq!(parse_kind("4C#b"), ParseErrorKind::MixedAccidentals);
    assert_eq!(parse_kind("4C###"), ParseErrorKind::AccidentalOverflow);
    assert_eq!(parse_kind("4Cx#"), ParseErrorKind::AccidentalOverflow);
    assert_eq!(parse_kind("4CB"), ParseErrorKind::InvalidAccidental("B".to_string()));
    assert_eq!(parse_kind("4C?"), ParseErrorKind::InvalidMicrotone("?".to_string()));
    assert_eq!(parse_kind("4C+2x"), ParseErrorKind::InvalidMicrotone("+2x".to_string()));
    assert!(matches!(parse_kind("99999999999C"), ParseErrorKind::InvalidOctave(_)));
    assert!(!is_valid_note_name("4H"));
    assert!(is_valid_note_name(" 4C "));
}

#[test]
fn test_spelling_display_is_verbatim() {
    for name in ["4C", "4Db-10", "4C+", "4C+50", "4E<", "-1F##", "3Bbb+7"] {
        assert_eq!(parse_note_name(name).unwrap().to_string(), name);
    }
    assert_eq!(parse_note_name("4C+0").unwrap().to_string(), "4C");
    assert_eq!(parse_note_name("c#4").unwrap().to_string(), "4C#");
    assert_eq!(parse_note_name("4Fx").unwrap().to_string(), "4F##");
}

#[test]
fn test_format_midi() {
    assert_eq!(format_midi(60.0).unwrap(), "4C");
    assert_eq!(format_midi(69.0).unwrap(), "4A");
    assert_eq!(format_midi(61.2).unwrap(), "4C#+20");
    assert_eq!(format_midi(60.5).unwrap(), "4C+");
    assert_eq!(format_midi(61.5).unwrap(), "4C#+");
    assert_eq!(format_midi(61.8).unwrap(), "4D-20");
    assert_eq!(format_midi(60.9).unwrap(), "4C#-10");
    assert_eq!(format_midi(60.05).unwrap(), "4C+5");
    assert_eq!(format_midi(71.99).unwrap(), "5C-1");
    assert_eq!(format_midi(59.996).unwrap(), "4C");
    assert_eq!(format_midi(0.0).unwrap(), "-1C");
    assert_eq!(format_midi(-1.0).unwrap(), "-2B");
    assert_eq!(format_midi(140.0).unwrap(), "10G#");
}

#[test]
fn test_format_midi_rejects_non_finite() {
    assert_eq!(format_midi(f64::NAN).unwrap_err().kind(), ErrorKind::Domain);
    assert!(format_midi(f64::INFINITY).is_err());
}

#[test]
fn test_format_eighth_tones() {
    let opts = FormatOptions {
        eighth_tone_symbols: true,
    };
    assert_eq!(format_midi_with(60.25, opts).unwrap(), "4C>");
    assert_eq!(format_midi_with(60.75, opts).unwrap(), "4C#<");
    assert_eq!(format_midi_with(60.3, opts).unwrap(), "4C+30");
    assert_eq!(format_midi(60.25).unwrap(), "4C+25");
}

#[test]
fn test_spelling_table_covers_every_class() {
    for (i, class) in SPELLING_TABLE.iter().enumerate() {
        assert_eq!(class.chromatic_index(), i as i32);
        assert!(matches!(class.accidental, Accidental::Natural | Accidental::Sharp));
    }
}

#[test]
fn test_pitch_round() {
    assert_eq!(pitch_round(60.1, 1).unwrap(), ("4C".to_string(), 10));
    assert_eq!(pitch_round(60.4, 2).unwrap(), ("4C+".to_string(), 40));
    assert_eq!(pitch_round(61.7, 1).unwrap(), ("4D".to_string(), -30));
}

#[test]
fn test_transpose_spelling_aware() {
    let t = |name: &str, steps, semis| {
        transpose(&parse_note_name(name).unwrap(), Interval::new(steps, semis))
            .unwrap()
            .to_string()
    };
    assert_eq!(t("4C", 2, 3), "4Eb");
    assert_eq!(t("4C", 1, 3), "4D#");
    assert_eq!(t("4Eb", 3, 5), "4Ab");
    assert_eq!(t("4D#", 3, 5), "4G#");
    assert_eq!(t("4B", 1, 1), "5C");
    assert_eq!(t("4C", -1, -1), "3B");
    assert_eq!(t("4C", -2, -4), "3Ab");
    assert_eq!(t("4E", 3, 6), "4A#");
    assert_eq!(t("4F", 3, 6), "4B");
    assert_eq!(t("4C#", 2, 4), "4E#");
    assert_eq!(t("4G", 7, 12), "5G");
    assert_eq!(t("4Db-10", 1, 2), "4Eb-10");
    assert_eq!(t("4C+", 4, 7), "4G+");
}

#[test]
fn test_transpose_rejects_triple_accidentals() {
    let c = parse_note_name("4C").unwrap();
    let err = transpose(&c, Interval::new(1, 5)).unwrap_err();
    assert_eq!(
        err,
        Error::UnrepresentableAccidental {
            letter: 'D',
            alteration: 3
        }
    );
    assert_eq!(err.kind(), ErrorKind::Domain);
    assert!(transpose(&parse_note_name("4Fbb").unwrap(), Interval::new(0, -1)).is_err());
}

#[test]
fn test_transpose_with_cents_folds() {
    let db = parse_note_name("4Db").unwrap();
    let up = transpose(&db, Interval::MAJOR_THIRD.with_cents(20)).unwrap();
    assert_eq!(up.to_string(), "4F+20");

    let c = parse_note_name("4C+40").unwrap();
    let folded = transpose(&c, Interval::UNISON.with_cents(30)).unwrap();
    assert_eq!(folded.to_string(), "4C#-30");
    assert_abs_diff_eq!(folded.midi(), 60.7, epsilon = 1e-12);

    let down = transpose(&parse_note_name("4C-40").unwrap(), Interval::UNISON.with_cents(-30));
    assert_eq!(down.unwrap().to_string(), "4Cb+30");

    let quarter = transpose(&parse_note_name("4D").unwrap(), Interval::UNISON.with_cents(-50));
    assert_eq!(quarter.unwrap().to_string(), "4D-");
}

#[test]
fn test_transpose_folds_several_semitones() {
    let c = parse_note_name("4C").unwrap();

    let up = transpose(&c, Interval::UNISON.with_cents(180)).unwrap();
    assert_eq!(up.to_string(), "4C##-20");
    assert_abs_diff_eq!(up.midi(), 61.8, epsilon = 1e-12);

    let down = transpose(&c, Interval::UNISON.with_cents(-151)).unwrap();
    assert_eq!(down.to_string(), "4Cbb+49");
    assert_abs_diff_eq!(down.midi(), 58.49, epsilon = 1e-12);

    let far = transpose(&c, Interval::MAJOR_THIRD.with_cents(-160)).unwrap();
    assert_eq!(far.to_string(), "4Ebb+40");
    assert!(transpose(&c, Interval::UNISON.with_cents(260)).is_err());
}

#[test]
fn test_transpose_extreme_intervals_are_errors() {
    let c = parse_note_name("4C").unwrap();
    for interval in [
        Interval::new(0, i32::MAX),
        Interval::new(0, i32::MIN),
        Interval::new(i32::MAX, 0),
        Interval::UNISON.with_cents(i32::MAX),
        Interval::UNISON.with_cents(i32::MIN),
    ] {
        let err = transpose(&c, interval).unwrap_err();
        assert!(err.is_domain(), "{interval}");
    }
    assert!(matches!(
        transpose(&c, Interval::new(0, i32::MAX)),
        Err(Error::UnrepresentableAccidental { letter: 'C', .. })
    ));

    let top = PitchSpelling::chromatic(i32::MAX, Letter::B, Accidental::Natural);
    assert!(matches!(
        transpose(&top, Interval::MINOR_SECOND),
        Err(Error::InvalidParameter { name: "octave", .. })
    ));
    assert!(PitchSpelling::chromatic(i32::MAX, Letter::B, Accidental::Sharp)
        .enharmonic()
        .is_err());
}

#[test]
fn test_interval_between_rejects_overflow() {
    let low = PitchSpelling::chromatic(i32::MIN, Letter::C, Accidental::Natural);
    let high = PitchSpelling::chromatic(i32::MAX, Letter::C, Accidental::Natural);
    assert!(Interval::between(&low, &high).unwrap_err().is_domain());
    assert_eq!(Interval::between(&high, &high).unwrap(), Interval::UNISON);
}

#[test]
fn test_interval_between_round_trips() {
    let pairs = [("4C", "4Eb"), ("4C#", "5Bb+20"), ("4E-", "3F#"), ("5G", "4Cb")];
    for (a, b) in pairs {
        let from = parse_note_name(a).unwrap();
        let to = parse_note_name(b).unwrap();
        let interval = Interval::between(&from, &to).unwrap();
        assert_eq!(transpose(&from, interval).unwrap().to_string(), b, "{a} -> {b}");
    }
}

#[test]
fn test_enharmonic() {
    let respell = |s: &str| parse_note_name(s).unwrap().enharmonic().unwrap().to_string();
    assert_eq!(respell("4E+"), "4F-");
    assert_eq!(respell("4F#"), "4Gb");
    assert_eq!(respell("4C+"), "4Db-");
    assert_eq!(respell("4G-"), "4F#+");
    assert_eq!(respell("4E+25"), "4E+25");
    assert_eq!(respell("5Eb-45"), "5D#-45");
    assert_eq!(respell("4G-25"), "4G-25");
    assert_eq!(respell("4C-"), "3B+");
    assert_eq!(respell("3B-"), "3A#+");
    assert_eq!(respell("4F-45"), "4F-45");
    assert_eq!(respell("4E#"), "4F");
    assert_eq!(respell("4Db"), "4C#");
    assert_eq!(respell("4B#"), "5C");

    // Deviations beyond a quarter tone can only be built directly.
    let g = PitchSpelling::new(4, PitchClass::natural(Letter::G), Microtone::Cents(60));
    assert_eq!(g.enharmonic().unwrap().to_string(), "4Ab-40");
    let eb = PitchSpelling::new(
        5,
        PitchClass::new(Letter::E, Accidental::Flat),
        Microtone::Cents(-55),
    );
    assert_eq!(eb.enharmonic().unwrap().to_string(), "5D+45");
    let f = PitchSpelling::new(4, PitchClass::natural(Letter::F), Microtone::Cents(-55));
    assert_eq!(f.enharmonic().unwrap().to_string(), "4E+45");
}

#[test]
fn test_from_vertical_position() {
    assert_eq!(PitchSpelling::from_vertical_position(2).unwrap().to_string(), "0E");
    assert_eq!(PitchSpelling::from_vertical_position(0).unwrap().to_string(), "0C");
    assert_eq!(PitchSpelling::from_vertical_position(-1).unwrap().to_string(), "-1B");
    assert_eq!(PitchSpelling::from_vertical_position(33).unwrap().to_string(), "4A");
    let ab = parse_note_name("4Ab").unwrap();
    let natural = PitchSpelling::from_vertical_position(ab.vertical_position()).unwrap();
    assert_eq!(natural.class.letter, Letter::A);
    assert!(PitchSpelling::from_vertical_position(i64::MAX).is_err());
}

#[test]
fn test_key_colour() {
    for name in ["4C", "4E", "4Fb", "4B#", "4C+"] {
        let p = parse_note_name(name).unwrap();
        assert!(p.is_white_key() && !p.is_black_key(), "{name}");
    }
    for name in ["4C#", "4Db", "4F#", "4Bb", "4Gb", "4G#-20"] {
        let p = parse_note_name(name).unwrap();
        assert!(p.is_black_key() && !p.is_white_key(), "{name}");
    }
}

#[test]
fn test_microtone_index() {
    let index = |name: &str, divisions| {
        parse_note_name(name)
            .unwrap()
            .microtone_index(divisions)
            .unwrap()
    };
    assert_eq!(index("4C", 2), 0);
    assert_eq!(index("5C", 2), 0);
    assert_eq!(index("4C+", 2), 1);
    assert_eq!(index("4C#", 2), 2);
    assert_eq!(index("4Db", 2), 2);
    assert_eq!(index("4B+", 2), 23);
    assert_eq!(index("4B+20", 1), 11);
    assert_eq!(index("-1Cb", 1), 11);
    assert!(parse_note_name("4C").unwrap().microtone_index(0).is_err());
}

#[test]
fn test_pitch_class() {
    assert_eq!(pitch_class("4C", 1).unwrap(), 0);
    assert_eq!(pitch_class("2C", 1).unwrap(), 0);
    assert_eq!(pitch_class("4C#", 1).unwrap(), 1);
    assert_eq!(pitch_class("4Db", 1).unwrap(), 1);
    assert_eq!(pitch_class("4D", 1).unwrap(), 2);
    assert_eq!(pitch_class("4C+", 2).unwrap(), 1);
    assert_eq!(pitch_class("4Db-", 2).unwrap(), 1);
    assert_eq!(pitch_class("4C#", 2).unwrap(), 2);
    assert!(pitch_class("4H", 1).unwrap_err().is_parse());
}

#[test]
fn test_quantize_note_name() {
    assert_eq!(quantize_note_name("4A+18", 4).unwrap(), "4A+25");
    assert_eq!(quantize_note_name("4A+12", 4).unwrap(), "4A");
    assert_eq!(quantize_note_name("4Db-10", 1).unwrap(), "4Db");
    assert_eq!(quantize_note_name("4Db-30", 2).unwrap(), "4Db-");
    assert_eq!(quantize_note_name("4Eb+", 1).unwrap(), "4E");
    assert_eq!(quantize_note_name("4C-40", 1).unwrap(), "4C");
    assert_eq!(quantize_note_name("4C#+50", 1).unwrap(), "4D");
    assert!(quantize_note_name("4C", 0).is_err());
}

#[test]
fn test_mel_scale() {
    assert_eq!(freq_to_mel(0.0).unwrap(), 0.0);
    assert_abs_diff_eq!(freq_to_mel(700.0).unwrap(), 1127.01048 * 2f64.ln(), epsilon = 1e-9);
    for freq in [20.0, 442.0, 8000.0] {
        assert_abs_diff_eq!(mel_to_freq(freq_to_mel(freq).unwrap()).unwrap(), freq, epsilon = 1e-9);
    }
    assert!(freq_to_mel(-1.0).is_err());
    assert!(mel_to_freq(f64::NAN).is_err());
}

#[test]
fn test_vertical_position() {
    let pos = |s: &str| parse_note_name(s).unwrap().vertical_position();
    assert_eq!(pos("4G#"), pos("4G"));
    assert_eq!(pos("4Ab"), 33);
    assert_eq!(pos("4G#"), 32);
    assert_eq!(pos("0C"), 0);
}

#[test]
fn test_converter_defaults() {
    let cnv = PitchConverter::default();
    assert_eq!(cnv.reference_freq(), 442.0);
    assert_eq!(cnv.reference_midi(), 69.0);
    assert_abs_diff_eq!(cnv.n2f("4A").unwrap(), 442.0, epsilon = 1e-9);
    assert_abs_diff_eq!(cnv.f2m(442.0).unwrap(), 69.0, epsilon = 1e-12);
    assert_eq!(cnv.f2n(442.0).unwrap(), "4A");
    assert_abs_diff_eq!(cnv.n2m("4Db-10").unwrap(), 60.9, epsilon = 1e-12);
    assert_eq!(cnv.m2n(61.2).unwrap(), "4C#+20");
}

#[test]
fn test_converter_custom_reference() {
    let cnv = PitchConverter::new(435.0).unwrap();
    assert_abs_diff_eq!(cnv.n2f("4A").unwrap(), 435.0, epsilon = 1e-9);
    assert_abs_diff_eq!(cnv.n2f("4C").unwrap(), 258.6, epsilon = 0.1);
    assert_eq!(cnv.f2n(440.0).unwrap(), "4A+20");
    assert!(PitchConverter::new(0.0).is_err());
    assert!(PitchConverter::new(f64::NAN).is_err());
}

#[test]
fn test_converter_set_reference_is_all_or_nothing() {
    let mut cnv = PitchConverter::default();
    let before = cnv.n2f("4C").unwrap();
    assert!(cnv.set_reference_freq(-1.0).is_err());
    assert_eq!(cnv.reference_freq(), 442.0);
    cnv.set_reference_freq(440.0).unwrap();
    assert_abs_diff_eq!(cnv.n2f("4A").unwrap(), 440.0, epsilon = 1e-9);
    assert!(before > cnv.n2f("4C").unwrap());
}

#[test]
fn test_converter_from_config() {
    let config = ConverterConfig {
        a4: 440.0,
        reference_midi: 69.0,
        eighth_tone_symbols: true,
    };
    let cnv = PitchConverter::from_config(config).unwrap();
    assert_eq!(cnv.config(), config);
    assert_eq!(cnv.m2n(60.25).unwrap(), "4C>");
    assert!(PitchConverter::from_config(ConverterConfig {
        reference_midi: f64::NAN,
        ..ConverterConfig::default()
    })
    .is_err());
}

#[test]
fn test_converter_transpose() {
    let cnv = PitchConverter::default();
    assert_eq!(cnv.transpose("4C", 2, 3).unwrap(), "4Eb");
    assert_eq!(cnv.transpose("C4", 1, 3).unwrap(), "4D#");
    assert!(cnv.transpose("4H", 2, 3).unwrap_err().is_parse());
    assert!(cnv.transpose("4C", 1, 5).unwrap_err().is_domain());

    let spelling = parse_note_name("4F#").unwrap();
    let up = cnv.transpose_spelling(&spelling, Interval::PERFECT_FIFTH).unwrap();
    assert_eq!(up.to_string(), "5C#");
}

#[test]
fn test_converter_str_to_midi() {
    let cnv = PitchConverter::default();
    assert_abs_diff_eq!(cnv.str_to_midi("442hz").unwrap(), 69.0, epsilon = 1e-12);
    assert_abs_diff_eq!(cnv.str_to_midi("884Hz").unwrap(), 81.0, epsilon = 1e-12);
    let shifted = cnv.str_to_midi("4A+10hz").unwrap();
    assert_abs_diff_eq!(shifted, cnv.f2m(452.0).unwrap(), epsilon = 1e-12);
    assert!(cnv.str_to_midi("abchz").unwrap_err().is_parse());
    assert!(cnv.str_to_midi("-5hz").unwrap_err().is_domain());
    assert_eq!(cnv.str_to_midi("4C+").unwrap(), 60.5);
}

#[test]
fn test_converter_as_midi() {
    let cnv = PitchConverter::default();
    assert_abs_diff_eq!(cnv.as_midi(PitchInput::Frequency(442.0)).unwrap(), 69.0);
    assert_eq!(cnv.as_midi(PitchInput::Midi(61.5)).unwrap(), 61.5);
    assert_eq!(cnv.as_midi("4D#").unwrap(), 63.0);
    assert_eq!(cnv.as_midi(parse_note_name("4Db").unwrap()).unwrap(), 61.0);
    assert!(cnv.as_midi(PitchInput::Midi(f64::NAN)).is_err());

    let notes = cnv.as_midi_notes("4G 4C  5C+").unwrap();
    assert_eq!(notes, vec![67.0, 60.0, 72.5]);
}

#[test]
fn test_converter_normalize_and_round() {
    let cnv = PitchConverter::default();
    assert_eq!(cnv.normalize_note_name("a4+24").unwrap(), "4A+24");
    assert_eq!(cnv.normalize_note_name("4Db").unwrap(), "4C#");
    assert_eq!(cnv.normalize_note_name("4E#").unwrap(), "4F");
    let rounded = cnv.freq_round(450.0, 1).unwrap();
    assert_abs_diff_eq!(cnv.f2m(rounded).unwrap(), 69.0, epsilon = 1e-9);
}

#[test]
fn test_piano_freqs() {
    let cnv = PitchConverter::new(440.0).unwrap();
    let freqs = cnv.piano_freqs("A0", "C8").unwrap();
    assert_eq!(freqs.len(), 88);
    assert_abs_diff_eq!(freqs[48], 440.0, epsilon = 1e-9);
    for pair in freqs.windows(2) {
        assert!(pair[1] > pair[0]);
    }
    assert!(cnv.piano_freqs("4C", "3C").unwrap().is_empty());
}

#[test]
fn test_piano_freqs_truncates_microtones() {
    let cnv = PitchConverter::new(440.0).unwrap();
    // 4C- is 59.5, which truncates to 59 (4B below it).
    let freqs = cnv.piano_freqs("4C-", "4C+").unwrap();
    assert_eq!(freqs.len(), 2);
    assert_abs_diff_eq!(freqs[0], cnv.n2f("3B").unwrap(), epsilon = 1e-9);
    assert_abs_diff_eq!(freqs[1], cnv.n2f("4C").unwrap(), epsilon = 1e-9);
}

#[test]
fn test_piano_freqs_rejects_huge_ranges() {
    let cnv = PitchConverter::default();
    let err = cnv.piano_freqs("-100000000C", "100000000C").unwrap_err();
    assert!(matches!(err, Error::InvalidParameter { name: "stop", .. }));
    assert_eq!(cnv.piano_freqs("-1C", "127C").unwrap().len(), 1537);
    assert!(cnv.piano_freqs("-1C", "127C#").is_err());
}

#[test]
fn test_str_to_midi_offset_below_zero() {
    let cnv = PitchConverter::default();
    let err = cnv.str_to_midi("0A-100hz").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Domain);
    assert!(cnv.str_to_midi("0A-10hz").is_ok());
}
