//! 선형 ↔ 표시 단위 환산 테스트.
use filter_spec_panel::conversion::{self, ConversionError};
use filter_spec_panel::units::{is_passband, to_display, to_linear, AmpUnit, FilterType};
use proptest::prelude::*;

fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "expected {expected}, got {actual} (tol {tol})"
    );
}

#[test]
fn stopband_db_known_values() {
    assert_close(to_display(0.001, FilterType::Iir, "A_SB", AmpUnit::Db), 60.0, 1e-9);
    assert_close(to_linear(60.0, FilterType::Fir, "A_SB", AmpUnit::Db).unwrap(), 0.001, 1e-15);
    assert_close(to_linear(40.0, FilterType::Iir, "A_SB2", AmpUnit::Db).unwrap(), 0.01, 1e-15);
}

#[test]
fn passband_db_depends_on_filter_type() {
    let iir = to_display(0.1, FilterType::Iir, "A_PB", AmpUnit::Db);
    let fir = to_display(0.1, FilterType::Fir, "A_PB", AmpUnit::Db);
    assert_close(iir, -20.0 * 0.9f64.log10(), 1e-12);
    assert_close(fir, 20.0 * (1.1f64 / 0.9).log10(), 1e-12);
    assert_close(iir, 0.91515, 1e-5);
    assert_close(fir, 1.74306, 1e-5);
}

#[test]
fn voltage_and_power() {
    assert_eq!(to_display(0.25, FilterType::Iir, "A_PB", AmpUnit::Voltage), 0.25);
    assert_eq!(to_display(0.25, FilterType::Iir, "A_SB", AmpUnit::Power), 0.0625);
    assert_eq!(to_linear(0.0625, FilterType::Fir, "A_SB", AmpUnit::Power).unwrap(), 0.25);
}

#[test]
fn passband_detection_by_name() {
    assert!(is_passband("A_PB"));
    assert!(is_passband("A_PB2"));
    assert!(!is_passband("A_SB"));
    assert!(!is_passband("A_SB2"));
}

#[test]
fn negative_display_values_use_magnitude() {
    let neg = to_linear(-60.0, FilterType::Iir, "A_SB", AmpUnit::Db).unwrap();
    let pos = to_linear(60.0, FilterType::Iir, "A_SB", AmpUnit::Db).unwrap();
    assert_eq!(neg, pos);
}

#[test]
fn non_finite_values_are_errors() {
    let err = to_linear(f64::NAN, FilterType::Iir, "A_SB", AmpUnit::Db).unwrap_err();
    assert!(matches!(err, ConversionError::NotFinite { .. }));
    assert!(to_linear(f64::INFINITY, FilterType::Iir, "A_PB", AmpUnit::Voltage).is_err());
    // FIR 통과대역에서 너무 큰 dB 는 NaN 이 된다.
    assert!(to_linear(7000.0, FilterType::Fir, "A_PB", AmpUnit::Db).is_err());
}

#[test]
fn zero_linear_stopband_displays_infinite_db() {
    let db = to_display(0.0, FilterType::Iir, "A_SB", AmpUnit::Db);
    assert!(db.is_infinite() && db > 0.0);
}

#[test]
fn string_conversion_helper() {
    let v = conversion::convert("IIR", 60.0, "A_SB", "dB", "V").unwrap();
    assert_close(v, 0.001, 1e-15);
    let w = conversion::convert("fir", 0.1, "A_SB", "lin", "watt").unwrap();
    assert_close(w, 0.01, 1e-15);
    assert_eq!(
        conversion::convert("IIR", 1.0, "A_SB", "dB", "Np"),
        Err(ConversionError::UnknownUnit("Np".into()))
    );
    assert_eq!(
        conversion::parse_filter_type("butter"),
        Err(ConversionError::UnknownFilterType("butter".into()))
    );
}

#[test]
fn unit_tokens_match_store_format() {
    let tokens: Vec<&str> = AmpUnit::ALL.iter().map(|u| u.token()).collect();
    assert_eq!(tokens, ["dB", "V", "W"]);
    for u in AmpUnit::ALL {
        assert_eq!(conversion::parse_amp_unit(u.token()), Ok(u));
    }
    assert_eq!(FilterType::Fir.to_string(), "FIR");
}

fn filter_type() -> impl Strategy<Value = FilterType> {
    prop_oneof![Just(FilterType::Iir), Just(FilterType::Fir)]
}

fn unit() -> impl Strategy<Value = AmpUnit> {
    prop_oneof![Just(AmpUnit::Db), Just(AmpUnit::Voltage), Just(AmpUnit::Power)]
}

fn spec_name() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("A_PB"), Just("A_PB2"), Just("A_SB"), Just("A_SB2")]
}

proptest! {
    #[test]
    fn linear_survives_display_roundtrip(
        lin in 1e-6f64..0.999,
        ft in filter_type(),
        name in spec_name(),
        unit in unit(),
    ) {
        let shown = to_display(lin, ft, name, unit);
        let back = to_linear(shown, ft, name, unit).unwrap();
        prop_assert!((back - lin).abs() <= 1e-9 * lin.max(1e-3), "{lin} -> {shown} -> {back}");
    }

    #[test]
    fn converting_to_same_unit_is_identity(
        value in 0.0f64..100.0,
        ft in filter_type(),
        name in spec_name(),
        unit in unit(),
    ) {
        let out = conversion::convert_amplitude(value, ft, name, unit, unit).unwrap();
        prop_assert!((out - value).abs() <= 1e-9 * value.max(1.0));
    }
}
