//! 필드 표시 문자열 포맷 테스트.
use filter_spec_panel::format::{clamp_digits, format_full, format_general, MAX_SIGNIFICANT_DIGITS};

#[test]
fn general_format_matches_percent_g() {
    assert_eq!(format_general(0.915149811, 3), "0.915");
    assert_eq!(format_general(60.0, 3), "60");
    assert_eq!(format_general(1e-5, 3), "1e-05");
    assert_eq!(format_general(0.0001, 3), "0.0001");
    assert_eq!(format_general(1234.0, 3), "1.23e+03");
    assert_eq!(format_general(999.6, 3), "1e+03");
    assert_eq!(format_general(123.0, 3), "123");
    assert_eq!(format_general(-0.5, 3), "-0.5");
    assert_eq!(format_general(1.74306, 3), "1.74");
}

#[test]
fn general_format_special_values() {
    assert_eq!(format_general(0.0, 3), "0");
    assert_eq!(format_general(f64::INFINITY, 3), "inf");
    assert_eq!(format_general(f64::NEG_INFINITY, 3), "-inf");
    assert_eq!(format_general(f64::NAN, 3), "nan");
}

#[test]
fn digit_count_is_respected() {
    assert_eq!(format_general(std::f64::consts::PI, 1), "3");
    assert_eq!(format_general(std::f64::consts::PI, 6), "3.14159");
    assert_eq!(format_general(std::f64::consts::PI, 0), "3");
}

#[test]
fn full_precision_roundtrips() {
    for v in [0.915149811328611, 1e-5, 60.0, 1.0 / 3.0] {
        assert_eq!(format_full(v).parse::<f64>().unwrap(), v);
    }
    assert_eq!(format_full(60.0), "60");
}

#[test]
fn oversized_digit_counts_are_clamped() {
    assert_eq!(clamp_digits(70_000), MAX_SIGNIFICANT_DIGITS);
    assert_eq!(clamp_digits(0), 1);
    assert_eq!(format_general(0.5, 70_000), "0.5");
    assert_eq!(format_general(0.1, usize::MAX), "0.10000000000000001");
}
