//! 입력 수식 평가기 테스트.
use filter_spec_panel::expr::{evaluate, ParseError, MAX_DEPTH};

fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "expected {expected}, got {actual} (tol {tol})"
    );
}

#[test]
fn plain_numbers() {
    assert_eq!(evaluate("60"), Ok(60.0));
    assert_eq!(evaluate("  0.915 "), Ok(0.915));
    assert_eq!(evaluate(".5"), Ok(0.5));
    assert_eq!(evaluate("1e-5"), Ok(1e-5));
    assert_eq!(evaluate("2.5E+3"), Ok(2500.0));
}

#[test]
fn operator_precedence() {
    assert_eq!(evaluate("1 + 2 * 3"), Ok(7.0));
    assert_eq!(evaluate("(1 + 2) * 3"), Ok(9.0));
    assert_eq!(evaluate("10 - 4 - 3"), Ok(3.0));
    assert_eq!(evaluate("2 ^ 3 ^ 2"), Ok(512.0));
    assert_eq!(evaluate("2**10"), Ok(1024.0));
    assert_eq!(evaluate("-2^2"), Ok(-4.0));
    assert_eq!(evaluate("2^-1"), Ok(0.5));
    assert_eq!(evaluate("7 % 3"), Ok(1.0));
    assert_eq!(evaluate("5 % -3"), Ok(-1.0));
    assert_eq!(evaluate("-5 % 3"), Ok(1.0));
    assert_eq!(evaluate("--3"), Ok(3.0));
}

#[test]
fn constants_and_functions() {
    assert_close(evaluate("pi").unwrap(), std::f64::consts::PI, 1e-15);
    assert_close(evaluate("-20*log10(0.001)").unwrap(), 60.0, 1e-12);
    assert_eq!(evaluate("sqrt(16)"), Ok(4.0));
    assert_eq!(evaluate("max(1, 3) + min(2, -2)"), Ok(1.0));
    assert_eq!(evaluate("abs(-0.5)"), Ok(0.5));
    assert_close(evaluate("ln(e)").unwrap(), 1.0, 1e-15);
}

#[test]
fn syntax_errors() {
    assert_eq!(evaluate(""), Err(ParseError::Empty));
    assert_eq!(evaluate("   "), Err(ParseError::Empty));
    assert_eq!(evaluate("2 +"), Err(ParseError::UnexpectedEnd));
    assert_eq!(evaluate("(1"), Err(ParseError::UnexpectedEnd));
    assert_eq!(
        evaluate("1 2"),
        Err(ParseError::UnexpectedChar { ch: '2', pos: 2 })
    );
    assert_eq!(
        evaluate("3 # 4"),
        Err(ParseError::UnexpectedChar { ch: '#', pos: 2 })
    );
    assert!(matches!(
        evaluate("foo + 1"),
        Err(ParseError::UnknownName { ref name, pos: 0 }) if name == "foo"
    ));
}

#[test]
fn evaluation_errors() {
    assert_eq!(evaluate("1 / 0"), Err(ParseError::DivisionByZero));
    assert_eq!(evaluate("1 % 0"), Err(ParseError::DivisionByZero));
    assert_eq!(evaluate("log10(0)"), Err(ParseError::NotFinite));
    assert_eq!(evaluate("1e400"), Err(ParseError::NotFinite));
    assert_eq!(
        evaluate("sqrt(1, 2)"),
        Err(ParseError::WrongArity {
            name: "sqrt".into(),
            expected: 1,
            found: 2
        })
    );
}

#[test]
fn exponent_needs_digits() {
    // `2e` 는 지수 표기가 아니므로 남은 `e`가 오류가 된다.
    assert_eq!(
        evaluate("2e"),
        Err(ParseError::UnexpectedChar { ch: 'e', pos: 1 })
    );
    assert_close(evaluate("2*e").unwrap(), 2.0 * std::f64::consts::E, 1e-15);
}

#[test]
fn deep_nesting_is_rejected() {
    let text = format!("{}1{}", "(".repeat(3000), ")".repeat(3000));
    assert_eq!(
        evaluate(&text),
        Err(ParseError::TooDeep { pos: MAX_DEPTH })
    );

    let calls = format!("{}1{}", "abs(".repeat(1000), ")".repeat(1000));
    assert!(matches!(evaluate(&calls), Err(ParseError::TooDeep { .. })));

    let powers = format!("{}1", "1^".repeat(1000));
    assert!(matches!(evaluate(&powers), Err(ParseError::TooDeep { .. })));
}

#[test]
fn nesting_within_limit_is_accepted() {
    let n = MAX_DEPTH;
    let text = format!("{}2{}", "(".repeat(n), ")".repeat(n));
    assert_eq!(evaluate(&text), Ok(2.0));
}

#[test]
fn long_sign_runs_do_not_recurse() {
    let even = format!("{}7", "-".repeat(200_000));
    assert_eq!(evaluate(&even), Ok(7.0));
    let odd = format!("{}7", "- +".repeat(100_001));
    assert_eq!(evaluate(&odd), Ok(-7.0));
}
