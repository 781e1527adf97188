//! 입력 필드 표시용 숫자 포맷.

/// f64 가 구분할 수 있는 최대 유효숫자.
pub const MAX_SIGNIFICANT_DIGITS: usize = 17;

/// 유효숫자를 `1..=MAX_SIGNIFICANT_DIGITS` 범위로 맞춘다.
pub fn clamp_digits(digits: usize) -> usize {
    digits.clamp(1, MAX_SIGNIFICANT_DIGITS)
}

/// `%g` 형식(유효숫자 `digits`개)으로 숫자를 문자열로 만든다.
///
/// 지수가 -4 이상 `digits` 미만이면 고정소수점, 아니면 지수 표기(`1e-05`)를 쓴다.
/// 끝자리 0과 소수점은 제거한다. `digits`는 [`clamp_digits`]로 제한된다.
pub fn format_general(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "nan".into();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf".into() } else { "-inf".into() };
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0".into() } else { "0".into() };
    }

    let digits = clamp_digits(digits);
    // 반올림 후의 지수를 얻기 위해 먼저 지수 표기로 만든다.
    let sci = format!("{:.*e}", digits - 1, value);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    if exp < -4 || exp >= digits as i32 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", strip_zeros(mantissa), sign, exp.abs())
    } else {
        let decimals = (digits as i32 - 1 - exp).max(0) as usize;
        strip_zeros(&format!("{:.*}", decimals, value))
    }
}

/// 편집 중인 필드에 쓰는 전체 정밀도 표시. 다시 파싱하면 같은 값이 된다.
pub fn format_full(value: f64) -> String {
    format!("{value}")
}

fn strip_zeros(s: &str) -> String {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s.to_string()
    }
}
