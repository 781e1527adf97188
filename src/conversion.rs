use thiserror::Error;

use crate::units::*;

/// 단위 변환 시 발생 가능한 오류.
#[derive(Debug, Error, PartialEq)]
pub enum ConversionError {
    /// 알 수 없는 단위 문자열
    #[error("알 수 없는 단위: {0}")]
    UnknownUnit(String),
    /// 알 수 없는 필터 종류 문자열
    #[error("알 수 없는 필터 종류: {0}")]
    UnknownFilterType(String),
    /// 유한하지 않은 입력 또는 결과
    #[error("{spec}: 유한하지 않은 값 ({value})")]
    NotFinite { spec: String, value: f64 },
}

/// 단위 문자열을 enum으로 변환한다. `dB`, `V`, `W` 외에 몇 가지 별칭을 허용한다.
pub fn parse_amp_unit(s: &str) -> Result<AmpUnit, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "db" => Ok(AmpUnit::Db),
        "v" | "volt" | "voltage" | "lin" => Ok(AmpUnit::Voltage),
        "w" | "watt" | "power" => Ok(AmpUnit::Power),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}

/// 필터 종류 토큰(`IIR`/`FIR`)을 enum으로 변환한다.
pub fn parse_filter_type(s: &str) -> Result<FilterType, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "iir" => Ok(FilterType::Iir),
        "fir" => Ok(FilterType::Fir),
        _ => Err(ConversionError::UnknownFilterType(s.to_string())),
    }
}

/// 표시 단위 사이를 직접 환산한다. 내부적으로 선형 값을 거친다.
pub fn convert_amplitude(
    value: f64,
    filter_type: FilterType,
    spec_name: &str,
    from: AmpUnit,
    to: AmpUnit,
) -> Result<f64, ConversionError> {
    let lin = to_linear(value, filter_type, spec_name, from)?;
    Ok(to_display(lin, filter_type, spec_name, to))
}

/// 문자열로 전달된 단위명을 해석한 뒤 환산한다.
///
/// 예: `convert("IIR", 60.0, "A_SB", "dB", "V")`
pub fn convert(
    filter_type_str: &str,
    value: f64,
    spec_name: &str,
    from_unit_str: &str,
    to_unit_str: &str,
) -> Result<f64, ConversionError> {
    let ft = parse_filter_type(filter_type_str)?;
    let from = parse_amp_unit(from_unit_str)?;
    let to = parse_amp_unit(to_unit_str)?;
    convert_amplitude(value, ft, spec_name, from, to)
}
