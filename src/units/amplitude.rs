use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::conversion::ConversionError;

/// 진폭 사양의 표시 단위. 저장소에는 항상 선형 값이 들어가고 이 단위는 표시에만 쓰인다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AmpUnit {
    /// 감쇠량(dB, 양수)
    #[serde(rename = "dB")]
    Db,
    /// 선형 전압비
    #[serde(rename = "V")]
    Voltage,
    /// 선형 전력비
    #[serde(rename = "W")]
    Power,
}

impl AmpUnit {
    /// 단위 선택 목록에 표시되는 순서.
    pub const ALL: [AmpUnit; 3] = [AmpUnit::Db, AmpUnit::Voltage, AmpUnit::Power];

    /// 저장소(`amp_specs_unit`)에 기록되는 토큰.
    pub fn token(&self) -> &'static str {
        match self {
            AmpUnit::Db => "dB",
            AmpUnit::Voltage => "V",
            AmpUnit::Power => "W",
        }
    }
}

impl std::fmt::Display for AmpUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

/// 필터 종류. 통과대역 dB 환산식이 IIR/FIR 에 따라 달라진다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterType {
    #[serde(rename = "IIR")]
    Iir,
    #[serde(rename = "FIR")]
    Fir,
}

impl FilterType {
    /// 저장소(`ft`)에 기록되는 토큰.
    pub fn token(&self) -> &'static str {
        match self {
            FilterType::Iir => "IIR",
            FilterType::Fir => "FIR",
        }
    }
}

impl std::fmt::Display for FilterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

/// 사양 이름에 `PB`가 포함되면 통과대역, 아니면 저지대역 사양으로 본다.
pub fn is_passband(spec_name: &str) -> bool {
    spec_name.contains("PB")
}

/// 선형 값을 표시 단위로 변환한다.
///
/// dB 표시는 감쇠량(양수)이다. 통과대역은 리플을, 저지대역은 감쇠를 나타낸다.
/// 결과가 유한하지 않을 수 있다(예: 저지대역 0 → +inf). 표시 단계에서 그대로 보여준다.
pub fn to_display(lin_value: f64, filter_type: FilterType, spec_name: &str, unit: AmpUnit) -> f64 {
    match unit {
        AmpUnit::Db => {
            if is_passband(spec_name) {
                match filter_type {
                    FilterType::Iir => -20.0 * (1.0 - lin_value).log10(),
                    FilterType::Fir => 20.0 * ((1.0 + lin_value) / (1.0 - lin_value)).log10(),
                }
            } else {
                -20.0 * lin_value.log10()
            }
        }
        AmpUnit::Power => lin_value * lin_value,
        AmpUnit::Voltage => lin_value,
    }
}

/// 표시 단위 값을 선형 값으로 되돌린다.
///
/// 음수 입력은 절댓값으로 바꾸고 경고를 남긴다. 입력이나 결과가 유한하지 않으면 오류.
pub fn to_linear(
    display_value: f64,
    filter_type: FilterType,
    spec_name: &str,
    unit: AmpUnit,
) -> Result<f64, ConversionError> {
    if !display_value.is_finite() {
        return Err(ConversionError::NotFinite {
            spec: spec_name.to_string(),
            value: display_value,
        });
    }
    let value = if display_value < 0.0 {
        warn!(
            spec = spec_name,
            value = display_value,
            "negative amplitude spec, using its absolute value"
        );
        display_value.abs()
    } else {
        display_value
    };

    let lin = match unit {
        AmpUnit::Db => {
            if is_passband(spec_name) {
                match filter_type {
                    FilterType::Iir => 1.0 - 10f64.powf(-value / 20.0),
                    FilterType::Fir => {
                        let g = 10f64.powf(value / 20.0);
                        (g - 1.0) / (g + 1.0)
                    }
                }
            } else {
                10f64.powf(-value / 20.0)
            }
        }
        AmpUnit::Power => value.sqrt(),
        AmpUnit::Voltage => value,
    };

    if lin.is_finite() {
        Ok(lin)
    } else {
        Err(ConversionError::NotFinite {
            spec: spec_name.to_string(),
            value: lin,
        })
    }
}
