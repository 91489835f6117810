use std::str::FromStr;

use thiserror::Error;

use crate::config::UnitSystem;
use crate::units::{self, AbsoluteScale, TemperatureUnit};

/// 단위 기호 해석 시 발생 가능한 오류.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// C, F, K, R 이외의 온도 단위 기호
    #[error("지원하지 않는 온도 단위: {0}")]
    InvalidUnit(String),
    /// SI, USC 이외의 단위계
    #[error("지원하지 않는 단위계: {0}")]
    InvalidUnitSystem(String),
}

/// 문자열로 전달된 온도 단위 기호를 enum으로 변환한다.
///
/// 대소문자를 구분하지 않으며 `celsius`, `°C` 같은 표기도 허용한다.
pub fn parse_temperature_unit(s: &str) -> Result<TemperatureUnit, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "c" | "celsius" | "°c" => Ok(TemperatureUnit::Celsius),
        "f" | "fahrenheit" | "°f" => Ok(TemperatureUnit::Fahrenheit),
        "k" | "kelvin" => Ok(TemperatureUnit::Kelvin),
        "r" | "rankine" | "°r" => Ok(TemperatureUnit::Rankine),
        _ => Err(ConversionError::InvalidUnit(s.to_string())),
    }
}

/// 단위계 이름을 enum으로 변환한다.
pub fn parse_unit_system(s: &str) -> Result<UnitSystem, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "si" => Ok(UnitSystem::SI),
        "usc" | "us" | "imperial" => Ok(UnitSystem::USC),
        _ => Err(ConversionError::InvalidUnitSystem(s.to_string())),
    }
}

impl FromStr for TemperatureUnit {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_temperature_unit(s)
    }
}

impl FromStr for UnitSystem {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_unit_system(s)
    }
}

/// 단위 기호로 지정된 온도를 켈빈으로 변환한다.
pub fn to_kelvin(value: f64, symbol: &str) -> Result<f64, ConversionError> {
    convert(value, symbol, AbsoluteScale::Kelvin)
}

/// 단위 기호로 지정된 온도를 랭킨으로 변환한다.
pub fn to_rankine(value: f64, symbol: &str) -> Result<f64, ConversionError> {
    convert(value, symbol, AbsoluteScale::Rankine)
}

/// 단위 기호를 해석한 뒤 목표 절대 눈금으로 환산한다.
pub fn convert(value: f64, symbol: &str, target: AbsoluteScale) -> Result<f64, ConversionError> {
    let unit = parse_temperature_unit(symbol)?;
    Ok(units::convert_temperature(value, unit, target))
}
