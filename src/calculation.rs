//! 버튼 한 번에 해당하는 계산 흐름: 온도 환산 → 단일점 점도 → 곡선 샘플링.

use thiserror::Error;
use tracing::debug;

use crate::air::{self, CurvePoint, SutherlandConstants, ViscosityError};
use crate::config::{Config, UnitSystem};
use crate::conversion::{self, ConversionError};
use crate::units::{self, TemperatureUnit};

/// 해면 기준 온도 [°C]. 곡선의 시작점이다.
pub const SEA_LEVEL_REFERENCE_C: f64 = 15.0;

/// 계산 중 발생 가능한 오류. 어느 단계든 실패하면 결과 전체를 버린다.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalculationError {
    #[error(transparent)]
    Conversion(#[from] ConversionError),
    #[error(transparent)]
    Viscosity(#[from] ViscosityError),
    #[error("곡선 샘플 개수는 1 이상이어야 합니다")]
    EmptyCurve,
    #[error("곡선 샘플 개수 {requested}개가 상한 {max}개를 넘습니다")]
    TooManyPoints { requested: usize, max: usize },
}

/// 계산 요청 입력.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculationRequest {
    pub unit_system: UnitSystem,
    pub unit: TemperatureUnit,
    pub value: f64,
    pub curve_points: usize,
    pub reference_celsius: f64,
}

impl CalculationRequest {
    /// 기본 곡선 설정(100점, 15 °C 기준)으로 요청을 만든다.
    pub fn new(unit_system: UnitSystem, unit: TemperatureUnit, value: f64) -> Self {
        Self {
            unit_system,
            unit,
            value,
            curve_points: air::DEFAULT_CURVE_POINTS,
            reference_celsius: SEA_LEVEL_REFERENCE_C,
        }
    }

    /// 기호 문자열로 된 단위를 해석하여 요청을 만든다.
    pub fn from_symbol(
        unit_system: UnitSystem,
        symbol: &str,
        value: f64,
    ) -> Result<Self, ConversionError> {
        let unit = conversion::parse_temperature_unit(symbol)?;
        Ok(Self::new(unit_system, unit, value))
    }

    /// 설정의 곡선 개수와 기준 온도를 적용한다.
    pub fn with_config(mut self, cfg: &Config) -> Self {
        self.curve_points = cfg.curve_points;
        self.reference_celsius = cfg.reference_celsius;
        self
    }
}

/// 한 번의 계산 결과. 저장하지 않고 표시 후 버린다.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationResult {
    pub unit_system: UnitSystem,
    /// 절대 눈금으로 환산된 입력 온도
    pub temperature: f64,
    pub viscosity: f64,
    /// 곡선 시작점(기준 온도의 절대 눈금 값)
    pub reference_temperature: f64,
    pub curve: Vec<CurvePoint>,
}

impl CalculationResult {
    /// 소수 둘째 자리까지, 예: `288.15 K`
    pub fn temperature_display(&self) -> String {
        format_temperature(self.temperature, self.unit_system)
    }

    /// 소수점 아래 여섯 자리 지수 표기, 예: `1.572471e-5 kg·m⁻¹·s⁻¹`
    pub fn viscosity_display(&self) -> String {
        format_viscosity(self.viscosity, self.unit_system)
    }

    pub fn curve_csv(&self) -> String {
        air::curve_to_csv(&self.curve, self.unit_system.scale())
    }
}

pub fn format_temperature(value: f64, system: UnitSystem) -> String {
    format!("{value:.2} {}", system.temperature_label())
}

pub fn format_viscosity(value: f64, system: UnitSystem) -> String {
    format!("{value:.6e} {}", system.viscosity_label())
}

/// 기본 상수로 계산한다.
pub fn calculate(request: &CalculationRequest) -> Result<CalculationResult, CalculationError> {
    let constants = SutherlandConstants::for_system(request.unit_system);
    calculate_with(request, &constants)
}

/// 지정한 상수 묶음으로 계산한다.
pub fn calculate_with(
    request: &CalculationRequest,
    constants: &SutherlandConstants,
) -> Result<CalculationResult, CalculationError> {
    if request.curve_points == 0 {
        return Err(CalculationError::EmptyCurve);
    }
    if request.curve_points > air::MAX_CURVE_POINTS {
        return Err(CalculationError::TooManyPoints {
            requested: request.curve_points,
            max: air::MAX_CURVE_POINTS,
        });
    }
    let scale = request.unit_system.scale();
    let temperature = units::convert_temperature(request.value, request.unit, scale);
    let reference_temperature = units::convert_temperature(
        request.reference_celsius,
        TemperatureUnit::Celsius,
        scale,
    );
    let viscosity = constants.checked_viscosity(temperature)?;
    constants.checked_viscosity(reference_temperature)?;
    let curve = air::sample(
        reference_temperature,
        temperature,
        request.curve_points,
        constants,
    );
    debug!(
        system = request.unit_system.name(),
        unit = %request.unit.symbol(),
        value = request.value,
        temperature,
        viscosity,
        points = curve.len(),
        "viscosity calculated"
    );
    Ok(CalculationResult {
        unit_system: request.unit_system,
        temperature,
        viscosity,
        reference_temperature,
        curve,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn below_absolute_zero_aborts() {
        let req = CalculationRequest::new(UnitSystem::SI, TemperatureUnit::Celsius, -300.0);
        assert!(matches!(
            calculate(&req),
            Err(CalculationError::Viscosity(ViscosityError::BelowAbsoluteZero { .. }))
        ));
    }

    #[test]
    fn display_formats() {
        assert_eq!(format_temperature(288.15, UnitSystem::SI), "288.15 K");
        assert_eq!(format_temperature(518.67, UnitSystem::USC), "518.67 R");
        assert_eq!(
            format_viscosity(3.737e-7, UnitSystem::USC),
            "3.737000e-7 slug·ft⁻¹·s⁻¹"
        );
    }

    #[test]
    fn zero_points_rejected() {
        let mut req = CalculationRequest::new(UnitSystem::SI, TemperatureUnit::Kelvin, 300.0);
        req.curve_points = 0;
        assert_eq!(calculate(&req), Err(CalculationError::EmptyCurve));
    }

    #[test]
    fn point_count_above_limit_rejected() {
        let mut req = CalculationRequest::new(UnitSystem::SI, TemperatureUnit::Kelvin, 300.0);
        req.curve_points = air::MAX_CURVE_POINTS + 1;
        assert_eq!(
            calculate(&req),
            Err(CalculationError::TooManyPoints {
                requested: air::MAX_CURVE_POINTS + 1,
                max: air::MAX_CURVE_POINTS,
            })
        );
        req.curve_points = usize::MAX;
        assert!(calculate(&req).is_err());
        req.curve_points = air::MAX_CURVE_POINTS;
        assert_eq!(calculate(&req).map(|r| r.curve.len()), Ok(air::MAX_CURVE_POINTS));
    }
}
