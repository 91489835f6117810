use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::UnitSystem;

/// 서덜랜드 식의 기준값 묶음.
///
/// `reference_temperature`는 해당 단위계의 절대 눈금(켈빈 또는 랭킨) 값이며,
/// `sutherland_constant`도 같은 눈금을 따른다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SutherlandConstants {
    /// 기준 온도 T0
    pub reference_temperature: f64,
    /// 서덜랜드 상수 S
    pub sutherland_constant: f64,
    /// 기준 점도 μ0
    pub reference_viscosity: f64,
}

/// 점도 계산 입력 검사 오류.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ViscosityError {
    #[error("절대 영도보다 낮은 온도: {temperature}")]
    BelowAbsoluteZero { temperature: f64 },
    #[error("유한하지 않은 값: {temperature}")]
    NonFinite { temperature: f64 },
}

impl SutherlandConstants {
    /// 공기, SI (K, kg·m⁻¹·s⁻¹)
    pub const SI: SutherlandConstants = SutherlandConstants {
        reference_temperature: 323.0,
        sutherland_constant: 110.0,
        reference_viscosity: 1.716e-5,
    };

    /// 공기, USC (R, slug·ft⁻¹·s⁻¹)
    pub const USC: SutherlandConstants = SutherlandConstants {
        reference_temperature: 518.67,
        sutherland_constant: 198.72,
        reference_viscosity: 3.737e-7,
    };

    /// 단위계별 기본 상수.
    pub fn for_system(system: UnitSystem) -> SutherlandConstants {
        match system {
            UnitSystem::SI => Self::SI,
            UnitSystem::USC => Self::USC,
        }
    }

    pub fn viscosity(&self, temperature: f64) -> f64 {
        sutherland_viscosity(temperature, self)
    }

    /// 음의 절대 온도와 유한하지 않은 결과를 거부한다.
    ///
    /// 상수가 모두 양수이면 `T = -S` 특이점도 이 검사로 걸러진다.
    pub fn checked_viscosity(&self, temperature: f64) -> Result<f64, ViscosityError> {
        if !temperature.is_finite() {
            return Err(ViscosityError::NonFinite { temperature });
        }
        if temperature < 0.0 {
            return Err(ViscosityError::BelowAbsoluteZero { temperature });
        }
        let mu = self.viscosity(temperature);
        if !mu.is_finite() {
            return Err(ViscosityError::NonFinite { temperature });
        }
        Ok(mu)
    }
}

/// 서덜랜드 식으로 동점성계수를 계산한다.
///
/// μ = μ0 · (T/T0)^1.5 · (T0 + S) / (T + S)
///
/// `temperature`는 상수와 같은 절대 눈금이어야 하며 이 함수는 검사하지 않는다.
/// T = -S 이면 0으로 나누게 되어 inf/NaN이 나오고, 음의 T는 NaN이 된다.
pub fn sutherland_viscosity(temperature: f64, constants: &SutherlandConstants) -> f64 {
    let t0 = constants.reference_temperature;
    let s = constants.sutherland_constant;
    // 보정항을 먼저 묶어야 T = T0에서 μ0가 정확히 나온다
    let correction = (t0 + s) / (temperature + s);
    constants.reference_viscosity * (temperature / t0).powf(1.5) * correction
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_point_returns_reference_viscosity() {
        for c in [SutherlandConstants::SI, SutherlandConstants::USC] {
            assert_eq!(c.viscosity(c.reference_temperature), c.reference_viscosity);
        }
    }

    #[test]
    fn zero_kelvin_gives_zero() {
        assert_eq!(SutherlandConstants::SI.viscosity(0.0), 0.0);
        assert_eq!(SutherlandConstants::SI.checked_viscosity(0.0), Ok(0.0));
    }

    #[test]
    fn singularity_is_unguarded_in_raw_formula() {
        let c = SutherlandConstants::SI;
        assert!(!c.viscosity(-c.sutherland_constant).is_finite());
        assert!(matches!(
            c.checked_viscosity(-c.sutherland_constant),
            Err(ViscosityError::BelowAbsoluteZero { .. })
        ));
        assert!(matches!(
            c.checked_viscosity(f64::NAN),
            Err(ViscosityError::NonFinite { .. })
        ));
    }

    #[test]
    fn increases_with_temperature() {
        let c = SutherlandConstants::USC;
        let mut prev = c.viscosity(1.0);
        for i in 2..2000 {
            let mu = c.viscosity(i as f64);
            assert!(mu > prev, "not increasing at {i} R");
            prev = mu;
        }
    }
}
