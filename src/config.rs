use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

use crate::air::{SutherlandConstants, MAX_CURVE_POINTS};
use crate::units::{AbsoluteScale, TemperatureUnit};

/// 기본 설정 파일 경로.
pub const CONFIG_FILE: &str = "config.toml";

/// 계산에 사용하는 단위계. 상수 묶음과 절대 온도 눈금을 함께 결정한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitSystem {
    /// 켈빈, kg·m⁻¹·s⁻¹
    SI,
    /// 랭킨, slug·ft⁻¹·s⁻¹
    USC,
}

impl UnitSystem {
    pub const ALL: [UnitSystem; 2] = [UnitSystem::SI, UnitSystem::USC];

    pub fn name(self) -> &'static str {
        match self {
            UnitSystem::SI => "SI",
            UnitSystem::USC => "USC",
        }
    }

    /// 서덜랜드 식에 넣을 절대 온도 눈금.
    pub fn scale(self) -> AbsoluteScale {
        match self {
            UnitSystem::SI => AbsoluteScale::Kelvin,
            UnitSystem::USC => AbsoluteScale::Rankine,
        }
    }

    pub fn temperature_label(self) -> &'static str {
        self.scale().symbol()
    }

    pub fn viscosity_label(self) -> &'static str {
        match self {
            UnitSystem::SI => "kg·m⁻¹·s⁻¹",
            UnitSystem::USC => "slug·ft⁻¹·s⁻¹",
        }
    }

    /// 단위계를 고를 때 미리 선택되는 온도 단위.
    pub fn default_temperature_unit(self) -> TemperatureUnit {
        match self {
            UnitSystem::SI => TemperatureUnit::Celsius,
            UnitSystem::USC => TemperatureUnit::Rankine,
        }
    }
}

/// 단위계별 서덜랜드 상수. 설정 파일에서 덮어쓸 수 있다.
///
/// 표에 빠진 항목은 해당 단위계의 기본 상수로 채운다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawConstants")]
pub struct ConstantsConfig {
    pub si: SutherlandConstants,
    pub usc: SutherlandConstants,
}

impl Default for ConstantsConfig {
    fn default() -> Self {
        Self {
            si: SutherlandConstants::SI,
            usc: SutherlandConstants::USC,
        }
    }
}

/// 설정 파일의 `[constants.*]` 표. 모든 항목이 선택 사항이다.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConstants {
    si: PartialConstants,
    usc: PartialConstants,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PartialConstants {
    reference_temperature: Option<f64>,
    sutherland_constant: Option<f64>,
    reference_viscosity: Option<f64>,
}

impl PartialConstants {
    fn or(self, base: SutherlandConstants) -> SutherlandConstants {
        SutherlandConstants {
            reference_temperature: self
                .reference_temperature
                .unwrap_or(base.reference_temperature),
            sutherland_constant: self.sutherland_constant.unwrap_or(base.sutherland_constant),
            reference_viscosity: self.reference_viscosity.unwrap_or(base.reference_viscosity),
        }
    }
}

impl From<RawConstants> for ConstantsConfig {
    fn from(raw: RawConstants) -> Self {
        Self {
            si: raw.si.or(SutherlandConstants::SI),
            usc: raw.usc.or(SutherlandConstants::USC),
        }
    }
}

impl ConstantsConfig {
    pub fn for_system(&self, system: UnitSystem) -> SutherlandConstants {
        match system {
            UnitSystem::SI => self.si,
            UnitSystem::USC => self.usc,
        }
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub unit_system: UnitSystem,
    pub temperature_unit_si: TemperatureUnit,
    pub temperature_unit_usc: TemperatureUnit,
    /// 그래프 샘플 개수
    pub curve_points: usize,
    /// 그래프 시작점(해면 기준 온도) [°C]
    pub reference_celsius: f64,
    pub language: String,
    pub language_pack_dir: Option<String>,
    pub constants: ConstantsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            unit_system: UnitSystem::SI,
            temperature_unit_si: UnitSystem::SI.default_temperature_unit(),
            temperature_unit_usc: UnitSystem::USC.default_temperature_unit(),
            curve_points: crate::air::DEFAULT_CURVE_POINTS,
            reference_celsius: crate::calculation::SEA_LEVEL_REFERENCE_C,
            language: "auto".to_string(),
            language_pack_dir: None,
            constants: ConstantsConfig::default(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 파일 입출력 오류
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// TOML 역직렬화 오류
    #[error("설정 파싱 오류: {0}")]
    Parse(#[from] toml::de::Error),
    /// TOML 직렬화 오류
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// 값 범위 오류
    #[error("잘못된 설정값: {0}")]
    Invalid(String),
}

impl Config {
    /// 단위계에 맞는 온도 단위 선택값.
    pub fn temperature_unit_for(&self, system: UnitSystem) -> TemperatureUnit {
        match system {
            UnitSystem::SI => self.temperature_unit_si,
            UnitSystem::USC => self.temperature_unit_usc,
        }
    }

    pub fn constants_for(&self, system: UnitSystem) -> SutherlandConstants {
        self.constants.for_system(system)
    }

    /// 값 범위를 검사한다.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_CURVE_POINTS).contains(&self.curve_points) {
            return Err(ConfigError::Invalid(format!(
                "curve_points must be between 1 and {MAX_CURVE_POINTS}"
            )));
        }
        if !self.reference_celsius.is_finite() {
            return Err(ConfigError::Invalid("reference_celsius must be finite".into()));
        }
        for system in UnitSystem::ALL {
            let c = self.constants_for(system);
            if !(c.reference_temperature > 0.0 && c.reference_temperature.is_finite()) {
                return Err(ConfigError::Invalid(format!(
                    "{} reference_temperature must be positive",
                    system.name()
                )));
            }
            if !(c.reference_viscosity > 0.0 && c.reference_viscosity.is_finite()) {
                return Err(ConfigError::Invalid(format!(
                    "{} reference_viscosity must be positive",
                    system.name()
                )));
            }
            if !(c.sutherland_constant > 0.0 && c.sutherland_constant.is_finite()) {
                return Err(ConfigError::Invalid(format!(
                    "{} sutherland_constant must be positive",
                    system.name()
                )));
            }
        }
        Ok(())
    }

    /// 설정을 `path`에 저장한다. 읽어 온 경로에 다시 쓰는 데 쓴다.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path.as_ref(), content)?;
        debug!(path = %path.as_ref().display(), "config saved");
        Ok(())
    }
}

/// config.toml을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default() -> Result<Config, ConfigError> {
    load_from(CONFIG_FILE)
}

/// 지정 경로의 설정을 로드한다. 파일이 없으면 기본 설정을 그 경로에 기록한다.
pub fn load_from(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        cfg.validate()?;
        Ok(cfg)
    } else {
        let cfg = Config::default();
        cfg.save_to(path)?;
        info!(path = %path.display(), "created default config");
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_fills_defaults() {
        let cfg: Config = toml::from_str("unit_system = \"USC\"\ncurve_points = 25\n").unwrap();
        assert_eq!(cfg.unit_system, UnitSystem::USC);
        assert_eq!(cfg.curve_points, 25);
        assert_eq!(cfg.temperature_unit_usc, TemperatureUnit::Rankine);
        assert_eq!(cfg.constants_for(UnitSystem::SI), SutherlandConstants::SI);
    }

    #[test]
    fn zero_points_rejected() {
        let cfg = Config {
            curve_points: 0,
            ..Config::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn oversized_point_count_rejected() {
        let cfg = Config {
            curve_points: MAX_CURVE_POINTS + 1,
            ..Config::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
        let cfg = Config {
            curve_points: MAX_CURVE_POINTS,
            ..Config::default()
        };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_constants_table_keeps_builtin_values() {
        let cfg: Config =
            toml::from_str("[constants.si]\nreference_temperature = 273.15\n").unwrap();
        let si = cfg.constants_for(UnitSystem::SI);
        assert_eq!(si.reference_temperature, 273.15);
        assert_eq!(si.sutherland_constant, 110.0);
        assert_eq!(si.reference_viscosity, 1.716e-5);
        assert_eq!(cfg.constants_for(UnitSystem::USC), SutherlandConstants::USC);
    }

    #[test]
    fn usc_only_override_leaves_si_alone() {
        let cfg: Config = toml::from_str("[constants.usc]\nsutherland_constant = 200.0\n").unwrap();
        let usc = cfg.constants_for(UnitSystem::USC);
        assert_eq!(usc.sutherland_constant, 200.0);
        assert_eq!(usc.reference_temperature, 518.67);
        assert_eq!(usc.reference_viscosity, 3.737e-7);
        assert_eq!(cfg.constants_for(UnitSystem::SI), SutherlandConstants::SI);
    }

    #[test]
    fn system_metadata() {
        assert_eq!(UnitSystem::SI.temperature_label(), "K");
        assert_eq!(UnitSystem::USC.temperature_label(), "R");
        assert_eq!(UnitSystem::SI.default_temperature_unit(), TemperatureUnit::Celsius);
        assert_eq!(UnitSystem::USC.viscosity_label(), "slug·ft⁻¹·s⁻¹");
    }
}
