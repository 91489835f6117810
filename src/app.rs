use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::calculation::{self, CalculationError, CalculationRequest, CalculationResult};
use crate::config::{Config, ConfigError, UnitSystem};
use crate::i18n::{self, Translator};
use crate::ui_cli::{self, MenuChoice};
use crate::units::TemperatureUnit;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 파일 입출력 오류
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    /// 점도 계산 오류
    #[error("계산 오류: {0}")]
    Calculation(#[from] CalculationError),
    /// 곡선 CSV 저장 오류
    #[error("CSV 저장 실패 ({path}): {source}")]
    CsvWrite {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// 명령행 인자로 한 번만 계산하는 작업.
#[derive(Debug, Clone)]
pub struct OneShot {
    pub unit_system: UnitSystem,
    pub unit: TemperatureUnit,
    pub value: f64,
    pub print_curve: bool,
    pub csv_path: Option<PathBuf>,
}

/// CLI 애플리케이션의 메인 루프를 실행한다. 설정은 읽어 온 `config_path`에 다시 저장한다.
pub fn run(config: &mut Config, config_path: &Path, tr: &Translator) -> Result<(), AppError> {
    loop {
        match ui_cli::main_menu(tr)? {
            MenuChoice::Calculate => ui_cli::handle_calculation(tr, config)?,
            MenuChoice::Settings => {
                ui_cli::handle_settings(tr, config)?;
                save_settings(config, config_path)?;
            }
            MenuChoice::Exit => {
                save_settings(config, config_path)?;
                println!("{}", tr.t(i18n::keys::APP_EXIT));
                break;
            }
        }
    }
    Ok(())
}

/// 현재 설정을 `path`에 기록한다.
pub fn save_settings(config: &Config, path: &Path) -> Result<(), AppError> {
    config.save_to(path)?;
    info!(path = %path.display(), "settings saved");
    Ok(())
}

/// 한 번 계산하고 결과를 출력한다. CSV 경로가 있으면 먼저 기록한다.
///
/// 계산이나 저장이 실패하면 아무것도 출력하지 않는다.
pub fn run_once(
    config: &Config,
    tr: &Translator,
    job: &OneShot,
) -> Result<CalculationResult, AppError> {
    let request =
        CalculationRequest::new(job.unit_system, job.unit, job.value).with_config(config);
    let result =
        calculation::calculate_with(&request, &config.constants_for(job.unit_system))?;
    if let Some(path) = &job.csv_path {
        fs::write(path, result.curve_csv()).map_err(|source| AppError::CsvWrite {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), points = result.curve.len(), "curve exported");
    }
    ui_cli::print_result(tr, &result, job.print_curve);
    Ok(result)
}
