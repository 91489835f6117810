use std::io::{self, Write};

use crate::app::AppError;
use crate::air::MAX_CURVE_POINTS;
use crate::calculation::{self, CalculationRequest, CalculationResult};
use crate::config::{Config, UnitSystem};
use crate::conversion;
use crate::i18n::{self, keys, Translator};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Calculate,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    println!("{}", tr.t(keys::MAIN_MENU_CALCULATE));
    println!("{}", tr.t(keys::MAIN_MENU_SETTINGS));
    println!("{}", tr.t(keys::MAIN_MENU_EXIT));
    loop {
        let sel = read_line(&tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::Calculate),
            "2" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 점도 계산 메뉴를 처리한다. 잘못된 단위는 알리고 메뉴로 돌아간다.
pub fn handle_calculation(tr: &Translator, cfg: &mut Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::CALC_HEADING));
    let sel = read_line(&i18n::fill(
        &tr.t(keys::PROMPT_UNIT_SYSTEM),
        &[("default", cfg.unit_system.name().to_string())],
    ))?;
    let system = match sel.trim() {
        "" => cfg.unit_system,
        "1" => UnitSystem::SI,
        "2" => UnitSystem::USC,
        other => match conversion::parse_unit_system(other) {
            Ok(s) => s,
            Err(e) => {
                print_error(tr, &e);
                return Ok(());
            }
        },
    };

    let default_unit = cfg.temperature_unit_for(system);
    let sel = read_line(&i18n::fill(
        &tr.t(keys::PROMPT_TEMPERATURE_UNIT),
        &[("default", default_unit.symbol().to_string())],
    ))?;
    let unit = if sel.trim().is_empty() {
        default_unit
    } else {
        match conversion::parse_temperature_unit(&sel) {
            Ok(u) => u,
            Err(e) => {
                print_error(tr, &e);
                return Ok(());
            }
        }
    };
    let value = read_f64_or(tr, &tr.t(keys::PROMPT_TEMPERATURE_VALUE), 0.0)?;

    let request = CalculationRequest::new(system, unit, value).with_config(cfg);
    match calculation::calculate_with(&request, &cfg.constants_for(system)) {
        Ok(result) => {
            cfg.unit_system = system;
            match system {
                UnitSystem::SI => cfg.temperature_unit_si = unit,
                UnitSystem::USC => cfg.temperature_unit_usc = unit,
            }
            let show = read_line(&tr.t(keys::PROMPT_SHOW_CURVE))?;
            let show_curve = matches!(show.trim().to_lowercase().as_str(), "y" | "yes");
            print_result(tr, &result, show_curve);
        }
        Err(e) => print_error(tr, &e),
    }
    Ok(())
}

/// 설정 메뉴를 처리한다.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!(
        "{}",
        i18n::fill(
            &tr.t(keys::SETTINGS_CURRENT),
            &[
                ("system", cfg.unit_system.name().to_string()),
                ("points", cfg.curve_points.to_string()),
                ("reference", cfg.reference_celsius.to_string()),
            ],
        )
    );
    println!("{}", tr.t(keys::SETTINGS_OPTIONS));
    let sel = read_line(&tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    let changed = match sel.trim() {
        "" => return Ok(()),
        "1" => {
            let s = read_line(&i18n::fill(
                &tr.t(keys::PROMPT_UNIT_SYSTEM),
                &[("default", cfg.unit_system.name().to_string())],
            ))?;
            let system = match s.trim() {
                "1" => Some(UnitSystem::SI),
                "2" => Some(UnitSystem::USC),
                other => conversion::parse_unit_system(other).ok(),
            };
            if let Some(system) = system {
                cfg.unit_system = system;
            }
            system.is_some()
        }
        "2" => {
            let n = read_f64_or(tr, &tr.t(keys::PROMPT_CURVE_POINTS), 0.0)?;
            match parse_point_count(n) {
                Some(points) => {
                    cfg.curve_points = points;
                    true
                }
                None => false,
            }
        }
        "3" => {
            let c = read_f64_or(tr, &tr.t(keys::PROMPT_REFERENCE_C), cfg.reference_celsius)?;
            cfg.reference_celsius = c;
            true
        }
        _ => false,
    };
    if changed {
        println!("{}", tr.t(keys::SETTINGS_SAVED));
    } else {
        println!("{}", tr.t(keys::SETTINGS_INVALID));
    }
    Ok(())
}

/// 계산 결과를 출력한다.
pub fn print_result(tr: &Translator, result: &CalculationResult, show_curve: bool) {
    println!(
        "{} {}",
        tr.t(keys::RESULT_CONVERTED_TEMPERATURE),
        result.temperature_display()
    );
    println!("{} {}", tr.t(keys::RESULT_VISCOSITY), result.viscosity_display());
    if show_curve {
        println!(
            "{}",
            i18n::fill(
                &tr.t(keys::RESULT_CURVE_HEADER),
                &[("unit", result.unit_system.temperature_label().to_string())],
            )
        );
        for p in &result.curve {
            println!("{:.2}\t{:.6e}", p.temperature, p.viscosity);
        }
    }
}

/// 1 이상 상한 이하의 정수만 곡선 점 수로 받는다.
fn parse_point_count(n: f64) -> Option<usize> {
    if n >= 1.0 && n <= MAX_CURVE_POINTS as f64 && n.fract() == 0.0 {
        Some(n as usize)
    } else {
        None
    }
}

fn print_error(tr: &Translator, err: &dyn std::error::Error) {
    println!("{}: {err}", tr.t(keys::ERROR_PREFIX));
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf)?;
    Ok(buf)
}

/// 숫자를 읽는다. 빈 입력이면 `default`를 쓴다.
fn read_f64_or(tr: &Translator, prompt: &str, default: f64) -> Result<f64, AppError> {
    loop {
        let s = read_line(prompt)?;
        let s = s.trim();
        if s.is_empty() {
            return Ok(default);
        }
        match s.parse::<f64>() {
            Ok(v) if v.is_finite() => return Ok(v),
            _ => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}
