use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use sutherland_viscosity::{
    air::MAX_CURVE_POINTS,
    app::{self, AppError, OneShot},
    config::{self, UnitSystem},
    i18n,
    units::TemperatureUnit,
};

#[derive(Parser)]
#[command(name = "sutherland_viscosity_cli")]
#[command(about = "Dynamic viscosity of air from Sutherland's formula", long_about = None)]
struct Cli {
    /// Unit system: si or usc
    #[arg(short, long)]
    system: Option<UnitSystem>,
    /// Temperature unit symbol: C, F, K or R
    #[arg(short, long)]
    unit: Option<TemperatureUnit>,
    /// Temperature value; omit to start the interactive menu
    #[arg(short, long, allow_negative_numbers = true)]
    value: Option<f64>,
    /// Number of curve samples, 1 to 10000 (overrides config)
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..=MAX_CURVE_POINTS as u64))]
    points: Option<u64>,
    /// Print the sampled curve after the result
    #[arg(long)]
    curve: bool,
    /// Write the sampled curve to a CSV file
    #[arg(long)]
    csv: Option<PathBuf>,
    /// UI language: auto, ko or en
    #[arg(short = 'L', long, default_value = "auto")]
    lang: String,
    /// Config file path
    #[arg(long, default_value = config::CONFIG_FILE)]
    config: PathBuf,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 단발 계산 또는 대화형 메뉴를 실행한다.
fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();
    match try_run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("오류: {err}");
            ExitCode::FAILURE
        }
    }
}

fn try_run(cli: Cli) -> Result<(), AppError> {
    let mut cfg = config::load_from(&cli.config)?;
    let lang = i18n::resolve_language(&cli.lang, Some(cfg.language.as_str()));
    let tr = i18n::Translator::new_with_pack(&lang, cfg.language_pack_dir.as_deref());

    match cli.value {
        Some(value) => {
            // 단발 실행의 점 수는 설정 파일에 저장하지 않는다
            if let Some(points) = cli.points {
                cfg.curve_points = points as usize;
            }
            let unit_system = cli.system.unwrap_or(cfg.unit_system);
            let job = OneShot {
                unit_system,
                unit: cli.unit.unwrap_or_else(|| cfg.temperature_unit_for(unit_system)),
                value,
                print_curve: cli.curve,
                csv_path: cli.csv,
            };
            app::run_once(&cfg, &tr, &job)?;
        }
        None => {
            if let Some(system) = cli.system {
                cfg.unit_system = system;
            }
            app::run(&mut cfg, &cli.config, &tr)?;
        }
    }
    Ok(())
}
