#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use clap::Parser;
use eframe::{egui, App, Frame};
use egui_plot::{Line, Plot, PlotPoints};
use image::GenericImageView;
use rfd::FileDialog;
use std::{
    fs,
    path::{Path, PathBuf},
};
use sutherland_viscosity::{
    air::MAX_CURVE_POINTS,
    calculation::{self, CalculationRequest, CalculationResult},
    config::{self, UnitSystem},
    i18n::{self, keys},
    units::TemperatureUnit,
};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "sutherland_viscosity")]
struct Args {
    /// UI language: auto, ko or en
    #[arg(short = 'L', long, default_value = "auto")]
    lang: String,
    /// Config file path
    #[arg(long, default_value = config::CONFIG_FILE)]
    config: PathBuf,
}

fn main() -> Result<(), eframe::Error> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut viewport = egui::ViewportBuilder::default().with_inner_size([980.0, 660.0]);
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    let app_cfg = config::load_from(&args.config).unwrap_or_else(|e| {
        warn!(error = %e, "config not loaded, using defaults");
        config::Config::default()
    });
    // 명령행 언어는 이번 실행에만 쓰고 설정 파일에는 남기지 않는다
    let lang_override = (args.lang != "auto").then_some(args.lang);
    eframe::run_native(
        "Sutherland Viscosity Calculator",
        options,
        Box::new(move |cc| {
            if let Err(e) = setup_fonts(&cc.egui_ctx) {
                warn!("font fallback: {e}");
            }
            Box::new(GuiApp::new(app_cfg, args.config, lang_override))
        }),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "../assets/icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: img.to_rgba8().into_raw(),
        width: w,
        height: h,
    })
}

/// 바이너리 폰트 바이트를 egui에 등록한다.
fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    let font_name = name.to_string();
    fonts
        .font_data
        .insert(font_name.clone(), egui::FontData::from_owned(bytes));
    fonts
        .families
        .entry(egui::FontFamily::Proportional)
        .or_default()
        .insert(0, font_name.clone());
    fonts
        .families
        .entry(egui::FontFamily::Monospace)
        .or_default()
        .insert(0, font_name);
    ctx.set_fonts(fonts);
}

/// 한글을 표시하기 위해 사용 가능한 폰트를 우선 적용한다.
/// 1) assets/fonts/ 아래 폰트
/// 2) Windows 시스템 폰트(맑은 고딕/굴림)
/// 3) 일반적인 Linux/macOS CJK 폰트 경로
/// 모두 실패하면 Err를 돌려주고 egui 기본 폰트를 그대로 쓴다.
fn setup_fonts(ctx: &egui::Context) -> Result<(), String> {
    let mut candidates: Vec<std::path::PathBuf> = vec![
        "assets/fonts/malgun.ttf".into(),
        "assets/fonts/NanumGothic.ttf".into(),
    ];
    if let Some(windir) = std::env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        candidates.push(fonts.join("malgun.ttf"));
        candidates.push(fonts.join("gulim.ttc"));
    }
    candidates.push("/usr/share/fonts/truetype/nanum/NanumGothic.ttf".into());
    candidates.push("/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc".into());
    candidates.push("/System/Library/Fonts/AppleSDGothicNeo.ttc".into());

    for path in candidates.iter().filter(|p| p.exists()) {
        match fs::read(path) {
            Ok(bytes) => {
                apply_font_bytes(ctx, bytes, "hangul_font");
                info!(path = %path.display(), "font loaded");
                return Ok(());
            }
            Err(e) => warn!(path = %path.display(), error = %e, "font unreadable"),
        }
    }
    Err("no Hangul-capable font found".to_string())
}

fn label_with_tip(ui: &mut egui::Ui, text: &str, tip: &str) -> egui::Response {
    ui.label(text).on_hover_text(tip)
}

/// 작은 점도 값을 보기 좋게 그리기 위한 배율과 축 표기.
fn plot_scale(system: UnitSystem) -> (f64, &'static str) {
    match system {
        UnitSystem::SI => (1e5, "×10⁻⁵"),
        UnitSystem::USC => (1e7, "×10⁻⁷"),
    }
}

struct GuiApp {
    config: config::Config,
    config_path: PathBuf,
    /// `--lang`으로 받은 일회성 언어. 설정을 적용하면 사라진다.
    lang_override: Option<String>,
    tr: i18n::Translator,
    lang_input: String,
    lang_pack_dir_input: String,
    show_settings: bool,
    unit_system: UnitSystem,
    temp_unit: TemperatureUnit,
    temp_value: f64,
    result: Option<CalculationResult>,
    error: Option<String>,
    export_status: Option<String>,
}

impl GuiApp {
    fn new(config: config::Config, config_path: PathBuf, lang_override: Option<String>) -> Self {
        let lang_code = i18n::resolve_language(
            lang_override.as_deref().unwrap_or("auto"),
            Some(config.language.as_str()),
        );
        let tr = i18n::Translator::new_with_pack(&lang_code, config.language_pack_dir.as_deref());
        info!(lang = %lang_code, overrides = tr.has_overrides(), "GUI language resolved");
        let unit_system = config.unit_system;
        Self {
            lang_input: config.language.clone(),
            lang_pack_dir_input: config.language_pack_dir.clone().unwrap_or_default(),
            temp_unit: config.temperature_unit_for(unit_system),
            config,
            config_path,
            lang_override,
            tr,
            show_settings: false,
            unit_system,
            temp_value: 0.0,
            result: None,
            error: None,
            export_status: None,
        }
    }

    /// 단위계를 바꾸면 온도 단위도 그 단위계 기본값으로 돌린다.
    fn select_unit_system(&mut self, system: UnitSystem) {
        if self.unit_system != system {
            self.unit_system = system;
            self.temp_unit = system.default_temperature_unit();
        }
    }

    /// 계산 버튼 동작. 실패하면 이전 결과도 지운다.
    fn run_calculation(&mut self) {
        let request = CalculationRequest::new(self.unit_system, self.temp_unit, self.temp_value)
            .with_config(&self.config);
        let constants = self.config.constants_for(self.unit_system);
        self.export_status = None;
        match calculation::calculate_with(&request, &constants) {
            Ok(result) => {
                self.result = Some(result);
                self.error = None;
            }
            Err(e) => {
                self.result = None;
                self.error = Some(format!("{}: {e}", self.tr.t(keys::ERROR_PREFIX)));
            }
        }
    }

    fn export_csv(&mut self) {
        let Some(result) = &self.result else {
            return;
        };
        let Some(path) = FileDialog::new()
            .set_file_name("viscosity_curve.csv")
            .add_filter("CSV", &["csv"])
            .save_file()
        else {
            return;
        };
        self.export_status = Some(match fs::write(&path, result.curve_csv()) {
            Ok(()) => format!("{} {}", self.tr.t(keys::GUI_EXPORT_SAVED), path.display()),
            Err(e) => format!("{}: {e}", self.tr.t(keys::ERROR_PREFIX)),
        });
    }

    fn apply_settings(&mut self) {
        self.config.language = self.lang_input.trim().to_string();
        let dir = self.lang_pack_dir_input.trim();
        self.config.language_pack_dir = (!dir.is_empty()).then(|| dir.to_string());
        self.lang_override = None;
        let resolved = i18n::resolve_language(&self.config.language, None);
        self.tr =
            i18n::Translator::new_with_pack(&resolved, self.config.language_pack_dir.as_deref());
        self.config.unit_system = self.unit_system;
        match self.unit_system {
            UnitSystem::SI => self.config.temperature_unit_si = self.temp_unit,
            UnitSystem::USC => self.config.temperature_unit_usc = self.temp_unit,
        }
        match self.config.save_to(&self.config_path) {
            Ok(()) => info!(path = %self.config_path.display(), "settings saved"),
            Err(e) => warn!(error = %e, "config not saved"),
        }
    }

    fn ui_inputs(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        ui.heading(tr.t(keys::GUI_INPUT_HEADING));
        ui.add_space(8.0);
        egui::Grid::new("input_grid")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.label(tr.t(keys::GUI_UNIT_SYSTEM));
                ui.horizontal(|ui| {
                    for system in UnitSystem::ALL {
                        if ui.radio(self.unit_system == system, system.name()).clicked() {
                            self.select_unit_system(system);
                        }
                    }
                });
                ui.end_row();

                ui.label(tr.t(keys::GUI_TEMPERATURE_UNIT));
                egui::ComboBox::from_id_source("temp_unit")
                    .selected_text(self.temp_unit.label())
                    .show_ui(ui, |ui| {
                        for unit in TemperatureUnit::ALL {
                            ui.selectable_value(&mut self.temp_unit, unit, unit.label());
                        }
                    });
                ui.end_row();

                label_with_tip(
                    ui,
                    &tr.t(keys::GUI_TEMPERATURE_VALUE),
                    self.temp_unit.label(),
                );
                ui.add(
                    egui::DragValue::new(&mut self.temp_value)
                        .speed(0.5)
                        .suffix(format!(" {}", self.temp_unit.label())),
                );
                ui.end_row();
            });
        ui.add_space(8.0);
        if ui.button(tr.t(keys::GUI_CALCULATE)).clicked() {
            self.run_calculation();
        }
    }

    fn ui_results(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        if let Some(err) = &self.error {
            ui.colored_label(egui::Color32::RED, err.as_str());
            return;
        }
        let Some(result) = &self.result else {
            return;
        };
        ui.label(
            egui::RichText::new(format!(
                "{} {}",
                tr.t(keys::RESULT_CONVERTED_TEMPERATURE),
                result.temperature_display()
            ))
            .strong(),
        );
        ui.label(
            egui::RichText::new(format!(
                "{} {}",
                tr.t(keys::RESULT_VISCOSITY),
                result.viscosity_display()
            ))
            .strong(),
        );
        ui.add_space(6.0);

        let system = result.unit_system;
        let (scale, scale_label) = plot_scale(system);
        let points: Vec<[f64; 2]> = result
            .curve
            .iter()
            .map(|p| [p.temperature, p.viscosity * scale])
            .collect();
        let x_label = i18n::fill(
            &tr.t(keys::GUI_PLOT_X),
            &[("unit", system.temperature_label().to_string())],
        );
        let y_label = format!(
            "{} ({scale_label} {})",
            tr.t(keys::GUI_PLOT_Y),
            system.viscosity_label()
        );
        ui.label(tr.t(keys::GUI_PLOT_TITLE));
        Plot::new("viscosity_plot")
            .height(320.0)
            .x_axis_label(x_label)
            .y_axis_label(y_label)
            .show(ui, |plot_ui| {
                let line = Line::new(PlotPoints::from(points)).name(tr.t(keys::GUI_PLOT_TITLE));
                plot_ui.line(line);
            });

        let mut export = false;
        ui.horizontal(|ui| {
            export = ui.button(tr.t(keys::GUI_EXPORT_CSV)).clicked();
            if let Some(status) = &self.export_status {
                ui.label(status);
            }
        });
        if export {
            self.export_csv();
        }
    }

    fn ui_settings_window(&mut self, ctx: &egui::Context) {
        let tr = self.tr.clone();
        let mut open = self.show_settings;
        let mut apply = false;
        egui::Window::new(tr.t(keys::GUI_SETTINGS))
            .collapsible(false)
            .resizable(false)
            .open(&mut open)
            .show(ctx, |ui| {
                egui::Grid::new("settings_grid").num_columns(2).show(ui, |ui| {
                    ui.label(tr.t(keys::GUI_LANGUAGE));
                    ui.text_edit_singleline(&mut self.lang_input);
                    ui.end_row();
                    ui.label(tr.t(keys::GUI_LANGUAGE_PACK_DIR));
                    ui.text_edit_singleline(&mut self.lang_pack_dir_input);
                    ui.end_row();
                    ui.label(tr.t(keys::PROMPT_CURVE_POINTS).trim_end_matches([':', ' ']));
                    ui.add(
                        egui::DragValue::new(&mut self.config.curve_points)
                            .clamp_range(1..=MAX_CURVE_POINTS),
                    );
                    ui.end_row();
                });
                apply = ui.button(tr.t(keys::GUI_APPLY)).clicked();
            });
        if apply {
            self.apply_settings();
            open = false;
        }
        self.show_settings = open;
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        let tr = self.tr.clone();
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(tr.t(keys::APP_TITLE));
                ui.separator();
                if ui.button(tr.t(keys::GUI_SETTINGS)).clicked() {
                    self.show_settings = true;
                }
            });
        });

        if self.show_settings {
            self.ui_settings_window(ctx);
        }

        egui::SidePanel::left("inputs")
            .resizable(false)
            .min_width(260.0)
            .show(ctx, |ui| self.ui_inputs(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.label(tr.t(keys::APP_DESCRIPTION));
                ui.separator();
                self.ui_results(ui);
                ui.separator();
                ui.heading(tr.t(keys::GUI_HELP_HEADING));
                ui.label(tr.t(keys::GUI_HELP_BODY));
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app(config: config::Config) -> GuiApp {
        GuiApp::new(config, PathBuf::from(config::CONFIG_FILE), None)
    }

    #[test]
    fn switching_system_resets_unit_to_default() {
        let mut app = test_app(config::Config::default());
        app.temp_unit = TemperatureUnit::Fahrenheit;
        app.select_unit_system(UnitSystem::USC);
        assert_eq!(app.temp_unit, TemperatureUnit::Rankine);
        app.select_unit_system(UnitSystem::SI);
        assert_eq!(app.temp_unit, TemperatureUnit::Celsius);
    }

    #[test]
    fn calculation_fills_result_with_default_curve() {
        let mut app = test_app(config::Config::default());
        app.temp_value = 15.0;
        app.run_calculation();
        let result = app.result.as_ref().expect("result");
        assert_eq!(result.temperature_display(), "288.15 K");
        assert_eq!(result.curve.len(), 100);
        assert!(app.error.is_none());
    }

    #[test]
    fn failed_calculation_clears_previous_result() {
        let mut app = test_app(config::Config::default());
        app.run_calculation();
        assert!(app.result.is_some());
        app.temp_unit = TemperatureUnit::Kelvin;
        app.temp_value = -1.0;
        app.run_calculation();
        assert!(app.result.is_none());
        assert!(app.error.is_some());
    }

    #[test]
    fn lang_flag_is_not_persisted_on_apply() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gui.toml");
        let mut app = GuiApp::new(config::Config::default(), path.clone(), Some("ko".into()));
        assert_eq!(app.tr.language(), i18n::Language::Ko);
        assert_eq!(app.lang_input, "auto");
        app.apply_settings();
        assert!(app.lang_override.is_none());
        let saved = config::load_from(&path).unwrap();
        assert_eq!(saved.language, "auto");
    }
}
