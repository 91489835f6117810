use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;
use tracing::warn;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const APP_TITLE: &str = "general.app_title";
    pub const APP_DESCRIPTION: &str = "general.app_description";
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_CALCULATE: &str = "main_menu.calculate";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";

    pub const CALC_HEADING: &str = "calc.heading";
    pub const PROMPT_UNIT_SYSTEM: &str = "prompt.unit_system";
    pub const PROMPT_TEMPERATURE_UNIT: &str = "prompt.temperature_unit";
    pub const PROMPT_TEMPERATURE_VALUE: &str = "prompt.temperature_value";
    pub const PROMPT_SHOW_CURVE: &str = "prompt.show_curve";
    pub const RESULT_CONVERTED_TEMPERATURE: &str = "result.converted_temperature";
    pub const RESULT_VISCOSITY: &str = "result.viscosity";
    pub const RESULT_CURVE_HEADER: &str = "result.curve_header";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT: &str = "settings.current";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_PROMPT_CHANGE: &str = "settings.prompt_change";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";
    pub const PROMPT_CURVE_POINTS: &str = "prompt.curve_points";
    pub const PROMPT_REFERENCE_C: &str = "prompt.reference_celsius";

    pub const GUI_INPUT_HEADING: &str = "gui.input.heading";
    pub const GUI_UNIT_SYSTEM: &str = "gui.input.unit_system";
    pub const GUI_TEMPERATURE_UNIT: &str = "gui.input.temperature_unit";
    pub const GUI_TEMPERATURE_VALUE: &str = "gui.input.temperature_value";
    pub const GUI_CALCULATE: &str = "gui.input.calculate";
    pub const GUI_PLOT_TITLE: &str = "gui.plot.title";
    pub const GUI_PLOT_X: &str = "gui.plot.x_axis";
    pub const GUI_PLOT_Y: &str = "gui.plot.y_axis";
    pub const GUI_EXPORT_CSV: &str = "gui.plot.export_csv";
    pub const GUI_EXPORT_SAVED: &str = "gui.plot.export_saved";
    pub const GUI_HELP_HEADING: &str = "gui.help.heading";
    pub const GUI_HELP_BODY: &str = "gui.help.body";
    pub const GUI_SETTINGS: &str = "gui.settings.title";
    pub const GUI_LANGUAGE: &str = "gui.settings.language";
    pub const GUI_LANGUAGE_PACK_DIR: &str = "gui.settings.language_pack_dir";
    pub const GUI_APPLY: &str = "gui.settings.apply";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        if code.to_lowercase().starts_with("ko") {
            Language::Ko
        } else {
            Language::En
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 en으로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn has_overrides(&self) -> bool {
        self.overrides.is_some()
    }

    /// 번역을 가져온다. 언어팩 → 선택 언어 → 영어 순으로 찾고, 모두 없으면 키를 그대로 쓴다.
    pub fn t(&self, key: &str) -> String {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return v.clone();
        }
        let builtin = match self.lang {
            Language::Ko => ko(key).or_else(|| en(key)),
            Language::En => en(key),
        };
        builtin.unwrap_or(key).to_string()
    }
}

/// `{name}` 자리표시자를 치환한다.
pub fn fill(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = template.to_string();
    for (k, v) in vars {
        out = out.replace(&format!("{{{k}}}"), v);
    }
    out
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(lang) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(lang);
    }
    for var in ["LANG", "LC_ALL"] {
        if let Ok(value) = std::env::var(var) {
            if let Some(code) = normalize_locale_string(&value) {
                return Some(code);
            }
        }
    }
    None
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 로 구성된 맵(중첩 테이블 허용).
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let path = Path::new(dir).join(format!("{lang}.toml"));
    let content = fs::read_to_string(&path).ok()?;
    let map = parse_toml_to_map(&content);
    if map.is_none() {
        warn!(path = %path.display(), "language pack ignored");
    }
    map
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    let s = match key {
        APP_TITLE => "서덜랜드 점도 계산기",
        APP_DESCRIPTION => {
            "서덜랜드 식으로 공기의 동점성계수를 온도로부터 계산합니다. \
             단위계(SI 또는 USC)와 온도를 입력하면 해면 기준(15 °C)부터 입력 온도까지의 그래프도 그립니다."
        }
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        MAIN_MENU_TITLE => "\n=== 서덜랜드 점도 계산기 ===",
        MAIN_MENU_CALCULATE => "1) 점도 계산",
        MAIN_MENU_SETTINGS => "2) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        CALC_HEADING => "\n-- 점도 계산 --",
        PROMPT_UNIT_SYSTEM => "단위계 (1=SI, 2=USC) [엔터={default}]: ",
        PROMPT_TEMPERATURE_UNIT => "온도 단위 (C/F/K/R) [엔터={default}]: ",
        PROMPT_TEMPERATURE_VALUE => "온도 값 [엔터=0]: ",
        PROMPT_SHOW_CURVE => "곡선 데이터를 출력할까요? (y/N): ",
        RESULT_CONVERTED_TEMPERATURE => "환산 온도:",
        RESULT_VISCOSITY => "동점성계수:",
        RESULT_CURVE_HEADER => "온도 [{unit}]\t점도",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT => "현재: 단위계={system}, 곡선 점 수={points}, 기준 온도={reference} °C",
        SETTINGS_OPTIONS => "1) 단위계  2) 곡선 점 수  3) 기준 온도",
        SETTINGS_PROMPT_CHANGE => "변경할 번호(취소하려면 엔터): ",
        SETTINGS_INVALID => "잘못된 입력이므로 변경하지 않습니다.",
        SETTINGS_SAVED => "설정이 변경되었습니다.",
        PROMPT_CURVE_POINTS => "곡선 점 수 (1~10000): ",
        PROMPT_REFERENCE_C => "기준 온도 [°C]: ",
        GUI_INPUT_HEADING => "입력",
        GUI_UNIT_SYSTEM => "단위계",
        GUI_TEMPERATURE_UNIT => "온도 단위",
        GUI_TEMPERATURE_VALUE => "온도",
        GUI_CALCULATE => "계산",
        GUI_PLOT_TITLE => "온도에 따른 점도",
        GUI_PLOT_X => "온도 ({unit})",
        GUI_PLOT_Y => "점도",
        GUI_EXPORT_CSV => "CSV 내보내기",
        GUI_EXPORT_SAVED => "저장됨:",
        GUI_HELP_HEADING => "사용 방법",
        GUI_HELP_BODY => {
            "1. 단위계(SI 또는 USC)와 온도 단위를 고릅니다.\n\
             2. 온도를 입력합니다.\n\
             3. 계산을 누르면 환산 온도, 점도, 해면 기준(15 °C)부터의 그래프가 표시됩니다."
        }
        GUI_SETTINGS => "설정",
        GUI_LANGUAGE => "언어 (auto/ko/en)",
        GUI_LANGUAGE_PACK_DIR => "언어팩 폴더",
        GUI_APPLY => "적용",
        _ => return None,
    };
    Some(s)
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    let s = match key {
        APP_TITLE => "Sutherland Viscosity Calculator",
        APP_DESCRIPTION => {
            "Calculate the dynamic viscosity of air from temperature using Sutherland's formula. \
             Choose a unit system (SI or USC), enter a temperature, and plot viscosity from the \
             sea-level reference (15 °C) up to your input."
        }
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting.",
        MAIN_MENU_TITLE => "\n=== Sutherland Viscosity Calculator ===",
        MAIN_MENU_CALCULATE => "1) Calculate viscosity",
        MAIN_MENU_SETTINGS => "2) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select: ",
        INVALID_SELECTION_RETRY => "Invalid selection. Try again.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        CALC_HEADING => "\n-- Viscosity --",
        PROMPT_UNIT_SYSTEM => "Unit system (1=SI, 2=USC) [enter={default}]: ",
        PROMPT_TEMPERATURE_UNIT => "Temperature unit (C/F/K/R) [enter={default}]: ",
        PROMPT_TEMPERATURE_VALUE => "Temperature [enter=0]: ",
        PROMPT_SHOW_CURVE => "Print curve data? (y/N): ",
        RESULT_CONVERTED_TEMPERATURE => "Converted temperature:",
        RESULT_VISCOSITY => "Dynamic viscosity:",
        RESULT_CURVE_HEADER => "Temperature [{unit}]\tViscosity",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT => {
            "Current: system={system}, curve points={points}, reference={reference} °C"
        }
        SETTINGS_OPTIONS => "1) Unit system  2) Curve points  3) Reference temperature",
        SETTINGS_PROMPT_CHANGE => "Number to change (enter to cancel): ",
        SETTINGS_INVALID => "Invalid input; nothing changed.",
        SETTINGS_SAVED => "Settings updated.",
        PROMPT_CURVE_POINTS => "Curve points (1-10000): ",
        PROMPT_REFERENCE_C => "Reference temperature [°C]: ",
        GUI_INPUT_HEADING => "Input",
        GUI_UNIT_SYSTEM => "Unit system",
        GUI_TEMPERATURE_UNIT => "Temperature unit",
        GUI_TEMPERATURE_VALUE => "Temperature",
        GUI_CALCULATE => "Calculate",
        GUI_PLOT_TITLE => "Viscosity vs. Temperature",
        GUI_PLOT_X => "Temperature ({unit})",
        GUI_PLOT_Y => "Viscosity",
        GUI_EXPORT_CSV => "Export CSV",
        GUI_EXPORT_SAVED => "Saved:",
        GUI_HELP_HEADING => "How it works",
        GUI_HELP_BODY => {
            "1. Select unit system (SI or USC) and temperature unit.\n\
             2. Enter your temperature.\n\
             3. Click Calculate to see converted temperature, viscosity, and a plot from the sea-level reference (15 °C)."
        }
        GUI_SETTINGS => "Settings",
        GUI_LANGUAGE => "Language (auto/ko/en)",
        GUI_LANGUAGE_PACK_DIR => "Language pack folder",
        GUI_APPLY => "Apply",
        _ => return None,
    };
    Some(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_language_wins_over_config() {
        assert_eq!(resolve_language("ko-KR", Some("en")), "ko");
        assert_eq!(resolve_language("auto", Some("en-us")), "en");
    }

    #[test]
    fn every_korean_key_has_english() {
        use keys::*;
        for key in [APP_TITLE, CALC_HEADING, GUI_HELP_BODY, SETTINGS_CURRENT, GUI_PLOT_X] {
            assert!(ko(key).is_some(), "{key}");
            assert!(en(key).is_some(), "{key}");
        }
        assert_eq!(Translator::new("xx").t("no.such.key"), "no.such.key");
    }

    #[test]
    fn nested_pack_is_flattened() {
        let map = parse_toml_to_map("[gui.input]\ncalculate = \"Go\"\n").unwrap();
        assert_eq!(map.get("gui.input.calculate").map(String::as_str), Some("Go"));
    }

    #[test]
    fn fill_replaces_placeholders() {
        assert_eq!(fill("Temperature ({unit})", &[("unit", "K".into())]), "Temperature (K)");
    }
}
