use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const APP_EXIT: &str = "general.app_exit";
    pub const APP_TITLE: &str = "general.app_title";

    pub const INPUT_GROUP: &str = "form.input_group";
    pub const FIELD_TANK_CAPACITY: &str = "form.tank_capacity";
    pub const FIELD_CURRENT_FUEL: &str = "form.current_fuel";
    pub const FIELD_CURRENT_ETHANOL: &str = "form.current_ethanol";
    pub const FIELD_TARGET_ETHANOL: &str = "form.target_ethanol";

    pub const BUTTON_CALCULATE: &str = "button.calculate";
    pub const BUTTON_COPY: &str = "button.copy";
    pub const BUTTON_CLEAR: &str = "button.clear";

    pub const RESULT_NO_SPACE: &str = "result.no_space";
    pub const RESULT_INFEASIBLE: &str = "result.infeasible";
    pub const RESULT_RESULTING_ETHANOL: &str = "result.resulting_ethanol";
    pub const RESULT_E85_NEEDED: &str = "result.e85_needed";
    pub const RESULT_REGULAR_NEEDED: &str = "result.regular_needed";
    pub const RESULT_NEW_ETHANOL: &str = "result.new_ethanol";

    pub const ERROR_INVALID_INPUT: &str = "error.invalid_input";
    pub const ERROR_INVALID_TARGET: &str = "error.invalid_target";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";

    pub const COPY_DONE: &str = "clipboard.done";
    pub const COPY_FAILED: &str = "clipboard.failed";
    pub const STORE_SAVE_FAILED: &str = "store.save_failed";

    pub const CLI_TITLE: &str = "cli.title";
    pub const PROMPT_FIELD: &str = "cli.prompt_field";
    pub const PROMPT_TARGET: &str = "cli.prompt_target";
    pub const CLI_MENU: &str = "cli.menu";
    pub const PROMPT_MENU_SELECT: &str = "cli.prompt_menu_select";

    pub const SETTINGS_TITLE: &str = "settings.title";
    pub const SETTINGS_LANG: &str = "settings.lang";
    pub const SETTINGS_LANG_AUTO: &str = "settings.lang_auto";
    pub const SETTINGS_ALPHA: &str = "settings.alpha";
    pub const SETTINGS_ALWAYS_ON_TOP: &str = "settings.always_on_top";
    pub const SETTINGS_SAVE: &str = "settings.save";
    pub const SETTINGS_SAVED: &str = "settings.saved";
    pub const SETTINGS_SAVE_ERROR: &str = "settings.save_error";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("ko") {
            Language::Ko
        } else {
            Language::En
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
        let overrides = pack_dir.and_then(|dir| load_overrides(dir, lang_code));
        if overrides.is_some() {
            tracing::debug!(lang = lang_code, "language pack loaded");
        }
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    /// 언어팩에서만 키를 조회한다. 없으면 None.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.overrides.as_ref().and_then(|m| m.get(key).cloned())
    }

    /// 번역을 가져온다. 언어팩 → 내장 문자열 → 영어 순으로 찾는다.
    pub fn t(&self, key: &str) -> String {
        if let Some(v) = self.lookup(key) {
            return v;
        }
        let builtin = match self.lang {
            Language::En => en(key),
            Language::Ko => ko(key).or_else(|| en(key)),
        };
        builtin.unwrap_or("[missing translation]").to_string()
    }
}

/// `{name}` 자리표시자를 값으로 치환한다.
pub fn fill_template(template: &str, vars: &[(&str, String)]) -> String {
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
    ["LANG", "LC_ALL"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_locale_string(&v))
}

/// TOML 기반 언어팩을 로드한다. `<dir>/<code>.toml`, 없으면 기본 코드 파일을 찾는다.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    let (base, _) = lang.split_once(['-', '_'])?;
    try_load(base)
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = match toml::from_str(src) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!("invalid language pack: {e}");
            return None;
        }
    };
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
    Some(match key {
        APP_EXIT => "프로그램을 종료합니다.",
        APP_TITLE => "E85 연료 혼합 계산기",
        INPUT_GROUP => "연료 정보 입력",
        FIELD_TANK_CAPACITY => "탱크 용량 (gal)",
        FIELD_CURRENT_FUEL => "현재 연료량 (gal)",
        FIELD_CURRENT_ETHANOL => "현재 에탄올 % (예: 10%는 10)",
        FIELD_TARGET_ETHANOL => "목표 에탄올 %",
        BUTTON_CALCULATE => "계산",
        BUTTON_COPY => "결과 복사",
        BUTTON_CLEAR => "지우기",
        RESULT_NO_SPACE => "탱크에 연료를 추가할 공간이 없습니다.",
        RESULT_INFEASIBLE => "주어진 조건으로는 목표 에탄올 비율을 만들 수 없습니다.",
        RESULT_RESULTING_ETHANOL => "혼합 후 에탄올 비율: {percent}%",
        RESULT_E85_NEEDED => "필요한 E85: {gallons} gal",
        RESULT_REGULAR_NEEDED => "필요한 일반 휘발유: {gallons} gal",
        RESULT_NEW_ETHANOL => "새 에탄올 비율: {percent}%",
        ERROR_INVALID_INPUT => "올바른 숫자를 입력하세요.",
        ERROR_INVALID_TARGET => "목표 에탄올은 10, 15, 30, 50, 85 중 하나여야 합니다.",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        COPY_DONE => "결과를 클립보드에 복사했습니다.",
        COPY_FAILED => "클립보드 오류: {error}",
        STORE_SAVE_FAILED => "입력값 저장 실패: {error}",
        CLI_TITLE => "\n=== E85 연료 혼합 계산기 ===",
        PROMPT_FIELD => "{label} [{current}]: ",
        PROMPT_TARGET => "목표 에탄올 % (10/15/30/50/85) [{current}]: ",
        CLI_MENU => "c) 결과 복사  r) 다시 계산  q) 종료",
        PROMPT_MENU_SELECT => "선택: ",
        SETTINGS_TITLE => "설정",
        SETTINGS_LANG => "언어",
        SETTINGS_LANG_AUTO => "시스템",
        SETTINGS_ALPHA => "창 투명도",
        SETTINGS_ALWAYS_ON_TOP => "항상 위",
        SETTINGS_SAVE => "설정 저장",
        SETTINGS_SAVED => "저장했습니다.",
        SETTINGS_SAVE_ERROR => "저장 오류: {error}",
        _ => return None,
    })
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        APP_EXIT => "Exiting application.",
        APP_TITLE => "E85 Fuel Mixer",
        INPUT_GROUP => "Enter Fuel Details",
        FIELD_TANK_CAPACITY => "Tank Capacity (gal)",
        FIELD_CURRENT_FUEL => "Current Fuel (gal)",
        FIELD_CURRENT_ETHANOL => "Current Ethanol % (e.g., 10 for 10%)",
        FIELD_TARGET_ETHANOL => "Target Ethanol %",
        BUTTON_CALCULATE => "Calculate",
        BUTTON_COPY => "Copy Result",
        BUTTON_CLEAR => "Clear",
        RESULT_NO_SPACE => "No space available in the tank to add fuel.",
        RESULT_INFEASIBLE => {
            "Desired ethanol percentage cannot be achieved with given constraints."
        }
        RESULT_RESULTING_ETHANOL => "Resulting Ethanol Percentage: {percent}%",
        RESULT_E85_NEEDED => "E85 Needed: {gallons} gallons",
        RESULT_REGULAR_NEEDED => "Regular Gasoline Needed: {gallons} gallons",
        RESULT_NEW_ETHANOL => "New Ethanol Percentage: {percent}%",
        ERROR_INVALID_INPUT => "Please enter valid numbers.",
        ERROR_INVALID_TARGET => "Target ethanol must be one of 10, 15, 30, 50, 85.",
        INVALID_SELECTION_RETRY => "Invalid selection. Please try again.",
        COPY_DONE => "Result copied to clipboard.",
        COPY_FAILED => "Clipboard error: {error}",
        STORE_SAVE_FAILED => "Could not save inputs: {error}",
        CLI_TITLE => "\n=== E85 Fuel Mixer ===",
        PROMPT_FIELD => "{label} [{current}]: ",
        PROMPT_TARGET => "Target Ethanol % (10/15/30/50/85) [{current}]: ",
        CLI_MENU => "c) Copy result  r) Recalculate  q) Quit",
        PROMPT_MENU_SELECT => "Select: ",
        SETTINGS_TITLE => "Settings",
        SETTINGS_LANG => "Language",
        SETTINGS_LANG_AUTO => "System",
        SETTINGS_ALPHA => "Window transparency",
        SETTINGS_ALWAYS_ON_TOP => "Always on top",
        SETTINGS_SAVE => "Save settings",
        SETTINGS_SAVED => "Saved.",
        SETTINGS_SAVE_ERROR => "Save error: {error}",
        _ => return None,
    })
}
