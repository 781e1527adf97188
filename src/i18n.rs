use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;
use tracing::debug;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const PANEL_TITLE: &str = "panel.title";
    pub const PANEL_UNIT: &str = "panel.unit";
    pub const PANEL_UNIT_TIP: &str = "panel.unit_tip";
    pub const PANEL_FIELD_TIP: &str = "panel.field_tip";

    pub const CLI_PROMPT: &str = "cli.prompt";
    pub const CLI_HELP: &str = "cli.help";
    pub const CLI_UNKNOWN_COMMAND: &str = "cli.unknown_command";
    pub const CLI_USAGE: &str = "cli.usage";
    pub const CLI_COMMITTED: &str = "cli.committed";
    pub const CLI_REJECTED: &str = "cli.rejected";
    pub const CLI_REVERTED: &str = "cli.reverted";
    pub const CLI_NO_FIELDS: &str = "cli.no_fields";
    pub const CLI_CONVERT_RESULT: &str = "cli.convert_result";
    pub const CLI_LANGUAGE_SET: &str = "cli.language_set";

    pub const NOTIFY_UNIT_CHANGED: &str = "notify.unit_changed";
    pub const NOTIFY_SPECS_CHANGED: &str = "notify.specs_changed";

    pub const GUI_DESIGN_SETS: &str = "gui.design_sets";
    pub const GUI_FILTER_TYPE: &str = "gui.filter_type";
    pub const GUI_DIGITS: &str = "gui.digits";
    pub const GUI_STORE: &str = "gui.store";
    pub const GUI_EVENTS: &str = "gui.events";
    pub const GUI_CLEAR: &str = "gui.clear";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
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
        let overrides = pack_dir.and_then(|dir| load_overrides(dir, lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 번역을 가져온다. 언어팩 → 내장 문자열 순으로 찾는다.
    pub fn t<'a>(&'a self, key: &str) -> &'a str {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return v;
        }
        let built_in = match self.lang {
            Language::Ko => ko(key).or_else(|| en(key)),
            Language::En => en(key),
        };
        built_in.unwrap_or("[missing translation]")
    }
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
    ["LC_ALL", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_locale_string(&v))
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 또는 [section] 아래 key = "value".
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(&path).ok()?;
        debug!(path = %path.display(), "language pack loaded");
        parse_toml_to_map(&content)
    };

    try_load(lang).or_else(|| {
        lang.split_once(['-', '_'])
            .and_then(|(base, _)| try_load(base))
    })
}

/// 중첩 테이블을 `a.b.c` 형태의 평평한 키로 펼친다.
pub fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
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
    Some(match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        PANEL_TITLE => "진폭 사양",
        PANEL_UNIT => "단위:",
        PANEL_UNIT_TIP => "진폭 사양의 표시 단위:\ndB는 감쇠량(양수)\nV, W는 1보다 작은 값",
        PANEL_FIELD_TIP => "수식 입력 가능. Enter=저장, Esc=취소",
        CLI_PROMPT => "> ",
        CLI_HELP => "명령: show | unit <dB|V|W> | ft <IIR|FIR> | fields <이름...> | focus <i> | type <i> <텍스트>\n      enter | esc | blur | set <i> <수식> | digits <n> | convert <값> <이름> <from> <to> | lang <ko|en> | help | quit",
        CLI_UNKNOWN_COMMAND => "알 수 없는 명령입니다. help 로 목록을 보세요.",
        CLI_USAGE => "사용법:",
        CLI_COMMITTED => "저장됨:",
        CLI_REJECTED => "수식을 해석할 수 없어 값을 바꾸지 않았습니다:",
        CLI_REVERTED => "편집을 취소했습니다.",
        CLI_NO_FIELDS => "(표시할 필드 없음)",
        CLI_CONVERT_RESULT => "변환 결과:",
        CLI_LANGUAGE_SET => "언어 설정:",
        NOTIFY_UNIT_CHANGED => "알림: 단위 변경",
        NOTIFY_SPECS_CHANGED => "알림: 사양 변경",
        GUI_DESIGN_SETS => "설계 사양 세트",
        GUI_FILTER_TYPE => "필터 종류",
        GUI_DIGITS => "표시 유효숫자",
        GUI_STORE => "저장소 (선형 값)",
        GUI_EVENTS => "알림 기록",
        GUI_CLEAR => "지우기",
        _ => return None,
    })
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting application.",
        PANEL_TITLE => "Amplitude Specs",
        PANEL_UNIT => "Unit:",
        PANEL_UNIT_TIP => "Set unit for amplitude specifications:\ndB is attenuation (positive values)\nV and W are less than 1.",
        PANEL_FIELD_TIP => "Expressions allowed. Enter=store, Esc=revert",
        CLI_PROMPT => "> ",
        CLI_HELP => "Commands: show | unit <dB|V|W> | ft <IIR|FIR> | fields <names...> | focus <i> | type <i> <text>\n          enter | esc | blur | set <i> <expr> | digits <n> | convert <value> <name> <from> <to> | lang <ko|en> | help | quit",
        CLI_UNKNOWN_COMMAND => "Unknown command. Type help for the list.",
        CLI_USAGE => "Usage:",
        CLI_COMMITTED => "Stored:",
        CLI_REJECTED => "Invalid expression, value not changed:",
        CLI_REVERTED => "Edit reverted.",
        CLI_NO_FIELDS => "(no visible fields)",
        CLI_CONVERT_RESULT => "Result:",
        CLI_LANGUAGE_SET => "Language:",
        NOTIFY_UNIT_CHANGED => "notification: unit changed",
        NOTIFY_SPECS_CHANGED => "notification: specs changed",
        GUI_DESIGN_SETS => "Design spec sets",
        GUI_FILTER_TYPE => "Filter type",
        GUI_DIGITS => "Display digits",
        GUI_STORE => "Store (linear values)",
        GUI_EVENTS => "Notifications",
        GUI_CLEAR => "Clear",
        _ => return None,
    })
}
