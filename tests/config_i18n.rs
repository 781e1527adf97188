//! 설정 파일과 다국어 문자열 테스트.
use std::fs;
use std::path::PathBuf;

use filter_spec_panel::{
    config::{self, Config},
    i18n::{self, keys, Language, Translator},
    units::{AmpUnit, FilterType},
};

fn temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "filter_spec_panel_{tag}_{}",
        std::process::id()
    ));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn missing_config_is_created_with_defaults() {
    let dir = temp_dir("cfg_new");
    let path = dir.join("config.toml");
    let _ = fs::remove_file(&path);

    let cfg = config::load_from(&path).unwrap();
    assert!(path.exists());
    assert_eq!(cfg.display_digits, 3);
    assert_eq!(cfg.default_unit, AmpUnit::Db);
    assert_eq!(cfg.filter_type, FilterType::Iir);
    assert_eq!(cfg.path(), Some(path.as_path()));
}

#[test]
fn config_roundtrips_through_file() {
    let dir = temp_dir("cfg_save");
    let path = dir.join("config.toml");
    let mut cfg = Config::default();
    cfg.set_path(&path);
    cfg.language = "en".into();
    cfg.default_unit = AmpUnit::Power;
    cfg.filter_type = FilterType::Fir;
    cfg.display_digits = 6;
    cfg.save().unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("default_unit = \"W\""), "{text}");
    assert!(text.contains("filter_type = \"FIR\""), "{text}");

    let loaded = config::load_from(&path).unwrap();
    assert_eq!(loaded, cfg);
}

#[test]
fn partial_config_uses_defaults() {
    let dir = temp_dir("cfg_partial");
    let path = dir.join("config.toml");
    fs::write(&path, "default_unit = \"V\"\n").unwrap();
    let cfg = config::load_from(&path).unwrap();
    assert_eq!(cfg.default_unit, AmpUnit::Voltage);
    assert_eq!(cfg.display_digits, 3);
    assert_eq!(cfg.language, "auto");
}

#[test]
fn broken_config_is_an_error() {
    let dir = temp_dir("cfg_broken");
    let path = dir.join("config.toml");
    fs::write(&path, "default_unit = \"Np\"\n").unwrap();
    assert!(matches!(
        config::load_from(&path),
        Err(config::ConfigError::Serde(_))
    ));
}

#[test]
fn translator_falls_back_to_english() {
    let en = Translator::new("en");
    let ko = Translator::new("ko");
    assert_eq!(en.language(), Language::En);
    assert_eq!(ko.language(), Language::Ko);
    assert_ne!(en.t(keys::PANEL_TITLE), ko.t(keys::PANEL_TITLE));
    assert_eq!(en.t("no.such.key"), "[missing translation]");
}

#[test]
fn language_resolution_prefers_cli_then_config() {
    assert_eq!(i18n::resolve_language("en-US", Some("ko")), "en");
    assert_eq!(i18n::resolve_language("auto", Some("ko-KR")), "ko");
    let detected = i18n::resolve_language("auto", Some("auto"));
    assert!(detected == "ko" || detected == "en");
}

#[test]
fn language_pack_overrides_built_in_strings() {
    let dir = temp_dir("lang_pack");
    fs::write(
        dir.join("en.toml"),
        "[panel]\ntitle = \"Ripple & Attenuation\"\n",
    )
    .unwrap();
    let tr = Translator::new_with_pack("en", dir.to_str());
    assert_eq!(tr.t(keys::PANEL_TITLE), "Ripple & Attenuation");
    assert_eq!(tr.t(keys::PANEL_UNIT), Translator::new("en").t(keys::PANEL_UNIT));
}

#[test]
fn flat_toml_keys() {
    let map = i18n::parse_toml_to_map("[a]\nb = \"x\"\n[a.c]\nd = \"y\"\n").unwrap();
    assert_eq!(map.get("a.b").map(String::as_str), Some("x"));
    assert_eq!(map.get("a.c.d").map(String::as_str), Some("y"));
    assert!(i18n::parse_toml_to_map("x = 1").is_none());
}
