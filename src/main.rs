use std::path::PathBuf;

use clap::Parser;
use filter_spec_panel::{app, config, conversion, i18n, logging};

/// 진폭 사양 패널을 터미널에서 조작하는 CLI.
#[derive(Debug, Parser)]
#[command(name = "filter_spec_panel_cli", version, about)]
struct Cli {
    /// 설정 파일 경로
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// UI 언어 (auto/ko/en)
    #[arg(long, short = 'L')]
    lang: Option<String>,
    /// 시작 단위 (dB/V/W)
    #[arg(long)]
    unit: Option<String>,
    /// 필터 종류 (IIR/FIR)
    #[arg(long = "filter-type")]
    filter_type: Option<String>,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() {
    // 명령 출력과 섞이지 않도록 기본은 경고 이상만 남긴다.
    logging::init("warn");
    let cli = Cli::parse();
    if let Err(err) = try_run(cli) {
        eprintln!("{}: {err}", i18n::Translator::new("en").t(i18n::keys::ERROR_PREFIX));
        std::process::exit(1);
    }
}

fn try_run(cli: Cli) -> Result<(), app::AppError> {
    let mut cfg = config::load_from(&cli.config)?;
    if let Some(unit) = cli.unit.as_deref() {
        cfg.default_unit = conversion::parse_amp_unit(unit)?;
    }
    if let Some(ft) = cli.filter_type.as_deref() {
        cfg.filter_type = conversion::parse_filter_type(ft)?;
    }
    let lang = i18n::resolve_language(
        cli.lang.as_deref().unwrap_or("auto"),
        Some(cfg.language.as_str()),
    );
    let tr = i18n::Translator::new_with_pack(&lang, cfg.locale_dir.as_deref());
    app::run(&mut cfg, tr)
}
