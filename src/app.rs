use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;
use tracing::{debug, info};

use crate::config::{Config, ConfigError};
use crate::conversion::{self, ConversionError};
use crate::events::{FieldEvent, Notification};
use crate::i18n::{self, keys, Translator};
use crate::panel::{AmplitudeSpecsPanel, EditOutcome, PanelError};
use crate::store::{FilterSpecs, SharedSpecs, SpecStore};
use crate::ui_cli::{self, Command, CommandError};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 파일 입출력 오류
    #[error("입출력 오류: {0}")]
    Io(std::io::Error),
    /// 설정 저장/로드 오류
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    /// 패널 동작 오류
    #[error("패널 오류: {0}")]
    Panel(#[from] PanelError),
    /// 단위 변환 오류
    #[error("단위 변환 오류: {0}")]
    Conversion(#[from] ConversionError),
    /// 명령 해석 오류
    #[error("명령 오류: {0}")]
    Command(#[from] CommandError),
}

/// 설정값으로 기본 사양 저장소를 만들고 그 위에 패널을 올린다.
pub fn build_panel(config: &Config) -> Result<AmplitudeSpecsPanel<SharedSpecs>, PanelError> {
    let mut specs = FilterSpecs::default();
    specs.set_filter_type(config.filter_type);
    specs.set_display_unit(config.default_unit);
    AmplitudeSpecsPanel::new(specs.into_shared(), config.display_digits)
}

/// 명령 처리 후 루프를 계속할지 여부.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// CLI 한 세션의 상태. 패널과 패널이 보낸 알림을 들고 있다.
pub struct CliSession {
    pub panel: AmplitudeSpecsPanel<SharedSpecs>,
    pub tr: Translator,
    notifications: Rc<RefCell<Vec<Notification>>>,
}

impl CliSession {
    pub fn new(panel: AmplitudeSpecsPanel<SharedSpecs>, tr: Translator) -> Self {
        let notifications = Rc::new(RefCell::new(Vec::new()));
        let mut panel = panel;
        let sink = Rc::clone(&notifications);
        panel.subscribe(move |n| sink.borrow_mut().push(n));
        Self {
            panel,
            tr,
            notifications,
        }
    }

    /// 아직 출력하지 않은 알림을 꺼낸다.
    pub fn take_notifications(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.notifications.borrow_mut())
    }

    /// 명령 하나를 실행한다.
    pub fn execute(&mut self, cmd: Command, config: &mut Config) -> Result<Flow, AppError> {
        debug!(?cmd, "cli command");
        match cmd {
            Command::Show => ui_cli::print_panel(&self.tr, &self.panel),
            Command::Help => println!("{}", self.tr.t(keys::CLI_HELP)),
            Command::Quit => return Ok(Flow::Exit),
            Command::Unit(unit) => {
                self.panel.set_unit(unit)?;
                config.default_unit = unit;
                ui_cli::print_panel(&self.tr, &self.panel);
            }
            Command::FilterType(ft) => {
                self.panel.store_mut().set_filter_type(ft);
                self.panel.render_all()?;
                config.filter_type = ft;
                ui_cli::print_panel(&self.tr, &self.panel);
            }
            Command::Fields(names) => {
                self.panel.reconcile(names.as_slice())?;
                ui_cli::print_panel(&self.tr, &self.panel);
            }
            Command::Focus(i) => {
                self.panel.handle_event(i, FieldEvent::FocusGained)?;
                ui_cli::print_panel(&self.tr, &self.panel);
            }
            Command::Type(i, text) => {
                self.panel.handle_event(i, FieldEvent::TextChanged(text))?;
                ui_cli::print_panel(&self.tr, &self.panel);
            }
            Command::Enter => self.on_focused(FieldEvent::CommitRequested)?,
            Command::Esc => self.on_focused(FieldEvent::RevertRequested)?,
            Command::Blur => self.on_focused(FieldEvent::FocusLost)?,
            Command::Set(i, text) => {
                self.panel.handle_event(i, FieldEvent::FocusGained)?;
                self.panel.handle_event(i, FieldEvent::TextChanged(text))?;
                let outcome = self.panel.handle_event(i, FieldEvent::CommitRequested)?;
                self.report(&outcome);
                ui_cli::print_panel(&self.tr, &self.panel);
            }
            Command::Digits(n) => {
                self.panel.set_display_digits(n)?;
                config.display_digits = self.panel.display_digits();
                ui_cli::print_panel(&self.tr, &self.panel);
            }
            Command::Convert {
                value,
                name,
                from,
                to,
            } => {
                let ft = self.panel.store().filter_type();
                let out = conversion::convert_amplitude(value, ft, &name, from, to)?;
                println!("{} {out} {to}", self.tr.t(keys::CLI_CONVERT_RESULT));
            }
            Command::Lang(code) => {
                let resolved = i18n::resolve_language(&code, Some(config.language.as_str()));
                self.tr = Translator::new_with_pack(&resolved, config.locale_dir.as_deref());
                config.language = resolved;
                println!("{} {}", self.tr.t(keys::CLI_LANGUAGE_SET), self.tr.language_code());
            }
        }
        self.print_notifications();
        Ok(Flow::Continue)
    }

    fn on_focused(&mut self, event: FieldEvent) -> Result<(), AppError> {
        // 포커스 필드가 없으면 할 일이 없다.
        if let Some(i) = self.panel.focused_index() {
            let outcome = self.panel.handle_event(i, event)?;
            self.report(&outcome);
        }
        ui_cli::print_panel(&self.tr, &self.panel);
        Ok(())
    }

    fn report(&self, outcome: &EditOutcome) {
        match outcome {
            EditOutcome::Committed { name, linear } => {
                println!("{} {name} = {linear}", self.tr.t(keys::CLI_COMMITTED))
            }
            EditOutcome::Rejected(err) => println!("{} {err}", self.tr.t(keys::CLI_REJECTED)),
            EditOutcome::Reverted => println!("{}", self.tr.t(keys::CLI_REVERTED)),
            EditOutcome::Unchanged => {}
        }
    }

    fn print_notifications(&self) {
        for n in self.take_notifications() {
            let key = match n {
                Notification::UnitChanged => keys::NOTIFY_UNIT_CHANGED,
                Notification::SpecsChanged => keys::NOTIFY_SPECS_CHANGED,
            };
            println!("  ({})", self.tr.t(key));
        }
    }
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
///
/// 잘못된 명령이나 패널 계약 위반은 출력 후 계속하고, 입출력/설정 오류만 루프를 끝낸다.
pub fn run(config: &mut Config, tr: Translator) -> Result<(), AppError> {
    let panel = build_panel(config)?;
    let mut session = CliSession::new(panel, tr);
    ui_cli::print_panel(&session.tr, &session.panel);
    println!("{}", session.tr.t(keys::CLI_HELP));

    loop {
        let line = ui_cli::read_line(session.tr.t(keys::CLI_PROMPT))?;
        let result = ui_cli::parse_command(&line)
            .map_err(AppError::from)
            .and_then(|cmd| session.execute(cmd, config));
        match result {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => break,
            Err(err @ (AppError::Io(_) | AppError::Config(_))) => return Err(err),
            Err(AppError::Command(CommandError::Unknown(cmd))) => {
                println!("{cmd}: {}", session.tr.t(keys::CLI_UNKNOWN_COMMAND))
            }
            Err(AppError::Command(CommandError::Usage(usage))) => {
                println!("{} {usage}", session.tr.t(keys::CLI_USAGE))
            }
            Err(err) => println!("{}: {err}", session.tr.t(keys::ERROR_PREFIX)),
        }
    }

    config.save()?;
    info!("configuration saved");
    println!("{}", session.tr.t(keys::APP_EXIT));
    Ok(())
}
