#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use clap::Parser;
use eframe::{egui, App, Frame};
use filter_spec_panel::{
    app, config,
    events::{FieldEvent, Notification},
    i18n::{self, keys},
    format::MAX_SIGNIFICANT_DIGITS,
    logging,
    panel::{AmplitudeSpecsPanel, EditOutcome, SpecLabel},
    store::{SharedSpecs, SpecStore},
    units::{AmpUnit, FilterType},
};
use tracing::{error, warn};

/// 설계 방법별로 필요한 진폭 사양 목록.
const DESIGN_SETS: &[(&str, &[&str])] = &[
    ("Lowpass", &["A_PB", "A_SB"]),
    ("Highpass", &["A_SB", "A_PB"]),
    ("Bandpass", &["A_SB", "A_PB", "A_SB2"]),
    ("Bandstop", &["A_PB", "A_SB", "A_PB2"]),
    ("All", &["A_PB", "A_PB2", "A_SB", "A_SB2"]),
];

/// 알림 기록은 이 개수까지만 보관한다.
const MAX_LOG: usize = 200;

#[derive(Debug, Parser)]
#[command(name = "filter_spec_panel", version, about)]
struct GuiArgs {
    /// 설정 파일 경로
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// UI 언어 (auto/ko/en)
    #[arg(long, short = 'L')]
    lang: Option<String>,
}

fn main() -> Result<(), eframe::Error> {
    logging::init("info");
    let args = GuiArgs::parse();

    let mut app_cfg = match config::load_from(&args.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(error = %e, "config load failed, using defaults");
            let mut cfg = config::Config::default();
            cfg.set_path(&args.config);
            cfg
        }
    };
    if let Some(lang_cli) = args.lang.as_deref() {
        app_cfg.language = i18n::resolve_language(lang_cli, Some(app_cfg.language.as_str()));
    }
    let app = match GuiApp::new(app_cfg) {
        Ok(app) => app,
        Err(e) => {
            error!(error = %e, "panel setup failed");
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([640.0, 360.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Filter Spec Panel",
        options,
        Box::new(move |cc| {
            if let Err(e) = setup_fonts(&cc.egui_ctx) {
                warn!("{e}");
            }
            Box::new(app)
        }),
    )
}

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
        .push(font_name);
    ctx.set_fonts(fonts);
}

/// 한글 표시용 폰트를 찾아 기본 폰트 앞에 등록한다.
/// 1) assets/fonts/malgun.ttf
/// 2) Windows 시스템 폰트
/// 3) 리눅스/macOS 의 CJK 폰트
fn setup_fonts(ctx: &egui::Context) -> Result<(), String> {
    let mut candidates = vec![PathBuf::from("assets/fonts/malgun.ttf")];
    if let Some(windir) = std::env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        candidates.extend(["malgun.ttf", "gulim.ttc"].iter().map(|f| fonts.join(f)));
    }
    candidates.extend(
        [
            "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
            "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
            "/System/Library/Fonts/AppleSDGothicNeo.ttc",
        ]
        .iter()
        .map(PathBuf::from),
    );

    let p = candidates
        .iter()
        .find(|p| p.exists())
        .ok_or_else(|| "Korean font not found, keeping default fonts".to_string())?;
    let bytes =
        fs::read(p).map_err(|e| format!("Failed to read font file ({}): {e}", p.display()))?;
    apply_font_bytes(ctx, bytes, "korean_font");
    Ok(())
}

/// 텍스트 편집기가 포커스를 잃을 때 눌린 키에 따라 패널 이벤트를 고른다.
fn focus_exit_event(enter: bool, escape: bool) -> FieldEvent {
    if escape {
        FieldEvent::RevertRequested
    } else if enter {
        FieldEvent::CommitRequested
    } else {
        FieldEvent::FocusLost
    }
}

/// 알림 기록에 추가한다. 가득 차면 가장 오래된 항목을 버린다.
fn push_bounded(log: &mut VecDeque<Notification>, n: Notification) {
    if log.len() >= MAX_LOG {
        log.pop_front();
    }
    log.push_back(n);
}

fn notification_text(tr: &i18n::Translator, n: Notification) -> String {
    let key = match n {
        Notification::UnitChanged => keys::NOTIFY_UNIT_CHANGED,
        Notification::SpecsChanged => keys::NOTIFY_SPECS_CHANGED,
    };
    tr.t(key).to_string()
}

fn spec_label_ui(ui: &mut egui::Ui, label: &SpecLabel) -> egui::Response {
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 0.0;
        ui.label(egui::RichText::new(label.symbol()).strong().italics());
        if let Some(sub) = label.subscript() {
            ui.label(egui::RichText::new(sub).small().strong());
        }
    })
    .response
}

/// 프레임 동안 모은 사용자 동작. 필드 목록을 빌린 상태에서는 패널을 바꿀 수 없어 나중에 적용한다.
enum UiAction {
    Field(usize, FieldEvent),
    Unit(AmpUnit),
    FilterType(FilterType),
    Digits(usize),
    DesignSet(&'static [&'static str]),
}

struct GuiApp {
    config: config::Config,
    saved_config: config::Config,
    tr: i18n::Translator,
    panel: AmplitudeSpecsPanel<SharedSpecs>,
    notifications: Rc<RefCell<VecDeque<Notification>>>,
    last_message: Option<String>,
}

impl GuiApp {
    fn new(config: config::Config) -> Result<Self, app::AppError> {
        let tr = i18n::Translator::new_with_pack(&config.language, config.locale_dir.as_deref());
        let mut panel = app::build_panel(&config)?;
        let notifications = Rc::new(RefCell::new(VecDeque::with_capacity(MAX_LOG)));
        let sink = Rc::clone(&notifications);
        panel.subscribe(move |n| push_bounded(&mut sink.borrow_mut(), n));
        Ok(Self {
            saved_config: config.clone(),
            config,
            tr,
            panel,
            notifications,
            last_message: None,
        })
    }

    fn apply(&mut self, action: UiAction) {
        let result = match action {
            UiAction::Field(i, event) => match self.panel.handle_event(i, event) {
                Ok(EditOutcome::Rejected(err)) => {
                    self.last_message = Some(err.to_string());
                    Ok(())
                }
                Ok(EditOutcome::Committed { .. } | EditOutcome::Reverted) => {
                    self.last_message = None;
                    Ok(())
                }
                Ok(EditOutcome::Unchanged) => Ok(()),
                Err(e) => Err(e),
            },
            UiAction::Unit(unit) => {
                self.config.default_unit = unit;
                self.panel.set_unit(unit)
            }
            UiAction::FilterType(ft) => {
                self.config.filter_type = ft;
                self.panel.store_mut().set_filter_type(ft);
                self.panel.render_all()
            }
            UiAction::Digits(n) => {
                let res = self.panel.set_display_digits(n);
                self.config.display_digits = self.panel.display_digits();
                res
            }
            UiAction::DesignSet(names) => self.panel.reconcile(names),
        };
        if let Err(e) = result {
            error!(error = %e, "panel action failed");
            self.last_message = Some(format!("{}: {e}", self.tr.t(keys::ERROR_PREFIX)));
        }
        if self.config != self.saved_config {
            self.persist();
        }
    }

    /// 설정이 바뀌었으면 바로 파일에 기록한다. 경로가 없으면(테스트 등) 건너뛴다.
    fn persist(&mut self) {
        if self.config.path().is_none() {
            return;
        }
        match self.config.save() {
            Ok(()) => self.saved_config = self.config.clone(),
            Err(e) => error!(error = %e, "config save failed"),
        }
    }

    fn specs_ui(&self, ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        ui.heading(self.tr.t(keys::PANEL_TITLE));
        ui.separator();
        egui::Grid::new("amp_specs_grid")
            .num_columns(2)
            .spacing([8.0, 6.0])
            .show(ui, |ui| {
                ui.label(self.tr.t(keys::PANEL_UNIT))
                    .on_hover_text(self.tr.t(keys::PANEL_UNIT_TIP));
                let current = self.panel.unit();
                let mut unit = current;
                egui::ComboBox::from_id_source("amp_unit")
                    .selected_text(unit.token())
                    .show_ui(ui, |ui| {
                        for u in AmpUnit::ALL {
                            ui.selectable_value(&mut unit, u, u.token());
                        }
                    })
                    .response
                    .on_hover_text(self.tr.t(keys::PANEL_UNIT_TIP));
                if unit != current {
                    actions.push(UiAction::Unit(unit));
                }
                ui.end_row();

                for (i, field) in self.panel.visible_fields().iter().enumerate() {
                    spec_label_ui(ui, field.label());
                    let mut text = field.text().to_string();
                    let resp = ui
                        .add(
                            egui::TextEdit::singleline(&mut text)
                                .id_source(("amp_field", i))
                                .desired_width(140.0),
                        )
                        .on_hover_text(self.tr.t(keys::PANEL_FIELD_TIP));
                    if resp.gained_focus() {
                        actions.push(UiAction::Field(i, FieldEvent::FocusGained));
                    }
                    if resp.changed() {
                        actions.push(UiAction::Field(i, FieldEvent::TextChanged(text)));
                    }
                    if resp.lost_focus() {
                        let (enter, escape) = ui.input(|inp| {
                            (
                                inp.key_pressed(egui::Key::Enter),
                                inp.key_pressed(egui::Key::Escape),
                            )
                        });
                        actions.push(UiAction::Field(i, focus_exit_event(enter, escape)));
                    }
                    ui.end_row();
                }
            });

        if let Some(msg) = &self.last_message {
            ui.add_space(6.0);
            ui.colored_label(egui::Color32::LIGHT_RED, msg);
        }
    }

    fn side_ui(&self, ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        ui.strong(self.tr.t(keys::GUI_DESIGN_SETS));
        ui.horizontal_wrapped(|ui| {
            for (title, names) in DESIGN_SETS {
                if ui.button(*title).on_hover_text(names.join(", ")).clicked() {
                    actions.push(UiAction::DesignSet(*names));
                }
            }
        });
        ui.separator();

        ui.horizontal(|ui| {
            ui.label(self.tr.t(keys::GUI_FILTER_TYPE));
            let current = self.panel.store().filter_type();
            for ft in [FilterType::Iir, FilterType::Fir] {
                if ui.selectable_label(current == ft, ft.token()).clicked() && current != ft {
                    actions.push(UiAction::FilterType(ft));
                }
            }
        });
        ui.horizontal(|ui| {
            ui.label(self.tr.t(keys::GUI_DIGITS));
            let mut digits = self.panel.display_digits();
            if ui
                .add(egui::DragValue::new(&mut digits).clamp_range(1..=MAX_SIGNIFICANT_DIGITS))
                .changed()
            {
                actions.push(UiAction::Digits(digits));
            }
        });
        ui.separator();

        ui.strong(self.tr.t(keys::GUI_STORE));
        egui::Grid::new("store_grid").num_columns(2).show(ui, |ui| {
            for (name, value) in self.panel.store().borrow().iter() {
                ui.monospace(name);
                ui.monospace(format!("{value:e}"));
                ui.end_row();
            }
        });
        ui.separator();

        ui.horizontal(|ui| {
            ui.strong(self.tr.t(keys::GUI_EVENTS));
            if ui.small_button(self.tr.t(keys::GUI_CLEAR)).clicked() {
                self.notifications.borrow_mut().clear();
            }
        });
        egui::ScrollArea::vertical()
            .max_height(120.0)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                for n in self.notifications.borrow().iter() {
                    ui.small(notification_text(&self.tr, *n));
                }
            });
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        let mut actions = Vec::new();
        egui::SidePanel::right("side_panel")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| self.side_ui(ui, &mut actions));
        egui::CentralPanel::default().show(ctx, |ui| self.specs_ui(ui, &mut actions));
        for action in actions {
            self.apply(action);
        }
    }
}
