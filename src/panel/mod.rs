//! 진폭 사양 입력 패널.
//!
//! 화면 배치와 무관한 핵심부: 슬롯 관리(`fields`), 필드별 편집 상태(`session`),
//! 그리고 저장소 ↔ 표시 텍스트 동기화. UI 레이어는 [`FieldEvent`]를 넘기고
//! [`AmplitudeSpecsPanel::visible_fields`]의 텍스트를 그리기만 한다.

pub mod fields;
pub mod label;
pub mod session;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::conversion::ConversionError;
use crate::events::{FieldEvent, Notification, Notifier};
use crate::expr::{self, ParseError};
use crate::format::{clamp_digits, format_full, format_general};
use crate::store::{amplitude_spec_names, SpecStore};
use crate::units::{self, AmpUnit};

pub use fields::{FieldSet, SpecField};
pub use label::SpecLabel;
pub use session::{EditSession, EditState};

/// 반올림 표시의 기본 유효숫자(`{:.3g}`).
pub const DEFAULT_DISPLAY_DIGITS: usize = 3;

/// 패널 동작 중 호출자에게 전달되는 오류. 수식 오류는 여기 포함되지 않는다.
#[derive(Debug, Error)]
pub enum PanelError {
    /// 요청된 이름이 저장소에 없다(호출자 계약 위반).
    #[error("저장소에 없는 사양 이름: {0}")]
    UnknownSpecName(String),
    /// 보이는 필드 범위 밖의 인덱스로 이벤트가 왔다.
    #[error("{index}번 필드가 없음 (보이는 필드 {visible}개)")]
    NoSuchField { index: usize, visible: usize },
    #[error("단위 변환 오류: {0}")]
    Conversion(#[from] ConversionError),
}

/// 이벤트 하나를 처리한 결과.
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    /// 저장소 변화 없음.
    Unchanged,
    /// 편집이 저장소에 기록되었다(선형 값).
    Committed { name: String, linear: f64 },
    /// 수식을 해석하지 못해 편집을 버렸다. 필드는 저장된 값으로 되돌아간다.
    Rejected(ParseError),
    /// 사용자가 편집을 취소했다.
    Reverted,
}

/// 진폭 사양 패널. 저장소 `S`를 주입받아 사용한다.
#[derive(Debug)]
pub struct AmplitudeSpecsPanel<S: SpecStore> {
    store: S,
    fields: FieldSet,
    notifier: Notifier,
    display_digits: usize,
}

impl<S: SpecStore> AmplitudeSpecsPanel<S> {
    /// 저장소에서 `A`로 시작하는 사양을 모두 찾아 필드를 만든다.
    pub fn new(store: S, display_digits: usize) -> Result<Self, PanelError> {
        let mut panel = Self {
            store,
            fields: FieldSet::new(),
            notifier: Notifier::new(),
            display_digits: clamp_digits(display_digits),
        };
        let names = amplitude_spec_names(&panel.store);
        panel.reconcile(names.as_slice())?;
        Ok(panel)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// 저장소를 직접 바꾼 뒤에는 [`Self::render_all`]을 호출해야 표시가 맞는다.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn subscribe(&mut self, f: impl FnMut(Notification) + 'static) {
        self.notifier.subscribe(f);
    }

    pub fn unit(&self) -> AmpUnit {
        self.store.display_unit()
    }

    pub fn display_digits(&self) -> usize {
        self.display_digits
    }

    /// 유효숫자는 1~17 로 제한된다.
    pub fn set_display_digits(&mut self, digits: usize) -> Result<(), PanelError> {
        self.display_digits = clamp_digits(digits);
        self.render_all()
    }

    pub fn field_set(&self) -> &FieldSet {
        &self.fields
    }

    pub fn visible_fields(&self) -> &[SpecField] {
        self.fields.visible()
    }

    pub fn field(&self, index: usize) -> Option<&SpecField> {
        self.fields.get(index)
    }

    pub fn focused_index(&self) -> Option<usize> {
        self.fields.focused_index()
    }

    /// 필요한 사양 목록이 바뀌었을 때 호출한다(예: 다른 설계 방법 선택).
    ///
    /// 이름이 하나라도 저장소에 없으면 아무것도 바꾸지 않고 오류를 돌려준다.
    /// 중복 이름과 빈 목록을 허용하며 순서를 그대로 유지한다.
    pub fn reconcile<N: AsRef<str>>(&mut self, names: &[N]) -> Result<(), PanelError> {
        if let Some(missing) = names.iter().find(|n| !self.store.contains(n.as_ref())) {
            return Err(PanelError::UnknownSpecName(missing.as_ref().to_string()));
        }
        self.fields.reconcile(names);
        self.render_all()
    }

    /// 표시 단위를 바꾸고 모든 필드를 다시 그린 뒤 `UnitChanged`를 알린다.
    pub fn set_unit(&mut self, unit: AmpUnit) -> Result<(), PanelError> {
        self.store.set_display_unit(unit);
        info!(unit = %unit, "amplitude unit changed");
        self.render_all()?;
        self.notifier.emit(Notification::UnitChanged);
        Ok(())
    }

    /// UI 이벤트 하나를 처리한다. 이벤트는 보이는 필드의 인덱스로 전달된다.
    pub fn handle_event(
        &mut self,
        index: usize,
        event: FieldEvent,
    ) -> Result<EditOutcome, PanelError> {
        let visible = self.fields.visible_count();
        if index >= visible {
            return Err(PanelError::NoSuchField { index, visible });
        }

        match event {
            FieldEvent::FocusGained => {
                self.focus(index)?;
                Ok(EditOutcome::Unchanged)
            }
            FieldEvent::TextChanged(text) => {
                if !self.slot(index).session().has_focus() {
                    // 포커스 없는 필드에 키 입력은 올 수 없으므로 포커스를 먼저 준다.
                    self.focus(index)?;
                }
                let slot = self.slot_mut(index);
                slot.set_text(text);
                slot.session_mut().keystroke();
                Ok(EditOutcome::Unchanged)
            }
            FieldEvent::CommitRequested => {
                let was_dirty = self.slot_mut(index).session_mut().release();
                self.finish(index, was_dirty)
            }
            FieldEvent::RevertRequested => {
                let was_dirty = self.slot_mut(index).session_mut().release();
                self.render_all()?;
                if was_dirty {
                    debug!(spec = self.slot(index).name(), "edit reverted");
                    Ok(EditOutcome::Reverted)
                } else {
                    Ok(EditOutcome::Unchanged)
                }
            }
            FieldEvent::FocusLost => {
                let was_dirty = self.slot_mut(index).session_mut().release();
                self.finish(index, was_dirty)
            }
        }
    }

    /// 저장소에서 값을 다시 읽어 보이는 모든 필드의 텍스트를 만든다.
    ///
    /// 포커스 필드는 전체 정밀도, 나머지는 반올림 형식으로 그린다.
    /// 다른 필드의 미저장 편집이 남아 있으면 버린다.
    pub fn render_all(&mut self) -> Result<(), PanelError> {
        let unit = self.store.display_unit();
        let ft = self.store.filter_type();
        let digits = self.display_digits;

        for slot in self.fields.visible_mut() {
            let lin = self
                .store
                .get(slot.name())
                .ok_or_else(|| PanelError::UnknownSpecName(slot.name().to_string()))?;
            let value = units::to_display(lin, ft, slot.name(), unit);
            if slot.session().is_dirty() {
                debug!(spec = slot.name(), "pending edit overwritten by re-render");
                slot.session_mut().discard_edit();
            }
            let text = if slot.session().has_focus() {
                format_full(value)
            } else {
                format_general(value, digits)
            };
            slot.set_text(text);
        }
        Ok(())
    }

    fn focus(&mut self, index: usize) -> Result<(), PanelError> {
        // 한 번에 하나의 필드만 포커스를 가진다. 이전 필드는 포커스 상실로 처리한다.
        if let Some(prev) = self.fields.focused_index().filter(|&p| p != index) {
            self.handle_event(prev, FieldEvent::FocusLost)?;
        }
        self.slot_mut(index).session_mut().focus();
        self.render_all()
    }

    /// 포커스를 놓은 필드를 마무리한다. 편집이 있었으면 기록을 시도한다.
    fn finish(&mut self, index: usize, was_dirty: bool) -> Result<EditOutcome, PanelError> {
        let outcome = if was_dirty {
            self.commit(index)
        } else {
            Ok(EditOutcome::Unchanged)
        };
        self.render_all()?;
        let outcome = outcome?;
        if matches!(outcome, EditOutcome::Committed { .. }) {
            self.notifier.emit(Notification::SpecsChanged);
        }
        Ok(outcome)
    }

    fn commit(&mut self, index: usize) -> Result<EditOutcome, PanelError> {
        let slot = self.slot(index);
        let name = slot.name().to_string();
        let display_value = match expr::evaluate(slot.text()) {
            Ok(v) => v,
            Err(err) => {
                warn!(spec = %name, text = slot.text(), error = %err, "amplitude spec edit rejected");
                return Ok(EditOutcome::Rejected(err));
            }
        };
        let unit = self.store.display_unit();
        let ft = self.store.filter_type();
        let linear = units::to_linear(display_value, ft, &name, unit)?;
        self.store.set(&name, linear);
        info!(spec = %name, display = display_value, unit = %unit, linear, "amplitude spec stored");
        Ok(EditOutcome::Committed { name, linear })
    }

    fn slot(&self, index: usize) -> &SpecField {
        &self.fields.visible()[index]
    }

    fn slot_mut(&mut self, index: usize) -> &mut SpecField {
        &mut self.fields.visible_mut()[index]
    }
}
