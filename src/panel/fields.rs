use tracing::debug;

use super::label::SpecLabel;
use super::session::EditSession;

/// 새로 만든 슬롯이 이름을 받기 전까지 쓰는 임시 이름.
const PLACEHOLDER_NAME: &str = "dummy";

/// 라벨과 입력 필드 한 쌍. 이름은 저장소 키와 같다.
#[derive(Debug, Clone)]
pub struct SpecField {
    name: String,
    label: SpecLabel,
    text: String,
    visible: bool,
    session: EditSession,
}

impl SpecField {
    fn placeholder() -> Self {
        Self {
            name: PLACEHOLDER_NAME.to_string(),
            label: SpecLabel::from_name(PLACEHOLDER_NAME),
            text: String::new(),
            visible: false,
            session: EditSession::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> &SpecLabel {
        &self.label
    }

    /// 현재 입력 필드에 보이는 텍스트.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub(crate) fn session_mut(&mut self) -> &mut EditSession {
        &mut self.session
    }

    pub(crate) fn set_text(&mut self, text: String) {
        self.text = text;
    }

    fn bind(&mut self, name: &str) {
        if self.name != name {
            self.name = name.to_string();
            self.label = SpecLabel::from_name(name);
        }
    }
}

/// 슬롯 배열. 앞의 `visible`개만 보이고 나머지는 숨긴 채 재사용을 위해 남겨 둔다.
#[derive(Debug, Clone, Default)]
pub struct FieldSet {
    slots: Vec<SpecField>,
    visible: usize,
    requested: Vec<String>,
}

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visible_count(&self) -> usize {
        self.visible
    }

    /// 숨긴 슬롯까지 포함한 전체 슬롯 수.
    pub fn allocated_count(&self) -> usize {
        self.slots.len()
    }

    /// 마지막 reconcile 에서 요청된 이름 목록.
    pub fn requested_names(&self) -> &[String] {
        &self.requested
    }

    pub fn visible(&self) -> &[SpecField] {
        &self.slots[..self.visible]
    }

    pub fn get(&self, index: usize) -> Option<&SpecField> {
        self.visible().get(index)
    }

    pub(crate) fn visible_mut(&mut self) -> &mut [SpecField] {
        &mut self.slots[..self.visible]
    }

    /// 포커스를 가진 보이는 필드의 위치.
    pub fn focused_index(&self) -> Option<usize> {
        self.visible().iter().position(|f| f.session.has_focus())
    }

    /// 요청된 이름 목록에 맞춰 슬롯을 늘리거나 숨기고 이름을 다시 붙인다.
    /// 값 표시는 호출자가 이어서 한다.
    pub fn reconcile<N: AsRef<str>>(&mut self, names: &[N]) {
        let n = names.len();
        let current = self.visible;

        if n < current {
            self.hide_from(n);
        } else if n > current {
            self.show_up_to(n);
        }

        for (slot, name) in self.slots.iter_mut().zip(names) {
            slot.bind(name.as_ref());
        }

        self.visible = n;
        self.requested = names.iter().map(|s| s.as_ref().to_string()).collect();
        debug!(
            visible = self.visible,
            allocated = self.slots.len(),
            "field set reconciled"
        );
    }

    fn hide_from(&mut self, n: usize) {
        for slot in self.slots[n..self.visible].iter_mut() {
            if slot.session.release() {
                debug!(spec = %slot.name, "uncommitted edit dropped on hide");
            }
            slot.visible = false;
        }
    }

    fn show_up_to(&mut self, n: usize) {
        let allocated = self.slots.len();
        if allocated < n {
            debug!(from = allocated, to = n, "allocating spec field slots");
            self.slots.resize_with(n, SpecField::placeholder);
        }
        for slot in self.slots[self.visible..n].iter_mut() {
            slot.visible = true;
        }
    }
}
