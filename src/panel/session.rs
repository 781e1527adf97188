/// 입력 필드 하나의 편집 상태.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditState {
    /// 포커스 없음. 반올림된 값이 표시된다.
    #[default]
    Idle,
    /// 포커스 있음, 아직 키 입력 없음. 전체 정밀도로 표시된다.
    Focused,
    /// 포커스 있음, 저장되지 않은 편집이 있다.
    Dirty,
}

/// 필드별 편집 세션. 저장소에는 손대지 않고 상태만 바꾼다.
#[derive(Debug, Clone, Default)]
pub struct EditSession {
    state: EditState,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    pub fn has_focus(&self) -> bool {
        self.state != EditState::Idle
    }

    pub fn is_dirty(&self) -> bool {
        self.state == EditState::Dirty
    }

    /// 포커스 획득. 남아 있던 편집은 버린다.
    pub fn focus(&mut self) {
        self.state = EditState::Focused;
    }

    /// 키 입력. 포커스가 있을 때만 Dirty 로 간다.
    pub fn keystroke(&mut self) {
        if self.has_focus() {
            self.state = EditState::Dirty;
        }
    }

    /// 포커스는 유지하고 편집만 버린다.
    pub fn discard_edit(&mut self) {
        if self.state == EditState::Dirty {
            self.state = EditState::Focused;
        }
    }

    /// 포커스를 놓는다. 직전에 Dirty 였는지 돌려준다.
    pub fn release(&mut self) -> bool {
        let was_dirty = self.is_dirty();
        self.state = EditState::Idle;
        was_dirty
    }
}
