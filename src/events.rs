//! 패널이 외부로 내보내는 알림과, 외부에서 들어오는 입력 필드 이벤트.

/// 다른 패널에 보내는 알림. 내용은 없고 수신 측이 저장소에서 다시 읽는다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notification {
    /// 진폭 표시 단위가 바뀌었다.
    UnitChanged,
    /// 저장소의 사양 값이 바뀌었다.
    SpecsChanged,
}

/// UI 툴킷과 무관한 입력 필드 이벤트. 필드 하나에 대해 발생 순서대로 전달된다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEvent {
    FocusGained,
    /// 키 입력으로 필드 텍스트가 바뀌었다. 새 텍스트 전체를 담는다.
    TextChanged(String),
    /// Enter/Return
    CommitRequested,
    /// Escape
    RevertRequested,
    FocusLost,
}

type Subscriber = Box<dyn FnMut(Notification)>;

/// 구독자 목록. 발행은 즉시 모든 구독자를 순서대로 호출한다.
#[derive(Default)]
pub struct Notifier {
    subscribers: Vec<Subscriber>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, f: impl FnMut(Notification) + 'static) {
        self.subscribers.push(Box::new(f));
    }

    pub fn emit(&mut self, notification: Notification) {
        for sub in self.subscribers.iter_mut() {
            sub(notification);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
