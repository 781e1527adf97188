//! 여러 패널이 함께 읽고 쓰는 필터 사양 저장소.
//!
//! 값은 항상 선형 단위로 저장된다. 표시 단위(`amp_specs_unit`)와 필터 종류(`ft`)도
//! 저장소에 있어 다른 패널이 읽을 수 있다.

use std::cell::RefCell;
use std::rc::Rc;

use crate::units::{AmpUnit, FilterType};

/// 진폭 사양 이름의 접두 문자.
pub const AMPLITUDE_PREFIX: char = 'A';

/// 저장소 인터페이스. 패널은 이 트레이트를 통해서만 사양 값에 접근한다.
pub trait SpecStore {
    /// 사양 이름으로 선형 값을 조회한다.
    fn get(&self, name: &str) -> Option<f64>;
    /// 사양 값을 기록한다. 없는 이름이면 끝에 추가한다.
    fn set(&mut self, name: &str, value: f64);
    /// 저장된 순서대로 모든 사양 이름을 돌려준다.
    fn names(&self) -> Vec<String>;
    fn filter_type(&self) -> FilterType;
    fn set_filter_type(&mut self, filter_type: FilterType);
    fn display_unit(&self) -> AmpUnit;
    fn set_display_unit(&mut self, unit: AmpUnit);

    fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

/// 이름이 `A`로 시작하는 사양(진폭 사양)만 저장 순서대로 골라낸다.
pub fn amplitude_spec_names<S: SpecStore + ?Sized>(store: &S) -> Vec<String> {
    store
        .names()
        .into_iter()
        .filter(|n| n.starts_with(AMPLITUDE_PREFIX))
        .collect()
}

/// 삽입 순서를 유지하는 메모리 내 사양 저장소.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpecs {
    specs: Vec<(String, f64)>,
    /// 필터 종류(`ft`)
    pub ft: FilterType,
    /// 진폭 표시 단위(`amp_specs_unit`)
    pub amp_specs_unit: AmpUnit,
}

impl FilterSpecs {
    /// 빈 저장소를 만든다.
    pub fn new(ft: FilterType, amp_specs_unit: AmpUnit) -> Self {
        Self {
            specs: Vec::new(),
            ft,
            amp_specs_unit,
        }
    }

    /// 빌더 형태로 사양을 추가한다.
    pub fn with(mut self, name: &str, value: f64) -> Self {
        self.set(name, value);
        self
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.specs.iter().map(|(n, v)| (n.as_str(), *v))
    }

    /// 다른 패널과 공유하기 위해 `Rc<RefCell<_>>`로 감싼다.
    pub fn into_shared(self) -> SharedSpecs {
        Rc::new(RefCell::new(self))
    }
}

impl Default for FilterSpecs {
    /// 저역통과 IIR 설계의 기본 사양. 주파수 사양(`F_*`)은 진폭 패널이 다루지 않는다.
    fn default() -> Self {
        FilterSpecs::new(FilterType::Iir, AmpUnit::Db)
            .with("F_PB", 0.1)
            .with("F_SB", 0.2)
            .with("A_PB", 0.1)
            .with("A_PB2", 1.0)
            .with("A_SB", 0.001)
            .with("A_SB2", 1e-4)
    }
}

impl SpecStore for FilterSpecs {
    fn get(&self, name: &str) -> Option<f64> {
        self.specs.iter().find(|(n, _)| n == name).map(|(_, v)| *v)
    }

    fn set(&mut self, name: &str, value: f64) {
        match self.specs.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = value,
            None => self.specs.push((name.to_string(), value)),
        }
    }

    fn names(&self) -> Vec<String> {
        self.specs.iter().map(|(n, _)| n.clone()).collect()
    }

    fn filter_type(&self) -> FilterType {
        self.ft
    }

    fn set_filter_type(&mut self, filter_type: FilterType) {
        self.ft = filter_type;
    }

    fn display_unit(&self) -> AmpUnit {
        self.amp_specs_unit
    }

    fn set_display_unit(&mut self, unit: AmpUnit) {
        self.amp_specs_unit = unit;
    }
}

/// 단일 스레드 UI 안에서 여러 패널이 함께 쓰는 저장소 핸들.
pub type SharedSpecs = Rc<RefCell<FilterSpecs>>;

impl<S: SpecStore> SpecStore for Rc<RefCell<S>> {
    fn get(&self, name: &str) -> Option<f64> {
        self.borrow().get(name)
    }

    fn set(&mut self, name: &str, value: f64) {
        self.borrow_mut().set(name, value)
    }

    fn names(&self) -> Vec<String> {
        self.borrow().names()
    }

    fn filter_type(&self) -> FilterType {
        self.borrow().filter_type()
    }

    fn set_filter_type(&mut self, filter_type: FilterType) {
        self.borrow_mut().set_filter_type(filter_type)
    }

    fn display_unit(&self) -> AmpUnit {
        self.borrow().display_unit()
    }

    fn set_display_unit(&mut self, unit: AmpUnit) {
        self.borrow_mut().set_display_unit(unit)
    }
}
