//! 단위 정의 및 변환 모듈 모음.

pub mod amplitude;

pub use amplitude::{is_passband, to_display, to_linear, AmpUnit, FilterType};
