//! 필터 설계 도구의 진폭 사양 패널. 핵심 동기화 로직을 라이브러리로 분리하여
//! CLI 와 GUI 가 같은 패널을 쓴다.

pub mod app;
pub mod config;
pub mod conversion;
pub mod events;
pub mod expr;
pub mod format;
pub mod i18n;
pub mod logging;
pub mod panel;
pub mod store;
pub mod ui_cli;
pub mod units;
