//! 서덜랜드 식 점도 계산 코어를 라이브러리로 분리하여 CLI와 GUI가 함께 쓴다.

pub mod air;
pub mod app;
pub mod calculation;
pub mod config;
pub mod conversion;
pub mod i18n;
pub mod ui_cli;
pub mod units;
