//! 혼합 계산 로직을 라이브러리로 분리하여 GUI와 CLI가 같은 폼 모델을 공유한다.

pub mod app;
pub mod blend;
pub mod clipboard;
pub mod config;
pub mod form;
pub mod i18n;
pub mod logging;
pub mod settings;
pub mod ui_cli;
