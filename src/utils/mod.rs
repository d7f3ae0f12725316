//! 공용 유틸리티 모듈

pub mod crypto;
pub mod display_terminal;
pub mod upload;
