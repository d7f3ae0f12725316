//! 인증 관련 서비스

pub mod token_blacklist;
pub mod token_service;

pub use token_blacklist::TokenBlacklist;
pub use token_service::TokenService;
