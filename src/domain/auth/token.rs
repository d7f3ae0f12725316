//! JWT 세션 토큰 클레임 구조체
//!
//! RFC 7519 JWT 표준 클레임과 서비스 특화 클레임을 포함합니다.
//! 개인정보 보호를 위해 최소한의 정보만 담습니다.

use serde::{Deserialize, Serialize};

/// JWT 토큰의 클레임(Payload) 구조체
///
/// ## 클레임 구성
///
/// - `sub`: 토큰의 주체 (사용자 ID, ObjectId 16진수 문자열)
/// - `email`: 사용자 이메일
/// - `iat`: 토큰 발급 시간 (Unix timestamp)
/// - `exp`: 토큰 만료 시간 (Unix timestamp, 발급 후 2일)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// 토큰의 주체 (사용자 ID)
    pub sub: String,
    /// 사용자 이메일
    pub email: String,
    /// 토큰 발급 시간 (Unix timestamp)
    pub iat: i64,
    /// 토큰 만료 시간 (Unix timestamp)
    pub exp: i64,
}
