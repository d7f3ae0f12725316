//! # Authentication Configuration Module
//!
//! JWT 토큰과 비밀번호 해싱 관련 설정을 관리하는 모듈입니다.
//!
//! ## 필수 환경 변수 설정
//!
//! ```bash
//! export JWT_SECRET="your-super-secret-jwt-key"
//! export JWT_EXPIRATION_DAYS="2"
//! export SALT="your-password-salt"
//! ```
//!
//! 운영 환경에서는 반드시 모든 값을 명시적으로 설정해야 합니다.
//! 개발 환경 기본값은 로컬 개발 편의를 위한 것으로, 기본값 사용 시
//! 경고 로그가 출력됩니다.

use std::env;

/// JWT 토큰 서명 설정
///
/// HMAC-SHA256(HS256) 대칭키 서명에 사용되는 비밀키와 만료 정책을 관리합니다.
pub struct JwtConfig;

impl JwtConfig {
    /// JWT 서명에 사용할 비밀키를 반환합니다.
    ///
    /// `JWT_SECRET` 환경 변수를 읽으며, 설정되지 않은 경우 개발용
    /// 기본값을 사용하고 경고를 남깁니다.
    ///
    /// # 보안 주의사항
    ///
    /// - 이 값을 로그에 출력하지 마세요
    /// - 운영 환경에서는 충분히 긴 무작위 값을 사용하세요
    pub fn secret() -> String {
        env::var("JWT_SECRET").unwrap_or_else(|_| {
            log::warn!("JWT_SECRET 미설정: 개발용 기본값을 사용합니다");
            "dev-jwt-secret".to_string()
        })
    }

    /// 토큰 만료 기간(일)을 반환합니다.
    ///
    /// `JWT_EXPIRATION_DAYS` 환경 변수를 읽으며 기본값은 2일입니다.
    pub fn expiration_days() -> i64 {
        env::var("JWT_EXPIRATION_DAYS")
            .unwrap_or_else(|_| "2".to_string())
            .parse::<i64>()
            .unwrap_or_else(|e| {
                log::error!("JWT_EXPIRATION_DAYS 파싱 실패: {}. 기본값 2 사용", e);
                2
            })
    }
}

/// 비밀번호 해싱 설정
///
/// 서버 전역 솔트를 관리합니다. 사용자별 솔트가 아닌 서버 전역 솔트를
/// 사용하는 것은 기존 자격증명 형식과의 호환을 위한 것으로,
/// 알려진 보안 약점입니다 (DESIGN.md 참고).
pub struct PasswordConfig;

impl PasswordConfig {
    /// 비밀번호 해싱에 사용할 서버 전역 솔트를 반환합니다.
    ///
    /// `SALT` 환경 변수를 읽으며, 설정되지 않은 경우 개발용
    /// 기본값을 사용하고 경고를 남깁니다.
    pub fn salt() -> String {
        env::var("SALT").unwrap_or_else(|_| {
            log::warn!("SALT 미설정: 개발용 기본값을 사용합니다");
            "dev-password-salt".to_string()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiration_days_default() {
        // 환경 변수가 없는 상태에서 기본값 2일을 보장
        if env::var("JWT_EXPIRATION_DAYS").is_err() {
            assert_eq!(JwtConfig::expiration_days(), 2);
        }
    }
}
