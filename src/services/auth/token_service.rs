//! JWT 세션 토큰 관리 서비스 구현
//!
//! HMAC-SHA256(HS256) 서명 기반의 세션 토큰을 발급하고 검증합니다.
//! 토큰은 발급 후 2일 뒤 만료되며, 로그아웃된 토큰은 폐기 집합을 통해
//! 만료 전이라도 거부됩니다.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use std::sync::Arc;

use crate::config::JwtConfig;
use crate::core::errors::AppError;
use crate::core::registry::{Service, ServiceLocator, ServiceRegistration};
use crate::domain::auth::token::TokenClaims;
use crate::domain::entities::users::user::User;
use crate::services::auth::token_blacklist::TokenBlacklist;

/// JWT 세션 토큰 관리 서비스
///
/// 발급과 검증 양쪽에서 동일한 대칭 비밀키([`JwtConfig::secret`])를 사용합니다.
pub struct TokenService {
    /// 명시적으로 로그아웃된 토큰의 폐기 집합
    blacklist: Arc<TokenBlacklist>,
}

inventory::submit! {
    ServiceRegistration {
        name: "token_service",
        constructor: || Box::new(TokenService::new()),
    }
}

#[async_trait::async_trait]
impl Service for TokenService {
    fn name(&self) -> &str {
        "token_service"
    }

    async fn init(&self) -> Result<(), Box<dyn std::error::Error>> {
        Ok(())
    }
}

impl TokenService {
    /// 새 인스턴스를 생성합니다. 레지스트리 생성자에서만 호출됩니다.
    fn new() -> Arc<Self> {
        Arc::new(Self {
            blacklist: ServiceLocator::get::<TokenBlacklist>(),
        })
    }

    /// 싱글톤 인스턴스를 가져옵니다.
    pub fn instance() -> Arc<Self> {
        ServiceLocator::get::<Self>()
    }

    /// 사용자를 위한 세션 토큰 발급
    ///
    /// 클레임에는 사용자 ID(`sub`), 이메일, 발급/만료 시각이 포함됩니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 토큰 생성 실패 또는 사용자 ID 없음
    pub fn issue_token(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let expiration = now + Duration::days(JwtConfig::expiration_days());

        let claims = TokenClaims {
            sub: user
                .id_string()
                .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))?,
            email: user.email.clone(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        let secret = JwtConfig::secret();
        let header = Header::default();
        let encoding_key = EncodingKey::from_secret(secret.as_ref());

        encode(&header, &claims, &encoding_key)
            .map_err(|e| AppError::InternalError(format!("JWT 토큰 생성 실패: {}", e)))
    }

    /// 세션 토큰 검증 및 클레임 추출
    ///
    /// 폐기 집합을 먼저 확인하므로, 암호학적으로 유효하고 만료되지 않은
    /// 토큰이라도 로그아웃된 토큰이면 거부됩니다.
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 폐기/만료/위조된 토큰
    pub fn verify_token(&self, token: &str) -> Result<TokenClaims, AppError> {
        if self.blacklist.is_revoked(token) {
            return Err(AppError::AuthenticationError(
                "로그아웃으로 폐기된 토큰입니다".to_string(),
            ));
        }

        let secret = JwtConfig::secret();
        let decoding_key = DecodingKey::from_secret(secret.as_ref());
        let validation = Validation::default();

        decode::<TokenClaims>(token, &decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::AuthenticationError("토큰이 만료되었습니다".to_string())
                }
                _ => AppError::AuthenticationError("유효하지 않은 토큰입니다".to_string()),
            })
    }

    /// 토큰을 폐기합니다 (로그아웃).
    ///
    /// 폐기된 토큰은 자연 만료 전이라도 모든 인증 라우트에서 거부됩니다.
    pub fn revoke_token(&self, token: &str) {
        self.blacklist.revoke(token);
        log::info!("토큰 폐기 완료 (현재 폐기 목록 크기: {})", self.blacklist.len());
    }

    /// Bearer 토큰에서 실제 토큰 부분 추출
    ///
    /// HTTP Authorization 헤더의 `Bearer {token}` 형식에서 토큰만 추출합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 잘못된 헤더 형식
    pub fn extract_bearer_token<'a>(&self, auth_header: &'a str) -> Result<&'a str, AppError> {
        if let Some(token) = auth_header.strip_prefix("Bearer ") {
            Ok(token)
        } else {
            Err(AppError::AuthenticationError(
                "유효하지 않은 인증 헤더 형식입니다".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::users::user::UserType;
    use mongodb::bson::oid::ObjectId;

    fn service() -> TokenService {
        TokenService {
            blacklist: Arc::new(TokenBlacklist::new()),
        }
    }

    fn sample_user() -> User {
        let mut user = User::new(
            "a@b.com".to_string(),
            "Alice".to_string(),
            UserType::Regular,
            "digest".to_string(),
        );
        user.id = Some(ObjectId::new());
        user
    }

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let service = service();
        let user = sample_user();

        let token = service.issue_token(&user).unwrap();
        let claims = service.verify_token(&token).unwrap();

        assert_eq!(claims.sub, user.id_string().unwrap());
        assert_eq!(claims.email, "a@b.com");
        assert!(claims.exp > claims.iat);

        // 만료 기간은 설정값(기본 2일)을 따른다
        assert_eq!(claims.exp - claims.iat, JwtConfig::expiration_days() * 24 * 3600);
    }

    #[test]
    fn test_issue_without_id_fails() {
        let service = service();
        let user = User::new(
            "a@b.com".to_string(),
            "Alice".to_string(),
            UserType::Regular,
            "digest".to_string(),
        );

        assert!(service.issue_token(&user).is_err());
    }

    #[test]
    fn test_revoked_token_is_rejected() {
        let service = service();
        let token = service.issue_token(&sample_user()).unwrap();

        assert!(service.verify_token(&token).is_ok());

        service.revoke_token(&token);
        let result = service.verify_token(&token);

        assert!(matches!(result, Err(AppError::AuthenticationError(_))));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let service = service();
        let now = Utc::now();

        // 만료 시각이 과거인 토큰을 직접 서명
        let claims = TokenClaims {
            sub: ObjectId::new().to_hex(),
            email: "a@b.com".to_string(),
            iat: (now - Duration::days(3)).timestamp(),
            exp: (now - Duration::days(1)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(JwtConfig::secret().as_ref()),
        )
        .unwrap();

        assert!(matches!(
            service.verify_token(&token),
            Err(AppError::AuthenticationError(_))
        ));
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let service = service();

        assert!(service.verify_token("not.a.jwt").is_err());
        assert!(service.verify_token("").is_err());
    }

    #[test]
    fn test_extract_bearer_token() {
        let service = service();

        assert_eq!(service.extract_bearer_token("Bearer abc.def.ghi").unwrap(), "abc.def.ghi");
        assert!(service.extract_bearer_token("Basic abc").is_err());
        assert!(service.extract_bearer_token("abc.def.ghi").is_err());
    }
}
