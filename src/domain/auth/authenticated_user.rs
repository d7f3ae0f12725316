//! 인증된 사용자 모델
//!
//! 인증 미들웨어가 JWT 토큰에서 추출하여 Request Extensions에 저장하는
//! 사용자 정보입니다. 핸들러에서는 `FromRequest` 추출자로 주입받습니다.

use std::future::{ready, Ready};

use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};

/// JWT 토큰에서 추출된 사용자 정보
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// 사용자 고유 ID (ObjectId 16진수 문자열)
    pub user_id: String,

    /// 사용자 이메일
    pub email: String,
}

/// ActixWeb FromRequest trait 구현
///
/// 인증 미들웨어를 통과한 요청에서만 추출에 성공합니다.
impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(actix_web::error::ErrorUnauthorized(
                "인증되지 않은 요청입니다",
            ))),
        }
    }
}
