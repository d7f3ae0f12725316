//! # User HTTP Handlers
//!
//! 사용자 계정과 세션 관련 HTTP 엔드포인트를 처리하는 핸들러들입니다.
//!
//! | 메서드 | 경로 | 설명 | 상태 코드 |
//! |--------|------|------|-----------|
//! | `POST` | `/users/register` | 회원가입 | 201 / 409 |
//! | `POST` | `/users/login` | 로그인 (토큰 발급) | 200 / 401 |
//! | `GET` | `/users/login` | 세션 확인 | 200 / 401 |
//! | `POST` | `/users/logout` | 로그아웃 (토큰 폐기) | 204 |
//! | `GET` | `/users/favorites` | 즐겨찾기 오퍼 목록 | 200 |
//! | `POST` | `/users/{user_id}/avatar` | 아바타 업로드 | 201 |

use actix_multipart::Multipart;
use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::config::UploadConfig;
use crate::core::errors::AppError;
use crate::domain::auth::authenticated_user::AuthenticatedUser;
use crate::domain::dto::offers::response::FavoriteOfferResponse;
use crate::domain::dto::users::request::{CreateUserRequest, LoginRequest};
use crate::domain::dto::users::response::{
    LoggedUserResponse, LoginResponse, UploadAvatarResponse, UserResponse,
};
use crate::services::auth::TokenService;
use crate::services::users::user_service::UserService;
use crate::utils::upload::save_upload;

/// 회원가입 핸들러
///
/// # 엔드포인트
///
/// `POST /users/register`
///
/// # 응답
///
/// - **201 Created**: 생성된 사용자 (비밀번호 제외)
/// - **400 Bad Request**: 필드 검증 실패 (위반 필드 전체가 집계됨)
/// - **409 Conflict**: 이미 등록된 이메일
///
/// ```json
/// {
///   "id": "507f1f77bcf86cd799439011",
///   "email": "a@b.com",
///   "name": "Alice",
///   "avatarPath": "default-avatar.jpg",
///   "type": "regular"
/// }
/// ```
pub async fn register(payload: web::Json<CreateUserRequest>) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let service = UserService::instance();
    let user = service.create_user(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// 로그인 핸들러
///
/// 자격증명 검증에 성공하면 2일짜리 세션 토큰을 발급합니다.
///
/// # 엔드포인트
///
/// `POST /users/login`
///
/// # 응답
///
/// - **200 OK**: 사용자 정보와 `token` 필드
/// - **401 Unauthorized**: 이메일 없음 또는 비밀번호 불일치 (토큰 미발급)
pub async fn login(payload: web::Json<LoginRequest>) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let user_service = UserService::instance();
    let request = payload.into_inner();

    let user = user_service.verify_user(&request).await?.ok_or_else(|| {
        AppError::AuthenticationError("이메일 또는 비밀번호가 올바르지 않습니다".to_string())
    })?;

    let token = TokenService::instance().issue_token(&user)?;

    Ok(HttpResponse::Ok().json(LoginResponse::new(user, token)))
}

/// 세션 확인 핸들러
///
/// 토큰이 가리키는 사용자가 여전히 존재하는지 확인합니다.
///
/// # 엔드포인트
///
/// `GET /users/login` (인증 필요)
pub async fn check_login(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let found = UserService::instance()
        .find_by_email(&user.email)
        .await?
        .ok_or_else(|| AppError::AuthenticationError("Unauthorized".to_string()))?;

    Ok(HttpResponse::Ok().json(LoggedUserResponse::from(found)))
}

/// 로그아웃 핸들러
///
/// 요청에 사용된 토큰을 폐기 집합에 추가합니다.
/// 폐기된 토큰은 자연 만료 전이라도 모든 인증 라우트에서 거부됩니다.
///
/// # 엔드포인트
///
/// `POST /users/logout` (인증 필요)
pub async fn logout(req: HttpRequest, _user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let token_service = TokenService::instance();

    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            AppError::AuthenticationError("Authorization 헤더가 없습니다".to_string())
        })?;

    let token = token_service.extract_bearer_token(auth_header)?;
    token_service.revoke_token(token);

    Ok(HttpResponse::NoContent().finish())
}

/// 즐겨찾기 오퍼 목록 핸들러
///
/// 사용자의 즐겨찾기 참조를 전체 오퍼로 해석하여 반환합니다.
/// 이 응답 형태에서는 `favorite`가 항상 `true`입니다.
///
/// # 엔드포인트
///
/// `GET /users/favorites` (인증 필요)
pub async fn show_favorites(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let offers = UserService::instance().find_favorites(&user.user_id).await?;

    let response: Vec<FavoriteOfferResponse> =
        offers.into_iter().map(FavoriteOfferResponse::from).collect();

    Ok(HttpResponse::Ok().json(response))
}

/// 아바타 업로드 핸들러
///
/// `avatar` 필드의 파일 하나를 업로드 디렉터리에 저장하고
/// 사용자의 아바타 경로를 갱신합니다. 파일이 없으면 갱신 없이 응답합니다.
///
/// # 엔드포인트
///
/// `POST /users/{user_id}/avatar`
pub async fn upload_avatar(
    user_id: web::Path<String>,
    mut payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let filename = save_upload(&mut payload, "avatar", &UploadConfig::directory()).await?;

    if let Some(ref filename) = filename {
        UserService::instance()
            .update_avatar(&user_id, filename)
            .await?;
    }

    Ok(HttpResponse::Created().json(UploadAvatarResponse { avatar: filename }))
}
