//! # Comment HTTP Handlers
//!
//! 댓글 관련 HTTP 엔드포인트를 처리하는 핸들러들입니다.
//! 부모 오퍼의 존재는 라우트의 존재 검사 미들웨어가 보장합니다.

use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::core::errors::AppError;
use crate::domain::auth::authenticated_user::AuthenticatedUser;
use crate::domain::dto::comments::request::CreateCommentRequest;
use crate::domain::dto::comments::response::CommentResponse;
use crate::services::comments::comment_service::CommentService;

/// 댓글 생성 핸들러
///
/// 작성자는 인증된 사용자로, 소속 오퍼는 경로 파라미터로 결정됩니다.
/// 생성 시 오퍼의 댓글 수 카운터가 증가합니다.
///
/// # 엔드포인트
///
/// `POST /comments/{offer_id}` (인증 필요) → 201
pub async fn create(
    user: AuthenticatedUser,
    offer_id: web::Path<String>,
    payload: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let comment = CommentService::instance()
        .create_for_offer(payload.into_inner(), &offer_id, &user.user_id)
        .await?;

    Ok(HttpResponse::Created().json(CommentResponse::from(comment)))
}

/// 오퍼의 댓글 목록 핸들러
///
/// 작성 시간 오름차순으로 모든 댓글을 반환합니다.
///
/// # 엔드포인트
///
/// `GET /comments/{offer_id}` → 200
pub async fn list(offer_id: web::Path<String>) -> Result<HttpResponse, AppError> {
    let comments = CommentService::instance().find_by_offer_id(&offer_id).await?;

    let response: Vec<CommentResponse> =
        comments.into_iter().map(CommentResponse::from).collect();

    Ok(HttpResponse::Ok().json(response))
}
