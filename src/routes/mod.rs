//! API 라우트 설정 모듈
//!
//! RESTful API 엔드포인트들을 기능별로 그룹화하여 등록합니다.
//! 각 라우트는 메서드 + 경로 + 핸들러 + 순서 있는 미들웨어 목록으로
//! 선언되며, 미들웨어는 선언된 순서대로 실행되다가 실패 시 체인을
//! 중단하고 에러 응답을 반환합니다.
//!
//! # 미들웨어 적용 규칙
//!
//! `wrap()`은 마지막에 등록된 것이 가장 바깥(먼저 실행)이 되므로,
//! 실행 순서의 역순으로 등록합니다:
//!
//! ```rust,ignore
//! // 실행 순서: 인증 → ObjectId 형식 → 존재 검사 → 핸들러
//! web::resource("/favorites/{offer_id}")
//!     .wrap(DocumentExistsMiddleware::new("offer_id", "Offer", offer_exists))
//!     .wrap(ValidateObjectIdMiddleware::new("offer_id"))
//!     .wrap(AuthMiddleware::required())
//! ```

use actix_web::web;
use futures_util::future::LocalBoxFuture;
use serde_json::json;

use crate::core::errors::AppError;
use crate::handlers;
use crate::middlewares::{AuthMiddleware, DocumentExistsMiddleware, ValidateObjectIdMiddleware};
use crate::repositories::offers::offer_repo::OfferRepository;

/// 오퍼 존재 여부 조회 함수 (존재 검사 미들웨어용)
fn offer_exists(id: String) -> LocalBoxFuture<'static, Result<bool, AppError>> {
    Box::pin(async move { OfferRepository::instance().exists(&id).await })
}

/// 모든 라우트를 설정합니다
///
/// # Examples
///
/// ```rust,ignore
/// use actix_web::{web, App};
///
/// let app = App::new().configure(configure_all_routes);
/// ```
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    // Health check endpoint
    cfg.service(health_check);

    // Feature-specific routes
    configure_offer_routes(cfg);
    configure_comment_routes(cfg);
    configure_user_routes(cfg);
}

/// 오퍼 관련 라우트를 설정합니다
///
/// 목록/프리미엄 조회는 공개 라우트이며, 생성/수정/삭제와 이미지 및
/// 즐겨찾기 조작은 인증이 필요합니다.
fn configure_offer_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/offers")
            .service(
                web::resource("")
                    .route(web::get().to(handlers::offers::index))
                    .route(
                        web::post()
                            .wrap(AuthMiddleware::required())
                            .to(handlers::offers::create),
                    ),
            )
            .service(
                web::resource("/premium/{city}")
                    .route(web::get().to(handlers::offers::show_premium)),
            )
            .service(
                web::resource("/favorites/{offer_id}")
                    .wrap(DocumentExistsMiddleware::new("offer_id", "Offer", offer_exists))
                    .wrap(ValidateObjectIdMiddleware::new("offer_id"))
                    .wrap(AuthMiddleware::required())
                    .route(web::post().to(handlers::offers::add_favorite))
                    .route(web::delete().to(handlers::offers::remove_favorite)),
            )
            .service(
                web::resource("/{offer_id}/preview-image")
                    .wrap(ValidateObjectIdMiddleware::new("offer_id"))
                    .wrap(AuthMiddleware::required())
                    .route(web::post().to(handlers::offers::upload_preview_image)),
            )
            .service(
                web::resource("/{offer_id}/image")
                    .wrap(ValidateObjectIdMiddleware::new("offer_id"))
                    .wrap(AuthMiddleware::required())
                    .route(web::post().to(handlers::offers::upload_image))
                    .route(web::delete().to(handlers::offers::remove_image)),
            )
            .service(
                web::resource("/{offer_id}")
                    .wrap(DocumentExistsMiddleware::new("offer_id", "Offer", offer_exists))
                    .wrap(ValidateObjectIdMiddleware::new("offer_id"))
                    .route(web::get().to(handlers::offers::show))
                    .route(
                        web::patch()
                            .wrap(AuthMiddleware::required())
                            .to(handlers::offers::update),
                    )
                    .route(
                        web::delete()
                            .wrap(AuthMiddleware::required())
                            .to(handlers::offers::delete),
                    ),
            ),
    );
}

/// 댓글 관련 라우트를 설정합니다
///
/// 두 라우트 모두 부모 오퍼의 ID 형식과 존재를 먼저 검사합니다.
fn configure_comment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/comments").service(
            web::resource("/{offer_id}")
                .wrap(DocumentExistsMiddleware::new("offer_id", "Offer", offer_exists))
                .wrap(ValidateObjectIdMiddleware::new("offer_id"))
                .route(
                    web::post()
                        .wrap(AuthMiddleware::required())
                        .to(handlers::comments::create),
                )
                .route(web::get().to(handlers::comments::list)),
        ),
    );
}

/// 사용자 관련 라우트를 설정합니다
///
/// ## Public 라우트
/// - `POST /users/register` - 회원가입
/// - `POST /users/login` - 로그인
/// - `POST /users/{user_id}/avatar` - 아바타 업로드
///
/// ## Protected 라우트 (인증 필요)
/// - `GET /users/login` - 세션 확인
/// - `POST /users/logout` - 로그아웃 (토큰 폐기)
/// - `GET /users/favorites` - 즐겨찾기 오퍼 목록
fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .service(web::resource("/register").route(web::post().to(handlers::users::register)))
            .service(
                web::resource("/login")
                    .route(web::post().to(handlers::users::login))
                    .route(
                        web::get()
                            .wrap(AuthMiddleware::required())
                            .to(handlers::users::check_login),
                    ),
            )
            .service(
                web::resource("/logout")
                    .wrap(AuthMiddleware::required())
                    .route(web::post().to(handlers::users::logout)),
            )
            .service(
                web::resource("/favorites")
                    .wrap(AuthMiddleware::required())
                    .route(web::get().to(handlers::users::show_favorites)),
            )
            .service(
                web::resource("/{user_id}/avatar")
                    .wrap(ValidateObjectIdMiddleware::new("user_id"))
                    .route(web::post().to(handlers::users::upload_avatar)),
            ),
    );
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// 로드밸런서나 모니터링 시스템에서 서비스 상태를 확인하는 데 사용됩니다.
///
/// # Examples
///
/// ```bash
/// curl http://localhost:8080/health
/// ```
#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "rental_service_backend",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "features": {
            "database": "MongoDB",
            "authentication": "JWT (HS256)",
            "dependency_injection": "Service Registry"
        }
    }))
}
