//! # Offer HTTP Handlers
//!
//! 렌탈 오퍼 관련 HTTP 엔드포인트를 처리하는 핸들러들입니다.
//!
//! | 메서드 | 경로 | 설명 | 상태 코드 |
//! |--------|------|------|-----------|
//! | `GET` | `/offers?count=N` | 오퍼 목록 | 200 |
//! | `POST` | `/offers` | 오퍼 생성 | 201 |
//! | `GET` | `/offers/{offer_id}` | 오퍼 단건 조회 | 200 / 404 |
//! | `PATCH` | `/offers/{offer_id}` | 오퍼 수정 (소유자) | 200 / 400 |
//! | `DELETE` | `/offers/{offer_id}` | 오퍼 삭제 + 댓글 연쇄 삭제 | 204 |
//! | `GET` | `/offers/premium/{city}` | 도시별 프리미엄 | 200 |
//! | `POST` | `/offers/favorites/{offer_id}` | 즐겨찾기 추가 | 204 |
//! | `DELETE` | `/offers/favorites/{offer_id}` | 즐겨찾기 제거 | 204 |
//! | `POST` | `/offers/{offer_id}/preview-image` | 미리보기 업로드 (소유자) | 201 |
//! | `POST` | `/offers/{offer_id}/image` | 갤러리 추가 (소유자) | 204 |
//! | `DELETE` | `/offers/{offer_id}/image` | 갤러리 제거 (소유자) | 204 |
//!
//! ## 소유자 규칙
//!
//! 오퍼를 변경하는 모든 핸들러는 서비스 호출 전에 [`ensure_owner`]로
//! 호출자가 저장된 소유자와 동일한지 확인합니다. 불일치 시 어떤 변경도
//! 일어나기 전에 400으로 거부됩니다.

use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use validator::Validate;

use crate::config::UploadConfig;
use crate::core::errors::AppError;
use crate::domain::auth::authenticated_user::AuthenticatedUser;
use crate::domain::dto::offers::request::{
    CreateOfferRequest, RemoveImageRequest, UpdateOfferRequest,
};
use crate::domain::dto::offers::response::{
    OfferListItemResponse, OfferResponse, UploadImageResponse,
};
use crate::domain::entities::offers::offer::{City, Offer};
use crate::repositories::users::user_repo::parse_object_id;
use crate::services::offers::offer_service::OfferService;
use crate::services::users::user_service::UserService;
use crate::utils::upload::save_upload;

/// 오퍼 목록 조회 쿼리 파라미터
#[derive(Debug, Deserialize)]
pub struct OfferListQuery {
    /// 반환할 최대 오퍼 수 (상한은 리포지토리 상수로 고정)
    pub count: Option<i64>,
}

/// 호출자가 오퍼의 소유자인지 판정하는 술어
///
/// 소유자 검증이 필요한 모든 핸들러가 이 하나의 술어를 사용합니다.
pub fn is_owner(offer: &Offer, caller_id: &str) -> bool {
    offer.user_id.to_hex() == caller_id
}

/// 소유자가 아니면 400으로 거부합니다.
fn ensure_owner(offer: &Offer, user: &AuthenticatedUser) -> Result<(), AppError> {
    if !is_owner(offer, &user.user_id) {
        return Err(AppError::OwnershipError(
            "다른 사용자가 생성한 오퍼입니다".to_string(),
        ));
    }
    Ok(())
}

/// 오퍼를 조회하고 없으면 404를 반환합니다.
async fn find_offer_or_404(offer_id: &str) -> Result<Offer, AppError> {
    OfferService::instance()
        .find_by_id(offer_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Offer을(를) 찾을 수 없습니다: {}", offer_id)))
}

/// 오퍼 목록 핸들러
///
/// `GET /offers?count=N` → 200, 목록 형태 응답
pub async fn index(query: web::Query<OfferListQuery>) -> Result<HttpResponse, AppError> {
    let offers = OfferService::instance().find(query.count).await?;

    let response: Vec<OfferListItemResponse> =
        offers.into_iter().map(OfferListItemResponse::from).collect();

    Ok(HttpResponse::Ok().json(response))
}

/// 오퍼 생성 핸들러
///
/// 소유자는 요청 본문이 아닌 인증된 사용자로 스탬핑됩니다.
///
/// `POST /offers` (인증 필요) → 201, 전체 오퍼 응답
pub async fn create(
    user: AuthenticatedUser,
    payload: web::Json<CreateOfferRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let owner_id = parse_object_id(&user.user_id)?;
    let offer = OfferService::instance()
        .create(payload.into_inner(), owner_id)
        .await?;

    Ok(HttpResponse::Created().json(OfferResponse::from(offer)))
}

/// 오퍼 단건 조회 핸들러
///
/// `GET /offers/{offer_id}` → 200 | 404
pub async fn show(offer_id: web::Path<String>) -> Result<HttpResponse, AppError> {
    let offer = find_offer_or_404(&offer_id).await?;

    Ok(HttpResponse::Ok().json(OfferResponse::from(offer)))
}

/// 오퍼 수정 핸들러
///
/// 소유자 검증은 어떤 변경보다 먼저 수행됩니다.
///
/// `PATCH /offers/{offer_id}` (인증 필요, 소유자 전용) → 200 | 400
pub async fn update(
    user: AuthenticatedUser,
    offer_id: web::Path<String>,
    payload: web::Json<UpdateOfferRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let offer = find_offer_or_404(&offer_id).await?;
    ensure_owner(&offer, &user)?;

    let updated = OfferService::instance()
        .update_by_id(&offer_id, payload.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Offer을(를) 찾을 수 없습니다: {}", offer_id)))?;

    Ok(HttpResponse::Ok().json(OfferResponse::from(updated)))
}

/// 오퍼 삭제 핸들러
///
/// 오퍼가 삭제되면 해당 오퍼의 모든 댓글도 연쇄 삭제됩니다.
///
/// `DELETE /offers/{offer_id}` (인증 필요, 소유자 전용) → 204
pub async fn delete(
    user: AuthenticatedUser,
    offer_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let offer = find_offer_or_404(&offer_id).await?;
    ensure_owner(&offer, &user)?;

    OfferService::instance().delete_by_id(&offer_id).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// 도시별 프리미엄 오퍼 핸들러
///
/// `GET /offers/premium/{city}` → 200, 고정 개수의 목록
pub async fn show_premium(city: web::Path<String>) -> Result<HttpResponse, AppError> {
    let raw = city.into_inner();
    let city = City::from_param(&raw)
        .ok_or_else(|| AppError::ValidationError(format!("알 수 없는 도시입니다: {}", raw)))?;

    let offers = OfferService::instance().find_premium_by_city(city).await?;

    let response: Vec<OfferListItemResponse> =
        offers.into_iter().map(OfferListItemResponse::from).collect();

    Ok(HttpResponse::Ok().json(response))
}

/// 즐겨찾기 추가 핸들러
///
/// set 의미론이므로 같은 오퍼를 반복 추가해도 목록에는 하나만 남습니다.
///
/// `POST /offers/favorites/{offer_id}` (인증 필요) → 204
pub async fn add_favorite(
    user: AuthenticatedUser,
    offer_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    UserService::instance()
        .add_to_favorites(&user.user_id, &offer_id)
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

/// 즐겨찾기 제거 핸들러
///
/// 즐겨찾기에 없는 오퍼를 제거해도 에러가 아닙니다 (no-op).
///
/// `DELETE /offers/favorites/{offer_id}` (인증 필요) → 204
pub async fn remove_favorite(
    user: AuthenticatedUser,
    offer_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    UserService::instance()
        .remove_from_favorites(&user.user_id, &offer_id)
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

/// 미리보기 이미지 업로드 핸들러
///
/// `previewImage` 필드의 파일을 저장하고 오퍼의 미리보기 경로를 교체합니다.
///
/// `POST /offers/{offer_id}/preview-image` (인증 필요, 소유자 전용) → 201
pub async fn upload_preview_image(
    user: AuthenticatedUser,
    offer_id: web::Path<String>,
    mut payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let offer = find_offer_or_404(&offer_id).await?;
    ensure_owner(&offer, &user)?;

    let filename =
        save_upload(&mut payload, "previewImage", &UploadConfig::directory()).await?;

    if let Some(ref filename) = filename {
        OfferService::instance()
            .set_preview_image(&offer_id, filename)
            .await?;
    }

    Ok(HttpResponse::Created().json(UploadImageResponse {
        preview_image: filename,
    }))
}

/// 갤러리 이미지 추가 핸들러
///
/// `image` 필드의 파일을 저장하고 갤러리 배열에 추가합니다.
///
/// `POST /offers/{offer_id}/image` (인증 필요, 소유자 전용) → 204
pub async fn upload_image(
    user: AuthenticatedUser,
    offer_id: web::Path<String>,
    mut payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let offer = find_offer_or_404(&offer_id).await?;
    ensure_owner(&offer, &user)?;

    let filename = save_upload(&mut payload, "image", &UploadConfig::directory()).await?;

    if let Some(ref filename) = filename {
        OfferService::instance().add_image(&offer_id, filename).await?;
    }

    Ok(HttpResponse::NoContent().finish())
}

/// 갤러리 이미지 제거 핸들러
///
/// 본문으로 지정된 파일명을 갤러리 배열에서 제거합니다.
///
/// `DELETE /offers/{offer_id}/image` (인증 필요, 소유자 전용) → 204
pub async fn remove_image(
    user: AuthenticatedUser,
    offer_id: web::Path<String>,
    payload: web::Json<RemoveImageRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let offer = find_offer_or_404(&offer_id).await?;
    ensure_owner(&offer, &user)?;

    OfferService::instance()
        .remove_image(&offer_id, &payload.image)
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::offers::offer::{Coordinates, Facility, Housing};
    use mongodb::bson::{oid::ObjectId, DateTime};

    fn offer_owned_by(owner: ObjectId) -> Offer {
        Offer {
            id: Some(ObjectId::new()),
            name: "Cozy riverside loft".to_string(),
            description: "Bright loft with a canal view, fast wifi and quiet neighbours"
                .to_string(),
            publication_date: DateTime::now(),
            city: City::Paris,
            preview_image: "preview.jpg".to_string(),
            images: Vec::new(),
            premium: false,
            rating: 4.0,
            housing_type: Housing::Apartment,
            room_count: 2,
            guest_count: 2,
            cost: 500,
            facilities: vec![Facility::Breakfast],
            user_id: owner,
            comments_count: 0,
            coordinates: Coordinates {
                latitude: 48.85,
                longitude: 2.35,
            },
            created_at: DateTime::now(),
            updated_at: DateTime::now(),
        }
    }

    #[test]
    fn test_is_owner_matches_stored_owner() {
        let owner = ObjectId::new();
        let offer = offer_owned_by(owner);

        assert!(is_owner(&offer, &owner.to_hex()));
        assert!(!is_owner(&offer, &ObjectId::new().to_hex()));
        assert!(!is_owner(&offer, ""));
    }

    #[test]
    fn test_ensure_owner_rejects_non_owner_with_400() {
        let offer = offer_owned_by(ObjectId::new());
        let stranger = AuthenticatedUser {
            user_id: ObjectId::new().to_hex(),
            email: "stranger@b.com".to_string(),
        };

        let result = ensure_owner(&offer, &stranger);
        assert!(matches!(result, Err(AppError::OwnershipError(_))));
    }

    #[test]
    fn test_ensure_owner_accepts_owner() {
        let owner = ObjectId::new();
        let offer = offer_owned_by(owner);
        let caller = AuthenticatedUser {
            user_id: owner.to_hex(),
            email: "owner@b.com".to_string(),
        };

        assert!(ensure_owner(&offer, &caller).is_ok());
    }
}
