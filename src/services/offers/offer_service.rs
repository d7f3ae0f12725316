//! # 오퍼 관리 서비스 구현
//!
//! 렌탈 오퍼의 생성/조회/수정/삭제 비즈니스 로직을 구현합니다.
//! 오퍼 삭제는 해당 오퍼의 모든 댓글 삭제로 연쇄됩니다.

use std::sync::Arc;

use mongodb::bson::{self, doc, oid::ObjectId, DateTime, Document};

use crate::core::errors::AppError;
use crate::core::registry::{Service, ServiceLocator, ServiceRegistration};
use crate::domain::dto::offers::request::{CreateOfferRequest, UpdateOfferRequest};
use crate::domain::entities::offers::offer::{City, Offer};
use crate::repositories::offers::offer_repo::OfferRepository;
use crate::services::comments::comment_service::CommentService;

/// 오퍼 관리 비즈니스 로직 서비스
///
/// ## 주요 책임
///
/// 1. **생성**: 검증된 요청에 인증된 소유자를 스탬핑하여 저장
/// 2. **조회**: 목록(개수 제한), 단건, 도시별 프리미엄 조회
/// 3. **수정**: 제공된 필드만 반영하는 부분 업데이트
/// 4. **삭제**: 오퍼 삭제 후 댓글 서비스에 연쇄 삭제 지시
///
/// 소유자 검증은 서비스가 아닌 핸들러 계층의 횡단 규칙입니다.
pub struct OfferService {
    /// 오퍼 데이터 액세스 리포지토리
    offer_repo: Arc<OfferRepository>,
    /// 연쇄 삭제를 위임하는 댓글 서비스
    comment_service: Arc<CommentService>,
}

inventory::submit! {
    ServiceRegistration {
        name: "offer_service",
        constructor: || Box::new(OfferService::new()),
    }
}

#[async_trait::async_trait]
impl Service for OfferService {
    fn name(&self) -> &str {
        "offer_service"
    }

    async fn init(&self) -> Result<(), Box<dyn std::error::Error>> {
        Ok(())
    }
}

impl OfferService {
    /// 새 인스턴스를 생성합니다. 레지스트리 생성자에서만 호출됩니다.
    fn new() -> Arc<Self> {
        Arc::new(Self {
            offer_repo: ServiceLocator::get::<OfferRepository>(),
            comment_service: ServiceLocator::get::<CommentService>(),
        })
    }

    /// 싱글톤 인스턴스를 가져옵니다.
    pub fn instance() -> Arc<Self> {
        ServiceLocator::get::<Self>()
    }

    /// 새 오퍼 생성
    ///
    /// 소유자는 요청 본문이 아닌 인증된 사용자 ID로 결정되며,
    /// 댓글 수 카운터는 0으로 시작합니다.
    pub async fn create(
        &self,
        request: CreateOfferRequest,
        owner_id: ObjectId,
    ) -> Result<Offer, AppError> {
        let now = DateTime::now();

        let offer = Offer {
            id: None,
            name: request.name,
            description: request.description,
            publication_date: DateTime::from_millis(request.publication_date.timestamp_millis()),
            city: request.city,
            preview_image: request.preview_image,
            images: request.images,
            premium: request.premium,
            rating: request.rating,
            housing_type: request.housing_type,
            room_count: request.room_count,
            guest_count: request.guest_count,
            cost: request.cost,
            facilities: request.facilities,
            user_id: owner_id,
            comments_count: 0,
            coordinates: request.coordinates,
            created_at: now,
            updated_at: now,
        };

        let created = self.offer_repo.create(offer).await?;
        log::info!("새 오퍼 생성: {}", created.name);

        Ok(created)
    }

    /// 오퍼 목록 조회 (최신순, 개수 제한은 리포지토리 상수로 고정)
    pub async fn find(&self, count: Option<i64>) -> Result<Vec<Offer>, AppError> {
        self.offer_repo.find(count).await
    }

    /// ID로 오퍼 조회
    pub async fn find_by_id(&self, offer_id: &str) -> Result<Option<Offer>, AppError> {
        self.offer_repo.find_by_id(offer_id).await
    }

    /// 도시별 프리미엄 오퍼 조회 (고정 개수)
    pub async fn find_premium_by_city(&self, city: City) -> Result<Vec<Offer>, AppError> {
        self.offer_repo.find_premium_by_city(city).await
    }

    /// 오퍼 부분 수정
    ///
    /// 요청에 제공된 필드만 `$set` 문서로 변환하여 반영합니다.
    /// 변경할 필드가 없으면 현재 상태를 그대로 반환합니다.
    pub async fn update_by_id(
        &self,
        offer_id: &str,
        request: UpdateOfferRequest,
    ) -> Result<Option<Offer>, AppError> {
        let update_doc = build_update_document(request)?;

        if update_doc.is_empty() {
            return self.offer_repo.find_by_id(offer_id).await;
        }

        self.offer_repo.update_by_id(offer_id, update_doc).await
    }

    /// 오퍼 삭제 및 댓글 연쇄 삭제
    ///
    /// 오퍼 문서 삭제와 댓글 일괄 삭제는 트랜잭션으로 묶이지 않습니다.
    /// 두 단계 사이에서 중단되면 고아 댓글이 남을 수 있습니다.
    pub async fn delete_by_id(&self, offer_id: &str) -> Result<(), AppError> {
        let deleted = self.offer_repo.delete_by_id(offer_id).await?;
        let removed_comments = self.comment_service.delete_by_offer_id(offer_id).await?;

        log::info!(
            "오퍼 삭제: {} (문서 {}건, 연쇄 삭제된 댓글 {}건)",
            offer_id,
            deleted,
            removed_comments
        );

        Ok(())
    }

    /// 미리보기 이미지 교체
    pub async fn set_preview_image(
        &self,
        offer_id: &str,
        filename: &str,
    ) -> Result<Option<Offer>, AppError> {
        self.offer_repo
            .update_by_id(offer_id, doc! { "preview_image": filename })
            .await
    }

    /// 갤러리에 이미지 추가 (멱등)
    pub async fn add_image(&self, offer_id: &str, filename: &str) -> Result<(), AppError> {
        self.offer_repo.add_image(offer_id, filename).await
    }

    /// 갤러리에서 이미지 제거 (멱등)
    pub async fn remove_image(&self, offer_id: &str, filename: &str) -> Result<(), AppError> {
        self.offer_repo.remove_image(offer_id, filename).await
    }
}

/// 부분 수정 요청을 MongoDB `$set` 문서로 변환합니다.
fn build_update_document(request: UpdateOfferRequest) -> Result<Document, AppError> {
    let mut update = Document::new();

    if let Some(name) = request.name {
        update.insert("name", name);
    }
    if let Some(description) = request.description {
        update.insert("description", description);
    }
    if let Some(publication_date) = request.publication_date {
        update.insert(
            "publication_date",
            DateTime::from_millis(publication_date.timestamp_millis()),
        );
    }
    if let Some(city) = request.city {
        update.insert("city", to_bson_value(&city)?);
    }
    if let Some(preview_image) = request.preview_image {
        update.insert("preview_image", preview_image);
    }
    if let Some(images) = request.images {
        update.insert("images", images);
    }
    if let Some(premium) = request.premium {
        update.insert("premium", premium);
    }
    if let Some(rating) = request.rating {
        update.insert("rating", rating);
    }
    if let Some(housing_type) = request.housing_type {
        update.insert("housing_type", to_bson_value(&housing_type)?);
    }
    if let Some(room_count) = request.room_count {
        update.insert("room_count", room_count);
    }
    if let Some(guest_count) = request.guest_count {
        update.insert("guest_count", guest_count);
    }
    if let Some(cost) = request.cost {
        update.insert("cost", cost);
    }
    if let Some(facilities) = request.facilities {
        update.insert("facilities", to_bson_value(&facilities)?);
    }
    if let Some(coordinates) = request.coordinates {
        update.insert("coordinates", to_bson_value(&coordinates)?);
    }

    Ok(update)
}

fn to_bson_value<T: serde::Serialize>(value: &T) -> Result<bson::Bson, AppError> {
    bson::to_bson(value).map_err(|e| AppError::InternalError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::offers::offer::Housing;

    #[test]
    fn test_empty_update_request_builds_empty_document() {
        let update = build_update_document(UpdateOfferRequest::default()).unwrap();
        assert!(update.is_empty());
    }

    #[test]
    fn test_update_document_contains_only_provided_fields() {
        let request = UpdateOfferRequest {
            cost: Some(5000),
            housing_type: Some(Housing::Hotel),
            premium: Some(true),
            ..UpdateOfferRequest::default()
        };

        let update = build_update_document(request).unwrap();

        assert_eq!(update.len(), 3);
        assert_eq!(update.get_i64("cost").unwrap(), 5000);
        assert_eq!(update.get_str("housing_type").unwrap(), "hotel");
        assert!(update.get_bool("premium").unwrap());
        assert!(update.get("name").is_none());
    }
}
