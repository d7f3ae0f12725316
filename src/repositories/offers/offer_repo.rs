//! # 오퍼 리포지토리 구현
//!
//! 오퍼 엔티티의 데이터 액세스 계층입니다. MongoDB `offers` 컬렉션에 대한
//! CRUD 연산과 목록/프리미엄 조회, 갤러리 배열 조작, 댓글 수 카운터 연산을
//! 제공합니다.
//!
//! ## 조회 정책
//!
//! - 목록 조회는 항상 `created_at` 내림차순으로 정렬됩니다
//! - 기본 조회 개수는 [`DEFAULT_OFFER_COUNT`], 상한은 [`MAX_OFFER_COUNT`]
//! - 프리미엄 조회는 도시별로 [`PREMIUM_OFFER_COUNT`]개로 고정됩니다

use std::sync::Arc;

use futures_util::TryStreamExt;
use mongodb::{
    bson::{self, doc, oid::ObjectId},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::core::errors::AppError;
use crate::core::registry::{Repository, RepositoryRegistration, ServiceLocator};
use crate::db::Database;
use crate::domain::entities::offers::offer::{City, Offer};
use crate::repositories::users::user_repo::parse_object_id;

/// 연결된 MongoDB 컬렉션 이름
const COLLECTION_NAME: &str = "offers";

/// 목록 조회 시 기본 반환 개수
pub const DEFAULT_OFFER_COUNT: i64 = 60;

/// 목록 조회 시 허용되는 최대 반환 개수
pub const MAX_OFFER_COUNT: i64 = 300;

/// 도시별 프리미엄 오퍼 조회 개수 (고정)
pub const PREMIUM_OFFER_COUNT: i64 = 3;

/// 오퍼 데이터 액세스 리포지토리
pub struct OfferRepository {
    /// MongoDB 데이터베이스 연결
    db: Arc<Database>,
}

inventory::submit! {
    RepositoryRegistration {
        name: "offer_repository",
        constructor: || Box::new(OfferRepository::new()),
    }
}

#[async_trait::async_trait]
impl Repository for OfferRepository {
    fn name(&self) -> &str {
        "offer_repository"
    }

    fn collection_name(&self) -> &str {
        COLLECTION_NAME
    }

    async fn init(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.create_indexes().await?;
        Ok(())
    }
}

impl OfferRepository {
    /// 새 인스턴스를 생성합니다. 레지스트리 생성자에서만 호출됩니다.
    fn new() -> Arc<Self> {
        Arc::new(Self {
            db: ServiceLocator::get::<Database>(),
        })
    }

    /// 싱글톤 인스턴스를 가져옵니다.
    pub fn instance() -> Arc<Self> {
        ServiceLocator::get::<Self>()
    }

    fn collection(&self) -> Collection<Offer> {
        self.db.get_database().collection(COLLECTION_NAME)
    }

    /// 새 오퍼 생성
    pub async fn create(&self, mut offer: Offer) -> Result<Offer, AppError> {
        let result = self
            .collection()
            .insert_one(&offer)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        offer.id = result.inserted_id.as_object_id();

        Ok(offer)
    }

    /// ID로 오퍼 조회
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Offer>, AppError> {
        let object_id = parse_object_id(id)?;

        self.collection()
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// ID의 오퍼가 존재하는지 확인
    pub async fn exists(&self, id: &str) -> Result<bool, AppError> {
        Ok(self.find_by_id(id).await?.is_some())
    }

    /// 오퍼 목록 조회
    ///
    /// `created_at` 내림차순으로 정렬하며, 요청 개수가 없으면
    /// [`DEFAULT_OFFER_COUNT`]개, 최대 [`MAX_OFFER_COUNT`]개까지 반환합니다.
    pub async fn find(&self, limit: Option<i64>) -> Result<Vec<Offer>, AppError> {
        let limit = limit
            .filter(|count| *count > 0)
            .unwrap_or(DEFAULT_OFFER_COUNT)
            .min(MAX_OFFER_COUNT);

        let cursor = self
            .collection()
            .find(doc! {})
            .sort(doc! { "created_at": -1 })
            .limit(limit)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// ID 목록으로 오퍼 조회 (즐겨찾기 해석용)
    pub async fn find_by_ids(&self, ids: &[ObjectId]) -> Result<Vec<Offer>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let cursor = self
            .collection()
            .find(doc! { "_id": { "$in": ids } })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 도시별 프리미엄 오퍼 조회
    ///
    /// `premium == true`이고 도시가 일치하는 오퍼를
    /// [`PREMIUM_OFFER_COUNT`]개까지 최신순으로 반환합니다.
    pub async fn find_premium_by_city(&self, city: City) -> Result<Vec<Offer>, AppError> {
        let city_bson =
            bson::to_bson(&city).map_err(|e| AppError::InternalError(e.to_string()))?;

        let cursor = self
            .collection()
            .find(doc! { "premium": true, "city": city_bson })
            .sort(doc! { "created_at": -1 })
            .limit(PREMIUM_OFFER_COUNT)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 오퍼 부분 업데이트
    ///
    /// 존재하지 않는 ID에 대해서는 에러가 아닌 `None`을 반환합니다.
    pub async fn update_by_id(
        &self,
        id: &str,
        update_doc: mongodb::bson::Document,
    ) -> Result<Option<Offer>, AppError> {
        let object_id = parse_object_id(id)?;

        let options = mongodb::options::FindOneAndUpdateOptions::builder()
            .return_document(mongodb::options::ReturnDocument::After)
            .build();

        self.collection()
            .find_one_and_update(
                doc! { "_id": object_id },
                doc! { "$set": update_doc, "$currentDate": { "updated_at": true } },
            )
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 오퍼 삭제
    ///
    /// # Returns
    ///
    /// 삭제된 문서 수 (0 또는 1)
    pub async fn delete_by_id(&self, id: &str) -> Result<u64, AppError> {
        let object_id = parse_object_id(id)?;

        let result = self
            .collection()
            .delete_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.deleted_count)
    }

    /// 갤러리에 이미지 추가 (`$addToSet`, 멱등)
    pub async fn add_image(&self, id: &str, filename: &str) -> Result<(), AppError> {
        let object_id = parse_object_id(id)?;

        self.collection()
            .update_one(
                doc! { "_id": object_id },
                doc! { "$addToSet": { "images": filename } },
            )
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    /// 갤러리에서 이미지 제거 (`$pull`, 멱등)
    pub async fn remove_image(&self, id: &str, filename: &str) -> Result<(), AppError> {
        let object_id = parse_object_id(id)?;

        self.collection()
            .update_one(
                doc! { "_id": object_id },
                doc! { "$pull": { "images": filename } },
            )
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    /// 비정규화된 댓글 수 카운터 증가
    pub async fn inc_comments_count(&self, id: &str) -> Result<(), AppError> {
        let object_id = parse_object_id(id)?;

        self.collection()
            .update_one(
                doc! { "_id": object_id },
                doc! { "$inc": { "comments_count": 1 } },
            )
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    /// 데이터베이스 인덱스 생성
    ///
    /// 1. **생성일 인덱스**: 목록 조회 정렬 최적화
    /// 2. **(premium, city) 복합 인덱스**: 프리미엄 조회 최적화
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("created_at_desc".to_string())
                    .build(),
            )
            .build();

        let premium_city_index = IndexModel::builder()
            .keys(doc! { "premium": 1, "city": 1 })
            .options(
                IndexOptions::builder()
                    .name("premium_city".to_string())
                    .build(),
            )
            .build();

        self.collection()
            .create_indexes([created_at_index, premium_city_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
