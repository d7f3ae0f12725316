//! 댓글 리포지토리 구현
//!
//! MongoDB `comments` 컬렉션에 대한 데이터 액세스 계층입니다.
//! 댓글은 생성과 조회, 오퍼 단위 일괄 삭제만 지원합니다.

use std::sync::Arc;

use futures_util::TryStreamExt;
use mongodb::{
    bson::doc,
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::core::errors::AppError;
use crate::core::registry::{Repository, RepositoryRegistration, ServiceLocator};
use crate::db::Database;
use crate::domain::entities::comments::comment::Comment;
use crate::repositories::users::user_repo::parse_object_id;

/// 연결된 MongoDB 컬렉션 이름
const COLLECTION_NAME: &str = "comments";

/// 댓글 데이터 액세스 리포지토리
pub struct CommentRepository {
    /// MongoDB 데이터베이스 연결
    db: Arc<Database>,
}

inventory::submit! {
    RepositoryRegistration {
        name: "comment_repository",
        constructor: || Box::new(CommentRepository::new()),
    }
}

#[async_trait::async_trait]
impl Repository for CommentRepository {
    fn name(&self) -> &str {
        "comment_repository"
    }

    fn collection_name(&self) -> &str {
        COLLECTION_NAME
    }

    async fn init(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.create_indexes().await?;
        Ok(())
    }
}

impl CommentRepository {
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

    fn collection(&self) -> Collection<Comment> {
        self.db.get_database().collection(COLLECTION_NAME)
    }

    /// 새 댓글 생성
    pub async fn create(&self, mut comment: Comment) -> Result<Comment, AppError> {
        let result = self
            .collection()
            .insert_one(&comment)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        comment.id = result.inserted_id.as_object_id();

        Ok(comment)
    }

    /// 오퍼의 모든 댓글 조회
    ///
    /// 작성 시간 오름차순으로 정렬하여 반환합니다.
    pub async fn find_by_offer_id(&self, offer_id: &str) -> Result<Vec<Comment>, AppError> {
        let offer_oid = parse_object_id(offer_id)?;

        let cursor = self
            .collection()
            .find(doc! { "offer_id": offer_oid })
            .sort(doc! { "created_at": 1 })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 오퍼의 모든 댓글 삭제 (연쇄 삭제용)
    ///
    /// # Returns
    ///
    /// 삭제된 댓글 수
    pub async fn delete_by_offer_id(&self, offer_id: &str) -> Result<u64, AppError> {
        let offer_oid = parse_object_id(offer_id)?;

        let result = self
            .collection()
            .delete_many(doc! { "offer_id": offer_oid })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.deleted_count)
    }

    /// 데이터베이스 인덱스 생성
    ///
    /// 오퍼 참조 인덱스로 오퍼 단위 조회/삭제를 최적화합니다.
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let offer_id_index = IndexModel::builder()
            .keys(doc! { "offer_id": 1 })
            .options(
                IndexOptions::builder()
                    .name("offer_id_asc".to_string())
                    .build(),
            )
            .build();

        self.collection()
            .create_indexes([offer_id_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
