//! # 사용자 리포지토리 구현
//!
//! 사용자 엔티티의 데이터 액세스 계층을 담당하는 리포지토리입니다.
//! MongoDB `users` 컬렉션에 대한 CRUD 연산과 즐겨찾기 집합 연산을 제공합니다.
//!
//! ## 특징
//!
//! - **싱글톤 컴포넌트**: ServiceLocator를 통한 전역 단일 인스턴스
//! - **set 의미론 즐겨찾기**: `$addToSet` / `$pull`로 멱등적 추가/제거
//! - **데이터 무결성**: 이메일 유니크 인덱스 관리
//!
//! ## 에러 처리
//!
//! 모든 메서드는 `Result<T, AppError>`를 반환하며 다음 상황을 처리합니다:
//!
//! - **DatabaseError**: MongoDB 연결/쿼리 오류
//! - **ValidationError**: 잘못된 ObjectId 형식

use std::sync::Arc;

use mongodb::{
    bson::{doc, oid::ObjectId},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::core::errors::AppError;
use crate::core::registry::{Repository, RepositoryRegistration, ServiceLocator};
use crate::db::Database;
use crate::domain::entities::users::user::User;

/// 연결된 MongoDB 컬렉션 이름
const COLLECTION_NAME: &str = "users";

/// 사용자 데이터 액세스 리포지토리
///
/// 사용자 엔티티의 CRUD 연산과 즐겨찾기 참조 목록 조작을 담당합니다.
/// 이메일 유니크 제약은 인덱스로 보강되며, 비즈니스 수준의 중복 검사는
/// 서비스 계층([`crate::services::users::user_service::UserService`])이 수행합니다.
pub struct UserRepository {
    /// MongoDB 데이터베이스 연결
    db: Arc<Database>,
}

inventory::submit! {
    RepositoryRegistration {
        name: "user_repository",
        constructor: || Box::new(UserRepository::new()),
    }
}

#[async_trait::async_trait]
impl Repository for UserRepository {
    fn name(&self) -> &str {
        "user_repository"
    }

    fn collection_name(&self) -> &str {
        COLLECTION_NAME
    }

    async fn init(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.create_indexes().await?;
        Ok(())
    }
}

impl UserRepository {
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

    fn collection(&self) -> Collection<User> {
        self.db.get_database().collection(COLLECTION_NAME)
    }

    /// 이메일 주소로 사용자 조회
    ///
    /// # Returns
    ///
    /// * `Ok(Some(User))` - 사용자를 찾은 경우
    /// * `Ok(None)` - 해당 이메일의 사용자가 없는 경우
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.collection()
            .find_one(doc! { "email": email })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// ID로 사용자 조회
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 잘못된 ObjectId 형식
    /// * `AppError::DatabaseError` - 데이터베이스 오류
    pub async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        let object_id = parse_object_id(id)?;

        self.collection()
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 새 사용자 생성
    ///
    /// MongoDB가 생성한 ObjectId가 채워진 엔티티를 반환합니다.
    /// 이메일 중복은 유니크 인덱스 위반으로도 차단됩니다.
    pub async fn create(&self, mut user: User) -> Result<User, AppError> {
        let result = self
            .collection()
            .insert_one(&user)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        user.id = result.inserted_id.as_object_id();

        Ok(user)
    }

    /// 사용자 정보 부분 업데이트
    ///
    /// `$set` 연산으로 지정된 필드만 변경하고 최신 문서를 반환합니다.
    /// 존재하지 않는 ID에 대해서는 에러가 아닌 `None`을 반환합니다.
    pub async fn update(
        &self,
        id: &str,
        update_doc: mongodb::bson::Document,
    ) -> Result<Option<User>, AppError> {
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

    /// 즐겨찾기 목록에 오퍼 참조 추가
    ///
    /// `$addToSet`을 사용하므로 동일 오퍼를 반복 추가해도
    /// 목록에는 정확히 하나만 남습니다 (멱등).
    pub async fn add_favorite(&self, user_id: &str, offer_id: &str) -> Result<(), AppError> {
        let user_oid = parse_object_id(user_id)?;
        let offer_oid = parse_object_id(offer_id)?;

        self.collection()
            .update_one(
                doc! { "_id": user_oid },
                doc! { "$addToSet": { "favorites": offer_oid } },
            )
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    /// 즐겨찾기 목록에서 오퍼 참조 제거
    ///
    /// `$pull`을 사용하므로 목록에 없는 오퍼를 제거해도
    /// 에러 없이 무시됩니다 (멱등).
    pub async fn remove_favorite(&self, user_id: &str, offer_id: &str) -> Result<(), AppError> {
        let user_oid = parse_object_id(user_id)?;
        let offer_oid = parse_object_id(offer_id)?;

        self.collection()
            .update_one(
                doc! { "_id": user_oid },
                doc! { "$pull": { "favorites": offer_oid } },
            )
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    /// 데이터베이스 인덱스 생성
    ///
    /// 애플리케이션 초기화 시점에 한 번 실행됩니다.
    ///
    /// 1. **이메일 유니크 인덱스**: 중복 이메일 방지 및 조회 최적화
    /// 2. **생성일 인덱스**: 최근 가입자 조회 최적화
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("email_unique".to_string())
                    .build(),
            )
            .build();

        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("created_at_desc".to_string())
                    .build(),
            )
            .build();

        self.collection()
            .create_indexes([email_index, created_at_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

/// ObjectId 문자열을 파싱합니다.
pub(crate) fn parse_object_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id)
        .map_err(|_| AppError::ValidationError("유효하지 않은 ID 형식입니다".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_object_id() {
        assert!(parse_object_id("507f1f77bcf86cd799439011").is_ok());
        assert!(parse_object_id("not-an-object-id").is_err());
        assert!(parse_object_id("").is_err());

        // 24자리이지만 16진수가 아닌 경우
        assert!(parse_object_id("zzzzzzzzzzzzzzzzzzzzzzzz").is_err());
    }
}
