//! 댓글 관리 서비스 구현
//!
//! 댓글 생성/조회와 오퍼 단위 일괄 삭제를 담당합니다.
//! 부모 오퍼의 존재 여부는 라우트의 존재 검사 미들웨어가 상위에서 보장합니다.

use std::sync::Arc;

use crate::core::errors::AppError;
use crate::core::registry::{Service, ServiceLocator, ServiceRegistration};
use crate::domain::dto::comments::request::CreateCommentRequest;
use crate::domain::entities::comments::comment::Comment;
use crate::repositories::comments::comment_repo::CommentRepository;
use crate::repositories::offers::offer_repo::OfferRepository;
use crate::repositories::users::user_repo::parse_object_id;

/// 댓글 관리 비즈니스 로직 서비스
///
/// 댓글 생성 시 소속 오퍼의 비정규화된 댓글 수 카운터를 함께 증가시킵니다.
pub struct CommentService {
    /// 댓글 데이터 액세스 리포지토리
    comment_repo: Arc<CommentRepository>,
    /// 댓글 수 카운터 갱신에 사용하는 오퍼 리포지토리
    offer_repo: Arc<OfferRepository>,
}

inventory::submit! {
    ServiceRegistration {
        name: "comment_service",
        constructor: || Box::new(CommentService::new()),
    }
}

#[async_trait::async_trait]
impl Service for CommentService {
    fn name(&self) -> &str {
        "comment_service"
    }

    async fn init(&self) -> Result<(), Box<dyn std::error::Error>> {
        Ok(())
    }
}

impl CommentService {
    /// 새 인스턴스를 생성합니다. 레지스트리 생성자에서만 호출됩니다.
    fn new() -> Arc<Self> {
        Arc::new(Self {
            comment_repo: ServiceLocator::get::<CommentRepository>(),
            offer_repo: ServiceLocator::get::<OfferRepository>(),
        })
    }

    /// 싱글톤 인스턴스를 가져옵니다.
    pub fn instance() -> Arc<Self> {
        ServiceLocator::get::<Self>()
    }

    /// 오퍼에 새 댓글 생성
    ///
    /// 댓글 저장 후 오퍼의 댓글 수 카운터를 1 증가시킵니다.
    /// 두 단계는 트랜잭션으로 묶이지 않습니다.
    pub async fn create_for_offer(
        &self,
        request: CreateCommentRequest,
        offer_id: &str,
        user_id: &str,
    ) -> Result<Comment, AppError> {
        let offer_oid = parse_object_id(offer_id)?;
        let user_oid = parse_object_id(user_id)?;

        let comment = Comment::new(request.text, request.rating, offer_oid, user_oid);
        let created = self.comment_repo.create(comment).await?;

        self.offer_repo.inc_comments_count(offer_id).await?;

        Ok(created)
    }

    /// 오퍼의 모든 댓글 조회 (작성 시간 오름차순)
    pub async fn find_by_offer_id(&self, offer_id: &str) -> Result<Vec<Comment>, AppError> {
        self.comment_repo.find_by_offer_id(offer_id).await
    }

    /// 오퍼의 모든 댓글 삭제 (연쇄 삭제용)
    ///
    /// # Returns
    ///
    /// 삭제된 댓글 수
    pub async fn delete_by_offer_id(&self, offer_id: &str) -> Result<u64, AppError> {
        self.comment_repo.delete_by_offer_id(offer_id).await
    }
}
