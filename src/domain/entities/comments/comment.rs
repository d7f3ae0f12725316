//! Comment Entity Implementation
//!
//! 오퍼에 달리는 댓글 엔티티입니다. `comments` 컬렉션의 문서 구조에 해당하며,
//! 생성 이후 수정되지 않고 오퍼 삭제 시 연쇄 삭제로만 제거됩니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 댓글 엔티티
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 댓글 본문 (5-1024자)
    pub text: String,
    /// 평점 (1.0-5.0)
    pub rating: f64,
    /// 소속 오퍼 참조
    pub offer_id: ObjectId,
    /// 작성자 참조
    pub user_id: ObjectId,
    /// 작성 시간
    pub created_at: DateTime,
}

impl Comment {
    /// 새 댓글 생성
    pub fn new(text: String, rating: f64, offer_id: ObjectId, user_id: ObjectId) -> Self {
        Self {
            id: None,
            text,
            rating,
            offer_id,
            user_id,
            created_at: DateTime::now(),
        }
    }

    /// ID 문자열로 변환
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }
}
