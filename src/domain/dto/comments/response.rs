//! 댓글 응답 DTO

use serde::{Deserialize, Serialize};

use crate::domain::entities::comments::comment::Comment;

/// 댓글 응답 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: String,
    pub text: String,
    pub rating: f64,
    pub user_id: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id.map(|id| id.to_hex()).unwrap_or_default(),
            text: comment.text,
            rating: comment.rating,
            user_id: comment.user_id.to_hex(),
            created_at: comment.created_at.try_to_rfc3339_string().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn test_response_projects_whitelisted_fields() {
        let comment = Comment::new(
            "Great place to stay".to_string(),
            4.0,
            ObjectId::new(),
            ObjectId::new(),
        );
        let response = CommentResponse::from(comment.clone());

        assert_eq!(response.text, comment.text);
        assert_eq!(response.rating, comment.rating);
        assert_eq!(response.user_id, comment.user_id.to_hex());

        // 오퍼 참조는 경로에서 이미 알고 있으므로 응답에 포함하지 않는다
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("offerId").is_none());
        assert!(json.get("createdAt").is_some());
    }
}
