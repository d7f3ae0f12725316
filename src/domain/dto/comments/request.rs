//! 댓글 생성 요청 DTO

use serde::{Deserialize, Serialize};
use validator::Validate;

/// 새 댓글 생성을 위한 요청 DTO
///
/// 소속 오퍼는 경로 파라미터로, 작성자는 인증된 사용자로부터 결정됩니다.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCommentRequest {
    /// 댓글 본문 (5-1024자)
    #[validate(length(min = 5, max = 1024, message = "댓글은 5-1024자 사이여야 합니다"))]
    pub text: String,

    /// 평점 (1.0-5.0)
    #[validate(range(min = 1.0, max = 5.0, message = "평점은 1-5 사이여야 합니다"))]
    pub rating: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_comment_passes() {
        let request = CreateCommentRequest {
            text: "Great place to stay".to_string(),
            rating: 5.0,
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_text_length_bounds() {
        let short = CreateCommentRequest {
            text: "Ok".to_string(),
            rating: 3.0,
        };
        assert!(short.validate().is_err());

        let long = CreateCommentRequest {
            text: "x".repeat(1025),
            rating: 3.0,
        };
        assert!(long.validate().is_err());
    }

    #[test]
    fn test_rating_bounds() {
        let low = CreateCommentRequest {
            text: "Great place to stay".to_string(),
            rating: 0.9,
        };
        assert!(low.validate().is_err());

        let high = CreateCommentRequest {
            text: "Great place to stay".to_string(),
            rating: 5.1,
        };
        assert!(high.validate().is_err());
    }
}
