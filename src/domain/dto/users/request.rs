//! 사용자 요청 DTO
//!
//! 회원가입과 로그인 요청 본문 구조를 정의합니다.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::users::user::UserType;

/// 회원가입 요청 DTO
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// 사용자 이메일 주소
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    /// 표시 이름 (1-15자)
    #[validate(length(min = 1, max = 15, message = "이름은 1-15자 사이여야 합니다"))]
    pub name: String,

    /// 계정 비밀번호 (6-12자)
    #[validate(length(min = 6, max = 12, message = "비밀번호는 6-12자 사이여야 합니다"))]
    pub password: String,

    /// 계정 유형 (regular | pro)
    #[serde(rename = "type")]
    pub user_type: UserType,
}

/// 로그인 요청 DTO
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 6, max = 12, message = "비밀번호는 6-12자 사이여야 합니다"))]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CreateUserRequest {
        CreateUserRequest {
            email: "a@b.com".to_string(),
            name: "Alice".to_string(),
            password: "secret1".to_string(),
            user_type: UserType::Regular,
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_invalid_email_fails() {
        let mut request = valid_request();
        request.email = "not-an-email".to_string();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_name_length_bounds() {
        let mut empty = valid_request();
        empty.name = String::new();
        assert!(empty.validate().is_err());

        let mut long = valid_request();
        long.name = "a".repeat(16);
        assert!(long.validate().is_err());
    }

    #[test]
    fn test_password_length_bounds() {
        let mut short = valid_request();
        short.password = "12345".to_string();
        assert!(short.validate().is_err());

        let mut long = valid_request();
        long.password = "1234567890123".to_string();
        assert!(long.validate().is_err());
    }

    #[test]
    fn test_type_field_uses_wire_name() {
        let json = serde_json::json!({
            "email": "a@b.com",
            "name": "Alice",
            "password": "secret1",
            "type": "pro"
        });

        let request: CreateUserRequest = serde_json::from_value(json).unwrap();
        assert_eq!(request.user_type, UserType::Pro);
    }
}
