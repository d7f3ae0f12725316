//! 사용자 응답 DTO
//!
//! 사용자 엔티티의 화이트리스트된 투영입니다.
//! 비밀번호 다이제스트는 어떤 응답 형태로도 노출되지 않습니다.

use serde::{Deserialize, Serialize};

use crate::domain::entities::users::user::{User, UserType};

/// 회원가입 응답 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub name: String,
    pub avatar_path: String,
    #[serde(rename = "type")]
    pub user_type: UserType,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.map(|id| id.to_hex()).unwrap_or_default(),
            email: user.email,
            name: user.name,
            avatar_path: user.avatar_path,
            user_type: user.user_type,
        }
    }
}

/// 로그인 세션 확인 응답 DTO (`GET /users/login`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggedUserResponse {
    pub email: String,
    pub name: String,
    pub avatar_path: String,
    #[serde(rename = "type")]
    pub user_type: UserType,
}

impl From<User> for LoggedUserResponse {
    fn from(user: User) -> Self {
        Self {
            email: user.email,
            name: user.name,
            avatar_path: user.avatar_path,
            user_type: user.user_type,
        }
    }
}

/// 로그인 응답 DTO (세션 토큰 포함)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub email: String,
    pub name: String,
    pub avatar_path: String,
    #[serde(rename = "type")]
    pub user_type: UserType,
}

impl LoginResponse {
    /// 인증된 사용자와 발급된 토큰으로 로그인 응답을 생성합니다.
    pub fn new(user: User, token: String) -> Self {
        Self {
            token,
            email: user.email,
            name: user.name,
            avatar_path: user.avatar_path,
            user_type: user.user_type,
        }
    }
}

/// 아바타 업로드 응답 DTO
///
/// 파일이 첨부되지 않은 요청은 에러가 아니며 `avatar`가 `null`이 됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadAvatarResponse {
    pub avatar: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::users::user::DEFAULT_AVATAR_FILE_NAME;
    use mongodb::bson::oid::ObjectId;

    fn sample_user() -> User {
        let mut user = User::new(
            "a@b.com".to_string(),
            "Alice".to_string(),
            UserType::Regular,
            "digest".to_string(),
        );
        user.id = Some(ObjectId::new());
        user
    }

    #[test]
    fn test_register_response_shape() {
        let user = sample_user();
        let expected_id = user.id.unwrap().to_hex();
        let response = UserResponse::from(user);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["id"], serde_json::json!(expected_id));
        assert_eq!(json["email"], serde_json::json!("a@b.com"));
        assert_eq!(json["name"], serde_json::json!("Alice"));
        assert_eq!(json["type"], serde_json::json!("regular"));
        assert_eq!(json["avatarPath"], serde_json::json!(DEFAULT_AVATAR_FILE_NAME));
    }

    #[test]
    fn test_responses_never_expose_password() {
        let user = sample_user();

        let register = serde_json::to_value(UserResponse::from(user.clone())).unwrap();
        let session = serde_json::to_value(LoggedUserResponse::from(user.clone())).unwrap();
        let login = serde_json::to_value(LoginResponse::new(user, "token".to_string())).unwrap();

        for json in [register, session, login] {
            assert!(json.get("password").is_none());
            assert!(json.get("favorites").is_none());
        }
    }

    #[test]
    fn test_login_response_carries_token() {
        let response = LoginResponse::new(sample_user(), "jwt-token".to_string());
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["token"], serde_json::json!("jwt-token"));
        assert_eq!(json["email"], serde_json::json!("a@b.com"));
    }
}
