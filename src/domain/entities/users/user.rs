//! User Entity Implementation
//!
//! 사용자 엔티티의 핵심 구현체입니다. `users` 컬렉션의 문서 구조에 해당하며,
//! 비밀번호는 HMAC-SHA256 다이제스트 형태로만 저장됩니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 등록 직후 사용자에게 부여되는 기본 아바타 파일명
pub const DEFAULT_AVATAR_FILE_NAME: &str = "default-avatar.jpg";

/// 계정 유형
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    /// 일반 계정
    Regular,
    /// 프로 계정
    Pro,
}

/// 사용자 엔티티
///
/// 시스템의 모든 사용자를 표현하는 핵심 도메인 엔티티입니다.
/// `password` 필드는 해시된 자격증명이며 응답 DTO로는 절대 노출되지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 사용자 이메일 (unique)
    pub email: String,
    /// 표시 이름 (1-15자)
    pub name: String,
    /// 아바타 이미지 경로
    pub avatar_path: String,
    /// 계정 유형
    #[serde(rename = "type")]
    pub user_type: UserType,
    /// 해시된 비밀번호 (HMAC-SHA256 16진수 다이제스트)
    pub password: String,
    /// 즐겨찾기한 오퍼 참조 목록 (set 의미론)
    pub favorites: Vec<ObjectId>,
    /// 생성 시간
    pub created_at: DateTime,
    /// 수정 시간
    pub updated_at: DateTime,
}

impl User {
    /// 새 사용자 생성
    ///
    /// 기본 아바타와 빈 즐겨찾기 목록으로 시작합니다.
    /// `password_hash`는 이미 해시된 다이제스트여야 합니다.
    pub fn new(email: String, name: String, user_type: UserType, password_hash: String) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            email,
            name,
            avatar_path: DEFAULT_AVATAR_FILE_NAME.to_string(),
            user_type,
            password: password_hash,
            favorites: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// ID 문자열로 변환
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_defaults() {
        let user = User::new(
            "a@b.com".to_string(),
            "Alice".to_string(),
            UserType::Regular,
            "digest".to_string(),
        );

        assert_eq!(user.avatar_path, DEFAULT_AVATAR_FILE_NAME);
        assert!(user.favorites.is_empty());
        assert!(user.id.is_none());
    }

    #[test]
    fn test_user_type_wire_names() {
        assert_eq!(serde_json::to_string(&UserType::Regular).unwrap(), "\"regular\"");
        assert_eq!(serde_json::to_string(&UserType::Pro).unwrap(), "\"pro\"");

        let parsed: UserType = serde_json::from_str("\"pro\"").unwrap();
        assert_eq!(parsed, UserType::Pro);
    }
}
