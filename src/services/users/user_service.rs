//! # 사용자 관리 서비스 구현
//!
//! 사용자 계정의 생명주기를 관리하는 핵심 비즈니스 로직을 구현합니다.
//! 회원가입, 자격증명 검증, 즐겨찾기 관리, 아바타 갱신을 담당합니다.
//!
//! ## 서비스 아키텍처
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                      UserService                       │
//! ├────────────────────────────────────────────────────────┤
//! │  Registration      Authentication      Favorites       │
//! │  • 중복 검사        • 다이제스트 비교    • 멱등 추가/제거  │
//! │  • 비밀번호 해싱    • 실패 로깅         • 오퍼 해석       │
//! └────────────────────────────────────────────────────────┘
//!            │                   │
//!            ▼                   ▼
//!    UserRepository       OfferRepository
//! ```
//!
//! ## 보안 설계
//!
//! - **HMAC-SHA256 해싱**: 서버 전역 솔트 기반 단방향 다이제스트
//! - **민감 정보 차단**: 서비스 밖으로는 응답 DTO만 노출
//! - **중복 방지**: 이메일 유니크 제약 (서비스 검사 + 인덱스 보강)

use std::sync::Arc;

use crate::config::PasswordConfig;
use crate::core::errors::AppError;
use crate::core::registry::{Service, ServiceLocator, ServiceRegistration};
use crate::domain::dto::users::request::{CreateUserRequest, LoginRequest};
use crate::domain::entities::offers::offer::Offer;
use crate::domain::entities::users::user::User;
use crate::repositories::offers::offer_repo::OfferRepository;
use crate::repositories::users::user_repo::UserRepository;
use crate::utils::crypto::{create_sha256, verify_sha256};

/// 사용자 관리 비즈니스 로직 서비스
///
/// ## 주요 책임
///
/// 1. **회원가입**: 이메일 중복 검사, 비밀번호 해싱, 기본 아바타 부여
/// 2. **자격증명 검증**: 로그인 시 다이제스트 재계산 및 비교
/// 3. **즐겨찾기 관리**: set 의미론의 멱등적 추가/제거와 오퍼 해석
/// 4. **프로필 갱신**: 아바타 업로드 반영
pub struct UserService {
    /// 사용자 데이터 액세스 리포지토리
    user_repo: Arc<UserRepository>,
    /// 즐겨찾기 참조 해석에 사용하는 오퍼 리포지토리
    offer_repo: Arc<OfferRepository>,
}

inventory::submit! {
    ServiceRegistration {
        name: "user_service",
        constructor: || Box::new(UserService::new()),
    }
}

#[async_trait::async_trait]
impl Service for UserService {
    fn name(&self) -> &str {
        "user_service"
    }

    async fn init(&self) -> Result<(), Box<dyn std::error::Error>> {
        Ok(())
    }
}

impl UserService {
    /// 새 인스턴스를 생성합니다. 레지스트리 생성자에서만 호출됩니다.
    fn new() -> Arc<Self> {
        Arc::new(Self {
            user_repo: ServiceLocator::get::<UserRepository>(),
            offer_repo: ServiceLocator::get::<OfferRepository>(),
        })
    }

    /// 싱글톤 인스턴스를 가져옵니다.
    pub fn instance() -> Arc<Self> {
        ServiceLocator::get::<Self>()
    }

    /// 새 사용자 계정 생성
    ///
    /// # 비즈니스 규칙
    ///
    /// - 동일한 이메일로 두 번째 계정을 만들 수 없습니다 (409 Conflict)
    /// - 비밀번호는 서버 전역 솔트와 함께 HMAC-SHA256으로 해시되어 저장됩니다
    /// - 새 계정은 기본 아바타와 빈 즐겨찾기 목록으로 시작합니다
    ///
    /// # Errors
    ///
    /// * `AppError::ConflictError` - 이메일 중복
    /// * `AppError::DatabaseError` - 저장 실패
    pub async fn create_user(&self, request: CreateUserRequest) -> Result<User, AppError> {
        if self.user_repo.find_by_email(&request.email).await?.is_some() {
            return Err(AppError::ConflictError(format!(
                "이미 등록된 이메일입니다: {}",
                request.email
            )));
        }

        let password_hash = create_sha256(&request.password, &PasswordConfig::salt());
        let user = User::new(request.email, request.name, request.user_type, password_hash);

        let created_user = self.user_repo.create(user).await?;
        log::info!("새 사용자 생성: {}", created_user.email);

        Ok(created_user)
    }

    /// 로그인 자격증명 검증
    ///
    /// 이메일로 사용자를 찾고 비밀번호 다이제스트를 재계산하여 비교합니다.
    /// 사용자가 없거나 비밀번호가 틀리면 구분 없이 `None`을 반환합니다
    /// (존재 여부 노출 방지).
    pub async fn verify_user(&self, request: &LoginRequest) -> Result<Option<User>, AppError> {
        let Some(user) = self.user_repo.find_by_email(&request.email).await? else {
            return Ok(None);
        };

        if verify_sha256(&request.password, &PasswordConfig::salt(), &user.password) {
            Ok(Some(user))
        } else {
            log::warn!("로그인 실패 (비밀번호 불일치): {}", request.email);
            Ok(None)
        }
    }

    /// ID로 사용자 조회
    pub async fn find_by_id(&self, user_id: &str) -> Result<Option<User>, AppError> {
        self.user_repo.find_by_id(user_id).await
    }

    /// 이메일로 사용자 조회
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.user_repo.find_by_email(email).await
    }

    /// 사용자의 즐겨찾기 오퍼 목록 해석
    ///
    /// 사용자 문서에 저장된 오퍼 참조 목록을 전체 오퍼 문서로 변환합니다.
    /// 사용자가 없으면 빈 목록을 반환합니다.
    pub async fn find_favorites(&self, user_id: &str) -> Result<Vec<Offer>, AppError> {
        let Some(user) = self.user_repo.find_by_id(user_id).await? else {
            return Ok(Vec::new());
        };

        self.offer_repo.find_by_ids(&user.favorites).await
    }

    /// 즐겨찾기에 오퍼 추가 (멱등)
    pub async fn add_to_favorites(&self, user_id: &str, offer_id: &str) -> Result<(), AppError> {
        self.user_repo.add_favorite(user_id, offer_id).await
    }

    /// 즐겨찾기에서 오퍼 제거 (멱등)
    ///
    /// 즐겨찾기에 없는 오퍼를 제거해도 에러가 아닙니다.
    pub async fn remove_from_favorites(
        &self,
        user_id: &str,
        offer_id: &str,
    ) -> Result<(), AppError> {
        self.user_repo.remove_favorite(user_id, offer_id).await
    }

    /// 아바타 이미지 경로 갱신
    ///
    /// 존재하지 않는 사용자에 대해서는 `None`을 반환합니다.
    pub async fn update_avatar(
        &self,
        user_id: &str,
        filename: &str,
    ) -> Result<Option<User>, AppError> {
        self.user_repo
            .update(user_id, mongodb::bson::doc! { "avatar_path": filename })
            .await
    }
}
