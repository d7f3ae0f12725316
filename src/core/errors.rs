//! # Application Error Handling System
//!
//! 렌탈 오퍼 서비스를 위한 통합 에러 처리 시스템입니다.
//! `thiserror`와 `actix_web::ResponseError`를 결합하여 서비스 전 계층에서
//! 타입 안전하고 일관된 에러 처리를 제공합니다.
//!
//! ## 설계 원칙
//!
//! - **계층화된 분류**: 데이터 계층, 비즈니스 계층, 보안 계층별 에러 타입
//! - **자동 HTTP 변환**: 모든 에러는 상태 코드와 JSON 응답으로 자동 매핑
//! - **출처 태그**: 응답 JSON에 에러를 발생시킨 컴포넌트 태그를 포함
//!
//! ## HTTP 응답 매핑
//!
//! | AppError | HTTP Status | 사용 시나리오 |
//! |----------|-------------|---------------|
//! | `ValidationError` | 400 Bad Request | DTO 필드 검증 실패, 잘못된 ID 형식 |
//! | `OwnershipError` | 400 Bad Request | 리소스 소유자가 아닌 사용자의 변경 시도 |
//! | `NotFound` | 404 Not Found | 참조된 문서 없음 |
//! | `ConflictError` | 409 Conflict | 이메일 중복 등 유니크 제약 위반 |
//! | `AuthenticationError` | 401 Unauthorized | 토큰 누락/만료/폐기, 로그인 실패 |
//! | `DatabaseError` | 500 Internal Server Error | MongoDB 연산 오류 |
//! | `InternalError` | 500 Internal Server Error | 예상치 못한 시스템 오류 |
//!
//! ## 사용 패턴
//!
//! ```rust,ignore
//! use crate::core::errors::AppError;
//!
//! async fn create_user(&self, request: CreateUserRequest) -> Result<User, AppError> {
//!     if self.user_repo.find_by_email(&request.email).await?.is_some() {
//!         return Err(AppError::ConflictError(
//!             format!("이미 등록된 이메일입니다: {}", request.email)
//!         ));
//!     }
//!
//!     self.user_repo.create(user).await
//! }
//! ```

use thiserror::Error;

/// 애플리케이션 전역 에러 타입
///
/// 서비스에서 발생할 수 있는 모든 종류의 에러를 포괄하는 열거형입니다.
/// `actix_web::ResponseError` 구현을 통해 HTTP 응답으로 자동 변환됩니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 데이터베이스 관련 에러 (500 Internal Server Error)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 입력값 검증 에러 (400 Bad Request)
    ///
    /// DTO 검증 실패 시 위반된 모든 필드를 모아 하나의 메시지로 전달합니다.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 리소스 찾을 수 없음 에러 (404 Not Found)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 충돌/중복 에러 (409 Conflict)
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 인증 실패 에러 (401 Unauthorized)
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 소유권 불일치 에러 (400 Bad Request)
    ///
    /// 오퍼의 소유자가 아닌 사용자가 변경을 시도한 경우입니다.
    /// 403이 아닌 400으로 응답하는 것은 기존 API 계약을 유지하기 위함입니다.
    #[error("Ownership error: {0}")]
    OwnershipError(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 에러를 발생시킨 컴포넌트 태그를 반환합니다.
    ///
    /// 클라이언트가 에러의 출처를 구분할 수 있도록 응답 JSON에 포함됩니다.
    pub fn component(&self) -> &'static str {
        match self {
            AppError::DatabaseError(_) => "database",
            AppError::ValidationError(_) => "validation",
            AppError::NotFound(_) => "not_found",
            AppError::ConflictError(_) => "conflict",
            AppError::AuthenticationError(_) => "auth",
            AppError::OwnershipError(_) => "ownership",
            AppError::InternalError(_) => "internal",
        }
    }
}

impl actix_web::ResponseError for AppError {
    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 각 에러 타입을 적절한 HTTP 상태 코드와 표준 JSON 형식으로 변환합니다.
    ///
    /// ```json
    /// {
    ///   "error": "Validation error: cost: Min cost is 100",
    ///   "component": "validation"
    /// }
    /// ```
    fn error_response(&self) -> actix_web::HttpResponse {
        use actix_web::http::StatusCode;

        let status = match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::OwnershipError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        actix_web::HttpResponse::build(status)
            .json(serde_json::json!({
                "error": self.to_string(),
                "component": self.component()
            }))
    }
}

impl From<validator::ValidationErrors> for AppError {
    /// DTO 검증 실패를 집계된 `ValidationError`로 변환합니다.
    ///
    /// 첫 번째 위반이 아닌 위반된 **모든** 필드를 수집합니다.
    /// 필드 이름은 사전순으로 정렬하여 결정적인 메시지를 생성합니다.
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut violations: Vec<String> = errors
            .field_errors()
            .iter()
            .map(|(field, field_errors)| {
                let messages = field_errors
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{}: {}", field, messages)
            })
            .collect();
        violations.sort();

        AppError::ValidationError(violations.join("; "))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
///
/// # 예제
///
/// ```rust,ignore
/// use crate::core::errors::ErrorContext;
///
/// std::fs::write(&path, data).context("업로드 파일 저장 실패")?;
/// ```
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;

    /// 클로저를 사용하여 지연 평가된 컨텍스트를 제공합니다.
    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;
    use validator::Validate;

    #[test]
    fn test_validation_error_response() {
        let error = AppError::ValidationError("cost: Min cost is 100".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_ownership_error_maps_to_bad_request() {
        let error = AppError::OwnershipError("Offer was created by another user".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_error_response() {
        let error = AppError::NotFound("Offer not found".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_conflict_error_response() {
        let error = AppError::ConflictError("duplicate email".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::CONFLICT);
    }

    #[test]
    fn test_authentication_error_response() {
        let error = AppError::AuthenticationError("Invalid token".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_internal_error_response() {
        let error = AppError::InternalError("Something went wrong".to_string());
        let response = error.error_response();

        assert_eq!(
            response.status(),
            actix_web::http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_component_tags() {
        assert_eq!(AppError::ValidationError(String::new()).component(), "validation");
        assert_eq!(AppError::OwnershipError(String::new()).component(), "ownership");
        assert_eq!(AppError::AuthenticationError(String::new()).component(), "auth");
        assert_eq!(AppError::ConflictError(String::new()).component(), "conflict");
    }

    #[derive(Validate)]
    struct SampleDto {
        #[validate(length(min = 3, message = "too short"))]
        name: String,
        #[validate(range(min = 1, max = 5, message = "out of range"))]
        rating: i32,
    }

    #[test]
    fn test_validation_errors_are_aggregated() {
        let dto = SampleDto {
            name: "ab".to_string(),
            rating: 9,
        };

        let error: AppError = dto.validate().unwrap_err().into();

        // 위반된 두 필드가 모두 하나의 메시지에 포함되어야 한다
        let message = error.to_string();
        assert!(message.contains("name: too short"));
        assert!(message.contains("rating: out of range"));
    }

    #[test]
    fn test_error_context_trait() {
        let result: Result<(), &str> = Err("original error");
        let app_result = result.context("Additional context");

        assert!(app_result.is_err());
        if let Err(AppError::InternalError(msg)) = app_result {
            assert!(msg.contains("Additional context"));
            assert!(msg.contains("original error"));
        } else {
            panic!("Expected InternalError");
        }
    }
}
