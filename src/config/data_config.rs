//! 데이터 및 서버 설정 관리 모듈
//!
//! 서버 바인딩, 데이터베이스, 업로드 디렉터리, 실행 환경 관련 설정을 관리합니다.

use std::env;

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    /// 개발 환경 - 빠른 개발을 위한 설정
    Development,
    /// 테스트 환경 - 자동화된 테스트용 설정
    Test,
    /// 스테이징 환경 - 프로덕션 유사 환경
    Staging,
    /// 프로덕션 환경 - 최고 수준의 보안 및 성능
    Production,
}

impl Environment {
    /// 현재 실행 환경을 감지합니다.
    ///
    /// `ENVIRONMENT` 환경 변수를 확인하며, 설정되지 않은 경우
    /// `Production`을 기본값으로 사용합니다.
    pub fn current() -> Self {
        Self::from_str(&env::var("ENVIRONMENT").unwrap_or_else(|_| "production".to_string()))
    }

    /// 문자열에서 Environment를 생성합니다.
    ///
    /// 알 수 없는 값인 경우 `Production`을 반환합니다.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }

    /// 개발 환경 여부를 반환합니다.
    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

/// HTTP 서버 바인딩 설정
pub struct ServerConfig;

impl ServerConfig {
    /// 서버가 바인딩할 호스트 주소를 반환합니다.
    ///
    /// `HOST` 환경 변수를 읽으며 기본값은 `127.0.0.1`입니다.
    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string())
    }

    /// 서버가 바인딩할 포트를 반환합니다.
    ///
    /// `PORT` 환경 변수를 읽으며 기본값은 `8080`입니다.
    /// 파싱에 실패하면 기본값으로 대체하고 경고를 남깁니다.
    pub fn port() -> u16 {
        env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .unwrap_or_else(|e| {
                log::error!("PORT 파싱 실패: {}. 기본값 8080 사용", e);
                8080
            })
    }
}

/// MongoDB 연결 설정
pub struct DatabaseConfig;

impl DatabaseConfig {
    /// MongoDB 연결 URI를 반환합니다.
    ///
    /// `MONGODB_URI` 환경 변수를 읽으며 기본값은
    /// `mongodb://localhost:27017`입니다.
    pub fn mongodb_uri() -> String {
        env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string())
    }

    /// 사용할 데이터베이스 이름을 반환합니다.
    ///
    /// `DATABASE_NAME` 환경 변수를 읽으며 기본값은 `rental_offers_dev`입니다.
    pub fn database_name() -> String {
        env::var("DATABASE_NAME").unwrap_or_else(|_| "rental_offers_dev".to_string())
    }
}

/// 파일 업로드 설정
pub struct UploadConfig;

impl UploadConfig {
    /// 업로드 파일이 저장될 디렉터리 경로를 반환합니다.
    ///
    /// `UPLOAD_DIRECTORY` 환경 변수를 읽으며 기본값은 `upload`입니다.
    /// 디렉터리는 기동 시점에 생성됩니다.
    pub fn directory() -> String {
        env::var("UPLOAD_DIRECTORY").unwrap_or_else(|_| "upload".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_from_str() {
        assert_eq!(Environment::from_str("dev"), Environment::Development);
        assert_eq!(Environment::from_str("Development"), Environment::Development);
        assert_eq!(Environment::from_str("test"), Environment::Test);
        assert_eq!(Environment::from_str("staging"), Environment::Staging);
        assert_eq!(Environment::from_str("production"), Environment::Production);
        assert_eq!(Environment::from_str("unknown"), Environment::Production);
    }

    #[test]
    fn test_is_development() {
        assert!(Environment::Development.is_development());
        assert!(!Environment::Production.is_development());
    }
}
