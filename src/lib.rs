//! 렌탈 오퍼 플랫폼 백엔드
//!
//! Rust 기반의 단기 렌탈 오퍼 플랫폼 REST API 서버입니다.
//! 오퍼/사용자/댓글 관리, 즐겨찾기, 이미지 업로드,
//! JWT 토큰 기반 인증을 제공합니다.
//!
//! # Features
//!
//! - **오퍼 관리**: 생성, 조회, 수정, 삭제 (삭제 시 댓글 연쇄 삭제)
//! - **사용자 관리**: 회원가입, 로그인/로그아웃, 아바타 업로드
//! - **JWT 인증**: HS256 세션 토큰 + 메모리 기반 토큰 폐기 목록
//! - **즐겨찾기**: set 의미론의 멱등적 추가/제거
//! - **싱글톤 DI**: 레지스트리 기반 컴포넌트 관리
//! - **MongoDB**: 문서 데이터베이스 영구 저장
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트 + 미들웨어 체인
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리, 소유자 검증
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 비즈니스 로직
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← 데이터 액세스
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │     MongoDB     │ ← 저장소
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use rental_service_backend::services::offers::offer_service::OfferService;
//! use rental_service_backend::services::auth::TokenService;
//!
//! // 싱글톤 서비스 인스턴스 가져오기
//! let offer_service = OfferService::instance();
//! let token_service = TokenService::instance();
//!
//! // 오퍼 생성 및 토큰 발급
//! let offer = offer_service.create(request, owner_id).await?;
//! let token = token_service.issue_token(&user)?;
//! ```

pub mod config;
pub mod core;
pub mod db;
pub mod domain;
pub mod handlers;
pub mod middlewares;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod utils;
