//! 문서 존재 검사 미들웨어
//!
//! 지정된 경로 파라미터가 실제 존재하는 문서를 가리키는지
//! 주입된 조회 함수로 확인합니다. 문서가 없으면 핸들러에 도달하기 전에
//! 404로 체인을 중단합니다.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, ResponseError};
use futures_util::future::LocalBoxFuture;

use crate::core::errors::AppError;

/// 존재 여부 조회 함수 타입
///
/// 경로 파라미터 값을 받아 해당 문서의 존재 여부를 반환합니다.
pub type ExistenceCheck = fn(String) -> LocalBoxFuture<'static, Result<bool, AppError>>;

/// 문서 존재 검사 미들웨어
///
/// ```rust,ignore
/// web::resource("/{offer_id}")
///     .wrap(DocumentExistsMiddleware::new("offer_id", "Offer", |id| {
///         Box::pin(async move { OfferRepository::instance().exists(&id).await })
///     }))
///     .route(web::get().to(handlers::offers::show))
/// ```
pub struct DocumentExistsMiddleware {
    /// 검사할 경로 파라미터 이름
    param: &'static str,
    /// 에러 메시지에 사용할 엔티티 이름
    entity: &'static str,
    /// 존재 여부 조회 함수
    check: ExistenceCheck,
}

impl DocumentExistsMiddleware {
    /// 지정된 경로 파라미터의 문서 존재를 검사하는 미들웨어 생성
    pub fn new(param: &'static str, entity: &'static str, check: ExistenceCheck) -> Self {
        Self {
            param,
            entity,
            check,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for DocumentExistsMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = DocumentExistsService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(DocumentExistsService {
            service: Rc::new(service),
            param: self.param,
            entity: self.entity,
            check: self.check,
        }))
    }
}

/// 실제 존재 검사를 수행하는 서비스
pub struct DocumentExistsService<S> {
    service: Rc<S>,
    param: &'static str,
    entity: &'static str,
    check: ExistenceCheck,
}

impl<S, B> Service<ServiceRequest> for DocumentExistsService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let param = self.param;
        let entity = self.entity;
        let check = self.check;

        Box::pin(async move {
            let raw = req.match_info().get(param).unwrap_or_default().to_string();

            let found = match (check)(raw.clone()).await {
                Ok(found) => found,
                Err(err) => {
                    log::error!("존재 검사 실패 ({}): {}", entity, err);
                    let response = err.error_response();
                    let (req, _) = req.into_parts();
                    return Ok(ServiceResponse::new(req, response).map_into_right_body());
                }
            };

            if !found {
                let error =
                    AppError::NotFound(format!("{}을(를) 찾을 수 없습니다: {}", entity, raw));
                let response = error.error_response();
                let (req, _) = req.into_parts();
                return Ok(ServiceResponse::new(req, response).map_into_right_body());
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}
