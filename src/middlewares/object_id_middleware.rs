//! ObjectId 형식 검증 미들웨어
//!
//! 지정된 경로 파라미터가 MongoDB ObjectId 형식(24자리 16진수)인지
//! 검사합니다. 형식이 맞지 않으면 핸들러에 도달하기 전에 400으로
//! 체인을 중단합니다.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, ResponseError};
use futures_util::future::LocalBoxFuture;
use mongodb::bson::oid::ObjectId;

use crate::core::errors::AppError;

/// ObjectId 형식 검증 미들웨어
///
/// ```rust,ignore
/// web::resource("/{offer_id}")
///     .wrap(ValidateObjectIdMiddleware::new("offer_id"))
///     .route(web::get().to(handlers::offers::show))
/// ```
pub struct ValidateObjectIdMiddleware {
    /// 검사할 경로 파라미터 이름
    param: &'static str,
}

impl ValidateObjectIdMiddleware {
    /// 지정된 경로 파라미터를 검사하는 미들웨어 생성
    pub fn new(param: &'static str) -> Self {
        Self { param }
    }
}

impl<S, B> Transform<S, ServiceRequest> for ValidateObjectIdMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = ValidateObjectIdService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ValidateObjectIdService {
            service: Rc::new(service),
            param: self.param,
        }))
    }
}

/// 실제 형식 검사를 수행하는 서비스
pub struct ValidateObjectIdService<S> {
    service: Rc<S>,
    param: &'static str,
}

impl<S, B> Service<ServiceRequest> for ValidateObjectIdService<S>
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

        Box::pin(async move {
            let raw = req.match_info().get(param).unwrap_or_default();

            if ObjectId::parse_str(raw).is_err() {
                let error = AppError::ValidationError(format!(
                    "{}은(는) 유효한 ObjectId가 아닙니다: {}",
                    param, raw
                ));
                log::debug!("ObjectId 검증 실패: {}", error);

                let response = error.error_response();
                let (req, _) = req.into_parts();
                let res = ServiceResponse::new(req, response).map_into_right_body();
                return Ok(res);
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}
