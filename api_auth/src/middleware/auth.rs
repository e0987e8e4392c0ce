use std::{future::Future, pin::Pin, sync::Arc};

use actix_web::{
    Error, HttpMessage,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures::future::{Ready, ok};

use common::{
    error::{AppError, Res},
    jwt::JwtClaims,
};

/// Guards a scope behind bearer-token authentication.
///
/// The extractor middleware has already decoded the Authorization header
/// into a `Res<JwtClaims>` extension. A missing entry means no token was
/// sent (401); a failed decode means the token is invalid or expired
/// (403). Valid claims are re-inserted so handlers can take them as
/// `web::ReqData<JwtClaims>`.
pub struct AuthMiddleware {}

impl AuthMiddleware {
    pub fn new() -> Self {
        Self {}
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthMiddlewareService {
            service: Arc::new(service),
        })
    }
}

pub struct AuthMiddlewareService<S> {
    service: Arc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = Arc::clone(&self.service);

        Box::pin(async move {
            let outcome = {
                let extensions = req.extensions();
                match extensions.get::<Res<JwtClaims>>() {
                    None => Err(AppError::Unauthorized(
                        "No authorization token provided".to_string(),
                    )),
                    Some(Err(_)) => {
                        Err(AppError::Forbidden("Invalid or expired token".to_string()))
                    }
                    Some(Ok(claims)) => Ok(claims.clone()),
                }
            };

            match outcome {
                Ok(claims) => {
                    req.extensions_mut().insert(claims);
                    srv.call(req).await.map(|res| res.map_into_boxed_body())
                }
                Err(error) => {
                    let response = error.to_http_response().map_into_boxed_body();
                    Ok(req.into_response(response))
                }
            }
        })
    }
}
