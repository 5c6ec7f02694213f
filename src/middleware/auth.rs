use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    Error, HttpMessage, HttpRequest,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};

/// Imgur access token taken from `Authorization: Bearer <token>`
#[derive(Debug, Clone, PartialEq)]
pub struct AccessToken(pub String);

/// Returns the token part of a `Bearer ` header, if there is one
pub fn extract_bearer(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .filter(|token| !token.is_empty())
}

/// Token the middleware found on this request
pub fn access_token(req: &HttpRequest) -> Option<String> {
    req.extensions().get::<AccessToken>().map(|t| t.0.clone())
}

/// Puts the bearer token, when present, into request extensions. It never
/// rejects: each handler answers 403 in its own response format.
pub struct BearerToken;

impl<S, B> Transform<S, ServiceRequest> for BearerToken
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = BearerTokenService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(BearerTokenService { service }))
    }
}

pub struct BearerTokenService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for BearerTokenService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let token = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(extract_bearer)
            .map(|token| AccessToken(token.to_string()));

        match token {
            Some(token) => {
                req.extensions_mut().insert(token);
            }
            None if req.headers().contains_key(AUTHORIZATION) => {
                log::warn!("⚠️ Invalid Authorization header on {}", req.path());
            }
            None => {}
        }

        let fut = self.service.call(req);
        Box::pin(async move { fut.await })
    }
}
