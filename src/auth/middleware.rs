use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    web, Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use super::extractors::RequestContext;
use crate::store::Store;

const BEARER_PREFIX: &str = "Bearer ";

/// Resolves the bearer token of every request into a `RequestContext`.
///
/// The middleware never rejects a request: a missing header, a malformed or
/// expired token, or a token for an unknown user all yield an anonymous context.
/// Handlers decide whether they need an identity.
pub struct ContextResolver;

impl<S, B> Transform<S, ServiceRequest> for ContextResolver
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = ContextResolverService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ContextResolverService { service }))
    }
}

pub struct ContextResolverService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for ContextResolverService<S>
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
        let context = resolve_context(&req);
        req.extensions_mut().insert(context);

        let fut = self.service.call(req);
        Box::pin(fut)
    }
}

/// Extracts the raw credential from an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header_value: &str) -> Option<&str> {
    header_value
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

fn resolve_context(req: &ServiceRequest) -> RequestContext {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(bearer_token);

    let Some(token) = token else {
        return RequestContext::anonymous();
    };

    let Some(store) = req.app_data::<web::Data<Store>>() else {
        log::warn!("no store registered, treating {} as anonymous", req.path());
        return RequestContext::anonymous();
    };

    match store.resolve_token(token) {
        Some(user) => RequestContext::authenticated(user),
        None => RequestContext::anonymous(),
    }
}
