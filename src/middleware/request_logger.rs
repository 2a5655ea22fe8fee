//! Request logging middleware.
//!
//! Logs every request with latency and status. API keys are reduced to
//! their stored prefix so full keys never reach the logs.

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use futures_util::future::LocalBoxFuture;
use std::future::{Ready, ready};
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::config::API_KEY_HEADER;

/// Characters of the API key kept in log output.
const LOGGED_KEY_PREFIX: usize = 8;

/// Request logger middleware factory.
pub struct RequestLogger;

impl<S, B> Transform<S, ServiceRequest> for RequestLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestLoggerMiddleware { service }))
    }
}

/// Request logger middleware service.
pub struct RequestLoggerMiddleware<S> {
    service: S,
}

fn masked_key(req: &ServiceRequest) -> String {
    req.headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|k| {
            if k.len() >= LOGGED_KEY_PREFIX {
                format!("{}...", &k[..LOGGED_KEY_PREFIX])
            } else {
                "invalid".to_string()
            }
        })
        .unwrap_or_else(|| "none".to_string())
}

impl<S, B> Service<ServiceRequest> for RequestLoggerMiddleware<S>
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
        let start = Instant::now();
        let method = req.method().to_string();
        let path = req.path().to_string();
        let remote_addr = req
            .connection_info()
            .realip_remote_addr()
            .unwrap_or("unknown")
            .to_string();
        let api_key = masked_key(&req);

        debug!(
            target: "http",
            method = %method,
            path = %path,
            remote_addr = %remote_addr,
            api_key = %api_key,
            "request started"
        );

        let fut = self.service.call(req);

        Box::pin(async move {
            let res = fut.await?;
            let elapsed = start.elapsed();
            let status = res.status().as_u16();

            if res.status().is_success() {
                info!(
                    target: "http",
                    method = %method,
                    path = %path,
                    status = %status,
                    duration_ms = %elapsed.as_millis(),
                    api_key = %api_key,
                    "request completed"
                );
            } else {
                warn!(
                    target: "http",
                    method = %method,
                    path = %path,
                    status = %status,
                    duration_ms = %elapsed.as_millis(),
                    api_key = %api_key,
                    remote_addr = %remote_addr,
                    "request failed"
                );
            }

            Ok(res)
        })
    }
}
