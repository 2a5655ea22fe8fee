//! Actix-web extractor for API key authentication.
//!
//! Secret header values are wrapped in `SecretString` the moment they
//! are read and zeroized when the request completes.

use actix_web::dev::Payload;
use actix_web::http::StatusCode;
use actix_web::{web, FromRequest, HttpRequest, HttpResponse, ResponseError};
use futures_util::future::LocalBoxFuture;
use secrecy::{ExposeSecret, SecretString};
use uuid::Uuid;

use super::AdminKey;
use crate::config::{ADMIN_KEY_HEADER, API_KEY_HEADER};
use crate::db::DbPool;
use crate::error::ErrorResponse;
use crate::models::{AuthenticatedCaller, UserRole};
use crate::services::api_key;

/// Extract a secret header value, wrapping it in SecretString.
/// Returns None if the header is missing or invalid UTF-8.
fn extract_secret_header(req: &HttpRequest, header_name: &str) -> Option<SecretString> {
    req.headers()
        .get(header_name)
        .and_then(|v| v.to_str().ok())
        .map(|s| SecretString::from(s.to_string()))
}

/// Authentication error for extractors.
#[derive(Debug)]
pub struct AuthError {
    message: String,
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl ResponseError for AuthError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::UNAUTHORIZED).json(ErrorResponse {
            error: "UNAUTHORIZED".to_string(),
            message: self.message.clone(),
            details: None,
        })
    }
}

/// Extractor that requires a valid API key.
///
/// Use this in handlers that require authentication:
/// ```ignore
/// async fn protected_handler(auth: ApiKeyAuth) -> impl Responder {
///     // auth.caller contains the authenticated caller info
/// }
/// ```
///
/// The bootstrap admin key (`X-Admin-Key`) authenticates as a synthetic
/// system admin whose key ID is the nil UUID, so key management works
/// before any database key exists.
pub struct ApiKeyAuth {
    pub caller: AuthenticatedCaller,
}

impl ApiKeyAuth {
    /// True when the caller authenticated with the bootstrap admin key
    /// rather than a stored API key.
    pub fn is_bootstrap(&self) -> bool {
        self.caller.key_id.is_nil()
    }
}

impl FromRequest for ApiKeyAuth {
    type Error = AuthError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        // Clone what the async block needs out of the request
        let pool = req.app_data::<web::Data<DbPool>>().cloned();
        let stored_admin_key = req.app_data::<web::Data<AdminKey>>().cloned();

        // Extract secrets from headers - immediately wrapped in SecretString
        let provided_api_key = extract_secret_header(req, API_KEY_HEADER);
        let provided_admin_key = extract_secret_header(req, ADMIN_KEY_HEADER);

        Box::pin(async move {
            let pool = pool.ok_or_else(|| AuthError {
                message: "Internal configuration error".to_string(),
            })?;

            // Check admin key first (for bootstrap operations)
            if let Some(ref provided) = provided_admin_key {
                if let Some(ref stored) = stored_admin_key {
                    if stored.verify(provided.expose_secret()) {
                        return Ok(ApiKeyAuth {
                            caller: AuthenticatedCaller {
                                key_id: Uuid::nil(),
                                name: "Admin (Bootstrap)".to_string(),
                                key_prefix: "admin".to_string(),
                                role: UserRole::SystemAdmin,
                            },
                        });
                    }
                }
            }

            // Check API key from database
            match provided_api_key {
                Some(ref key) => {
                    match api_key::verify_key(pool.get_ref(), key.expose_secret()).await {
                        Ok(caller) => Ok(ApiKeyAuth { caller }),
                        Err(e) => Err(AuthError {
                            message: e.to_string(),
                        }),
                    }
                }
                None => Err(AuthError {
                    message: "Missing API key. Provide X-API-Key header.".to_string(),
                }),
            }
        })
    }
}
