use crate::error::ApiError;
use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Body extractor that accepts either a JSON or a URL-encoded form payload.
///
/// The landing page posts HTML forms while API clients usually send JSON, so
/// both are decoded into the same request type. Anything that is not JSON is
/// handed to the form decoder, which rejects unsupported content types.
#[derive(Debug, Clone)]
pub struct FormOrJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for FormOrJson<T>
where
    T: DeserializeOwned + Send + 'static,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/json"));

        if is_json {
            let Json(payload) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
                debug!("Rejected JSON body: {}", rejection.body_text());
                ApiError::bad_request(rejection.body_text())
            })?;
            Ok(Self(payload))
        } else {
            let Form(payload) = Form::<T>::from_request(req, state).await.map_err(|rejection| {
                debug!("Rejected form body: {}", rejection.body_text());
                ApiError::bad_request(rejection.body_text())
            })?;
            Ok(Self(payload))
        }
    }
}

/// `Path` whose rejections are reported as [`ApiError`].
#[derive(Debug, FromRequestParts)]
#[from_request(via(Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

/// `Query` whose rejections are reported as [`ApiError`].
#[derive(Debug, FromRequestParts)]
#[from_request(via(Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);
