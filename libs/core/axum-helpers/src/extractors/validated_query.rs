//! Query-string extractor that reports parse failures as 422.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Deserializer, de::DeserializeOwned};

/// Like [`Query`], but rejects with the standard error body and status 422.
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::from(e).into_response())?;

        Ok(ValidatedQuery(value))
    }
}

/// `deserialize_with` helper accepting `true/false`, `1/0`, `yes/no`, `on/off`
/// in any letter case, the way Python clients tend to send booleans.
pub fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    core_config::parse_bool(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("'{}' is not a valid boolean", raw)))
}
