use std::{convert::Infallible, net::SocketAddr};

use axum::{
    body::Bytes,
    extract::{ConnectInfo, FromRequestParts},
    http::{
        HeaderMap,
        header::{CONTENT_TYPE, USER_AGENT},
        request::Parts,
    },
};
use records::{ClientMetadata, payloads::YesRequest};

use crate::error::AppError;

/// Only `application/json` bodies are parsed. Any other body, and an empty
/// one, is treated as `{}`.
pub fn get_yes_request(headers: &HeaderMap, bytes: &Bytes) -> Result<YesRequest, AppError> {
    if !is_json(headers) || bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(YesRequest::default());
    }

    Ok(serde_json::from_slice(bytes)?)
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}

/// Request metadata stored alongside each record, taken as-is.
pub struct Client(pub ClientMetadata);

impl<S: Send + Sync> FromRequestParts<S> for Client {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let mut metadata = ClientMetadata::default();

        if let Some(agent) = parts
            .headers
            .get(USER_AGENT)
            .and_then(|value| value.to_str().ok())
        {
            metadata.user_agent = agent.to_string();
        }

        metadata.ip = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(address)| address.ip().to_string());

        Ok(Self(metadata))
    }
}
