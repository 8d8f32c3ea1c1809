use std::sync::Arc;

use axum::{
    Json, body::Bytes, extract::State as AxumState, http::HeaderMap, response::IntoResponse,
};
use records::payloads::{HealthPayload, ResponsesPayload, YesResponse};
use serde_json::{Value, json};
use tracing::info;

use crate::{
    error::AppError,
    state::State,
    utils::{Client, get_yes_request},
};

pub async fn yes_handler(
    AxumState(state): AxumState<Arc<State>>,
    Client(client): Client,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<YesResponse>, AppError> {
    let request = get_yes_request(&headers, &body)?;

    #[cfg(feature = "verbose")]
    info!("   Client: {:?} from {:?}", client.user_agent, client.ip);

    let recorded = state.recorder.lock().await.record(request.message, client);

    info!(
        "💍 YES recorded at {}",
        records::format_timestamp(&recorded.record.timestamp)
    );
    info!("   Message: {}", recorded.record.message);

    Ok(Json(YesResponse {
        success: true,
        data: recorded.record,
        total_responses: recorded.total,
    }))
}

pub async fn responses_handler(AxumState(state): AxumState<Arc<State>>) -> Json<ResponsesPayload> {
    let recorder = state.recorder.lock().await;

    Json(ResponsesPayload {
        count: recorder.len(),
        responses: recorder.responses().to_vec(),
    })
}

pub async fn health_handler(AxumState(state): AxumState<Arc<State>>) -> Json<HealthPayload> {
    Json(state.recorder.lock().await.health())
}

pub async fn index_handler() -> impl IntoResponse {
    Json(index())
}

fn index() -> Value {
    json!({
        "message": "💕 Proposal Backend API",
        "endpoints": {
            "POST /yes": "Record a YES response",
            "GET /responses": "Get all responses",
            "GET /health": "Health check"
        }
    })
}
