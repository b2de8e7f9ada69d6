use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde::de::DeserializeOwned;
use tracing::info;

use crate::engine::CorridorQuery;
use crate::server::envelope::parse_sample;
use crate::server::error::ServerError;
use crate::server::wire::{
    ComputeMultipleRequest, ComputeMultipleResponse, ComputeRequest, ComputeResponse, Numeric,
    PointsResponse, PushResponse,
};
use crate::server::AppState;

fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ServerError> {
    serde_json::from_slice(body).map_err(|err| ServerError::malformed("Invalid request body", err))
}

fn corridor_width(requested: Option<Numeric>, fallback: f64) -> Result<f64, ServerError> {
    match requested {
        None => Ok(fallback),
        Some(Numeric(width)) if width >= 0.0 => Ok(width),
        Some(Numeric(width)) => Err(ServerError::malformed(
            "Invalid corridor width",
            format!("{width} is negative"),
        )),
    }
}

/// Runs a CPU-bound query off the async workers.
async fn blocking<T, F>(query: F) -> Result<T, ServerError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(query)
        .await
        .map_err(|err| ServerError::Internal(err.to_string()))
}

pub async fn get_all_points(State(state): State<Arc<AppState>>) -> Json<PointsResponse> {
    Json(state.engine.list_all_points().into())
}

pub async fn compute(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ComputeResponse>, ServerError> {
    let request = parse_body::<ComputeRequest>(&body)?;
    let width = corridor_width(request.corridor, state.corridor_width)?;
    let segment = request.segment();

    let report = blocking(move || state.engine.query_corridor(segment, width)).await?;
    Ok(Json(report.into()))
}

pub async fn compute_multiple(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ComputeMultipleResponse>, ServerError> {
    let request = parse_body::<ComputeMultipleRequest>(&body)?;
    let width = corridor_width(request.corridor, state.corridor_width)?;
    let query = CorridorQuery::new(request.segments()).with_width(width);

    let results = blocking(move || state.engine.query_chain(&query)).await?;
    Ok(Json(results.into()))
}

pub async fn push_data(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<PushResponse>, ServerError> {
    let point = parse_sample(&body)?;
    let count = state
        .engine
        .ingest(point.latitude, point.longitude, point.speed);

    info!(?point, count, "Point added");
    Ok(Json(PushResponse {
        status: "Point added",
        count,
    }))
}
