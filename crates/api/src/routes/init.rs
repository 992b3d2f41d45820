//! `POST /init` — admits a new ceremony instance.

use axum::{body::Bytes, extract::State, http::StatusCode, response::IntoResponse};
use dkg_wire::SignedTransport;

use crate::{error::ApiError, state::AppState};

pub async fn init(State(state): State<AppState>, body: Bytes) -> Result<impl IntoResponse, ApiError> {
    let signed = SignedTransport::decode(&body)?;
    let response_bytes = state.switch.init_instance(signed).await?;
    Ok((StatusCode::OK, response_bytes))
}
