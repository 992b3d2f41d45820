//! `POST /dkg` — any non-`Init` transport for an existing ceremony instance.

use axum::{body::Bytes, extract::State, http::StatusCode, response::IntoResponse};
use dkg_wire::SignedTransport;

use crate::{error::ApiError, state::AppState};

pub async fn dkg(State(state): State<AppState>, body: Bytes) -> Result<impl IntoResponse, ApiError> {
    let signed = SignedTransport::decode(&body)?;
    state.switch.process_message(signed).await?;
    Ok(StatusCode::OK)
}
