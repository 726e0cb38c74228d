use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;

use crate::models::PrinterStatus;
use crate::services::SharedStatus;

#[derive(Clone)]
pub struct StatusState {
    pub status: SharedStatus,
}

/// `GET /status`: a flat JSON snapshot of the device state, every field
/// `null` until a response frame has reported it. The record is cloned
/// under the read lock so the reply never interleaves with a merge.
pub async fn get_status(State(state): State<StatusState>) -> Json<PrinterStatus> {
    let snapshot = state.status.read().await.clone();

    Json(snapshot)
}

/// `GET /`: the embedded dashboard page, a plain consumer of `/status`.
pub async fn home_page() -> Html<&'static str> {
    Html(include_str!("../../assets/dashboard.html"))
}

pub async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not Found")
}
