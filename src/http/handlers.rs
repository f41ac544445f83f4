use crate::core::{LotId, LotRepository};
use crate::http::{render, AppState};
use crate::utils::error::ParkingError;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        message: "Server is running",
    })
}

/// Accepts plain decimal digits only, like the URL converter it mirrors.
pub(crate) fn parse_lot_id(raw: &str) -> Option<LotId> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

fn status_for(err: &ParkingError) -> StatusCode {
    if err.is_not_found() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

fn log_failure(route: &str, err: &ParkingError) {
    if err.is_not_found() {
        tracing::debug!(route, "{}", err);
    } else {
        tracing::error!(
            route,
            category = ?err.category(),
            severity = ?err.severity(),
            "request failed: {}",
            err
        );
    }
}

fn html_error(route: &str, err: &ParkingError) -> Response {
    log_failure(route, err);
    if err.is_not_found() {
        return html_not_found(&err.to_string());
    }
    (
        status_for(err),
        Html(render::error_page(&err.user_friendly_message())),
    )
        .into_response()
}

fn html_not_found(message: &str) -> Response {
    (StatusCode::NOT_FOUND, Html(render::not_found_page(message))).into_response()
}

fn json_error(route: &str, err: &ParkingError) -> Response {
    log_failure(route, err);
    if err.is_not_found() {
        return json_not_found(&err.to_string());
    }
    error_body(status_for(err), "internal", &err.user_friendly_message())
}

fn json_not_found(message: &str) -> Response {
    error_body(StatusCode::NOT_FOUND, "not_found", message)
}

fn error_body(status: StatusCode, code: &str, message: &str) -> Response {
    (
        status,
        Json(json!({"error": {"code": code, "message": message}})),
    )
        .into_response()
}

fn unparsable_id(route: &str, raw: &str) -> String {
    tracing::debug!(route, "Rejected lot id '{}'", raw);
    format!("Parking lot '{raw}' not found")
}

pub async fn dashboard_handler<R: LotRepository + 'static>(
    State(board): State<AppState<R>>,
) -> Response {
    match board.dashboard().await {
        Ok(lots) => Html(render::dashboard_page(&lots)).into_response(),
        Err(err) => html_error("/", &err),
    }
}

pub async fn detail_handler<R: LotRepository + 'static>(
    State(board): State<AppState<R>>,
    Path(raw_id): Path<String>,
) -> Response {
    let route = "/parking/:lot_id/";
    let Some(lot_id) = parse_lot_id(&raw_id) else {
        return html_not_found(&unparsable_id(route, &raw_id));
    };

    match board.detail(lot_id).await {
        Ok(detail) => Html(render::detail_page(&detail)).into_response(),
        Err(err) => html_error(route, &err),
    }
}

pub async fn summary_handler<R: LotRepository + 'static>(
    State(board): State<AppState<R>>,
    Path(raw_id): Path<String>,
) -> Response {
    let route = "/api/parking/:lot_id/";
    let Some(lot_id) = parse_lot_id(&raw_id) else {
        return json_not_found(&unparsable_id(route, &raw_id));
    };

    match board.summary(lot_id).await {
        Ok(summary) => Json(summary).into_response(),
        Err(err) => json_error(route, &err),
    }
}
