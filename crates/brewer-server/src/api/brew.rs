use std::any::Any;
use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use brewer_core::BrewOutcome;
use chrono::SecondsFormat;
use serde::Serialize;

use super::AppState;
use crate::middleware::RequestId;

const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred.";

/// Body of every `/brew-coffee` response. Only the ready outcome carries a
/// message and timestamp.
#[derive(Debug, Serialize)]
pub struct BrewResponse {
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prepared: Option<String>,
}

impl BrewResponse {
    fn status_only(status: u16) -> Self {
        Self {
            status,
            message: None,
            prepared: None,
        }
    }

    fn unexpected_error() -> Self {
        Self {
            status: 500,
            message: Some(UNEXPECTED_ERROR_MESSAGE),
            prepared: None,
        }
    }
}

impl From<&BrewOutcome> for BrewResponse {
    fn from(outcome: &BrewOutcome) -> Self {
        match outcome {
            BrewOutcome::Ready {
                message,
                prepared_at,
            } => Self {
                status: outcome.status_code(),
                message: Some(*message),
                prepared: Some(prepared_at.to_rfc3339_opts(SecondsFormat::AutoSi, false)),
            },
            BrewOutcome::TooBusy | BrewOutcome::HolidayEasterEgg => {
                Self::status_only(outcome.status_code())
            }
        }
    }
}

pub(super) async fn brew_coffee(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    request: Request,
) -> Response {
    let caller_ip = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());

    match state.machine.brew(caller_ip).await {
        Ok(outcome) => {
            let status = match outcome {
                BrewOutcome::Ready { .. } => StatusCode::OK,
                BrewOutcome::TooBusy => StatusCode::SERVICE_UNAVAILABLE,
                BrewOutcome::HolidayEasterEgg => StatusCode::IM_A_TEAPOT,
            };
            (status, Json(BrewResponse::from(&outcome))).into_response()
        }
        Err(e) => {
            tracing::error!(request_id = %req_id.0, error = %e, "brew request failed");
            unexpected_error()
        }
    }
}

/// Generic 500 with no internal detail.
pub(super) fn unexpected_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(BrewResponse::unexpected_error()),
    )
        .into_response()
}

/// Response for a panicking handler, used by `CatchPanicLayer`.
#[allow(clippy::needless_pass_by_value)]
pub(super) fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<&str>()
        .map(ToString::to_string)
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());
    tracing::error!(panic = %detail, "handler panicked");
    unexpected_error()
}
