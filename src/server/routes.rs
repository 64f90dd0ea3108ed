//! HTTP routes: the contact submission endpoint and a health probe.

use std::any::Any;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde_json::Value;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::AppState;
use crate::envelope::Envelope;
use crate::lead::options::is_state_option;
use crate::lead::{self, LeadSubmission};
use crate::relay;

/// Build the router. `allowed_origins` enables CORS for those origins;
/// empty leaves CORS off.
pub fn contact_routes(state: AppState, allowed_origins: &[HeaderValue]) -> Router {
    let router = Router::new()
        .route("/health", get(health))
        .route("/contact", post(submit_contact))
        .route("/api/contact", post(submit_contact))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(CatchPanicLayer::custom(internal_error_for_panic))
                .layer(TraceLayer::new_for_http()),
        );

    if allowed_origins.is_empty() {
        router
    } else {
        router.layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(allowed_origins.iter().cloned()))
                .allow_methods([Method::POST])
                .allow_headers([header::CONTENT_TYPE]),
        )
    }
}

// ── Health ──────────────────────────────────────────────────────────────

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "merch-leads"
    }))
}

// ── Contact ─────────────────────────────────────────────────────────────

/// POST /contact
///
/// Parse → validate → record → relay (detached) → respond.
async fn submit_contact(State(state): State<AppState>, body: Bytes) -> (StatusCode, Json<Envelope>) {
    let payload: Value = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            warn!(error = %e, "Contact submission is not valid JSON");
            return internal_error();
        }
    };

    let lead = match lead::validate(&payload) {
        Ok(lead) => lead,
        Err(errors) => {
            info!(count = errors.errors().len(), "Contact submission failed validation");
            return (
                StatusCode::BAD_REQUEST,
                Json(Envelope::invalid(errors.into_inner())),
            );
        }
    };

    let submission_id = Uuid::new_v4();
    record_lead(submission_id, &lead);

    let summary = lead.summary();
    relay::spawn_relay(
        state.notifier.clone(),
        state.relay_timeout,
        submission_id,
        lead,
    );

    (StatusCode::OK, Json(Envelope::accepted(summary)))
}

/// The only durable trace of a lead: one structured log event.
fn record_lead(submission_id: Uuid, lead: &LeadSubmission) {
    let received_at = Utc::now().to_rfc3339();
    info!(
        %submission_id,
        %received_at,
        campaign = %lead.committee,
        contact = %lead.full_name,
        email = %lead.email,
        phone = lead.phone.as_deref().unwrap_or("not provided"),
        office_level = %lead.office_level,
        state = %lead.state,
        listed_state = is_state_option(&lead.state),
        products = %lead.products.join(", "),
        quantities = %lead.quantities,
        timeline = %lead.timeline,
        paid_for_by = %lead.paid_for_by,
        notes = lead.notes.as_deref().unwrap_or("none"),
        consent = lead.consent,
        "New campaign merchandise request"
    );
}

fn internal_error() -> (StatusCode, Json<Envelope>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(Envelope::internal()),
    )
}

fn internal_error_for_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!(panic = detail, "Request handler panicked");
    internal_error().into_response()
}
