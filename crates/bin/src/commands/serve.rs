//! Serve command - runs the capsule web server.

use std::sync::Arc;

use axum::{
    Form, Json, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tokio::signal::unix::{SignalKind, signal};
use tower_cookies::{CookieManagerLayer, Cookies};

use timecapsule::{
    AppController, Clock, SubmissionOutcome, SystemClock, controller::SAVE_FAILED_MESSAGE,
};

use crate::backend::{open_capsule, store_label};
use crate::cli::ServeArgs;
use crate::flash::{Flash, set_flash, take_flash};
use crate::templates::{self, Draft, Notice, NoticeKind};

/// Shown when the capsule cannot be read. Details go to the log only.
const RENDER_FAILED_MESSAGE: &str =
    "The capsule could not be read right now. Please try again later.";

#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<AppController>,
    pub clock: Arc<dyn Clock>,
}

/// Submission form data
#[derive(Deserialize)]
struct SubmitForm {
    #[serde(default)]
    name: String,
    #[serde(default)]
    message: String,
}

/// Run the capsule server
pub async fn run(args: &ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let controller = open_capsule(&args.capsule).await?;

    let app_state = AppState {
        controller: Arc::new(controller),
        clock: Arc::new(SystemClock),
    };

    // Pin (or compute) the target up front so it shows in the startup log
    let view = app_state
        .controller
        .render_state(app_state.clock.now())
        .await?;
    tracing::info!(target = %view.target(), open = view.is_open(), "Capsule loaded");

    let app = router(app_state);

    // Bind server
    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let local_addr = listener.local_addr()?;

    // Print startup message
    println!("Time Capsule server started");
    println!();
    println!("Web Interface: http://localhost:{}", local_addr.port());
    println!("Store:         {}", store_label(&args.capsule));
    println!("Reveal target: {}", view.target());
    println!();
    println!("Available endpoints:");
    println!("  GET  /                 - Capsule page");
    println!("  POST /submit           - Form submission");
    println!("  GET  /api/v0/state     - Current view as JSON");
    println!("  POST /api/v0/messages  - JSON submission");
    println!("  GET  /health           - Health check");
    println!();
    println!("Press Ctrl+C to shutdown");

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    println!("Server shut down");
    Ok(())
}

/// Build the router for the capsule web interface and API
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handle_index))
        .route("/submit", post(handle_submit_form))
        .route("/api/v0/state", get(handle_api_state))
        .route("/api/v0/messages", post(handle_api_submit))
        .route("/health", get(handle_health_endpoint))
        .layer(CookieManagerLayer::new())
        .with_state(state)
}

async fn shutdown_signal() {
    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!("Failed to set up SIGTERM handler: {e}");
            let _ = tokio::signal::ctrl_c().await;
            return;
        }
    };

    tokio::select! {
        _ = sigterm.recv() => tracing::info!("Received SIGTERM, initiating graceful shutdown..."),
        _ = tokio::signal::ctrl_c() => tracing::info!("Received SIGINT, initiating graceful shutdown..."),
    }
}

// ============================================================================
// Page Handlers
// ============================================================================

/// Render the capsule page, or an error page if the store cannot be read
async fn render_capsule(
    state: &AppState,
    status: StatusCode,
    notice: Option<&Notice>,
    draft: Option<&Draft>,
) -> Response {
    match state.controller.render_state(state.clock.now()).await {
        Ok(view) => (status, Html(templates::capsule_page(&view, notice, draft))).into_response(),
        Err(e) => {
            tracing::error!("Failed to render capsule: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(templates::error_page(RENDER_FAILED_MESSAGE)),
            )
                .into_response()
        }
    }
}

/// Handler for GET / - Show the capsule
async fn handle_index(State(state): State<AppState>, cookies: Cookies) -> Response {
    let notice = take_flash(&cookies).map(|flash| flash.notice());
    render_capsule(&state, StatusCode::OK, notice.as_ref(), None).await
}

/// Handler for POST /submit - Process a form submission
///
/// Successful and over-capacity submissions redirect back to `/` with a flash
/// notice. Validation and save failures re-render the page in place with the
/// submitted text kept in the form.
async fn handle_submit_form(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<SubmitForm>,
) -> Response {
    let draft = Draft {
        name: form.name,
        message: form.message,
    };

    match state.controller.submit(&draft.name, &draft.message).await {
        Ok(outcome) => match Flash::from_outcome(&outcome) {
            Some(flash) => {
                set_flash(&cookies, flash);
                Redirect::to("/").into_response()
            }
            None => {
                let notice = Notice::new(NoticeKind::Error, outcome.user_message());
                render_capsule(
                    &state,
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Some(&notice),
                    Some(&draft),
                )
                .await
            }
        },
        Err(_) => {
            let notice = Notice::new(NoticeKind::Error, SAVE_FAILED_MESSAGE);
            render_capsule(
                &state,
                StatusCode::INTERNAL_SERVER_ERROR,
                Some(&notice),
                Some(&draft),
            )
            .await
        }
    }
}

// ============================================================================
// API and Health Handlers
// ============================================================================

/// JSON submission body
#[derive(Deserialize)]
struct SubmitRequest {
    #[serde(default)]
    name: String,
    #[serde(default)]
    message: String,
}

/// JSON submission response
#[derive(Serialize)]
struct SubmitResponse {
    outcome: &'static str,
    message: String,
}

/// Handler for GET /api/v0/state - Current view model
async fn handle_api_state(State(state): State<AppState>) -> Response {
    match state.controller.render_state(state.clock.now()).await {
        Ok(view) => Json(view).into_response(),
        Err(e) => {
            tracing::error!("Failed to render capsule: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": RENDER_FAILED_MESSAGE })),
            )
                .into_response()
        }
    }
}

/// Handler for POST /api/v0/messages - JSON submission
async fn handle_api_submit(
    State(state): State<AppState>,
    Json(request): Json<SubmitRequest>,
) -> Response {
    match state.controller.submit(&request.name, &request.message).await {
        Ok(outcome) => {
            let status = match outcome {
                SubmissionOutcome::Success => StatusCode::CREATED,
                SubmissionOutcome::ValidationFailed { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                SubmissionOutcome::CapacityReached => StatusCode::CONFLICT,
            };
            let body = SubmitResponse {
                outcome: outcome.code(),
                message: outcome.user_message().to_string(),
            };
            (status, Json(body)).into_response()
        }
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(SubmitResponse {
                outcome: "persistence_error",
                message: SAVE_FAILED_MESSAGE.to_string(),
            }),
        )
            .into_response(),
    }
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    store: &'static str,
}

/// Handler for GET /health - Health check endpoint
async fn handle_health_endpoint(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        store: state.controller.store().kind(),
    })
}
